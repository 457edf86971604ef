//! Waystep - terminal multi-step form wizard
//!
//! A wizard is a sequence of independently declared sub-forms presented one
//! at a time, with shared navigation, per-step validation gating, and a
//! single merged submission at the end. The orchestration core lives in
//! [`wizard`] and has no UI dependency; [`form`] holds the per-step form
//! collaborator, [`definition`] the TOML wizard documents, and [`app`]/[`ui`]
//! the ratatui host that drives everything.

pub mod app;
pub mod constants;
pub mod definition;
pub mod form;
pub mod ui;
pub mod wizard;
