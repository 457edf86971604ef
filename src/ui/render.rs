//! Rendering strategy
//!
//! The wizard body is drawn through a strategy object. [`DefaultRenderer`]
//! uses the default drawing functions; a host may substitute any part of the
//! output by implementing [`WizardRenderer`] and overriding the matching
//! method (the default functions stay callable, so an override can wrap the
//! default output instead of replacing it).

use ratatui::{layout::Rect, Frame};

use crate::app::App;
use crate::ui::layout::{centered_rect, wizard_layout};
use crate::ui::screens::wizard;

/// Render-override hooks for the wizard screen.
pub trait WizardRenderer {
    /// The step-indicator strip.
    fn draw_indicator(&self, frame: &mut Frame, area: Rect, app: &App) {
        wizard::draw_indicator(frame, area, app);
    }

    /// The active step's body.
    fn draw_body(&self, frame: &mut Frame, area: Rect, app: &App) {
        wizard::draw_body(frame, area, app);
    }

    /// The action bar.
    fn draw_actions(&self, frame: &mut Frame, area: Rect, app: &App) {
        wizard::draw_actions(frame, area, app);
    }

    /// The whole wizard body: computes the default layout and delegates to
    /// the part hooks.
    fn draw_wizard(&self, frame: &mut Frame, app: &App) {
        let area = centered_rect(80, 90, frame.area());
        let (header, indicator, body, footer) = wizard_layout(area);
        wizard::draw_header(frame, header, &app.wizard_title);
        self.draw_indicator(frame, indicator, app);
        self.draw_body(frame, body, app);
        self.draw_actions(frame, footer, app);
    }
}

/// The built-in renderer: every hook keeps its default.
pub struct DefaultRenderer;

impl WizardRenderer for DefaultRenderer {}
