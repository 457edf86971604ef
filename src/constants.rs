//! Application-wide constants

/// Event poll timeout in milliseconds
pub const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Spinner animation interval in milliseconds
pub const SPINNER_TICK_MS: u128 = 100;

/// Channel buffer size for app messages
pub const MESSAGE_CHANNEL_SIZE: usize = 32;

/// Maximum length for user text input (prevents memory exhaustion)
pub const MAX_INPUT_LENGTH: usize = 200;

/// Default file name for the merged submission payload
pub const DEFAULT_OUTPUT_FILE: &str = "waystep-output.json";

/// Definition file looked up in the working directory when none is given
pub const LOCAL_DEFINITION_FILE: &str = "waystep.toml";
