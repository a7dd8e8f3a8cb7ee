//! Application state shared by all handlers.
//!
//! Requests never share mutable state; this only carries read-only settings.

use watermarker_core::Config;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}
