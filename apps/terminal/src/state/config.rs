//! # Configuration State
//!
//! Read-only terminal configuration, loaded once at startup.
//!
//! ## Thread Safety
//! Configuration never changes after startup, so no lock is needed.

use std::ops::Deref;

use crate::config::TerminalConfig;

/// Terminal configuration handed to commands.
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    config: TerminalConfig,
}

impl ConfigState {
    pub fn new(config: TerminalConfig) -> Self {
        ConfigState { config }
    }
}

impl Deref for ConfigState {
    type Target = TerminalConfig;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}
