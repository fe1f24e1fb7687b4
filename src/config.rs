//! Host configuration: where the board lives and how big the screen is.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use canvas::persistence::PersistenceConfig;
use clap::Args;

/// Global options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// JSON file standing in for the browser's localStorage.
    #[arg(long = "store", env = "STICKYBOARD_STORE", default_value = "stickyboard.json", global = true)]
    pub store_path: PathBuf,

    /// Key the canvases blob is stored under.
    #[arg(long = "key", env = "STICKYBOARD_KEY", default_value = canvas::consts::DEFAULT_STORAGE_KEY, global = true)]
    pub storage_key: String,

    /// Simulated viewport, used to center new notes.
    #[arg(long, env = "STICKYBOARD_VIEWPORT", default_value = "1280x800", global = true)]
    pub viewport: Viewport,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    #[must_use]
    pub fn persistence(&self) -> PersistenceConfig {
        PersistenceConfig { storage_key: self.storage_key.clone() }
    }
}

/// Viewport size in CSS pixels, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid viewport {0:?}; expected WIDTHxHEIGHT with positive numbers, e.g. 1280x800")]
pub struct ParseViewportError(String);

impl FromStr for Viewport {
    type Err = ParseViewportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseViewportError(s.to_owned());
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: f64 = w.trim().parse().map_err(|_| invalid())?;
        let height: f64 = h.trim().parse().map_err(|_| invalid())?;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
