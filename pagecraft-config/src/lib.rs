//! Configuration of the page-builder editing core.
//!
//! The configuration is a KDL document provided by the host page. Everything is optional; an
//! empty document yields [`Config::default`].
//!
//! ```kdl
//! host {
//!     base-url "https://cms.example.com"
//!     entity "node" "12"
//! }
//! features "sections"
//! persistence { debounce-ms 200; }
//! ```

use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

use miette::{Context as _, IntoDiagnostic as _};
use tracing::debug;

mod features;
mod host;

pub use features::{Feature, FeatureFlags, Features};
pub use host::{EntityRef, Host};

/// Debounce window used when the config does not set one.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Number of undo steps kept when the config does not set a limit.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub host: Host,
    #[knuffel(child, default)]
    pub features: Features,
    #[knuffel(child, default)]
    pub persistence: Debounce,
    #[knuffel(child, default)]
    pub preview: Debounce,
    #[knuffel(child, default)]
    pub history: History,
}

/// Trailing-edge debounce window of a remote operation.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    #[knuffel(child, unwrap(argument), default = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,
}

impl Default for Debounce {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Debounce {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct History {
    /// Maximum number of undo steps; 0 means unlimited.
    #[knuffel(child, unwrap(argument), default = DEFAULT_HISTORY_LIMIT)]
    pub limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl History {
    pub fn max_steps(&self) -> Option<usize> {
        (self.limit != 0).then_some(self.limit)
    }
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("config.kdl");
        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        knuffel::parse(filename, text)
    }
}
