//! Runtime shell configuration.
//!
//! Values that a C shell would bake in with preprocessor switches are kept in a
//! small [`Config`] struct instead. It derives serde traits so firmware can ship
//! the settings as a JSON blob and decode it with `serde-json-core`:
//!
//! ```rust
//! use microsh::config::{Config, LineEnding};
//!
//! let config = Config::from_json(r#"{"end_line":"lf","max_auth_attempts":5}"#).unwrap();
//! assert_eq!(config.end_line, LineEnding::Lf);
//! assert_eq!(config.max_auth_attempts, 5);
//! assert!(config.log_exec_result);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default number of password attempts before a pending login is dropped.
pub const DEFAULT_MAX_AUTH_ATTEMPTS: u8 = 3;

/// Line terminator appended to every message the shell prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `"\r"`
    Cr,
    /// `"\n"`
    Lf,
    /// `"\r\n"`
    #[default]
    CrLf,
    /// `"\n\r"`
    LfCr,
}

impl LineEnding {
    /// The terminator as a string slice.
    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::Cr => "\r",
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::LfCr => "\n\r",
        }
    }
}

/// Shell settings.
///
/// Missing JSON fields fall back to [`Config::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Terminator for prompts, diagnostics and help text.
    pub end_line: LineEnding,
    /// Print `<command>: <reason>` after unknown-command and too-many-arguments
    /// outcomes.
    pub log_exec_result: bool,
    /// Password attempts allowed per `login`. Must be at least 1.
    pub max_auth_attempts: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            end_line: LineEnding::CrLf,
            log_exec_result: true,
            max_auth_attempts: DEFAULT_MAX_AUTH_ATTEMPTS,
        }
    }
}

impl Config {
    /// Decode and validate a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// * [`Error::Common`] - The document is not valid JSON for this struct
    /// * [`Error::Parameter`] - A value is out of range (see [`validate`](Self::validate))
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let (config, _) = serde_json_core::from_str::<Config>(json).map_err(|_| Error::Common)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_auth_attempts == 0 {
            return Err(Error::Parameter);
        }
        Ok(())
    }
}
