use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Runtime configuration for a [`Referee`][crate::referee::Referee].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, default)]
pub struct Options {
    /// Whether games may end.
    ///
    /// When disabled, the status stays [`Status::Playing`][crate::chess::Status::Playing]
    /// even if the side to move has no legal moves left.
    pub terminal: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { terminal: true }
    }
}

/// Formats the options in [RON](https://github.com/ron-rs/ron).
impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}

/// The reason why parsing [`Options`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse referee options")]
pub struct ParseOptionsError(ron::de::SpannedError);

impl FromStr for Options {
    type Err = ParseOptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
