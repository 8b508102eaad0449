//! The closed set of policy names a field may declare.
//!
//! Names are plain identifiers. They say nothing about how cleaning is done;
//! the functions behind them are installed at run time through the registry.

use std::{fmt, str::FromStr};

use crate::error::SanitizeError;

/// A sanitization policy a field can declare with `#[sanitags("...")]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PolicyName {
    /// Remove all markup, leaving plain text. Declared as `"strip-all"`.
    StripAll,
    /// Keep a restricted safe subset of markup. Declared as
    /// `"safe-user-generated-content"`.
    SafeUserGeneratedContent,
}

impl PolicyName {
    /// Every recognized policy, in declaration order.
    pub const ALL: [Self; 2] = [Self::StripAll, Self::SafeUserGeneratedContent];

    /// The identifier used in field attributes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StripAll => "strip-all",
            Self::SafeUserGeneratedContent => "safe-user-generated-content",
        }
    }
}

impl fmt::Display for PolicyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyName {
    type Err = SanitizeError;

    /// Parses an identifier exactly; no case folding or trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SanitizeError::UnknownPolicy(s.to_string()))
    }
}
