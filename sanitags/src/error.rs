//! Errors raised while resolving policies or walking a record.
//!
//! Every variant is fatal to the traversal that produced it. Nothing is retried:
//! the causes are structural (a field declaration or a missing setup call) and
//! do not change between invocations.

use thiserror::Error;

use crate::policy::PolicyName;

/// Errors returned by [`crate::sanitize_record`] and the policy registry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SanitizeError {
    /// A field declares a policy but does not hold a string or a list of strings.
    ///
    /// Raised for tagged scalars, tagged lists of non-strings, tagged
    /// `Option`/`Box`/map values and tagged nested records alike.
    #[error("invalid property type on field `{field}`: expected a string or a list of strings")]
    InvalidPropertyType {
        /// Name of the offending field (tuple fields use their index).
        field: &'static str,
    },

    /// A field declares a policy name outside the recognized set.
    #[error("invalid tag value `{tag}` on field `{field}`")]
    InvalidTagValue {
        /// Name of the offending field.
        field: &'static str,
        /// The policy name exactly as declared.
        tag: String,
    },

    /// A policy name outside the recognized set was looked up directly.
    #[error("unknown policy `{0}`")]
    UnknownPolicy(String),

    /// The policy is recognized but no function was installed for it.
    #[error("no sanitize function is configured for policy `{0}`")]
    PolicyNotConfigured(PolicyName),
}

impl SanitizeError {
    /// Attaches field context to a policy lookup failure.
    ///
    /// Lookups by raw name report [`SanitizeError::UnknownPolicy`]; inside a
    /// record walk the same failure is a declaration defect on that field.
    pub(crate) fn on_field(self, field: &'static str) -> Self {
        match self {
            Self::UnknownPolicy(tag) => Self::InvalidTagValue { field, tag },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_policy_becomes_invalid_tag_value_on_field() {
        let err = SanitizeError::UnknownPolicy("bogus".to_string()).on_field("name");
        assert_eq!(
            err,
            SanitizeError::InvalidTagValue {
                field: "name",
                tag: "bogus".to_string(),
            }
        );
    }

    #[test]
    fn other_errors_pass_through_field_context() {
        let err = SanitizeError::PolicyNotConfigured(PolicyName::StripAll).on_field("name");
        assert_eq!(err, SanitizeError::PolicyNotConfigured(PolicyName::StripAll));
    }

    #[test]
    fn messages_name_the_field() {
        let err = SanitizeError::InvalidPropertyType { field: "tags" };
        assert_eq!(
            err.to_string(),
            "invalid property type on field `tags`: expected a string or a list of strings"
        );
        let err = SanitizeError::PolicyNotConfigured(PolicyName::SafeUserGeneratedContent);
        assert_eq!(
            err.to_string(),
            "no sanitize function is configured for policy `safe-user-generated-content`"
        );
    }
}
