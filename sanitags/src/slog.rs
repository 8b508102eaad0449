//! Adapters for observing policy resolution through `slog`.
//!
//! The traversal itself never logs. This module exists for callers who want
//! a trace of which policies a walk asked for: wrap any resolver in
//! [`LoggedResolver`] and pass it to [`crate::sanitize_record_with`].
//!
//! It is responsible for:
//! - Emitting one `debug` record per successful resolution and one `warn`
//!   record per failed resolution, keyed by policy name.
//! - Never logging field values, sanitized or not.
//!
//! It does not configure `slog` or change what the wrapped resolver returns.

use slog::{debug, warn, Key, Logger, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    error::SanitizeError,
    policy::PolicyName,
    registry::{PolicyResolver, SanitizeFn},
};

impl SlogValue for PolicyName {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, self.as_str())
    }
}

/// A [`PolicyResolver`] that logs every resolution made through it.
///
/// ## Example
/// ```ignore
/// use sanitags::slog::LoggedResolver;
///
/// let resolver = LoggedResolver::new(sanitags::global(), logger.clone());
/// sanitags::sanitize_record_with(&mut comment, &resolver)?;
/// ```
#[derive(Clone, Debug)]
pub struct LoggedResolver<R> {
    inner: R,
    logger: Logger,
}

impl<R> LoggedResolver<R>
where
    R: PolicyResolver,
{
    /// Wraps `inner`, logging through `logger`.
    pub fn new(inner: R, logger: Logger) -> Self {
        Self { inner, logger }
    }

    /// Returns the wrapped resolver.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R> PolicyResolver for LoggedResolver<R>
where
    R: PolicyResolver,
{
    fn resolve(&self, name: PolicyName) -> Result<SanitizeFn, SanitizeError> {
        match self.inner.resolve(name) {
            Ok(sanitize) => {
                debug!(self.logger, "resolved sanitize policy"; "policy" => name);
                Ok(sanitize)
            }
            Err(err) => {
                warn!(self.logger, "failed to resolve sanitize policy";
                    "policy" => name, "error" => %err);
                Err(err)
            }
        }
    }

    fn resolve_str(&self, name: &str) -> Result<SanitizeFn, SanitizeError> {
        match name.parse::<PolicyName>() {
            Ok(parsed) => self.resolve(parsed),
            Err(err) => {
                warn!(self.logger, "failed to resolve sanitize policy";
                    "policy" => name, "error" => %err);
                Err(err)
            }
        }
    }
}
