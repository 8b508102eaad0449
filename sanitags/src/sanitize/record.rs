//! Record layer: the walk over a record's fields and the public entrypoints.

use crate::{
    error::SanitizeError,
    registry::{self, PolicyResolver},
};

use super::field::SanitizeField;

/// A record whose fields can be sanitized in place.
///
/// Implemented by `#[derive(Sanitize)]`. The generated walk visits fields in
/// declaration order and stops at the first error; fields visited before the
/// failure keep their sanitized values, so a record that failed must not be
/// persisted.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Sanitize`",
    label = "this type cannot be walked for sanitization",
    note = "use `#[derive(Sanitize)]` on the type definition"
)]
pub trait Sanitize: SanitizeField {
    /// Sanitizes every tagged field, resolving policies through `policies`.
    fn sanitize_with<R>(&mut self, policies: &R) -> Result<(), SanitizeError>
    where
        R: PolicyResolver + ?Sized;

    /// Sanitizes every tagged field using the process-wide registry.
    fn sanitize(&mut self) -> Result<(), SanitizeError> {
        self.sanitize_with(registry::global())
    }
}

/// Sanitizes `record` in place using the policies installed with
/// [`crate::setup`].
///
/// ```rust
/// use sanitags::{PolicyConfig, Sanitize};
///
/// #[derive(Sanitize)]
/// struct Address {
///     #[sanitags("strip-all")]
///     city: String,
/// }
///
/// #[derive(Sanitize)]
/// struct User {
///     id: u32,
///     address: Address,
/// }
///
/// sanitags::setup(PolicyConfig::new().with_strip_all(|s| s.replace("<br>", "")));
///
/// let mut user = User {
///     id: 1,
///     address: Address { city: "Oslo<br>".to_string() },
/// };
/// sanitags::sanitize_record(&mut user).unwrap();
/// assert_eq!(user.address.city, "Oslo");
/// assert_eq!(user.id, 1);
/// ```
pub fn sanitize_record<T>(record: &mut T) -> Result<(), SanitizeError>
where
    T: Sanitize,
{
    record.sanitize_with(registry::global())
}

/// Sanitizes `record` in place using an explicit resolver.
///
/// Useful for private registries, fixed configurations in tests, or
/// decorated resolvers.
pub fn sanitize_record_with<T, R>(record: &mut T, policies: &R) -> Result<(), SanitizeError>
where
    T: Sanitize,
    R: PolicyResolver + ?Sized,
{
    record.sanitize_with(policies)
}
