//! Record traversal and entrypoints.
//!
//! - **`field`**: per-type dispatch (`SanitizeField`): what a single field does
//!   when it is untagged or carries a policy.
//! - **`record`**: the record-level walk (`Sanitize`) and the free functions
//!   callers use.

mod field;
mod record;

pub use field::SanitizeField;
pub use record::{sanitize_record, sanitize_record_with, Sanitize};
