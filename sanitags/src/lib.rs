//! Attribute-driven sanitization of user-supplied text inside typed records.
//!
//! This crate separates:
//! - **Policy**: which cleaning function a field asks for (`"strip-all"`,
//!   `"safe-user-generated-content"`), declared on the type definition.
//! - **Registry**: the caller-supplied functions that implement each policy,
//!   installed once with [`setup`] and swappable at any time.
//!
//! The derive macro walks your record and rewrites tagged strings in place
//! when you call [`sanitize_record`] or [`Sanitize::sanitize`].
//!
//! Key rules:
//! - Use `#[sanitags("strip-all")]` or `#[sanitags("safe-user-generated-content")]`
//!   on `String` and `Vec<String>` fields.
//! - Unannotated fields are never sanitized. Unannotated fields whose type
//!   derives `Sanitize` are walked recursively.
//! - A policy on any other field type fails with
//!   [`SanitizeError::InvalidPropertyType`]; an unknown policy name fails with
//!   [`SanitizeError::InvalidTagValue`]. Both abort the whole traversal.
//! - Use `#[sanitags(skip)]` for field types that do not implement
//!   [`SanitizeField`] (types from other crates).
//!
//! ```rust
//! use sanitags::{PolicyConfig, Sanitize};
//!
//! #[derive(Sanitize)]
//! struct Comment {
//!     id: u64,
//!     #[sanitags("strip-all")]
//!     author: String,
//!     #[sanitags("safe-user-generated-content")]
//!     body: String,
//! }
//!
//! sanitags::setup(
//!     PolicyConfig::new()
//!         .with_strip_all(|s| s.replace(['<', '>'], ""))
//!         .with_safe_user_generated_content(|s| s.replace("<script>", "")),
//! );
//!
//! let mut comment = Comment {
//!     id: 7,
//!     author: "<b>ann</b>".to_string(),
//!     body: "<script>hi".to_string(),
//! };
//! comment.sanitize().unwrap();
//! assert_eq!(comment.author, "bann/b");
//! assert_eq!(comment.id, 7);
//! assert_eq!(comment.body, "hi");
//! ```
//!
//! What this crate does not do:
//! - implement any cleaning algorithm (bring your own, e.g. an HTML sanitizer)
//! - follow `Option`, `Box`, maps or lists of records
//! - perform I/O or logging (see the `slog` feature for an opt-in decorator)

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use sanitags_derive::Sanitize;

#[allow(unused_extern_crates)]
extern crate self as sanitags;

mod error;
mod policy;
mod registry;
mod sanitize;
#[cfg(feature = "slog")]
pub mod slog;

pub use error::SanitizeError;
pub use policy::PolicyName;
pub use registry::{global, setup, PolicyConfig, PolicyRegistry, PolicyResolver, SanitizeFn};
pub use sanitize::{sanitize_record, sanitize_record_with, Sanitize, SanitizeField};
