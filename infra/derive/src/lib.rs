#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the scopie crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! scopie-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! Examples below are `ignore`d to avoid compiling in this crate; the UI tests
//! under `tests/ui` exercise the real expansion.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for the error enums of the workspace.
///
/// Turns a plain enum into a `thiserror` error that can carry a human-readable
/// context string through the `?` chain.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Type Aliasing**: Emits `pub type Result<T, E = Name> = core::result::Result<T, E>;`.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source error.
/// * **Context Accessor**: `Name::context_hint()` returns the attached context, if any.
/// * **Standard Conversions**: `From<Source>` for variants with a `source` field
///   (or a field marked `#[source]`), enabling `?` on upstream errors.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. Variants with a source field must also carry `context: Option<Cow<'static, str>>`.
/// 3. A `context` field, when present, must have exactly that type.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[scopie_derive::scopie_error]
/// pub enum ManifestError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Unknown scope{}: {name}", format_context(.context))]
///     UnknownScope { name: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<()> {
///     builder.build().context("Building scope manifest")?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn scopie_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
