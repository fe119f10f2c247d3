//! Derive macro implementation for assert-matchers.
//!
//! This crate provides `#[derive(Compare)]` for the `assert-matchers` crate.
//! Users should depend on the main `assert-matchers` crate which re-exports
//! the derive next to the `Compare` trait.
//!
//! # Architecture Overview
//!
//! The derive happens in two phases:
//!
//! 1. **Parse** (`parse.rs`): Read the item and its `#[compare(..)]` field
//!    attributes into a `Container`
//! 2. **Expand** (`expand.rs`): Generate a `Compare` impl that hands every
//!    field to the runtime `Comparison` walker
//!
//! The generated code never compares values itself. Field visits go through
//! `Comparison::field` so the runtime rule list decides, per position,
//! whether to recurse, ignore or delegate.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;
mod parse;

/// Derives `assert_matchers::Compare` for a struct or enum.
///
/// Field attributes:
///
/// - `#[compare(internal)]`: the field is internal bookkeeping (caches,
///   sizes, unknown-field buffers). The default rule set ignores it;
///   `Rule::exact()` compares it like any other field.
/// - `#[compare(skip)]`: the field is never compared. Its type does not need
///   to implement `Compare`.
///
/// Every type parameter gets a `Compare` bound. Types with lifetime
/// parameters cannot implement `Compare` and are rejected.
///
/// ```
/// use assert_matchers::{Compare, Rule, compare};
///
/// #[derive(Debug, Compare)]
/// struct Segment {
///     seq: u32,
///     #[compare(internal)]
///     checksum: u16,
///     #[compare(skip)]
///     received_at: std::time::Instant,
/// }
///
/// let now = std::time::Instant::now();
/// let a = Segment { seq: 1, checksum: 0xbeef, received_at: now };
/// let b = Segment { seq: 1, checksum: 0, received_at: now };
///
/// assert!(compare::equal(&a, &b, &Rule::defaults()));
/// assert!(!compare::equal(&a, &b, &[Rule::exact()]));
/// ```
#[proc_macro_derive(Compare, attributes(compare))]
pub fn derive_compare(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match parse::Container::from_derive(&input) {
        Ok(container) => expand::expand(&container).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
