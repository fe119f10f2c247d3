//! # assert-matchers: Structural Equality and Panic Matchers
//!
//! `assert-matchers` provides matchers for test assertions: small objects
//! that decide whether an actual value is acceptable and, when it is not,
//! explain why. Two families are included:
//!
//! - an **equality matcher** that compares values structurally under an
//!   ordered list of rules, ignoring bookkeeping fields by default, and
//! - a **panic matcher** that runs a callable, captures the value it panics
//!   with and checks it against nothing, a literal, or another matcher.
//!
//! # Table of Contents
//!
//! - [Quick Start](#quick-start)
//! - [Equality](#equality)
//!   - [Deriving Compare](#deriving-compare)
//!   - [Comparison Rules](#comparison-rules)
//!   - [Cyclic Values](#cyclic-values)
//! - [Panics](#panics)
//!   - [Expectations](#expectations)
//!   - [Nested Matchers](#nested-matchers)
//! - [Error Messages](#error-messages)
//! - [Writing a Matcher](#writing-a-matcher)
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! assert-matchers = "0.1"
//! ```
//!
//! Basic example:
//!
//! ```rust
//! use assert_matchers::{Compare, assert_that, equal, panics_with};
//!
//! #[derive(Debug, Compare)]
//! struct Request {
//!     method: String,
//!     path: String,
//!     #[compare(internal)]
//!     wire_size: usize,
//! }
//!
//! let parsed = Request {
//!     method: "GET".to_string(),
//!     path: "/health".to_string(),
//!     wire_size: 38,
//! };
//!
//! // `wire_size` is internal, so it is not compared
//! assert_that!(parsed, equal(Request {
//!     method: "GET".to_string(),
//!     path: "/health".to_string(),
//!     wire_size: 0,
//! }));
//!
//! assert_that!(|| panic!("queue is empty"), panics_with("queue is empty"));
//! ```
//!
//! # Equality
//!
//! [`equal`] builds an [`EqualityMatcher`] that walks the actual and the
//! expected value side by side. Leaves (numbers, strings, ...) are compared
//! with `PartialEq`. Everything else is taken apart through the [`Compare`]
//! trait, which is implemented for the standard containers and smart
//! pointers.
//!
//! ```rust
//! use assert_matchers::{assert_that, equal};
//! use std::collections::BTreeMap;
//!
//! let mut scores = BTreeMap::new();
//! scores.insert("ada", vec![9, 10]);
//! scores.insert("bob", vec![7]);
//!
//! assert_that!(scores.clone(), equal(scores));
//! ```
//!
//! ## Deriving Compare
//!
//! Structs and enums derive [`Compare`](derive@Compare). Two field
//! attributes are recognized:
//!
//! - `#[compare(internal)]` marks a bookkeeping field. The default rules
//!   ignore it; [`Rule::exact`] compares it.
//! - `#[compare(skip)]` removes the field from every comparison.
//!
//! ```rust
//! use assert_matchers::{Compare, Matcher, Rule, equal, equal_with};
//!
//! #[derive(Debug, Compare)]
//! enum Frame {
//!     Ping,
//!     Data {
//!         stream: u32,
//!         payload: Vec<u8>,
//!         #[compare(internal)]
//!         cached_len: usize,
//!     },
//! }
//!
//! let actual = Frame::Data { stream: 1, payload: vec![0xff], cached_len: 1 };
//! let expected = Frame::Data { stream: 1, payload: vec![0xff], cached_len: 0 };
//!
//! assert!(equal(expected).matches(&actual).unwrap());
//!
//! let expected = Frame::Data { stream: 1, payload: vec![0xff], cached_len: 0 };
//! assert!(!equal_with(expected, [Rule::exact()]).matches(&actual).unwrap());
//!
//! assert!(!equal(Frame::Ping).matches(&actual).unwrap());
//! ```
//!
//! ## Comparison Rules
//!
//! [`equal_with`] takes an ordered list of [`Rule`]s. At every position of
//! the walk, the root included, the first rule that applies decides what
//! happens: recurse, ignore the position, or compare it with a custom
//! function. Rules replace the defaults, so an empty list means the
//! defaults and any other list means exactly those rules.
//!
//! ```rust
//! use assert_matchers::{Compare, Rule, assert_that, equal_with};
//!
//! #[derive(Debug, Compare)]
//! struct Sample {
//!     label: String,
//!     mean: f64,
//!     collected_at: u64,
//! }
//!
//! assert_that!(
//!     Sample { label: "latency".into(), mean: 12.0004, collected_at: 1_700_000_000 },
//!     equal_with(
//!         Sample { label: "latency".into(), mean: 12.0, collected_at: 0 },
//!         [
//!             Rule::ignore_path("collected_at"),
//!             Rule::compare_with(|a: &f64, b: &f64| (a - b).abs() < 1e-3),
//!         ],
//!     ),
//! );
//! ```
//!
//! ## Cyclic Values
//!
//! Values linked through `Rc` or `Arc` may refer back to themselves. The
//! comparison remembers which pairs of shared pointees it is currently
//! descending through and stops when it meets one again, so comparing two
//! cyclic structures terminates.
//!
//! ```rust
//! use assert_matchers::{Compare, Matcher, equal};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! #[derive(Debug, Compare)]
//! struct Node {
//!     id: u32,
//!     next: Option<Rc<RefCell<Node>>>,
//! }
//!
//! fn ring(id: u32) -> Rc<RefCell<Node>> {
//!     let node = Rc::new(RefCell::new(Node { id, next: None }));
//!     node.borrow_mut().next = Some(node.clone());
//!     node
//! }
//!
//! let (a, b) = (ring(1), ring(1));
//! assert!(equal(b.clone()).matches(&a).unwrap());
//! # a.borrow_mut().next = None;
//! # b.borrow_mut().next = None;
//! ```
//!
//! # Panics
//!
//! [`panics`], [`panics_with`] and [`panics_matching`] build a
//! [`PanicMatcher`]. The actual value is a callable taking no arguments and
//! returning nothing. It is run once per `matches` call; returning normally
//! is a mismatch.
//!
//! ```rust
//! use assert_matchers::{assert_not, assert_that, panics};
//!
//! assert_that!(|| { let v: Vec<u8> = Vec::new(); v[0]; }, panics());
//! assert_not!(|| {}, panics());
//! ```
//!
//! ## Expectations
//!
//! With [`panics_with`] the payload must equal a literal. `panic!("text")`
//! and `panic!("{}", text)` produce different payload types (`&str` and
//! `String`); a string literal matches either.
//!
//! ```rust
//! use assert_matchers::{assert_that, panics_with};
//!
//! let name = "config.toml";
//! assert_that!(|| panic!("missing {name}"), panics_with("missing config.toml"));
//! assert_that!(|| std::panic::panic_any(404_u16), panics_with(404_u16));
//! ```
//!
//! ## Nested Matchers
//!
//! [`panics_matching`] hands the payload to another matcher. Any matcher
//! implementing `Matcher<Payload>` works, including the equality matcher and
//! the string matchers:
//!
//! ```rust
//! use assert_matchers::{assert_that, contain_substring, equal, panics_matching};
//!
//! assert_that!(
//!     || panic!("connection refused (os error 111)"),
//!     panics_matching(contain_substring("refused")),
//! );
//! assert_that!(
//!     || std::panic::panic_any(vec![1, 2]),
//!     panics_matching(equal(vec![1, 2])),
//! );
//! ```
//!
//! A nested matcher that cannot evaluate the payload (a substring matcher
//! given a non-string payload) makes the panic matcher return
//! [`MatchError::NestedMatcher`] wrapping the nested error.
//!
//! # Error Messages
//!
//! Failure messages follow one layout: the actual value, what was expected
//! of it, and the expectation, each value on its own indented line with a
//! short type label.
//!
//! ```text
//! Expected
//!     <fn()>: my_test::{{closure}}
//! to panic with
//!     <&str>: "queue is empty"
//! but panicked with
//!     <String>: "queue is full"
//! ```
//!
//! Equality failures list every difference with its path:
//!
//! ```text
//! Expected no difference, got:
//!     2 mismatches
//!     value mismatch:
//!       --> `Request.method`
//!       actual: "POST"
//!       expected: "GET"
//!     missing value:
//!       --> `Request.headers[1]`
//!       expected: "accept"
//! ```
//!
//! # Writing a Matcher
//!
//! A matcher implements [`Matcher`] for the actual types it accepts. Its
//! `Debug` rendering is what other matchers print when they embed it.
//!
//! ```rust
//! use assert_matchers::{MatchError, Matcher, Payload, assert_that, panics_matching};
//!
//! #[derive(Debug)]
//! struct Even;
//!
//! impl Matcher<Payload> for Even {
//!     fn matches(&mut self, actual: &Payload) -> Result<bool, MatchError> {
//!         match actual.downcast_ref::<u32>() {
//!             Some(n) => Ok(n % 2 == 0),
//!             None => Err(MatchError::InvalidInput("Even expects a u32 payload.".into())),
//!         }
//!     }
//!
//!     fn failure_message(&self, actual: &Payload) -> String {
//!         format!("Expected\n{}\nto be even", actual.render(1))
//!     }
//!
//!     fn negated_failure_message(&self, actual: &Payload) -> String {
//!         format!("Expected\n{}\nnot to be even", actual.render(1))
//!     }
//! }
//!
//! assert_that!(|| std::panic::panic_any(4_u32), panics_matching(Even));
//! ```

// Lets the derive's `::assert_matchers::` paths resolve inside this crate.
extern crate self as assert_matchers;

pub mod compare;
pub mod format;

mod equal;
mod matcher;
mod panic;
#[cfg(feature = "regex")]
mod regex_cache;
mod string;

/// Derives [`Compare`](trait@Compare) for a struct or enum.
///
/// Every field is compared through its own `Compare` impl, at a path named
/// after the field. Fields marked `#[compare(internal)]` are bookkeeping
/// fields, ignored by the default rules. Fields marked `#[compare(skip)]`
/// are never compared. Two enum values holding different variants are
/// reported as a variant mismatch.
pub use assert_matchers_macros::Compare;

pub use compare::{Compare, Rule};
pub use equal::{EqualityMatcher, equal, equal_with};
pub use matcher::{MatchError, Matcher};
pub use panic::{Expected, LiteralValue, PanicMatcher, Payload, panics, panics_matching, panics_with};
#[cfg(feature = "regex")]
pub use string::{MatchRegex, match_regex};
pub use string::{ContainSubstring, contain_substring};
