use crate::format;
use std::fmt;
use thiserror::Error;

/// The capability every matcher provides to an assertion.
///
/// A matcher decides whether an actual value satisfies it and, when it does
/// not (or, for negated assertions, when it unexpectedly does), renders a
/// diagnostic. The `Debug` rendering of a matcher is its description: it is
/// what other matchers print when they embed this one in their own
/// messages.
///
/// `matches` takes `&mut self` because some matchers record what they
/// observed (the panic matcher keeps the captured payload) so the message
/// producers can report it afterwards.
///
/// # Examples
///
/// ```
/// use assert_matchers::{Matcher, equal};
///
/// let mut matcher = equal(vec![1, 2, 3]);
/// assert!(matcher.matches(&vec![1, 2, 3]).unwrap());
/// assert!(!matcher.matches(&vec![1, 2]).unwrap());
/// ```
pub trait Matcher<A: ?Sized>: fmt::Debug {
    /// Returns `Ok(true)` if `actual` satisfies the matcher.
    ///
    /// A mismatch is `Ok(false)`, never an error. Errors are reserved for
    /// actual values the matcher cannot work with at all, and for broken
    /// matcher configuration.
    fn matches(&mut self, actual: &A) -> Result<bool, MatchError>;

    /// Message explaining why `actual` did not match.
    fn failure_message(&self, actual: &A) -> String;

    /// Message explaining why `actual` matched when it should not have.
    fn negated_failure_message(&self, actual: &A) -> String;
}

/// Errors surfaced by [`Matcher::matches`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MatchError {
    /// The actual value is not something the matcher can evaluate.
    #[error("{0}")]
    InvalidInput(String),

    /// A nested matcher returned an error while evaluating a captured value.
    #[error("PanicMatcher's value matcher failed with:\n{}", format::indent_string(&.source.to_string(), 1))]
    NestedMatcher {
        #[source]
        source: Box<MatchError>,
    },

    /// The matcher's own expectation is unusable, e.g. a regex that does not
    /// compile.
    #[error("{0}")]
    InvalidExpectation(String),
}

impl MatchError {
    pub(crate) fn nested(source: MatchError) -> Self {
        MatchError::NestedMatcher {
            source: Box::new(source),
        }
    }
}

/// Asserts that `actual` satisfies `matcher`.
///
/// Panics with the matcher's failure message on a mismatch, and with the
/// error when the matcher cannot evaluate `actual`.
///
/// ```
/// use assert_matchers::{assert_that, equal, panics_with};
///
/// assert_that!(vec![1, 2], equal(vec![1, 2]));
/// assert_that!(|| std::panic::panic_any(7_u8), panics_with(7_u8));
/// ```
#[macro_export]
macro_rules! assert_that {
    ($actual:expr, $matcher:expr $(,)?) => {{
        let __actual = &$actual;
        let mut __matcher = $matcher;
        match $crate::Matcher::matches(&mut __matcher, __actual) {
            ::core::result::Result::Ok(true) => {}
            ::core::result::Result::Ok(false) => {
                ::core::panic!(
                    "{}",
                    $crate::Matcher::failure_message(&__matcher, __actual)
                )
            }
            ::core::result::Result::Err(err) => ::core::panic!("{}", err),
        }
    }};
}

/// Asserts that `actual` does not satisfy `matcher`.
///
/// Panics with the matcher's negated failure message when it matches, and
/// with the error when the matcher cannot evaluate `actual`.
///
/// ```
/// use assert_matchers::{assert_not, equal, panics};
///
/// assert_not!("left".to_string(), equal("right".to_string()));
/// assert_not!(|| {}, panics());
/// ```
#[macro_export]
macro_rules! assert_not {
    ($actual:expr, $matcher:expr $(,)?) => {{
        let __actual = &$actual;
        let mut __matcher = $matcher;
        match $crate::Matcher::matches(&mut __matcher, __actual) {
            ::core::result::Result::Ok(false) => {}
            ::core::result::Result::Ok(true) => {
                ::core::panic!(
                    "{}",
                    $crate::Matcher::negated_failure_message(&__matcher, __actual)
                )
            }
            ::core::result::Result::Err(err) => ::core::panic!("{}", err),
        }
    }};
}
