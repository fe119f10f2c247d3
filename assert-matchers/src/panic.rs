//! Matching on panics raised by a callable.
//!
//! The matcher runs the callable once, on the calling thread, inside
//! [`std::panic::catch_unwind`]. A normal return is a mismatch. A panic is
//! captured and its payload checked against the expectation:
//!
//! | Expectation            | Built with              | Matches when                      |
//! |------------------------|-------------------------|-----------------------------------|
//! | [`Expected::Any`]      | [`panics()`]            | any panic occurs                  |
//! | [`Expected::Literal`]  | [`panics_with()`]       | the payload equals the literal    |
//! | [`Expected::Matching`] | [`panics_matching()`]   | the nested matcher accepts it     |
//!
//! The default panic hook is left installed, so the panic message still
//! shows up on stderr like any other panic caught in a test.
//!
//! A callable that never returns blocks `matches` forever; there is no
//! timeout.

use crate::format;
use crate::matcher::{MatchError, Matcher};
use std::any::{Any, type_name};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Matches callables that panic.
///
/// The callable must take no arguments and return nothing. Anything else is
/// rejected when the assertion is compiled:
///
/// ```compile_fail
/// use assert_matchers::{Matcher, panics};
///
/// let mut matcher = panics();
/// let _ = matcher.matches(&|value: u32| assert!(value > 0));
/// ```
///
/// ```compile_fail
/// use assert_matchers::{Matcher, panics};
///
/// let mut matcher = panics();
/// let _ = matcher.matches(&|| 42);
/// ```
///
/// An optional callable is accepted too; `None` is reported as invalid
/// input instead of a mismatch.
///
/// One matcher is meant for one assertion. Calling `matches` again runs the
/// new callable and replaces whatever was captured before.
#[derive(Debug)]
pub struct PanicMatcher {
    expected: Expected,
    outcome: Outcome,
}

/// What a [`PanicMatcher`] expects the panic payload to be.
#[derive(Debug)]
pub enum Expected {
    /// Any panic will do.
    Any,
    /// The payload must equal this value.
    Literal(Box<dyn LiteralValue>),
    /// The payload must satisfy this matcher.
    Matching(Box<dyn Matcher<Payload>>),
}

/// What happened the last time the matcher ran a callable.
#[derive(Debug, Default)]
enum Outcome {
    #[default]
    NotInvoked,
    Returned,
    Panicked(Payload),
}

/// A literal panic value, compared with the payload by `PartialEq`.
///
/// Implemented for every `PartialEq + Debug + Send + 'static` type. The
/// payload is downcast to the literal's type before comparing; string literals
/// (`&'static str` and `String`) also match payloads of the other string
/// type, since `panic!("boom")` and `panic!("{}", name)` produce different
/// payload types for the same text.
///
/// Literals must be `Send`, like every value a panic can carry.
pub trait LiteralValue: fmt::Debug + Send {
    fn matches_payload(&self, payload: &Payload) -> bool;

    fn type_name(&self) -> &'static str;

    /// Renders `payload` as `<Type>: value` if it holds a value of the
    /// literal's type.
    fn render_payload(&self, payload: &Payload, indentation: usize) -> Option<String>;
}

impl<T: PartialEq + fmt::Debug + Send + 'static> LiteralValue for T {
    fn matches_payload(&self, payload: &Payload) -> bool {
        let erased: &dyn Any = self;
        if let Some(text) = erased
            .downcast_ref::<&'static str>()
            .copied()
            .or_else(|| erased.downcast_ref::<String>().map(String::as_str))
        {
            return payload.as_str() == Some(text);
        }

        payload.downcast_ref::<T>() == Some(self)
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn render_payload(&self, payload: &Payload, indentation: usize) -> Option<String> {
        payload
            .downcast_ref::<T>()
            .map(|value| format::object(value, indentation))
    }
}

/// The value a panic was raised with.
///
/// `panic!` with a literal message produces a `&'static str`, a formatted
/// message a `String`, and `std::panic::panic_any` whatever it was given.
pub struct Payload {
    inner: Box<dyn Any + Send>,
}

impl Payload {
    pub fn new(inner: Box<dyn Any + Send>) -> Self {
        Payload { inner }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// The panic message, if the payload is a string.
    pub fn as_str(&self) -> Option<&str> {
        self.downcast_ref::<&'static str>()
            .copied()
            .or_else(|| self.downcast_ref::<String>().map(String::as_str))
    }

    pub fn into_inner(self) -> Box<dyn Any + Send> {
        self.inner
    }

    /// Type label and `Debug` rendering, for the payload types panics
    /// commonly carry.
    fn inspect(&self) -> Option<(&'static str, String)> {
        macro_rules! try_downcast {
            ($($ty:ty),* $(,)?) => {
                $(
                    if let Some(value) = self.downcast_ref::<$ty>() {
                        return Some((type_name::<$ty>(), format!("{value:?}")));
                    }
                )*
            };
        }

        try_downcast!(
            &str, String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128,
            usize, f32, f64,
        );
        None
    }

    /// Renders the payload as `<Type>: value`, indented by `indentation`
    /// levels.
    pub fn render(&self, indentation: usize) -> String {
        match self.inspect() {
            Some((label, value)) => format::labelled(label, &value, indentation),
            None => format::labelled("Any", "opaque panic payload", indentation),
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inspect() {
            Some((_, value)) => f.write_str(&value),
            None => f.write_str("<opaque panic payload>"),
        }
    }
}

/// Matches callables that panic with any payload.
///
/// ```
/// use assert_matchers::{assert_that, panics};
///
/// assert_that!(|| panic!("boom"), panics());
/// ```
pub fn panics() -> PanicMatcher {
    PanicMatcher::new(Expected::Any)
}

/// Matches callables that panic with a payload equal to `value`.
///
/// ```
/// use assert_matchers::{assert_that, panics_with};
///
/// assert_that!(|| std::panic::panic_any(42), panics_with(42));
/// assert_that!(|| panic!("{} went wrong", "it"), panics_with("it went wrong"));
/// ```
///
/// The literal has to be `Send`, since no panic payload can be anything
/// else:
///
/// ```compile_fail
/// use assert_matchers::panics_with;
///
/// let _ = panics_with(std::rc::Rc::new(1));
/// ```
pub fn panics_with<T: PartialEq + fmt::Debug + Send + 'static>(value: T) -> PanicMatcher {
    PanicMatcher::new(Expected::Literal(Box::new(value)))
}

/// Matches callables that panic with a payload accepted by `matcher`.
///
/// ```
/// use assert_matchers::{assert_that, contain_substring, panics_matching};
///
/// assert_that!(
///     || panic!("index out of bounds: the len is 3"),
///     panics_matching(contain_substring("out of bounds")),
/// );
/// ```
pub fn panics_matching<M: Matcher<Payload> + 'static>(matcher: M) -> PanicMatcher {
    PanicMatcher::new(Expected::Matching(Box::new(matcher)))
}

impl PanicMatcher {
    pub fn new(expected: Expected) -> Self {
        PanicMatcher {
            expected,
            outcome: Outcome::NotInvoked,
        }
    }

    pub fn expected(&self) -> &Expected {
        &self.expected
    }

    /// The payload captured by the last `matches` call, if the callable
    /// panicked.
    pub fn captured(&self) -> Option<&Payload> {
        match &self.outcome {
            Outcome::Panicked(payload) => Some(payload),
            Outcome::NotInvoked | Outcome::Returned => None,
        }
    }

    fn invoke<F: Fn()>(&mut self, actual: &F) -> Result<bool, MatchError> {
        self.outcome = Outcome::NotInvoked;

        let payload = match panic::catch_unwind(AssertUnwindSafe(actual)) {
            Ok(()) => {
                log::debug!("callable returned without panicking");
                self.outcome = Outcome::Returned;
                return Ok(false);
            }
            Err(payload) => Payload::new(payload),
        };
        log::debug!("captured panic payload: {payload:?}");

        let result = self.expected.resolve(&payload);
        self.outcome = Outcome::Panicked(payload);
        log::trace!("panic expectation resolved to {result:?}");

        result
    }

    fn failure(&self, actual: &str) -> String {
        match (&self.expected, self.captured()) {
            // Any panic would have matched, so none happened.
            (Expected::Any, _) => format::message(actual, "to panic"),
            (Expected::Literal(value), None) => {
                format::message_with(actual, "to panic with", &render_literal(&**value, 1))
            }
            (Expected::Matching(matcher), None) => format::message_with(
                actual,
                "to panic with a value matching",
                &render_matcher(&**matcher, 1),
            ),
            (Expected::Literal(value), Some(captured)) => format::message(
                actual,
                &format!(
                    "to panic with\n{}\nbut panicked with\n{}",
                    render_literal(&**value, 1),
                    value
                        .render_payload(captured, 1)
                        .unwrap_or_else(|| captured.render(1)),
                ),
            ),
            (Expected::Matching(matcher), Some(captured)) => format::message(
                actual,
                &format!(
                    "to panic with a value matching\n{}\nbut panicked with\n{}",
                    render_matcher(&**matcher, 1),
                    captured.render(1),
                ),
            ),
        }
    }

    fn negated_failure(&self, actual: &str) -> String {
        let captured = match self.captured() {
            Some(payload) => payload.render(1),
            None => format::labelled("none", "no panic captured", 1),
        };

        match &self.expected {
            Expected::Any => format::message(
                actual,
                &format!("not to panic, but panicked with\n{captured}"),
            ),
            Expected::Matching(matcher) => format::message(
                actual,
                &format!(
                    "not to panic with a value matching\n{}\nbut panicked with\n{captured}",
                    render_matcher(&**matcher, 1),
                ),
            ),
            Expected::Literal(value) => {
                format::message_with(actual, "not to panic with", &render_literal(&**value, 1))
            }
        }
    }
}

impl Expected {
    /// Decides whether a captured payload satisfies the expectation.
    fn resolve(&mut self, payload: &Payload) -> Result<bool, MatchError> {
        match self {
            Expected::Any => Ok(true),
            Expected::Literal(value) => Ok(value.matches_payload(payload)),
            Expected::Matching(matcher) => matcher.matches(payload).map_err(MatchError::nested),
        }
    }
}

fn render_matcher(matcher: &dyn Matcher<Payload>, indentation: usize) -> String {
    format::labelled("matcher", &format!("{matcher:?}"), indentation)
}

fn render_literal(value: &dyn LiteralValue, indentation: usize) -> String {
    format::labelled(
        &format::short_type_name(value.type_name()),
        &format!("{value:?}"),
        indentation,
    )
}

impl<F: Fn()> Matcher<F> for PanicMatcher {
    fn matches(&mut self, actual: &F) -> Result<bool, MatchError> {
        self.invoke(actual)
    }

    fn failure_message(&self, _actual: &F) -> String {
        self.failure(&format::callable::<F>(1))
    }

    fn negated_failure_message(&self, _actual: &F) -> String {
        self.negated_failure(&format::callable::<F>(1))
    }
}

impl<F: Fn()> Matcher<Option<F>> for PanicMatcher {
    fn matches(&mut self, actual: &Option<F>) -> Result<bool, MatchError> {
        match actual {
            Some(actual) => self.invoke(actual),
            None => {
                self.outcome = Outcome::NotInvoked;
                Err(MatchError::InvalidInput(
                    "PanicMatcher expects a non-nil actual.".to_string(),
                ))
            }
        }
    }

    fn failure_message(&self, actual: &Option<F>) -> String {
        match actual {
            Some(_) => self.failure(&format::callable::<F>(1)),
            None => self.failure(&format::labelled("fn()", "None", 1)),
        }
    }

    fn negated_failure_message(&self, actual: &Option<F>) -> String {
        match actual {
            Some(_) => self.negated_failure(&format::callable::<F>(1)),
            None => self.negated_failure(&format::labelled("fn()", "None", 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: impl Any + Send) -> Payload {
        Payload::new(Box::new(value))
    }

    #[test]
    fn payload_strings() {
        assert_eq!(payload("boom").as_str(), Some("boom"));
        assert_eq!(payload("boom".to_string()).as_str(), Some("boom"));
        assert_eq!(payload(42).as_str(), None);
    }

    #[test]
    fn payload_rendering() {
        assert_eq!(payload("boom").render(1), "    <&str>: \"boom\"");
        assert_eq!(payload(42_u8).render(0), "<u8>: 42");
        assert_eq!(format!("{:?}", payload(7_i64)), "7");

        struct Custom;
        assert_eq!(payload(Custom).render(0), "<Any>: opaque panic payload");
        assert_eq!(format!("{:?}", payload(Custom)), "<opaque panic payload>");
    }

    #[test]
    fn literal_strings_match_either_payload_string_type() {
        assert!("boom".matches_payload(&payload("boom".to_string())));
        assert!("boom".to_string().matches_payload(&payload("boom")));
        assert!(!"boom".matches_payload(&payload("bang")));
        assert!(!"42".matches_payload(&payload(42_i32)));
    }

    #[test]
    fn literal_values_need_the_same_type() {
        assert!(42_i32.matches_payload(&payload(42_i32)));
        assert!(!42_i32.matches_payload(&payload(42_i64)));
        assert!(!42_i32.matches_payload(&payload(43_i32)));
    }

    #[test]
    fn literal_renders_payloads_of_its_own_type() {
        #[derive(Debug, PartialEq)]
        struct Code(u16);

        assert_eq!(
            Code(1).render_payload(&payload(Code(2)), 0).as_deref(),
            Some("<Code>: Code(2)")
        );
        assert_eq!(Code(1).render_payload(&payload(2_u16), 0), None);
    }

    #[test]
    fn outcome_is_reset_between_calls() {
        let mut matcher = panics();

        assert!(matcher.matches(&|| std::panic::panic_any(1_u8)).unwrap());
        assert_eq!(matcher.captured().and_then(|p| p.downcast_ref::<u8>()), Some(&1));

        assert!(!matcher.matches(&|| {}).unwrap());
        assert!(matcher.captured().is_none());
    }
}
