//! String matchers, usable on strings directly and on panic payloads.

use crate::format;
use crate::matcher::{MatchError, Matcher};
use crate::panic::Payload;

/// Matches strings containing a substring.
#[derive(Debug, Clone)]
pub struct ContainSubstring {
    substring: String,
}

/// Matches strings (and string panic payloads) containing `substring`.
///
/// ```
/// use assert_matchers::{assert_that, contain_substring};
///
/// assert_that!("connection reset by peer".to_string(), contain_substring("reset"));
/// ```
pub fn contain_substring(substring: impl Into<String>) -> ContainSubstring {
    ContainSubstring {
        substring: substring.into(),
    }
}

impl ContainSubstring {
    fn failure(&self, actual: &str, verb: &str) -> String {
        format::message_with(actual, verb, &format::object(&self.substring, 1))
    }
}

impl Matcher<str> for ContainSubstring {
    fn matches(&mut self, actual: &str) -> Result<bool, MatchError> {
        Ok(actual.contains(&self.substring))
    }

    fn failure_message(&self, actual: &str) -> String {
        self.failure(&format::object(actual, 1), "to contain substring")
    }

    fn negated_failure_message(&self, actual: &str) -> String {
        self.failure(&format::object(actual, 1), "not to contain substring")
    }
}

impl Matcher<String> for ContainSubstring {
    fn matches(&mut self, actual: &String) -> Result<bool, MatchError> {
        <Self as Matcher<str>>::matches(self, actual)
    }

    fn failure_message(&self, actual: &String) -> String {
        self.failure(&format::object(actual, 1), "to contain substring")
    }

    fn negated_failure_message(&self, actual: &String) -> String {
        self.failure(&format::object(actual, 1), "not to contain substring")
    }
}

impl Matcher<Payload> for ContainSubstring {
    fn matches(&mut self, actual: &Payload) -> Result<bool, MatchError> {
        match actual.as_str() {
            Some(text) => <Self as Matcher<str>>::matches(self, text),
            None => Err(MatchError::InvalidInput(format!(
                "ContainSubstring matcher requires a string payload.  Got:\n{}",
                actual.render(1)
            ))),
        }
    }

    fn failure_message(&self, actual: &Payload) -> String {
        self.failure(&actual.render(1), "to contain substring")
    }

    fn negated_failure_message(&self, actual: &Payload) -> String {
        self.failure(&actual.render(1), "not to contain substring")
    }
}

#[cfg(feature = "regex")]
pub use regex_matcher::{MatchRegex, match_regex};

#[cfg(feature = "regex")]
mod regex_matcher {
    use super::*;
    use crate::regex_cache::get_or_compile_regex;

    /// Matches strings against a regular expression.
    #[derive(Debug, Clone)]
    pub struct MatchRegex {
        pattern: String,
    }

    /// Matches strings (and string panic payloads) against the regular
    /// expression `pattern`.
    ///
    /// The pattern is compiled on first use and cached. A pattern that does
    /// not compile makes `matches` return
    /// [`MatchError::InvalidExpectation`].
    ///
    /// ```
    /// use assert_matchers::{assert_that, match_regex, panics_matching};
    ///
    /// assert_that!(
    ///     || panic!("attempt {} of {} failed", 3, 3),
    ///     panics_matching(match_regex(r"^attempt \d+ of \d+ failed$")),
    /// );
    /// ```
    pub fn match_regex(pattern: impl Into<String>) -> MatchRegex {
        MatchRegex {
            pattern: pattern.into(),
        }
    }

    impl MatchRegex {
        fn is_match(&self, actual: &str) -> Result<bool, MatchError> {
            let regex = get_or_compile_regex(&self.pattern).map_err(|err| {
                MatchError::InvalidExpectation(format!(
                    "MatchRegex failed to compile {:?}:\n{}",
                    self.pattern,
                    format::indent_string(&err.to_string(), 1)
                ))
            })?;
            Ok(regex.is_match(actual))
        }

        fn failure(&self, actual: &str, verb: &str) -> String {
            format::message_with(actual, verb, &format::object(&self.pattern, 1))
        }
    }

    impl Matcher<str> for MatchRegex {
        fn matches(&mut self, actual: &str) -> Result<bool, MatchError> {
            self.is_match(actual)
        }

        fn failure_message(&self, actual: &str) -> String {
            self.failure(&format::object(actual, 1), "to match regular expression")
        }

        fn negated_failure_message(&self, actual: &str) -> String {
            self.failure(&format::object(actual, 1), "not to match regular expression")
        }
    }

    impl Matcher<String> for MatchRegex {
        fn matches(&mut self, actual: &String) -> Result<bool, MatchError> {
            self.is_match(actual)
        }

        fn failure_message(&self, actual: &String) -> String {
            self.failure(&format::object(actual, 1), "to match regular expression")
        }

        fn negated_failure_message(&self, actual: &String) -> String {
            self.failure(&format::object(actual, 1), "not to match regular expression")
        }
    }

    impl Matcher<Payload> for MatchRegex {
        fn matches(&mut self, actual: &Payload) -> Result<bool, MatchError> {
            match actual.as_str() {
                Some(text) => self.is_match(text),
                None => Err(MatchError::InvalidInput(format!(
                    "MatchRegex matcher requires a string payload.  Got:\n{}",
                    actual.render(1)
                ))),
            }
        }

        fn failure_message(&self, actual: &Payload) -> String {
            self.failure(&actual.render(1), "to match regular expression")
        }

        fn negated_failure_message(&self, actual: &Payload) -> String {
            self.failure(&actual.render(1), "not to match regular expression")
        }
    }
}
