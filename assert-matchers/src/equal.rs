use crate::compare::{self, Compare, Rule};
use crate::format;
use crate::matcher::{MatchError, Matcher};
use crate::panic::Payload;

/// Matches values structurally equal to an expected value.
///
/// Built with [`equal`] or [`equal_with`]. The rule list is fixed at
/// construction, so every `matches` call on the same matcher compares the
/// same way.
#[derive(Debug)]
pub struct EqualityMatcher<T> {
    expected: T,
    rules: Vec<Rule>,
}

/// Matches values structurally equal to `expected` under the default rules,
/// which ignore fields marked `#[compare(internal)]`.
///
/// # Examples
///
/// ```
/// use assert_matchers::{Compare, assert_that, equal};
///
/// #[derive(Debug, Compare)]
/// struct Ping {
///     seq: u32,
///     #[compare(internal)]
///     cached_size: usize,
/// }
///
/// assert_that!(
///     Ping { seq: 4, cached_size: 12 },
///     equal(Ping { seq: 4, cached_size: 0 }),
/// );
/// ```
pub fn equal<T: Compare>(expected: T) -> EqualityMatcher<T> {
    equal_with(expected, [])
}

/// Matches values structurally equal to `expected` under `rules`.
///
/// Rules are evaluated in order; the first one that applies at a position
/// wins. An empty list means the defaults ([`Rule::defaults`]). Any rule at
/// all replaces the defaults entirely, so add [`Rule::ignore_internal`]
/// explicitly to keep ignoring internal fields, or pass [`Rule::exact`] for
/// a plain field-by-field comparison.
pub fn equal_with<T: Compare>(
    expected: T,
    rules: impl IntoIterator<Item = Rule>,
) -> EqualityMatcher<T> {
    let mut rules: Vec<Rule> = rules.into_iter().collect();
    if rules.is_empty() {
        rules = Rule::defaults();
    }

    EqualityMatcher { expected, rules }
}

impl<T: Compare> EqualityMatcher<T> {
    pub fn expected(&self) -> &T {
        &self.expected
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn diff_message(&self, actual: &T) -> String {
        let report = compare::diff(actual, &self.expected, &self.rules);
        format!(
            "Expected no difference, got:\n{}",
            format::indent_string(&report.to_string(), 1)
        )
    }
}

impl<T: Compare> Matcher<T> for EqualityMatcher<T> {
    fn matches(&mut self, actual: &T) -> Result<bool, MatchError> {
        let report = compare::diff(actual, &self.expected, &self.rules);
        if !report.is_empty() {
            log::debug!(
                "equality mismatch: {} difference(s) against {}",
                report.len(),
                std::any::type_name::<T>()
            );
        }
        Ok(report.is_empty())
    }

    fn failure_message(&self, actual: &T) -> String {
        self.diff_message(actual)
    }

    fn negated_failure_message(&self, actual: &T) -> String {
        format::message_with(
            &format::object(actual, 1),
            "not to equal",
            &format::object(&self.expected, 1),
        )
    }
}

/// An equality matcher nested in a panic matcher compares the panic payload
/// when it holds a `T`; a payload of any other type does not match.
impl<T: Compare> Matcher<Payload> for EqualityMatcher<T> {
    fn matches(&mut self, actual: &Payload) -> Result<bool, MatchError> {
        match actual.downcast_ref::<T>() {
            Some(value) => <Self as Matcher<T>>::matches(self, value),
            None => Ok(false),
        }
    }

    fn failure_message(&self, actual: &Payload) -> String {
        match actual.downcast_ref::<T>() {
            Some(value) => self.diff_message(value),
            None => format::message_with(
                &actual.render(1),
                "to equal",
                &format::object(&self.expected, 1),
            ),
        }
    }

    fn negated_failure_message(&self, actual: &Payload) -> String {
        format::message_with(
            &actual.render(1),
            "not to equal",
            &format::object(&self.expected, 1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rules_fall_back_to_defaults() {
        let matcher = equal_with(1_u8, []);
        assert_eq!(matcher.rules().len(), 1);
        assert!(matches!(
            matcher.rules()[0].filter(),
            compare::Filter::Internal
        ));

        let matcher = equal_with(1_u8, [Rule::exact()]);
        assert!(matches!(matcher.rules()[0].filter(), compare::Filter::Always));
    }

    #[test]
    fn failure_message_embeds_indented_diff() {
        let matcher = equal(vec![1, 2]);

        assert_eq!(
            matcher.failure_message(&vec![1, 3]),
            "Expected no difference, got:\n    value mismatch:\n      --> `Vec<i32>[1]`\n      actual: 3\n      expected: 2"
        );
    }

    #[test]
    fn negated_failure_message_is_one_summary() {
        let matcher = equal("same".to_string());

        assert_eq!(
            matcher.negated_failure_message(&"same".to_string()),
            "Expected\n    <String>: \"same\"\nnot to equal\n    <String>: \"same\""
        );
    }
}
