//! Structural comparison under an ordered list of rules.
//!
//! A comparison walks the actual and the expected value side by side. At
//! every position (the root, each field, element, map entry) the first
//! [`Rule`] that applies decides whether to recurse into the position, skip
//! it, or hand the pair to a custom equality function. Leaves are compared
//! with `PartialEq`, exactly. Whatever differs ends up in a [`Report`].
//!
//! Traversal is driven by the [`Compare`] trait. It is implemented for the
//! standard library types a test value is usually made of and can be derived
//! for user types with `#[derive(Compare)]`.
//!
//! Shared pointers (`Rc`, `Arc` and their `Weak` counterparts) make
//! self-referential values possible. While descending through a shared
//! pointer the pair of pointee addresses is remembered; meeting the same
//! pair again on the way down ends that branch and counts it as equal.

mod impls;
mod path;
mod report;
mod rule;

pub use path::{Path, Step};
pub use report::{Difference, DifferenceKind, Report};
pub use rule::{Action, Equivalence, Filter, Rule};

use rule::Position;
use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::fmt;

/// Types that can be compared structurally.
///
/// Implementations describe the shape of a value by handing each of its
/// parts to the [`Comparison`]: `field` for struct fields, `element` for
/// sequence items, `entry` for map entries, `leaf` for values compared with
/// `PartialEq`. They never decide equality of their parts themselves, so the
/// comparison's rules get to act at every level.
///
/// Usually derived:
///
/// ```
/// use assert_matchers::Compare;
///
/// #[derive(Debug, Compare)]
/// struct Envelope {
///     id: u64,
///     body: Vec<String>,
///     #[compare(internal)]
///     encoded_len: usize,
/// }
/// ```
///
/// `Compare` requires `Debug` (differences are reported with it) and
/// `'static` (rules select positions by type).
pub trait Compare: fmt::Debug + 'static {
    /// Compares `self` (the actual value) against `other` (the expected
    /// value), recording differences in `cmp`.
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>);
}

/// A struct field as seen by the comparison.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    name: &'static str,
    internal: bool,
}

impl Field {
    pub const fn new(name: &'static str) -> Self {
        Field {
            name,
            internal: false,
        }
    }

    /// A bookkeeping field, selected by [`Filter::Internal`].
    pub const fn internal(name: &'static str) -> Self {
        Field {
            name,
            internal: true,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn is_internal(&self) -> bool {
        self.internal
    }
}

/// State of one comparison: the rules, where the walk currently is, which
/// shared pointers are being descended through, and what differed so far.
pub struct Comparison<'a> {
    rules: &'a [Rule],
    path: Path,
    in_progress: HashSet<(usize, usize)>,
    report: Report,
}

/// Returns `true` if `actual` and `expected` have no differences under
/// `rules`. An empty rule list means [`Rule::defaults`].
pub fn equal<T: Compare>(actual: &T, expected: &T, rules: &[Rule]) -> bool {
    diff(actual, expected, rules).is_empty()
}

/// Compares `actual` against `expected` under `rules` and returns every
/// difference found. An empty rule list means [`Rule::defaults`].
pub fn diff<T: Compare>(actual: &T, expected: &T, rules: &[Rule]) -> Report {
    let defaults;
    let rules = if rules.is_empty() {
        defaults = Rule::defaults();
        &defaults[..]
    } else {
        rules
    };

    let mut cmp = Comparison::new(
        rules,
        crate::format::short_type_name(std::any::type_name::<T>()),
    );
    cmp.visit(None, false, actual, expected);
    cmp.report
}

impl<'a> Comparison<'a> {
    fn new(rules: &'a [Rule], root: String) -> Self {
        Comparison {
            rules,
            path: Path::new(root),
            in_progress: HashSet::new(),
            report: Report::default(),
        }
    }

    /// The position currently being compared.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compares a struct field.
    pub fn field<T: Compare>(&mut self, field: Field, actual: &T, expected: &T) {
        self.visit(Some(Step::Field(field.name)), field.internal, actual, expected);
    }

    /// Compares the element at `index` of a sequence.
    pub fn element<T: Compare>(&mut self, index: usize, actual: &T, expected: &T) {
        self.visit(Some(Step::Index(index)), false, actual, expected);
    }

    /// Compares the values stored under `key` in a map.
    pub fn entry<K: fmt::Debug + ?Sized, T: Compare>(&mut self, key: &K, actual: &T, expected: &T) {
        self.visit(Some(Step::Key(format!("{key:?}"))), false, actual, expected);
    }

    /// Compares the contents of a transparent wrapper (`Box`, `Some`, `Ok`)
    /// at the wrapper's own path.
    pub fn unwrap<T: Compare>(&mut self, actual: &T, expected: &T) {
        self.visit(None, false, actual, expected);
    }

    /// Compares the pointees of two shared pointers.
    ///
    /// The pair of addresses is tracked while the pointees are compared; if
    /// the same pair shows up again below, the structure is cyclic and that
    /// branch is considered equal.
    pub fn shared<T: Compare>(&mut self, actual: &T, expected: &T) {
        let key = (
            actual as *const T as *const () as usize,
            expected as *const T as *const () as usize,
        );
        if !self.in_progress.insert(key) {
            log::trace!("cycle at `{}`, treating as equal", self.path);
            return;
        }

        self.visit(None, false, actual, expected);
        self.in_progress.remove(&key);
    }

    /// Compares two values with `PartialEq`.
    pub fn leaf<T: PartialEq + fmt::Debug + ?Sized>(&mut self, actual: &T, expected: &T) {
        if actual != expected {
            self.record(
                DifferenceKind::Value,
                Some(format!("{actual:?}")),
                Some(format!("{expected:?}")),
            );
        }
    }

    /// Records that two enum values hold different variants.
    pub fn variant_mismatch<T: fmt::Debug + ?Sized>(&mut self, actual: &T, expected: &T) {
        self.record(
            DifferenceKind::Variant,
            Some(format!("{actual:?}")),
            Some(format!("{expected:?}")),
        );
    }

    /// Records a part only the expected value has.
    pub fn missing<T: fmt::Debug + ?Sized>(&mut self, step: Step, expected: &T) {
        self.path.push(step);
        self.record(DifferenceKind::Missing, None, Some(format!("{expected:?}")));
        self.path.pop();
    }

    /// Records a part only the actual value has.
    pub fn unexpected<T: fmt::Debug + ?Sized>(&mut self, step: Step, actual: &T) {
        self.path.push(step);
        self.record(DifferenceKind::Unexpected, Some(format!("{actual:?}")), None);
        self.path.pop();
    }

    /// Compares two sequences element by element, then reports surplus
    /// elements on either side.
    pub fn sequence<'s, T, A, E>(&mut self, actual: A, expected: E)
    where
        T: Compare,
        A: IntoIterator<Item = &'s T>,
        E: IntoIterator<Item = &'s T>,
    {
        let mut actual = actual.into_iter();
        let mut expected = expected.into_iter();
        let mut index = 0;

        loop {
            match (actual.next(), expected.next()) {
                (Some(a), Some(e)) => self.element(index, a, e),
                (Some(a), None) => self.unexpected(Step::Index(index), a),
                (None, Some(e)) => self.missing(Step::Index(index), e),
                (None, None) => break,
            }
            index += 1;
        }
    }

    fn visit<T: Compare>(&mut self, step: Option<Step>, internal: bool, actual: &T, expected: &T) {
        let pushed = step.is_some();
        if let Some(step) = step {
            self.path.push(step);
        }

        self.apply(internal, actual, expected);

        if pushed {
            self.path.pop();
        }
    }

    /// Finds the first applicable rule for the current position and acts on
    /// it.
    fn apply<T: Compare>(&mut self, internal: bool, actual: &T, expected: &T) {
        let rules = self.rules;
        let position = Position {
            path: &self.path,
            type_id: TypeId::of::<T>(),
            internal,
        };

        match rules.iter().find(|rule| rule.applies(&position)).map(Rule::action) {
            None | Some(Action::Recurse) => actual.compare(expected, self),
            Some(Action::Ignore) => {
                log::trace!("ignoring `{}`", self.path);
            }
            Some(Action::Delegate(eq)) => {
                let erased_actual: &dyn Any = actual;
                let erased_expected: &dyn Any = expected;
                if !eq.equal(erased_actual, erased_expected) {
                    log::trace!("{eq:?} rejected `{}`", self.path);
                    self.record(
                        DifferenceKind::Custom,
                        Some(format!("{actual:?}")),
                        Some(format!("{expected:?}")),
                    );
                }
            }
        }
    }

    fn record(&mut self, kind: DifferenceKind, actual: Option<String>, expected: Option<String>) {
        self.report.push(Difference {
            path: self.path.to_string(),
            kind,
            actual,
            expected,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_rules_apply() {
        assert!(!equal(&1_u8, &2_u8, &[]));
        assert!(equal(&1_u8, &2_u8, &[Rule::ignore_type::<u8>()]));
        assert!(equal(&1_u8, &2_u8, &[Rule::compare_with(|_: &u8, _: &u8| true)]));
    }

    #[derive(Debug)]
    struct Frame {
        seq: u32,
        cached_len: usize,
    }

    impl Compare for Frame {
        fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
            cmp.field(Field::new("seq"), &self.seq, &other.seq);
            cmp.field(Field::internal("cached_len"), &self.cached_len, &other.cached_len);
        }
    }

    #[test]
    fn empty_rules_mean_defaults() {
        let actual = Frame { seq: 1, cached_len: 4 };
        let expected = Frame { seq: 1, cached_len: 0 };

        assert!(equal(&actual, &expected, &[]));
        assert!(equal(&actual, &expected, &Rule::defaults()));
        assert!(!equal(&actual, &expected, &[Rule::exact()]));
    }

    #[test]
    fn first_applicable_rule_wins() {
        let rules = [Rule::exact(), Rule::ignore_type::<u8>()];
        assert!(!equal(&1_u8, &2_u8, &rules));

        let rules = [Rule::ignore_type::<u8>(), Rule::exact()];
        assert!(equal(&1_u8, &2_u8, &rules));
    }

    #[test]
    fn sequence_reports_surplus_and_missing() {
        let report = diff(&vec![1, 2, 3], &vec![1, 5], &[]);
        let differences = report.differences();

        assert_eq!(differences.len(), 2);
        assert_eq!(differences[0].path, "Vec<i32>[1]");
        assert_eq!(differences[0].kind, DifferenceKind::Value);
        assert_eq!(differences[1].path, "Vec<i32>[2]");
        assert_eq!(differences[1].kind, DifferenceKind::Unexpected);
        assert_eq!(differences[1].actual.as_deref(), Some("3"));

        let report = diff(&vec![1], &vec![1, 2], &[]);
        assert_eq!(report.differences()[0].kind, DifferenceKind::Missing);
        assert_eq!(report.differences()[0].expected.as_deref(), Some("2"));
    }

    #[test]
    fn custom_rejection_is_reported() {
        let rules = [Rule::compare_with(|a: &i32, b: &i32| a.abs() == b.abs())];

        assert!(equal(&-3, &3, &rules));
        let report = diff(&-3, &4, &rules);
        assert_eq!(report.differences()[0].kind, DifferenceKind::Custom);
    }
}
