use assert_matchers::compare::{self, DifferenceKind};
use assert_matchers::{Compare, Matcher, Rule, assert_not, assert_that, equal, equal_with};
use std::collections::{BTreeMap, HashMap, HashSet};

mod util;

#[derive(Debug, Clone, Compare)]
struct Header {
    id: u64,
    tags: Vec<String>,
}

#[derive(Debug, Clone, Compare)]
struct Message {
    header: Header,
    body: String,
    #[compare(internal)]
    size_cache: u32,
    #[compare(internal)]
    unknown_fields: Vec<u8>,
}

fn message() -> Message {
    Message {
        header: Header {
            id: 7,
            tags: vec!["a".to_string(), "b".to_string()],
        },
        body: "hello".to_string(),
        size_cache: 0,
        unknown_fields: Vec::new(),
    }
}

#[derive(Debug, Clone, Compare)]
enum Event {
    Started,
    Progress(u8),
    Finished {
        code: i32,
        #[compare(skip)]
        elapsed: std::time::Instant,
    },
}

#[derive(Debug, Compare)]
struct Pair<T> {
    left: T,
    right: T,
}

#[test]
fn every_value_equals_itself() {
    assert_that!(message(), equal(message()));
    assert_that!(message(), equal_with(message(), [Rule::exact()]));
    assert_that!(Event::Progress(3), equal(Event::Progress(3)));
    assert_that!((1, "x", 2.5), equal((1, "x", 2.5)));
    assert_that!(Some(vec![Some(1), None]), equal(Some(vec![Some(1), None])));
}

#[test]
fn default_rules_ignore_internal_fields() {
    let mut actual = message();
    actual.size_cache = 42;
    actual.unknown_fields = vec![1, 2, 3];

    assert_that!(actual.clone(), equal(message()));
    assert_not!(actual, equal_with(message(), [Rule::exact()]));
}

#[test]
fn exact_rule_reports_internal_fields() {
    let mut actual = message();
    actual.size_cache = 42;

    let report = compare::diff(&actual, &message(), &[Rule::exact()]);
    assert_eq!(report.len(), 1);
    assert_eq!(report.differences()[0].path, "Message.size_cache");
    assert_eq!(report.differences()[0].actual.as_deref(), Some("42"));
    assert_eq!(report.differences()[0].expected.as_deref(), Some("0"));
}

#[test]
fn explicit_rules_replace_the_defaults() {
    let mut actual = message();
    actual.size_cache = 42;
    actual.header.id = 8;

    // Ignoring the header drops the default rule, so size_cache is compared.
    let mut matcher = equal_with(message(), [Rule::ignore_path("header")]);
    assert!(!matcher.matches(&actual).unwrap());

    let mut matcher = equal_with(
        message(),
        [Rule::ignore_path("header"), Rule::ignore_internal()],
    );
    assert!(matcher.matches(&actual).unwrap());
}

#[test]
fn first_matching_rule_wins() {
    let mut actual = message();
    actual.body = "bye".to_string();

    let rules = [Rule::ignore_path("body"), Rule::exact()];
    assert!(compare::equal(&actual, &message(), &rules));

    let rules = [Rule::exact(), Rule::ignore_path("body")];
    assert!(!compare::equal(&actual, &message(), &rules));
}

#[test]
fn paths_select_nested_positions() {
    let mut actual = message();
    actual.header.tags[1] = "z".to_string();

    assert!(compare::equal(
        &actual,
        &message(),
        &[Rule::ignore_path("header.tags[1]")]
    ));
    assert!(!compare::equal(
        &actual,
        &message(),
        &[Rule::ignore_path("header.tags[0]")]
    ));
}

#[test]
fn field_rules_apply_at_any_depth() {
    let mut actual = message();
    actual.header.id = 99;

    assert!(compare::equal(&actual, &message(), &[Rule::ignore_field("id")]));
}

#[test]
fn delegated_comparison_only_applies_to_its_type() {
    let actual = Pair {
        left: 1.0004_f64,
        right: 2.0,
    };
    let expected = Pair {
        left: 1.0_f64,
        right: 2.0,
    };
    let close = |a: &f64, b: &f64| (a - b).abs() < 1e-3;

    assert_that!(actual, equal_with(expected, [Rule::compare_with(close)]));

    // An equivalence for another type never applies; the leaves are compared
    // exactly.
    let actual = Pair { left: 1.0004_f64, right: 2.0 };
    let expected = Pair { left: 1.0_f64, right: 2.0 };
    assert!(!compare::equal(
        &actual,
        &expected,
        &[Rule::compare_path_with("left", |_: &f32, _: &f32| true)]
    ));
    assert!(compare::equal(
        &actual,
        &expected,
        &[Rule::compare_path_with("left", |_: &f64, _: &f64| true)]
    ));
}

#[test]
fn rejected_delegation_is_a_custom_mismatch() {
    let actual = Pair { left: 1.5_f64, right: 2.0 };
    let expected = Pair { left: 1.0_f64, right: 2.0 };

    let report = compare::diff(
        &actual,
        &expected,
        &[Rule::compare_with(|a: &f64, b: &f64| (a - b).abs() < 1e-3)],
    );
    assert_eq!(report.len(), 1);
    assert_eq!(report.differences()[0].kind, DifferenceKind::Custom);
    assert_eq!(report.differences()[0].path, "Pair<f64>.left");
}

#[test]
fn enums_compare_variants_then_fields() {
    let started = std::time::Instant::now();

    assert_not!(Event::Started, equal(Event::Progress(1)));
    assert_not!(Event::Progress(2), equal(Event::Progress(1)));
    assert_that!(
        Event::Finished { code: 0, elapsed: started },
        equal(Event::Finished {
            code: 0,
            elapsed: std::time::Instant::now(),
        })
    );

    let report = compare::diff(&Event::Started, &Event::Progress(1), &[]);
    assert_eq!(report.differences()[0].kind, DifferenceKind::Variant);
    assert_eq!(report.differences()[0].actual.as_deref(), Some("Started"));
    assert_eq!(report.differences()[0].expected.as_deref(), Some("Progress(1)"));

    let report = compare::diff(&Event::Progress(2), &Event::Progress(1), &[]);
    assert_eq!(report.differences()[0].path, "Event.0");
}

#[test]
fn collections() {
    let mut actual = HashMap::new();
    actual.insert("a".to_string(), 1);
    actual.insert("b".to_string(), 2);

    let mut expected = actual.clone();
    assert_that!(actual.clone(), equal(expected.clone()));

    expected.insert("b".to_string(), 3);
    expected.insert("c".to_string(), 4);
    let report = compare::diff(&actual, &expected, &[]);
    let kinds: Vec<_> = report.differences().iter().map(|d| d.kind).collect();
    assert_eq!(kinds, [DifferenceKind::Value, DifferenceKind::Missing]);

    let actual: BTreeMap<_, _> = [(1, "x")].into_iter().collect();
    let expected: BTreeMap<_, _> = [(1, "x"), (2, "y")].into_iter().collect();
    assert_not!(actual, equal(expected));

    let actual: HashSet<_> = [1, 2, 3].into_iter().collect();
    let expected: HashSet<_> = [3, 2, 1].into_iter().collect();
    assert_that!(actual, equal(expected));
}

#[test]
fn failure_message_lists_every_difference() {
    let mut actual = message();
    actual.header.id = 8;
    actual.header.tags.push("c".to_string());
    actual.body = "bye".to_string();

    let output = util::capture_panic_message(|| {
        assert_that!(actual, equal(message()));
    });

    insta::assert_snapshot!(output, @r#"
    Expected no difference, got:
        3 mismatches

        value mismatch:
          --> `Message.header.id`
          actual: 8
          expected: 7

        unexpected value:
          --> `Message.header.tags[2]`
          actual: "c"

        value mismatch:
          --> `Message.body`
          actual: "bye"
          expected: "hello"
    "#);
}

#[test]
fn negated_failure_message_shows_both_values() {
    let output = util::capture_panic_message(|| {
        assert_not!(vec![1, 2], equal(vec![1, 2]));
    });

    insta::assert_snapshot!(output, @r"
    Expected
        <Vec<i32>>: [1, 2]
    not to equal
        <Vec<i32>>: [1, 2]
    ");
}
