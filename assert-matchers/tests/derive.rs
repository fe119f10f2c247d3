use assert_matchers::compare;
use assert_matchers::{Compare, Rule};

#[derive(Debug, Compare)]
struct Unit;

#[derive(Debug, Compare)]
struct Wrapper(u32, #[compare(internal)] u32);

#[derive(Debug, Compare)]
struct AllSkipped {
    #[compare(skip)]
    _handle: NotComparable,
}

#[derive(Debug)]
struct NotComparable;

#[derive(Debug, Compare)]
enum Shape<T> {
    Point,
    Circle { radius: T },
    Polygon(Vec<(T, T)>),
}

#[derive(Debug, Compare)]
enum Never {}

#[test]
fn unit_and_skipped_structs_are_always_equal() {
    assert!(compare::equal(&Unit, &Unit, &[]));
    assert!(compare::equal(
        &AllSkipped {
            _handle: NotComparable
        },
        &AllSkipped {
            _handle: NotComparable
        },
        &[Rule::exact()]
    ));
}

#[test]
fn tuple_struct_fields_are_named_by_index() {
    assert!(compare::equal(&Wrapper(1, 2), &Wrapper(1, 3), &[]));
    assert!(!compare::equal(&Wrapper(1, 2), &Wrapper(1, 3), &[Rule::exact()]));

    let report = compare::diff(&Wrapper(1, 2), &Wrapper(1, 3), &[Rule::exact()]);
    assert_eq!(report.differences()[0].path, "Wrapper.1");
}

#[test]
fn generic_enums() {
    assert!(compare::equal(
        &Shape::Circle { radius: 2.0_f32 },
        &Shape::Circle { radius: 2.0_f32 },
        &[]
    ));
    assert!(!compare::equal(
        &Shape::Polygon(vec![(0, 0), (1, 1)]),
        &Shape::Polygon(vec![(0, 0), (1, 2)]),
        &[]
    ));
    assert!(!compare::equal(&Shape::<u8>::Point, &Shape::Circle { radius: 1 }, &[]));

    let report = compare::diff(
        &Shape::Polygon(vec![(0, 0), (1, 1)]),
        &Shape::Polygon(vec![(0, 0), (1, 2)]),
        &[],
    );
    assert_eq!(report.differences()[0].path, "Shape<i32>.0[1].1");
}

#[test]
fn empty_enums_derive() {
    fn assert_compare<T: Compare>() {}
    assert_compare::<Never>();
}

#[test]
fn derived_impls_compile() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/*.rs");
}
