use assert_matchers::{Compare, Rule, assert_not, equal_with};

#[derive(Debug, Compare)]
enum Value {
    Null,
    Number(f64),
    List(Vec<Value>),
    Object {
        fields: Vec<(String, Value)>,
        #[compare(skip)]
        _span: std::ops::Range<usize>,
    },
}

fn main() {
    assert_not!(
        Value::List(vec![Value::Number(1.0), Value::Null]),
        equal_with(
            Value::List(vec![Value::Number(1.0)]),
            [Rule::compare_with(|a: &f64, b: &f64| (a - b).abs() < 1e-9)],
        ),
    );

    let _ = Value::Object {
        fields: Vec::new(),
        _span: 0..0,
    };
}
