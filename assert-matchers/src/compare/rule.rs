use super::Path;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A comparison rule: where it applies, and what to do there.
///
/// Rules are evaluated in order at every compared position, root included.
/// The first rule that applies decides; when none applies, the comparison
/// recurses with the type's own [`Compare`](crate::Compare) impl.
///
/// # Examples
///
/// ```
/// use assert_matchers::{Compare, Matcher, Rule, equal_with};
///
/// #[derive(Debug, Compare)]
/// struct Reading {
///     sensor: String,
///     value: f64,
///     taken_at: u64,
/// }
///
/// let expected = Reading { sensor: "t1".into(), value: 20.0, taken_at: 0 };
/// let actual = Reading { sensor: "t1".into(), value: 20.0001, taken_at: 99 };
///
/// let mut matcher = equal_with(
///     expected,
///     [
///         Rule::ignore_path("taken_at"),
///         Rule::compare_with(|a: &f64, b: &f64| (a - b).abs() < 0.01),
///     ],
/// );
/// assert!(matcher.matches(&actual).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Rule {
    filter: Filter,
    action: Action,
}

/// Selects the positions a [`Rule`] applies to.
#[derive(Debug, Clone)]
pub enum Filter {
    /// Every position.
    Always,
    /// Fields marked `#[compare(internal)]`.
    Internal,
    /// Any field with this name, at any depth.
    Field(String),
    /// The position at this path, relative to the root (`address.city`,
    /// `lines[0]`).
    Path(String),
    /// Every position holding a value of this type.
    Type { id: TypeId, name: &'static str },
}

/// What a [`Rule`] does at the positions it selects.
#[derive(Debug, Clone)]
pub enum Action {
    /// Compare with the type's own `Compare` impl.
    Recurse,
    /// Skip the position and everything below it.
    Ignore,
    /// Decide equality with a custom function.
    Delegate(Equivalence),
}

/// A type-erased custom equality function over one concrete type.
#[derive(Clone)]
pub struct Equivalence {
    type_id: TypeId,
    type_name: &'static str,
    eq: Arc<dyn Fn(&dyn Any, &dyn Any) -> bool + Send + Sync>,
}

/// What rules see of the position being compared.
pub(crate) struct Position<'a> {
    pub path: &'a Path,
    pub type_id: TypeId,
    pub internal: bool,
}

impl Rule {
    pub fn new(filter: Filter, action: Action) -> Self {
        Rule { filter, action }
    }

    /// The rules used when a matcher is built without any.
    ///
    /// Tuned for message-like records: internal bookkeeping fields are
    /// ignored, everything else is compared exactly.
    pub fn defaults() -> Vec<Rule> {
        vec![Rule::ignore_internal()]
    }

    /// Ignores every field marked `#[compare(internal)]`.
    pub fn ignore_internal() -> Self {
        Rule::new(Filter::Internal, Action::Ignore)
    }

    /// Plain field-by-field comparison, internal fields included.
    ///
    /// Passing this rule alone replaces the defaults without adding any
    /// behavior. It matches every position, so rules placed after it never
    /// apply.
    pub fn exact() -> Self {
        Rule::new(Filter::Always, Action::Recurse)
    }

    /// Ignores every field called `name`, at any depth.
    pub fn ignore_field(name: impl Into<String>) -> Self {
        Rule::new(Filter::Field(name.into()), Action::Ignore)
    }

    /// Ignores the position at `path` (relative to the root).
    pub fn ignore_path(path: impl Into<String>) -> Self {
        Rule::new(Filter::Path(path.into()), Action::Ignore)
    }

    /// Ignores every value of type `T`.
    pub fn ignore_type<T: 'static>() -> Self {
        Rule::new(Filter::of_type::<T>(), Action::Ignore)
    }

    /// Compares every value of type `T` with `eq`.
    pub fn compare_with<T: 'static>(eq: impl Fn(&T, &T) -> bool + Send + Sync + 'static) -> Self {
        Rule::new(Filter::of_type::<T>(), Action::Delegate(Equivalence::new(eq)))
    }

    /// Compares the value at `path` with `eq`. The rule does not apply if the
    /// value there is not a `T`.
    pub fn compare_path_with<T: 'static>(
        path: impl Into<String>,
        eq: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Rule::new(
            Filter::Path(path.into()),
            Action::Delegate(Equivalence::new(eq)),
        )
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub(crate) fn applies(&self, position: &Position<'_>) -> bool {
        if let Action::Delegate(eq) = &self.action {
            if eq.type_id != position.type_id {
                return false;
            }
        }

        match &self.filter {
            Filter::Always => true,
            Filter::Internal => position.internal,
            Filter::Field(name) => position.path.last_field() == Some(name.as_str()),
            Filter::Path(path) => position.path.relative() == *path,
            Filter::Type { id, .. } => *id == position.type_id,
        }
    }
}

impl Filter {
    pub fn of_type<T: 'static>() -> Self {
        Filter::Type {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }
}

impl Equivalence {
    pub fn new<T: 'static>(eq: impl Fn(&T, &T) -> bool + Send + Sync + 'static) -> Self {
        Equivalence {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            eq: Arc::new(move |actual: &dyn Any, expected: &dyn Any| {
                match (actual.downcast_ref::<T>(), expected.downcast_ref::<T>()) {
                    (Some(actual), Some(expected)) => eq(actual, expected),
                    _ => false,
                }
            }),
        }
    }

    pub(crate) fn equal(&self, actual: &dyn Any, expected: &dyn Any) -> bool {
        (self.eq)(actual, expected)
    }
}

impl fmt::Debug for Equivalence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Equivalence<{}>", self.type_name)
    }
}
