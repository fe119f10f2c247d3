use super::{Compare, Comparison, DifferenceKind, Field, Step};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::path::PathBuf;
use std::rc::{self, Rc};
use std::sync::{self, Arc};
use std::time::{Duration, SystemTime};

macro_rules! leaf_impls {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Compare for $ty {
                fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
                    cmp.leaf(self, other);
                }
            }
        )*
    };
}

leaf_impls!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    (),
    String,
    &'static str,
    Cow<'static, str>,
    PathBuf,
    Duration,
    SystemTime,
    std::cmp::Ordering,
);

impl<T: Copy + PartialEq + fmt::Debug + 'static> Compare for Cell<T> {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        cmp.leaf(&self.get(), &other.get());
    }
}

impl<T: Compare> Compare for Option<T> {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        match (self, other) {
            (Some(actual), Some(expected)) => cmp.unwrap(actual, expected),
            (None, None) => {}
            _ => cmp.variant_mismatch(self, other),
        }
    }
}

impl<T: Compare, E: Compare> Compare for Result<T, E> {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        match (self, other) {
            (Ok(actual), Ok(expected)) => cmp.unwrap(actual, expected),
            (Err(actual), Err(expected)) => cmp.unwrap(actual, expected),
            _ => cmp.variant_mismatch(self, other),
        }
    }
}

impl<T: Compare> Compare for Box<T> {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        cmp.unwrap(&**self, &**other);
    }
}

impl<T: Compare> Compare for Rc<T> {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        cmp.shared(&**self, &**other);
    }
}

impl<T: Compare> Compare for Arc<T> {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        cmp.shared(&**self, &**other);
    }
}

#[derive(Debug)]
enum Liveness {
    Live,
    Dropped,
}

impl Liveness {
    fn of<T>(value: &Option<T>) -> Self {
        if value.is_some() {
            Liveness::Live
        } else {
            Liveness::Dropped
        }
    }
}

impl<T: Compare> Compare for rc::Weak<T> {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        match (self.upgrade(), other.upgrade()) {
            (Some(actual), Some(expected)) => cmp.shared(&*actual, &*expected),
            (None, None) => {}
            (actual, expected) => {
                cmp.variant_mismatch(&Liveness::of(&actual), &Liveness::of(&expected))
            }
        }
    }
}

impl<T: Compare> Compare for sync::Weak<T> {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        match (self.upgrade(), other.upgrade()) {
            (Some(actual), Some(expected)) => cmp.shared(&*actual, &*expected),
            (None, None) => {}
            (actual, expected) => {
                cmp.variant_mismatch(&Liveness::of(&actual), &Liveness::of(&expected))
            }
        }
    }
}

impl<T: Compare> Compare for RefCell<T> {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        match (self.try_borrow(), other.try_borrow()) {
            (Ok(actual), Ok(expected)) => cmp.unwrap(&*actual, &*expected),
            (actual, expected) => {
                let render = |value: Result<std::cell::Ref<'_, T>, _>| match value {
                    Ok(value) => format!("{:?}", &*value),
                    Err(_) => "<mutably borrowed>".to_string(),
                };
                cmp.record(
                    DifferenceKind::Value,
                    Some(render(actual)),
                    Some(render(expected)),
                );
            }
        }
    }
}

impl<T: Compare> Compare for Vec<T> {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        cmp.sequence(self, other);
    }
}

impl<T: Compare> Compare for VecDeque<T> {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        cmp.sequence(self, other);
    }
}

impl<T: Compare, const N: usize> Compare for [T; N] {
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        cmp.sequence(self, other);
    }
}

macro_rules! tuple_impls {
    ($( ( $($name:ident $idx:tt),+ ) )+) => {
        $(
            impl<$($name: Compare),+> Compare for ($($name,)+) {
                fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
                    $(
                        cmp.field(Field::new(stringify!($idx)), &self.$idx, &other.$idx);
                    )+
                }
            }
        )+
    };
}

tuple_impls! {
    (A 0)
    (A 0, B 1)
    (A 0, B 1, C 2)
    (A 0, B 1, C 2, D 3)
    (A 0, B 1, C 2, D 3, E 4)
    (A 0, B 1, C 2, D 3, E 4, F 5)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7)
}

fn key_step<K: fmt::Debug + ?Sized>(key: &K) -> Step {
    Step::Key(format!("{key:?}"))
}

impl<K, V, S> Compare for HashMap<K, V, S>
where
    K: Eq + Hash + fmt::Debug + 'static,
    V: Compare,
    S: BuildHasher + 'static,
{
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        // Hash order is arbitrary; sort keys so reports are stable.
        let mut keys: Vec<&K> = self
            .keys()
            .chain(other.keys().filter(|key| !self.contains_key(*key)))
            .collect();
        keys.sort_by_cached_key(|key| format!("{key:?}"));

        for key in keys {
            match (self.get(key), other.get(key)) {
                (Some(actual), Some(expected)) => cmp.entry(key, actual, expected),
                (Some(actual), None) => cmp.unexpected(key_step(key), actual),
                (None, Some(expected)) => cmp.missing(key_step(key), expected),
                (None, None) => {}
            }
        }
    }
}

impl<K, V> Compare for BTreeMap<K, V>
where
    K: Ord + fmt::Debug + 'static,
    V: Compare,
{
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        let keys: BTreeSet<&K> = self.keys().chain(other.keys()).collect();

        for key in keys {
            match (self.get(key), other.get(key)) {
                (Some(actual), Some(expected)) => cmp.entry(key, actual, expected),
                (Some(actual), None) => cmp.unexpected(key_step(key), actual),
                (None, Some(expected)) => cmp.missing(key_step(key), expected),
                (None, None) => {}
            }
        }
    }
}

impl<T, S> Compare for HashSet<T, S>
where
    T: Eq + Hash + fmt::Debug + 'static,
    S: BuildHasher + 'static,
{
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        let mut unexpected: Vec<&T> = self.difference(other).collect();
        unexpected.sort_by_cached_key(|value| format!("{value:?}"));
        let mut missing: Vec<&T> = other.difference(self).collect();
        missing.sort_by_cached_key(|value| format!("{value:?}"));

        for value in unexpected {
            cmp.unexpected(key_step(value), value);
        }
        for value in missing {
            cmp.missing(key_step(value), value);
        }
    }
}

impl<T> Compare for BTreeSet<T>
where
    T: Ord + fmt::Debug + 'static,
{
    fn compare(&self, other: &Self, cmp: &mut Comparison<'_>) {
        for value in self.difference(other) {
            cmp.unexpected(key_step(value), value);
        }
        for value in other.difference(self) {
            cmp.missing(key_step(value), value);
        }
    }
}
