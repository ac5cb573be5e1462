mod basic;

pub use basic::BasicRecord;

use crate::value::Value;
use geo_types::Geometry;
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

///
/// Record
///
/// Read-only capability the evaluator consumes. Implementations decide how
/// attributes are stored; evaluation only ever asks by name.
///
/// CONTRACT:
/// - `lookup` returns `Value::Absent` for names the record does not carry,
///   and `Value::Null` for names it carries without a value.
/// - lookups are side-effect free and may be repeated.
///

pub trait Record {
    fn lookup(&self, name: &str) -> Cow<'_, Value>;

    /// The record's default geometry, if it has one.
    fn geometry(&self) -> Option<&Geometry<f64>> {
        None
    }

    /// Feature identifier, if the record has one.
    fn id(&self) -> Option<&str> {
        None
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn lookup(&self, name: &str) -> Cow<'_, Value> {
        (**self).lookup(name)
    }

    fn geometry(&self) -> Option<&Geometry<f64>> {
        (**self).geometry()
    }

    fn id(&self) -> Option<&str> {
        (**self).id()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn lookup(&self, name: &str) -> Cow<'_, Value> {
        (**self).lookup(name)
    }

    fn geometry(&self) -> Option<&Geometry<f64>> {
        (**self).geometry()
    }

    fn id(&self) -> Option<&str> {
        (**self).id()
    }
}

// Plain maps act as records with no id; the first geometry-valued entry in
// iteration order is the default geometry.

impl Record for BTreeMap<String, Value> {
    fn lookup(&self, name: &str) -> Cow<'_, Value> {
        self.get(name).map_or(Cow::Owned(Value::Absent), Cow::Borrowed)
    }

    fn geometry(&self) -> Option<&Geometry<f64>> {
        first_geometry(self.values())
    }
}

impl<S: BuildHasher> Record for HashMap<String, Value, S> {
    fn lookup(&self, name: &str) -> Cow<'_, Value> {
        self.get(name).map_or(Cow::Owned(Value::Absent), Cow::Borrowed)
    }

    fn geometry(&self) -> Option<&Geometry<f64>> {
        first_geometry(self.values())
    }
}

pub(crate) fn first_geometry<'a>(
    mut values: impl Iterator<Item = &'a Value>,
) -> Option<&'a Geometry<f64>> {
    values.find_map(|value| match value {
        Value::Geometry(geometry) => Some(geometry),
        _ => None,
    })
}
