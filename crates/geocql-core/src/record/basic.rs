use crate::{
    record::{Record, first_geometry},
    value::Value,
};
use geo_types::Geometry;
use std::{borrow::Cow, collections::BTreeMap};

///
/// BasicRecord
///
/// In-memory record backed by an ordered attribute map.
///
/// The default geometry is the attribute named by `default_geometry` when
/// set, otherwise the first geometry-valued attribute by name order.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BasicRecord {
    id: Option<String>,
    attributes: BTreeMap<String, Value>,
    default_geometry: Option<String>,
}

impl BasicRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    #[must_use]
    pub fn with_default_geometry(mut self, name: impl Into<String>) -> Self {
        self.default_geometry = Some(name.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn set_default_geometry(&mut self, name: impl Into<String>) {
        self.default_geometry = Some(name.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl Record for BasicRecord {
    fn lookup(&self, name: &str) -> Cow<'_, Value> {
        self.attributes
            .get(name)
            .map_or(Cow::Owned(Value::Absent), Cow::Borrowed)
    }

    fn geometry(&self) -> Option<&Geometry<f64>> {
        match &self.default_geometry {
            Some(name) => match self.attributes.get(name) {
                Some(Value::Geometry(geometry)) => Some(geometry),
                _ => None,
            },
            None => first_geometry(self.attributes.values()),
        }
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl<K, V> FromIterator<(K, V)> for BasicRecord
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.insert(name, value);
        }

        record
    }
}
