//! The flat table a graph is encoded into.
//!
//! Slot `n` of a [`Table`] holds the copy of the `n`-th distinct composite
//! met during the walk (slot 0 is the root). Inside a copy, nested composites
//! are replaced by references to their slots, so the table is acyclic and
//! serializes as plain JSON:
//!
//! ```text
//! [{"#":"Pair","left":{"#id":1},"right":{"#id":1}},{"name":"shared"}]
//! ```

use crate::atom::Encoded;
use crate::options::ReservedKeys;
use crate::{Number, Value};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// The fields of one composite copy.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Seq(Vec<Encoded>),
    Map(Vec<(String, Encoded)>),
}

/// A composite copy plus its walk bookkeeping.
#[derive(Debug)]
pub struct TaggedCopy {
    pub slot: usize,
    pub type_name: Option<String>,
    /// Back-link to the live composite this copy was taken from. Holding it
    /// keeps the composite's address reserved for the rest of the walk.
    pub origin: Option<Value>,
    pub body: Body,
}

impl TaggedCopy {
    pub fn push_element(&mut self, encoded: Encoded) {
        if let Body::Seq(items) = &mut self.body {
            items.push(encoded);
        }
    }

    pub fn push_field(&mut self, key: String, encoded: Encoded) {
        if let Body::Map(fields) = &mut self.body {
            fields.push((key, encoded));
        }
    }
}

/// Ordered, de-duplicated composite copies.
#[derive(Debug, Default)]
pub struct Table {
    entries: Vec<TaggedCopy>,
}

impl Table {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reserves the next slot for an empty copy and returns it.
    pub fn tag(&mut self, origin: Value, type_name: Option<String>) -> usize {
        let slot = self.entries.len();
        let body = match origin {
            Value::Array(_) => Body::Seq(Vec::new()),
            _ => Body::Map(Vec::new()),
        };
        self.entries.push(TaggedCopy {
            slot,
            type_name,
            origin: Some(origin),
            body,
        });
        slot
    }

    pub fn get(&self, slot: usize) -> Option<&TaggedCopy> {
        self.entries.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut TaggedCopy> {
        self.entries.get_mut(slot)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaggedCopy> {
        self.entries.iter()
    }

    /// Drops every back-link to a live composite.
    pub fn strip_bookkeeping(&mut self) {
        for entry in &mut self.entries {
            entry.origin = None;
        }
    }
}

/// Pairs an encoded item with the keys it is written under.
pub(crate) struct Wire<'a, T: ?Sized> {
    pub keys: &'a ReservedKeys,
    pub item: &'a T,
}

impl<'a, T: ?Sized> Wire<'a, T> {
    pub fn new(keys: &'a ReservedKeys, item: &'a T) -> Self {
        Wire { keys, item }
    }

    fn with<U: ?Sized>(&self, item: &'a U) -> Wire<'a, U> {
        Wire {
            keys: self.keys,
            item,
        }
    }
}

impl Serialize for Wire<'_, Table> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.item.len()))?;
        for entry in self.item.iter() {
            seq.serialize_element(&self.with(entry))?;
        }
        seq.end()
    }
}

impl Serialize for Wire<'_, TaggedCopy> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.item.body {
            Body::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&self.with(item))?;
                }
                seq.end()
            }
            Body::Map(fields) => {
                let len = fields.len() + usize::from(self.item.type_name.is_some());
                let mut map = serializer.serialize_map(Some(len))?;
                if let Some(name) = &self.item.type_name {
                    map.serialize_entry(self.keys.type_name(), name)?;
                }
                for (key, item) in fields {
                    map.serialize_entry(key, &self.with(item))?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Wire<'_, Encoded> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.item {
            Encoded::Null => serializer.serialize_unit(),
            Encoded::Bool(b) => serializer.serialize_bool(*b),
            Encoded::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Encoded::Number(n) => serializer.serialize_f64(n.as_f64()),
            Encoded::String(s) => serializer.serialize_str(s),
            Encoded::Ref(slot) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(self.keys.reference(), slot)?;
                map.end()
            }
            Encoded::Builder { routine, args } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(self.keys.builder(), routine.name())?;
                map.serialize_entry(self.keys.args(), args)?;
                map.end()
            }
        }
    }
}
