//! Graph flattening.
//!
//! The [`GraphWalker`] turns an object graph into a [`Table`]. Every distinct
//! composite gets one slot, in depth-first pre-order starting from the root,
//! and every edge to a composite becomes a reference to that slot. Meeting
//! the same composite again (a shared child or a cycle) yields a reference
//! to its existing slot without descending into it a second time.
//!
//! The walk keeps its own work stack, so graph depth is bounded by memory
//! rather than by the call stack, and keeps identity bookkeeping in a map on
//! the side: the live graph is never written to.
//!
//! ## Replacers
//!
//! A [`Replacer`] lets the caller rewrite or drop children on the way out:
//!
//! ```rust
//! use serde_resurrect::{graph, Engine, Replacer, Value};
//!
//! let engine = Engine::new();
//! let user = graph!({"name": "Alice", "password": "hunter2"});
//!
//! let mut hide = Replacer::func(|key, value| match key {
//!     "password" => None,
//!     _ => Some(value.clone()),
//! });
//! let text = engine.serialize_with(&user, Some(&mut hide), None).unwrap();
//! assert!(!text.contains("hunter2"));
//! ```

use crate::atom::{is_atom, AtomCodec, Encoded};
use crate::class::TypeRegistry;
use crate::options::ReservedKeys;
use crate::table::Table;
use crate::{Error, Object, Result, Value};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Type of a replacer callback: `(key, value) -> replacement`. Returning
/// `None` drops the child.
pub type ReplacerFn<'r> = Box<dyn FnMut(&str, &Value) -> Option<Value> + 'r>;

/// Caller hook applied to every child during a walk.
pub enum Replacer<'r> {
    /// Called with the child's key (array indices as decimal strings) and
    /// value. Never called for keys inside the bookkeeping namespace.
    Func(ReplacerFn<'r>),
    /// Keeps only the listed object keys. Array elements are always kept.
    Keys(Vec<String>),
}

impl<'r> Replacer<'r> {
    pub fn func<F>(f: F) -> Self
    where
        F: FnMut(&str, &Value) -> Option<Value> + 'r,
    {
        Replacer::Func(Box::new(f))
    }

    pub fn keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Replacer::Keys(keys.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for Replacer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacer::Func(_) => write!(f, "Replacer::Func"),
            Replacer::Keys(keys) => f.debug_tuple("Replacer::Keys").field(keys).finish(),
        }
    }
}

#[derive(Debug)]
enum ChildKey {
    Index(usize),
    Key(String),
}

impl fmt::Display for ChildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildKey::Index(i) => write!(f, "{}", i),
            ChildKey::Key(k) => f.write_str(k),
        }
    }
}

/// A composite whose children are still being visited.
struct Frame {
    slot: usize,
    children: std::vec::IntoIter<(ChildKey, Value)>,
}

/// Result of a walk: the table plus the identity map that built it.
pub struct Flattened {
    pub table: Table,
    identities: HashMap<usize, usize>,
}

impl Flattened {
    /// Drops the identity map and every back-link into the live graph.
    pub fn release(&mut self) {
        self.identities.clear();
        self.identities.shrink_to_fit();
        self.table.strip_bookkeeping();
    }
}

/// Depth-first, cycle-safe flattener.
pub struct GraphWalker<'a, 'r> {
    codec: &'a AtomCodec<'a>,
    keys: &'a ReservedKeys,
    types: Option<&'a TypeRegistry>,
    replacer: Option<&'a mut Replacer<'r>>,
    table: Table,
    identities: HashMap<usize, usize>,
}

impl<'a, 'r> GraphWalker<'a, 'r> {
    /// `types` is `None` when type revival is off; objects are then encoded
    /// without type names.
    pub fn new(
        codec: &'a AtomCodec<'a>,
        keys: &'a ReservedKeys,
        types: Option<&'a TypeRegistry>,
        replacer: Option<&'a mut Replacer<'r>>,
    ) -> Self {
        GraphWalker {
            codec,
            keys,
            types,
            replacer,
            table: Table::new(),
            identities: HashMap::new(),
        }
    }

    /// Flattens the graph under the composite `root`.
    ///
    /// # Errors
    ///
    /// Any error from encoding an atom or resolving a type name aborts the
    /// walk.
    pub fn walk(mut self, root: &Value) -> Result<Flattened> {
        if is_atom(root) {
            return Err(Error::unsupported_value("cannot flatten an atom root"));
        }
        let mut stack = Vec::new();
        self.visit(root, &mut stack)?;

        while let Some(frame) = stack.last_mut() {
            let slot = frame.slot;
            let Some((key, child)) = frame.children.next() else {
                stack.pop();
                continue;
            };
            let child = match self.replace(&key, child) {
                Some(child) => child,
                None => match key {
                    ChildKey::Index(_) => Value::Undefined,
                    ChildKey::Key(_) => continue,
                },
            };
            let encoded = self.visit(&child, &mut stack)?;
            if let Some(entry) = self.table.get_mut(slot) {
                match key {
                    ChildKey::Index(_) => entry.push_element(encoded),
                    ChildKey::Key(k) => entry.push_field(k, encoded),
                }
            }
        }

        debug!(slots = self.table.len(), "flattened object graph");
        Ok(Flattened {
            table: self.table,
            identities: self.identities,
        })
    }

    /// Encodes one value. A composite seen for the first time is tagged and
    /// its frame pushed, so its children are visited next.
    fn visit(&mut self, value: &Value, stack: &mut Vec<Frame>) -> Result<Encoded> {
        let addr = match value {
            Value::Array(array) => array.addr(),
            Value::Object(object) => object.addr(),
            atom => return self.codec.encode_atom(atom),
        };
        if let Some(&slot) = self.identities.get(&addr) {
            return Ok(Encoded::Ref(slot as i64));
        }

        let (type_name, children) = match value {
            Value::Object(object) => (self.type_name(object)?, self.fields_of(object)?),
            Value::Array(array) => (
                None,
                array
                    .to_vec()
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (ChildKey::Index(i), v))
                    .collect(),
            ),
            _ => (None, Vec::new()),
        };
        let slot = self.table.tag(value.clone(), type_name);
        self.identities.insert(addr, slot);
        trace!(slot, kind = value.kind(), "tagged composite");

        stack.push(Frame {
            slot,
            children: children.into_iter(),
        });
        Ok(Encoded::Ref(slot as i64))
    }

    fn type_name(&self, object: &Object) -> Result<Option<String>> {
        match self.types {
            Some(types) => types.resolve_tag(object),
            None => Ok(None),
        }
    }

    fn fields_of(&self, object: &Object) -> Result<Vec<(ChildKey, Value)>> {
        object
            .entries()
            .into_iter()
            .map(|(key, value)| {
                if key == self.keys.type_name() {
                    Err(Error::UnsupportedValue(format!(
                        "field {:?} collides with the reserved type key",
                        key
                    )))
                } else {
                    Ok((ChildKey::Key(key), value))
                }
            })
            .collect()
    }

    fn replace(&mut self, key: &ChildKey, value: Value) -> Option<Value> {
        match self.replacer.as_deref_mut() {
            None => Some(value),
            Some(Replacer::Keys(accepted)) => match key {
                ChildKey::Key(k) if !accepted.iter().any(|a| a == k) => None,
                _ => Some(value),
            },
            Some(Replacer::Func(f)) => {
                let name = key.to_string();
                if self.keys.is_reserved(&name) {
                    Some(value)
                } else {
                    f(&name, &value)
                }
            }
        }
    }
}
