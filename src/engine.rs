//! The public entry point.
//!
//! An [`Engine`] bundles everything fixed at construction (options, type
//! namespace, node parser). All per-call state (the table, the identity map)
//! lives inside the call, so one engine can be shared across threads.
//!
//! ```rust
//! use serde_resurrect::{graph, Engine};
//!
//! let engine = Engine::new();
//! let shared = graph!({"name": "shared"});
//! let pair = graph!({"left": (shared.clone()), "right": (shared)});
//!
//! let text = engine.serialize(&pair).unwrap();
//! assert_eq!(text, r##"[{"left":{"#id":1},"right":{"#id":1}},{"name":"shared"}]"##);
//!
//! let back = engine.deserialize(&text).unwrap();
//! let back = back.as_object().unwrap();
//! assert_eq!(back.get("left").unwrap(), back.get("right").unwrap());
//! ```

use crate::atom::{is_atom, AtomCodec, Encoded};
use crate::class::TypeRegistry;
use crate::de::Resurrector;
use crate::node::{MarkupParser, NodeParser};
use crate::options::{EngineOptions, ReservedKeys};
use crate::ser::{Flattened, GraphWalker, Replacer};
use crate::table::Wire;
use crate::{Error, Result, Value};
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::debug;

/// Encoded form of one call's root, ready to be written.
enum Payload {
    Atom(Encoded),
    Table(Flattened),
}

impl Serialize for Wire<'_, Payload> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.item {
            Payload::Atom(encoded) => Wire::new(self.keys, encoded).serialize(serializer),
            Payload::Table(flat) => Wire::new(self.keys, &flat.table).serialize(serializer),
        }
    }
}

/// Serializes and resurrects object graphs.
#[derive(Clone)]
pub struct Engine {
    options: EngineOptions,
    keys: ReservedKeys,
    types: TypeRegistry,
    nodes: Arc<dyn NodeParser>,
}

impl Default for Engine {
    fn default() -> Self {
        let options = EngineOptions::default();
        Engine {
            keys: ReservedKeys::new(&options.prefix),
            options,
            types: TypeRegistry::new(),
            nodes: Arc::new(MarkupParser),
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// An engine with default options, no registered types, and the
    /// [`MarkupParser`] for host nodes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if the prefix is empty.
    pub fn with_options(options: EngineOptions) -> Result<Self> {
        options.validate()?;
        Ok(Engine {
            keys: ReservedKeys::new(&options.prefix),
            options,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_types(mut self, types: TypeRegistry) -> Self {
        self.types = types;
        self
    }

    #[must_use]
    pub fn with_node_parser<P>(mut self, parser: P) -> Self
    where
        P: NodeParser + 'static,
    {
        self.nodes = Arc::new(parser);
        self
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    #[must_use]
    pub fn keys(&self) -> &ReservedKeys {
        &self.keys
    }

    #[must_use]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Serializes a graph using the configured layout.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_resurrect::{Engine, Value};
    ///
    /// let engine = Engine::new();
    /// assert_eq!(engine.serialize(&Value::from(f64::NAN)).unwrap(), r##"{"#.":"Number","#v":["NaN"]}"##);
    /// assert_eq!(engine.serialize(&Value::Undefined).unwrap(), r##"{"#id":-1}"##);
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if the graph holds a function, an object whose class cannot be
    /// revived, or a field named like the reserved type key.
    pub fn serialize(&self, value: &Value) -> Result<String> {
        let indent = self.options.pretty.then_some(self.options.indent);
        self.serialize_with(value, None, indent)
    }

    /// Serializes a graph with the configured indentation.
    ///
    /// # Errors
    ///
    /// See [`Engine::serialize`].
    pub fn serialize_pretty(&self, value: &Value) -> Result<String> {
        self.serialize_with(value, None, Some(self.options.indent))
    }

    /// Serializes a graph, passing every child through `replacer` and
    /// indenting by `indent` spaces when given.
    ///
    /// # Errors
    ///
    /// See [`Engine::serialize`].
    pub fn serialize_with(
        &self,
        value: &Value,
        replacer: Option<&mut Replacer<'_>>,
        indent: Option<usize>,
    ) -> Result<String> {
        let mut buf = Vec::new();
        self.encode(value, replacer, |payload| {
            write_json(&mut buf, &payload, indent)
        })?;
        let text = String::from_utf8(buf).map_err(Error::custom)?;
        debug!(bytes = text.len(), "serialized graph");
        Ok(text)
    }

    /// Serializes a graph into `writer`.
    ///
    /// # Errors
    ///
    /// See [`Engine::serialize`]; write failures are [`Error::Io`].
    pub fn serialize_to_writer<W>(&self, writer: W, value: &Value) -> Result<()>
    where
        W: Write,
    {
        let indent = self.options.pretty.then_some(self.options.indent);
        self.encode(value, None, |payload| write_json(writer, &payload, indent))
    }

    /// Rebuilds a graph from its serialized text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_resurrect::Engine;
    ///
    /// let engine = Engine::new();
    /// let node = engine.deserialize(r##"[{"self":{"#id":0}}]"##).unwrap();
    /// let node = node.as_object().unwrap();
    /// assert!(node.get("self").unwrap().as_object().unwrap().ptr_eq(node));
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] for invalid JSON, [`Error::MalformedPayload`] for
    /// JSON that is not a valid payload, [`Error::UnknownType`] for type
    /// names missing from the registry.
    pub fn deserialize(&self, text: &str) -> Result<Value> {
        let payload: serde_json::Value = serde_json::from_str(text)?;
        self.resurrect(&payload)
    }

    /// Rebuilds a graph from text read out of `reader`.
    ///
    /// # Errors
    ///
    /// See [`Engine::deserialize`]; read failures are [`Error::Io`].
    pub fn deserialize_from_reader<R>(&self, reader: R) -> Result<Value>
    where
        R: Read,
    {
        let payload: serde_json::Value = serde_json::from_reader(reader)?;
        self.resurrect(&payload)
    }

    /// Deep-copies a graph: the copy has the same shape, sharing and cycles,
    /// but shares no composite with `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_resurrect::{graph, Engine};
    ///
    /// let original = graph!({"tags": ["a", "b"]});
    /// let copy = Engine::new().clone_graph(&original).unwrap();
    /// assert!(copy.deep_eq(&original));
    /// assert_ne!(copy, original);
    /// ```
    ///
    /// # Errors
    ///
    /// Anything [`Engine::serialize`] or [`Engine::deserialize`] reports.
    pub fn clone_graph(&self, value: &Value) -> Result<Value> {
        let payload = self.encode(value, None, |payload| {
            serde_json::to_value(&payload).map_err(Error::from)
        })?;
        self.resurrect(&payload)
    }

    fn revived_types(&self) -> Option<&TypeRegistry> {
        self.options.revive_types.then_some(&self.types)
    }

    /// Walks `value` and hands its payload to `emit`. Walk bookkeeping is
    /// released before `emit` runs when `cleanup` is set, after it otherwise.
    fn encode<T, F>(&self, value: &Value, replacer: Option<&mut Replacer<'_>>, emit: F) -> Result<T>
    where
        F: FnOnce(Wire<'_, Payload>) -> Result<T>,
    {
        let codec = AtomCodec::new(&self.keys, self.nodes.as_ref());
        let mut payload = if is_atom(value) {
            Payload::Atom(codec.encode_atom(value)?)
        } else {
            let mut flat =
                GraphWalker::new(&codec, &self.keys, self.revived_types(), replacer).walk(value)?;
            if self.options.cleanup {
                flat.release();
            }
            Payload::Table(flat)
        };

        let result = emit(Wire::new(&self.keys, &payload));
        if let Payload::Table(flat) = &mut payload {
            flat.release();
        }
        result
    }

    fn resurrect(&self, payload: &serde_json::Value) -> Result<Value> {
        let codec = AtomCodec::new(&self.keys, self.nodes.as_ref());
        Resurrector::new(&codec, &self.keys, self.revived_types()).resurrect(payload)
    }
}

fn write_json<W, T>(writer: W, payload: &T, indent: Option<usize>) -> Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    match indent {
        None => serde_json::to_writer(writer, payload)?,
        Some(width) => {
            let indent = " ".repeat(width);
            let mut ser =
                serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(indent.as_bytes()));
            payload.serialize(&mut ser)?;
        }
    }
    Ok(())
}
