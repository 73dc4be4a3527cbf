//! # serde_resurrect
//!
//! Serialization of arbitrary object graphs to JSON text, and resurrection of
//! that text back into an equivalent graph.
//!
//! ## What does it preserve?
//!
//! Plain JSON loses most of what makes an in-memory graph a graph. This crate
//! keeps:
//!
//! - **Sharing**: two fields pointing at the same object still point at one
//!   object after a round trip
//! - **Cycles**: an object may reach itself; encoding terminates and the
//!   cycle is rebuilt
//! - **Type bindings**: objects bound to a registered [`Class`] come back
//!   bound to the same class and dispatch the same methods
//! - **Special atoms**: dates, regular-expression patterns, host nodes,
//!   `NaN`, `±Infinity` and `undefined`
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_resurrect = "0.1"
//! ```
//!
//! ### Shared and Cyclic Graphs
//!
//! ```rust
//! use serde_resurrect::{from_str, to_string, Object, Value};
//!
//! let node = Object::new();
//! node.set("name", "loop");
//! node.set("next", node.clone());
//!
//! let text = to_string(&node.into()).unwrap();
//! assert_eq!(text, r##"[{"name":"loop","next":{"#id":0}}]"##);
//!
//! let back = from_str(&text).unwrap();
//! let back = back.as_object().unwrap();
//! assert!(back.get("next").unwrap().as_object().unwrap().ptr_eq(back));
//! ```
//!
//! ### Reviving Types
//!
//! ```rust
//! use serde_resurrect::{Class, Engine, Object, TypeRegistry, Value};
//! use std::sync::Arc;
//!
//! let point = Arc::new(Class::new("Point").with_method("norm1", |this, _| {
//!     let x = this.get("x").and_then(|v| v.as_f64()).unwrap_or(0.0);
//!     let y = this.get("y").and_then(|v| v.as_f64()).unwrap_or(0.0);
//!     Ok(Value::from(x.abs() + y.abs()))
//! }));
//! let engine = Engine::new().with_types(TypeRegistry::new().with_class(point.clone()).unwrap());
//!
//! let p = Object::with_class(point);
//! p.set("x", 3);
//! p.set("y", -4);
//!
//! let text = engine.serialize(&p.into()).unwrap();
//! assert_eq!(text, r##"[{"#":"Point","x":3,"y":-4}]"##);
//!
//! let back = engine.deserialize(&text).unwrap();
//! assert_eq!(back.as_object().unwrap().call("norm1", &[]).unwrap().as_f64(), Some(7.0));
//! ```
//!
//! ### Building Graphs with `graph!`
//!
//! ```rust
//! use serde_resurrect::{graph, to_string};
//!
//! let data = graph!({
//!     "name": "Alice",
//!     "tags": ["rust", "serde"]
//! });
//! assert_eq!(
//!     to_string(&data).unwrap(),
//!     r##"[{"name":"Alice","tags":{"#id":1}},["rust","serde"]]"##
//! );
//! ```
//!
//! ## Payload Format
//!
//! A payload whose root is a composite is a JSON array, the *table*. Slot 0
//! is the root; every other distinct array or object reachable from it gets
//! one slot, numbered in depth-first pre-order. Inside a slot, an edge to a
//! composite is written as a reference `{"#id": n}` and special atoms as
//! builders `{"#.": routine, "#v": [args...]}`. An object's type name is
//! written under the bare prefix key `"#"`. The prefix is configurable
//! through [`EngineOptions`].
//!
//! A root that is an atom is written on its own: a JSON primitive, a
//! builder, or `{"#id": -1}` for `undefined`.
//!
//! ## Logging
//!
//! Encode and decode calls emit `tracing` events: one `debug` event per call
//! with the table size, and `trace` events per tagged slot and per class
//! binding.

pub mod atom;
pub mod class;
pub mod de;
pub mod engine;
pub mod error;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
pub mod ser;
pub mod table;
pub mod value;

pub use class::{Class, MethodFn, TypeRegistry};
pub use engine::Engine;
pub use error::{Error, Result};
pub use map::ValueMap;
pub use node::{HostNode, MarkupNode, MarkupParser, Node, NodeParser};
pub use options::{EngineOptions, ReservedKeys};
pub use ser::Replacer;
pub use value::{Array, Function, Number, Object, Pattern, Value};

use std::io;

/// Serialize a graph with default options.
///
/// # Examples
///
/// ```rust
/// use serde_resurrect::{graph, to_string};
///
/// let list = graph!([1, 2.5, null, undefined]);
/// assert_eq!(to_string(&list).unwrap(), r##"[[1,2.5,null,{"#id":-1}]]"##);
/// ```
///
/// # Errors
///
/// Returns an error if the graph holds a function or an object whose type
/// cannot be revived (no types are registered with the default engine, so
/// any object bound to a named class fails).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String> {
    Engine::new().serialize(value)
}

/// Serialize a graph as indented JSON.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty(value: &Value) -> Result<String> {
    Engine::new().serialize_pretty(value)
}

/// Serialize a graph with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_resurrect::{graph, to_string_with_options, EngineOptions};
///
/// let options = EngineOptions::new().with_prefix("$");
/// let text = to_string_with_options(&graph!([undefined]), options).unwrap();
/// assert_eq!(text, r#"[[{"$id":-1}]]"#);
/// ```
///
/// # Errors
///
/// Returns an error if the options are invalid or the graph cannot be
/// serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(value: &Value, options: EngineOptions) -> Result<String> {
    Engine::with_options(options)?.serialize(value)
}

/// Serialize a graph into a writer.
///
/// # Examples
///
/// ```rust
/// use serde_resurrect::{graph, to_writer};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &graph!({"ok": true})).unwrap();
/// assert_eq!(buffer, br#"[{"ok":true}]"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, value: &Value) -> Result<()>
where
    W: io::Write,
{
    Engine::new().serialize_to_writer(writer, value)
}

/// Rebuild a graph from serialized text with default options.
///
/// # Errors
///
/// Returns an error if the text is not JSON, is not a valid payload, or
/// names a type (no types are registered with the default engine).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Value> {
    Engine::new().deserialize(s)
}

/// Rebuild a graph from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, or see [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Value> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Rebuild a graph from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use serde_resurrect::from_reader;
/// use std::io::Cursor;
///
/// let value = from_reader(Cursor::new(br#"[["a","b"]]"#)).unwrap();
/// assert_eq!(value.as_array().unwrap().len(), 2);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, or see [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Value>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deep-copy a graph through its serialized form.
///
/// # Errors
///
/// See [`to_string`] and [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn clone_graph(value: &Value) -> Result<Value> {
    Engine::new().clone_graph(value)
}
