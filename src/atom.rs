//! Atom classification and the builder encoding.
//!
//! Anything that is not an [`Array`](crate::Array) or
//! [`Object`](crate::Object) is an atom and is encoded in place rather than
//! through a table slot. Primitives (null, booleans, finite numbers,
//! strings) pass through to JSON untouched. The special atoms need a
//! builder, a small JSON object naming a reconstruction routine and its
//! arguments:
//!
//! | Atom | Encoding (default `#` prefix) |
//! |------|-------------------------------|
//! | date | `{"#.": "Date", "#v": ["2024-01-15T10:30:00Z"]}` |
//! | pattern | `{"#.": "RegExp", "#v": ["ab+c", "gi"]}` |
//! | host node | `{"#.": "Node", "#v": ["<p>hi</p>"]}` |
//! | NaN, ±Infinity | `{"#.": "Number", "#v": ["NaN"]}` |
//! | undefined | `{"#id": -1}` |

use crate::node::NodeParser;
use crate::options::ReservedKeys;
use crate::{Error, Number, Pattern, Result, Value};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use regex::Regex;
use serde_json::Map;
use std::sync::OnceLock;

/// Slot value standing in for [`Value::Undefined`].
pub const UNDEFINED_SLOT: i64 = -1;

/// The encoded form of one atom or one table reference.
#[derive(Clone, Debug, PartialEq)]
pub enum Encoded {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Ref(i64),
    Builder { routine: Builtin, args: Vec<String> },
}

/// The fixed set of reconstruction routines builders may name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Date,
    RegExp,
    Number,
    Node,
}

impl Builtin {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Builtin::Date => "Date",
            Builtin::RegExp => "RegExp",
            Builtin::Number => "Number",
            Builtin::Node => "Node",
        }
    }

    /// Resolves a routine name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] for any other name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "Date" => Ok(Builtin::Date),
            "RegExp" => Ok(Builtin::RegExp),
            "Number" => Ok(Builtin::Number),
            "Node" => Ok(Builtin::Node),
            other => Err(Error::unknown_type(other)),
        }
    }
}

/// Returns `true` unless `value` is a composite that needs a table slot.
#[inline]
#[must_use]
pub fn is_atom(value: &Value) -> bool {
    !value.is_composite()
}

/// Returns `true` for atoms JSON carries natively.
#[inline]
#[must_use]
pub fn is_primitive(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => true,
        Value::Number(n) => n.is_finite(),
        _ => false,
    }
}

/// Splits the textual form `/source/flags` of a pattern.
pub(crate) fn split_pattern(text: &str) -> Option<(&str, &str)> {
    static TEXTUAL: OnceLock<Regex> = OnceLock::new();
    let textual = TEXTUAL.get_or_init(|| {
        Regex::new(r"^/([\s\S]*)/([a-z]*)$").expect("textual pattern regex is valid")
    });
    let caps = textual.captures(text)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Encodes and decodes atoms for one engine configuration.
pub struct AtomCodec<'a> {
    keys: &'a ReservedKeys,
    nodes: &'a dyn NodeParser,
}

impl<'a> AtomCodec<'a> {
    pub fn new(keys: &'a ReservedKeys, nodes: &'a dyn NodeParser) -> Self {
        AtomCodec { keys, nodes }
    }

    /// Encodes an atom.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedValue`] for functions and for composites, which
    /// are the walker's business.
    pub fn encode_atom(&self, value: &Value) -> Result<Encoded> {
        match value {
            Value::Null => Ok(Encoded::Null),
            Value::Undefined => Ok(Encoded::Ref(UNDEFINED_SLOT)),
            Value::Bool(b) => Ok(Encoded::Bool(*b)),
            Value::Number(n) if n.is_finite() => Ok(Encoded::Number(n.clone())),
            Value::Number(n) => Ok(Encoded::Builder {
                routine: Builtin::Number,
                args: vec![n.to_string()],
            }),
            Value::String(s) => Ok(Encoded::String(s.clone())),
            Value::Date(dt) => Ok(Encoded::Builder {
                routine: Builtin::Date,
                args: vec![dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)],
            }),
            Value::Pattern(pattern) => {
                let text = pattern.to_string();
                let (source, flags) = split_pattern(&text)
                    .ok_or_else(|| Error::invalid_pattern(&text, "expected /source/flags"))?;
                Ok(Encoded::Builder {
                    routine: Builtin::RegExp,
                    args: vec![source.to_string(), flags.to_string()],
                })
            }
            Value::Node(node) => Ok(Encoded::Builder {
                routine: Builtin::Node,
                args: vec![node.markup()],
            }),
            Value::Function(func) => Err(Error::UnsupportedValue(format!(
                "can't serialize executable values (function {})",
                func.name()
            ))),
            Value::Array(_) | Value::Object(_) => Err(Error::unsupported_value(
                "composite values are not atoms",
            )),
        }
    }

    /// Runs the builder routine `name` over `args`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownType`] for an unknown routine,
    /// [`Error::MalformedPayload`] when the arguments do not fit it.
    pub fn decode_builder(&self, name: &str, args: &[Value]) -> Result<Value> {
        let routine = Builtin::from_name(name)?;
        match (routine, args) {
            (Builtin::Date, [Value::String(text)]) => text
                .parse::<DateTime<Utc>>()
                .map(Value::Date)
                .map_err(|e| Error::MalformedPayload(format!("invalid date {:?}: {}", text, e))),
            (Builtin::Date, [Value::Number(millis)]) => millis
                .as_i64()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
                .map(Value::Date)
                .ok_or_else(|| Error::malformed("date timestamp out of range")),
            (Builtin::RegExp, [Value::String(source)]) => {
                Ok(Value::Pattern(Pattern::new(source.as_str(), "")?))
            }
            (Builtin::RegExp, [Value::String(source), Value::String(flags)]) => {
                Ok(Value::Pattern(Pattern::new(source.as_str(), flags.as_str())?))
            }
            (Builtin::Number, [Value::String(text)]) => {
                Ok(Value::Number(text.parse::<Number>().map_err(|_| {
                    Error::MalformedPayload(format!("invalid number {:?}", text))
                })?))
            }
            (Builtin::Number, [Value::Number(n)]) => Ok(Value::Number(n.clone())),
            (Builtin::Node, [Value::String(markup)]) => Ok(Value::Node(self.nodes.parse(markup)?)),
            (routine, args) => Err(Error::MalformedPayload(format!(
                "builder {} does not take {} argument(s) of these kinds",
                routine.name(),
                args.len()
            ))),
        }
    }

    /// Decodes a JSON primitive.
    pub fn decode_primitive(&self, json: &serde_json::Value) -> Result<Value> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Number(Number::Integer(i)))
                } else {
                    n.as_f64()
                        .map(|f| Value::Number(Number::from(f)))
                        .ok_or_else(|| Error::malformed("unrepresentable number"))
                }
            }
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                Err(Error::malformed("expected a primitive"))
            }
        }
    }

    /// Reads the slot of a reference object, if `map` is one.
    pub fn reference_slot(&self, map: &Map<String, serde_json::Value>) -> Result<Option<i64>> {
        match map.get(self.keys.reference()) {
            None => Ok(None),
            Some(slot) => slot.as_i64().map(Some).ok_or_else(|| {
                Error::MalformedPayload(format!("reference slot {} is not an integer", slot))
            }),
        }
    }

    /// Decodes a builder object, if `map` is one.
    pub fn decode_builder_object(
        &self,
        map: &Map<String, serde_json::Value>,
    ) -> Result<Option<Value>> {
        let Some(name) = map.get(self.keys.builder()) else {
            return Ok(None);
        };
        let name = name
            .as_str()
            .ok_or_else(|| Error::malformed("builder name is not a string"))?;
        let args = match map.get(self.keys.args()) {
            None => Vec::new(),
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .map(|item| self.decode_primitive(item))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(Error::malformed("builder arguments are not an array")),
        };
        self.decode_builder(name, &args).map(Some)
    }

    /// Decodes a mapping that stands alone, outside any table: either the
    /// undefined marker or a builder.
    pub fn decode_atom_object(&self, map: &Map<String, serde_json::Value>) -> Result<Value> {
        if let Some(value) = self.decode_builder_object(map)? {
            return Ok(value);
        }
        match self.reference_slot(map)? {
            Some(UNDEFINED_SLOT) => Ok(Value::Undefined),
            Some(slot) => Err(Error::MalformedPayload(format!(
                "reference to slot {} outside of a table",
                slot
            ))),
            None => Err(Error::malformed("object is neither a reference nor a builder")),
        }
    }
}
