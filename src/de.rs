//! Graph resurrection.
//!
//! A payload is one of three shapes:
//!
//! - a JSON array: a table, rebuilt in two passes. Pass 1 creates one empty
//!   placeholder per slot and binds classes; pass 2 fills every placeholder,
//!   turning references into the placeholders they name. Since every
//!   placeholder exists before any reference is resolved, forward
//!   references and cycles need no special handling.
//! - a JSON object: a lone atom, either the undefined marker or a builder.
//! - anything else: a primitive.

use crate::atom::{AtomCodec, UNDEFINED_SLOT};
use crate::class::TypeRegistry;
use crate::map::ValueMap;
use crate::options::ReservedKeys;
use crate::{Array, Error, Object, Result, Value};
use serde_json::{Map, Value as Json};
use tracing::{debug, trace};

pub struct Resurrector<'a> {
    codec: &'a AtomCodec<'a>,
    keys: &'a ReservedKeys,
    types: Option<&'a TypeRegistry>,
}

impl<'a> Resurrector<'a> {
    /// `types` is `None` when type revival is off; type names in the payload
    /// are then ignored.
    pub fn new(
        codec: &'a AtomCodec<'a>,
        keys: &'a ReservedKeys,
        types: Option<&'a TypeRegistry>,
    ) -> Self {
        Resurrector { codec, keys, types }
    }

    /// Rebuilds the value a parsed payload describes.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedPayload`] for shapes no encoder produces, plus
    /// whatever class lookup or a builder routine reports.
    pub fn resurrect(&self, payload: &Json) -> Result<Value> {
        match payload {
            Json::Array(entries) => self.rebuild(entries),
            Json::Object(map) => self.codec.decode_atom_object(map),
            primitive => self.codec.decode_primitive(primitive),
        }
    }

    fn rebuild(&self, entries: &[Json]) -> Result<Value> {
        if entries.is_empty() {
            return Err(Error::malformed("empty table"));
        }

        let placeholders = entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| self.placeholder(slot, entry))
            .collect::<Result<Vec<_>>>()?;

        for (entry, target) in entries.iter().zip(&placeholders) {
            match (entry, target) {
                (Json::Array(items), Value::Array(array)) => {
                    let resolved = items
                        .iter()
                        .map(|item| self.resolve(item, &placeholders))
                        .collect::<Result<Vec<_>>>()?;
                    *array.items_mut() = resolved;
                }
                (Json::Object(map), Value::Object(object)) => {
                    *object.fields_mut() = self.resolve_fields(map, &placeholders)?;
                }
                _ => return Err(Error::malformed("placeholder kind does not match its entry")),
            }
        }

        debug!(slots = placeholders.len(), "resurrected object graph");
        placeholders
            .into_iter()
            .next()
            .ok_or_else(|| Error::malformed("empty table"))
    }

    fn placeholder(&self, slot: usize, entry: &Json) -> Result<Value> {
        match entry {
            Json::Array(items) => Ok(Array::with_capacity(items.len()).into()),
            Json::Object(map) => {
                let object = Object::new();
                match map.get(self.keys.type_name()) {
                    None => {}
                    Some(Json::String(name)) => {
                        if let Some(types) = self.types {
                            object.set_class(Some(types.lookup(name)?));
                            trace!(slot, type_name = %name, "bound class");
                        }
                    }
                    Some(other) => {
                        return Err(Error::MalformedPayload(format!(
                            "type name in slot {} is not a string: {}",
                            slot, other
                        )))
                    }
                }
                Ok(object.into())
            }
            other => Err(Error::MalformedPayload(format!(
                "slot {} holds {} instead of a composite",
                slot, other
            ))),
        }
    }

    fn resolve_fields(&self, map: &Map<String, Json>, placeholders: &[Value]) -> Result<ValueMap> {
        let mut fields = ValueMap::with_capacity(map.len());
        for (key, item) in map {
            if key == self.keys.type_name() {
                continue;
            }
            fields.insert(key.clone(), self.resolve(item, placeholders)?);
        }
        Ok(fields)
    }

    fn resolve(&self, item: &Json, placeholders: &[Value]) -> Result<Value> {
        match item {
            Json::Object(map) => {
                if let Some(value) = self.codec.decode_builder_object(map)? {
                    return Ok(value);
                }
                match self.codec.reference_slot(map)? {
                    Some(UNDEFINED_SLOT) => Ok(Value::Undefined),
                    Some(slot) => usize::try_from(slot)
                        .ok()
                        .and_then(|index| placeholders.get(index))
                        .cloned()
                        .ok_or_else(|| {
                            Error::MalformedPayload(format!("reference to missing slot {}", slot))
                        }),
                    None => Err(Error::malformed(
                        "nested object is neither a reference nor a builder",
                    )),
                }
            }
            Json::Array(_) => Err(Error::malformed("nested array inside a table entry")),
            primitive => self.codec.decode_primitive(primitive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::MarkupParser;
    use crate::Class;
    use serde_json::json;
    use std::sync::Arc;

    fn resurrect(payload: Json, types: Option<&TypeRegistry>) -> Result<Value> {
        let keys = ReservedKeys::default();
        let codec = AtomCodec::new(&keys, &MarkupParser);
        Resurrector::new(&codec, &keys, types).resurrect(&payload)
    }

    #[test]
    fn test_forward_and_shared_references() {
        let root = resurrect(
            json!([{"left": {"#id": 1}, "right": {"#id": 1}}, {"name": "shared"}]),
            None,
        )
        .unwrap();
        let root = root.as_object().unwrap();
        let left = root.get("left").unwrap();
        assert_eq!(left, root.get("right").unwrap());
        assert_eq!(left.as_object().unwrap().get("name").unwrap().as_str(), Some("shared"));
    }

    #[test]
    fn test_cycle() {
        let root = resurrect(json!([[{"#id": 0}]]), None).unwrap();
        let list = root.as_array().unwrap();
        assert_eq!(list.get(0).unwrap(), root);
    }

    #[test]
    fn test_undefined_and_builders() {
        let root = resurrect(
            json!([[{"#id": -1}, {"#.": "Number", "#v": ["Infinity"]}, 2.5]]),
            None,
        )
        .unwrap();
        let items = root.as_array().unwrap().to_vec();
        assert!(items[0].is_undefined());
        assert_eq!(items[1].as_f64(), Some(f64::INFINITY));
        assert_eq!(items[2].as_f64(), Some(2.5));
    }

    #[test]
    fn test_top_level_shapes() {
        assert_eq!(resurrect(json!("plain"), None).unwrap().as_str(), Some("plain"));
        assert!(resurrect(json!({"#id": -1}), None).unwrap().is_undefined());
        assert!(matches!(
            resurrect(json!({"name": 1}), None),
            Err(Error::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_malformed_tables() {
        for payload in [
            json!([]),
            json!([{"next": {"#id": 7}}]),
            json!([{"next": [1, 2]}]),
            json!([{"next": {"plain": true}}]),
            json!([1]),
            json!([{"#": 5}]),
        ] {
            assert!(
                matches!(resurrect(payload.clone(), None), Err(Error::MalformedPayload(_))),
                "accepted {}",
                payload
            );
        }
    }

    #[test]
    fn test_class_binding() {
        let class = Arc::new(Class::new("Body"));
        let types = TypeRegistry::new().with_class(class.clone()).unwrap();
        let payload = json!([{"#": "Body", "mass": 3}]);

        let revived = resurrect(payload.clone(), Some(&types)).unwrap();
        let revived = revived.as_object().unwrap();
        assert!(Arc::ptr_eq(&revived.class().unwrap(), &class));
        assert_eq!(revived.keys(), vec!["mass".to_string()]);

        let plain = resurrect(payload, None).unwrap();
        assert!(plain.as_object().unwrap().class().is_none());
        assert_eq!(plain.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_type_name() {
        let types = TypeRegistry::new();
        assert!(matches!(
            resurrect(json!([{"#": "Ghost"}]), Some(&types)),
            Err(Error::UnknownType(name)) if name == "Ghost"
        ));
    }
}
