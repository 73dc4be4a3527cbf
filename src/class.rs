//! Behavior bindings and the type namespace.
//!
//! A [`Class`] is a named method table. Objects point at their class, and a
//! [`TypeRegistry`] maps names to classes so that a decoded object can be
//! rebound to the same class it had when it was encoded.
//!
//! ```rust
//! use serde_resurrect::{Class, Engine, Object, TypeRegistry, Value};
//! use std::sync::Arc;
//!
//! let greeter = Arc::new(Class::new("Greeter").with_method("greet", |_, _| Ok(Value::from("hi"))));
//! let mut types = TypeRegistry::new();
//! types.register(greeter.clone()).unwrap();
//!
//! let engine = Engine::new().with_types(types);
//! let text = engine.serialize(&Object::with_class(greeter).into()).unwrap();
//! let back = engine.deserialize(&text).unwrap();
//! assert_eq!(back.as_object().unwrap().call("greet", &[]).unwrap().as_str(), Some("hi"));
//! ```

use crate::{Error, Object, Result, Value};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Signature of a method body: the receiver plus call arguments.
pub type MethodFn = Arc<dyn Fn(&Object, &[Value]) -> Result<Value> + Send + Sync>;

/// A named behavior binding.
pub struct Class {
    name: String,
    methods: IndexMap<String, MethodFn>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Class {
            name: name.into(),
            methods: IndexMap::new(),
        }
    }

    /// Adds (or replaces) a method.
    #[must_use]
    pub fn with_method<F>(mut self, name: &str, body: F) -> Self
    where
        F: Fn(&Object, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.methods.insert(name.to_string(), Arc::new(body));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodFn> {
        self.methods.get(name)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Names that mark plain containers; objects bound to a class with one of
/// these names are encoded without a type annotation.
const PLAIN_NAMES: [&str; 2] = ["Object", "Array"];

/// The namespace type names are resolved against.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    classes: IndexMap<String, Arc<Class>>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `class` under its own name, replacing any previous class
    /// with that name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AnonymousType`] if the class name is empty.
    pub fn register(&mut self, class: Arc<Class>) -> Result<()> {
        if class.name().is_empty() {
            return Err(Error::AnonymousType);
        }
        self.classes.insert(class.name().to_string(), class);
        Ok(())
    }

    /// Builder-style [`TypeRegistry::register`].
    pub fn with_class(mut self, class: Arc<Class>) -> Result<Self> {
        self.register(class)?;
        Ok(self)
    }

    /// Looks up the class bound to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] if nothing is registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<Arc<Class>> {
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| Error::unknown_type(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The name an object is encoded under, if any.
    ///
    /// Unbound objects and objects bound to a plain container name have no
    /// name. A class with an empty name cannot be revived.
    pub fn name_of(&self, object: &Object) -> Result<Option<String>> {
        match object.class() {
            None => Ok(None),
            Some(class) if class.name().is_empty() => Err(Error::AnonymousType),
            Some(class) if PLAIN_NAMES.contains(&class.name()) => Ok(None),
            Some(class) => Ok(Some(class.name().to_string())),
        }
    }

    /// Resolves the name an object will be encoded under and checks that
    /// decoding that name yields the object's own class.
    ///
    /// # Errors
    ///
    /// [`Error::AnonymousType`], [`Error::UnknownType`], or
    /// [`Error::IdentityMismatch`] when the registry maps the name to a
    /// different class.
    pub fn resolve_tag(&self, object: &Object) -> Result<Option<String>> {
        let Some(name) = self.name_of(object)? else {
            return Ok(None);
        };
        let registered = self.lookup(&name)?;
        match object.class() {
            Some(own) if Arc::ptr_eq(&own, &registered) => Ok(Some(name)),
            _ => Err(Error::identity_mismatch(&name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greeter() -> Arc<Class> {
        Arc::new(Class::new("Greeter").with_method("greet", |_, _| Ok(Value::from("hi"))))
    }

    #[test]
    fn test_name_of() {
        let types = TypeRegistry::new();
        assert_eq!(types.name_of(&Object::new()).unwrap(), None);
        assert_eq!(
            types.name_of(&Object::with_class(greeter())).unwrap(),
            Some("Greeter".to_string())
        );
        let plain = Arc::new(Class::new("Object"));
        assert_eq!(types.name_of(&Object::with_class(plain)).unwrap(), None);
        let anonymous = Arc::new(Class::new(""));
        assert!(matches!(
            types.name_of(&Object::with_class(anonymous)),
            Err(Error::AnonymousType)
        ));
    }

    #[test]
    fn test_lookup_unknown() {
        let types = TypeRegistry::new();
        assert!(matches!(types.lookup("Body"), Err(Error::UnknownType(name)) if name == "Body"));
    }

    #[test]
    fn test_register_rejects_anonymous() {
        let mut types = TypeRegistry::new();
        assert!(types.register(Arc::new(Class::new(""))).is_err());
        assert!(types.is_empty());
    }

    #[test]
    fn test_resolve_tag_detects_mismatch() {
        let registered = greeter();
        let impostor = greeter();
        let types = TypeRegistry::new().with_class(registered.clone()).unwrap();

        assert_eq!(
            types.resolve_tag(&Object::with_class(registered)).unwrap(),
            Some("Greeter".to_string())
        );
        assert!(matches!(
            types.resolve_tag(&Object::with_class(impostor)),
            Err(Error::IdentityMismatch { .. })
        ));
    }

    #[test]
    fn test_method_dispatch() {
        let obj = Object::with_class(greeter());
        assert_eq!(obj.call("greet", &[]).unwrap().as_str(), Some("hi"));
        assert!(matches!(
            obj.call("wave", &[]),
            Err(Error::MissingMethod { .. })
        ));
    }
}
