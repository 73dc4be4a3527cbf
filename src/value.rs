//! The in-memory object graph.
//!
//! [`Value`] is the unit the engine walks. Atoms (null, undefined, booleans,
//! numbers, strings, dates, patterns, host nodes) are plain data. Composites
//! ([`Array`] and [`Object`]) are shared, mutable handles: cloning one clones
//! the handle, so two fields can point at the same object and an object can
//! point back at itself.
//!
//! ## Identity vs. Structure
//!
//! `==` on values follows identity semantics: atoms compare by value (and
//! `NaN` is not equal to itself), composites compare by handle. Use
//! [`Value::deep_eq`] for a cycle-safe structural comparison.
//!
//! ```rust
//! use serde_resurrect::{Object, Value};
//!
//! let a = Object::new();
//! a.set("x", 1);
//! let b = Object::new();
//! b.set("x", 1);
//!
//! assert_ne!(Value::from(a.clone()), Value::from(b.clone()));
//! assert!(Value::from(a).deep_eq(&Value::from(b)));
//! ```
//!
//! ## Building Cyclic Graphs
//!
//! ```rust
//! use serde_resurrect::{Object, Value};
//!
//! let node = Object::new();
//! node.set("self", node.clone());
//! assert!(node.get("self").unwrap().as_object().unwrap().ptr_eq(&node));
//! ```

use crate::class::Class;
use crate::node::Node;
use crate::{Error, Result, ValueMap};
use chrono::{DateTime, SecondsFormat, Utc};
use regex::{Regex, RegexBuilder};
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;

/// Any node of an object graph.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    /// Absence marker, distinct from `Null`.
    Undefined,
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateTime<Utc>),
    Pattern(Pattern),
    /// Opaque host object carried as markup.
    Node(Node),
    /// Executable host value. Graphs holding one cannot be serialized.
    Function(Function),
    Array(Array),
    Object(Object),
}

/// A numeric value, including the non-finite ones.
///
/// # Examples
///
/// ```rust
/// use serde_resurrect::Number;
///
/// assert_eq!(Number::from(f64::INFINITY), Number::Infinity);
/// assert!(Number::from(f64::NAN).is_nan());
/// assert!(Number::Integer(42).is_finite());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Infinity,
    NegativeInfinity,
    NaN,
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `false` for `NaN` and the infinities, including a `Float`
    /// holding one of them.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.as_f64().is_finite()
    }

    #[inline]
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.as_f64().is_nan()
    }

    /// Converts this number to an `i64` if it is a whole number in range.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
            Number::Infinity => f64::INFINITY,
            Number::NegativeInfinity => f64::NEG_INFINITY,
            Number::NaN => f64::NAN,
        }
    }

    /// Equality where `NaN` matches `NaN`.
    #[must_use]
    pub fn same_value(&self, other: &Number) -> bool {
        let (a, b) = (self.as_f64(), other.as_f64());
        (a.is_nan() && b.is_nan()) || a == b
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) if fl.is_nan() => write!(f, "NaN"),
            Number::Float(fl) if fl.is_infinite() => {
                write!(f, "{}", if *fl > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Number::Float(fl) => write!(f, "{}", fl),
            Number::Infinity => write!(f, "Infinity"),
            Number::NegativeInfinity => write!(f, "-Infinity"),
            Number::NaN => write!(f, "NaN"),
        }
    }
}

impl FromStr for Number {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "NaN" => Ok(Number::NaN),
            "Infinity" | "+Infinity" => Ok(Number::Infinity),
            "-Infinity" => Ok(Number::NegativeInfinity),
            text => {
                if let Ok(i) = text.parse::<i64>() {
                    return Ok(Number::Integer(i));
                }
                text.parse::<f64>()
                    .map(Number::from)
                    .map_err(|_| Error::custom(format!("not a number: {:?}", s)))
            }
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Number::NaN
        } else if value == f64::INFINITY {
            Number::Infinity
        } else if value == f64::NEG_INFINITY {
            Number::NegativeInfinity
        } else {
            Number::Float(value)
        }
    }
}

/// A regular-expression value: source text plus flags.
///
/// The textual form is `/source/flags`. Flags follow the usual letters
/// (`d g i m s u v y`); `i`, `m` and `s` change how [`Pattern::to_regex`]
/// compiles the source.
///
/// # Examples
///
/// ```rust
/// use serde_resurrect::Pattern;
///
/// let pattern: Pattern = "/ab+c/gi".parse().unwrap();
/// assert_eq!(pattern.source(), "ab+c");
/// assert_eq!(pattern.flags(), "gi");
/// assert!(pattern.is_match("xABBC").unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
    flags: String,
}

const PATTERN_FLAGS: &str = "dgimsuvy";

impl Pattern {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let flags = flags.into();
        for (i, flag) in flags.char_indices() {
            if !PATTERN_FLAGS.contains(flag) || flags[..i].contains(flag) {
                return Err(Error::invalid_pattern(
                    &source,
                    &format!("invalid flags {:?}", flags),
                ));
            }
        }
        Ok(Pattern { source, flags })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Compiles the pattern with its `i`, `m` and `s` flags applied.
    pub fn to_regex(&self) -> Result<Regex> {
        RegexBuilder::new(&self.source)
            .case_insensitive(self.flags.contains('i'))
            .multi_line(self.flags.contains('m'))
            .dot_matches_new_line(self.flags.contains('s'))
            .build()
            .map_err(|e| Error::invalid_pattern(&self.source, &e.to_string()))
    }

    pub fn is_match(&self, text: &str) -> Result<bool> {
        Ok(self.to_regex()?.is_match(text))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (source, flags) = crate::atom::split_pattern(s)
            .ok_or_else(|| Error::invalid_pattern(s, "expected /source/flags"))?;
        Pattern::new(source, flags)
    }
}

/// Signature of a host function body.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value>;

/// A callable host value.
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    body: Rc<NativeFn>,
}

impl Function {
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        Function {
            name: Rc::from(name),
            body: Rc::new(body),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.body)(args)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name)
    }
}

/// A shared, mutable sequence.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Array(Rc::new(RefCell::new(Vec::with_capacity(capacity))))
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Replaces the element at `index`, returning the old one. Out-of-range
    /// indices leave the array untouched and return `None`.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Option<Value> {
        let mut items = self.0.borrow_mut();
        items
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value.into()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Snapshot of the elements (composite elements are shared handles).
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn items_mut(&self) -> RefMut<'_, Vec<Value>> {
        self.0.borrow_mut()
    }

    /// Returns `true` if both handles point at the same array.
    #[must_use]
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Array(Rc::new(RefCell::new(items)))
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array(len={}, @{:#x})", self.len(), self.addr())
    }
}

/// The state behind an [`Object`] handle.
#[derive(Default)]
pub struct ObjectData {
    pub class: Option<Arc<Class>>,
    pub fields: ValueMap,
}

/// A shared, mutable keyed record with an optional class binding.
///
/// # Examples
///
/// ```rust
/// use serde_resurrect::{Class, Object, Value};
/// use std::sync::Arc;
///
/// let greeter = Arc::new(Class::new("Greeter").with_method("greet", |_, _| Ok(Value::from("hi"))));
/// let obj = Object::with_class(greeter);
/// assert_eq!(obj.type_name().as_deref(), Some("Greeter"));
/// assert_eq!(obj.call("greet", &[]).unwrap().as_str(), Some("hi"));
/// ```
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_class(class: Arc<Class>) -> Self {
        Object(Rc::new(RefCell::new(ObjectData {
            class: Some(class),
            fields: ValueMap::new(),
        })))
    }

    #[must_use]
    pub fn from_map(fields: ValueMap) -> Self {
        Object(Rc::new(RefCell::new(ObjectData {
            class: None,
            fields,
        })))
    }

    #[must_use]
    pub fn class(&self) -> Option<Arc<Class>> {
        self.0.borrow().class.clone()
    }

    /// Rebinds the object to a different class (or to none).
    pub fn set_class(&self, class: Option<Arc<Class>>) {
        self.0.borrow_mut().class = class;
    }

    #[must_use]
    pub fn type_name(&self) -> Option<String> {
        self.0.borrow().class.as_ref().map(|c| c.name().to_string())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().fields.get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().fields.insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().fields.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().fields.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().fields.is_empty()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().fields.keys().cloned().collect()
    }

    /// Snapshot of the fields in order (composite values are shared handles).
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn fields(&self) -> Ref<'_, ValueMap> {
        Ref::map(self.0.borrow(), |data| &data.fields)
    }

    pub fn fields_mut(&self) -> RefMut<'_, ValueMap> {
        RefMut::map(self.0.borrow_mut(), |data| &mut data.fields)
    }

    /// Dispatches `method` through the object's class.
    ///
    /// The object is not borrowed while the method runs, so methods are free
    /// to read and write the object's fields.
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        let class = self
            .class()
            .ok_or_else(|| Error::missing_method("Object", method))?;
        let body = class
            .method(method)
            .ok_or_else(|| Error::missing_method(class.name(), method))?;
        (**body)(self, args)
    }

    /// Returns `true` if both handles point at the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Object")
            .field("type", &data.class.as_ref().map(|c| c.name().to_string()))
            .field("keys", &data.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Value::Pattern(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Pattern(_) => "pattern",
            Value::Node(_) => "node",
            Value::Function(_) => "function",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Field-by-field comparison that follows cycles.
    ///
    /// Objects must carry the same type name and the same keys in the same
    /// order. `NaN` matches `NaN`. A pair of composites already visited
    /// is assumed equal, which is what terminates cycles.
    /// Nesting depth is bounded by heap, not by the call stack.
    #[must_use]
    pub fn deep_eq(&self, other: &Value) -> bool {
        let mut seen = HashSet::new();
        let mut pending = vec![(self.clone(), other.clone())];
        while let Some((a, b)) = pending.pop() {
            match (&a, &b) {
                (Value::Number(x), Value::Number(y)) => {
                    if !x.same_value(y) {
                        return false;
                    }
                }
                (Value::Array(x), Value::Array(y)) => {
                    if !seen.insert((x.addr(), y.addr())) {
                        continue;
                    }
                    let (xs, ys) = (x.to_vec(), y.to_vec());
                    if xs.len() != ys.len() {
                        return false;
                    }
                    pending.extend(xs.into_iter().zip(ys).rev());
                }
                (Value::Object(x), Value::Object(y)) => {
                    if !seen.insert((x.addr(), y.addr())) {
                        continue;
                    }
                    if x.type_name() != y.type_name() {
                        return false;
                    }
                    let (xs, ys) = (x.entries(), y.entries());
                    if xs.len() != ys.len() || xs.iter().zip(&ys).any(|(p, q)| p.0 != q.0) {
                        return false;
                    }
                    pending.extend(
                        xs.into_iter()
                            .map(|e| e.1)
                            .zip(ys.into_iter().map(|e| e.1))
                            .rev(),
                    );
                }
                _ => {
                    if a != b {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Pattern(a), Value::Pattern(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a.markup() == b.markup(),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Undefined => write!(f, "Undefined"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Date(dt) => write!(f, "Date({})", dt.to_rfc3339()),
            Value::Pattern(p) => write!(f, "Pattern({})", p),
            Value::Node(n) => write!(f, "{:?}", n),
            Value::Function(func) => write!(f, "{:?}", func),
            Value::Array(a) => write!(f, "{:?}", a),
            Value::Object(o) => write!(f, "{:?}", o),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Undefined => write!(f, "undefined"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Date(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Pattern(p) => write!(f, "{}", p),
            Value::Node(n) => write!(f, "{}", n.markup()),
            Value::Function(func) => write!(f, "function {}", func.name()),
            Value::Array(a) => write!(f, "[array({})]", a.len()),
            Value::Object(o) => write!(
                f,
                "[object {}]",
                o.type_name().unwrap_or_else(|| "Object".to_string())
            ),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            other => Err(Error::custom(format!(
                "expected number, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::custom(format!(
                "expected bool, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::custom(format!(
                "expected string, found {}",
                other.kind()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<Pattern> for Value {
    fn from(value: Pattern) -> Self {
        Value::Pattern(value)
    }
}

impl From<Node> for Value {
    fn from(value: Node) -> Self {
        Value::Node(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Array::from(value))
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Object(Object::from_map(value))
    }
}
