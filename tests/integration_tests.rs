use chrono::{TimeZone, Utc};
use serde_resurrect::{
    from_str, graph, to_string, to_string_pretty, Array, Class, Engine, EngineOptions, Error,
    Function, HostNode, Node, NodeParser, Object, Pattern, Replacer, TypeRegistry, Value,
};
use std::any::Any;
use std::sync::Arc;

fn assert_roundtrip(engine: &Engine, value: &Value) -> Value {
    let text = engine.serialize(value).unwrap();
    println!("Payload: {}", text);
    let back = engine.deserialize(&text).unwrap();
    assert!(back.deep_eq(value), "round trip changed {}", text);
    back
}

fn greeter() -> Arc<Class> {
    Arc::new(
        Class::new("Greeter").with_method("greet", |this, _| {
            let name = this.get("name").and_then(|v| v.as_str().map(str::to_string));
            Ok(Value::from(match name {
                Some(name) => format!("hi {}", name),
                None => "hi".to_string(),
            }))
        }),
    )
}

#[test]
fn test_shared_child_stays_shared() {
    let a = graph!({"name": "a"});
    let b = graph!({"left": (a.clone()), "right": (a)});

    let text = to_string(&b).unwrap();
    assert_eq!(
        text,
        r##"[{"left":{"#id":1},"right":{"#id":1}},{"name":"a"}]"##
    );

    let b2 = from_str(&text).unwrap();
    let b2 = b2.as_object().unwrap();
    let left = b2.get("left").unwrap();
    let right = b2.get("right").unwrap();
    assert_eq!(left, right);

    left.as_object().unwrap().set("name", "changed");
    assert_eq!(right.as_object().unwrap().get("name").unwrap().as_str(), Some("changed"));
}

#[test]
fn test_self_cycle() {
    let a = Object::new();
    a.set("self", a.clone());

    let back = assert_roundtrip(&Engine::new(), &a.into());
    let back = back.as_object().unwrap();
    assert!(back.get("self").unwrap().as_object().unwrap().ptr_eq(back));
}

#[test]
fn test_mutual_cycle_through_arrays() {
    let parent = Object::new();
    let children = Array::new();
    for i in 0..3 {
        let child = Object::new();
        child.set("index", i);
        child.set("parent", parent.clone());
        children.push(child);
    }
    parent.set("children", children);

    let back = assert_roundtrip(&Engine::new(), &parent.into());
    let back = back.as_object().unwrap();
    let children = back.get("children").unwrap();
    for child in children.as_array().unwrap().to_vec() {
        let up = child.as_object().unwrap().get("parent").unwrap();
        assert!(up.as_object().unwrap().ptr_eq(back));
    }
}

#[test]
fn test_slot_numbering_is_preorder() {
    let leaf = graph!(["leaf"]);
    let root = graph!({
        "first": {"inner": (leaf.clone())},
        "second": (leaf)
    });
    assert_eq!(
        to_string(&root).unwrap(),
        r##"[{"first":{"#id":1},"second":{"#id":2}},{"inner":{"#id":2}},["leaf"]]"##
    );
}

#[test]
fn test_atom_fidelity() {
    let when = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    let pattern = Pattern::new("ab+c", "gi").unwrap();
    let list = Array::from(vec![
        Value::from(when),
        Value::from(pattern.clone()),
        Value::from(f64::NAN),
        Value::from(f64::INFINITY),
        Value::from(f64::NEG_INFINITY),
        Value::Undefined,
        Value::Null,
        Value::from(-0.5),
    ]);

    let text = to_string(&list.clone().into()).unwrap();
    assert_eq!(
        text,
        concat!(
            r##"[[{"#.":"Date","#v":["2024-01-15T10:30:00Z"]},"##,
            r##"{"#.":"RegExp","#v":["ab+c","gi"]},"##,
            r##"{"#.":"Number","#v":["NaN"]},"##,
            r##"{"#.":"Number","#v":["Infinity"]},"##,
            r##"{"#.":"Number","#v":["-Infinity"]},"##,
            r##"{"#id":-1},null,-0.5]]"##
        )
    );

    let back = from_str(&text).unwrap();
    let items = back.as_array().unwrap().to_vec();
    assert_eq!(items[0].as_date(), Some(&when));
    assert_eq!(items[1].as_pattern(), Some(&pattern));
    assert!(items[2].as_number().unwrap().is_nan());
    assert_eq!(items[3].as_f64(), Some(f64::INFINITY));
    assert_eq!(items[4].as_f64(), Some(f64::NEG_INFINITY));
    assert!(items[5].is_undefined());
    assert!(items[6].is_null());
    assert_eq!(items[7].as_f64(), Some(-0.5));
}

#[test]
fn test_dates_outside_four_digit_years() {
    for (year, expected) in [(10000, "+10000-01-01T00:00:00Z"), (-1, "-0001-01-01T00:00:00Z")] {
        let when = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap();
        let text = to_string(&Value::from(when)).unwrap();
        assert!(text.contains(expected), "{}", text);

        let back = from_str(&text).unwrap();
        assert_eq!(back.as_date(), Some(&when));
    }
}

#[test]
fn test_nan_stays_unequal_to_itself() {
    let back = from_str(&to_string(&Value::from(f64::NAN)).unwrap()).unwrap();
    assert_ne!(back, back.clone());
    assert!(back.deep_eq(&Value::from(f64::NAN)));
}

#[test]
fn test_host_node_roundtrip() {
    let node = Node::new(serde_resurrect::MarkupNode::new("<p class=\"x\">hi</p>"));
    let back = assert_roundtrip(&Engine::new(), &graph!([(node)]));
    let node = back.as_array().unwrap().get(0).unwrap();
    assert_eq!(node.as_node().unwrap().node_name(), "p");
}

#[test]
fn test_type_revival() {
    let class = greeter();
    let engine = Engine::new().with_types(TypeRegistry::new().with_class(class.clone()).unwrap());

    let g = Object::with_class(class.clone());
    let text = engine.serialize(&g.into()).unwrap();
    assert_eq!(text, r##"[{"#":"Greeter"}]"##);

    let back = engine.deserialize(&text).unwrap();
    let back = back.as_object().unwrap();
    assert!(Arc::ptr_eq(&back.class().unwrap(), &class));
    assert_eq!(back.call("greet", &[]).unwrap().as_str(), Some("hi"));
}

#[test]
fn test_typed_objects_in_a_graph() {
    let class = greeter();
    let engine = Engine::new().with_types(TypeRegistry::new().with_class(class.clone()).unwrap());

    let alice = Object::with_class(class.clone());
    alice.set("name", "alice");
    let bob = Object::with_class(class);
    bob.set("name", "bob");
    bob.set("friend", alice.clone());
    alice.set("friend", bob.clone());
    let people = graph!([(alice), (bob)]);

    let back = assert_roundtrip(&engine, &people);
    let items = back.as_array().unwrap().to_vec();
    let greetings: Vec<_> = items
        .iter()
        .map(|p| p.as_object().unwrap().call("greet", &[]).unwrap())
        .collect();
    assert_eq!(greetings[0].as_str(), Some("hi alice"));
    assert_eq!(greetings[1].as_str(), Some("hi bob"));
}

#[test]
fn test_plain_container_names_are_not_written() {
    let plain = Arc::new(Class::new("Object"));
    let obj = Object::with_class(plain);
    obj.set("x", 1);
    assert_eq!(to_string(&obj.into()).unwrap(), r#"[{"x":1}]"#);
}

#[test]
fn test_identity_mismatch() {
    let registered = greeter();
    let impostor = greeter();
    let engine = Engine::new().with_types(TypeRegistry::new().with_class(registered).unwrap());

    let result = engine.serialize(&Object::with_class(impostor).into());
    assert!(matches!(result, Err(Error::IdentityMismatch { name }) if name == "Greeter"));
}

#[test]
fn test_unregistered_type() {
    let result = to_string(&Object::with_class(greeter()).into());
    assert!(matches!(result, Err(Error::UnknownType(name)) if name == "Greeter"));

    let result = from_str(r##"[{"#":"Greeter"}]"##);
    assert!(matches!(result, Err(Error::UnknownType(name)) if name == "Greeter"));
}

#[test]
fn test_anonymous_type() {
    let anonymous = Arc::new(Class::new(""));
    let result = to_string(&graph!([(Object::with_class(anonymous))]));
    assert!(matches!(result, Err(Error::AnonymousType)));
}

#[test]
fn test_functions_rejected() {
    let tick = Function::new("tick", |_| Ok(Value::Null));
    let holder = graph!({"callback": (tick.clone())});
    assert!(matches!(to_string(&holder), Err(Error::UnsupportedValue(_))));
    assert!(matches!(to_string(&tick.into()), Err(Error::UnsupportedValue(_))));
}

#[test]
fn test_reserved_field_rejected() {
    let obj = graph!({"#": "Greeter"});
    let err = to_string(&obj).unwrap_err();
    println!("Error: {}", err);
    assert!(matches!(err, Error::UnsupportedValue(_)));
}

#[test]
fn test_clone_independence() {
    let shared = graph!({"name": "shared"});
    let original = graph!({"a": (shared.clone()), "b": (shared), "list": [1, 2]});

    let engine = Engine::new();
    let copy = engine.clone_graph(&original).unwrap();
    assert!(copy.deep_eq(&original));
    assert_ne!(copy, original);

    let copy_obj = copy.as_object().unwrap();
    assert_eq!(copy_obj.get("a").unwrap(), copy_obj.get("b").unwrap());
    copy_obj
        .get("a")
        .unwrap()
        .as_object()
        .unwrap()
        .set("name", "mutated");
    copy_obj.get("list").unwrap().as_array().unwrap().push(3);

    let orig_obj = original.as_object().unwrap();
    let name = orig_obj.get("b").unwrap().as_object().unwrap().get("name").unwrap();
    assert_eq!(name.as_str(), Some("shared"));
    assert_eq!(orig_obj.get("list").unwrap().as_array().unwrap().len(), 2);
}

#[test]
fn test_replacer_omits_keys() {
    let engine = Engine::new();
    let user = graph!({
        "name": "Alice",
        "password": "hunter2",
        "#meta": {"password": "also hidden"}
    });

    let mut seen = Vec::new();
    let mut replacer = Replacer::func(|key, value| {
        seen.push(key.to_string());
        if key == "password" {
            None
        } else {
            Some(value.clone())
        }
    });
    let text = engine.serialize_with(&user, Some(&mut replacer), None).unwrap();
    drop(replacer);

    assert!(seen.iter().all(|key| !key.starts_with('#')));
    assert!(!text.contains("hunter2"));
    assert!(!text.contains("also hidden"));

    let back = engine.deserialize(&text).unwrap();
    let back = back.as_object().unwrap();
    assert!(!back.contains_key("password"));
    assert!(back.contains_key("#meta"));
}

#[test]
fn test_replacer_keeps_array_indices() {
    let list = graph!([1, "drop", 3]);
    let mut replacer = Replacer::func(|_, value| match value.as_str() {
        Some("drop") => None,
        _ => Some(value.clone()),
    });
    let text = Engine::new()
        .serialize_with(&list, Some(&mut replacer), None)
        .unwrap();
    assert_eq!(text, r##"[[1,{"#id":-1},3]]"##);
}

#[test]
fn test_replacer_can_substitute() {
    let doc = graph!({"secret": {"token": "abc"}, "count": 2});
    let mut replacer = Replacer::func(|key, value| match key {
        "secret" => Some(Value::from("[redacted]")),
        "count" => Some(Value::from(value.as_i64().unwrap_or(0) * 10)),
        _ => Some(value.clone()),
    });
    let text = Engine::new()
        .serialize_with(&doc, Some(&mut replacer), None)
        .unwrap();
    assert_eq!(text, r#"[{"secret":"[redacted]","count":20}]"#);
}

#[test]
fn test_key_list_replacer() {
    let doc = graph!({"id": 7, "name": "x", "extra": {"id": 8, "junk": true}});
    let mut replacer = Replacer::keys(["id", "extra"]);
    let text = Engine::new()
        .serialize_with(&doc, Some(&mut replacer), None)
        .unwrap();
    assert_eq!(text, r##"[{"id":7,"extra":{"#id":1}},{"id":8}]"##);
}

#[test]
fn test_revive_types_off() {
    let class = greeter();
    let engine = Engine::with_options(EngineOptions::new().with_revive_types(false))
        .unwrap()
        .with_types(TypeRegistry::new().with_class(class.clone()).unwrap());

    let g = Object::with_class(class);
    g.set("me", g.clone());
    let text = engine.serialize(&g.into()).unwrap();
    assert_eq!(text, r##"[{"me":{"#id":0}}]"##);

    let back = engine.deserialize(r##"[{"#":"Greeter","me":{"#id":0}}]"##).unwrap();
    let back = back.as_object().unwrap();
    assert!(back.class().is_none());
    assert!(!back.contains_key("#"));
    assert!(back.get("me").unwrap().as_object().unwrap().ptr_eq(back));
}

#[test]
fn test_custom_prefix_roundtrip() {
    let class = greeter();
    let engine = Engine::with_options(EngineOptions::new().with_prefix("$"))
        .unwrap()
        .with_types(TypeRegistry::new().with_class(class.clone()).unwrap());

    let g = Object::with_class(class);
    g.set("#", "allowed under another prefix");
    g.set("born", Value::from(Utc.timestamp_millis_opt(0).unwrap()));
    let text = engine.serialize(&g.into()).unwrap();
    assert_eq!(
        text,
        r##"[{"$":"Greeter","#":"allowed under another prefix","born":{"$.":"Date","$v":["1970-01-01T00:00:00Z"]}}]"##
    );
    let back = engine.deserialize(&text).unwrap();
    assert_eq!(back.as_object().unwrap().call("greet", &[]).unwrap().as_str(), Some("hi"));
}

#[test]
fn test_pretty_roundtrip() {
    let value = graph!({"a": [1, 2], "b": {"c": null}});
    let pretty = to_string_pretty(&value).unwrap();
    println!("Pretty:\n{}", pretty);
    assert!(pretty.contains('\n'));
    assert!(from_str(&pretty).unwrap().deep_eq(&value));
}

#[test]
fn test_malformed_payloads() {
    for payload in [
        "[]",
        r##"[{"next":{"#id":7}}]"##,
        r##"[{"next":{"#id":"zero"}}]"##,
        r##"[{"list":[1,2]}]"##,
        r##"[{"nested":{"plain":1}}]"##,
        r##"[{"#":["not","a","name"]}]"##,
        r##"[{"d":{"#.":"Date","#v":[]}}]"##,
        r##"[{"d":{"#.":"Date","#v":["yesterday"]}}]"##,
        r##"{"something":"else"}"##,
        "[3]",
    ] {
        let result = from_str(payload);
        assert!(
            matches!(result, Err(Error::MalformedPayload(_))),
            "{} gave {:?}",
            payload,
            result
        );
    }
}

#[test]
fn test_unknown_builder() {
    let result = from_str(r##"[{"m":{"#.":"Map","#v":[]}}]"##);
    assert!(matches!(result, Err(Error::UnknownType(name)) if name == "Map"));
}

#[test]
fn test_syntax_error_position() {
    match from_str("[{\"a\":\n  }") {
        Err(Error::Syntax { line, .. }) => assert_eq!(line, 2),
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

struct Widget {
    id: String,
}

impl HostNode for Widget {
    fn node_name(&self) -> &str {
        "widget"
    }

    fn to_markup(&self) -> String {
        format!("<widget id=\"{}\"/>", self.id)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct WidgetParser;

impl NodeParser for WidgetParser {
    fn parse(&self, markup: &str) -> serde_resurrect::Result<Node> {
        let id = markup
            .split('"')
            .nth(1)
            .ok_or_else(|| Error::custom(format!("no id in {}", markup)))?;
        Ok(Node::new(Widget { id: id.to_string() }))
    }
}

#[test]
fn test_custom_node_parser() {
    let engine = Engine::new().with_node_parser(WidgetParser);
    let value = graph!({"root": (Node::new(Widget { id: "w1".to_string() }))});

    let text = engine.serialize(&value).unwrap();
    assert_eq!(text, r##"[{"root":{"#.":"Node","#v":["<widget id=\"w1\"/>"]}}]"##);

    let back = engine.deserialize(&text).unwrap();
    let node = back.as_object().unwrap().get("root").unwrap();
    let widget = node.as_node().unwrap().downcast_ref::<Widget>().unwrap();
    assert_eq!(widget.id, "w1");
}

#[test]
fn test_engine_shared_across_threads() {
    let class = greeter();
    let engine = Engine::new().with_types(TypeRegistry::new().with_class(class.clone()).unwrap());

    std::thread::scope(|scope| {
        for i in 0..4 {
            let engine = &engine;
            let class = class.clone();
            scope.spawn(move || {
                let g = Object::with_class(class);
                g.set("name", format!("t{}", i));
                g.set("self", g.clone());
                let back = engine.deserialize(&engine.serialize(&g.into()).unwrap()).unwrap();
                let greeting = back.as_object().unwrap().call("greet", &[]).unwrap();
                assert_eq!(greeting.as_str(), Some(format!("hi t{}", i).as_str()));
            });
        }
    });
}
