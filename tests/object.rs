use autofake::prelude::*;

fn faker_with(defs: Vec<TypeDef>) -> AutoFaker {
    let mut catalog = TypeCatalog::with_prelude();
    catalog.register_all(defs).unwrap();
    AutoFaker::new(catalog)
}

fn tagged(tag: &'static str) -> impl Fn(&[Value]) -> Result<Fields, ConstructError> {
    move |_| {
        let mut fields = Fields::new();
        fields.insert("source".into(), Value::from(tag));
        Ok(fields)
    }
}

fn rejecting(_: &[Value]) -> Result<Fields, ConstructError> {
    Err(ConstructError::rejected("not today"))
}

fn widget(wide: Constructor) -> TypeDef {
    TypeDef::class("Widget")
        .constructor(Constructor::parameterless().with_body(tagged("empty")))
        .constructor(
            Constructor::new(vec![Param::new("a", Ty::i32())]).with_body(tagged("narrow")),
        )
        .constructor(wide)
        .field("source", Ty::string())
        .field("label", Ty::string())
}

fn source(value: &Value) -> Option<&str> {
    value.field("source").and_then(Value::as_str)
}

// ---- Constructors ----

#[test]
fn widest_constructor_wins() {
    let wide = Constructor::new(vec![
        Param::new("a", Ty::i32()),
        Param::new("b", Ty::string()),
    ])
    .with_body(tagged("wide"));
    let faker = faker_with(vec![widget(wide)]);
    let value = faker.generate(&Ty::named("Widget"));
    assert_eq!(source(&value), Some("wide"));
    assert!(value.field("label").and_then(Value::as_str).is_some());
}

#[test]
fn failing_constructor_falls_back_to_next() {
    let wide = Constructor::new(vec![
        Param::new("a", Ty::i32()),
        Param::new("b", Ty::string()),
    ])
    .with_body(rejecting);
    let faker = faker_with(vec![widget(wide)]);
    let value = faker.generate(&Ty::named("Widget"));
    assert_eq!(source(&value), Some("narrow"));
}

#[test]
fn private_constructors_are_ignored() {
    let wide = Constructor::new(vec![
        Param::new("a", Ty::i32()),
        Param::new("b", Ty::string()),
    ])
    .with_body(tagged("wide"))
    .private();
    let faker = faker_with(vec![widget(wide)]);
    let value = faker.generate(&Ty::named("Widget"));
    assert_eq!(source(&value), Some("narrow"));
}

#[test]
fn class_without_working_constructor_is_null() {
    let faker = faker_with(vec![TypeDef::class("Sealed")
        .constructor(Constructor::new(vec![Param::new("x", Ty::i32())]).with_body(rejecting))
        .field("x", Ty::i32())]);
    assert!(faker.generate(&Ty::named("Sealed")).is_null());
}

#[test]
fn struct_without_working_constructor_uses_default() {
    let faker = faker_with(vec![TypeDef::structure("Pair")
        .constructor(Constructor::new(vec![Param::new("x", Ty::i32())]).with_body(rejecting))
        .field("x", Ty::i32())
        .field("y", Ty::i32())]);
    let value = faker.generate(&Ty::named("Pair"));
    assert!(value.field("x").and_then(Value::as_i32).is_some());
    assert!(value.field("y").and_then(Value::as_i32).is_some());
}

#[test]
fn constructor_arguments_bind_members_case_insensitively() {
    let faker = faker_with(vec![TypeDef::class("Person")
        .constructor(Constructor::new(vec![Param::new("NAME", Ty::string())]))
        .field("name", Ty::string())
        .field("age", Ty::i32())]);
    let value = faker.generate(&Ty::named("Person"));
    let fields = value.fields().unwrap();
    assert!(fields.contains_key("name"));
    assert!(fields.contains_key("age"));
    assert!(!fields.contains_key("NAME"));
}

#[test]
fn constructor_output_is_not_overwritten() {
    let faker = faker_with(vec![TypeDef::class("Fixed")
        .constructor(Constructor::parameterless().with_body(|_| {
            let mut fields = Fields::new();
            fields.insert("code".into(), Value::I32(-1));
            Ok(fields)
        }))
        .field("code", Ty::i32())]);
    let value = faker.generate(&Ty::named("Fixed"));
    assert_eq!(value.field("code"), Some(&Value::I32(-1)));
}

#[test]
fn constructor_arguments_are_generated_recursively() {
    let faker = faker_with(vec![
        TypeDef::class("Address").field("city", Ty::string()),
        TypeDef::class("Customer")
            .constructor(Constructor::new(vec![Param::new("address", Ty::named("Address"))])),
    ]);
    let value = faker.generate(&Ty::named("Customer"));
    let address = value.field("address").unwrap();
    assert_eq!(address.ty(), Some(Ty::named("Address")));
    assert!(address.field("city").is_some());
}

// ---- Members ----

#[test]
fn read_only_members_are_skipped() {
    let faker = faker_with(vec![TypeDef::class("Row")
        .read_only_field("id", Ty::uuid())
        .field("title", Ty::string())]);
    let value = faker.generate(&Ty::named("Row"));
    assert!(value.field("id").is_none());
    assert!(value.field("title").is_some());
}

#[test]
fn generic_members_are_specialised() {
    let faker = faker_with(vec![TypeDef::class("Holder")
        .params(&["T"])
        .field("item", Ty::param("T"))
        .field("items", Ty::vec(Ty::param("T")))]);
    let ty = Ty::generic("Holder", vec![Ty::bool()]);
    let value = faker.generate(&ty);
    assert_eq!(value.ty(), Some(ty));
    assert!(value.field("item").and_then(Value::as_bool).is_some());
    let items = value.field("items").and_then(Value::items).unwrap();
    assert!(items.iter().all(|v| v.as_bool().is_some()));
}

// ---- Rule sets ----

fn account() -> AutoFaker {
    faker_with(vec![TypeDef::class("Account")
        .field("login", Ty::string())
        .member(Member::new("password", Ty::string()).rule_set("admin"))
        .member(
            Member::new("audit", Ty::string())
                .rule_set("admin")
                .rule_set("ops"),
        )])
}

fn names(value: &Value) -> Vec<&str> {
    value.fields().unwrap().keys().map(String::as_str).collect()
}

#[test]
fn no_rule_sets_populates_everything() {
    let value = account().generate(&Ty::named("Account"));
    assert_eq!(names(&value), vec!["audit", "login", "password"]);
}

#[test]
fn active_rule_set_selects_labelled_members() {
    let faker = account();
    let value = faker.context(Ty::named("Account")).rule_sets(["ops"]).generate();
    assert_eq!(names(&value), vec!["audit"]);
}

#[test]
fn default_rule_set_selects_unlabelled_members() {
    let faker = account();
    let value = faker
        .context(Ty::named("Account"))
        .rule_sets(["default", "admin"])
        .generate();
    assert_eq!(names(&value), vec!["audit", "login", "password"]);

    let value = faker.context(Ty::named("Account")).rule_sets(["default"]).generate();
    assert_eq!(names(&value), vec!["login"]);
}

// ---- Recursion ----

fn node() -> TypeDef {
    TypeDef::class("Node")
        .field("value", Ty::i32())
        .field("next", Ty::named("Node"))
}

#[test]
fn self_referential_type_terminates() {
    let faker = faker_with(vec![node()]);
    let root = faker.generate(&Ty::named("Node"));
    let child = root.field("next").unwrap();
    assert_eq!(child.ty(), Some(Ty::named("Node")));
    assert!(child.field("value").and_then(Value::as_i32).is_some());
    assert!(child.field("next").unwrap().is_null());
}

#[test]
fn recursive_depth_is_configurable() {
    let mut catalog = TypeCatalog::with_prelude();
    catalog.register(node()).unwrap();
    let config = AutoFakerConfig::builder().recursive_depth(1).build().unwrap();
    let faker = AutoFaker::from_shared(config.into(), catalog.into());
    let root = faker.generate(&Ty::named("Node"));
    assert!(root.field("next").unwrap().is_null());
}

#[test]
fn self_referential_list_terminates() {
    let faker = faker_with(vec![TypeDef::class("Tree")
        .field("children", Ty::vec(Ty::named("Tree")))]);
    let root = faker.generate(&Ty::named("Tree"));
    for child in root.field("children").and_then(Value::items).unwrap() {
        for grandchild in child.field("children").and_then(Value::items).unwrap() {
            assert!(grandchild.is_null());
        }
    }
}

#[test]
fn definition_recurring_with_growing_arguments_terminates() {
    let mut catalog = TypeCatalog::with_prelude();
    catalog
        .register(
            TypeDef::class("Node")
                .params(&["T"])
                .field("value", Ty::param("T"))
                .field("next", Ty::generic("Node", vec![Ty::vec(Ty::param("T"))])),
        )
        .unwrap();
    let config = AutoFakerConfig::builder().repeat_count(1).build().unwrap();
    let faker = AutoFaker::from_shared(config.into(), catalog.into());

    let root = faker.generate(&Ty::generic("Node", vec![Ty::i32()]));
    assert!(root.field("value").and_then(Value::as_i32).is_some());
    let child = root.field("next").unwrap();
    assert_eq!(child.ty(), Some(Ty::generic("Node", vec![Ty::vec(Ty::i32())])));
    assert_eq!(child.field("value").and_then(Value::items).map(<[Value]>::len), Some(1));
    assert!(child.field("next").unwrap().is_null());
}

#[test]
fn tree_depth_bounds_nesting() {
    let mut catalog = TypeCatalog::with_prelude();
    catalog
        .register_all([
            TypeDef::class("Inner").field("n", Ty::i32()),
            TypeDef::class("Outer").field("inner", Ty::named("Inner")),
        ])
        .unwrap();
    let config = AutoFakerConfig::builder().tree_depth(1).build().unwrap();
    let faker = AutoFaker::from_shared(config.into(), catalog.into());
    let outer = faker.generate(&Ty::named("Outer"));
    assert!(outer.field("inner").unwrap().is_null());
}

// ---- Unconstructible ----

#[test]
fn abstract_interface_and_unknown_types_are_null() {
    let faker = faker_with(vec![
        TypeDef::abstract_class("Shape").field("area", Ty::f64()),
        TypeDef::interface("Drawable"),
    ]);
    assert!(faker.generate(&Ty::named("Shape")).is_null());
    assert!(faker.generate(&Ty::named("Drawable")).is_null());
    assert!(faker.generate(&Ty::named("Nowhere")).is_null());
}

// ---- Populate ----

#[test]
fn populate_fills_writable_members_in_place() {
    let faker = faker_with(vec![TypeDef::abstract_class("Shape")
        .read_only_field("kind", Ty::string())
        .field("area", Ty::f64())]);
    let mut fields = Fields::new();
    fields.insert("kind".into(), Value::from("circle"));
    let instance = Value::Object {
        ty: Ty::named("Shape"),
        fields,
    };
    let value = faker.populate(&Ty::named("Shape"), instance);
    assert_eq!(value.field("kind").and_then(Value::as_str), Some("circle"));
    assert!(matches!(value.field("area"), Some(Value::F64(_))));
}

#[test]
fn seeded_generation_is_reproducible() {
    let faker = faker_with(vec![TypeDef::class("Card")
        .field("title", Ty::string())
        .field("votes", Ty::vec(Ty::i32()))
        .field("id", Ty::uuid())]);
    let a = faker.generate_seeded(&Ty::named("Card"), 99);
    let b = faker.generate_seeded(&Ty::named("Card"), 99);
    assert_eq!(a, b);
    assert_eq!(a.to_json(), b.to_json());
}
