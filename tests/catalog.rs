use autofake::prelude::*;

fn base_catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::with_prelude();
    catalog
        .register_all([
            TypeDef::abstract_class("Animal").field("name", Ty::string()),
            TypeDef::interface("Pet"),
            TypeDef::class("Dog")
                .ancestor(Ty::named("Animal"))
                .ancestor(Ty::named("Pet"))
                .default_constructor(),
            TypeDef::class("Kennel")
                .params(&["T"])
                .ancestor(Ty::vec(Ty::param("T")))
                .constructor(Constructor::new(vec![Param::new("size", Ty::i32())])),
        ])
        .unwrap();
    catalog
}

// ---- Registration ----

#[test]
fn prelude_contains_canonical_containers() {
    let catalog = TypeCatalog::with_prelude();
    for name in ["HashMap", "BTreeMap", "ReadOnlyHashMap", "HashSet", "Vec"] {
        assert!(catalog.contains(name), "{name} missing");
    }
    assert_eq!(catalog.len(), 5);
    assert!(TypeCatalog::new().is_empty());
}

#[test]
fn prelude_maps_are_maps_but_not_sequences() {
    let catalog = TypeCatalog::with_prelude();
    for name in ["HashMap", "BTreeMap"] {
        let ty = Ty::generic(name, vec![Ty::string(), Ty::i32()]);
        assert!(catalog.implements(&ty, Capability::Map), "{name}");
        assert!(catalog.implements(&ty, Capability::ReadOnlyMap), "{name}");
        assert!(!catalog.implements(&ty, Capability::Sequence), "{name}");
        assert_eq!(catalog.map_types(&ty), Some((Ty::string(), Ty::i32())));
    }
}

#[test]
fn duplicate_registration_fails() {
    let mut catalog = base_catalog();
    let err = catalog.register(TypeDef::class("Dog")).unwrap_err();
    assert_eq!(err, CatalogError::Duplicate { name: "Dog".into() });
    assert_eq!(err.to_string(), "type 'Dog' is already registered");
}

#[test]
fn undeclared_parameter_fails() {
    let mut catalog = TypeCatalog::new();
    let err = catalog
        .register(TypeDef::class("Bag").ancestor(Ty::list(Ty::param("T"))))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "type 'Bag' uses undeclared generic parameter 'T'"
    );
}

#[test]
fn try_instantiate_reports_problems() {
    let catalog = base_catalog();
    assert_eq!(
        catalog.try_instantiate(&Ty::named("Ghost")).unwrap_err().to_string(),
        "type 'Ghost' is not registered"
    );
    assert_eq!(
        catalog
            .try_instantiate(&Ty::generic("Vec", vec![Ty::i32(), Ty::i32()]))
            .unwrap_err()
            .to_string(),
        "type 'Vec' takes 1 generic arguments, received 2"
    );
    assert_eq!(
        catalog.try_instantiate(&Ty::i32()).unwrap_err().to_string(),
        "'i32' is not a named type"
    );
    let inst = catalog
        .try_instantiate(&Ty::generic("Kennel", vec![Ty::named("Dog")]))
        .unwrap();
    assert_eq!(inst.ancestors(), vec![Ty::vec(Ty::named("Dog"))]);
}

// ---- Introspection ----

#[test]
fn assignability_follows_ancestors() {
    let catalog = base_catalog();
    let dog = Ty::named("Dog");
    assert!(catalog.is_assignable(&dog, &dog));
    assert!(catalog.is_assignable(&dog, &Ty::named("Animal")));
    assert!(catalog.is_assignable(&dog, &Ty::named("Pet")));
    assert!(catalog.is_assignable(&dog, &Ty::nullable(Ty::named("Pet"))));
    assert!(!catalog.is_assignable(&Ty::named("Animal"), &dog));
}

#[test]
fn generic_ancestors_are_substituted() {
    let catalog = base_catalog();
    let kennel = Ty::generic("Kennel", vec![Ty::string()]);
    assert_eq!(
        catalog.element_type(&kennel, Capability::List),
        Some(Ty::string())
    );
    assert_eq!(
        catalog.element_type(&kennel, Capability::Sequence),
        Some(Ty::string())
    );
    assert!(catalog.implements(&kennel, Capability::Collection));
    assert!(!catalog.implements(&kennel, Capability::Set));
}

#[test]
fn constructibility() {
    let catalog = base_catalog();
    assert!(catalog.is_default_constructible(&Ty::named("Dog")));
    assert!(!catalog.is_default_constructible(&Ty::named("Animal")));
    assert!(!catalog.is_default_constructible(&Ty::named("Pet")));

    let kennel = Ty::generic("Kennel", vec![Ty::i32()]);
    assert!(!catalog.is_default_constructible(&kennel));
    assert!(catalog.is_constructible(&kennel));

    // Open generic types cannot be created.
    assert!(!catalog.is_default_constructible(&Ty::generic("Vec", vec![Ty::param("T")])));
}

#[test]
fn implicit_constructor_for_concrete_types() {
    let mut catalog = TypeCatalog::new();
    catalog.register(TypeDef::class("Plain")).unwrap();
    catalog.register(TypeDef::abstract_class("Base")).unwrap();
    assert!(catalog.is_default_constructible(&Ty::named("Plain")));
    assert!(!catalog.is_constructible(&Ty::named("Base")));
}

#[test]
fn constructors_sorted_by_arity() {
    let def = TypeDef::class("Multi")
        .constructor(Constructor::parameterless())
        .constructor(Constructor::new(vec![
            Param::new("a", Ty::i32()),
            Param::new("b", Ty::i32()),
        ]))
        .constructor(Constructor::new(vec![Param::new("c", Ty::i32())]))
        .constructor(
            Constructor::new(vec![
                Param::new("d", Ty::i32()),
                Param::new("e", Ty::i32()),
                Param::new("f", Ty::i32()),
            ])
            .private(),
        );
    let arities: Vec<usize> = def.constructors_by_arity().iter().map(|c| c.arity()).collect();
    assert_eq!(arities, vec![2, 1, 0]);
}

#[test]
fn constructor_checks_argument_count() {
    let ctor = Constructor::new(vec![Param::new("a", Ty::i32())]);
    let err = ctor.invoke(&[]).unwrap_err();
    assert_eq!(err.to_string(), "constructor takes 1 arguments, received 0");
    let fields = ctor.invoke(&[Value::I32(3)]).unwrap();
    assert_eq!(fields.get("a"), Some(&Value::I32(3)));
}

// ---- JSON ----

const CATALOG_JSON: &str = r#"[
    {
        "name": "Point",
        "kind": "struct",
        "members": [
            { "name": "x", "ty": { "primitive": "i32" } },
            { "name": "y", "ty": { "primitive": "i32" }, "rule_sets": ["geo"] }
        ]
    },
    {
        "name": "Level",
        "kind": { "enum": { "variants": ["Low", "High"] } }
    },
    {
        "name": "Path",
        "kind": "class",
        "ancestors": [
            { "named": { "name": "Vec", "args": [ { "named": { "name": "Point", "args": [] } } ] } }
        ],
        "constructors": [ { "params": [] } ]
    }
]"#;

#[test]
fn catalog_loads_from_json() {
    let catalog = TypeCatalog::from_json(CATALOG_JSON).unwrap();
    assert!(catalog.contains("Vec"));
    assert_eq!(
        catalog.enum_variants(&Ty::named("Level")),
        Some(vec!["Low".to_string(), "High".to_string()])
    );
    assert_eq!(
        catalog.element_type(&Ty::named("Path"), Capability::List),
        Some(Ty::named("Point"))
    );
    let point = catalog.get("Point").unwrap();
    assert_eq!(point.members[1].rule_sets, vec!["geo".to_string()]);
    assert!(point.members[0].writable);
}

#[test]
fn json_catalog_drives_generation() {
    let faker = AutoFaker::new(TypeCatalog::from_json(CATALOG_JSON).unwrap());
    let path = faker.generate(&Ty::named("Path"));
    assert_eq!(path.ty(), Some(Ty::named("Path")));
    for point in path.items().unwrap() {
        assert!(point.field("x").and_then(Value::as_i32).is_some());
    }
}

#[test]
fn invalid_json_is_reported() {
    let err = TypeCatalog::from_json("{").unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
    assert!(err.to_string().starts_with("invalid catalog JSON: "));
}
