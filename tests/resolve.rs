use std::sync::Arc;

use autofake::prelude::*;
use autofake::resolve;

fn catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::with_prelude();
    catalog
        .register_all([
            // Parameters deliberately reversed relative to the map capability.
            TypeDef::class("Lookup")
                .params(&["TValue", "TKey"])
                .ancestor(Ty::map(Ty::param("TKey"), Ty::param("TValue")))
                .default_constructor(),
            TypeDef::class("Registry")
                .params(&["TValue", "TKey"])
                .ancestor(Ty::read_only_map(Ty::param("TKey"), Ty::param("TValue")))
                .default_constructor(),
            TypeDef::class("TagSet")
                .params(&["T"])
                .ancestor(Ty::hash_set(Ty::param("T")))
                .default_constructor(),
            TypeDef::class("Names")
                .ancestor(Ty::vec(Ty::string()))
                .default_constructor(),
            TypeDef::interface("Stream")
                .params(&["T"])
                .ancestor(Ty::sequence(Ty::param("T"))),
            TypeDef::enumeration("Color", &["Red", "Green", "Blue"]),
            TypeDef::class("Point")
                .field("x", Ty::i32())
                .field("y", Ty::i32()),
            TypeDef::class("Orders").ancestor(Ty::DataTable),
            TypeDef::class("Shop").ancestor(Ty::DataSet),
        ])
        .unwrap();
    catalog
}

fn session() -> AutoFaker {
    AutoFaker::new(catalog())
}

fn kind_of(faker: &AutoFaker, ty: Ty) -> GeneratorKind {
    faker.resolve(&ty).kind()
}

// ---- Leaf registry ----

#[test]
fn leaf_generators_are_singletons() {
    let faker = session();
    for &p in Primitive::ALL.iter() {
        let a = faker.resolve(&Ty::primitive(p));
        let b = faker.resolve(&Ty::primitive(p));
        assert!(Arc::ptr_eq(&a, &b), "{} resolved to different instances", p.name());
        assert_eq!(a.kind(), GeneratorKind::Leaf(p));
    }
}

#[test]
fn nullable_primitive_uses_leaf_singleton() {
    let faker = session();
    let plain = faker.resolve(&Ty::i32());
    let nullable = faker.resolve(&Ty::nullable(Ty::i32()));
    assert!(Arc::ptr_eq(&plain, &nullable));
}

#[test]
fn every_primitive_is_registered() {
    let registered = autofake::generators::registered_primitives();
    assert_eq!(registered.len(), Primitive::ALL.len());
}

// ---- Shapes ----

#[test]
fn array_shape() {
    assert_eq!(
        kind_of(&session(), Ty::array(Ty::bool())),
        GeneratorKind::Array(Ty::bool())
    );
}

#[test]
fn nullable_composite_shape() {
    let ty = Ty::nullable(Ty::named("Point"));
    assert_eq!(
        kind_of(&session(), ty),
        GeneratorKind::Nullable(Ty::named("Point"))
    );
}

#[test]
fn dynamic_and_tabular_shapes() {
    let faker = session();
    assert_eq!(kind_of(&faker, Ty::Dynamic), GeneratorKind::Dynamic);
    assert_eq!(kind_of(&faker, Ty::DataTable), GeneratorKind::DataTable);
    assert_eq!(kind_of(&faker, Ty::DataSet), GeneratorKind::DataSet);
    assert_eq!(kind_of(&faker, Ty::named("Orders")), GeneratorKind::DataTable);
    assert_eq!(kind_of(&faker, Ty::named("Shop")), GeneratorKind::DataSet);
}

#[test]
fn map_shapes() {
    let faker = session();
    assert_eq!(
        kind_of(&faker, Ty::hash_map(Ty::string(), Ty::i64())),
        GeneratorKind::Dictionary {
            key: Ty::string(),
            value: Ty::i64()
        }
    );
    assert_eq!(
        kind_of(&faker, Ty::map(Ty::uuid(), Ty::bool())),
        GeneratorKind::Dictionary {
            key: Ty::uuid(),
            value: Ty::bool()
        }
    );
    assert_eq!(
        kind_of(&faker, Ty::read_only_hash_map(Ty::i32(), Ty::string())),
        GeneratorKind::ReadOnlyDictionary {
            key: Ty::i32(),
            value: Ty::string()
        }
    );
}

#[test]
fn collection_shapes() {
    let faker = session();
    assert_eq!(
        kind_of(&faker, Ty::hash_set(Ty::i32())),
        GeneratorKind::Set(Ty::i32())
    );
    assert_eq!(
        kind_of(&faker, Ty::vec(Ty::string())),
        GeneratorKind::List(Ty::string())
    );
    assert_eq!(
        kind_of(&faker, Ty::collection(Ty::string())),
        GeneratorKind::List(Ty::string())
    );
    assert_eq!(
        kind_of(&faker, Ty::sequence(Ty::u32())),
        GeneratorKind::Enumerable(Ty::u32())
    );
    assert_eq!(
        kind_of(&faker, Ty::generic("Stream", vec![Ty::f64()])),
        GeneratorKind::Enumerable(Ty::f64())
    );
}

#[test]
fn enum_and_object_shapes() {
    let faker = session();
    assert_eq!(
        kind_of(&faker, Ty::named("Color")),
        GeneratorKind::Enum(Ty::named("Color"))
    );
    assert_eq!(
        kind_of(&faker, Ty::named("Point")),
        GeneratorKind::Object(Ty::named("Point"))
    );
    assert_eq!(
        kind_of(&faker, Ty::named("Missing")),
        GeneratorKind::Object(Ty::named("Missing"))
    );
}

// ---- Reordered generic parameters ----

#[test]
fn reordered_map_subtype_uses_capability_positions() {
    let faker = session();
    let ty = Ty::generic("Lookup", vec![Ty::string(), Ty::i32()]);
    assert_eq!(
        kind_of(&faker, ty.clone()),
        GeneratorKind::Dictionary {
            key: Ty::i32(),
            value: Ty::string()
        }
    );

    let value = faker.generate(&ty);
    assert_eq!(value.ty(), Some(ty.clone()));
    assert!(faker.catalog().is_assignable(&value.ty().unwrap(), &ty));
    for (k, v) in value.entries().unwrap() {
        assert!(k.as_i32().is_some());
        assert!(v.as_str().is_some());
    }
}

#[test]
fn reordered_read_only_map_subtype() {
    let faker = session();
    let ty = Ty::generic("Registry", vec![Ty::bool(), Ty::uuid()]);
    assert_eq!(
        kind_of(&faker, ty.clone()),
        GeneratorKind::ReadOnlyDictionary {
            key: Ty::uuid(),
            value: Ty::bool()
        }
    );
    let value = faker.generate(&ty);
    assert_eq!(value.ty(), Some(ty));
}

#[test]
fn set_and_list_subtypes_keep_requested_type() {
    let faker = session();
    let tags = Ty::generic("TagSet", vec![Ty::i64()]);
    assert_eq!(kind_of(&faker, tags.clone()), GeneratorKind::Set(Ty::i64()));
    assert_eq!(faker.generate(&tags).ty(), Some(tags));

    let names = Ty::named("Names");
    assert_eq!(kind_of(&faker, names.clone()), GeneratorKind::List(Ty::string()));
    assert_eq!(faker.generate(&names).ty(), Some(names));
}

#[test]
fn interfaces_fall_back_to_canonical_containers() {
    let faker = session();
    let value = faker.generate(&Ty::map(Ty::i32(), Ty::i32()));
    assert_eq!(value.ty(), Some(Ty::hash_map(Ty::i32(), Ty::i32())));

    let value = faker.generate(&Ty::set(Ty::i32()));
    assert_eq!(value.ty(), Some(Ty::hash_set(Ty::i32())));

    let value = faker.generate(&Ty::generic("Stream", vec![Ty::i32()]));
    assert_eq!(value.ty(), Some(Ty::vec(Ty::i32())));
}

// ---- Cache ----

#[test]
fn cache_stores_analysed_shapes() {
    let faker = session();
    assert!(faker.cache().is_empty());
    let ty = Ty::vec(Ty::named("Point"));
    faker.resolve(&ty);
    assert_eq!(faker.cache().get(&ty), Some(resolve::analyze(faker.catalog(), &ty)));

    let before = faker.cache().len();
    faker.resolve(&ty);
    assert_eq!(faker.cache().len(), before);
}

#[test]
fn leaf_lookups_bypass_the_cache() {
    let faker = session();
    faker.resolve(&Ty::string());
    assert!(faker.cache().get(&Ty::string()).is_none());
}

#[test]
fn cache_clear_forces_reanalysis() {
    let faker = session();
    let ty = Ty::named("Point");
    faker.resolve(&ty);
    faker.cache().clear();
    assert!(faker.cache().is_empty());
    assert_eq!(kind_of(&faker, ty.clone()), GeneratorKind::Object(ty));
}
