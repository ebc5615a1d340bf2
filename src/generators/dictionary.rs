use super::{container_type, Generator, GeneratorKind};
use crate::context::GenerationContext;
use crate::many::generate_many;
use crate::types::Ty;
use crate::value::Value;

/// Generate `count` new entries on top of `entries`, keys unique.
fn fill_entries(
    ctx: &mut GenerationContext<'_>,
    key: &Ty,
    value: &Ty,
    mut entries: Vec<(Value, Value)>,
) -> Vec<(Value, Value)> {
    let existing = entries.len();
    let mut keys: Vec<Value> = entries.iter().map(|(k, _)| k.clone()).collect();
    generate_many(ctx, None, &mut keys, true, existing, |ctx| {
        ctx.generate_type_of(key)
    });
    for k in keys.into_iter().skip(existing) {
        // A map cannot hold a missing key.
        if k.is_null() {
            continue;
        }
        let v = ctx.generate_type_of(value);
        entries.push((k, v));
    }
    entries
}

/// Entries already present on a supplied map instance.
fn existing_entries(ctx: &mut GenerationContext<'_>) -> Vec<(Value, Value)> {
    match ctx.take_instance() {
        Some(Value::Map { entries, .. }) => entries,
        _ => Vec::new(),
    }
}

/// Read/write map with unique keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryGenerator {
    key: Ty,
    value: Ty,
}

impl DictionaryGenerator {
    pub fn new(key: Ty, value: Ty) -> Self {
        Self { key, value }
    }
}

impl Generator for DictionaryGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Dictionary {
            key: self.key.clone(),
            value: self.value.clone(),
        }
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        let ty = container_type(ctx, || Ty::hash_map(self.key.clone(), self.value.clone()));
        let entries = existing_entries(ctx);
        let entries = fill_entries(ctx, &self.key, &self.value, entries);
        Value::Map { ty, entries }
    }
}

/// Read-only map, built from a generated backing map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyDictionaryGenerator {
    key: Ty,
    value: Ty,
}

impl ReadOnlyDictionaryGenerator {
    pub fn new(key: Ty, value: Ty) -> Self {
        Self { key, value }
    }
}

impl Generator for ReadOnlyDictionaryGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::ReadOnlyDictionary {
            key: self.key.clone(),
            value: self.value.clone(),
        }
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        let requested = ctx.generate_type();
        let ty = if ctx.catalog().is_constructible(requested) {
            requested.clone()
        } else {
            Ty::read_only_hash_map(self.key.clone(), self.value.clone())
        };
        let entries = existing_entries(ctx);
        let entries = fill_entries(ctx, &self.key, &self.value, entries);
        Value::Map { ty, entries }
    }
}
