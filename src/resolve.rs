//! Generator resolution.
//!
//! [`resolve_generator`] picks the generator for the context's current
//! `generate_type`. User overrides come first, then the leaf registry, then
//! shape analysis. Shape analysis results are cached per type as a
//! [`GeneratorKind`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::context::GenerationContext;
use crate::generators::{self, Generator, GeneratorKind};
use crate::overrides::{GeneratorOverride, OverrideInvoker};
use crate::types::{Capability, Ty, TypeCatalog};

/// Analysed shapes, keyed by type. Shared by every context of a session.
#[derive(Debug, Default)]
pub struct GeneratorCache {
    kinds: RwLock<HashMap<Ty, GeneratorKind>>,
}

impl GeneratorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ty: &Ty) -> Option<GeneratorKind> {
        self.kinds.read().get(ty).cloned()
    }

    /// Cached kind for `ty`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&self, ty: &Ty, analyze: F) -> GeneratorKind
    where
        F: FnOnce() -> GeneratorKind,
    {
        if let Some(kind) = self.get(ty) {
            return kind;
        }
        // Analysis runs outside the lock; a racing insert computes the same kind.
        let kind = analyze();
        self.kinds
            .write()
            .entry(ty.clone())
            .or_insert(kind)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.kinds.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.read().is_empty()
    }

    pub fn clear(&self) {
        self.kinds.write().clear();
    }
}

/// The generator for `ctx.generate_type()`.
pub fn resolve_generator(ctx: &GenerationContext<'_>) -> Arc<dyn Generator> {
    let matched: Vec<Arc<dyn GeneratorOverride>> = ctx
        .config()
        .overrides()
        .iter()
        .filter(|o| o.can_override(ctx))
        .cloned()
        .collect();
    let builtin = resolve_builtin(ctx);
    if matched.is_empty() {
        return builtin;
    }
    trace!(ty = %ctx.generate_type(), overrides = matched.len(), "overrides matched");
    Arc::new(OverrideInvoker::new(matched, builtin))
}

/// The generator for `ctx.generate_type()`, ignoring overrides.
pub fn resolve_builtin(ctx: &GenerationContext<'_>) -> Arc<dyn Generator> {
    let ty = ctx.generate_type();
    if let Some(leaf) = generators::lookup(ty) {
        return leaf;
    }
    let catalog = ctx.catalog();
    let kind = ctx
        .cache()
        .get_or_insert_with(ty, || analyze(catalog, ty));
    kind.build()
}

/// Map a type to the strategy that generates it. First match wins.
pub fn analyze(catalog: &TypeCatalog, ty: &Ty) -> GeneratorKind {
    let kind = classify(catalog, ty);
    trace!(ty = %ty, kind = ?kind, "resolved shape");
    kind
}

fn classify(catalog: &TypeCatalog, ty: &Ty) -> GeneratorKind {
    match ty {
        Ty::Primitive(p) => return GeneratorKind::Leaf(*p),
        Ty::Array(elem) => return GeneratorKind::Array((**elem).clone()),
        Ty::Nullable(inner) => {
            return match inner.as_primitive() {
                Some(p) => GeneratorKind::Leaf(p),
                None => GeneratorKind::Nullable((**inner).clone()),
            }
        }
        Ty::Dynamic => return GeneratorKind::Dynamic,
        _ => {}
    }

    if catalog.inherits(ty, |t| *t == Ty::DataSet) {
        return GeneratorKind::DataSet;
    }
    if catalog.inherits(ty, |t| *t == Ty::DataTable) {
        return GeneratorKind::DataTable;
    }
    if let Some((key, value)) = catalog.map_types(ty) {
        return GeneratorKind::Dictionary { key, value };
    }
    if let Some((key, value)) = catalog.read_only_map_types(ty) {
        return GeneratorKind::ReadOnlyDictionary { key, value };
    }
    if let Some(elem) = catalog.element_type(ty, Capability::Set) {
        return GeneratorKind::Set(elem);
    }
    if let Some(elem) = catalog
        .element_type(ty, Capability::List)
        .or_else(|| catalog.element_type(ty, Capability::Collection))
    {
        return GeneratorKind::List(elem);
    }
    if let Some(elem) = catalog.element_type(ty, Capability::Sequence) {
        return GeneratorKind::Enumerable(elem);
    }
    if catalog.enum_variants(ty).is_some() {
        return GeneratorKind::Enum(ty.clone());
    }
    GeneratorKind::Object(ty.clone())
}
