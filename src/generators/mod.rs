//! Generation strategies.
//!
//! Every strategy implements [`Generator`]. Leaf generators are process-wide
//! singletons; composite and object generators are specialised per element
//! type and described by a [`GeneratorKind`], which is what the resolution
//! cache stores.

mod array;
mod dictionary;
mod dynamic;
mod enumeration;
mod leaf;
mod list;
mod nullable;
mod object;
mod set;
mod table;

pub use array::ArrayGenerator;
pub use dictionary::{DictionaryGenerator, ReadOnlyDictionaryGenerator};
pub use dynamic::DynamicGenerator;
pub use enumeration::EnumGenerator;
pub use leaf::{leaf_generator, registered_primitives, LeafGenerator};
pub(crate) use leaf::lookup;
pub use list::{EnumerableGenerator, ListGenerator};
pub use nullable::NullableGenerator;
pub use object::ObjectGenerator;
pub use set::SetGenerator;
pub use table::{DataSetGenerator, DataTableGenerator};

use std::sync::Arc;

use crate::context::GenerationContext;
use crate::overrides::GeneratorOverride;
use crate::types::{Primitive, Ty};
use crate::value::Value;

/// A strategy producing one value for a type shape.
pub trait Generator: Send + Sync {
    /// Which strategy this is and what it was specialised on.
    fn kind(&self) -> GeneratorKind;

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value;

    /// Matched overrides, for an override invoker.
    fn overrides(&self) -> Option<&[Arc<dyn GeneratorOverride>]> {
        None
    }
}

/// Identity of a generator: its strategy plus the types it is specialised on.
///
/// Two generators with equal kinds behave identically, which is why the
/// resolution cache can store kinds instead of instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    Leaf(Primitive),
    Array(Ty),
    Nullable(Ty),
    Dynamic,
    DataSet,
    DataTable,
    Dictionary { key: Ty, value: Ty },
    ReadOnlyDictionary { key: Ty, value: Ty },
    Set(Ty),
    List(Ty),
    Enumerable(Ty),
    Enum(Ty),
    Object(Ty),
    /// Overrides wrapping the built-in generator of the given kind.
    Override(Box<GeneratorKind>),
}

impl GeneratorKind {
    /// Instantiate the generator this kind describes. Leaf kinds return the
    /// registry singleton.
    ///
    /// Override kinds build their built-in generator only, since overrides are
    /// matched per context and never cached.
    pub fn build(&self) -> Arc<dyn Generator> {
        match self {
            GeneratorKind::Leaf(p) => leaf_generator(*p),
            GeneratorKind::Array(elem) => Arc::new(ArrayGenerator::new(elem.clone())),
            GeneratorKind::Nullable(inner) => Arc::new(NullableGenerator::new(inner.clone())),
            GeneratorKind::Dynamic => Arc::new(DynamicGenerator),
            GeneratorKind::DataSet => Arc::new(DataSetGenerator),
            GeneratorKind::DataTable => Arc::new(DataTableGenerator),
            GeneratorKind::Dictionary { key, value } => {
                Arc::new(DictionaryGenerator::new(key.clone(), value.clone()))
            }
            GeneratorKind::ReadOnlyDictionary { key, value } => {
                Arc::new(ReadOnlyDictionaryGenerator::new(key.clone(), value.clone()))
            }
            GeneratorKind::Set(elem) => Arc::new(SetGenerator::new(elem.clone())),
            GeneratorKind::List(elem) => Arc::new(ListGenerator::new(elem.clone())),
            GeneratorKind::Enumerable(elem) => Arc::new(EnumerableGenerator::new(elem.clone())),
            GeneratorKind::Enum(ty) => Arc::new(EnumGenerator::new(ty.clone())),
            GeneratorKind::Object(ty) => Arc::new(ObjectGenerator::new(ty.clone())),
            GeneratorKind::Override(inner) => inner.build(),
        }
    }
}

/// The requested container type when it can be created empty, otherwise the
/// canonical implementation of the same capability.
pub(crate) fn container_type<F>(ctx: &GenerationContext<'_>, canonical: F) -> Ty
where
    F: FnOnce() -> Ty,
{
    let requested = ctx.generate_type();
    if ctx.catalog().is_default_constructible(requested) {
        requested.clone()
    } else {
        canonical()
    }
}
