//! Runtime type descriptors.
//!
//! A [`Ty`] is a type *expression*: a primitive, a wrapper around another
//! type, one of the canonical collection capabilities, or a reference to a
//! named definition in a [`TypeCatalog`] together with its generic arguments.
//! Named definitions ([`TypeDef`]) carry what a reflection API would report:
//! generic parameters, ancestors, constructors and writable members.
//!
//! # Example
//! ```
//! use autofake::types::{Ty, TypeCatalog, TypeDef};
//!
//! let mut catalog = TypeCatalog::with_prelude();
//! catalog
//!     .register(
//!         TypeDef::class("Scores")
//!             .ancestor(Ty::hash_map(Ty::string(), Ty::i32()))
//!             .default_constructor(),
//!     )
//!     .unwrap();
//!
//! let (key, value) = catalog.map_types(&Ty::named("Scores")).unwrap();
//! assert_eq!(key, Ty::string());
//! assert_eq!(value, Ty::i32());
//! ```

mod catalog;
mod def;

pub use catalog::{Instance, TypeCatalog};
pub use def::{ConstructorFn, Constructor, DefKind, Fields, Member, Param, TypeDef};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Directly producible scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Bool,
    U8,
    I8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
    Char,
    String,
    DateTime,
    Date,
    Time,
    Duration,
    Uuid,
    IpAddr,
    Url,
}

impl Primitive {
    /// Every primitive, in registry order.
    pub const ALL: [Primitive; 21] = [
        Primitive::Bool,
        Primitive::U8,
        Primitive::I8,
        Primitive::I16,
        Primitive::U16,
        Primitive::I32,
        Primitive::U32,
        Primitive::I64,
        Primitive::U64,
        Primitive::F32,
        Primitive::F64,
        Primitive::Decimal,
        Primitive::Char,
        Primitive::String,
        Primitive::DateTime,
        Primitive::Date,
        Primitive::Time,
        Primitive::Duration,
        Primitive::Uuid,
        Primitive::IpAddr,
        Primitive::Url,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::U8 => "u8",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::U16 => "u16",
            Primitive::I32 => "i32",
            Primitive::U32 => "u32",
            Primitive::I64 => "i64",
            Primitive::U64 => "u64",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Decimal => "Decimal",
            Primitive::Char => "char",
            Primitive::String => "String",
            Primitive::DateTime => "DateTime",
            Primitive::Date => "Date",
            Primitive::Time => "Time",
            Primitive::Duration => "Duration",
            Primitive::Uuid => "Uuid",
            Primitive::IpAddr => "IpAddr",
            Primitive::Url => "Url",
        }
    }
}

/// Canonical collection interfaces a type can implement.
///
/// Shape matching finds these by walking a type's ancestor chain, so the
/// argument order is always the capability's own: `Map<K, V>`, `Set<T>`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Read/write key → value mapping.
    Map,
    /// Read-only key → value mapping.
    ReadOnlyMap,
    Set,
    List,
    Collection,
    /// Anything that can be iterated.
    Sequence,
}

impl Capability {
    /// Number of generic arguments the capability takes.
    pub fn arity(self) -> usize {
        match self {
            Capability::Map | Capability::ReadOnlyMap => 2,
            _ => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Capability::Map => "Map",
            Capability::ReadOnlyMap => "ReadOnlyMap",
            Capability::Set => "Set",
            Capability::List => "List",
            Capability::Collection => "Collection",
            Capability::Sequence => "Sequence",
        }
    }
}

/// A type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ty {
    Primitive(Primitive),
    /// Fixed-size array of the element type.
    Array(Box<Ty>),
    /// Optional wrapper around a value type.
    Nullable(Box<Ty>),
    /// Expando-like record with fields only known at runtime.
    Dynamic,
    DataTable,
    DataSet,
    /// One of the canonical collection interfaces, e.g. `Map<K, V>`.
    Capability(Capability, Vec<Ty>),
    /// A definition registered in a [`TypeCatalog`].
    Named { name: String, args: Vec<Ty> },
    /// Generic parameter placeholder inside a [`TypeDef`].
    Param(String),
}

impl Ty {
    pub fn primitive(p: Primitive) -> Self {
        Ty::Primitive(p)
    }

    pub fn bool() -> Self {
        Ty::Primitive(Primitive::Bool)
    }

    pub fn i32() -> Self {
        Ty::Primitive(Primitive::I32)
    }

    pub fn i64() -> Self {
        Ty::Primitive(Primitive::I64)
    }

    pub fn u32() -> Self {
        Ty::Primitive(Primitive::U32)
    }

    pub fn f64() -> Self {
        Ty::Primitive(Primitive::F64)
    }

    pub fn string() -> Self {
        Ty::Primitive(Primitive::String)
    }

    pub fn date_time() -> Self {
        Ty::Primitive(Primitive::DateTime)
    }

    pub fn uuid() -> Self {
        Ty::Primitive(Primitive::Uuid)
    }

    pub fn array(element: Ty) -> Self {
        Ty::Array(Box::new(element))
    }

    pub fn nullable(inner: Ty) -> Self {
        Ty::Nullable(Box::new(inner))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Ty::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<Ty>) -> Self {
        Ty::Named {
            name: name.into(),
            args,
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        Ty::Param(name.into())
    }

    /// `Map<K, V>` capability.
    pub fn map(key: Ty, value: Ty) -> Self {
        Ty::Capability(Capability::Map, vec![key, value])
    }

    /// `ReadOnlyMap<K, V>` capability.
    pub fn read_only_map(key: Ty, value: Ty) -> Self {
        Ty::Capability(Capability::ReadOnlyMap, vec![key, value])
    }

    /// `Set<T>` capability.
    pub fn set(element: Ty) -> Self {
        Ty::Capability(Capability::Set, vec![element])
    }

    /// `List<T>` capability.
    pub fn list(element: Ty) -> Self {
        Ty::Capability(Capability::List, vec![element])
    }

    /// `Collection<T>` capability.
    pub fn collection(element: Ty) -> Self {
        Ty::Capability(Capability::Collection, vec![element])
    }

    /// `Sequence<T>` capability.
    pub fn sequence(element: Ty) -> Self {
        Ty::Capability(Capability::Sequence, vec![element])
    }

    /// Prelude `HashMap<K, V>`.
    pub fn hash_map(key: Ty, value: Ty) -> Self {
        Ty::generic(catalog::HASH_MAP, vec![key, value])
    }

    /// Prelude `BTreeMap<K, V>`.
    pub fn btree_map(key: Ty, value: Ty) -> Self {
        Ty::generic(catalog::BTREE_MAP, vec![key, value])
    }

    /// Prelude `ReadOnlyMap<K, V>` concrete wrapper.
    pub fn read_only_hash_map(key: Ty, value: Ty) -> Self {
        Ty::generic(catalog::READ_ONLY_MAP, vec![key, value])
    }

    /// Prelude `HashSet<T>`.
    pub fn hash_set(element: Ty) -> Self {
        Ty::generic(catalog::HASH_SET, vec![element])
    }

    /// Prelude `Vec<T>`.
    pub fn vec(element: Ty) -> Self {
        Ty::generic(catalog::VEC, vec![element])
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Ty::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Strip one level of `Nullable`.
    pub fn unwrap_nullable(&self) -> &Ty {
        match self {
            Ty::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Replace generic parameters using `bindings`. Unbound parameters are
    /// kept as-is.
    pub fn substitute(&self, bindings: &HashMap<String, Ty>) -> Ty {
        match self {
            Ty::Param(name) => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            Ty::Array(inner) => Ty::Array(Box::new(inner.substitute(bindings))),
            Ty::Nullable(inner) => Ty::Nullable(Box::new(inner.substitute(bindings))),
            Ty::Capability(cap, args) => Ty::Capability(
                *cap,
                args.iter().map(|a| a.substitute(bindings)).collect(),
            ),
            Ty::Named { name, args } => Ty::Named {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(bindings)).collect(),
            },
            Ty::Primitive(_) | Ty::Dynamic | Ty::DataTable | Ty::DataSet => self.clone(),
        }
    }

    /// `true` when no generic parameter placeholder remains.
    pub fn is_closed(&self) -> bool {
        match self {
            Ty::Param(_) => false,
            Ty::Array(inner) | Ty::Nullable(inner) => inner.is_closed(),
            Ty::Capability(_, args) | Ty::Named { args, .. } => args.iter().all(Ty::is_closed),
            Ty::Primitive(_) | Ty::Dynamic | Ty::DataTable | Ty::DataSet => true,
        }
    }
}

impl From<Primitive> for Ty {
    fn from(p: Primitive) -> Self {
        Ty::Primitive(p)
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Ty]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    write!(f, "<")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    write!(f, ">")
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Primitive(p) => write!(f, "{}", p.name()),
            Ty::Array(inner) => write!(f, "[{}]", inner),
            Ty::Nullable(inner) => write!(f, "{}?", inner),
            Ty::Dynamic => write!(f, "Dynamic"),
            Ty::DataTable => write!(f, "DataTable"),
            Ty::DataSet => write!(f, "DataSet"),
            Ty::Capability(cap, args) => {
                write!(f, "{}", cap.name())?;
                write_args(f, args)
            }
            Ty::Named { name, args } => {
                write!(f, "{}", name)?;
                write_args(f, args)
            }
            Ty::Param(name) => write!(f, "{}", name),
        }
    }
}
