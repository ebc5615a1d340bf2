use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::def::{Constructor, Member, Param, TypeDef};
use super::{Capability, Ty};
use crate::error::CatalogError;

pub(crate) const HASH_MAP: &str = "HashMap";
pub(crate) const BTREE_MAP: &str = "BTreeMap";
pub(crate) const READ_ONLY_MAP: &str = "ReadOnlyHashMap";
pub(crate) const HASH_SET: &str = "HashSet";
pub(crate) const VEC: &str = "Vec";

/// Upper bound on ancestor-chain walks, guards against malformed catalogs.
const MAX_ANCESTOR_DEPTH: usize = 64;

/// A named definition bound to concrete generic arguments.
#[derive(Debug, Clone)]
pub struct Instance {
    pub def: Arc<TypeDef>,
    pub bindings: HashMap<String, Ty>,
}

impl Instance {
    /// Direct ancestors with this instance's arguments substituted.
    pub fn ancestors(&self) -> Vec<Ty> {
        self.def
            .ancestors
            .iter()
            .map(|a| a.substitute(&self.bindings))
            .collect()
    }

    /// Members with their declared types specialised.
    pub fn members(&self) -> Vec<Member> {
        self.def
            .members
            .iter()
            .map(|m| Member {
                ty: m.ty.substitute(&self.bindings),
                ..m.clone()
            })
            .collect()
    }

    /// Public constructors, widest first, with specialised parameter types.
    pub fn constructors(&self) -> Vec<Constructor> {
        self.def
            .constructors_by_arity()
            .into_iter()
            .map(|c| Constructor {
                params: c
                    .params
                    .iter()
                    .map(|p| Param::new(p.name.clone(), p.ty.substitute(&self.bindings)))
                    .collect(),
                ..c
            })
            .collect()
    }
}

/// Registry of named type definitions: the introspection facility the
/// generators query for constructors, members and ancestors.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    defs: HashMap<String, Arc<TypeDef>>,
}

impl TypeCatalog {
    /// An empty catalog without the built-in collection types.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog pre-populated with `HashMap`, `BTreeMap`, `ReadOnlyHashMap`,
    /// `HashSet` and `Vec`.
    pub fn with_prelude() -> Self {
        let mut catalog = Self::new();
        for def in prelude() {
            catalog
                .defs
                .insert(def.name.clone(), Arc::new(def));
        }
        catalog
    }

    /// Load definitions from a JSON array of [`TypeDef`]s on top of the prelude.
    ///
    /// Constructor bodies cannot be expressed in JSON; loaded constructors
    /// assign their arguments to same-named members.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let defs: Vec<TypeDef> = serde_json::from_str(json).map_err(|e| CatalogError::Parse {
            message: e.to_string(),
        })?;
        let mut catalog = Self::with_prelude();
        for def in defs {
            catalog.register(def)?;
        }
        Ok(catalog)
    }

    /// Add a definition. Names must be unique and every generic parameter used
    /// by an ancestor must be declared.
    pub fn register(&mut self, def: TypeDef) -> Result<(), CatalogError> {
        if self.defs.contains_key(&def.name) {
            return Err(CatalogError::Duplicate { name: def.name });
        }
        for ancestor in &def.ancestors {
            if let Some(param) = undeclared_param(ancestor, &def.params) {
                return Err(CatalogError::UndeclaredParam {
                    name: def.name,
                    param,
                });
            }
        }
        self.defs.insert(def.name.clone(), Arc::new(def));
        Ok(())
    }

    /// Add several definitions, stopping at the first error.
    pub fn register_all<I>(&mut self, defs: I) -> Result<(), CatalogError>
    where
        I: IntoIterator<Item = TypeDef>,
    {
        defs.into_iter().try_for_each(|d| self.register(d))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TypeDef>> {
        self.defs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Bind a named type to its definition.
    ///
    /// An argument list that is empty for a generic definition yields an open
    /// instance whose parameters stay unbound.
    pub fn instantiate(&self, ty: &Ty) -> Option<Instance> {
        let Ty::Named { name, args } = ty else {
            return None;
        };
        let def = self.defs.get(name)?;
        if !args.is_empty() && args.len() != def.params.len() {
            return None;
        }
        let bindings = def
            .params
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect();
        Some(Instance {
            def: Arc::clone(def),
            bindings,
        })
    }

    /// Like [`instantiate`](Self::instantiate) but reports why binding failed.
    pub fn try_instantiate(&self, ty: &Ty) -> Result<Instance, CatalogError> {
        let Ty::Named { name, args } = ty else {
            return Err(CatalogError::NotNamed { ty: ty.to_string() });
        };
        let def = self
            .defs
            .get(name)
            .ok_or_else(|| CatalogError::Unknown { name: name.clone() })?;
        if !args.is_empty() && args.len() != def.params.len() {
            return Err(CatalogError::Arity {
                name: name.clone(),
                expected: def.params.len(),
                received: args.len(),
            });
        }
        self.instantiate(ty)
            .ok_or_else(|| CatalogError::Unknown { name: name.clone() })
    }

    /// Direct ancestors of `ty`, specialised with its arguments.
    pub fn ancestors(&self, ty: &Ty) -> Vec<Ty> {
        self.instantiate(ty)
            .map(|inst| inst.ancestors())
            .unwrap_or_default()
    }

    /// Walk `ty` and its ancestor chain depth-first, returning the first type
    /// for which `visit` yields a result.
    pub fn walk<T, F>(&self, ty: &Ty, mut visit: F) -> Option<T>
    where
        F: FnMut(&Ty) -> Option<T>,
    {
        let mut seen = HashSet::new();
        let mut stack = vec![(ty.clone(), 0usize)];
        while let Some((current, depth)) = stack.pop() {
            if depth > MAX_ANCESTOR_DEPTH || !seen.insert(current.clone()) {
                continue;
            }
            if let Some(found) = visit(&current) {
                return Some(found);
            }
            // Reverse so that the first declared ancestor is visited first.
            for ancestor in self.ancestors(&current).into_iter().rev() {
                stack.push((ancestor, depth + 1));
            }
        }
        None
    }

    /// Arguments of the first occurrence of `capability` in the ancestor
    /// chain of `ty` (including `ty` itself).
    ///
    /// The positions are read from the capability, so a subtype declared as
    /// `Lookup<TValue, TKey>` over `Map<TKey, TValue>` still reports
    /// `[TKey, TValue]`.
    pub fn find_capability(&self, ty: &Ty, capability: Capability) -> Option<Vec<Ty>> {
        self.walk(ty, |t| match t {
            Ty::Capability(c, args) if *c == capability && args.len() == c.arity() => {
                Some(args.clone())
            }
            _ => None,
        })
    }

    pub fn implements(&self, ty: &Ty, capability: Capability) -> bool {
        self.find_capability(ty, capability).is_some()
    }

    /// Key and value types of a read/write map.
    pub fn map_types(&self, ty: &Ty) -> Option<(Ty, Ty)> {
        self.find_capability(ty, Capability::Map).and_then(pair)
    }

    /// Key and value types of a read-only map.
    pub fn read_only_map_types(&self, ty: &Ty) -> Option<(Ty, Ty)> {
        self.find_capability(ty, Capability::ReadOnlyMap)
            .and_then(pair)
    }

    /// Element type for a single-argument capability.
    pub fn element_type(&self, ty: &Ty, capability: Capability) -> Option<Ty> {
        self.find_capability(ty, capability)
            .and_then(|args| args.into_iter().next())
    }

    /// `true` when `ty` or one of its ancestors satisfies `pred`.
    pub fn inherits<F>(&self, ty: &Ty, pred: F) -> bool
    where
        F: Fn(&Ty) -> bool,
    {
        self.walk(ty, |t| pred(t).then_some(())).is_some()
    }

    /// Whether a value of type `from` may be used where `to` is expected.
    pub fn is_assignable(&self, from: &Ty, to: &Ty) -> bool {
        if let Ty::Nullable(inner) = to {
            if self.is_assignable(from, inner) {
                return true;
            }
        }
        self.inherits(from, |t| t == to)
    }

    /// Variants of an enum definition.
    pub fn enum_variants(&self, ty: &Ty) -> Option<Vec<String>> {
        let inst = self.instantiate(ty)?;
        inst.def.variants().map(<[String]>::to_vec)
    }

    /// Whether a container of exactly this type can be created empty.
    pub fn is_default_constructible(&self, ty: &Ty) -> bool {
        self.instantiate(ty).is_some_and(|inst| {
            inst.def.kind.is_concrete() && inst.def.has_parameterless_constructor() && ty.is_closed()
        })
    }

    /// Whether this type can be created through any public constructor.
    pub fn is_constructible(&self, ty: &Ty) -> bool {
        self.instantiate(ty).is_some_and(|inst| {
            inst.def.kind.is_concrete() && inst.def.has_public_constructor() && ty.is_closed()
        })
    }
}

fn pair(args: Vec<Ty>) -> Option<(Ty, Ty)> {
    let mut it = args.into_iter();
    Some((it.next()?, it.next()?))
}

fn undeclared_param(ty: &Ty, declared: &[String]) -> Option<String> {
    match ty {
        Ty::Param(name) if !declared.contains(name) => Some(name.clone()),
        Ty::Param(_) | Ty::Primitive(_) | Ty::Dynamic | Ty::DataTable | Ty::DataSet => None,
        Ty::Array(inner) | Ty::Nullable(inner) => undeclared_param(inner, declared),
        Ty::Capability(_, args) | Ty::Named { args, .. } => {
            args.iter().find_map(|a| undeclared_param(a, declared))
        }
    }
}

fn prelude() -> Vec<TypeDef> {
    let k = || Ty::param("K");
    let v = || Ty::param("V");
    let t = || Ty::param("T");
    vec![
        TypeDef::class(HASH_MAP)
            .params(&["K", "V"])
            .ancestor(Ty::map(k(), v()))
            .ancestor(Ty::read_only_map(k(), v()))
            .default_constructor(),
        TypeDef::class(BTREE_MAP)
            .params(&["K", "V"])
            .ancestor(Ty::map(k(), v()))
            .ancestor(Ty::read_only_map(k(), v()))
            .default_constructor(),
        TypeDef::class(READ_ONLY_MAP)
            .params(&["K", "V"])
            .ancestor(Ty::read_only_map(k(), v()))
            .constructor(Constructor::new(vec![Param::new(
                "entries",
                Ty::map(k(), v()),
            )])),
        TypeDef::class(HASH_SET)
            .params(&["T"])
            .ancestor(Ty::set(t()))
            .ancestor(Ty::collection(t()))
            .ancestor(Ty::sequence(t()))
            .default_constructor(),
        TypeDef::class(VEC)
            .params(&["T"])
            .ancestor(Ty::list(t()))
            .ancestor(Ty::collection(t()))
            .ancestor(Ty::sequence(t()))
            .default_constructor(),
    ]
}
