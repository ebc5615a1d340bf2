use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::Ty;
use crate::error::ConstructError;
use crate::value::Value;

/// Member values produced by a constructor, keyed by member name.
pub type Fields = BTreeMap<String, Value>;

/// Constructor body: receives generated arguments in declaration order and
/// returns the members it initialised.
pub type ConstructorFn = Arc<dyn Fn(&[Value]) -> Result<Fields, ConstructError> + Send + Sync>;

/// What kind of definition a [`TypeDef`] is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefKind {
    Class,
    Struct,
    Interface,
    Abstract,
    Enum { variants: Vec<String> },
}

impl DefKind {
    /// Interfaces and abstract classes can never be instantiated directly.
    pub fn is_concrete(&self) -> bool {
        !matches!(self, DefKind::Interface | DefKind::Abstract)
    }
}

/// A constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Ty,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A constructor signature with an optional body.
///
/// Without a body, each argument initialises the member with the same name
/// (compared case-insensitively), which is how record-style types behave.
#[derive(Clone, Serialize, Deserialize)]
pub struct Constructor {
    pub params: Vec<Param>,
    #[serde(default = "default_public")]
    pub public: bool,
    #[serde(skip)]
    pub body: Option<ConstructorFn>,
}

fn default_public() -> bool {
    true
}

impl Constructor {
    pub fn new(params: Vec<Param>) -> Self {
        Self {
            params,
            public: true,
            body: None,
        }
    }

    /// A public constructor without parameters.
    pub fn parameterless() -> Self {
        Self::new(Vec::new())
    }

    /// Hide the constructor from the object generator.
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Attach a body that may reject its arguments.
    pub fn with_body<F>(mut self, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Fields, ConstructError> + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Run the constructor against generated arguments.
    pub fn invoke(&self, args: &[Value]) -> Result<Fields, ConstructError> {
        if args.len() != self.params.len() {
            return Err(ConstructError::ArgumentCount {
                expected: self.params.len(),
                received: args.len(),
            });
        }
        match &self.body {
            Some(body) => body(args),
            None => Ok(self
                .params
                .iter()
                .zip(args)
                .map(|(p, v)| (p.name.clone(), v.clone()))
                .collect()),
        }
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .field("public", &self.public)
            .field("body", &self.body.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// A field or property of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub ty: Ty,
    #[serde(default = "default_public")]
    pub writable: bool,
    /// Rule-set labels this member belongs to. Empty means `"default"`.
    #[serde(default)]
    pub rule_sets: Vec<String>,
}

impl Member {
    /// Name of the rule set unlabeled members belong to.
    pub const DEFAULT_RULE_SET: &'static str = "default";

    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
            writable: true,
            rule_sets: Vec::new(),
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn rule_set(mut self, label: impl Into<String>) -> Self {
        self.rule_sets.push(label.into());
        self
    }

    /// Whether the member takes part in generation under `active` rule sets.
    pub fn in_rule_sets(&self, active: &[String]) -> bool {
        if active.is_empty() {
            return true;
        }
        if self.rule_sets.is_empty() {
            return active.iter().any(|r| r == Self::DEFAULT_RULE_SET);
        }
        self.rule_sets.iter().any(|label| active.contains(label))
    }
}

/// A named type definition, the unit of the [`TypeCatalog`](super::TypeCatalog).
///
/// # Example
/// ```
/// use autofake::types::{Constructor, Param, Ty, TypeDef};
///
/// let person = TypeDef::class("Person")
///     .constructor(Constructor::new(vec![Param::new("name", Ty::string())]))
///     .field("name", Ty::string())
///     .field("age", Ty::i32());
/// assert_eq!(person.members.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    pub kind: DefKind,
    #[serde(default)]
    pub params: Vec<String>,
    /// Base class and implemented interfaces, in declaration order.
    #[serde(default)]
    pub ancestors: Vec<Ty>,
    #[serde(default)]
    pub constructors: Vec<Constructor>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, kind: DefKind) -> Self {
        Self {
            name: name.into(),
            kind,
            params: Vec::new(),
            ancestors: Vec::new(),
            constructors: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, DefKind::Class)
    }

    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(name, DefKind::Struct)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, DefKind::Interface)
    }

    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self::new(name, DefKind::Abstract)
    }

    pub fn enumeration(name: impl Into<String>, variants: &[&str]) -> Self {
        Self::new(
            name,
            DefKind::Enum {
                variants: variants.iter().map(|v| v.to_string()).collect(),
            },
        )
    }

    /// Declare generic parameter names, in order.
    pub fn params(mut self, names: &[&str]) -> Self {
        self.params = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn ancestor(mut self, ty: Ty) -> Self {
        self.ancestors.push(ty);
        self
    }

    pub fn constructor(mut self, ctor: Constructor) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Shorthand for a public parameterless constructor.
    pub fn default_constructor(self) -> Self {
        self.constructor(Constructor::parameterless())
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Add a writable member.
    pub fn field(self, name: impl Into<String>, ty: Ty) -> Self {
        self.member(Member::new(name, ty))
    }

    /// Add a member that generation must not overwrite.
    pub fn read_only_field(self, name: impl Into<String>, ty: Ty) -> Self {
        self.member(Member::new(name, ty).read_only())
    }

    pub fn variants(&self) -> Option<&[String]> {
        match &self.kind {
            DefKind::Enum { variants } => Some(variants),
            _ => None,
        }
    }

    /// Concrete definitions that declare no constructor get an implicit
    /// public parameterless one.
    fn has_implicit_constructor(&self) -> bool {
        self.constructors.is_empty() && self.kind.is_concrete()
    }

    pub fn has_parameterless_constructor(&self) -> bool {
        self.has_implicit_constructor()
            || self
                .constructors
                .iter()
                .any(|c| c.public && c.params.is_empty())
    }

    pub fn has_public_constructor(&self) -> bool {
        self.has_implicit_constructor() || self.constructors.iter().any(|c| c.public)
    }

    /// Public constructors, widest first. Ties keep declaration order.
    pub fn constructors_by_arity(&self) -> Vec<Constructor> {
        if self.has_implicit_constructor() {
            return vec![Constructor::parameterless()];
        }
        let mut ctors: Vec<Constructor> = self
            .constructors
            .iter()
            .filter(|c| c.public)
            .cloned()
            .collect();
        ctors.sort_by(|a, b| b.arity().cmp(&a.arity()));
        ctors
    }
}
