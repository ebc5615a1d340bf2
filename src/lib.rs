//! # autofake — Fake data for arbitrary type graphs
//!
//! `autofake` resolves a generator for any type registered in a
//! [`TypeCatalog`] and fills it recursively: primitives come from a seeded
//! [`Faker`], collections are sized by the configured repeat count, and
//! objects are built through their widest working constructor before their
//! writable members are populated.
//!
//! ## Quick Start
//!
//! ```rust
//! use autofake::prelude::*;
//!
//! let mut catalog = TypeCatalog::with_prelude();
//! catalog
//!     .register(TypeDef::enumeration("Role", &["Admin", "User"]))
//!     .unwrap();
//! catalog
//!     .register(
//!         TypeDef::class("Account")
//!             .field("login", Ty::string())
//!             .field("role", Ty::named("Role"))
//!             .field("scores", Ty::hash_map(Ty::i32(), Ty::string())),
//!     )
//!     .unwrap();
//!
//! let config = AutoFakerConfig::builder().repeat_count(2).build().unwrap();
//! let faker = AutoFaker::from_shared(config.into(), catalog.into());
//!
//! let account = faker.generate(&Ty::named("Account"));
//! assert!(account.field("role").and_then(Value::as_variant).is_some());
//! assert_eq!(account.field("scores").and_then(Value::entries).map(<[_]>::len), Some(2));
//! ```
//!
//! ## Overrides
//!
//! Anything the built-in generators produce can be adjusted or replaced by a
//! [`GeneratorOverride`]; see [`overrides`].

pub mod config;
pub mod context;
pub mod error;
pub mod faker;
pub mod generators;
pub mod many;
pub mod overrides;
pub mod resolve;
pub mod session;
pub mod types;
pub mod value;

pub use config::{AutoFakerConfig, AutoFakerConfigBuilder, CountPolicy, FakerSettings, UniqueBudget};
pub use context::GenerationContext;
pub use error::{CatalogError, ConfigError, ConstructError};
pub use faker::Faker;
pub use generators::{Generator, GeneratorKind};
pub use many::generate_many;
pub use overrides::{FnOverride, GeneratorOverride, OverrideContext, OverrideInvoker, TypeOverride};
pub use resolve::GeneratorCache;
pub use session::AutoFaker;
pub use types::{Capability, Primitive, Ty, TypeCatalog, TypeDef};
pub use value::Value;

// Re-export serde_json for `Value::to_json` users
#[doc(hidden)]
pub use serde_json;

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Create a session with the default configuration over `catalog`.
pub fn session(catalog: TypeCatalog) -> AutoFaker {
    AutoFaker::new(catalog)
}

/// Generate one value of `ty` using only the prelude catalog.
///
/// ```
/// let tags = autofake::generate(&autofake::Ty::vec(autofake::Ty::string()));
/// assert!(matches!(tags.items().map(<[_]>::len), Some(3..=5)));
/// ```
pub fn generate(ty: &Ty) -> Value {
    AutoFaker::default().generate(ty)
}

/// Prelude — import everything you need.
pub mod prelude {
    pub use crate::config::{AutoFakerConfig, CountPolicy, FakerSettings, UniqueBudget};
    pub use crate::context::GenerationContext;
    pub use crate::error::{CatalogError, ConfigError, ConstructError};
    pub use crate::faker::Faker;
    pub use crate::generators::{Generator, GeneratorKind};
    pub use crate::overrides::{FnOverride, GeneratorOverride, OverrideContext, TypeOverride};
    pub use crate::session::AutoFaker;
    pub use crate::types::{
        Capability, Constructor, DefKind, Fields, Member, Param, Primitive, Ty, TypeCatalog,
        TypeDef,
    };
    pub use crate::value::Value;
}
