//! User-supplied generation hooks.
//!
//! An override is consulted before any built-in generator. When one or more
//! overrides match a context, resolution returns an [`OverrideInvoker`] that
//! runs them in registration order over a shared, possibly preinitialized,
//! instance.
//!
//! # Example
//! ```
//! use autofake::{AutoFaker, AutoFakerConfig, FnOverride, Ty, Value};
//!
//! let config = AutoFakerConfig::builder()
//!     .add_override(FnOverride::new(
//!         |ctx| ctx.generate_type() == &Ty::string(),
//!         |octx| {
//!             let upper = octx.instance().and_then(Value::as_str).map(str::to_uppercase);
//!             octx.set_instance(Value::from(upper.unwrap_or_default()));
//!         },
//!     ))
//!     .build()
//!     .unwrap();
//! let faker = AutoFaker::with_config(config);
//! let word = faker.generate(&Ty::string());
//! let text = word.as_str().unwrap();
//! assert_eq!(text, text.to_uppercase());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::context::GenerationContext;
use crate::faker::Faker;
use crate::generators::{Generator, GeneratorKind};
use crate::types::Ty;
use crate::value::Value;

/// A hook that may take over generation for some contexts.
pub trait GeneratorOverride: Send + Sync {
    fn can_override(&self, ctx: &GenerationContext<'_>) -> bool;

    /// Whether the built-in generator should produce a starting instance
    /// before [`generate`](Self::generate) runs.
    fn preinitialize(&self) -> bool {
        true
    }

    fn generate(&self, ctx: &mut OverrideContext<'_, '_>);
}

/// What an override sees: the generation context plus the instance being
/// built.
pub struct OverrideContext<'c, 's> {
    ctx: &'c mut GenerationContext<'s>,
    instance: Option<Value>,
}

impl<'c, 's> OverrideContext<'c, 's> {
    pub fn new(ctx: &'c mut GenerationContext<'s>, instance: Option<Value>) -> Self {
        Self { ctx, instance }
    }

    pub fn instance(&self) -> Option<&Value> {
        self.instance.as_ref()
    }

    pub fn instance_mut(&mut self) -> Option<&mut Value> {
        self.instance.as_mut()
    }

    pub fn set_instance(&mut self, value: Value) {
        self.instance = Some(value);
    }

    pub fn take_instance(&mut self) -> Option<Value> {
        self.instance.take()
    }

    pub fn context(&self) -> &GenerationContext<'s> {
        &*self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GenerationContext<'s> {
        &mut *self.ctx
    }

    pub fn generate_type(&self) -> &Ty {
        self.ctx.generate_type()
    }

    pub fn faker(&mut self) -> &mut Faker {
        self.ctx.faker()
    }

    /// Generate a value for another type with the same context.
    pub fn generate_type_of(&mut self, ty: &Ty) -> Value {
        self.ctx.generate_type_of(ty)
    }

    fn into_instance(self) -> Option<Value> {
        self.instance
    }
}

/// Runs the matched overrides for one context over the output of the
/// built-in generator.
pub struct OverrideInvoker {
    overrides: Vec<Arc<dyn GeneratorOverride>>,
    generator: Arc<dyn Generator>,
}

impl OverrideInvoker {
    pub fn new(overrides: Vec<Arc<dyn GeneratorOverride>>, generator: Arc<dyn Generator>) -> Self {
        Self {
            overrides,
            generator,
        }
    }

    /// The built-in generator for the same type.
    pub fn generator(&self) -> &Arc<dyn Generator> {
        &self.generator
    }
}

impl Generator for OverrideInvoker {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Override(Box::new(self.generator.kind()))
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        let mut instance = ctx.take_instance();
        for o in &self.overrides {
            if o.preinitialize() && instance.as_ref().map_or(true, Value::is_null) {
                let value = self.generator.generate(ctx);
                instance = Some(value);
            }
            let mut octx = OverrideContext::new(ctx, instance.take());
            o.generate(&mut octx);
            instance = octx.into_instance();
        }
        instance.unwrap_or(Value::Null)
    }

    fn overrides(&self) -> Option<&[Arc<dyn GeneratorOverride>]> {
        Some(&self.overrides)
    }
}

impl fmt::Debug for OverrideInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideInvoker")
            .field("overrides", &self.overrides.len())
            .field("generator", &self.generator.kind())
            .finish()
    }
}

type Predicate = Box<dyn Fn(&GenerationContext<'_>) -> bool + Send + Sync>;
type Action = Box<dyn Fn(&mut OverrideContext<'_, '_>) + Send + Sync>;

/// Override from a pair of closures.
pub struct FnOverride {
    predicate: Predicate,
    action: Action,
    preinitialize: bool,
}

impl FnOverride {
    pub fn new<P, A>(predicate: P, action: A) -> Self
    where
        P: Fn(&GenerationContext<'_>) -> bool + Send + Sync + 'static,
        A: Fn(&mut OverrideContext<'_, '_>) + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            action: Box::new(action),
            preinitialize: true,
        }
    }

    /// Start from no instance instead of the built-in generator's output.
    pub fn without_preinitialize(mut self) -> Self {
        self.preinitialize = false;
        self
    }
}

impl GeneratorOverride for FnOverride {
    fn can_override(&self, ctx: &GenerationContext<'_>) -> bool {
        (self.predicate)(ctx)
    }

    fn preinitialize(&self) -> bool {
        self.preinitialize
    }

    fn generate(&self, ctx: &mut OverrideContext<'_, '_>) {
        (self.action)(ctx)
    }
}

/// Override for exactly one type.
pub struct TypeOverride {
    ty: Ty,
    action: Action,
}

impl TypeOverride {
    pub fn new<A>(ty: Ty, action: A) -> Self
    where
        A: Fn(&mut OverrideContext<'_, '_>) + Send + Sync + 'static,
    {
        Self {
            ty,
            action: Box::new(action),
        }
    }

    /// Replace every value of `ty` with a fixed one.
    pub fn constant(ty: Ty, value: Value) -> Self {
        Self::new(ty, move |octx| octx.set_instance(value.clone()))
    }
}

impl GeneratorOverride for TypeOverride {
    fn can_override(&self, ctx: &GenerationContext<'_>) -> bool {
        ctx.generate_type() == &self.ty
    }

    fn generate(&self, ctx: &mut OverrideContext<'_, '_>) {
        (self.action)(ctx)
    }
}
