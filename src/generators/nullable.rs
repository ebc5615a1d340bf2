use super::{Generator, GeneratorKind};
use crate::context::GenerationContext;
use crate::types::Ty;
use crate::value::Value;

/// Wraps the generator of `inner`; yields `Null` with the configured
/// null probability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullableGenerator {
    inner: Ty,
}

impl NullableGenerator {
    pub fn new(inner: Ty) -> Self {
        Self { inner }
    }
}

impl Generator for NullableGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Nullable(self.inner.clone())
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        let p = ctx.config().null_probability();
        if p > 0.0 && ctx.faker().chance(p) {
            return Value::Null;
        }
        // Keep any supplied instance: it belongs to the inner type.
        let outer = ctx.generate_type().clone();
        ctx.set_generate_type(self.inner.clone());
        let value = ctx.generate();
        ctx.set_generate_type(outer);
        value
    }
}
