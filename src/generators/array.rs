use super::{Generator, GeneratorKind};
use crate::context::GenerationContext;
use crate::types::Ty;
use crate::value::Value;

/// Fixed-length array of `element`. Items may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayGenerator {
    element: Ty,
}

impl ArrayGenerator {
    pub fn new(element: Ty) -> Self {
        Self { element }
    }
}

impl Generator for ArrayGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Array(self.element.clone())
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        // Length is decided before any element exists.
        let len = ctx.config().repeat_count(ctx);
        let items = ctx.generate_many_of(&self.element, Some(len), false);
        Value::Array {
            ty: Ty::array(self.element.clone()),
            items,
        }
    }
}
