use super::{container_type, Generator, GeneratorKind};
use crate::context::GenerationContext;
use crate::many::generate_many;
use crate::types::Ty;
use crate::value::Value;

/// Set of distinct `element` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetGenerator {
    element: Ty,
}

impl SetGenerator {
    pub fn new(element: Ty) -> Self {
        Self { element }
    }
}

impl Generator for SetGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Set(self.element.clone())
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        let ty = container_type(ctx, || Ty::hash_set(self.element.clone()));
        let mut items = match ctx.take_instance() {
            Some(Value::Set { items, .. }) => items,
            _ => Vec::new(),
        };
        let existing = items.len();
        let element = &self.element;
        generate_many(ctx, None, &mut items, true, existing, |ctx| {
            ctx.generate_type_of(element)
        });
        Value::Set { ty, items }
    }
}
