use super::{container_type, Generator, GeneratorKind};
use crate::context::GenerationContext;
use crate::many::generate_many;
use crate::types::Ty;
use crate::value::Value;

fn fill(ctx: &mut GenerationContext<'_>, element: &Ty, mut items: Vec<Value>) -> Vec<Value> {
    let existing = items.len();
    generate_many(ctx, None, &mut items, false, existing, |ctx| {
        ctx.generate_type_of(element)
    });
    items
}

/// List or collection of `element`. Items may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListGenerator {
    element: Ty,
}

impl ListGenerator {
    pub fn new(element: Ty) -> Self {
        Self { element }
    }
}

impl Generator for ListGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::List(self.element.clone())
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        let ty = container_type(ctx, || Ty::vec(self.element.clone()));
        let items = match ctx.take_instance() {
            Some(Value::List { items, .. }) => items,
            _ => Vec::new(),
        };
        let items = fill(ctx, &self.element, items);
        Value::List { ty, items }
    }
}

/// Plain sequence of `element`, materialised as a `Vec` unless the requested
/// type can be created directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerableGenerator {
    element: Ty,
}

impl EnumerableGenerator {
    pub fn new(element: Ty) -> Self {
        Self { element }
    }
}

impl Generator for EnumerableGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Enumerable(self.element.clone())
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        let ty = container_type(ctx, || Ty::vec(self.element.clone()));
        let items = match ctx.take_instance() {
            Some(Value::Sequence { items, .. }) => items,
            _ => Vec::new(),
        };
        let items = fill(ctx, &self.element, items);
        Value::Sequence { ty, items }
    }
}
