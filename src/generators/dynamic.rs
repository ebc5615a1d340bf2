use super::{Generator, GeneratorKind};
use crate::context::GenerationContext;
use crate::types::{Fields, Ty};
use crate::value::Value;

/// Open record. A supplied record keeps its field names and gets a fresh
/// value for each field, generated from the field's current runtime type;
/// nested records are walked the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DynamicGenerator;

impl Generator for DynamicGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Dynamic
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        match ctx.take_instance() {
            Some(Value::Dynamic(fields)) => Value::Dynamic(regenerate(ctx, fields)),
            _ => Value::Dynamic(Fields::new()),
        }
    }
}

fn regenerate(ctx: &mut GenerationContext<'_>, fields: Fields) -> Fields {
    fields
        .into_iter()
        .map(|(name, value)| {
            let fresh = match value {
                Value::Dynamic(nested) => Value::Dynamic(regenerate(ctx, nested)),
                other => match other.ty() {
                    Some(ty) if ty != Ty::Dynamic => ctx.generate_type_of(&ty),
                    _ => other,
                },
            };
            (name, fresh)
        })
        .collect()
}
