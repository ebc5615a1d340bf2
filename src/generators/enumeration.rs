use super::{Generator, GeneratorKind};
use crate::context::GenerationContext;
use crate::types::Ty;
use crate::value::Value;

/// Picks one declared variant uniformly. Enums without variants yield `Null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumGenerator {
    ty: Ty,
}

impl EnumGenerator {
    pub fn new(ty: Ty) -> Self {
        Self { ty }
    }
}

impl Generator for EnumGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Enum(self.ty.clone())
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        let Some(variants) = ctx.catalog().enum_variants(&self.ty) else {
            return Value::Null;
        };
        match ctx.faker().pick(&variants) {
            Some(variant) => Value::Enum {
                ty: self.ty.clone(),
                variant: variant.clone(),
            },
            None => Value::Null,
        }
    }
}
