use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use super::{Generator, GeneratorKind};
use crate::context::GenerationContext;
use crate::types::{Primitive, Ty};
use crate::value::Value;

/// Generates one primitive from the context's [`Faker`](crate::Faker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafGenerator {
    primitive: Primitive,
}

impl LeafGenerator {
    pub fn new(primitive: Primitive) -> Self {
        Self { primitive }
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }
}

impl Generator for LeafGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Leaf(self.primitive)
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        // Nullable primitives share the singleton, so the null roll lives here.
        if matches!(ctx.generate_type(), Ty::Nullable(_)) {
            let p = ctx.config().null_probability();
            if p > 0.0 && ctx.faker().chance(p) {
                return Value::Null;
            }
        }
        let f = ctx.faker();
        match self.primitive {
            Primitive::Bool => Value::Bool(f.bool()),
            Primitive::U8 => Value::U8(f.u8()),
            Primitive::I8 => Value::I8(f.i8()),
            Primitive::I16 => Value::I16(f.i16()),
            Primitive::U16 => Value::U16(f.u16()),
            Primitive::I32 => Value::I32(f.i32()),
            Primitive::U32 => Value::U32(f.u32()),
            Primitive::I64 => Value::I64(f.i64()),
            Primitive::U64 => Value::U64(f.u64()),
            Primitive::F32 => Value::F32(f.f32()),
            Primitive::F64 => Value::F64(f.f64()),
            Primitive::Decimal => Value::Decimal(f.decimal()),
            Primitive::Char => Value::Char(f.char()),
            Primitive::String => Value::String(f.word()),
            Primitive::DateTime => Value::DateTime(f.recent(30)),
            Primitive::Date => Value::Date(f.date()),
            Primitive::Time => Value::Time(f.time()),
            Primitive::Duration => Value::Duration(f.duration()),
            Primitive::Uuid => Value::Uuid(f.uuid()),
            Primitive::IpAddr => Value::IpAddr(f.ip_addr()),
            Primitive::Url => f.url().map_or(Value::Null, Value::Url),
        }
    }
}

fn registry() -> &'static HashMap<Primitive, Arc<dyn Generator>> {
    static REGISTRY: OnceLock<HashMap<Primitive, Arc<dyn Generator>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Primitive::ALL
            .iter()
            .map(|&p| (p, Arc::new(LeafGenerator::new(p)) as Arc<dyn Generator>))
            .collect()
    })
}

/// Process-wide generator for `primitive`. Repeated calls return the same
/// `Arc`.
pub fn leaf_generator(primitive: Primitive) -> Arc<dyn Generator> {
    match registry().get(&primitive) {
        Some(generator) => Arc::clone(generator),
        None => Arc::new(LeafGenerator::new(primitive)),
    }
}

/// Primitives with a registered leaf generator.
pub fn registered_primitives() -> Vec<Primitive> {
    let mut prims: Vec<Primitive> = registry().keys().copied().collect();
    prims.sort_by_key(|p| p.name());
    prims
}

/// Registry lookup for a type expression, looking through `Nullable`.
pub(crate) fn lookup(ty: &Ty) -> Option<Arc<dyn Generator>> {
    let primitive = match ty {
        Ty::Nullable(inner) => inner.as_primitive()?,
        other => other.as_primitive()?,
    };
    registry().get(&primitive).cloned()
}
