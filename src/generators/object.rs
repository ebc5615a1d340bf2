use std::collections::HashSet;

use tracing::{debug, trace};

use super::{Generator, GeneratorKind};
use crate::context::GenerationContext;
use crate::types::{DefKind, Fields, Instance, Member, Ty};
use crate::value::Value;

/// Builds a named type: constructs it through its widest working public
/// constructor, then fills the remaining writable members.
///
/// Yields `Null` for unknown and non-concrete types, when no constructor
/// accepts its arguments, and when the recursion guard stops expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectGenerator {
    ty: Ty,
}

impl ObjectGenerator {
    pub fn new(ty: Ty) -> Self {
        Self { ty }
    }
}

impl Generator for ObjectGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Object(self.ty.clone())
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        let Some(inst) = ctx.catalog().instantiate(&self.ty) else {
            trace!(ty = %self.ty, "unknown type");
            return Value::Null;
        };
        let supplied = match ctx.take_instance() {
            Some(Value::Object { fields, .. }) => Some(fields),
            _ => None,
        };
        if supplied.is_none() && !inst.def.kind.is_concrete() {
            trace!(ty = %self.ty, "type is not concrete");
            return Value::Null;
        }
        if !ctx.can_expand(&self.ty) {
            trace!(ty = %self.ty, depth = ctx.depth(), "recursion limit reached");
            return Value::Null;
        }

        ctx.enter(&self.ty);
        let value = self.build(ctx, &inst, supplied);
        ctx.leave();
        value
    }
}

impl ObjectGenerator {
    fn build(&self, ctx: &mut GenerationContext<'_>, inst: &Instance, supplied: Option<Fields>) -> Value {
        let members = inst.members();
        let (mut fields, initialised) = match supplied {
            Some(fields) => (fields, HashSet::new()),
            None => match self.construct(ctx, inst, &members) {
                Some(fields) => {
                    let names = fields.keys().cloned().collect();
                    (fields, names)
                }
                None => return Value::Null,
            },
        };

        for member in &members {
            if !member.writable
                || initialised.contains(&member.name)
                || !member.in_rule_sets(ctx.active_rule_sets())
            {
                continue;
            }
            let value = ctx.generate_type_of(&member.ty);
            fields.insert(member.name.clone(), value);
        }

        Value::Object {
            ty: self.ty.clone(),
            fields,
        }
    }

    /// Try public constructors widest first. The first one whose body accepts
    /// the generated arguments wins.
    fn construct(
        &self,
        ctx: &mut GenerationContext<'_>,
        inst: &Instance,
        members: &[Member],
    ) -> Option<Fields> {
        for ctor in inst.constructors() {
            let args: Vec<Value> = ctor
                .params
                .iter()
                .map(|p| ctx.generate_type_of(&p.ty))
                .collect();
            match ctor.invoke(&args) {
                Ok(fields) => return Some(bind_members(fields, members)),
                Err(err) => {
                    debug!(ty = %self.ty, arity = ctor.arity(), error = %err, "constructor failed");
                }
            }
        }
        match inst.def.kind {
            DefKind::Struct => Some(Fields::new()),
            _ => None,
        }
    }
}

/// Rename constructor outputs to the member they initialise, matching names
/// case-insensitively. Unmatched keys are kept as they are.
fn bind_members(fields: Fields, members: &[Member]) -> Fields {
    fields
        .into_iter()
        .map(|(key, value)| {
            let name = members
                .iter()
                .find(|m| m.name.eq_ignore_ascii_case(&key))
                .map_or(key, |m| m.name.clone());
            (name, value)
        })
        .collect()
}
