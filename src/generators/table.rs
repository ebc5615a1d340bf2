use std::collections::BTreeMap;

use super::{Generator, GeneratorKind};
use crate::context::GenerationContext;
use crate::types::{Member, Ty};
use crate::value::Value;

/// Members of the requested tabular type; plain `DataTable` / `DataSet`
/// have none.
fn schema(ctx: &GenerationContext<'_>) -> Vec<Member> {
    ctx.catalog()
        .instantiate(ctx.generate_type())
        .map(|inst| inst.members())
        .unwrap_or_default()
}

/// Table whose columns are the members of the requested type, filled with
/// `data_table_row_count` generated rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataTableGenerator;

impl Generator for DataTableGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::DataTable
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        let ty = ctx.generate_type().clone();
        let columns = schema(ctx);
        let mut rows = match ctx.take_instance() {
            Some(Value::Table { rows, .. }) => rows,
            _ => Vec::new(),
        };
        let count = ctx.config().data_table_row_count(ctx);
        rows.reserve(count);
        for _ in 0..count {
            let row = columns
                .iter()
                .map(|col| ctx.generate_type_of(&col.ty))
                .collect();
            rows.push(row);
        }
        Value::Table {
            ty,
            columns: columns.into_iter().map(|c| c.name).collect(),
            rows,
        }
    }
}

/// One generated table per table-typed member of the requested data set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataSetGenerator;

impl Generator for DataSetGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::DataSet
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Value {
        let ty = ctx.generate_type().clone();
        let catalog = ctx.catalog();
        let mut tables = BTreeMap::new();
        for member in schema(ctx) {
            if !catalog.inherits(&member.ty, |t| *t == Ty::DataTable) {
                continue;
            }
            let table = ctx.generate_type_of(&member.ty);
            tables.insert(member.name, table);
        }
        Value::DataSet { ty, tables }
    }
}
