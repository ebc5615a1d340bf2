use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Map};
use std::net::IpAddr;
use url::Url;
use uuid::Uuid;

use crate::types::{Primitive, Ty};

/// Named members of an object, dynamic record or data set.
pub type Fields = crate::types::Fields;

/// A generated value.
///
/// Containers and objects remember the type they were built as, so callers
/// can check what the engine produced with [`Value::ty`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Produced for types that cannot be constructed or are cut off by the
    /// recursion guard.
    Null,
    Bool(bool),
    U8(u8),
    I8(i8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Char(char),
    String(String),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
    Duration(TimeDelta),
    Uuid(Uuid),
    IpAddr(IpAddr),
    Url(Url),
    Enum { ty: Ty, variant: String },
    Array { ty: Ty, items: Vec<Value> },
    List { ty: Ty, items: Vec<Value> },
    Set { ty: Ty, items: Vec<Value> },
    Map { ty: Ty, entries: Vec<(Value, Value)> },
    Sequence { ty: Ty, items: Vec<Value> },
    Object { ty: Ty, fields: Fields },
    Dynamic(Fields),
    Table {
        ty: Ty,
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    DataSet { ty: Ty, tables: Fields },
}

impl Value {
    /// Runtime type of the value. `None` for [`Value::Null`].
    pub fn ty(&self) -> Option<Ty> {
        let prim = |p: Primitive| Some(Ty::Primitive(p));
        match self {
            Value::Null => None,
            Value::Bool(_) => prim(Primitive::Bool),
            Value::U8(_) => prim(Primitive::U8),
            Value::I8(_) => prim(Primitive::I8),
            Value::I16(_) => prim(Primitive::I16),
            Value::U16(_) => prim(Primitive::U16),
            Value::I32(_) => prim(Primitive::I32),
            Value::U32(_) => prim(Primitive::U32),
            Value::I64(_) => prim(Primitive::I64),
            Value::U64(_) => prim(Primitive::U64),
            Value::F32(_) => prim(Primitive::F32),
            Value::F64(_) => prim(Primitive::F64),
            Value::Decimal(_) => prim(Primitive::Decimal),
            Value::Char(_) => prim(Primitive::Char),
            Value::String(_) => prim(Primitive::String),
            Value::DateTime(_) => prim(Primitive::DateTime),
            Value::Date(_) => prim(Primitive::Date),
            Value::Time(_) => prim(Primitive::Time),
            Value::Duration(_) => prim(Primitive::Duration),
            Value::Uuid(_) => prim(Primitive::Uuid),
            Value::IpAddr(_) => prim(Primitive::IpAddr),
            Value::Url(_) => prim(Primitive::Url),
            Value::Dynamic(_) => Some(Ty::Dynamic),
            Value::Enum { ty, .. }
            | Value::Array { ty, .. }
            | Value::List { ty, .. }
            | Value::Set { ty, .. }
            | Value::Map { ty, .. }
            | Value::Sequence { ty, .. }
            | Value::Object { ty, .. }
            | Value::Table { ty, .. }
            | Value::DataSet { ty, .. } => Some(ty.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Selected variant of an enum value.
    pub fn as_variant(&self) -> Option<&str> {
        match self {
            Value::Enum { variant, .. } => Some(variant),
            _ => None,
        }
    }

    /// Elements of an array, list, set or sequence.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Array { items, .. }
            | Value::List { items, .. }
            | Value::Set { items, .. }
            | Value::Sequence { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Key/value pairs of a map.
    pub fn entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map { entries, .. } => Some(entries),
            _ => None,
        }
    }

    /// Members of an object or dynamic record.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            Value::Object { fields, .. } | Value::Dynamic(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut Fields> {
        match self {
            Value::Object { fields, .. } | Value::Dynamic(fields) => Some(fields),
            _ => None,
        }
    }

    /// Member of an object or dynamic record by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields().and_then(|f| f.get(name))
    }

    /// Render as JSON. Maps become `[[key, value], ...]` arrays since keys
    /// are not restricted to strings.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => json!(b),
            Value::U8(n) => json!(n),
            Value::I8(n) => json!(n),
            Value::I16(n) => json!(n),
            Value::U16(n) => json!(n),
            Value::I32(n) => json!(n),
            Value::U32(n) => json!(n),
            Value::I64(n) => json!(n),
            Value::U64(n) => json!(n),
            Value::F32(n) => json!(n),
            Value::F64(n) => json!(n),
            Value::Decimal(d) => json!(d.to_string()),
            Value::Char(c) => json!(c.to_string()),
            Value::String(s) => json!(s),
            Value::DateTime(dt) => json!(dt.to_rfc3339()),
            Value::Date(d) => json!(d.format("%Y-%m-%d").to_string()),
            Value::Time(t) => json!(t.format("%H:%M:%S").to_string()),
            Value::Duration(d) => json!(d.num_milliseconds()),
            Value::Uuid(u) => json!(u.to_string()),
            Value::IpAddr(ip) => json!(ip.to_string()),
            Value::Url(u) => json!(u.as_str()),
            Value::Enum { variant, .. } => json!(variant),
            Value::Array { items, .. }
            | Value::List { items, .. }
            | Value::Set { items, .. }
            | Value::Sequence { items, .. } => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map { entries, .. } => serde_json::Value::Array(
                entries
                    .iter()
                    .map(|(k, v)| json!([k.to_json(), v.to_json()]))
                    .collect(),
            ),
            Value::Object { fields, .. }
            | Value::Dynamic(fields)
            | Value::DataSet { tables: fields, .. } => fields_to_json(fields),
            Value::Table { columns, rows, .. } => serde_json::Value::Array(
                rows.iter()
                    .map(|row| {
                        let obj: Map<String, serde_json::Value> = columns
                            .iter()
                            .cloned()
                            .zip(row.iter().map(Value::to_json))
                            .collect();
                        serde_json::Value::Object(obj)
                    })
                    .collect(),
            ),
        }
    }
}

fn fields_to_json(fields: &Fields) -> serde_json::Value {
    serde_json::Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::I32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
