//! 从 JSON 请求体构建 `FieldValues`（需要 `json` feature）。
//!
//! 依赖 `serde_json/preserve_order`，对象的 key 顺序即占位符顺序。

use crate::field_values::FieldValues;
use crate::fragment::FragmentError;
use crate::value::SqlValue;
use serde_json::{Map, Value};

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// JSON 值无法表示为 `SqlValue`（数组、对象等非标量）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported JSON value: {kind}")]
pub struct UnsupportedJsonValue {
    pub kind: &'static str,
}

impl TryFrom<Value> for SqlValue {
    type Error = UnsupportedJsonValue;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Null => Ok(SqlValue::Null),
            Value::Bool(b) => Ok(SqlValue::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(SqlValue::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(SqlValue::U64(u))
                } else {
                    n.as_f64()
                        .map(SqlValue::F64)
                        .ok_or(UnsupportedJsonValue { kind: "number" })
                }
            }
            Value::String(s) => Ok(SqlValue::from(s)),
            other => Err(UnsupportedJsonValue {
                kind: json_kind(&other),
            }),
        }
    }
}

impl TryFrom<Map<String, Value>> for FieldValues {
    type Error = FragmentError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut out = FieldValues::with_capacity(map.len());
        for (field, value) in map {
            let value = SqlValue::try_from(value).map_err(|e| FragmentError::UnsupportedValue {
                field: field.clone(),
                kind: e.kind,
            })?;
            out.insert(field, value);
        }
        Ok(out)
    }
}

impl FieldValues {
    /// 把 JSON 对象转换为有序字段值映射。
    ///
    /// 非对象输入返回 [`FragmentError::NotAnObject`]；嵌套的数组/对象返回
    /// [`FragmentError::UnsupportedValue`]。空对象是合法输入，交给构建阶段拒绝。
    pub fn from_json(body: Value) -> Result<Self, FragmentError> {
        match body {
            Value::Object(map) => Self::try_from(map),
            other => Err(FragmentError::NotAnObject {
                kind: json_kind(&other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::field_values::FieldValues;
    use crate::fragment::FragmentError;
    use crate::json::UnsupportedJsonValue;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;
    use serde_json::{Map, Value, json};

    #[test]
    fn object_keeps_key_order() {
        let data = FieldValues::from_json(json!({
            "numEmployees": 10,
            "description": "New Description",
            "logoUrl": null,
        }))
        .unwrap();
        assert_eq!(
            data.keys().collect::<Vec<_>>(),
            vec!["numEmployees", "description", "logoUrl"]
        );
        assert_eq!(
            data.values().cloned().collect::<Vec<_>>(),
            vec![
                SqlValue::I64(10),
                SqlValue::from("New Description"),
                SqlValue::Null
            ]
        );
    }

    #[test]
    fn numbers_pick_narrowest_variant() {
        let data = FieldValues::from_json(json!({
            "a": -3,
            "b": u64::MAX,
            "c": 0.5,
            "d": true,
        }))
        .unwrap();
        assert_eq!(data.get("a"), Some(&SqlValue::I64(-3)));
        assert_eq!(data.get("b"), Some(&SqlValue::U64(u64::MAX)));
        assert_eq!(data.get("c"), Some(&SqlValue::F64(0.5)));
        assert_eq!(data.get("d"), Some(&SqlValue::Bool(true)));
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = FieldValues::from_json(json!([1, 2])).unwrap_err();
        assert_eq!(err, FragmentError::NotAnObject { kind: "array" });
        assert!(err.is_bad_request());
    }

    #[test]
    fn nested_value_is_rejected() {
        let err = FieldValues::from_json(json!({ "handle": "c1", "tags": ["x"] })).unwrap_err();
        assert_eq!(
            err,
            FragmentError::UnsupportedValue {
                field: "tags".to_string(),
                kind: "array"
            }
        );
        assert_eq!(err.to_string(), "unsupported value for field tags: array");
    }

    #[test]
    fn empty_object_is_empty_map() {
        let data = FieldValues::from_json(json!({})).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn scalar_conversion_error_is_typed() {
        let err = SqlValue::try_from(json!({ "a": 1 })).unwrap_err();
        assert_eq!(err, UnsupportedJsonValue { kind: "object" });
        assert_eq!(err.to_string(), "unsupported JSON value: object");
        assert_eq!(SqlValue::try_from(json!("x")), Ok(SqlValue::from("x")));
    }

    #[test]
    fn large_object_keeps_order_and_values() {
        let n = 50_000;
        let mut map = Map::with_capacity(n);
        for i in 0..n {
            map.insert(format!("field{i}"), Value::from(i as i64));
        }
        let data = FieldValues::from_json(Value::Object(map)).unwrap();
        assert_eq!(data.len(), n);
        assert_eq!(data.keys().next(), Some("field0"));
        assert_eq!(data.keys().last(), Some("field49999"));
        assert_eq!(data.get("field1234"), Some(&SqlValue::I64(1234)));
    }
}
