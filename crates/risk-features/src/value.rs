//! Loosely Typed Field Values
//!
//! Callers without the typed inputs (HTTP bodies, test harnesses) hand over
//! a name → value map. `FieldReader` turns it into typed values or a
//! `SchemaMismatch`.

use crate::codes::Categorical;
use crate::error::SchemaMismatch;
use crate::schema::ModelKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field value as received from the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Named clinical fields
pub type FieldMap = BTreeMap<String, FieldValue>;

impl FieldValue {
    fn describe(&self) -> String {
        match self {
            FieldValue::Bool(b) => format!("boolean {}", b),
            FieldValue::Int(i) => format!("integer {}", i),
            FieldValue::Float(f) => format!("number {}", f),
            FieldValue::Text(s) => format!("text {:?}", s),
        }
    }

    fn render(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Typed access to a `FieldMap` for one model kind
pub(crate) struct FieldReader<'a> {
    kind: ModelKind,
    fields: &'a FieldMap,
}

impl<'a> FieldReader<'a> {
    /// Create a reader, rejecting names outside the kind's input catalog
    pub(crate) fn new(kind: ModelKind, fields: &'a FieldMap) -> Result<Self, SchemaMismatch> {
        let catalog = kind.input_fields();
        if let Some(unknown) = fields
            .keys()
            .find(|name| !catalog.iter().any(|spec| spec.name == name.as_str()))
        {
            return Err(SchemaMismatch::UnknownField {
                kind,
                field: unknown.clone(),
            });
        }
        Ok(Self { kind, fields })
    }

    fn get(&self, field: &'static str) -> Result<&'a FieldValue, SchemaMismatch> {
        self.fields
            .get(field)
            .ok_or(SchemaMismatch::MissingField {
                kind: self.kind,
                field,
            })
    }

    /// Read a whole number
    pub(crate) fn integer(&self, field: &'static str) -> Result<i64, SchemaMismatch> {
        match self.get(field)? {
            FieldValue::Int(i) => Ok(*i),
            FieldValue::Float(f) if !f.is_finite() => Err(SchemaMismatch::NotFinite { field }),
            FieldValue::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(*f as i64),
            other => Err(SchemaMismatch::WrongType {
                field,
                expected: "whole number",
                actual: other.describe(),
            }),
        }
    }

    /// Read a real number
    pub(crate) fn decimal(&self, field: &'static str) -> Result<f64, SchemaMismatch> {
        match self.get(field)? {
            FieldValue::Int(i) => Ok(*i as f64),
            FieldValue::Float(f) if f.is_finite() => Ok(*f),
            FieldValue::Float(_) => Err(SchemaMismatch::NotFinite { field }),
            other => Err(SchemaMismatch::WrongType {
                field,
                expected: "number",
                actual: other.describe(),
            }),
        }
    }

    /// Read a yes/no flag: `true`/`false`, `1`/`0` or `"Yes"`/`"No"`
    pub(crate) fn flag(&self, field: &'static str) -> Result<bool, SchemaMismatch> {
        let value = self.get(field)?;
        match value {
            FieldValue::Bool(b) => Ok(*b),
            FieldValue::Int(0) => Ok(false),
            FieldValue::Int(1) => Ok(true),
            FieldValue::Text(s) if s.trim().eq_ignore_ascii_case("yes") => Ok(true),
            FieldValue::Text(s) if s.trim().eq_ignore_ascii_case("no") => Ok(false),
            FieldValue::Float(_) => Err(SchemaMismatch::WrongType {
                field,
                expected: "Yes/No",
                actual: value.describe(),
            }),
            _ => Err(SchemaMismatch::InvalidCategory {
                field,
                value: value.render(),
                allowed: "Yes, No".to_string(),
            }),
        }
    }

    /// Read a categorical value given either as its label or its code
    pub(crate) fn category<T: Categorical>(&self, field: &'static str) -> Result<T, SchemaMismatch> {
        let value = self.get(field)?;
        let found = match value {
            FieldValue::Text(label) => T::from_label(label),
            FieldValue::Int(code) => T::from_code(*code),
            _ => {
                return Err(SchemaMismatch::WrongType {
                    field,
                    expected: "label",
                    actual: value.describe(),
                })
            }
        };
        found.ok_or_else(|| SchemaMismatch::InvalidCategory {
            field,
            value: value.render(),
            allowed: T::allowed(),
        })
    }

    /// Read a whole number restricted to a fixed set
    pub(crate) fn choice(&self, field: &'static str, values: &[i64]) -> Result<i64, SchemaMismatch> {
        let value = self.integer(field)?;
        if values.contains(&value) {
            Ok(value)
        } else {
            Err(SchemaMismatch::InvalidCategory {
                field,
                value: value.to_string(),
                allowed: values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::ChestPainType;

    fn map(entries: &[(&str, FieldValue)]) -> FieldMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_untagged_json() {
        let fields: FieldMap =
            serde_json::from_str(r#"{"age": 45, "oldpeak": 1.5, "sex": "Male", "fbs": true}"#)
                .unwrap();
        assert_eq!(fields["age"], FieldValue::Int(45));
        assert_eq!(fields["oldpeak"], FieldValue::Float(1.5));
        assert_eq!(fields["sex"], FieldValue::Text("Male".into()));
        assert_eq!(fields["fbs"], FieldValue::Bool(true));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let fields = map(&[("weight", 80.into())]);
        let err = FieldReader::new(ModelKind::Heart, &fields).err().unwrap();
        assert!(matches!(err, SchemaMismatch::UnknownField { .. }));
    }

    #[test]
    fn test_integer_accepts_whole_floats() {
        let fields = map(&[("age", 45.0.into()), ("chol", 200.5.into())]);
        let reader = FieldReader::new(ModelKind::Heart, &fields).unwrap();
        assert_eq!(reader.integer("age").unwrap(), 45);
        assert!(matches!(
            reader.integer("chol"),
            Err(SchemaMismatch::WrongType { field: "chol", .. })
        ));
    }

    #[test]
    fn test_missing_field() {
        let fields = FieldMap::new();
        let reader = FieldReader::new(ModelKind::Heart, &fields).unwrap();
        assert_eq!(
            reader.integer("age"),
            Err(SchemaMismatch::MissingField {
                kind: ModelKind::Heart,
                field: "age"
            })
        );
    }

    #[test]
    fn test_flag_forms() {
        let fields = map(&[("fbs", "Yes".into()), ("exang", 0.into())]);
        let reader = FieldReader::new(ModelKind::Heart, &fields).unwrap();
        assert!(reader.flag("fbs").unwrap());
        assert!(!reader.flag("exang").unwrap());

        let fields = map(&[("hypertension", "maybe".into()), ("heart_disease", 2.into())]);
        let reader = FieldReader::new(ModelKind::Diabetes, &fields).unwrap();
        assert!(matches!(
            reader.flag("hypertension"),
            Err(SchemaMismatch::InvalidCategory { .. })
        ));
        assert!(matches!(
            reader.flag("heart_disease"),
            Err(SchemaMismatch::InvalidCategory { .. })
        ));
    }

    #[test]
    fn test_category_by_label_or_code() {
        let fields = map(&[("cp", "Asymptomatic".into())]);
        let reader = FieldReader::new(ModelKind::Heart, &fields).unwrap();
        assert_eq!(
            reader.category::<ChestPainType>("cp").unwrap(),
            ChestPainType::Asymptomatic
        );

        let fields = map(&[("cp", 1.into())]);
        let reader = FieldReader::new(ModelKind::Heart, &fields).unwrap();
        assert_eq!(
            reader.category::<ChestPainType>("cp").unwrap(),
            ChestPainType::AtypicalAngina
        );

        let fields = map(&[("cp", "Sharp".into())]);
        let reader = FieldReader::new(ModelKind::Heart, &fields).unwrap();
        assert!(matches!(
            reader.category::<ChestPainType>("cp"),
            Err(SchemaMismatch::InvalidCategory { field: "cp", .. })
        ));
    }

    #[test]
    fn test_choice() {
        let fields = map(&[("ca", 5.into())]);
        let reader = FieldReader::new(ModelKind::Heart, &fields).unwrap();
        assert!(reader.choice("ca", &[0, 1, 2, 3, 4]).is_err());
    }
}
