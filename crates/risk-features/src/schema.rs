//! Model Input Schemas
//!
//! The column lists below are the wire contract with the trained model
//! artifacts. Order matters.

use crate::codes::{ChestPainType, RestingEcg, Sex, SmokingHistory, StSlope, Thalassemia};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Heart model columns (13)
pub const HEART_COLUMNS: &[&str] = &[
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// Diabetes model columns (11)
pub const DIABETES_COLUMNS: &[&str] = &[
    "age",
    "hypertension",
    "heart_disease",
    "bmi",
    "HbA1c_level",
    "blood_glucose_level",
    "gender_Male",
    "smoking_history_ever",
    "smoking_history_former",
    "smoking_history_never",
    "smoking_history_not current",
];

/// Which risk model a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelKind {
    Heart,
    Diabetes,
}

/// Unrecognised model kind name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown prediction type: {0:?} (expected Heart or Diabetes)")]
pub struct UnknownKind(pub String);

impl ModelKind {
    /// Every kind, in display order
    pub const ALL: [ModelKind; 2] = [ModelKind::Heart, ModelKind::Diabetes];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Heart => "Heart",
            ModelKind::Diabetes => "Diabetes",
        }
    }

    /// Output schema of the model for this kind
    pub fn schema(&self) -> &'static FeatureSchema {
        match self {
            ModelKind::Heart => &HEART_SCHEMA,
            ModelKind::Diabetes => &DIABETES_SCHEMA,
        }
    }

    /// Input fields a caller supplies for this kind
    pub fn input_fields(&self) -> &'static [FieldSpec] {
        match self {
            ModelKind::Heart => HEART_FIELDS,
            ModelKind::Diabetes => DIABETES_FIELDS,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Named, ordered column list a model was trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureSchema {
    pub kind: ModelKind,
    pub columns: &'static [&'static str],
}

/// Heart model schema
pub static HEART_SCHEMA: FeatureSchema = FeatureSchema {
    kind: ModelKind::Heart,
    columns: HEART_COLUMNS,
};

/// Diabetes model schema
pub static DIABETES_SCHEMA: FeatureSchema = FeatureSchema {
    kind: ModelKind::Diabetes,
    columns: DIABETES_COLUMNS,
};

impl FeatureSchema {
    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column, if present
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// Whether a column list matches this schema exactly (names and order)
    pub fn matches<S: AsRef<str>>(&self, columns: &[S]) -> bool {
        columns.len() == self.columns.len()
            && columns
                .iter()
                .zip(self.columns)
                .all(|(given, expected)| given.as_ref() == *expected)
    }
}

/// Value domain of one input field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldDomain {
    /// Whole number; bounds come from `InputRanges`
    Integer,
    /// Real number; bounds come from `InputRanges`
    Decimal,
    /// Yes / No
    Flag,
    /// One of a fixed set of labels
    Category { labels: &'static [&'static str] },
    /// Whole number drawn from a fixed set
    Choice { values: &'static [i64] },
}

/// Descriptor of one input field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub domain: FieldDomain,
    pub help: &'static str,
}

const fn field(name: &'static str, domain: FieldDomain, help: &'static str) -> FieldSpec {
    FieldSpec { name, domain, help }
}

/// Fluoroscopy vessel counts
pub const VESSEL_COUNTS: &[i64] = &[0, 1, 2, 3, 4];

static HEART_FIELDS: &[FieldSpec] = &[
    field("age", FieldDomain::Integer, "Patient's age in years"),
    field("sex", FieldDomain::Category { labels: Sex::LABELS }, "Biological sex"),
    field(
        "cp",
        FieldDomain::Category { labels: ChestPainType::LABELS },
        "Type of chest pain experienced",
    ),
    field("trestbps", FieldDomain::Integer, "Resting blood pressure (mm Hg)"),
    field("chol", FieldDomain::Integer, "Serum cholesterol level (mg/dl)"),
    field("fbs", FieldDomain::Flag, "Fasting blood sugar > 120 mg/dl"),
    field(
        "restecg",
        FieldDomain::Category { labels: RestingEcg::LABELS },
        "Electrocardiographic results",
    ),
    field("thalach", FieldDomain::Integer, "Maximum heart rate achieved during test"),
    field("exang", FieldDomain::Flag, "Presence of exercise-induced chest pain"),
    field(
        "oldpeak",
        FieldDomain::Decimal,
        "ST depression induced by exercise relative to rest",
    ),
    field(
        "slope",
        FieldDomain::Category { labels: StSlope::LABELS },
        "Slope of peak exercise ST segment",
    ),
    field(
        "ca",
        FieldDomain::Choice { values: VESSEL_COUNTS },
        "Number of major vessels colored by fluoroscopy",
    ),
    field(
        "thal",
        FieldDomain::Category { labels: Thalassemia::LABELS },
        "Type of blood disorder",
    ),
];

static DIABETES_FIELDS: &[FieldSpec] = &[
    field("age", FieldDomain::Integer, "Patient's age in years"),
    field("hypertension", FieldDomain::Flag, "Diagnosed hypertension"),
    field("heart_disease", FieldDomain::Flag, "Diagnosed heart disease"),
    field("bmi", FieldDomain::Decimal, "Body Mass Index"),
    field("HbA1c_level", FieldDomain::Decimal, "Glycated hemoglobin level"),
    field("blood_glucose_level", FieldDomain::Integer, "Blood glucose level in mg/dl"),
    field("gender", FieldDomain::Category { labels: Sex::LABELS }, "Biological sex"),
    field(
        "smoking_history",
        FieldDomain::Category { labels: SmokingHistory::LABELS },
        "Patient's smoking history",
    ),
];
