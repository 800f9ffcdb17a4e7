//! Typed Clinical Inputs

use crate::codes::{ChestPainType, RestingEcg, Sex, SmokingHistory, StSlope, Thalassemia};
use crate::error::SchemaMismatch;
use crate::schema::{ModelKind, VESSEL_COUNTS};
use crate::validator::{check_range, InputRanges};
use crate::value::{FieldMap, FieldReader};
use serde::{Deserialize, Serialize};

/// Heart disease assessment inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartInput {
    pub age: u32,
    pub sex: Sex,
    #[serde(rename = "cp")]
    pub chest_pain: ChestPainType,
    #[serde(rename = "trestbps")]
    pub resting_bp: u32,
    #[serde(rename = "chol")]
    pub cholesterol: u32,
    /// Fasting blood sugar above 120 mg/dl
    #[serde(rename = "fbs")]
    pub fasting_blood_sugar_high: bool,
    #[serde(rename = "restecg")]
    pub resting_ecg: RestingEcg,
    #[serde(rename = "thalach")]
    pub max_heart_rate: u32,
    #[serde(rename = "exang")]
    pub exercise_angina: bool,
    #[serde(rename = "oldpeak")]
    pub st_depression: f64,
    #[serde(rename = "slope")]
    pub st_slope: StSlope,
    /// Major vessels colored by fluoroscopy (0-4)
    #[serde(rename = "ca")]
    pub vessel_count: u8,
    #[serde(rename = "thal")]
    pub thalassemia: Thalassemia,
}

/// Diabetes assessment inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesInput {
    pub age: u32,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub bmi: f64,
    #[serde(rename = "HbA1c_level")]
    pub hba1c: f64,
    #[serde(rename = "blood_glucose_level")]
    pub glucose: u32,
    pub gender: Sex,
    pub smoking_history: SmokingHistory,
}

/// Input for either model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClinicalInput {
    Heart(HeartInput),
    Diabetes(DiabetesInput),
}

fn non_negative(field: &'static str, value: i64) -> Result<u32, SchemaMismatch> {
    u32::try_from(value).map_err(|_| SchemaMismatch::OutOfRange {
        field,
        value: value as f64,
        min: 0.0,
        max: f64::from(u32::MAX),
    })
}

impl HeartInput {
    /// Read heart inputs from named fields
    pub fn from_fields(fields: &FieldMap) -> Result<Self, SchemaMismatch> {
        let reader = FieldReader::new(ModelKind::Heart, fields)?;
        Ok(Self {
            age: non_negative("age", reader.integer("age")?)?,
            sex: reader.category("sex")?,
            chest_pain: reader.category("cp")?,
            resting_bp: non_negative("trestbps", reader.integer("trestbps")?)?,
            cholesterol: non_negative("chol", reader.integer("chol")?)?,
            fasting_blood_sugar_high: reader.flag("fbs")?,
            resting_ecg: reader.category("restecg")?,
            max_heart_rate: non_negative("thalach", reader.integer("thalach")?)?,
            exercise_angina: reader.flag("exang")?,
            st_depression: reader.decimal("oldpeak")?,
            st_slope: reader.category("slope")?,
            vessel_count: reader.choice("ca", VESSEL_COUNTS)? as u8,
            thalassemia: reader.category("thal")?,
        })
    }

    /// Check numeric fields against the configured ranges
    pub fn validate(&self, ranges: &InputRanges) -> Result<(), SchemaMismatch> {
        check_range("age", f64::from(self.age), ranges.heart_age)?;
        check_range("trestbps", f64::from(self.resting_bp), ranges.resting_bp)?;
        check_range("chol", f64::from(self.cholesterol), ranges.cholesterol)?;
        check_range("thalach", f64::from(self.max_heart_rate), ranges.max_heart_rate)?;
        check_range("oldpeak", self.st_depression, ranges.st_depression)?;
        if !VESSEL_COUNTS.contains(&i64::from(self.vessel_count)) {
            return Err(SchemaMismatch::InvalidCategory {
                field: "ca",
                value: self.vessel_count.to_string(),
                allowed: "0, 1, 2, 3, 4".to_string(),
            });
        }
        Ok(())
    }
}

impl DiabetesInput {
    /// Read diabetes inputs from named fields
    pub fn from_fields(fields: &FieldMap) -> Result<Self, SchemaMismatch> {
        let reader = FieldReader::new(ModelKind::Diabetes, fields)?;
        Ok(Self {
            age: non_negative("age", reader.integer("age")?)?,
            hypertension: reader.flag("hypertension")?,
            heart_disease: reader.flag("heart_disease")?,
            bmi: reader.decimal("bmi")?,
            hba1c: reader.decimal("HbA1c_level")?,
            glucose: non_negative("blood_glucose_level", reader.integer("blood_glucose_level")?)?,
            gender: reader.category("gender")?,
            smoking_history: reader.category("smoking_history")?,
        })
    }

    /// Check numeric fields against the configured ranges
    pub fn validate(&self, ranges: &InputRanges) -> Result<(), SchemaMismatch> {
        check_range("age", f64::from(self.age), ranges.diabetes_age)?;
        check_range("bmi", self.bmi, ranges.bmi)?;
        check_range("HbA1c_level", self.hba1c, ranges.hba1c)?;
        check_range("blood_glucose_level", f64::from(self.glucose), ranges.glucose)?;
        Ok(())
    }
}

impl ClinicalInput {
    /// Read the inputs of `kind` from named fields
    pub fn from_fields(kind: ModelKind, fields: &FieldMap) -> Result<Self, SchemaMismatch> {
        match kind {
            ModelKind::Heart => HeartInput::from_fields(fields).map(ClinicalInput::Heart),
            ModelKind::Diabetes => DiabetesInput::from_fields(fields).map(ClinicalInput::Diabetes),
        }
    }

    /// Which model this input is for
    pub fn kind(&self) -> ModelKind {
        match self {
            ClinicalInput::Heart(_) => ModelKind::Heart,
            ClinicalInput::Diabetes(_) => ModelKind::Diabetes,
        }
    }

    /// Check numeric fields against the configured ranges
    pub fn validate(&self, ranges: &InputRanges) -> Result<(), SchemaMismatch> {
        match self {
            ClinicalInput::Heart(input) => input.validate(ranges),
            ClinicalInput::Diabetes(input) => input.validate(ranges),
        }
    }
}

impl From<HeartInput> for ClinicalInput {
    fn from(input: HeartInput) -> Self {
        ClinicalInput::Heart(input)
    }
}

impl From<DiabetesInput> for ClinicalInput {
    fn from(input: DiabetesInput) -> Self {
        ClinicalInput::Diabetes(input)
    }
}
