//! Feature Vector Assembly

use crate::codes::Categorical;
use crate::error::SchemaMismatch;
use crate::input::{ClinicalInput, DiabetesInput, HeartInput};
use crate::schema::{FeatureSchema, ModelKind};
use crate::validator::InputRanges;
use crate::value::FieldMap;
use serde::Serialize;
use tracing::debug;

/// Fixed-order model input row.
///
/// Only the encoder builds these, so the width and column order always
/// match `kind.schema()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    kind: ModelKind,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Model kind this row was encoded for
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Raw values in schema order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Schema this row conforms to
    pub fn schema(&self) -> &'static FeatureSchema {
        self.kind.schema()
    }

    /// Value of a named column
    pub fn get(&self, column: &str) -> Option<f64> {
        self.schema()
            .position(column)
            .and_then(|idx| self.values.get(idx).copied())
    }

    /// (column, value) pairs in schema order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.schema().columns.iter().copied().zip(self.values.iter().copied())
    }

    /// Verify this row fits `schema` before handing it to a model
    pub fn check(&self, schema: &FeatureSchema) -> Result<(), SchemaMismatch> {
        if self.kind != schema.kind {
            return Err(SchemaMismatch::KindMismatch {
                expected: schema.kind,
                actual: self.kind,
            });
        }
        if self.values.len() != schema.width() {
            return Err(SchemaMismatch::WidthMismatch {
                kind: schema.kind,
                expected: schema.width(),
                actual: self.values.len(),
            });
        }
        Ok(())
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn heart_row(input: &HeartInput) -> Vec<f64> {
    vec![
        f64::from(input.age),
        f64::from(input.sex.code()),
        f64::from(input.chest_pain.code()),
        f64::from(input.resting_bp),
        f64::from(input.cholesterol),
        flag(input.fasting_blood_sugar_high),
        f64::from(input.resting_ecg.code()),
        f64::from(input.max_heart_rate),
        flag(input.exercise_angina),
        input.st_depression,
        f64::from(input.st_slope.code()),
        f64::from(input.vessel_count),
        f64::from(input.thalassemia.code()),
    ]
}

fn diabetes_row(input: &DiabetesInput) -> Vec<f64> {
    let mut values = Vec::with_capacity(11);
    values.push(f64::from(input.age));
    values.push(flag(input.hypertension));
    values.push(flag(input.heart_disease));
    values.push(input.bmi);
    values.push(input.hba1c);
    values.push(f64::from(input.glucose));
    values.push(f64::from(input.gender.code()));
    values.extend(input.smoking_history.one_hot());
    values
}

/// Encodes clinical inputs into model rows
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    ranges: InputRanges,
}

impl Encoder {
    /// Create an encoder with the given range limits
    pub fn new(ranges: InputRanges) -> Self {
        Self { ranges }
    }

    /// Range limits in force
    pub fn ranges(&self) -> &InputRanges {
        &self.ranges
    }

    /// Encode named fields for `kind`
    pub fn encode(&self, kind: ModelKind, fields: &FieldMap) -> Result<FeatureVector, SchemaMismatch> {
        let input = ClinicalInput::from_fields(kind, fields)?;
        self.encode_input(&input)
    }

    /// Encode an already typed input
    pub fn encode_input(&self, input: &ClinicalInput) -> Result<FeatureVector, SchemaMismatch> {
        input.validate(&self.ranges)?;

        let (kind, values) = match input {
            ClinicalInput::Heart(heart) => (ModelKind::Heart, heart_row(heart)),
            ClinicalInput::Diabetes(diabetes) => (ModelKind::Diabetes, diabetes_row(diabetes)),
        };
        let vector = FeatureVector { kind, values };
        vector.check(kind.schema())?;

        debug!("Encoded {} input into {} features", kind, vector.len());
        Ok(vector)
    }
}

/// Encode named fields for `kind` using the default ranges
pub fn encode(kind: ModelKind, fields: &FieldMap) -> Result<FeatureVector, SchemaMismatch> {
    Encoder::default().encode(kind, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{ChestPainType, RestingEcg, Sex, SmokingHistory, StSlope, Thalassemia};
    use crate::schema::{DIABETES_COLUMNS, HEART_COLUMNS};
    use crate::value::FieldValue;
    use proptest::prelude::*;

    fn fields(entries: Vec<(&str, FieldValue)>) -> FieldMap {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn heart_fields() -> FieldMap {
        fields(vec![
            ("age", 45.into()),
            ("sex", "Male".into()),
            ("cp", "Typical Angina".into()),
            ("trestbps", 120.into()),
            ("chol", 200.into()),
            ("fbs", "Yes".into()),
            ("restecg", "Left Ventricular Hypertrophy".into()),
            ("thalach", 150.into()),
            ("exang", "No".into()),
            ("oldpeak", 2.3.into()),
            ("slope", "Flat".into()),
            ("ca", 3.into()),
            ("thal", "Reversible Defect".into()),
        ])
    }

    fn diabetes_fields(gender: &str, smoking: &str) -> FieldMap {
        fields(vec![
            ("age", 40.into()),
            ("hypertension", 0.into()),
            ("heart_disease", 1.into()),
            ("bmi", 25.0.into()),
            ("HbA1c_level", 5.5.into()),
            ("blood_glucose_level", 100.into()),
            ("gender", gender.into()),
            ("smoking_history", smoking.into()),
        ])
    }

    #[test]
    fn test_heart_vector_order() {
        let vector = encode(ModelKind::Heart, &heart_fields()).unwrap();
        assert_eq!(vector.kind(), ModelKind::Heart);
        assert_eq!(
            vector.values(),
            &[45.0, 1.0, 0.0, 120.0, 200.0, 1.0, 2.0, 150.0, 0.0, 2.3, 1.0, 3.0, 3.0]
        );
        let names: Vec<&str> = vector.named().map(|(name, _)| name).collect();
        assert_eq!(names, HEART_COLUMNS);
    }

    #[test]
    fn test_diabetes_vector_order() {
        let vector = encode(ModelKind::Diabetes, &diabetes_fields("Male", "former")).unwrap();
        assert_eq!(
            vector.values(),
            &[40.0, 0.0, 1.0, 25.0, 5.5, 100.0, 1.0, 0.0, 1.0, 0.0, 0.0]
        );
        assert_eq!(vector.get("smoking_history_former"), Some(1.0));
        assert_eq!(vector.get("gender_Male"), Some(1.0));
        assert_eq!(vector.named().count(), DIABETES_COLUMNS.len());
    }

    #[test]
    fn test_female_not_current() {
        let vector = encode(ModelKind::Diabetes, &diabetes_fields("Female", "not current")).unwrap();
        assert_eq!(vector.get("gender_Male"), Some(0.0));
        assert_eq!(vector.get("smoking_history_not current"), Some(1.0));
        assert_eq!(vector.get("smoking_history_never"), Some(0.0));
    }

    #[test]
    fn test_missing_field_for_every_required_name() {
        for kind in ModelKind::ALL {
            let full = match kind {
                ModelKind::Heart => heart_fields(),
                ModelKind::Diabetes => diabetes_fields("Male", "never"),
            };
            for spec in kind.input_fields() {
                let mut partial = full.clone();
                partial.remove(spec.name);
                let err = encode(kind, &partial).unwrap_err();
                assert_eq!(
                    err,
                    SchemaMismatch::MissingField {
                        kind,
                        field: spec.name
                    }
                );
            }
        }
    }

    #[test]
    fn test_invalid_smoking_value() {
        let err = encode(ModelKind::Diabetes, &diabetes_fields("Male", "sometimes")).unwrap_err();
        assert!(matches!(
            err,
            SchemaMismatch::InvalidCategory {
                field: "smoking_history",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_sex_value() {
        let mut input = heart_fields();
        input.insert("sex".into(), "Other".into());
        assert!(matches!(
            encode(ModelKind::Heart, &input),
            Err(SchemaMismatch::InvalidCategory { field: "sex", .. })
        ));
    }

    #[test]
    fn test_out_of_range_uses_encoder_ranges() {
        let mut input = heart_fields();
        input.insert("age".into(), 110.into());
        assert!(matches!(
            encode(ModelKind::Heart, &input),
            Err(SchemaMismatch::OutOfRange { field: "age", .. })
        ));

        let relaxed = Encoder::new(InputRanges::unbounded());
        assert!(relaxed.encode(ModelKind::Heart, &input).is_ok());
    }

    #[test]
    fn test_check_rejects_foreign_schema() {
        let vector = encode(ModelKind::Heart, &heart_fields()).unwrap();
        assert_eq!(
            vector.check(ModelKind::Diabetes.schema()),
            Err(SchemaMismatch::KindMismatch {
                expected: ModelKind::Diabetes,
                actual: ModelKind::Heart
            })
        );
        assert!(vector.check(ModelKind::Heart.schema()).is_ok());
    }

    fn any_sex() -> impl Strategy<Value = Sex> {
        prop::sample::select(Sex::ALL.to_vec())
    }

    fn any_smoking() -> impl Strategy<Value = SmokingHistory> {
        prop::sample::select(SmokingHistory::ALL.to_vec())
    }

    prop_compose! {
        fn any_heart()(
            age in 18u32..=100,
            sex in any_sex(),
            cp in prop::sample::select(ChestPainType::ALL.to_vec()),
            trestbps in 80u32..=200,
            chol in 100u32..=600,
            fbs in any::<bool>(),
            restecg in prop::sample::select(RestingEcg::ALL.to_vec()),
            thalach in 60u32..=220,
            exang in any::<bool>(),
            oldpeak in 0.0f64..=6.0,
            slope in prop::sample::select(StSlope::ALL.to_vec()),
            ca in 0u8..=4,
            thal in prop::sample::select(Thalassemia::ALL.to_vec()),
        ) -> HeartInput {
            HeartInput {
                age,
                sex,
                chest_pain: cp,
                resting_bp: trestbps,
                cholesterol: chol,
                fasting_blood_sugar_high: fbs,
                resting_ecg: restecg,
                max_heart_rate: thalach,
                exercise_angina: exang,
                st_depression: oldpeak,
                st_slope: slope,
                vessel_count: ca,
                thalassemia: thal,
            }
        }
    }

    prop_compose! {
        fn any_diabetes()(
            age in 1u32..=120,
            hypertension in any::<bool>(),
            heart_disease in any::<bool>(),
            bmi in 10.0f64..=60.0,
            hba1c in 3.0f64..=15.0,
            glucose in 50u32..=500,
            gender in any_sex(),
            smoking_history in any_smoking(),
        ) -> DiabetesInput {
            DiabetesInput {
                age,
                hypertension,
                heart_disease,
                bmi,
                hba1c,
                glucose,
                gender,
                smoking_history,
            }
        }
    }

    proptest! {
        #[test]
        fn prop_heart_is_thirteen_in_order(input in any_heart()) {
            let vector = Encoder::default()
                .encode_input(&ClinicalInput::Heart(input.clone()))
                .unwrap();
            prop_assert_eq!(vector.len(), 13);
            prop_assert_eq!(vector.values()[0], f64::from(input.age));
            prop_assert_eq!(vector.get("sex").unwrap(), f64::from(input.sex.code()));
            prop_assert_eq!(vector.get("cp").unwrap(), f64::from(input.chest_pain.code()));
            prop_assert_eq!(vector.get("oldpeak").unwrap(), input.st_depression);
            prop_assert_eq!(vector.get("ca").unwrap(), f64::from(input.vessel_count));
            prop_assert_eq!(vector.values()[12], f64::from(input.thalassemia.code()));
        }

        #[test]
        fn prop_diabetes_one_hot(input in any_diabetes()) {
            let vector = Encoder::default()
                .encode_input(&ClinicalInput::Diabetes(input.clone()))
                .unwrap();
            prop_assert_eq!(vector.len(), 11);

            let smoking = &vector.values()[7..];
            prop_assert_eq!(smoking.iter().filter(|v| **v == 1.0).count(), 1);
            prop_assert_eq!(smoking.iter().filter(|v| **v == 0.0).count(), 3);

            let male = vector.get("gender_Male").unwrap();
            prop_assert_eq!(male == 1.0, input.gender == Sex::Male);
        }
    }
}
