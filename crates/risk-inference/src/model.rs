//! Model Capability and Outcome Mapping

use crate::PredictionError;
use risk_features::{FeatureSchema, FeatureVector, ModelKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Binary model outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Model label 0
    Negative,
    /// Model label 1
    Positive,
}

impl Outcome {
    /// Interpret a raw model output. Only exactly 0 or 1 is accepted.
    pub fn from_raw(raw: f64) -> Result<Self, PredictionError> {
        if raw == 0.0 {
            Ok(Outcome::Negative)
        } else if raw == 1.0 {
            Ok(Outcome::Positive)
        } else {
            Err(PredictionError::NonBinaryOutput(raw))
        }
    }

    /// Model label (0 or 1)
    pub fn code(&self) -> u8 {
        match self {
            Outcome::Negative => 0,
            Outcome::Positive => 1,
        }
    }

    /// Human-readable risk label for a model kind
    pub fn label(&self, kind: ModelKind) -> &'static str {
        match (kind, self) {
            (ModelKind::Heart, Outcome::Positive) => "High Risk",
            (ModelKind::Heart, Outcome::Negative) => "Low Risk",
            (ModelKind::Diabetes, Outcome::Positive) => "Likely Diabetic",
            (ModelKind::Diabetes, Outcome::Negative) => "Unlikely Diabetic",
        }
    }

    /// Both labels for a kind, positive first
    pub fn labels(kind: ModelKind) -> [&'static str; 2] {
        [Outcome::Positive.label(kind), Outcome::Negative.label(kind)]
    }
}

/// A pre-trained binary classifier.
///
/// Implementations are immutable once loaded; `infer` must not have
/// observable side effects.
pub trait RiskModel: Send + Sync {
    /// Input schema the model was trained on
    fn schema(&self) -> &'static FeatureSchema;

    /// Raw model output for one row in schema order
    fn infer(&self, row: &[f64]) -> Result<f64, PredictionError>;
}

/// Run `model` on `vector`, checking the schema first
pub fn predict<M>(model: &M, vector: &FeatureVector) -> Result<Outcome, PredictionError>
where
    M: RiskModel + ?Sized,
{
    vector.check(model.schema())?;

    let raw = model.infer(vector.values())?;
    let outcome = Outcome::from_raw(raw)?;

    debug!("{} model output {} -> {:?}", vector.kind(), raw, outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_features::{encode, FieldMap, FieldValue, SchemaMismatch};

    struct ConstantModel {
        schema: &'static FeatureSchema,
        output: f64,
    }

    impl RiskModel for ConstantModel {
        fn schema(&self) -> &'static FeatureSchema {
            self.schema
        }

        fn infer(&self, _row: &[f64]) -> Result<f64, PredictionError> {
            Ok(self.output)
        }
    }

    fn diabetes_vector() -> FeatureVector {
        let fields: FieldMap = [
            ("age", FieldValue::from(40)),
            ("hypertension", 0.into()),
            ("heart_disease", 0.into()),
            ("bmi", 25.0.into()),
            ("HbA1c_level", 5.5.into()),
            ("blood_glucose_level", 100.into()),
            ("gender", "Male".into()),
            ("smoking_history", "never".into()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        encode(ModelKind::Diabetes, &fields).unwrap()
    }

    #[test]
    fn test_labels() {
        assert_eq!(Outcome::Positive.label(ModelKind::Heart), "High Risk");
        assert_eq!(Outcome::Negative.label(ModelKind::Heart), "Low Risk");
        assert_eq!(Outcome::Positive.label(ModelKind::Diabetes), "Likely Diabetic");
        assert_eq!(Outcome::Negative.label(ModelKind::Diabetes), "Unlikely Diabetic");
    }

    #[test]
    fn test_binary_outputs() {
        let model = ConstantModel {
            schema: ModelKind::Diabetes.schema(),
            output: 1.0,
        };
        assert_eq!(predict(&model, &diabetes_vector()).unwrap(), Outcome::Positive);

        let model = ConstantModel {
            schema: ModelKind::Diabetes.schema(),
            output: 0.0,
        };
        assert_eq!(predict(&model, &diabetes_vector()).unwrap(), Outcome::Negative);
    }

    #[test]
    fn test_non_binary_output() {
        for output in [0.5, 2.0, -1.0, f64::NAN] {
            let model = ConstantModel {
                schema: ModelKind::Diabetes.schema(),
                output,
            };
            assert!(matches!(
                predict(&model, &diabetes_vector()),
                Err(PredictionError::NonBinaryOutput(_))
            ));
        }
    }

    #[test]
    fn test_schema_checked_before_call() {
        let model = ConstantModel {
            schema: ModelKind::Heart.schema(),
            output: 1.0,
        };
        let err = predict(&model, &diabetes_vector()).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Schema(SchemaMismatch::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_dyn_model() {
        let model: Box<dyn RiskModel> = Box::new(ConstantModel {
            schema: ModelKind::Diabetes.schema(),
            output: 0.0,
        });
        assert_eq!(
            predict(model.as_ref(), &diabetes_vector()).unwrap(),
            Outcome::Negative
        );
    }
}
