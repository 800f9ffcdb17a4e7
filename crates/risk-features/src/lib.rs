//! Clinical Feature Encoding
//!
//! Validates clinical form fields and encodes them into the fixed-order
//! numeric rows the heart and diabetes risk models were trained on.

mod codes;
mod encoder;
mod error;
mod input;
mod schema;
mod validator;
mod value;

pub use codes::{Categorical, ChestPainType, RestingEcg, Sex, SmokingHistory, StSlope, Thalassemia};
pub use encoder::{encode, Encoder, FeatureVector};
pub use error::SchemaMismatch;
pub use input::{ClinicalInput, DiabetesInput, HeartInput};
pub use schema::{
    FeatureSchema, FieldDomain, FieldSpec, ModelKind, UnknownKind, DIABETES_COLUMNS,
    DIABETES_SCHEMA, HEART_COLUMNS, HEART_SCHEMA,
};
pub use validator::{check_range, InputRanges};
pub use value::{FieldMap, FieldValue};
