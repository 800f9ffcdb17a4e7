//! Input Range Checking

use crate::error::SchemaMismatch;
use serde::{Deserialize, Serialize};

/// Allowed numeric ranges for clinical inputs (inclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRanges {
    /// Heart model age (years)
    pub heart_age: (f64, f64),
    /// Resting blood pressure (mm Hg)
    pub resting_bp: (f64, f64),
    /// Serum cholesterol (mg/dl)
    pub cholesterol: (f64, f64),
    /// Max heart rate achieved
    pub max_heart_rate: (f64, f64),
    /// Exercise ST depression
    pub st_depression: (f64, f64),
    /// Diabetes model age (years)
    pub diabetes_age: (f64, f64),
    /// Body Mass Index
    pub bmi: (f64, f64),
    /// Glycated hemoglobin level
    pub hba1c: (f64, f64),
    /// Blood glucose (mg/dl)
    pub glucose: (f64, f64),
}

impl Default for InputRanges {
    fn default() -> Self {
        Self {
            heart_age: (18.0, 100.0),
            resting_bp: (80.0, 200.0),
            cholesterol: (100.0, 600.0),
            max_heart_rate: (60.0, 220.0),
            st_depression: (0.0, 6.0),
            diabetes_age: (1.0, 120.0),
            bmi: (10.0, 60.0),
            hba1c: (3.0, 15.0),
            glucose: (50.0, 500.0),
        }
    }
}

impl InputRanges {
    /// Accept any finite value
    pub fn unbounded() -> Self {
        let any = (f64::MIN, f64::MAX);
        Self {
            heart_age: any,
            resting_bp: any,
            cholesterol: any,
            max_heart_rate: any,
            st_depression: any,
            diabetes_age: any,
            bmi: any,
            hba1c: any,
            glucose: any,
        }
    }
}

/// Validate a single value against an inclusive range
pub fn check_range(field: &'static str, value: f64, range: (f64, f64)) -> Result<(), SchemaMismatch> {
    if !value.is_finite() {
        return Err(SchemaMismatch::NotFinite { field });
    }
    if value < range.0 || value > range.1 {
        Err(SchemaMismatch::OutOfRange {
            field,
            value,
            min: range.0,
            max: range.1,
        })
    } else {
        Ok(())
    }
}
