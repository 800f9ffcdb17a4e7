//! Categorical Code Tables
//!
//! Each categorical clinical field is a closed enum with a total mapping to
//! the integer code the models were trained on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed categorical domain with a fixed label and integer code per member
pub trait Categorical: Copy + Sized + 'static {
    /// Every member, in display order
    const ALL: &'static [Self];

    /// Human-readable label (the value shown in the form)
    fn label(&self) -> &'static str;

    /// Integer code fed to the model
    fn code(&self) -> u8;

    /// Look up a member by label, ignoring surrounding whitespace
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.iter().copied().find(|member| member.label() == label)
    }

    /// Look up a member by integer code
    fn from_code(code: i64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| i64::from(member.code()) == code)
    }

    /// Comma separated list of labels, for error messages
    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|member| member.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal = $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Categorical for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            fn code(&self) -> u8 {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl $name {
            /// All labels, in display order
            pub const LABELS: &'static [&'static str] = &[$($label),+];
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

code_table! {
    /// Biological sex (heart `sex`, diabetes `gender`)
    Sex {
        Male => "Male" = 1,
        Female => "Female" = 0,
    }
}

code_table! {
    /// Chest pain type experienced
    ChestPainType {
        TypicalAngina => "Typical Angina" = 0,
        AtypicalAngina => "Atypical Angina" = 1,
        NonAnginalPain => "Non-anginal Pain" = 2,
        Asymptomatic => "Asymptomatic" = 3,
    }
}

code_table! {
    /// Resting electrocardiographic result
    RestingEcg {
        Normal => "Normal" = 0,
        StTWaveAbnormality => "ST-T Wave Abnormality" = 1,
        LeftVentricularHypertrophy => "Left Ventricular Hypertrophy" = 2,
    }
}

code_table! {
    /// Slope of the peak exercise ST segment
    StSlope {
        Upsloping => "Upsloping" = 0,
        Flat => "Flat" = 1,
        Downsloping => "Downsloping" = 2,
    }
}

code_table! {
    /// Thalassemia blood disorder type
    Thalassemia {
        Normal => "Normal" = 1,
        FixedDefect => "Fixed Defect" = 2,
        ReversibleDefect => "Reversible Defect" = 3,
    }
}

code_table! {
    /// Smoking history. The code is the position of the member's one-hot
    /// column in the diabetes schema.
    SmokingHistory {
        Never => "never" = 2,
        Former => "former" = 1,
        Ever => "ever" = 0,
        NotCurrent => "not current" = 3,
    }
}

impl SmokingHistory {
    /// One-hot flags in schema column order: ever, former, never, not current
    pub fn one_hot(&self) -> [f64; 4] {
        let mut flags = [0.0; 4];
        flags[usize::from(self.code())] = 1.0;
        flags
    }
}
