use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MedreportError;

pub const AGE_RANGE: RangeInclusive<i64> = 0..=120;
pub const HEIGHT_CM_RANGE: RangeInclusive<i64> = 50..=250;
pub const WEIGHT_KG_RANGE: RangeInclusive<i64> = 10..=300;

pub const DEFAULT_AGE: u32 = 25;
pub const DEFAULT_HEIGHT_CM: u32 = 170;
pub const DEFAULT_WEIGHT_KG: u32 = 70;

pub const DEFAULT_ALLERGIES: &str = "None";
pub const DEFAULT_SYMPTOMS: &str = "e.g., fever for 3 days, sharp pain in lower right abdomen";
pub const DEFAULT_MEDICAL_HISTORY: &str = "e.g., diabetes type 2 diagnosed 2018, hypertension";
pub const DEFAULT_MEDICATIONS: &str = "e.g., metformin 500mg twice daily, lisinopril 10mg daily";

/// Wires an enum's `as_str` labels into `Display`, `FromStr` and serde, so the
/// label table in `as_str` is the only place a choice is spelled.
macro_rules! choice_labels {
    ($ty:ident, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = MedreportError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.as_str() == s)
                    .ok_or_else(|| MedreportError::UnknownChoice {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }

        impl TryFrom<String> for $ty {
            type Error = MedreportError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$ty> for &'static str {
            fn from(choice: $ty) -> Self {
                choice.as_str()
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: &[Gender] = &[Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

choice_labels!(Gender, "gender");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum BloodType {
    #[default]
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
    Unknown,
}

impl BloodType {
    pub const ALL: &[BloodType] = &[
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
        BloodType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
            BloodType::Unknown => "Unknown",
        }
    }
}

choice_labels!(BloodType, "blood type");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum SymptomDuration {
    #[default]
    UnderADay,
    OneToThreeDays,
    ThreeToSevenDays,
    OneToTwoWeeks,
    OverTwoWeeks,
}

impl SymptomDuration {
    pub const ALL: &[SymptomDuration] = &[
        SymptomDuration::UnderADay,
        SymptomDuration::OneToThreeDays,
        SymptomDuration::ThreeToSevenDays,
        SymptomDuration::OneToTwoWeeks,
        SymptomDuration::OverTwoWeeks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SymptomDuration::UnderADay => "Less than 24 hours",
            SymptomDuration::OneToThreeDays => "1-3 days",
            SymptomDuration::ThreeToSevenDays => "3-7 days",
            SymptomDuration::OneToTwoWeeks => "1-2 weeks",
            SymptomDuration::OverTwoWeeks => "More than 2 weeks",
        }
    }
}

choice_labels!(SymptomDuration, "duration");

/// One patient's profile and complaint, as handed to the prompt builder.
///
/// Numeric fields are always within their declared ranges; the only way to
/// build one from user input is [`PatientForm::into_case`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientCase {
    pub gender: Gender,
    pub age: u32,
    pub height_cm: u32,
    pub weight_kg: u32,
    pub blood_type: BloodType,
    pub allergies: String,
    pub symptoms: String,
    pub duration: SymptomDuration,
    pub medical_history: String,
    pub current_medications: String,
}

impl Default for PatientCase {
    fn default() -> Self {
        PatientForm::default().into_case()
    }
}

/// Raw form submission. Numbers are signed so out-of-range entries survive
/// deserialization and get clamped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientForm {
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub height_cm: Option<i64>,
    #[serde(default)]
    pub weight_kg: Option<i64>,
    #[serde(default)]
    pub blood_type: BloodType,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub duration: SymptomDuration,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub current_medications: Option<String>,
}

impl PatientForm {
    pub fn into_case(self) -> PatientCase {
        PatientCase {
            gender: self.gender,
            age: clamp_field("age", self.age, &AGE_RANGE, DEFAULT_AGE),
            height_cm: clamp_field("height_cm", self.height_cm, &HEIGHT_CM_RANGE, DEFAULT_HEIGHT_CM),
            weight_kg: clamp_field("weight_kg", self.weight_kg, &WEIGHT_KG_RANGE, DEFAULT_WEIGHT_KG),
            blood_type: self.blood_type,
            allergies: text_or_default(self.allergies, DEFAULT_ALLERGIES),
            symptoms: text_or_default(self.symptoms, DEFAULT_SYMPTOMS),
            duration: self.duration,
            medical_history: text_or_default(self.medical_history, DEFAULT_MEDICAL_HISTORY),
            current_medications: text_or_default(self.current_medications, DEFAULT_MEDICATIONS),
        }
    }
}

fn clamp_field(name: &str, value: Option<i64>, range: &RangeInclusive<i64>, default: u32) -> u32 {
    let Some(raw) = value else {
        return default;
    };
    let clamped = raw.clamp(*range.start(), *range.end());
    if clamped != raw {
        debug!("{name}: clamped {raw} to {clamped}");
    }
    // Ranges are non-negative and well inside u32.
    clamped as u32
}

fn text_or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => default.to_string(),
    }
}
