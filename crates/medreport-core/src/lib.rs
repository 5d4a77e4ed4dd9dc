pub mod error;
pub mod patient;

pub use error::MedreportError;
pub use patient::{BloodType, Gender, PatientCase, PatientForm, SymptomDuration};
