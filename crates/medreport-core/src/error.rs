use thiserror::Error;

#[derive(Debug, Error)]
pub enum MedreportError {
    #[error("unknown {field}: {value}")]
    UnknownChoice { field: &'static str, value: String },
}
