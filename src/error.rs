use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Patient '{patient}' is missing required field: {field}")]
    MissingField {
        patient: String,
        field: &'static str,
    },

    #[error("Patient '{patient}' has invalid {field}: {value}")]
    InvalidField {
        patient: String,
        field: &'static str,
        value: String,
    },

    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("No master menu for date: {0}")]
    UnknownMenuDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
