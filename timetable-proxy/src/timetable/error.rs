//! Validation error types.

/// Errors produced while validating an inbound timetable query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required parameters were absent or empty
    #[error("Missing params: {}", .0.join(", "))]
    MissingParams(Vec<&'static str>),

    /// Station names that have no configured upstream ID
    #[error("Station ID not configured")]
    UnknownStations(Vec<String>),

    /// Date parameter was not a real `YYYYMMDD` calendar date
    #[error("Invalid date: expected YYYYMMDD")]
    InvalidDate(String),
}

impl ValidationError {
    /// Extra diagnostic text for the error body, if any.
    pub fn detail(&self) -> Option<String> {
        match self {
            ValidationError::MissingParams(_) => None,
            ValidationError::UnknownStations(names) => Some(format!(
                "no station ID configured for: {}",
                names.join(", ")
            )),
            ValidationError::InvalidDate(value) => Some(format!("got {value:?}")),
        }
    }
}
