use std::fmt;

// Fallback when a failed response carries no readable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "API request failed";

// Failures surfaced to the entry forms. Every variant resolves to a
// navigable page; none of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    // 401 from the API; the session has already been cleared.
    #[error("Unauthorized")]
    Unauthorized,
    // Any other non-2xx response.
    #[error("{0}")]
    RequestFailed(String),
    // The request never produced a response.
    #[error("{0}")]
    NetworkFailure(String),
    // Client-side form checks; never reaches the API client.
    #[error("{0}")]
    Validation(FormErrors),
}

// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // First message recorded for the field, if any.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn into_result(self) -> Result<(), AuthError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AuthError::Validation(self))
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}
