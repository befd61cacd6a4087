//! Conversions from external infrastructure errors into domain errors.

use agrione_domain::AgriError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AgriError);

impl From<InfraError> for AgriError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AgriError> for InfraError {
    fn from(value: AgriError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAgriError {
    fn into_agri(self) -> AgriError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AgriError */
/* -------------------------------------------------------------------------- */

impl IntoAgriError for HttpError {
    fn into_agri(self) -> AgriError {
        if self.is_timeout() {
            return AgriError::Timeout("HTTP request timed out".into());
        }

        if self.is_connect() {
            return AgriError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let reason = status.canonical_reason().unwrap_or("unknown status");
            return AgriError::upstream(code, reason);
        }

        if self.is_decode() {
            return AgriError::invalid_response(format!("failed to decode HTTP body: {self}"));
        }

        if self.is_builder() {
            return AgriError::Internal(format!("invalid HTTP request: {self}"));
        }

        AgriError::Network(format!("HTTP error: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_agri())
    }
}
