use thiserror::Error;

/// FetchError
///
/// Classification of everything that can go wrong between the client and the
/// REST API. Controllers store this in their local `Resource` state; nothing
/// in this taxonomy crosses a component boundary or aborts the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Malformed response body: {0}")]
    Decode(String),

    /// The backend answered 200 but reported a logical failure in its
    /// `{ success: false, message }` envelope.
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl FetchError {
    /// Auth-shaped failures steer the doctor dashboard to the login flow.
    pub fn is_auth(&self) -> bool {
        matches!(self, FetchError::Status(401) | FetchError::Status(403))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}
