//! Canonical response envelope.

use super::ErrorBody;
use serde::{Deserialize, Serialize};

/// Outcome of one engine call as seen by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Whether the operation applied.
    pub ok: bool,
    /// Result payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    /// Wraps a successful result.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wraps a failure.
    #[must_use]
    pub const fn failure(error: ErrorBody) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error),
        }
    }

    /// Converts the envelope back into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the carried [`ErrorBody`], or an internal error when a
    /// successful envelope has no payload.
    pub fn into_result(self) -> Result<T, ErrorBody> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(error),
            (Some(data), None) => Ok(data),
            (None, None) => Err(ErrorBody::internal()),
        }
    }
}

impl<T, E> From<Result<T, E>> for Envelope<T>
where
    E: Into<ErrorBody>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(err.into()),
        }
    }
}
