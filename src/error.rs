use thiserror::Error;

/// Typed errors raised by the domain service facade. Repositories stay on
/// `anyhow::Result`; the facade maps their failures into this taxonomy
/// before they reach a caller.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing/malformed input. Surfaced verbatim, no retry.
    #[error("{0}")]
    Validation(String),

    /// A row that must exist does not. Absence that is semantically valid
    /// (e.g. a pending submission) is represented as `Ok(None)` in read
    /// paths instead of this variant.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness/state conflicts mapped to a user-facing message
    /// (username taken, code already present).
    #[error("{0}")]
    Conflict(String),

    /// The invitation code exists but has been deactivated. Distinct from
    /// an unknown code, which is `Validation`.
    #[error("This invitation code has been deactivated. Please contact an administrator.")]
    InactiveCode,

    /// A snapshotted session could not be restored after an
    /// identity-mutating call. The active session can no longer be
    /// trusted; the caller has been signed out and must re-authenticate.
    #[error("Your session could not be restored. Please log in again.")]
    SessionIntegrity,

    /// A lifecycle operation was attempted from a state it cannot leave
    /// (terminal scheduled meeting, backwards submission move).
    #[error("{0}")]
    InvalidTransition(String),

    /// The first half of a two-step write landed but the second did not.
    /// The stored state is consistent enough to read but incomplete;
    /// callers should surface this as a warning, not silently retry.
    #[error("partial failure: {0}")]
    PartialFailure(String),

    #[error("Network error: Could not connect to the server.")]
    Connectivity,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

/// Map a provider-level failure onto the taxonomy, recognising the
/// duplicate-key signal so callers see a conflict message instead of a
/// raw constraint violation.
pub fn map_db_error(err: anyhow::Error, conflict_msg: &str) -> ServiceError {
    let text = err.to_string();
    if text.contains("duplicate key") || text.contains("unique constraint") {
        ServiceError::conflict(conflict_msg)
    } else {
        ServiceError::Internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_maps_to_conflict() {
        let err = anyhow::anyhow!("duplicate key value violates unique constraint \"profiles_username_key\"");
        match map_db_error(err, "This username is already taken.") {
            ServiceError::Conflict(msg) => assert_eq!(msg, "This username is already taken."),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn other_errors_stay_internal() {
        let err = anyhow::anyhow!("connection reset by peer");
        assert!(matches!(
            map_db_error(err, "unused"),
            ServiceError::Internal(_)
        ));
    }
}
