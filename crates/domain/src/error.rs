//! Engine error types.

use thiserror::Error;

/// Uniform failure for engine operations.
///
/// Callers cannot distinguish a constraint violation from a connectivity
/// error; both collapse into this type and the transaction that produced it
/// has already rolled back. The underlying cause stays available through
/// [`std::error::Error::source`] for logging. Failed operations leave no
/// partial state and are safe to retry.
#[derive(Debug, Error)]
#[error("group operation failed")]
pub struct EngineError(#[from] sqlx::Error);

impl EngineError {
    /// True when the failure came from a violated database constraint
    /// (duplicate key, foreign key). Useful for log classification only.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(&self.0, sqlx::Error::Database(e) if e.constraint().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_is_uniform() {
        let err = EngineError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), "group operation failed");
    }

    #[test]
    fn test_source_preserved() {
        let err = EngineError::from(sqlx::Error::RowNotFound);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_row_not_found_is_not_constraint_violation() {
        let err = EngineError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_constraint_violation());
    }
}
