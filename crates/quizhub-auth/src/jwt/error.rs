//! Token failures.

use thiserror::Error;

use quizhub_core::error::AppError;

/// Why a token could not be issued or accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token's `exp` is not in the future.
    #[error("Token has expired")]
    Expired,
    /// The signature does not verify, or the header names another algorithm.
    #[error("Invalid token signature")]
    InvalidSignature,
    /// The token cannot be decoded.
    #[error("Malformed token: {0}")]
    Malformed(String),
    /// The token could not be signed.
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) => AppError::internal(err.to_string()),
            _ => AppError::unauthorized(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizhub_core::ErrorKind;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(AppError::from(TokenError::Expired).kind, ErrorKind::Unauthorized);
        assert_eq!(
            AppError::from(TokenError::Malformed("bad".into())).kind,
            ErrorKind::Unauthorized
        );
        assert_eq!(
            AppError::from(TokenError::Signing("empty".into())).kind,
            ErrorKind::Internal
        );
    }
}
