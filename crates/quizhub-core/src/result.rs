//! Convenience result type alias for QuizHub.

use crate::error::AppError;

/// A specialized `Result` type for QuizHub operations.
pub type AppResult<T> = Result<T, AppError>;
