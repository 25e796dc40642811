//! Typed path parameter helpers.

use std::str::FromStr;

use quizhub_core::error::AppError;

/// Parses an entity ID from a path segment.
pub fn parse_id<T: FromStr>(s: &str) -> Result<T, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid ID: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizhub_core::types::RoleId;

    #[test]
    fn test_parse_id() {
        let id: RoleId = parse_id("00000000-0000-0000-0000-000000000001").expect("valid uuid");
        assert_eq!(id, RoleId::ADMIN);
        assert!(parse_id::<RoleId>("abc").is_err());
    }
}
