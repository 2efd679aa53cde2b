use chrono::Utc;

use crate::error::{AppError, AppResult};

const DELIMITER: char = '_';

/// Identity decoded from a session token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    pub user_id: i64,
    pub username: String,
    pub issued_at: i64,
}

/// Issue a session token for a user.
///
/// The token is a plain `"{userId}_{username}_{issuedAtEpochSecs}"` string.
/// It carries no signature and no expiry; the only check it ever receives is
/// the user-id lookup in the session resolver. This mirrors the deployment
/// model this API was written for and is not a substitute for real
/// credentials.
pub fn issue(user_id: i64, username: &str) -> String {
    format!(
        "{}{}{}{}{}",
        user_id,
        DELIMITER,
        username,
        DELIMITER,
        Utc::now().timestamp()
    )
}

/// Parse a session token back into its claims.
///
/// Fails when the segment count is not exactly three or the leading segment
/// is not an unsigned integer that fits an `i64` key. The timestamp segment
/// is informational and is not validated.
pub fn parse(token: &str) -> AppResult<TokenClaims> {
    let parts: Vec<&str> = token.split(DELIMITER).collect();
    if parts.len() != 3 {
        return Err(AppError::Unauthenticated("Invalid token format".into()));
    }

    let user_id: u64 = parts[0]
        .parse()
        .map_err(|_| AppError::Unauthenticated("Invalid user ID in token".into()))?;
    let user_id = i64::try_from(user_id)
        .map_err(|_| AppError::Unauthenticated("Invalid user ID in token".into()))?;
    let issued_at = parts[2].parse().unwrap_or(0);

    Ok(TokenClaims {
        user_id,
        username: parts[1].to_string(),
        issued_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_recovers_identity() {
        let token = issue(42, "ferris");
        let claims = parse(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "ferris");
        assert!(claims.issued_at > 0);
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(parse("42_ferris").is_err());
        assert!(parse("42_fer_ris_1700000000").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn rejects_non_numeric_user_id() {
        assert!(parse("abc_ferris_1700000000").is_err());
        assert!(parse("-7_ferris_1700000000").is_err());
    }

    #[test]
    fn rejects_user_id_too_large_for_a_key() {
        // u64::MAX would wrap negative if cast blindly.
        assert!(parse("18446744073709551615_ferris_1700000000").is_err());
        // The largest valid key still parses.
        let claims = parse("9223372036854775807_ferris_1700000000").unwrap();
        assert_eq!(claims.user_id, i64::MAX);
    }
}
