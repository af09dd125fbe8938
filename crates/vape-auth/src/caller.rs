use anyhow::anyhow;
use vape_core::AppError;

use crate::claims::Claims;

/// The authenticated identity making a request.
///
/// Built from verified claims and read-only for the rest of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: i64,
    pub admin: bool,
}

impl TryFrom<&Claims> for Caller {
    type Error = AppError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::unauthorized(anyhow!("Invalid user ID in token")))?;

        Ok(Self {
            id,
            admin: claims.admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_sub(sub: &str, admin: bool) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "test@example.com".to_string(),
            admin,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_caller_from_claims() {
        let caller = Caller::try_from(&claims_with_sub("5", true)).unwrap();
        assert_eq!(caller, Caller { id: 5, admin: true });
    }

    #[test]
    fn test_caller_rejects_non_numeric_subject() {
        let err = Caller::try_from(&claims_with_sub("d7c1-uuid", false)).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
