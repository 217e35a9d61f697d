use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use researchpilot_domain::shared::UserId;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: i64,
    pub typ: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Issues and verifies signed bearer tokens.
///
/// Format: `base64url(claims json) "." base64url(HMAC-SHA256(payload segment))`.
#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: impl Into<Vec<u8>>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn issue_pair(&self, user_id: UserId, now: DateTime<Utc>) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenKind::Access, now)?,
            refresh_token: self.issue(user_id, TokenKind::Refresh, now)?,
            expires_in: self.access_ttl.num_seconds(),
        })
    }

    pub fn issue(
        &self,
        user_id: UserId,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = TokenClaims {
            sub: user_id.value(),
            typ: kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let json = serde_json::to_vec(&claims).map_err(|e| TokenError::Malformed(e.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(payload.as_bytes())?);

        Ok(format!("{}.{}", payload, signature))
    }

    /// Checks signature, kind and expiry, in that order.
    pub fn verify(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, TokenError> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or_else(|| TokenError::Malformed("missing signature segment".to_string()))?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;
        let claims: TokenClaims =
            serde_json::from_slice(&json).map_err(|e| TokenError::Malformed(e.to_string()))?;

        if claims.typ != expected {
            return Err(TokenError::WrongKind);
        }
        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, TokenError> {
        let mut mac = self.mac()?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| TokenError::Key(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token signature mismatch")]
    InvalidSignature,

    #[error("Token has the wrong type")]
    WrongKind,

    #[error("Token expired")]
    Expired,

    #[error("Invalid signing key: {0}")]
    Key(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service() -> TokenService {
        TokenService::new("test-secret", Duration::minutes(30), Duration::days(7))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_issue_and_verify_access() {
        let pair = service().issue_pair(UserId::new(42), now()).unwrap();
        assert_eq!(pair.expires_in, 1800);

        let claims = service()
            .verify(&pair.access_token, TokenKind::Access, now())
            .unwrap();
        assert_eq!(claims.user_id(), UserId::new(42));
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let pair = service().issue_pair(UserId::new(1), now()).unwrap();

        assert_eq!(
            service().verify(&pair.refresh_token, TokenKind::Access, now()),
            Err(TokenError::WrongKind)
        );
        assert!(service()
            .verify(&pair.refresh_token, TokenKind::Refresh, now())
            .is_ok());
    }

    #[test]
    fn test_expired_token() {
        let token = service().issue(UserId::new(1), TokenKind::Access, now()).unwrap();
        let later = now() + Duration::minutes(30);

        assert_eq!(
            service().verify(&token, TokenKind::Access, later),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_tampered_payload_fails_signature() {
        let token = service().issue(UserId::new(1), TokenKind::Access, now()).unwrap();
        let (_, signature) = token.split_once('.').unwrap();

        let forged_claims = TokenClaims {
            sub: 2,
            typ: TokenKind::Access,
            iat: now().timestamp(),
            exp: now().timestamp() + 3600,
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{}.{}", forged_payload, signature);

        assert_eq!(
            service().verify(&forged, TokenKind::Access, now()),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = service().issue(UserId::new(1), TokenKind::Access, now()).unwrap();
        let other = TokenService::new("other", Duration::minutes(30), Duration::days(7));

        assert_eq!(
            other.verify(&token, TokenKind::Access, now()),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            service().verify("no-dot-here", TokenKind::Access, now()),
            Err(TokenError::Malformed(_))
        ));
    }
}
