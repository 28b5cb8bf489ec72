//! Fabricated bearer tokens for the mock authentication collaborator.
//!
//! Tokens produced here look like JWTs — three base64url segments carrying
//! a header, claims, and a signature slot — but the signature is a fixed
//! marker string, not a cryptographic MAC. That makes them printable,
//! decodable, and expirable like the real thing while remaining obviously
//! unverifiable.
//!
//! **Not a security mechanism.** A production deployment replaces this
//! module with real signed tokens or server-side sessions; nothing else in
//! the crate depends on how the token is produced, only on
//! [`decode`]/[`is_valid`].

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token lifetime: 24 hours.
pub const TOKEN_TTL_SECS: i64 = 86_400;

/// The claims carried in a mock token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — the user id.
    pub sub: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Errors produced when decoding a token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token does not have the expected shape.
    #[error("token is malformed: {reason}")]
    Malformed {
        /// What failed to parse.
        reason: String,
    },

    /// The token's `exp` claim is in the past.
    #[error("token has expired")]
    Expired,
}

/// Issues a token for the given identity, valid for [`TOKEN_TTL_SECS`].
#[must_use]
pub fn issue(sub: &str, name: &str, email: &str) -> String {
    let now = Utc::now().timestamp();
    encode(&TokenClaims {
        sub: sub.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    })
}

/// Encodes claims into the three-segment token string.
#[must_use]
pub fn encode(claims: &TokenClaims) -> String {
    let header = serde_json::json!({ "alg": "HS256", "typ": "JWT" });
    let payload = serde_json::json!({
        "sub": claims.sub,
        "name": claims.name,
        "email": claims.email,
        "iat": claims.iat,
        "exp": claims.exp,
    });

    let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
    let payload_b64 = URL_SAFE_NO_PAD.encode(payload.to_string());
    // Fixed marker where a real token carries an HMAC.
    let signature_b64 = URL_SAFE_NO_PAD.encode(format!("mock-signature-{}", claims.sub));

    format!("{header_b64}.{payload_b64}.{signature_b64}")
}

/// Decodes a token, rejecting expired ones against the current clock.
///
/// # Errors
///
/// Returns [`TokenError::Malformed`] for anything that is not three
/// base64url segments with JSON claims, and [`TokenError::Expired`] when
/// `exp` is in the past.
pub fn decode(token: &str) -> Result<TokenClaims, TokenError> {
    decode_at(token, Utc::now())
}

/// Decodes a token, checking expiry against the provided instant.
///
/// Exposed separately so expiry behavior can be tested deterministically.
///
/// # Errors
///
/// As [`decode`].
pub fn decode_at(token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed {
            reason: "expected three dot-separated segments".to_string(),
        });
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|err| TokenError::Malformed {
            reason: format!("claims segment is not base64url: {err}"),
        })?;
    let claims: TokenClaims =
        serde_json::from_slice(&bytes).map_err(|err| TokenError::Malformed {
            reason: format!("claims are not valid JSON: {err}"),
        })?;

    if claims.exp < now.timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Returns `true` when the token decodes and has not expired.
#[must_use]
pub fn is_valid(token: &str) -> bool {
    decode(token).is_ok()
}
