//! Signed, stateless session tokens (compact HS256 JWS).

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::models::identity::{Claims, Identity};

type HmacSha256 = Hmac<Sha256>;

/// The only accepted JOSE header.
const HEADER_JSON: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(serde::Deserialize)]
struct Header {
    alg: String,
}

fn sign(secret: &[u8], signing_input: &str) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(signing_input.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Issues a token for `identity`, valid for `ttl` from `now`.
///
/// # Arguments
///
/// * `secret` - The HMAC signing key.
/// * `identity` - The authenticated subject.
/// * `ttl` - How long the token stays valid.
/// * `now` - The issuance instant.
///
/// # Returns
///
/// A `Result` containing the encoded token.
pub fn issue(
    secret: &[u8],
    identity: &Identity,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String> {
    let claims = Claims {
        sub: identity.subject.clone(),
        role: identity.role,
        name: identity.display_name.clone(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    let payload = sonic_rs::to_vec(&claims)
        .map_err(|e| AppError::Internal(format!("Claims serialization failed: {}", e)))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(HEADER_JSON),
        URL_SAFE_NO_PAD.encode(payload)
    );
    let signature = sign(secret, &signing_input)?;

    Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature)))
}

/// Checks structure, algorithm, signature and expiry, in that order.
///
/// Every failure maps to `AppError::InvalidToken`.
pub fn verify(secret: &[u8], token: &str, now: DateTime<Utc>) -> Result<Claims> {
    let mut parts = token.split('.');
    let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AppError::InvalidToken("malformed token".to_string()));
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|_| AppError::InvalidToken("malformed header".to_string()))?;
    let header: Header = sonic_rs::from_slice(&header_bytes)
        .map_err(|_| AppError::InvalidToken("malformed header".to_string()))?;
    if header.alg != "HS256" {
        return Err(AppError::InvalidToken(format!("unsupported alg {}", header.alg)));
    }

    let provided = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AppError::InvalidToken("malformed signature".to_string()))?;
    let expected = sign(secret, &format!("{}.{}", header_b64, payload_b64))?;
    if !bool::from(expected.ct_eq(&provided)) {
        return Err(AppError::InvalidToken("bad signature".to_string()));
    }

    let payload = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| AppError::InvalidToken("malformed payload".to_string()))?;
    let claims: Claims = sonic_rs::from_slice(&payload)
        .map_err(|_| AppError::InvalidToken("malformed claims".to_string()))?;

    if claims.exp <= now.timestamp() {
        return Err(AppError::InvalidToken("expired".to_string()));
    }

    Ok(claims)
}
