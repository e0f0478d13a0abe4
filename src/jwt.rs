//! Claim inspection for the bearer token. Signatures are not verified; the
//! token is only read to know who is logged in and when the session ends.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut parts = token.split('.');
    let (_, payload, _) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// A token that cannot be decoded counts as expired.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    match decode_claims(token) {
        Some(claims) => claims.exp.is_some_and(|exp| exp < now),
        None => true,
    }
}

pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}

/// Whole minutes left before expiry; `None` when the token carries no `exp`.
pub fn minutes_until_expiration_at(token: &str, now: i64) -> Option<i64> {
    let claims = decode_claims(token)?;
    let exp = claims.exp?;
    Some(((exp - now) / 60).max(0))
}

pub fn minutes_until_expiration(token: &str) -> Option<i64> {
    minutes_until_expiration_at(token, Utc::now().timestamp())
}

pub fn format_remaining(minutes: i64) -> String {
    if minutes <= 0 {
        return "Expired".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} menit");
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        format!("{hours} jam")
    } else {
        format!("{hours} jam {rest} menit")
    }
}
