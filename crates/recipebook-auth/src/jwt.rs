//! Token signing for tests and local development.
//!
//! Production tokens are issued by the identity provider; this module only
//! mints HS256 tokens accepted by a verifier running in test mode (or by a
//! key set publishing the same shared secret).

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;

/// Signs `claims` with an HS256 shared secret, optionally naming a key id.
pub fn sign_token<T: Serialize>(
    claims: &T,
    secret: &[u8],
    kid: Option<&str>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = kid.map(str::to_string);

    encode(&header, claims, &EncodingKey::from_secret(secret))
}

/// Current Unix time in seconds.
pub fn now() -> u64 {
    jsonwebtoken::get_current_timestamp()
}
