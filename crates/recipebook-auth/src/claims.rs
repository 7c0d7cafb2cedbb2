//! The decoded claim set of an access token.

use serde::{Deserialize, Serialize};

/// Verified contents of a bearer token.
///
/// The caller's identity is the identity provider's `user-email` custom claim;
/// it becomes the owner of every recipe or menu the caller creates.
/// `permissions` is absent from tokens issued without RBAC, which is distinct
/// from an empty grant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier assigned by the identity provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Caller identity used for resource ownership
    #[serde(rename = "user-email", default)]
    pub user_email: String,
    /// Permission strings granted to the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    /// Expiration timestamp (Unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    /// Issued-at timestamp (Unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

impl Claims {
    /// The identity compared against resource owners.
    pub fn owner(&self) -> &str {
        &self.user_email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_deserialize_custom_identity_claim() {
        let json = r#"{"sub":"auth0|42","user-email":"cook@example.com","permissions":["add:recipe"],"exp":9999999999}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();

        assert_eq!(claims.owner(), "cook@example.com");
        assert_eq!(claims.sub.as_deref(), Some("auth0|42"));
        assert_eq!(claims.permissions, Some(vec!["add:recipe".to_string()]));
    }

    #[test]
    fn test_claims_without_permissions() {
        let claims: Claims = serde_json::from_str(r#"{"user-email":"a@b.c"}"#).unwrap();
        assert!(claims.permissions.is_none());
    }

    #[test]
    fn test_claims_missing_identity_defaults_to_empty() {
        let claims: Claims = serde_json::from_str(r#"{"permissions":[]}"#).unwrap();
        assert_eq!(claims.owner(), "");
        assert_eq!(claims.permissions, Some(vec![]));
    }

    #[test]
    fn test_claims_ignore_unknown_fields() {
        let json = r#"{"user-email":"a@b.c","aud":["recipe-api","userinfo"],"scope":"openid"}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.owner(), "a@b.c");
    }

    #[test]
    fn test_claims_serialize_uses_identity_claim_name() {
        let claims = Claims {
            user_email: "cook@example.com".to_string(),
            ..Default::default()
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""user-email":"cook@example.com""#));
        assert!(!serialized.contains("permissions"));
    }
}
