//! Token codec: HMAC-signed JWT encode/decode for the admin bearer token.
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - Only HMAC-family algorithms (HS256/HS384/HS512) are accepted on decode,
//!   defending against algorithm-substitution attacks
//! - All decode failures collapse into one opaque error; detailed reasons are
//!   logged at debug level, never surfaced to callers
//! - The `listener_id` field in Claims is redacted in Debug output

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::instrument;

/// Maximum allowed token size in bytes (4KB).
///
/// Oversized tokens are rejected before base64 decode and signature
/// verification, limiting the resources an attacker can burn per request.
/// Typical tokens issued by this service are well under 500 bytes.
pub const MAX_TOKEN_SIZE_BYTES: usize = 4096;

/// Bearer token claims.
///
/// The expiry lives in the custom `expires` claim (milliseconds since epoch)
/// rather than the registered `exp` claim; expiry enforcement belongs to
/// [`crate::policy`], not to the codec.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (listener identifier) - redacted in Debug output.
    pub listener_id: String,

    /// Expiration timestamp (milliseconds since epoch, UTC).
    pub expires: i64,
}

/// Custom Debug implementation that redacts the `listener_id` field.
impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("listener_id", &"[REDACTED]")
            .field("expires", &self.expires)
            .finish()
    }
}

/// Token could not be verified against the shared secret.
///
/// Deliberately carries no detail: invalid signature, wrong algorithm family
/// and malformed payload are indistinguishable to callers.
#[derive(Debug, Error)]
#[error("bearer token rejected")]
pub struct DecodeError;

/// Token signing failed.
#[derive(Debug, Error)]
#[error("token signing failed: {0}")]
pub struct EncodeError(pub String);

/// Codec for the admin bearer token, bound to the shared signing secret.
///
/// The secret is supplied once at construction and is immutable thereafter.
/// Encoding always signs HS256; decoding accepts any HMAC-family algorithm,
/// matching the verification contract of the token's previous issuers.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec from the raw secret bytes.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // Expiry is the custom millisecond `expires` claim, checked by the
        // admin policy. The registered `exp` claim is absent from our tokens.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify a token's signature and reconstruct its claims.
    ///
    /// Rejects tokens that are oversized, structurally malformed, signed with
    /// a non-HMAC algorithm, or signed with a different secret.
    #[instrument(skip_all)]
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeError> {
        if token.len() > MAX_TOKEN_SIZE_BYTES {
            tracing::debug!(
                target: "users.crypto",
                token_size = token.len(),
                max_size = MAX_TOKEN_SIZE_BYTES,
                "Token rejected: size exceeds maximum allowed"
            );
            return Err(DecodeError);
        }

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(target: "users.crypto", error = %e, "Token verification failed");
                DecodeError
            })?;

        Ok(token_data.claims)
    }

    /// Serialize and sign claims into an opaque token string.
    ///
    /// Effectively total: fails only if the HMAC signing operation itself
    /// fails.
    #[instrument(skip_all)]
    pub fn encode(&self, claims: &Claims) -> Result<String, EncodeError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::debug!(target: "users.crypto", error = %e, "Token signing failed");
            EncodeError(e.to_string())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-signing-secret")
    }

    fn sample_claims() -> Claims {
        Claims {
            listener_id: "listener-42".to_string(),
            expires: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let codec = codec();
        let claims = sample_claims();

        let token = codec.encode(&claims).unwrap();
        let decoded = codec.decode(&token).unwrap();

        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_rejects_different_secret() {
        let token = codec().encode(&sample_claims()).unwrap();

        let other = TokenCodec::new(b"a-different-secret");
        assert!(other.decode(&token).is_err());
    }

    #[test]
    fn test_decode_rejects_non_hmac_algorithm() {
        // Well-formed token whose header names RS256: must be rejected on the
        // algorithm check alone, regardless of the signature bytes.
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload =
            URL_SAFE_NO_PAD.encode(r#"{"listener_id":"listener-42","expires":1700000000000}"#);
        let signature = URL_SAFE_NO_PAD.encode(b"forged");
        let token = format!("{}.{}.{}", header, payload, signature);

        assert!(codec().decode(&token).is_err());
    }

    #[test]
    fn test_decode_accepts_hs384_signed_token() {
        // Decode accepts the whole HMAC family, not just the HS256 we sign.
        let claims = sample_claims();
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-signing-secret"),
        )
        .unwrap();

        let decoded = codec().decode(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_rejects_oversized_token() {
        let oversized = "a".repeat(MAX_TOKEN_SIZE_BYTES + 1);
        assert!(codec().decode(&oversized).is_err());
    }

    #[test]
    fn test_decode_rejects_tampered_payload() {
        let codec = codec();
        let token = codec.encode(&sample_claims()).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3, "JWT should have 3 parts");

        let other_payload =
            URL_SAFE_NO_PAD.encode(r#"{"listener_id":"intruder","expires":9999999999999}"#);
        let tampered = format!("{}.{}.{}", parts[0], other_payload, parts[2]);

        assert!(codec.decode(&tampered).is_err());
    }

    #[test]
    fn test_decode_rejects_malformed_token() {
        let codec = codec();
        assert!(codec.decode("").is_err());
        assert!(codec.decode("not-a-jwt").is_err());
        assert!(codec.decode("too.many.parts.here").is_err());
    }

    #[test]
    fn test_decode_rejects_missing_claims() {
        // Valid signature over a payload lacking the expected fields.
        #[derive(Serialize)]
        struct Partial {
            listener_id: String,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                listener_id: "listener-42".to_string(),
            },
            &EncodingKey::from_secret(b"test-signing-secret"),
        )
        .unwrap();

        assert!(codec().decode(&token).is_err());
    }

    #[test]
    fn test_claims_wire_field_names() {
        let json = serde_json::to_value(sample_claims()).unwrap();
        assert!(json.get("listener_id").is_some());
        assert!(json.get("expires").is_some());
    }

    #[test]
    fn test_claims_debug_redacts_listener_id() {
        let debug_str = format!("{:?}", sample_claims());
        assert!(
            !debug_str.contains("listener-42"),
            "Debug output should not contain actual listener_id value"
        );
        assert!(debug_str.contains("[REDACTED]"));
    }
}
