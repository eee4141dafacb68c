use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Supports HS256 with a shared secret and RS256 with a PEM key pair.
/// Expiration is always enforced, without leeway.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create an HS256 handler.
    ///
    /// The secret should be at least 32 bytes long.
    pub fn hs256(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create an RS256 handler from PEM encoded keys.
    ///
    /// # Arguments
    /// * `private_pem` - PKCS#1 or PKCS#8 RSA private key
    /// * `public_pem` - PKCS#1 or SPKI RSA public key
    ///
    /// # Errors
    /// * `InvalidKey` - Either key could not be parsed
    pub fn rs256(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| JwtError::InvalidKey(format!("private key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| JwtError::InvalidKey(format!("public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm: Algorithm::RS256,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Encode claims into a signed JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Malformed token, bad signature, wrong algorithm or missing claims
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }
}
