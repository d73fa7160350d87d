//! Control-API authorization.
//!
//! A proxy control endpoint may require a short-lived HS256 JWT issued under a
//! shared key, sent as `Authorization: Bearer <token>`.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lifetime of each issued control token, in seconds.
const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub exp: i64,
}

/// Issuer and signing key for one control endpoint.
#[derive(Debug, Clone)]
pub struct ControlAuth {
    iss: String,
    key: SecretString,
}

impl ControlAuth {
    pub fn new(iss: impl Into<String>, key: SecretString) -> Self {
        Self {
            iss: iss.into(),
            key,
        }
    }

    pub fn iss(&self) -> &str {
        &self.iss
    }

    /// Signs a fresh token expiring one hour from now.
    pub fn token(&self) -> Result<String, Error> {
        let claims = Claims {
            iss: self.iss.clone(),
            exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.key.expose_secret().as_bytes()),
        )?;

        Ok(token)
    }
}
