//! Payload signatures carried in the `X-Webhook-Signature` header.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::WebhooksServiceError;

type HmacSha256 = Hmac<Sha256>;

/// How the signature header value is derived from a subscription secret and the body.
///
/// Both render lowercase hex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureScheme {
    /// `sha256(secret || body)`. Wire format existing subscribers verify against.
    #[default]
    Sha256Prefixed,
    /// `HMAC-SHA256(key = secret, message = body)`.
    HmacSha256,
}

impl SignatureScheme {
    pub fn sign(self, secret: &str, body: &str) -> Result<String, WebhooksServiceError> {
        match self {
            Self::Sha256Prefixed => {
                let mut hasher = Sha256::new();
                hasher.update(secret.as_bytes());
                hasher.update(body.as_bytes());
                Ok(hex::encode(hasher.finalize()))
            }
            Self::HmacSha256 => {
                let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
                    .map_err(|e| anyhow!("initialise webhook hmac: {e}"))?;
                mac.update(body.as_bytes());
                Ok(hex::encode(mac.finalize().into_bytes()))
            }
        }
    }
}

impl FromStr for SignatureScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256-prefixed" => Ok(Self::Sha256Prefixed),
            "hmac-sha256" => Ok(Self::HmacSha256),
            other => Err(format!("unknown signature scheme: {other}")),
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sha256Prefixed => "sha256-prefixed",
            Self::HmacSha256 => "hmac-sha256",
        })
    }
}
