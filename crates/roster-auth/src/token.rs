//! Signed bearer tokens (HS256 JWT).
//!
//! A token is `header.claims.signature`, each segment base64url-encoded. The
//! claims carry the subject, the issue time and the expiry, both in seconds
//! since the epoch. Only HS256 is accepted on the way in; a token announcing
//! any other algorithm is rejected before its signature is even looked at.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  pub sub: String,
  pub iat: i64,
  pub exp: i64,
}

/// Issues and verifies tokens with one process-wide secret.
///
/// Read-only after construction, so it can be shared freely between requests.
#[derive(Clone)]
pub struct TokenService {
  encoding: EncodingKey,
  decoding: DecodingKey,
  ttl:      Duration,
}

impl std::fmt::Debug for TokenService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TokenService")
      .field("ttl", &self.ttl)
      .finish_non_exhaustive()
  }
}

impl TokenService {
  /// Build a service signing with `secret`; tokens live for `ttl`.
  pub fn new(secret: &[u8], ttl: Duration) -> Result<Self> {
    if secret.is_empty() {
      return Err(Error::Config("signing secret must not be empty"));
    }
    if ttl <= Duration::zero() {
      return Err(Error::Config("token lifetime must be positive"));
    }
    Ok(Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      ttl,
    })
  }

  /// Issue a token for `subject`, valid from now for the configured lifetime.
  pub fn issue(&self, subject: &str) -> Result<String> {
    self.issue_at(subject, Utc::now())
  }

  /// Issue a token as if the current time were `now`.
  pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String> {
    let expiry = now
      .checked_add_signed(self.ttl)
      .ok_or(Error::Config("token lifetime overflows the calendar"))?;
    let claims = Claims {
      sub: subject.to_owned(),
      iat: now.timestamp(),
      exp: expiry.timestamp(),
    };
    Ok(encode(&Header::new(ALGORITHM), &claims, &self.encoding)?)
  }

  /// Return the token's subject if it is well-formed, correctly signed and
  /// not expired. Every failure yields `None`.
  pub fn verify(&self, token: &str) -> Option<String> {
    self.verify_at(token, Utc::now())
  }

  /// [`verify`](Self::verify) against an explicit clock.
  pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<String> {
    let claims = self.decode_claims(token)?;
    if now.timestamp() > claims.exp {
      tracing::debug!(sub = %claims.sub, exp = claims.exp, "token expired");
      return None;
    }
    Some(claims.sub)
  }

  fn decode_claims(&self, token: &str) -> Option<Claims> {
    // Expiry is checked by the caller against its own clock.
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["sub", "exp"]);

    match decode::<Claims>(token, &self.decoding, &validation) {
      Ok(data) => Some(data.claims),
      Err(e) => {
        tracing::debug!(error = %e, "token rejected");
        None
      }
    }
  }
}
