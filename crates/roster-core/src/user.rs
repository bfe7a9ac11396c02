//! User accounts allowed to log in to the registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. The plaintext password is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub login:         String,
  /// PHC string, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub first_name:    String,
  pub last_name:     String,
  pub created_at:    DateTime<Utc>,
}
