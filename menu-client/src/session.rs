//! Persisted login session
//!
//! The bearer token lives in `session.json` inside the session directory.
//! Its JWT payload is decoded locally (no signature check, the backend does
//! that) to learn who is logged in and when the token expires.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use shared::models::UserRole;

use crate::{ClientError, ClientResult};

const SESSION_FILE: &str = "session.json";

/// Claims carried in the backend's JWT payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "nameid")]
    pub user_id: String,
    #[serde(rename = "unique_name")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: UserRole,
    #[serde(rename = "RestaurantId", default)]
    pub restaurant_id: Option<String>,
    /// Expiry, seconds since the epoch
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Decode the payload segment of `token`
    pub fn decode(token: &str) -> ClientResult<Self> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(ClientError::InvalidResponse("malformed token".into()));
        }
        let payload = URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .map_err(|e| ClientError::InvalidResponse(format!("token payload: {}", e)))?;
        Ok(serde_json::from_slice(&payload)?)
    }

    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_secs)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// A usable (decoded, unexpired) session
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub claims: TokenClaims,
}

impl Session {
    pub fn from_token(token: impl Into<String>) -> ClientResult<Self> {
        let token = token.into();
        let claims = TokenClaims::decode(&token)?;
        Ok(Self { token, claims })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    saved_at: String,
}

/// JSON file holding the current token
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `token`, creating the session directory if needed
    pub fn save(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let stored = StoredSession {
            token: token.to_string(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Load the stored session.
    ///
    /// Returns `None` when there is no file, or when the stored token is
    /// unreadable or expired; in the latter cases the file is removed.
    pub fn load(&self) -> ClientResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let session = serde_json::from_str::<StoredSession>(&content)
            .ok()
            .and_then(|stored| Session::from_token(stored.token).ok());

        match session {
            Some(session) if !session.claims.is_expired() => Ok(Some(session)),
            Some(_) => {
                tracing::info!("Stored session expired, discarding");
                self.clear()?;
                Ok(None)
            }
            None => {
                tracing::warn!(path = %self.path.display(), "Stored session unreadable, discarding");
                self.clear()?;
                Ok(None)
            }
        }
    }

    pub fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_token(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.signature", header, body)
    }

    fn owner_payload(exp: i64) -> serde_json::Value {
        json!({
            "nameid": "u-7",
            "unique_name": "ayse",
            "email": "ayse@example.com",
            "role": "Owner",
            "RestaurantId": "r-1",
            "exp": exp
        })
    }

    #[test]
    fn test_decode_claims() {
        let claims = TokenClaims::decode(&make_token(owner_payload(2_000_000_000))).unwrap();
        assert_eq!(claims.user_id, "u-7");
        assert_eq!(claims.name, "ayse");
        assert_eq!(claims.role, UserRole::Owner);
        assert_eq!(claims.restaurant_id.as_deref(), Some("r-1"));
        assert!(!claims.is_admin());
        assert!(claims.is_expired_at(2_000_000_000));
        assert!(!claims.is_expired_at(1_999_999_999));
    }

    #[test]
    fn test_decode_admin_without_restaurant() {
        let token = make_token(json!({
            "nameid": "u-1",
            "unique_name": "root",
            "role": "Admin"
        }));
        let claims = TokenClaims::decode(&token).unwrap();
        assert!(claims.is_admin());
        assert!(claims.restaurant_id.is_none());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(TokenClaims::decode("not-a-jwt").is_err());
        assert!(TokenClaims::decode("a.!!!.c").is_err());
    }

    #[test]
    fn test_store_roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested"));
        assert!(store.load().unwrap().is_none());

        let token = make_token(owner_payload(chrono::Utc::now().timestamp() + 3600));
        store.save(&token).unwrap();
        let session = store.load().unwrap().unwrap();
        assert_eq!(session.token, token);

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_expired_session_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store
            .save(&make_token(owner_payload(chrono::Utc::now().timestamp() - 10)))
            .unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_session_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        std::fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(!store.path().exists());
    }
}
