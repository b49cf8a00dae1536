//! Session state: the auth token and cached user record
//!
//! Single source of truth for the current token, persisted as YAML next to
//! the config file. Setting a token replaces the old one unconditionally;
//! clearing removes both the token and the cached user record.
//!
//! Token expiry is introspected on a best-effort basis only: a three-part
//! dotted token is parsed as a JWT to read its `exp` claim for display
//! purposes. A token that does not parse is treated as valid until the
//! backend rejects it with a 401.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::models::UserProfile;
use crate::error::{ConfigError, Result};

/// Session file name inside the verseop directory.
const SESSION_FILE: &str = "session.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserProfile>,
}

/// File-backed store for the auth token and the signed-in user record.
pub struct SessionStore {
    path: PathBuf,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Default session file path (~/.verseop/session.yaml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;
        Ok(home.join(".verseop").join(SESSION_FILE))
    }

    /// Open the store at the default location, loading existing state.
    pub fn open() -> Result<Self> {
        Self::open_at(&Self::default_path()?)
    }

    /// Open the store at a specific file path (used by tests and `--config`).
    pub fn open_at(path: &Path) -> Result<Self> {
        let state = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&contents).map_err(ConfigError::from)?
        } else {
            SessionState::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            state: RwLock::new(state),
        })
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<String> {
        self.state.read().ok().and_then(|s| s.token.clone())
    }

    /// Cached user record, if any.
    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().ok().and_then(|s| s.user.clone())
    }

    /// Replace the stored token unconditionally and persist.
    pub fn set_token(&self, token: &str) -> Result<()> {
        if let Ok(mut state) = self.state.write() {
            state.token = Some(token.to_string());
        }
        self.persist()
    }

    /// Replace the cached user record and persist.
    pub fn set_user(&self, user: UserProfile) -> Result<()> {
        if let Ok(mut state) = self.state.write() {
            state.user = Some(user);
        }
        self.persist()
    }

    /// Remove the token and the cached user record.
    pub fn clear(&self) -> Result<()> {
        if let Ok(mut state) = self.state.write() {
            state.token = None;
            state.user = None;
        }
        self.persist()
    }

    /// Best-effort expiry of the current token. `None` when there is no
    /// token or it does not look like a JWT.
    pub fn token_expiry(&self) -> Option<DateTime<Utc>> {
        self.token().as_deref().and_then(jwt_expiry)
    }

    /// Whether the stored token is known to be expired. A non-JWT token
    /// never reports as expired here.
    pub fn is_token_expired(&self) -> bool {
        match self.token_expiry() {
            Some(expires_at) => expires_at < Utc::now(),
            None => false,
        }
    }

    fn persist(&self) -> Result<()> {
        let state = self
            .state
            .read()
            .map_err(|_| ConfigError::SaveError("session state poisoned".to_string()))?
            .clone();

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(&state).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(&self.path, contents)?;

        // Session file holds a credential
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

/// Parse the `exp` claim out of a JWT-looking token.
///
/// Returns `None` for anything that is not a three-part dotted token with a
/// base64url JSON payload carrying a numeric `exp`.
pub fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    #[derive(Deserialize)]
    struct Claims {
        exp: i64,
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload = base64_decode_url(parts[1]).ok()?;
    let claims: Claims = serde_json::from_slice(&payload).ok()?;
    DateTime::from_timestamp(claims.exp, 0)
}

/// Decode base64url (URL-safe base64 without padding)
fn base64_decode_url(input: &str) -> std::result::Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose};

    // Base64url uses - instead of + and _ instead of /
    let standard_b64 = input.replace('-', "+").replace('_', "/");

    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return Err("Invalid base64url length".to_string()),
    };

    general_purpose::STANDARD
        .decode(format!("{}{}", standard_b64, padding))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose};
    use tempfile::TempDir;

    fn test_store() -> (SessionStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open_at(&dir.path().join(SESSION_FILE)).unwrap();
        (store, dir)
    }

    /// Build a structurally valid JWT with the given exp claim (unsigned).
    fn fake_jwt(exp: i64) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let payload =
            general_purpose::URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp).as_bytes());
        format!("{}.{}.sig", header, payload)
    }

    #[test]
    fn test_empty_store_has_no_token() {
        let (store, _dir) = test_store();
        assert!(store.token().is_none());
        assert!(store.user().is_none());
        assert!(!store.is_token_expired());
    }

    #[test]
    fn test_set_token_replaces_previous() {
        let (store, _dir) = test_store();

        store.set_token("first").unwrap();
        store.set_token("second").unwrap();

        assert_eq!(store.token().as_deref(), Some("second"));
    }

    #[test]
    fn test_clear_removes_token_and_user() {
        let (store, _dir) = test_store();
        store.set_token("tok").unwrap();
        store
            .set_user(UserProfile {
                id: "u1".to_string(),
                email: "a@example.com".to_string(),
                name: Some("A".to_string()),
            })
            .unwrap();

        store.clear().unwrap();

        assert!(store.token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SESSION_FILE);

        {
            let store = SessionStore::open_at(&path).unwrap();
            store.set_token("persisted").unwrap();
        }

        let reopened = SessionStore::open_at(&path).unwrap();
        assert_eq!(reopened.token().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_jwt_expiry_parsed() {
        let exp = Utc::now().timestamp() + 3600;
        let token = fake_jwt(exp);

        let parsed = jwt_expiry(&token).expect("expected expiry");
        assert_eq!(parsed.timestamp(), exp);
    }

    #[test]
    fn test_expired_jwt_detected() {
        let (store, _dir) = test_store();
        store.set_token(&fake_jwt(Utc::now().timestamp() - 60)).unwrap();

        assert!(store.is_token_expired());
    }

    #[test]
    fn test_opaque_token_never_expires_locally() {
        let (store, _dir) = test_store();
        store.set_token("not-a-jwt").unwrap();

        assert!(store.token_expiry().is_none());
        assert!(!store.is_token_expired());
    }

    #[test]
    fn test_jwt_expiry_rejects_malformed() {
        assert!(jwt_expiry("one.two").is_none());
        assert!(jwt_expiry("a.!!!.c").is_none());
        assert!(jwt_expiry("").is_none());
    }
}
