use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use shared_config::ApiConfig;

/// The two named credential entries kept client-side: the short-lived access
/// token and the longer-lived refresh token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

/// Credential persistence seam. Reads are synchronous and never mutate;
/// writers are the login/logout operations and the refresh settlement path.
pub trait CredentialStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    /// Replace both credentials (login, or refresh with rotation).
    fn set_tokens(&self, access: &str, refresh: &str);
    /// Replace only the access credential (refresh without rotation).
    fn set_access_token(&self, access: &str);
    /// Drop everything (logout, or unrecoverable refresh failure).
    fn clear(&self);
}

/// In-process store, for tests and embedders that persist elsewhere.
#[derive(Default)]
pub struct MemoryCredentialStore {
    credentials: RwLock<StoredCredentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        Self {
            credentials: RwLock::new(StoredCredentials {
                access: Some(access.to_string()),
                refresh: Some(refresh.to_string()),
            }),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.credentials.read().expect("credential lock poisoned").access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.credentials.read().expect("credential lock poisoned").refresh.clone()
    }

    fn set_tokens(&self, access: &str, refresh: &str) {
        let mut credentials = self.credentials.write().expect("credential lock poisoned");
        credentials.access = Some(access.to_string());
        credentials.refresh = Some(refresh.to_string());
    }

    fn set_access_token(&self, access: &str) {
        let mut credentials = self.credentials.write().expect("credential lock poisoned");
        credentials.access = Some(access.to_string());
    }

    fn clear(&self) {
        *self.credentials.write().expect("credential lock poisoned") =
            StoredCredentials::default();
    }
}

/// JSON-file-backed store so sessions survive process restarts. Contents are
/// cached in memory and written through on every mutation; write failures are
/// logged rather than surfaced, matching local-storage semantics.
pub struct FileCredentialStore {
    path: PathBuf,
    cached: RwLock<StoredCredentials>,
}

impl FileCredentialStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Ignoring malformed credential file {}: {}", path.display(), err);
                StoredCredentials::default()
            }),
            Err(_) => StoredCredentials::default(),
        };
        debug!("Opened credential store at {}", path.display());
        Self {
            path,
            cached: RwLock::new(cached),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn persist(&self, credentials: &StoredCredentials) {
        let result = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| {
                let raw = serde_json::to_string_pretty(credentials)?;
                fs::write(&self.path, raw)
            });
        if let Err(err) = result {
            warn!("Failed to persist credentials to {}: {}", self.path.display(), err);
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.cached.read().expect("credential lock poisoned").access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.cached.read().expect("credential lock poisoned").refresh.clone()
    }

    fn set_tokens(&self, access: &str, refresh: &str) {
        let mut cached = self.cached.write().expect("credential lock poisoned");
        cached.access = Some(access.to_string());
        cached.refresh = Some(refresh.to_string());
        self.persist(&cached);
    }

    fn set_access_token(&self, access: &str) {
        let mut cached = self.cached.write().expect("credential lock poisoned");
        cached.access = Some(access.to_string());
        self.persist(&cached);
    }

    fn clear(&self) {
        let mut cached = self.cached.write().expect("credential lock poisoned");
        *cached = StoredCredentials::default();
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove credential file {}: {}", self.path.display(), err);
            }
        }
    }
}

/// Pick the store the configuration asks for: file-backed when a credentials
/// path is configured, in-memory otherwise.
pub fn store_from_config(config: &ApiConfig) -> Arc<dyn CredentialStore> {
    match &config.credentials_path {
        Some(path) => Arc::new(FileCredentialStore::open(path.clone())),
        None => Arc::new(MemoryCredentialStore::new()),
    }
}
