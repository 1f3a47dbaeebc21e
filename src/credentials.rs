use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// 1. CredentialStore Contract
/// CredentialStore
///
/// Defines the abstract contract for persisting the bearer token between
/// application runs. This trait allows us to swap the concrete
/// implementation, from the on-disk store (FileCredentialStore) in the real
/// client to the in-memory store (MemoryCredentialStore) during testing,
/// without affecting the gateway or the session resolver.
///
/// The store is the only ambient input of the session resolver: whatever
/// token it yields is attached to every API call as an `Authorization` header.
pub trait CredentialStore: Send + Sync {
    /// Returns the currently stored token, if any.
    fn token(&self) -> Option<String>;

    /// Replaces the stored token (login).
    fn store(&self, token: &str);

    /// Removes the stored token (logout, or an auth-rejected session).
    fn clear(&self);
}

/// CredentialState
///
/// The concrete type used to share credential access across the application.
pub type CredentialState = Arc<dyn CredentialStore>;

// 2. The Real Implementation (On-Disk Token File)
/// FileCredentialStore
///
/// Persists the token to a single file, the client-side-storage analog for a
/// native client. I/O failures degrade to "no token": an unreadable store is
/// indistinguishable from being logged out, which is exactly the behavior the
/// session resolver expects.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(_) => None,
        }
    }

    fn store(&self, token: &str) {
        if let Err(e) = std::fs::write(&self.path, token) {
            tracing::warn!("failed to persist credential: {:?}", e);
        }
    }

    fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("failed to clear credential: {:?}", e);
            }
        }
    }
}

// 3. The In-Memory Implementation (For Unit Tests)
/// MemoryCredentialStore
///
/// Holds the token behind a mutex with no persistence. Used by the test
/// suites and by the boot binary when no token file is configured.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for tests that start authenticated.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.token.lock().expect("credential lock poisoned").clone()
    }

    fn store(&self, token: &str) {
        *self.token.lock().expect("credential lock poisoned") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().expect("credential lock poisoned") = None;
    }
}
