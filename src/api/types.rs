//! Shared types for the HTTP API layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::core_state::CoreState;

/// Sessions expire after 8 hours without re-login.
const SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
/// Wraps `CoreState` plus the in-memory session store.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self {
            core,
            sessions: Arc::new(Mutex::new(SessionStore::new())),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// User context — injected by auth middleware
// ═══════════════════════════════════════════════════════════

/// Authenticated user, injected into request extensions by the auth
/// middleware after token validation.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: Uuid,
    pub name: String,
}

// ═══════════════════════════════════════════════════════════
// Session store — bearer tokens for logged-in staff
// ═══════════════════════════════════════════════════════════

struct SessionEntry {
    user_id: Uuid,
    name: String,
    issued_at: Instant,
}

/// In-memory session store. Only SHA-256 digests of tokens are kept;
/// the raw token exists client-side only.
pub struct SessionStore {
    entries: HashMap<[u8; 32], SessionEntry>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            ttl: SESSION_TTL,
        }
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Issue a fresh session token for a user. Returns the raw token.
    /// Expired sessions are swept here so abandoned tokens do not
    /// accumulate.
    pub fn issue(&mut self, user_id: Uuid, name: &str) -> String {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.issued_at.elapsed() <= ttl);

        let mut raw = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut raw);
        let token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw);

        self.entries.insert(
            token_digest(&token),
            SessionEntry {
                user_id,
                name: name.to_string(),
                issued_at: Instant::now(),
            },
        );
        token
    }

    /// Validate a bearer token, pruning it when expired.
    pub fn validate(&mut self, token: &str) -> Option<UserContext> {
        let digest = token_digest(token);
        let entry = self.entries.get(&digest)?;
        if entry.issued_at.elapsed() > self.ttl {
            self.entries.remove(&digest);
            return None;
        }
        Some(UserContext {
            user_id: entry.user_id,
            name: entry.name.clone(),
        })
    }

    /// Revoke a token (logout). Unknown tokens are a no-op.
    pub fn revoke(&mut self, token: &str) {
        self.entries.remove(&token_digest(token));
    }
}

fn token_digest(token: &str) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Sha256::digest(token.as_bytes()));
    digest
}
