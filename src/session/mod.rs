//! Client session: who is using the portal and with which credential.
//!
//! The store is the single source of truth. Nothing is cached in this
//! struct, so a store wiped from outside (another tab, the user clearing
//! site data) is observed on the next read and caught by [`Session::check`].

pub mod store;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Persisted key names.
pub const KEY_TOKEN: &str = "token";
pub const KEY_ROLE: &str = "userRole";
pub const KEY_DOCTOR_ID: &str = "doctorId";
pub const KEY_PATIENT_ID: &str = "patientId";

// ═══════════════════════════════════════════════════════════
// Role
// ═══════════════════════════════════════════════════════════

/// Access level governing which actions the UI offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// No role selected (role key absent).
    Anonymous,
    Admin,
    Doctor,
    /// Browsing as a patient without being logged in.
    Patient,
    LoggedPatient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Patient => "patient",
            Self::LoggedPatient => "loggedPatient",
        }
    }

    /// Roles that only make sense with a token attached.
    pub fn requires_token(&self) -> bool {
        match self {
            Self::Admin | Self::Doctor | Self::LoggedPatient => true,
            Self::Anonymous | Self::Patient => false,
        }
    }

    /// Roles reachable from the role-selection page without a server call.
    pub fn is_selectable(&self) -> bool {
        match self {
            Self::Admin | Self::Doctor | Self::Patient => true,
            Self::Anonymous | Self::LoggedPatient => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "doctor" => Ok(Self::Doctor),
            "patient" => Ok(Self::Patient),
            "loggedPatient" => Ok(Self::LoggedPatient),
            other => Err(SessionError::UnknownRole(other.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Errors + snapshots
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error("Role {0} cannot be selected without logging in")]
    NotSelectable(Role),
    #[error("Role {0} is not an authenticated role")]
    NotAuthenticatedRole(Role),
    #[error("Login token is empty")]
    EmptyToken,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Point-in-time copy of the persisted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub role: Role,
    pub token: Option<String>,
    pub doctor_id: Option<String>,
    pub patient_id: Option<String>,
}

/// Outcome of the token/role consistency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCheck {
    Valid(Role),
    /// Authenticated role stored without a token.
    Expired(Role),
}

// ═══════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════

/// Role/token state machine over a [`KeyValueStore`].
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("role", &self.role()).finish()
    }
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Session over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    // ── Reads ────────────────────────────────────────────

    /// Current role. Unrecognized stored values read as `Anonymous`.
    pub fn role(&self) -> Role {
        match self.store.get(KEY_ROLE) {
            None => Role::Anonymous,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(stored = %raw, "Ignoring unrecognized stored role");
                Role::Anonymous
            }),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(KEY_TOKEN).filter(|t| !t.is_empty())
    }

    pub fn doctor_id(&self) -> Option<String> {
        self.store.get(KEY_DOCTOR_ID).filter(|v| !v.is_empty())
    }

    pub fn patient_id(&self) -> Option<String> {
        self.store.get(KEY_PATIENT_ID).filter(|v| !v.is_empty())
    }

    pub fn snapshot(&self) -> SessionState {
        SessionState {
            role: self.role(),
            token: self.token(),
            doctor_id: self.doctor_id(),
            patient_id: self.patient_id(),
        }
    }

    /// Detect an authenticated role that lost its token.
    pub fn check(&self) -> SessionCheck {
        let role = self.role();
        if role.requires_token() && self.token().is_none() {
            SessionCheck::Expired(role)
        } else {
            SessionCheck::Valid(role)
        }
    }

    // ── Transitions ──────────────────────────────────────

    /// Role selection from the landing page. No server call.
    pub fn select_role(&self, role: Role) -> Result<(), SessionError> {
        if !role.is_selectable() {
            return Err(SessionError::NotSelectable(role));
        }
        self.drop_credential()?;
        self.store.set(KEY_ROLE, role.as_str())?;
        tracing::debug!(%role, "Role selected");
        Ok(())
    }

    /// Record a successful login for an authenticated role.
    ///
    /// Ids left by a previous user are dropped. The token is written last,
    /// so an interrupted login reads as expired, never as someone else's.
    pub fn login(&self, role: Role, token: &str) -> Result<(), SessionError> {
        if !role.requires_token() {
            return Err(SessionError::NotAuthenticatedRole(role));
        }
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        self.drop_credential()?;
        self.store.set(KEY_ROLE, role.as_str())?;
        self.store.set(KEY_TOKEN, token)?;
        tracing::info!(%role, "Login recorded");
        Ok(())
    }

    pub fn set_doctor_id(&self, doctor_id: &str) -> Result<(), SessionError> {
        self.store.set(KEY_DOCTOR_ID, doctor_id)?;
        Ok(())
    }

    pub fn set_patient_id(&self, patient_id: &str) -> Result<(), SessionError> {
        self.store.set(KEY_PATIENT_ID, patient_id)?;
        Ok(())
    }

    /// Any state → anonymous. Clears every session key.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.clear_role()?;
        tracing::info!("Session cleared");
        Ok(())
    }

    /// loggedPatient → patient. Drops the credential, keeps the patient browsing.
    pub fn logout_patient(&self) -> Result<(), SessionError> {
        self.store.remove(KEY_TOKEN)?;
        self.store.remove(KEY_PATIENT_ID)?;
        self.store.set(KEY_ROLE, Role::Patient.as_str())?;
        tracing::info!("Patient logged out");
        Ok(())
    }

    /// Back to anonymous. Used on the landing page and on expiry. The
    /// credential goes with the role: an anonymous session holds no token.
    pub fn clear_role(&self) -> Result<(), SessionError> {
        self.drop_credential()?;
        self.store.remove(KEY_ROLE)?;
        Ok(())
    }

    fn drop_credential(&self) -> Result<(), SessionError> {
        for key in [KEY_TOKEN, KEY_DOCTOR_ID, KEY_PATIENT_ID] {
            self.store.remove(key)?;
        }
        Ok(())
    }
}
