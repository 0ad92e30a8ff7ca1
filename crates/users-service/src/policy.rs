//! Admin authorization policy: identity and expiry checks over decoded claims.
//!
//! Both checks are pure functions of the claims and a caller-supplied "now".
//! A rejection is an expected business outcome, not an error; structural
//! decode failures are handled upstream by [`crate::crypto`].

use crate::crypto::Claims;

/// Why a set of claims was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The claims do not name the configured admin identity.
    UnauthorizedIdentity,
    /// The claims named the admin but the token has expired.
    Expired,
}

/// Policy holding the single privileged identity.
///
/// Exactly one admin exists; there is no role hierarchy.
#[derive(Debug, Clone)]
pub struct AdminPolicy {
    admin_listener_id: String,
}

impl AdminPolicy {
    pub fn new(admin_listener_id: impl Into<String>) -> Self {
        Self {
            admin_listener_id: admin_listener_id.into(),
        }
    }

    /// Evaluate claims against the policy.
    ///
    /// Identity is checked before expiry, so a token that fails both reports
    /// `UnauthorizedIdentity`. A token whose `expires` equals `now_ms` is
    /// still valid.
    pub fn evaluate(&self, claims: &Claims, now_ms: i64) -> Result<(), Rejection> {
        if claims.listener_id != self.admin_listener_id {
            return Err(Rejection::UnauthorizedIdentity);
        }

        if claims.expires < now_ms {
            return Err(Rejection::Expired);
        }

        Ok(())
    }
}
