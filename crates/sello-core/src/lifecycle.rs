//! # Proof Lifecycle Axes
//!
//! A sealed proof lives on two independent axes:
//!
//! - **Validity**: `Active -> Revoked`. One-way, authority-gated, persisted
//!   by the store that holds the proof.
//! - **Freshness**: `Fresh -> Expired`. A pure function of wall-clock time
//!   against `expires_at`, never persisted as a transition.
//!
//! A verifier must reject a proof if either axis is unfavorable, and must
//! report which one — the two imply different remediation (revoked: contact
//! the issuer; expired: the holder regenerates).

use serde::{Deserialize, Serialize};

use crate::temporal::Timestamp;

/// The freshness axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Freshness {
    /// `now <= expires_at`.
    Fresh,
    /// `now > expires_at`.
    Expired,
}

/// Evaluate the freshness axis at `now`.
pub fn freshness(now: &Timestamp, expires_at: &Timestamp) -> Freshness {
    if now > expires_at {
        Freshness::Expired
    } else {
        Freshness::Fresh
    }
}

/// Whether a verifier may accept a proof, and if not, which axis failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acceptability {
    /// Valid and fresh.
    Acceptable,
    /// The validity axis failed. Checked first: revocation is an explicit
    /// authority decision and outranks the clock.
    Revoked,
    /// The freshness axis failed.
    Expired,
}

/// Combine both axes into a single verifier-facing verdict.
pub fn acceptability(valid: bool, now: &Timestamp, expires_at: &Timestamp) -> Acceptability {
    if !valid {
        Acceptability::Revoked
    } else if freshness(now, expires_at) == Freshness::Expired {
        Acceptability::Expired
    } else {
        Acceptability::Acceptable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_unix_seconds(secs)
    }

    #[test]
    fn fresh_until_the_boundary_inclusive() {
        assert_eq!(freshness(&ts(100), &ts(100)), Freshness::Fresh);
        assert_eq!(freshness(&ts(101), &ts(100)), Freshness::Expired);
    }

    #[test]
    fn acceptable_when_valid_and_fresh() {
        assert_eq!(acceptability(true, &ts(50), &ts(100)), Acceptability::Acceptable);
    }

    #[test]
    fn revoked_wins_over_expired() {
        // Both axes unfavorable: report the authority decision.
        assert_eq!(acceptability(false, &ts(200), &ts(100)), Acceptability::Revoked);
    }

    #[test]
    fn expired_when_valid_but_stale() {
        assert_eq!(acceptability(true, &ts(200), &ts(100)), Acceptability::Expired);
    }
}
