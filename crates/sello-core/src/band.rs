//! # Credit Bands
//!
//! The three-valued ordinal scale assigned to every credit factor, and the
//! aggregation rule that collapses a factor set into a binary outcome.
//!
//! ## Ordering
//!
//! `A` is the strongest signal, `C` the weakest: `A > B > C`. The ledger
//! encodes bands as small unsigned integers (`0 = A`, `1 = B`, `2 = C`);
//! off-chain records carry the letter. The two representations are
//! losslessly interconvertible, and any integer outside `{0, 1, 2}` is
//! rejected with [`ValidationError::InvalidBandCode`] rather than coerced.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One ordinal credit band. `A` best, `C` worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// Strongest creditworthiness signal.
    A,
    /// Intermediate signal.
    B,
    /// Weakest signal.
    C,
}

impl Band {
    /// All bands, strongest first. Used by table-driven tests and the
    /// simulator to enumerate combinations.
    pub const ALL: [Band; 3] = [Band::A, Band::B, Band::C];

    /// The ledger wire code for this band (`0 = A`, `1 = B`, `2 = C`).
    pub fn code(self) -> u8 {
        match self {
            Band::A => 0,
            Band::B => 1,
            Band::C => 2,
        }
    }

    /// Decode a ledger wire code. Total over `{0, 1, 2}`; anything else
    /// fails with [`ValidationError::InvalidBandCode`].
    pub fn from_code(code: u8) -> Result<Self, ValidationError> {
        match code {
            0 => Ok(Band::A),
            1 => Ok(Band::B),
            2 => Ok(Band::C),
            other => Err(ValidationError::InvalidBandCode(other)),
        }
    }

    /// The letter form used by off-chain records.
    pub fn letter(self) -> &'static str {
        match self {
            Band::A => "A",
            Band::B => "B",
            Band::C => "C",
        }
    }

    /// Compare two bands under the credit order `A > B > C`.
    ///
    /// Returns `Ordering::Greater` when `self` is the stronger signal.
    pub fn compare(self, other: Band) -> Ordering {
        // Lower wire code = stronger band, so the comparison inverts.
        other.code().cmp(&self.code())
    }

    /// True iff `self` is at least as strong as `minimum`.
    ///
    /// `A` meets a `B` minimum; `C` does not.
    pub fn meets_threshold(self, minimum: Band) -> bool {
        self.compare(minimum) != Ordering::Less
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.letter())
    }
}

/// The coarse outcome of aggregating a factor set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Every factor is band `A` — the holder qualifies.
    Apto,
    /// Anything less — the holder nearly qualifies.
    Casi,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Apto => f.write_str("apto"),
            Outcome::Casi => f.write_str("casi"),
        }
    }
}

/// Exactly three named factor bands. No partial sets exist: construction
/// requires all three fields.
///
/// Field order is fixed (`stability`, `inflows`, `risk`) and is the
/// canonical serialization order for commitment pre-images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactorSet {
    /// Income/balance stability over the observation window.
    pub stability: Band,
    /// Inbound cash-flow strength.
    pub inflows: Band,
    /// Exposure to risky counterparties and drawdowns.
    pub risk: Band,
}

impl FactorSet {
    /// Build a factor set from the three bands in canonical order.
    pub fn new(stability: Band, inflows: Band, risk: Band) -> Self {
        Self {
            stability,
            inflows,
            risk,
        }
    }

    /// Decode a factor set from ledger wire codes.
    pub fn from_codes(stability: u8, inflows: u8, risk: u8) -> Result<Self, ValidationError> {
        Ok(Self {
            stability: Band::from_code(stability)?,
            inflows: Band::from_code(inflows)?,
            risk: Band::from_code(risk)?,
        })
    }

    /// The ledger wire codes in canonical order.
    pub fn codes(&self) -> (u8, u8, u8) {
        (self.stability.code(), self.inflows.code(), self.risk.code())
    }

    /// Collapse the factor set into the binary outcome.
    ///
    /// Strict all-or-nothing: `Apto` iff every factor is band `A`. There is
    /// no partial credit and no weighted scoring.
    pub fn aggregate(&self) -> Outcome {
        if self.stability == Band::A && self.inflows == Band::A && self.risk == Band::A {
            Outcome::Apto
        } else {
            Outcome::Casi
        }
    }

    /// True iff every factor meets its respective minimum.
    ///
    /// This is the threshold-based verification entry point the ledger
    /// exposes as `verify_bands`, distinct from [`FactorSet::aggregate`].
    pub fn meets_minimums(&self, minimums: &FactorSet) -> bool {
        self.stability.meets_threshold(minimums.stability)
            && self.inflows.meets_threshold(minimums.inflows)
            && self.risk.meets_threshold(minimums.risk)
    }
}

impl std::fmt::Display for FactorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "stability={} inflows={} risk={}",
            self.stability, self.inflows, self.risk
        )
    }
}
