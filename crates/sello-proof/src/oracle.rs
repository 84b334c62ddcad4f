//! # Factor Oracle
//!
//! The seam between the sealed-proof protocol and whatever computes the
//! credit bands. The protocol is indifferent to the source; it binds
//! whatever bands the oracle attests.
//!
//! ## Security Notice
//!
//! [`MockFactorOracle`] draws bands at random. It carries no credit
//! signal and no attestation — acceptable for the demo deployment, and
//! the exact behavior the trait exists to replace.

use rand::Rng;

use sello_core::{Band, Epoch, FactorSet, WalletAddress};

use crate::error::OracleError;

/// Source of attested factor bands for a holder in an epoch.
#[allow(async_fn_in_trait)]
pub trait FactorOracle: Send + Sync {
    /// Produce the factor bands for one generation attempt.
    async fn attest(&self, owner: &WalletAddress, epoch: Epoch)
        -> Result<FactorSet, OracleError>;
}

/// Random mock: half the time a clean all-A profile, otherwise the
/// near-pass profile the demo shows on the "almost" screen.
#[derive(Debug, Default)]
pub struct MockFactorOracle;

impl FactorOracle for MockFactorOracle {
    async fn attest(
        &self,
        _owner: &WalletAddress,
        _epoch: Epoch,
    ) -> Result<FactorSet, OracleError> {
        if rand::thread_rng().gen_bool(0.5) {
            Ok(FactorSet::new(Band::A, Band::A, Band::A))
        } else {
            Ok(FactorSet::new(Band::B, Band::B, Band::C))
        }
    }
}

/// Deterministic oracle for tests and scripted demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedFactorOracle {
    factors: FactorSet,
}

impl FixedFactorOracle {
    /// Always attest the given bands.
    pub fn new(factors: FactorSet) -> Self {
        Self { factors }
    }
}

impl FactorOracle for FixedFactorOracle {
    async fn attest(
        &self,
        _owner: &WalletAddress,
        _epoch: Epoch,
    ) -> Result<FactorSet, OracleError> {
        Ok(self.factors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> WalletAddress {
        WalletAddress::new("0x00000000000000000000000000000000000000ee").unwrap()
    }

    #[tokio::test]
    async fn mock_produces_only_the_two_demo_profiles() {
        let oracle = MockFactorOracle;
        for _ in 0..64 {
            let factors = oracle.attest(&addr(), Epoch::new(1)).await.unwrap();
            let apto = FactorSet::new(Band::A, Band::A, Band::A);
            let casi = FactorSet::new(Band::B, Band::B, Band::C);
            assert!(factors == apto || factors == casi);
        }
    }

    #[tokio::test]
    async fn fixed_oracle_is_deterministic() {
        let factors = FactorSet::new(Band::A, Band::B, Band::C);
        let oracle = FixedFactorOracle::new(factors);
        assert_eq!(oracle.attest(&addr(), Epoch::new(1)).await.unwrap(), factors);
    }
}
