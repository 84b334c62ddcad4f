//! # Identity Newtypes
//!
//! Domain-primitive newtypes for every identifier in the Sello stack.
//! Each identifier is a distinct type — you cannot pass a [`Commitment`]
//! where a [`ProofId`] is expected.
//!
//! ## Validation
//!
//! Hex-backed identifiers ([`ProofId`], [`Commitment`], [`TxHash`],
//! [`WalletAddress`]) validate format at construction time and serialize
//! as `0x`-prefixed lowercase hex. UUID-based identifiers ([`RecordId`],
//! [`UserId`]) are always valid by construction.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Hex helpers
// ---------------------------------------------------------------------------

fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

/// Decode a `0x`-prefixed hex string into exactly `N` bytes.
fn decode_hex<const N: usize>(input: &str) -> Option<[u8; N]> {
    let hex = input.strip_prefix("0x").unwrap_or(input);
    if hex.len() != N * 2 {
        return None;
    }
    let mut out = [0u8; N];
    for (i, chunk) in out.iter_mut().enumerate() {
        *chunk = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(out)
}

// ---------------------------------------------------------------------------
// 32-byte opaque identifiers
// ---------------------------------------------------------------------------

/// The 32-byte anchored identifier of a sealed proof.
///
/// Chosen at creation time by hashing the holder, epoch, and freshness
/// nonce; this is the only identifier the ledger knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProofId([u8; 32]);

impl ProofId {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a `0x`-prefixed 64-hex-character identifier.
    pub fn from_hex(input: &str) -> Result<Self, ValidationError> {
        decode_hex(input.trim())
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidProofId(input.to_string()))
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The `0x`-prefixed lowercase hex form.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }
}

impl std::fmt::Display for ProofId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ProofId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ProofId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}

/// The 32-byte opaque hash binding a factor set without revealing it.
///
/// One-wayness of the underlying digest is the entire privacy property:
/// the factor set is not derivable from the commitment without the exact
/// pre-image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; 32]);

impl Commitment {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a `0x`-prefixed 64-hex-character commitment.
    pub fn from_hex(input: &str) -> Result<Self, ValidationError> {
        decode_hex(input.trim())
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidCommitment(input.to_string()))
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The `0x`-prefixed lowercase hex form.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}

/// Reference to the ledger transaction that anchored a proof.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TxHash(String);

impl TxHash {
    /// Parse a `0x`-prefixed 64-hex-character transaction hash.
    pub fn new(input: impl Into<String>) -> Result<Self, ValidationError> {
        let s: String = input.into();
        let trimmed = s.trim();
        if decode_hex::<32>(trimmed).is_none() {
            return Err(ValidationError::InvalidTxHash(s));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// The `0x`-prefixed hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TxHash {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TxHash> for String {
    fn from(value: TxHash) -> Self {
        value.0
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Holder identity
// ---------------------------------------------------------------------------

/// A holder's wallet address, normalized to lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parse a `0x`-prefixed 40-hex-character address.
    pub fn new(input: impl Into<String>) -> Result<Self, ValidationError> {
        let s: String = input.into();
        let trimmed = s.trim();
        if decode_hex::<20>(trimmed).is_none() {
            return Err(ValidationError::InvalidAddress(s));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// The normalized `0x`-prefixed form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The raw 20 address bytes.
    pub fn to_bytes(&self) -> [u8; 20] {
        // Validated at construction; decoding cannot fail here.
        decode_hex(&self.0).unwrap_or([0u8; 20])
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// Surrogate identifier of an off-chain proof record.
///
/// Distinct from [`ProofId`]: the ledger only knows the anchored id, the
/// relational store keys rows by this one. Both are retained on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Create a new random record identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a registered holder in the off-chain `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Create a new random user identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Ledger context
// ---------------------------------------------------------------------------

/// Numeric identifier of the chain a ledger lives on.
///
/// Writing against the wrong chain is a precondition failure surfaced
/// before any transaction is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(u64);

impl ChainId {
    /// Wrap a raw chain id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw numeric id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
