//! # Share Tokens
//!
//! Opaque capability strings that let a third party resolve one proof
//! without holder authentication. A token is `proof_` followed by 26
//! alphanumeric characters drawn from a CSPRNG — just over 150 bits of
//! entropy, comfortably past the 120-bit unguessability floor.
//!
//! Token comparison is constant-time: lookups must not leak how much of a
//! guessed token matched.

use rand::distributions::Alphanumeric;
use rand::Rng;
use subtle::ConstantTimeEq;

use sello_core::ValidationError;

/// Prefix carried by every issued token.
pub const TOKEN_PREFIX: &str = "proof_";

/// Random characters after the prefix.
const TOKEN_RANDOM_LEN: usize = 26;

/// Draw a fresh share token from the thread CSPRNG.
pub fn generate_share_token() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{TOKEN_PREFIX}{suffix}")
}

/// Constant-time token equality.
///
/// Length is not secret (every issued token has the same shape), so a
/// length mismatch may return early; the byte comparison itself never does.
pub fn tokens_match(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check that a caller-supplied string has the issued-token shape before
/// any lookup is attempted.
pub fn validate_token_shape(token: &str) -> Result<(), ValidationError> {
    let rest = token
        .strip_prefix(TOKEN_PREFIX)
        .ok_or_else(|| ValidationError::InvalidShareToken(token.to_string()))?;
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidShareToken(token.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_have_the_issued_shape() {
        let token = generate_share_token();
        assert!(token.starts_with(TOKEN_PREFIX));
        assert_eq!(token.len(), TOKEN_PREFIX.len() + TOKEN_RANDOM_LEN);
        validate_token_shape(&token).unwrap();
    }

    #[test]
    fn generated_tokens_are_unique() {
        let a = generate_share_token();
        let b = generate_share_token();
        assert_ne!(a, b);
    }

    #[test]
    fn match_is_exact() {
        let token = generate_share_token();
        assert!(tokens_match(&token, &token));
        assert!(!tokens_match(&token, &generate_share_token()));
        assert!(!tokens_match(&token, &token[..token.len() - 1]));
    }

    #[test]
    fn shape_validation_rejects_foreign_strings() {
        for bad in ["", "proof_", "abc123", "proof_has spaces", "proof_emoji🙂"] {
            assert!(validate_token_shape(bad).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn shape_validation_accepts_legacy_short_tokens() {
        // Tokens minted by earlier clients were two base-36 draws (~20 chars).
        validate_token_shape("proof_k3j2h1g9f8d7s6a5z4x3w2").unwrap();
    }
}
