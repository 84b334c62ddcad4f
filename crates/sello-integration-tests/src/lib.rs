//! Cross-crate integration tests for the Sello stack live in `tests/`.
