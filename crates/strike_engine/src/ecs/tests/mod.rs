//! Cross-system integration tests

mod targeting_integration;
