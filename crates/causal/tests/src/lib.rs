//! End-to-end and property suites for the causal loop. See `tests/`.
