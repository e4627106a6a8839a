// ============================================================================
// FORMAL VERIFICATION & PROPERTY-BASED TESTS
// ============================================================================
//
// Run with: cargo test --lib formal_verification
//
// This module implements:
// 1. Property-based tests (invariants, via proptest)
// 2. Fuzzing harnesses for the untrusted config parser
// 3. Hand-checked invariant sweeps
// ============================================================================
