//! Sealframe workspace root.
//!
//! Carries no code of its own. It exists so development tooling (git hooks
//! installed by `cargo-husky`) runs for the whole workspace. The library
//! lives in `crates/sealframe-crypto`.
