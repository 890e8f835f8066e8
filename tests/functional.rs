//! Functional tests against the live Steam Web API
//!
//! Opt-in via the `functional-tests` feature and a real API key:
//!
//! ```bash
//! STEAM_API_KEY=... cargo test --features functional-tests --test functional
//! ```
//!
//! Every command used here is read-only.
//!
//! - `read_tests` - lookups that should succeed
//! - `error_tests` - expected failure scenarios

#[cfg(feature = "functional-tests")]
#[path = "functional/mod.rs"]
mod functional_harness;

#[cfg(feature = "functional-tests")]
pub use functional_harness::*;
