//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Trimmed request path + query string
//!     → translator.rs (ordered rule lookup)
//!     → rules.rs (evaluate each rewrite rule)
//!     → Return: TargetDescriptor (absolute https URL)
//!
//! Rule order:
//!     users/<id>            → users.<origin>/v1/users/<id>
//!     v<n>/users/...        → users.<origin>/<path>
//!     <sub>/<rest> | <seg>  → <sub>.<origin>/<rest> | www.<origin>/<seg>
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparisons only)
//! - Deterministic: same input always yields the same target
//! - First match wins

pub mod rules;
pub mod translator;

pub use translator::{PathTranslator, TargetDescriptor, DEFAULT_ORIGIN};
