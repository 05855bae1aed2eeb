//! Shared types for the Filament suspension-verifier workspace.
//!
//! This crate provides the data model consumed by the verifier:
//! - [`frame`]: stack-frame descriptors produced by the unwinder
//! - [`method`]: method/constructor identities resolved from frames
//! - [`metadata`]: per-method suspension metadata recorded by the
//!   instrumentation pass
//! - [`verdict`]: the categorical outcome of verifying one call site
//! - [`registry`]: the load-time-populated view of guest types and the
//!   method-to-metadata side table
//!
//! Everything here is plain data: the registry is populated once by the
//! instrumentation pass, published behind an `Arc`, and never mutated
//! afterwards, so all types are safe to share across scheduler workers.

pub mod frame;
pub mod metadata;
pub mod method;
pub mod registry;
pub mod verdict;

// Re-export the commonly used types at crate root
pub use frame::FrameDescriptor;
pub use metadata::SuspensionMetadata;
pub use method::MethodRef;
pub use registry::{TypeDef, TypeRegistry};
pub use verdict::Verdict;
