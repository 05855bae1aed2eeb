//! Suspension-point verification for the Filament fiber runtime.
//!
//! Fiber suspension works by unwinding and later reconstructing a call
//! stack whose frames were rewritten ahead of time to save and restore
//! local state. A frame that was never rewritten (or rewritten
//! incorrectly) must not be allowed to suspend, or program state is
//! corrupted silently. This crate is the last line of defense: on the
//! unwinding path it cross-references live stack-trace information
//! against the metadata the instrumentation pass recorded per method,
//! falling back to heuristics (synthetic-method detection, waivers,
//! lambda-name conventions) for frames metadata cannot describe.
//!
//! ## Key components
//!
//! | Part | Description |
//! |------|-------------|
//! | [`SuspensionVerifier`] | Entry point; resolution, metadata access, and the call-site decision procedure |
//! | [`waiver`] | Process-wide append-only exemption set |
//! | [`classify`] | Synthetic-vs-lambda classification |
//! | [`callsite`] | Parsing of recorded `owner.name(desc)` call-site strings |
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use filament_types::{FrameDescriptor, MethodRef, SuspensionMetadata, TypeDef, TypeRegistry};
//! use filament_verifier::SuspensionVerifier;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_type(
//!     TypeDef::new("com.example.Foo").with_method(MethodRef::new("com.example.Foo", "bar", "()V")),
//! );
//! registry
//!     .attach_metadata(
//!         "com.example.Foo",
//!         "bar",
//!         "()V",
//!         SuspensionMetadata::new(10, 20).with_call_site_lines([15]),
//!     )
//!     .unwrap();
//!
//! let verifier = SuspensionVerifier::new(Arc::new(registry));
//! let frame = FrameDescriptor::new("com.example.Foo", "bar", 15);
//! let caller = verifier.resolve(&frame).expect("line 15 is inside bar");
//! let verdict = verifier.verify(Some(&caller), 15, -1, &[frame], 0);
//! assert!(verdict.is_suspendable());
//! ```
//!
//! ## Concurrency
//!
//! The verifier runs on the unwinding path of many fibers across
//! scheduler workers at once. Every operation completes synchronously,
//! never blocks, and performs no I/O. The only shared mutable state is
//! the waiver set (rare inserts, hot lookups, behind a read-write lock);
//! the type registry is populated at load time and read-only afterwards.

use std::sync::Arc;

use filament_types::TypeRegistry;

pub mod callsite;
pub mod classify;
mod instrumented;
mod resolve;
mod verify;
pub mod waiver;

pub use filament_types::{FrameDescriptor, MethodRef, SuspensionMetadata, TypeDef, Verdict};

/// Name prefix the compiler gives lambda-body methods. Synthetic methods
/// carrying this prefix still require full verification; all other
/// synthetic methods (bridges, accessors) are trusted.
pub const LAMBDA_METHOD_PREFIX: &str = "lambda$";

/// The runtime's own suspend-verification entry; calls into it are
/// bookkeeping, never user suspension points.
pub const FIBER_CLASS: &str = "filament.fibers.Fiber";
/// See [`FIBER_CLASS`].
pub const VERIFY_SUSPEND_METHOD: &str = "verifySuspend";

/// The runtime's stack-object frame-pop entry, exempt like
/// [`VERIFY_SUSPEND_METHOD`].
pub const STACK_CLASS: &str = "filament.fibers.Stack";
/// See [`STACK_CLASS`].
pub const POP_METHOD: &str = "popMethod";

/// Decides, at fiber-suspend time, whether a call frame is a legitimate
/// suspension point.
///
/// Stateless per call: each query is an independent decision over its
/// inputs, the shared type registry, and the process-wide waiver set.
/// Cheap to clone and safe to share across scheduler workers.
#[derive(Debug, Clone)]
pub struct SuspensionVerifier {
    registry: Arc<TypeRegistry>,
}

impl SuspensionVerifier {
    /// Create a verifier over a published (no longer mutated) registry.
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this verifier consults.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
}
