//! Suspension-metadata accessors.

use std::sync::Arc;

use filament_types::{MethodRef, SuspensionMetadata};

use crate::{classify, SuspensionVerifier};

impl SuspensionVerifier {
    /// Metadata recorded for a method, if the instrumentation pass
    /// rewrote it. Absence is normal for uninstrumented methods.
    pub fn metadata_of(&self, method: &MethodRef) -> Option<Arc<SuspensionMetadata>> {
        self.registry().metadata_of(method)
    }

    /// True when the method can be suspended through: either a trusted
    /// synthetic non-lambda, or carrying suspension metadata.
    pub fn is_instrumented(&self, method: &MethodRef) -> bool {
        classify::is_synthetic_non_lambda(method) || self.metadata_of(method).is_some()
    }

    /// True when the rewriter marked the method optimized (some frame
    /// reconstruction steps are elided for it).
    pub fn is_optimized(&self, method: &MethodRef) -> bool {
        self.metadata_of(method).is_some_and(|meta| meta.optimized)
    }

    /// Class-level instrumented marker on a guest type.
    pub fn is_type_instrumented(&self, type_name: &str) -> bool {
        self.registry()
            .lookup_type(type_name)
            .is_some_and(|ty| ty.instrumented)
    }
}
