//! Frame-to-method resolution.

use std::sync::Arc;

use tracing::trace;

use filament_types::{FrameDescriptor, MethodRef};

use crate::{waiver, SuspensionVerifier};

impl SuspensionVerifier {
    /// Resolve a stack-frame descriptor to a concrete method handle.
    ///
    /// A pre-resolved handle on the frame is returned unchanged.
    /// Otherwise the declaring type's methods are scanned for a name
    /// match, accepting the first candidate that is synthetic, waived,
    /// or whose recorded metadata line range contains the frame's line.
    ///
    /// Overload disambiguation is intentionally approximate (name plus
    /// line-range containment): exact signature matching from a source
    /// line alone is not always possible, and the precision trade-off is
    /// acceptable because a wrong same-named candidate still fails
    /// call-site verification downstream.
    ///
    /// `None` is not an error; it propagates as `Unresolvable`.
    pub fn resolve(&self, frame: &FrameDescriptor) -> Option<Arc<MethodRef>> {
        if let Some(method) = &frame.method {
            return Some(Arc::clone(method));
        }

        let ty = self.registry().lookup_type(&frame.declaring_type)?;
        for candidate in &ty.methods {
            if candidate.name != frame.method_name {
                continue;
            }
            if candidate.synthetic || waiver::is_waiver(&candidate.owner, &candidate.name) {
                return Some(Arc::clone(candidate));
            }
            if let Some(meta) = self.registry().metadata_of(candidate) {
                if meta.covers_line(frame.line) {
                    return Some(Arc::clone(candidate));
                }
            }
        }
        trace!(
            declaring_type = %frame.declaring_type,
            method_name = %frame.method_name,
            line = frame.line,
            "no declared method matched frame"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use filament_types::{SuspensionMetadata, TypeDef, TypeRegistry};

    use super::*;

    fn verifier_with_overloads() -> SuspensionVerifier {
        let mut registry = TypeRegistry::new();
        registry.register_type(
            TypeDef::new("com.example.Worker")
                .with_method(MethodRef::new("com.example.Worker", "process", "()V"))
                .with_method(MethodRef::new("com.example.Worker", "process", "(I)V"))
                .with_method(
                    MethodRef::new("com.example.Worker", "access$000", "()V").synthetic(),
                ),
        );
        registry
            .attach_metadata(
                "com.example.Worker",
                "process",
                "()V",
                SuspensionMetadata::new(10, 20),
            )
            .unwrap();
        registry
            .attach_metadata(
                "com.example.Worker",
                "process",
                "(I)V",
                SuspensionMetadata::new(30, 40),
            )
            .unwrap();
        SuspensionVerifier::new(Arc::new(registry))
    }

    #[test]
    fn test_pre_resolved_handle_passes_through() {
        let verifier = verifier_with_overloads();
        let method = Arc::new(MethodRef::new("com.example.Other", "run", "()V"));
        let frame = FrameDescriptor::resolved(Arc::clone(&method), 99);
        assert_eq!(verifier.resolve(&frame).unwrap(), method);
    }

    #[test]
    fn test_overload_selected_by_line_range() {
        let verifier = verifier_with_overloads();

        let first = FrameDescriptor::new("com.example.Worker", "process", 15);
        assert_eq!(verifier.resolve(&first).unwrap().descriptor, "()V");

        let second = FrameDescriptor::new("com.example.Worker", "process", 35);
        assert_eq!(verifier.resolve(&second).unwrap().descriptor, "(I)V");
    }

    #[test]
    fn test_line_range_boundaries() {
        let verifier = verifier_with_overloads();

        // Inclusive bounds match.
        assert!(verifier
            .resolve(&FrameDescriptor::new("com.example.Worker", "process", 10))
            .is_some());
        assert!(verifier
            .resolve(&FrameDescriptor::new("com.example.Worker", "process", 20))
            .is_some());
        // One past either bound falls between the overload ranges.
        assert!(verifier
            .resolve(&FrameDescriptor::new("com.example.Worker", "process", 9))
            .is_none());
        assert!(verifier
            .resolve(&FrameDescriptor::new("com.example.Worker", "process", 21))
            .is_none());
    }

    #[test]
    fn test_synthetic_candidate_accepted_without_metadata() {
        let verifier = verifier_with_overloads();
        let frame = FrameDescriptor::new("com.example.Worker", "access$000", -1);
        assert!(verifier.resolve(&frame).unwrap().synthetic);
    }

    #[test]
    fn test_waived_candidate_accepted_without_metadata() {
        let mut registry = TypeRegistry::new();
        registry.register_type(
            TypeDef::new("com.thirdparty.Stub")
                .with_method(MethodRef::new("com.thirdparty.Stub", "dispatch", "()V")),
        );
        let verifier = SuspensionVerifier::new(Arc::new(registry));

        let frame = FrameDescriptor::new("com.thirdparty.Stub", "dispatch", -1);
        assert!(verifier.resolve(&frame).is_none());

        waiver::add_waiver("com.thirdparty.Stub", "dispatch");
        assert!(verifier.resolve(&frame).is_some());
    }

    #[test]
    fn test_unknown_type_is_unresolvable() {
        let verifier = verifier_with_overloads();
        let frame = FrameDescriptor::new("com.example.Missing", "process", 15);
        assert!(verifier.resolve(&frame).is_none());
    }
}
