//! Stack-frame descriptors supplied by the unwinder.

use std::sync::Arc;

use crate::method::MethodRef;

/// Snapshot of one call frame at suspend time.
///
/// Produced by the unwinder for each frame on the suspending fiber's
/// stack; immutable once captured. The method handle is absent until
/// resolution runs (the unwinder fills it in when the runtime already
/// knows the exact method, e.g. for its own internal frames).
#[derive(Debug, Clone)]
pub struct FrameDescriptor {
    /// Dotted name of the type declaring the frame's method.
    pub declaring_type: String,
    /// Simple method name as reported by the unwinder.
    pub method_name: String,
    /// Source line of the call site, negative when unknown.
    pub line: i32,
    /// Pre-resolved method handle, if the unwinder had one.
    pub method: Option<Arc<MethodRef>>,
}

impl FrameDescriptor {
    /// Frame with no pre-resolved method handle.
    pub fn new(declaring_type: impl Into<String>, method_name: impl Into<String>, line: i32) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            method_name: method_name.into(),
            line,
            method: None,
        }
    }

    /// Frame carrying an already-resolved method handle.
    pub fn resolved(method: Arc<MethodRef>, line: i32) -> Self {
        Self {
            declaring_type: method.owner.clone(),
            method_name: method.name.clone(),
            line,
            method: Some(method),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_frame_mirrors_handle() {
        let m = Arc::new(MethodRef::new("com.example.Foo", "bar", "()V"));
        let frame = FrameDescriptor::resolved(Arc::clone(&m), 12);
        assert_eq!(frame.declaring_type, "com.example.Foo");
        assert_eq!(frame.method_name, "bar");
        assert_eq!(frame.line, 12);
        assert!(frame.method.is_some());
    }
}
