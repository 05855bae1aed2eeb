//! Verification verdicts.
//!
//! Every outcome of verifying one call site is a [`Verdict`], never an
//! error: the consumer (the scheduler's unwinding path) branches on the
//! variant and surfaces `Unverified`/`Unresolvable` as a fatal
//! verification failure for the suspending fiber.

use std::fmt;
use std::sync::Arc;

use crate::metadata::SuspensionMetadata;

/// Outcome of verifying one candidate suspension point.
#[derive(Debug, Clone)]
pub enum Verdict {
    /// Synthetic non-lambda frame or internal runtime call; always safe
    /// to suspend through, no metadata needed.
    TrustedPassthrough,
    /// The call site matched a recorded suspendable line or target name.
    /// Carries the metadata it matched against so the caller can branch
    /// on `optimized` without a second lookup.
    Verified(Arc<SuspensionMetadata>),
    /// The method resolved but this call site is not recorded as
    /// suspendable. Suspending here would corrupt fiber state.
    Unverified(Option<Arc<SuspensionMetadata>>),
    /// No method could be matched for the frame at all; usually a
    /// mismatch between instrumentation-time and run-time views of the
    /// type rather than a missing waiver.
    Unresolvable,
}

impl Verdict {
    /// True when the consumer may proceed with suspension.
    pub fn is_suspendable(&self) -> bool {
        matches!(self, Verdict::TrustedPassthrough | Verdict::Verified(_))
    }

    /// The metadata this verdict was decided against, if any.
    pub fn metadata(&self) -> Option<&Arc<SuspensionMetadata>> {
        match self {
            Verdict::Verified(meta) => Some(meta),
            Verdict::Unverified(meta) => meta.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::TrustedPassthrough => write!(f, "trusted passthrough"),
            Verdict::Verified(_) => write!(f, "verified suspension point"),
            Verdict::Unverified(Some(meta)) => write!(
                f,
                "unverified call site (method instrumented over lines {}..={}, \
                 {} recorded line(s), {} recorded name(s))",
                meta.method_start,
                meta.method_end,
                meta.suspendable_call_sites.len(),
                meta.suspendable_call_site_names.len()
            ),
            Verdict::Unverified(None) => write!(f, "unverified call site (method not instrumented)"),
            Verdict::Unresolvable => write!(f, "unresolvable frame (no matching method)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_suspendable() {
        assert!(Verdict::TrustedPassthrough.is_suspendable());
        assert!(Verdict::Verified(Arc::new(SuspensionMetadata::new(1, 2))).is_suspendable());
        assert!(!Verdict::Unverified(None).is_suspendable());
        assert!(!Verdict::Unresolvable.is_suspendable());
    }

    #[test]
    fn test_metadata_accessor() {
        let meta = Arc::new(SuspensionMetadata::new(1, 2));
        assert!(Verdict::Verified(Arc::clone(&meta)).metadata().is_some());
        assert!(Verdict::Unverified(Some(meta)).metadata().is_some());
        assert!(Verdict::Unverified(None).metadata().is_none());
        assert!(Verdict::Unresolvable.metadata().is_none());
    }
}
