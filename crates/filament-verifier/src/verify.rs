//! The call-site decision procedure.
//!
//! Given a caller method, a candidate call site, and the surrounding
//! stack trace, decide whether the site is a verified suspension point,
//! an implicitly-trusted internal runtime call, or an unverifiable site.
//!
//! Name-based matching is preferred when the metadata records call-site
//! names: source line numbers become unreliable after inlining and
//! line-table compression, while the declared target of a call survives
//! both. Line-based matching remains as the fallback for methods
//! instrumented before name metadata existed.

use std::sync::Arc;

use tracing::{debug, trace};

use filament_types::{FrameDescriptor, MethodRef, SuspensionMetadata, Verdict};

use crate::{
    callsite, classify, SuspensionVerifier, FIBER_CLASS, POP_METHOD, STACK_CLASS,
    VERIFY_SUSPEND_METHOD,
};

/// Runtime bookkeeping calls on the suspend path; never user suspension
/// points, so frames calling into them are trusted outright.
fn is_internal_runtime_call(callee: &FrameDescriptor) -> bool {
    (callee.declaring_type == FIBER_CLASS && callee.method_name == VERIFY_SUSPEND_METHOD)
        || (callee.declaring_type == STACK_CLASS && callee.method_name == POP_METHOD)
}

impl SuspensionVerifier {
    /// Verify one candidate suspension point.
    ///
    /// `trace` is the suspending fiber's captured stack, consistently
    /// indexed so that the callee of frame `i` sits at `i - 1`;
    /// `current_frame` indexes the caller's frame. `instruction_offset`
    /// is accepted for diagnostics only: offset-based matching proved
    /// too brittle to compiler and runtime variance and is deliberately
    /// not part of the decision.
    ///
    /// Never fails; every outcome is a [`Verdict`].
    pub fn verify(
        &self,
        caller: Option<&Arc<MethodRef>>,
        source_line: i32,
        instruction_offset: i32,
        trace: &[FrameDescriptor],
        current_frame: usize,
    ) -> Verdict {
        let Some(caller) = caller else {
            return Verdict::Unresolvable;
        };

        if classify::is_synthetic_non_lambda(caller) {
            return Verdict::TrustedPassthrough;
        }

        let callee = current_frame
            .checked_sub(1)
            .and_then(|idx| trace.get(idx));

        if let Some(callee) = callee {
            if is_internal_runtime_call(callee) {
                return Verdict::TrustedPassthrough;
            }
        }

        trace!(
            caller = %caller.qualified(),
            source_line,
            instruction_offset,
            "verifying call site"
        );

        let Some(meta) = self.metadata_of(caller) else {
            return Verdict::Unverified(None);
        };

        // Name-based matching takes exclusive precedence over the line
        // fallback once a callee frame is available to match against.
        if !meta.suspendable_call_site_names.is_empty() {
            if let Some(callee) = callee {
                return match &callee.method {
                    Some(callee_method) => self.match_resolved_callee(meta, callee_method),
                    None => Self::match_unresolved_callee(meta, &callee.method_name),
                };
            }
        }

        if source_line >= 0 && meta.suspendable_call_sites.contains(&source_line) {
            return Verdict::Verified(meta);
        }
        Verdict::Unverified(Some(meta))
    }

    /// The callee frame never resolved to a handle; all that is known is
    /// its simple name, so match any recorded target containing
    /// `.name(`.
    fn match_unresolved_callee(meta: Arc<SuspensionMetadata>, callee_name: &str) -> Verdict {
        let fragment = format!(".{callee_name}(");
        if meta
            .suspendable_call_site_names
            .iter()
            .any(|cs| cs.contains(&fragment))
        {
            Verdict::Verified(meta)
        } else {
            Verdict::Unverified(Some(meta))
        }
    }

    /// The callee resolved: require an exact name-plus-descriptor suffix
    /// match, and accept a candidate only when its recorded owner type
    /// is assignable from the callee's actual declaring type. A call
    /// site recorded against an interface or superclass thereby matches
    /// an overriding implementation.
    fn match_resolved_callee(
        &self,
        meta: Arc<SuspensionMetadata>,
        callee: &Arc<MethodRef>,
    ) -> Verdict {
        let suffix = callee.name_and_descriptor();
        for cs in &meta.suspendable_call_site_names {
            if !cs.ends_with(&suffix) {
                continue;
            }
            let owner = match callsite_owner_checked(cs) {
                Some(owner) => owner,
                None => continue,
            };
            if self.registry().lookup_type(&owner).is_none() {
                // An unknown owner type must not abort the scan; other
                // candidates may still match.
                debug!(owner = %owner, callsite = %cs, "call-site owner not registered, skipping");
                continue;
            }
            if self.registry().is_assignable(&owner, &callee.owner) {
                return Verdict::Verified(meta);
            }
        }
        Verdict::Unverified(Some(meta))
    }
}

fn callsite_owner_checked(cs: &str) -> Option<String> {
    match callsite::callsite_owner(cs) {
        Ok(owner) => Some(owner),
        Err(err) => {
            debug!(callsite = %cs, error = %err, "malformed call-site name, skipping");
            None
        }
    }
}
