//! Per-method suspension metadata recorded by the instrumentation pass.
//!
//! The instrumentation pass attaches one [`SuspensionMetadata`] record to
//! every method it rewrites. The record is created once, attached to the
//! registry at load time, and read-only thereafter.
//!
//! Call sites are identified two ways:
//! - **by source line**: the lines within the method that were rewritten
//!   as save/resume points; this is the legacy scheme and becomes
//!   unreliable after inlining or line-table compression
//! - **by qualified name**: `owner/with/slashes.name(desc)ret` strings
//!   naming the declared call target; preferred when present because it
//!   survives the transformations that break line numbers

use smallvec::SmallVec;

/// Metadata attached to an instrumented method.
#[derive(Debug, Clone, Default)]
pub struct SuspensionMetadata {
    /// First source line of the method body.
    pub method_start: i32,
    /// Last source line of the method body.
    pub method_end: i32,
    /// The rewriter elided some reconstruction steps for this method.
    pub optimized: bool,
    /// Source lines that are verified suspension points.
    pub suspendable_call_sites: SmallVec<[i32; 8]>,
    /// Qualified `owner.name(desc)` strings of suspendable call targets.
    pub suspendable_call_site_names: Vec<String>,
}

impl SuspensionMetadata {
    /// Metadata covering the given source-line extent, with no recorded
    /// call sites yet.
    pub fn new(method_start: i32, method_end: i32) -> Self {
        Self {
            method_start,
            method_end,
            ..Default::default()
        }
    }

    /// Record suspendable call sites by source line.
    pub fn with_call_site_lines(mut self, lines: impl IntoIterator<Item = i32>) -> Self {
        self.suspendable_call_sites.extend(lines);
        self
    }

    /// Record suspendable call sites by qualified target name.
    pub fn with_call_site_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.suspendable_call_site_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Mark the method as optimized by the rewriter.
    pub fn optimized(mut self) -> Self {
        self.optimized = true;
        self
    }

    /// True when `line` falls within the method's recorded extent.
    ///
    /// Used for overload disambiguation: a frame's source line selects
    /// among same-named candidates by range containment. Both bounds are
    /// inclusive.
    pub fn covers_line(&self, line: i32) -> bool {
        line >= self.method_start && line <= self.method_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_line_bounds_inclusive() {
        let meta = SuspensionMetadata::new(10, 20);
        assert!(meta.covers_line(10));
        assert!(meta.covers_line(15));
        assert!(meta.covers_line(20));
        assert!(!meta.covers_line(9));
        assert!(!meta.covers_line(21));
    }

    #[test]
    fn test_builder_accumulates_call_sites() {
        let meta = SuspensionMetadata::new(1, 5)
            .with_call_site_lines([2, 4])
            .with_call_site_names(["com/example/Queue.poll()Ljava/lang/Object;"])
            .optimized();
        assert_eq!(meta.suspendable_call_sites.as_slice(), &[2, 4]);
        assert_eq!(meta.suspendable_call_site_names.len(), 1);
        assert!(meta.optimized);
    }
}
