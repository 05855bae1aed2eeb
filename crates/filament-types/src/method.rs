//! Method and constructor identities.
//!
//! A [`MethodRef`] is the verifier's view of one declared method: owner
//! type, name, descriptor, and the flags the decision procedure branches
//! on. References are handed out as `Arc<MethodRef>` by the registry so
//! frames and verdicts can share them without copying.

use std::fmt;

/// Identity of a method or constructor declared on a guest type.
///
/// Two references denote the same method when their (owner, name,
/// descriptor) triples agree; the flags are derived properties of that
/// identity and do not participate in equality.
#[derive(Debug, Clone)]
pub struct MethodRef {
    /// Dotted name of the declaring type, e.g. `com.example.Queue`.
    pub owner: String,
    /// Simple method name, or `<init>` for constructors.
    pub name: String,
    /// Descriptor in `(params)ret` form, e.g. `()Ljava/lang/Object;`.
    pub descriptor: String,
    /// Compiler-generated (bridge, accessor, lambda body).
    pub synthetic: bool,
    /// Constructor rather than ordinary method.
    pub constructor: bool,
}

impl MethodRef {
    /// Create a non-synthetic method reference.
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
            synthetic: false,
            constructor: false,
        }
    }

    /// Mark this reference as compiler-synthetic.
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// Mark this reference as a constructor.
    pub fn constructor(mut self) -> Self {
        self.constructor = true;
        self
    }

    /// Name plus descriptor, the suffix recorded call-site names end with.
    pub fn name_and_descriptor(&self) -> String {
        format!(".{}{}", self.name, self.descriptor)
    }

    /// Fully qualified rendering for diagnostics, e.g.
    /// `com.example.Queue.poll()Ljava/lang/Object;`.
    pub fn qualified(&self) -> String {
        format!("{}.{}{}", self.owner, self.name, self.descriptor)
    }
}

impl PartialEq for MethodRef {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner
            && self.name == other.name
            && self.descriptor == other.descriptor
    }
}

impl Eq for MethodRef {}

impl std::hash::Hash for MethodRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.name.hash(state);
        self.descriptor.hash(state);
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified())
    }
}
