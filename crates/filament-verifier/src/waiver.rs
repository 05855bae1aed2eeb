//! Process-wide waiver registry.
//!
//! Waivers mark (type, method) pairs that are safe to treat as
//! transparent passthrough frames even though no instrumentation
//! metadata describes them — typically frames generated at run time by
//! reflection, dynamic proxies, or bytecode-generation libraries, which
//! the ahead-of-time rewriter never sees.
//!
//! The set is append-only for the process's lifetime: there is no
//! removal operation, so a lookup that returned true can never later
//! return false (monotonicity is relied on by callers that cache
//! resolution results).

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use parking_lot::RwLock;

/// Class-name prefixes of reflection and dynamic-proxy internals, waived
/// wholesale.
const WAIVED_PREFIXES: [&str; 3] = ["java.lang.reflect", "sun.reflect", "com.sun.proxy"];

/// Marker bytecode-generation libraries embed in generated class names.
const BYTECODE_GEN_MARKER: &str = "$ByteBuddy$";

/// Internal wrapper the runtime uses to run void suspendable callables.
const VOID_CALLABLE_CLASS: &str = "filament.strands.SuspendableUtils$VoidSuspendableCallable";

/// Internal dataflow-variable type whose setter suspends waiters.
const DATAFLOW_VAR_CLASS: &str = "filament.strands.dataflow.Var";

// Keyed by class name so lookups borrow instead of allocating a pair.
static WAIVERS: LazyLock<RwLock<HashMap<String, HashSet<String>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Register a (class, method) pair as waived. Idempotent, thread-safe,
/// and permanent: waivers are never removed.
pub fn add_waiver(class_name: &str, method_name: &str) {
    WAIVERS
        .write()
        .entry(class_name.to_owned())
        .or_default()
        .insert(method_name.to_owned());
}

/// True when the pair is waived, either by one of the fixed built-in
/// rules or by an earlier [`add_waiver`] call.
pub fn is_waiver(class_name: &str, method_name: &str) -> bool {
    if WAIVED_PREFIXES.iter().any(|p| class_name.starts_with(p))
        || class_name.contains(BYTECODE_GEN_MARKER)
        || (class_name == VOID_CALLABLE_CLASS && method_name == "run")
        || (class_name == DATAFLOW_VAR_CLASS && method_name == "set")
    {
        return true;
    }
    WAIVERS
        .read()
        .get(class_name)
        .is_some_and(|methods| methods.contains(method_name))
}
