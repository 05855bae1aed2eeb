//! Parsing of recorded call-site-name strings.
//!
//! The instrumentation pass records suspendable call targets as
//! `owner/with/slashes.name(desc)ret`, e.g.
//! `com/example/Queue.poll()Ljava/lang/Object;`. The owner uses slash
//! separators (the form the rewriter sees in the constant pool); these
//! helpers convert it back to the dotted form the registry is keyed by.
//!
//! Malformed strings yield errors; the verifier swallows them per
//! candidate (a single bad entry must not abort the whole scan).

use anyhow::{bail, Result};

/// Dotted owner-type name of a recorded call site.
pub fn callsite_owner(callsite: &str) -> Result<String> {
    let Some(dot) = callsite.find('.') else {
        bail!("malformed call-site name (no owner separator): {callsite}");
    };
    Ok(callsite[..dot].replace('/', "."))
}

/// Simple method name of a recorded call site.
pub fn callsite_name(callsite: &str) -> Result<String> {
    let Some(dot) = callsite.find('.') else {
        bail!("malformed call-site name (no owner separator): {callsite}");
    };
    let Some(paren) = callsite.find('(') else {
        bail!("malformed call-site name (no descriptor): {callsite}");
    };
    if paren <= dot {
        bail!("malformed call-site name (descriptor precedes owner): {callsite}");
    }
    Ok(callsite[dot + 1..paren].to_owned())
}

/// Descriptor of a recorded call site, `(params)ret`.
pub fn callsite_desc(callsite: &str) -> Result<String> {
    let Some(paren) = callsite.find('(') else {
        bail!("malformed call-site name (no descriptor): {callsite}");
    };
    Ok(callsite[paren..].to_owned())
}
