//! Synthetic-vs-lambda classification.

use filament_types::MethodRef;

use crate::LAMBDA_METHOD_PREFIX;

/// True for compiler-synthetic methods that are not lambda bodies.
///
/// Bridges and accessors carry no user code and are always trusted.
/// Lambda bodies are synthetic too but can contain (or be) suspension
/// points, so they must still pass full verification.
pub fn is_synthetic_non_lambda(method: &MethodRef) -> bool {
    method.synthetic && !method.name.starts_with(LAMBDA_METHOD_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_is_trusted() {
        let bridge = MethodRef::new("com.example.Foo", "compareTo", "(Ljava/lang/Object;)I")
            .synthetic();
        assert!(is_synthetic_non_lambda(&bridge));
    }

    #[test]
    fn test_lambda_body_is_not_trusted() {
        let lambda = MethodRef::new("com.example.Foo", "lambda$bar$0", "()V").synthetic();
        assert!(!is_synthetic_non_lambda(&lambda));
    }

    #[test]
    fn test_plain_method_is_not_trusted() {
        let plain = MethodRef::new("com.example.Foo", "bar", "()V");
        assert!(!is_synthetic_non_lambda(&plain));
    }
}
