//! Tracing initialization smoke tests.

use cvector_core::tracing::init_tracing;
use cvector_core::{spin, CorrelationVector};

#[test]
fn test_init_tracing_is_idempotent() {
    std::env::set_var("CVECTOR_LOG", "cvector_core=debug");
    init_tracing();
    init_tracing();

    // Exercise the logged paths: degraded inference, freeze, spin.
    let degraded = CorrelationVector::extend("bad.1").unwrap();
    assert!(degraded.error.is_some());

    let base = "tul4NUsfs9Cl7mOf.2147483647.2147483647.2147483647.21474836479";
    let cv = CorrelationVector::extend(base).unwrap().into_value();
    for _ in 0..10 {
        cv.increment();
    }
    assert!(cv.is_immutable());

    assert!(spin("tul4NUsfs9Cl7mOf.0").is_ok());
}
