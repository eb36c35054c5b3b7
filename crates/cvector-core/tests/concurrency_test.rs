//! Concurrent increment tests: every caller must get a distinct value.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use rayon::prelude::*;

use cvector_core::{spin, CorrelationVector};

#[test]
fn test_increment_is_unique_across_threads() {
    let root = CorrelationVector::create();
    let cv = Arc::new(CorrelationVector::extend(&root.value()).unwrap().into_value());

    let handles: Vec<_> = (0..1000)
        .map(|_| {
            let cv = Arc::clone(&cv);
            thread::spawn(move || cv.increment())
        })
        .collect();

    let mut unique = HashSet::new();
    for handle in handles {
        let value = handle.join().unwrap();
        assert!(unique.insert(value.clone()), "non unique cV found: {value}");
    }
    assert_eq!(unique.len(), 1000);
    assert_eq!(cv.extension(), 1000);
}

#[test]
fn test_parallel_increments_cover_every_extension() {
    let cv = CorrelationVector::create();
    let values: Vec<String> = (0..10_000).into_par_iter().map(|_| cv.increment()).collect();

    let mut extensions: Vec<u32> = values
        .iter()
        .map(|v| v.rsplit('.').next().unwrap().parse().unwrap())
        .collect();
    extensions.sort_unstable();
    assert_eq!(extensions, (1..=10_000).collect::<Vec<u32>>());
}

#[test]
fn test_concurrent_freeze_happens_once() {
    // 61 chars: extensions 1..=9 fit, 10 would exceed 63.
    let base = "tul4NUsfs9Cl7mOf.2147483647.2147483647.2147483647.21474836479";
    let cv = CorrelationVector::extend(base).unwrap().into_value();

    let values: Vec<String> = (0..200).into_par_iter().map(|_| cv.increment()).collect();
    let frozen = format!("{base}.9!");

    let live: HashSet<&String> = values.iter().filter(|v| !v.ends_with('!')).collect();
    assert_eq!(live.len(), 9);
    assert_eq!(values.iter().filter(|v| !v.ends_with('!')).count(), 9);
    assert!(values.iter().filter(|v| v.ends_with('!')).all(|v| *v == frozen));
    assert_eq!(cv.value(), frozen);
}

#[test]
fn test_concurrent_spins_are_distinct() {
    let cv = CorrelationVector::create();
    let value = cv.value();
    let spun: Vec<String> = (0..1000)
        .into_par_iter()
        .map(|_| spin(&value).unwrap().into_value().value())
        .collect();
    let unique: HashSet<&String> = spun.iter().collect();
    assert_eq!(unique.len(), spun.len());
}
