#![no_main]

use libfuzzer_sys::fuzz_target;
use tinject::{Container, DiError, Injectable, Resolver};
use std::collections::HashMap;

struct Channel(u16);

impl Injectable for Channel {}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let mut container = Container::new();
    let mut counts: HashMap<u16, usize> = HashMap::new();

    // Every pair of bytes after the first two is one id to bind
    for pair in data[2..].chunks_exact(2) {
        let id = u16::from_le_bytes([pair[0], pair[1]]);
        if id == 0 {
            continue;
        }
        container
            .bind_type::<Channel>()
            .with_id(id)
            .unwrap()
            .to::<Channel>()
            .from_instance(Channel(id))
            .unwrap();
        *counts.entry(id).or_default() += 1;
    }

    let probe = u16::from_le_bytes([data[0], data[1]]);
    let result = container.resolve_with_id::<Channel>(probe);

    match (probe, counts.get(&probe).copied()) {
        (0, _) => assert!(matches!(result, Err(DiError::InvalidArgument(_)))),
        (_, None) => assert!(matches!(result, Err(DiError::NotFound { .. }))),
        (_, Some(1)) => assert_eq!(result.map(|c| c.0).ok(), Some(probe)),
        (_, Some(_)) => assert!(matches!(result, Err(DiError::AmbiguousBinding { .. }))),
    }

    let total: usize = counts.values().sum();
    let by_type = container.resolve::<Channel>();
    match total {
        0 => assert!(matches!(by_type, Err(DiError::NotFound { .. }))),
        1 => assert!(by_type.is_ok()),
        _ => assert!(matches!(by_type, Err(DiError::AmbiguousBinding { .. }))),
    }
});
