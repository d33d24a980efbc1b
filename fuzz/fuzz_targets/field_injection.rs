#![no_main]

use libfuzzer_sys::fuzz_target;
use tinject::{Container, Field, Inject, Injectable, Lifecycle};
use std::sync::Arc;

struct Value(u8);

impl Injectable for Value {}

struct Consumer {
    value: Inject<Value>,
}

impl Injectable for Consumer {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new("value", &self.value)]
    }
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let providers = usize::from(data[0] % 3);
    let mut container = Container::new();
    let mut consumers = Vec::new();

    for (index, &byte) in data[1..].iter().enumerate().take(32) {
        if index < providers {
            container.bind_type::<Value>().to::<Value>().from_instance(Value(byte)).unwrap();
        } else {
            let consumer = Arc::new(Consumer { value: Inject::new() });
            container.to::<Consumer>().from_instance(consumer.clone()).unwrap();
            consumers.push(consumer);
        }
    }

    let bound_providers = providers.min(data.len() - 1);
    let result = container.finish_binding(&mut Lifecycle::new());

    if consumers.is_empty() || bound_providers == 1 {
        assert!(result.is_ok());
        for consumer in &consumers {
            assert_eq!(consumer.value.get().0, data[1]);
        }
    } else {
        // No provider or several providers: the first consumer fails and
        // nothing is injected
        assert!(result.is_err());
        assert!(consumers.iter().all(|c| !c.value.is_injected()));
    }
});
