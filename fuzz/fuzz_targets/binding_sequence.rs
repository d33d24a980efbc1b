#![no_main]

use libfuzzer_sys::fuzz_target;
use tinject::{key_of, Container, Injectable, Lifecycle, Resolver, Update, Views};
use std::sync::Arc;

trait Shape: Send + Sync {
    fn sides(&self) -> u8;
}

struct Square;

impl Shape for Square {
    fn sides(&self) -> u8 {
        4
    }
}

impl Update for Square {
    fn update(&self) {}
}

impl Injectable for Square {
    fn expose(this: &Arc<Self>, views: &mut Views) {
        views.add::<dyn Shape>(this.clone()).add::<dyn Update>(this.clone());
    }
}

struct Plain;

impl Injectable for Plain {}

// Arbitrary call sequences must end in errors, never in panics
fuzz_target!(|data: &[u8]| {
    let mut container = Container::new();

    for chunk in data.chunks(2) {
        let op = chunk[0];
        let arg = chunk.get(1).copied().unwrap_or(0);

        match op % 7 {
            0 => {
                container.bind_type::<dyn Shape>();
            }
            1 => {
                container.bind(&[key_of::<dyn Update>(), key_of::<Square>()]);
            }
            2 => {
                container.bind_type::<Plain>();
            }
            3 => {
                let result = container.with_id(u16::from(arg));
                assert_eq!(result.is_err(), arg == 0);
            }
            4 => {
                let _ = container.to::<Square>().from_instance(Square);
            }
            5 => {
                let _ = container.to::<Plain>().from_instance(Plain);
            }
            _ => {
                if let Ok(shape) = container.resolve_with_id::<dyn Shape>(u16::from(arg).max(1)) {
                    assert_eq!(shape.sides(), 4);
                }
                let _ = container.resolve::<Plain>();
            }
        }
    }

    let declared = container.descriptors().len();
    let mut lifecycle = Lifecycle::new();
    if let Ok(bound) = container.finish_binding(&mut lifecycle) {
        assert_eq!(bound.len(), declared);
        lifecycle.update();
    }
});
