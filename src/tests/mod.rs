
mod engine_tests;

use crate::engine::{ENGINE, PhoneNumberEngine};

static ONCE: std::sync::Once = std::sync::Once::new();

fn get_engine() -> &'static PhoneNumberEngine {
    ONCE.call_once(|| {
        colog::default_builder()
            .filter_level(log::LevelFilter::Trace)
            .init()
    });
    &ENGINE
}
