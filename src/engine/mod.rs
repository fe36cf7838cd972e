mod enums;
mod errors;
mod helpers;
mod patterns;

mod engine;

use std::sync::LazyLock;

pub use engine::PhoneNumberEngine;
pub use enums::{NumberCategory, NumberFormat, NumberLengthType};
pub use errors::ParseError;

pub static ENGINE: LazyLock<PhoneNumberEngine> = LazyLock::new(|| PhoneNumberEngine::new());
