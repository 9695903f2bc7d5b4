//! Pixel buffers, integer math and the error taxonomy shared by every stage.

pub mod core;
pub mod error;
pub(crate) mod math;
