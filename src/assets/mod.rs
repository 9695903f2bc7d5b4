//! Source discovery, decoding and fonts.
//!
//! All filesystem reads for inputs happen here; the render stage only sees decoded pixels.

pub mod decode;
pub mod discover;
pub mod font;
