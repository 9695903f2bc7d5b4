//! HEX / RGB / CMYK color notations and their canonical form.

pub mod parse;
