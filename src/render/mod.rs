//! Compositing stages, applied to one [`Canvas`](crate::Canvas) in a fixed order.

pub mod band;
pub mod composite;
pub mod pipeline;
pub mod watermark;
