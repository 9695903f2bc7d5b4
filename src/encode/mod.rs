//! PNG output and run-folder naming.

pub mod writer;
