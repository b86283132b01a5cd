//! Deterministic pseudorandom sources used to fill benchmark and test buffers.

pub mod source;
