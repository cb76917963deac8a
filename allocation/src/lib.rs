//! Return-sharing calculations for a single investment project.
//!
//! Positive profit is split 70/30 between management and the investor pool,
//! losses are carried by the investor pool in full, and the pool is then
//! apportioned by contribution.

mod engine;
mod investor;
mod numeric;

pub use engine::*;
pub use investor::*;
pub use numeric::*;
