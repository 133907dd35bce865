//! Shared utilities (math helpers для locomotion core)

pub mod math;

pub use math::*;
