//! Approximates the most productive wave of a picking instance by sweeping the number of visited aisles.
//!
//! For every aisle budget `k` a binary program selecting the most units is solved, and the selection
//! maximizing `units / k` is kept.

pub mod batch;
pub mod config;
pub mod formulation;
pub mod io;
pub mod solver;
pub mod sweep;
