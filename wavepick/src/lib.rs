//! Core `wavepick` module: the wave order picking problem, independent of how it is solved.
//!
//! Contains the immutable instance model, the item incidence index used to build
//! availability constraints, candidate selections and an independent checker which
//! verifies any selection against an instance.

/// Entities to model the Wave Order Picking problem
pub mod entities;

/// Independent feasibility and objective checks for candidate selections
pub mod checker;

/// Importing instances and selections from text, exporting selections to text
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
