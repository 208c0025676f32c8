//! Staffing cost math for the financial analysis screens.
//!
//! Everything here is pure and synchronous: handlers take a fresh snapshot of
//! the unit's staffing rows from the database and recompute on every request.

pub mod currency;
pub mod pareto;
pub mod row;
pub mod totals;
