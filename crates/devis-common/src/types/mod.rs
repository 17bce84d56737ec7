//! Core data types for the pricing calculator

pub mod catalog;
pub mod commitment;
pub mod offer;
pub mod totals;
