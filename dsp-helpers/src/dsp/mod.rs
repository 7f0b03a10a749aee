//! Scalar DSP math shared by the nodes.

pub mod decibels;
pub mod helpers;

pub use decibels::{db_to_gain, gain_to_db};
