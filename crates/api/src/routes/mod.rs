//! Route handlers

pub mod alerts;
pub mod bins;
pub mod sensors;
pub mod statistics;
