//! Optimoto API — vehicle catalog and purpose-based recommendations over a CSV dataset.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod recommend;
pub mod routes;
pub mod state;
