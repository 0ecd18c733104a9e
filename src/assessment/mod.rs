// src/assessment/mod.rs

pub mod aggregator;
pub mod bank;
pub mod export;
pub mod scorer;
pub mod session;
mod standard;
