// src/models/mod.rs

pub mod response_record;
