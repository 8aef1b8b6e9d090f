// Shared library untuk semua MeterMind services

pub mod models;
pub mod utils;
