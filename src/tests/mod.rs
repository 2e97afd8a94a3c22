#![warn(clippy::all, clippy::pedantic)]

// Test modules
pub mod app_tests;
pub mod config_tests;
pub mod time_tests;
