//! Unit tests for shapeboard.

mod config_tests;
mod controls_tests;
mod geometry_tests;
mod perf_tests;
mod scene_tests;
