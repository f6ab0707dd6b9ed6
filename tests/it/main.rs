//! Single test binary entry point.
//!
//! This consolidates all tests into a single binary following matklad's best practices,
//! reducing linking overhead from 3x to 1x.
//!
//! Structure:
//! - helpers: Canvas builders, pointer gestures and event recorders
//! - integration: Full pointer gestures driven through the public handlers
//! - unit: Single-component tests against the public API

mod unit;
