//! Camera system for the eye viewer.
//!
//! Provides the perspective camera and screen projection, an orbit
//! controller for drag/scroll input, timed camera flights toward
//! annotation targets, and the view frustum used for label visibility.

/// Orbit camera controller (rotate, zoom, viewport).
pub mod controller;
/// Core camera struct, viewport and world-to-screen projection.
pub mod core;
/// Timed camera flights (`Idle → Flying → Idle`).
pub mod flight;
/// View frustum extraction and point tests.
pub mod frustum;
