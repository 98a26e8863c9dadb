//! Free-flight navigation.
//!
//! The camera orientation is a 3x3 matrix whose columns are the camera's own
//! right, up and view axes. Rotations are taken about those current axes and
//! left-multiplied onto the matrix, so the feel of a drag does not depend on
//! the current heading.
//!
//! # Invariants
//! - Orientation columns are orthonormal within tolerance after every
//!   renormalization; they drift only between compositions.
//! - The camera looks down its view axis negated (column 2 points backwards).
//! - Pitch is composed before yaw; roll replaces both while the roll
//!   modifier is held.

mod camera;
mod controller;

pub use camera::CameraFrame;
pub use controller::NavigationController;
