//! Frame validation and static image assets
//!
//! This module provides:
//! - JPEG boundary-marker validation for incoming frames
//! - The shared placeholder image served before the first real frame

pub mod jpeg;
pub mod placeholder;

pub use jpeg::{is_valid_frame, EOI, MAX_FRAME_SIZE, MIN_FRAME_SIZE, SOI};
pub use placeholder::Placeholder;
