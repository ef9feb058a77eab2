//! Layout-compatible geometry types.
//!
//! Every type here has a fixed `#[repr]` that matches the host's in-memory
//! representation field for field, so values can be handed to the host by
//! value or by pointer without translation.
//!
//! | type | size | align | host counterpart |
//! |---|---|---|---|
//! | [`Vector`] | 12 | 4 | `Vector` |
//! | [`VectorByValue`] | 12 | 4 | `VectorByValue` |
//! | [`VectorAligned`] | 16 | 16 | `VectorAligned` |
//! | [`QAngle`] | 12 | 4 | `QAngle` |
//! | [`QAngleByValue`] | 12 | 4 | `QAngleByValue` |
//! | [`Vector2D`] | 8 | 4 | `Vector2D` |

mod aligned;
mod angle;
mod camera;
mod layout;
mod vector;
mod vector2d;

pub use aligned::VectorAligned;
pub use angle::{QAngle, QAngleByValue};
pub use camera::{CAMERA_DISTANCE, camera_offset, camera_offset_default};
pub use vector::{DEFAULT_ZERO_TOLERANCE, NORMALIZE_EPSILON, Vector, VectorByValue};
pub use vector2d::Vector2D;
