//! Core types shared by every hostbind crate.
//!
//! This crate holds everything that crosses the foreign boundary by value:
//!
//! - [`math`]: layout-compatible geometry types ([`Vector`], [`QAngle`],
//!   [`VectorAligned`], the `ByValue` wrappers) and the camera offset helper
//! - [`material`]: host constant tables for the material interface
//!   ([`MaterialVarFlags`], [`MaterialPropertyType`], [`PreviewImageStatus`])
//! - [`SlotIndex`] and [`CallSignature`]: how a vtable slot is addressed and
//!   what it is declared to accept
//! - [`BindError`]: the error type for the few checks this layer can do
//!
//! Nothing in here dereferences host memory.

pub mod error;
pub mod material;
pub mod math;
mod signature;
mod slot;

pub use error::{BindError, BindResult};
pub use material::{
    ImageFormat, MaterialPropertyType, MaterialVarFlags, MorphFormat, PreviewImageStatus,
    VertexFormat,
};
pub use math::{
    QAngle, QAngleByValue, Vector, Vector2D, VectorAligned, VectorByValue, camera_offset,
    camera_offset_default,
};
pub use signature::{AbiType, CallSignature, CallingConvention};
pub use slot::SlotIndex;
