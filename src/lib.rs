//! Call into objects living inside a running native engine host.
//!
//! The host's classes are reached through their vtables alone. This crate
//! holds the pieces that touch foreign memory:
//!
//! - [`dispatch`]: the only place a vtable is read or a slot is
//!   reinterpreted as a function pointer
//! - [`host_fn!`] / [`host_method!`]: the host's instance-method calling
//!   convention for the current target
//! - [`ForeignHandle`]: a typed, non-null, non-owning pointer to a host object
//! - [`material`]: the host material interface
//!
//! Slot numbers live in [`hostbind_registry`], re-exported as [`registry`].
//! Value types and host constants live in [`hostbind_core`], re-exported as
//! [`types`].
//!
//! # Safety model
//!
//! Two kinds of mistake cannot be caught at runtime: a slot or signature
//! that does not match the host build, and a call through a handle whose
//! object the host already destroyed. The first is checked ahead of time by
//! validating the method table against a fixture of the pinned build. The
//! second is the caller's contract, stated on every `unsafe` constructor.
//!
//! ```no_run
//! use hostbind::prelude::*;
//!
//! # fn lookup_material() -> *mut std::ffi::c_void { std::ptr::null_mut() }
//! let table = hostbind::registry::material::catalogue().unwrap();
//! table.validate(&hostbind::registry::material::fixture()).unwrap();
//!
//! // SAFETY: the host handed out this pointer and keeps the material alive.
//! let material = unsafe { Material::from_raw(lookup_material()) }.unwrap();
//! let _held = MaterialRef::new(material);
//! material.alpha_modulate(0.5);
//! material.set_material_var_flag(MaterialVarFlags::IGNOREZ, true).unwrap();
//! ```

mod abi;
pub mod dispatch;
mod handle;
pub mod material;

pub use hostbind_core as types;
pub use hostbind_registry as registry;

pub use handle::{ForeignHandle, ForeignInterface};
pub use material::{Material, MaterialInterface, MaterialRef, MaterialVTable, PreviewImageProperties};

pub mod prelude {
    pub use crate::handle::{ForeignHandle, ForeignInterface};
    pub use crate::material::{Material, MaterialRef, PreviewImageProperties};
    pub use hostbind_core::{
        BindError, BindResult, ImageFormat, MaterialPropertyType, MaterialVarFlags,
        PreviewImageStatus, QAngle, Vector, VectorAligned,
    };
    pub use hostbind_registry::{BindingConfig, HostBuild, MethodTable};
}
