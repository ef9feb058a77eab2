//! Foreign method table for hostbind interfaces.
//!
//! Raw vtable slot numbers are only ever written down here. A
//! [`MethodTable`] maps `(interface, method)` to the slot, the declared
//! [`CallSignature`](hostbind_core::CallSignature) and the way the binding
//! dispatches it. The table is pinned to one [`HostBuild`] and checked once
//! against a [`VTableFixture`] describing that build's real vtable shape.
//!
//! # Example
//!
//! ```
//! use hostbind_registry::material;
//!
//! let table = material::catalogue().unwrap();
//! table.validate(&material::fixture()).expect("catalogue matches the pinned build");
//!
//! let entry = table.get(material::INTERFACE, "AlphaModulate").unwrap();
//! assert_eq!(entry.slot, material::slots::ALPHA_MODULATE);
//! ```

mod config;
mod error;
mod fixture;
pub mod material;
mod table;

pub use config::{BindingConfig, HostBuild};
pub use error::{LayoutError, RegistryError, RegistryResult};
pub use fixture::VTableFixture;
pub use table::{DispatchKind, MethodEntry, MethodTable};
