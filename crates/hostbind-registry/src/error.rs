use hostbind_core::SlotIndex;
use thiserror::Error;

use crate::HostBuild;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The same method was registered twice on one interface.
    #[error("duplicate method: {interface}::{method}")]
    DuplicateMethod { interface: String, method: String },

    /// Two methods were registered in the same slot of one interface.
    #[error("{interface}: {slot} already holds {existing}, cannot register {method}")]
    SlotTaken {
        interface: String,
        slot: SlotIndex,
        existing: String,
        method: String,
    },

    #[error("unknown method: {interface}::{method}")]
    UnknownMethod { interface: String, method: String },

    #[error("unknown interface: {0}")]
    UnknownInterface(String),

    /// The table and the fixture describe different host builds.
    #[error("table is pinned to {table}, fixture describes {fixture}")]
    BuildMismatch { table: HostBuild, fixture: HostBuild },

    /// The table disagrees with the fixture in one or more slots.
    #[error("{interface}: {}", layout_summary(.errors))]
    Layout {
        interface: String,
        errors: Vec<LayoutError>,
    },
}

fn layout_summary(errors: &[LayoutError]) -> String {
    match errors.first() {
        Some(first) => format!("{} layout mismatch(es), first: {first}", errors.len()),
        None => "layout mismatch with no recorded errors".to_string(),
    }
}

/// One disagreement between a method table and a vtable fixture.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The fixture has a method at this slot that the table never registered.
    #[error("{method} at {slot} is not registered")]
    Missing { method: String, slot: SlotIndex },

    /// The table registered the method at a different slot than the host uses.
    #[error("{method} registered at {registered}, host has it at {expected}")]
    Misplaced {
        method: String,
        registered: SlotIndex,
        expected: SlotIndex,
    },

    /// The table registered a method the host build does not have.
    #[error("{method} at {slot} does not exist in the host vtable")]
    Unexpected { method: String, slot: SlotIndex },
}
