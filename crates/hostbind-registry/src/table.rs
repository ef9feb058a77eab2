//! The method table itself.
//!
//! # Thread Safety
//!
//! A `MethodTable` is plain data. It is built once, usually single-threaded
//! at startup, and is read-only afterwards, so sharing it behind an `Arc` is
//! enough. None of that says anything about the thread host calls must be
//! made on.

use std::collections::BTreeMap;

use hostbind_core::{CallSignature, SlotIndex};
use rustc_hash::FxHashMap;
use xxhash_rust::xxh64::Xxh64;

use crate::{BindingConfig, HostBuild, RegistryError, RegistryResult};

const FINGERPRINT_SEED: u64 = 0x5ea77ffbcdf5f302;

/// How the binding reaches a method at runtime.
///
/// The split between the two is whatever worked when the host was
/// reverse-engineered. It is recorded per method because it does not follow
/// a rule that would carry over to another host build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchKind {
    /// Through a `#[repr(C)]` vtable struct declaring every slot in order.
    Direct,
    /// By reading the slot at a fixed index and reinterpreting it.
    Manual,
}

/// A registered method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry {
    pub name: String,
    pub slot: SlotIndex,
    pub signature: CallSignature,
    pub dispatch: DispatchKind,
}

#[derive(Debug, Clone, Default)]
struct InterfaceTable {
    methods: FxHashMap<String, MethodEntry>,
    by_slot: BTreeMap<SlotIndex, String>,
}

/// Centralized `(interface, method) -> (slot, signature)` catalogue.
#[derive(Debug, Clone)]
pub struct MethodTable {
    config: BindingConfig,
    interfaces: FxHashMap<String, InterfaceTable>,
}

impl MethodTable {
    pub fn new(config: BindingConfig) -> Self {
        Self {
            config,
            interfaces: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    pub fn build(&self) -> HostBuild {
        self.config.build
    }

    /// Records a method at a slot.
    ///
    /// Fails when the method is already registered on the interface or the
    /// slot already holds another method.
    pub fn register(
        &mut self,
        interface: &str,
        method: &str,
        slot: SlotIndex,
        signature: CallSignature,
        dispatch: DispatchKind,
    ) -> RegistryResult<()> {
        let table = self.interfaces.entry(interface.to_string()).or_default();

        if table.methods.contains_key(method) {
            return Err(RegistryError::DuplicateMethod {
                interface: interface.to_string(),
                method: method.to_string(),
            });
        }
        if let Some(existing) = table.by_slot.get(&slot) {
            return Err(RegistryError::SlotTaken {
                interface: interface.to_string(),
                slot,
                existing: existing.clone(),
                method: method.to_string(),
            });
        }

        table.by_slot.insert(slot, method.to_string());
        table.methods.insert(
            method.to_string(),
            MethodEntry {
                name: method.to_string(),
                slot,
                signature,
                dispatch,
            },
        );
        Ok(())
    }

    pub fn get(&self, interface: &str, method: &str) -> Option<&MethodEntry> {
        self.interfaces.get(interface)?.methods.get(method)
    }

    /// Slot of a registered method.
    pub fn slot(&self, interface: &str, method: &str) -> RegistryResult<SlotIndex> {
        self.get(interface, method)
            .map(|entry| entry.slot)
            .ok_or_else(|| RegistryError::UnknownMethod {
                interface: interface.to_string(),
                method: method.to_string(),
            })
    }

    pub fn at_slot(&self, interface: &str, slot: SlotIndex) -> Option<&MethodEntry> {
        let table = self.interfaces.get(interface)?;
        table.methods.get(table.by_slot.get(&slot)?)
    }

    pub fn contains_interface(&self, interface: &str) -> bool {
        self.interfaces.contains_key(interface)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &str> {
        self.interfaces.keys().map(String::as_str)
    }

    /// Methods of an interface in slot order.
    pub fn methods(&self, interface: &str) -> impl Iterator<Item = &MethodEntry> {
        self.interfaces.get(interface).into_iter().flat_map(|table| {
            table
                .by_slot
                .values()
                .filter_map(move |name| table.methods.get(name))
        })
    }

    /// Number of vtable slots the interface spans: highest registered slot
    /// plus one.
    pub fn slot_count(&self, interface: &str) -> usize {
        self.interfaces
            .get(interface)
            .and_then(|table| table.by_slot.keys().next_back())
            .map_or(0, |slot| slot.index() + 1)
    }

    /// Deterministic hash of an interface's layout.
    ///
    /// Covers every `(slot, name, signature)` in slot order, so moving,
    /// renaming or re-typing any method changes it. The signature includes
    /// the calling convention, so the value is per target as well as per
    /// host build.
    pub fn fingerprint(&self, interface: &str) -> RegistryResult<u64> {
        if !self.contains_interface(interface) {
            return Err(RegistryError::UnknownInterface(interface.to_string()));
        }

        let mut hasher = Xxh64::new(FINGERPRINT_SEED);
        for entry in self.methods(interface) {
            hasher.update(&(entry.slot.index() as u64).to_le_bytes());
            hasher.update(entry.name.as_bytes());
            hasher.update(&[0]);
            hasher.update(entry.signature.to_string().as_bytes());
            hasher.update(&[0xff]);
        }
        Ok(hasher.digest())
    }
}

impl Default for MethodTable {
    fn default() -> Self {
        Self::new(BindingConfig::default())
    }
}
