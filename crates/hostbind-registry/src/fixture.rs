//! Expected vtable shapes and validation against them.

use hostbind_core::SlotIndex;

use crate::{HostBuild, LayoutError, MethodTable, RegistryError, RegistryResult};

/// The vtable of one interface as a specific host build lays it out.
///
/// Method names are listed in slot order, slot 0 first. A fixture is
/// written down independently of the method table (from the host's headers
/// or a disassembly) so that checking one against the other catches a slot
/// typed wrong in either place before anything is called through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VTableFixture {
    interface: String,
    build: HostBuild,
    methods: Vec<String>,
}

impl VTableFixture {
    pub fn new<I, S>(interface: impl Into<String>, build: HostBuild, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interface: interface.into(),
            build,
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn build(&self) -> HostBuild {
        self.build
    }

    /// Number of slots in the host vtable.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn method_at(&self, slot: SlotIndex) -> Option<&str> {
        self.methods.get(slot.index()).map(String::as_str)
    }

    pub fn slot_of(&self, method: &str) -> Option<SlotIndex> {
        self.methods
            .iter()
            .position(|name| name == method)
            .map(SlotIndex::new)
    }

    /// `(slot, method)` pairs in slot order.
    pub fn slots(&self) -> impl Iterator<Item = (SlotIndex, &str)> {
        self.methods
            .iter()
            .enumerate()
            .map(|(index, name)| (SlotIndex::new(index), name.as_str()))
    }
}

impl MethodTable {
    /// Checks the table's view of `fixture.interface()` against the fixture.
    ///
    /// Every mismatch is collected rather than stopping at the first. A
    /// fixture slot the table never registered is an error under strict
    /// validation and a warning otherwise; a method at the wrong slot or a
    /// method the host does not have is always an error.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn validate(&self, fixture: &VTableFixture) -> RegistryResult<()> {
        if fixture.build() != self.build() {
            return Err(RegistryError::BuildMismatch {
                table: self.build(),
                fixture: fixture.build(),
            });
        }

        let interface = fixture.interface();
        let mut errors = Vec::new();

        for (expected, method) in fixture.slots() {
            match self.get(interface, method) {
                None if self.config().strict_validation => errors.push(LayoutError::Missing {
                    method: method.to_string(),
                    slot: expected,
                }),
                None => {
                    tracing::warn!(interface, method, slot = expected.index(), "host method not registered");
                }
                Some(entry) if entry.slot != expected => errors.push(LayoutError::Misplaced {
                    method: method.to_string(),
                    registered: entry.slot,
                    expected,
                }),
                Some(_) => {}
            }
        }

        for entry in self.methods(interface) {
            if fixture.slot_of(&entry.name).is_none() {
                errors.push(LayoutError::Unexpected {
                    method: entry.name.clone(),
                    slot: entry.slot,
                });
            }
        }

        if errors.is_empty() {
            tracing::debug!(
                interface,
                build = %self.build(),
                slots = fixture.len(),
                "method table matches host vtable"
            );
            return Ok(());
        }

        for error in &errors {
            tracing::warn!(interface, build = %self.build(), %error, "vtable layout mismatch");
        }
        Err(RegistryError::Layout {
            interface: interface.to_string(),
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BindingConfig, DispatchKind};
    use hostbind_core::{AbiType, CallSignature};

    const BUILD: HostBuild = HostBuild::new("test-host", 1);

    fn fixture() -> VTableFixture {
        VTableFixture::new("IThing", BUILD, ["Zero", "One", "Two"])
    }

    fn table_with(config: BindingConfig, methods: &[(&str, usize)]) -> MethodTable {
        let mut table = MethodTable::new(config);
        for (name, slot) in methods {
            table
                .register(
                    "IThing",
                    name,
                    SlotIndex::new(*slot),
                    CallSignature::method(AbiType::Void, []),
                    DispatchKind::Direct,
                )
                .unwrap();
        }
        table
    }

    #[test]
    fn fixture_lookups() {
        let fixture = fixture();
        assert_eq!(fixture.len(), 3);
        assert!(!fixture.is_empty());
        assert_eq!(fixture.method_at(SlotIndex::new(1)), Some("One"));
        assert_eq!(fixture.method_at(SlotIndex::new(3)), None);
        assert_eq!(fixture.slot_of("Two"), Some(SlotIndex::new(2)));
        assert_eq!(fixture.slot_of("Three"), None);
    }

    #[test]
    fn matching_table_validates() {
        let table = table_with(BindingConfig::new(BUILD), &[("Zero", 0), ("One", 1), ("Two", 2)]);
        assert_eq!(table.validate(&fixture()), Ok(()));
    }

    #[test]
    fn wrong_slot_is_reported() {
        let table = table_with(BindingConfig::new(BUILD), &[("Zero", 0), ("Two", 1), ("One", 2)]);
        let Err(RegistryError::Layout { errors, .. }) = table.validate(&fixture()) else {
            panic!("expected a layout error");
        };
        assert_eq!(
            errors,
            [
                LayoutError::Misplaced {
                    method: "One".into(),
                    registered: SlotIndex::new(2),
                    expected: SlotIndex::new(1),
                },
                LayoutError::Misplaced {
                    method: "Two".into(),
                    registered: SlotIndex::new(1),
                    expected: SlotIndex::new(2),
                },
            ]
        );
    }

    #[test]
    fn missing_slot_depends_on_strictness() {
        let strict = table_with(BindingConfig::new(BUILD), &[("Zero", 0), ("Two", 2)]);
        let Err(RegistryError::Layout { errors, .. }) = strict.validate(&fixture()) else {
            panic!("expected a layout error");
        };
        assert_eq!(
            errors,
            [LayoutError::Missing {
                method: "One".into(),
                slot: SlotIndex::new(1),
            }]
        );

        let lenient = table_with(BindingConfig::new(BUILD).lenient(), &[("Zero", 0), ("Two", 2)]);
        assert_eq!(lenient.validate(&fixture()), Ok(()));
    }

    #[test]
    fn unexpected_method_is_reported() {
        let table = table_with(
            BindingConfig::new(BUILD),
            &[("Zero", 0), ("One", 1), ("Two", 2), ("Three", 3)],
        );
        let err = table.validate(&fixture()).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Layout {
                interface: "IThing".into(),
                errors: vec![LayoutError::Unexpected {
                    method: "Three".into(),
                    slot: SlotIndex::new(3),
                }],
            }
        );
        assert!(err.to_string().contains("1 layout mismatch(es)"));
    }

    #[test]
    fn build_mismatch_is_rejected_first() {
        let table = table_with(BindingConfig::default(), &[("Zero", 0)]);
        assert!(matches!(
            table.validate(&fixture()),
            Err(RegistryError::BuildMismatch { .. })
        ));
    }
}
