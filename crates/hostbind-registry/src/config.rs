use std::fmt;

/// Identifies the host binary a method table was reverse-engineered from.
///
/// Slot numbers are only meaningful for one build. When the host updates,
/// a new `HostBuild` and a re-derived table are needed; nothing carries
/// over automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostBuild {
    pub product: &'static str,
    pub build: u32,
}

impl HostBuild {
    /// The Source 2013 material system this crate's material catalogue
    /// was taken from.
    pub const SOURCE_2013_MATERIAL: Self = Self::new("source-2013/materialsystem", 2013);

    pub const fn new(product: &'static str, build: u32) -> Self {
        Self { product, build }
    }
}

impl fmt::Display for HostBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.product, self.build)
    }
}

/// How a method table is built and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingConfig {
    /// The host build every table made with this config is pinned to.
    pub build: HostBuild,
    /// When set, a fixture slot the table never registered fails
    /// validation. When clear, it is only logged.
    pub strict_validation: bool,
}

impl BindingConfig {
    pub const fn new(build: HostBuild) -> Self {
        Self {
            build,
            strict_validation: true,
        }
    }

    pub const fn lenient(self) -> Self {
        Self {
            strict_validation: false,
            ..self
        }
    }
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self::new(HostBuild::SOURCE_2013_MATERIAL)
    }
}
