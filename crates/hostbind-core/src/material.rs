//! Host constant tables for the material interface.
//!
//! Every numeric value in this module is a protocol constant defined by the
//! host. They are passed to and read from the host unchanged, so they must
//! never be renumbered.

use bitflags::bitflags;
use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};

use crate::error::{BindError, BindResult};

/// Bitmask describing which vertex components a material consumes.
pub type VertexFormat = u64;

/// Bitmask describing which morph targets a material consumes.
pub type MorphFormat = u32;

bitflags! {
    /// Per-material render state switches.
    ///
    /// Bit positions are the host's. `SetMaterialVarFlag` takes exactly one
    /// flag at a time; use [`MaterialVarFlags::single_bit`] before passing a
    /// value across.
    ///
    /// ```
    /// use hostbind_core::MaterialVarFlags;
    ///
    /// let flags = MaterialVarFlags::IGNOREZ | MaterialVarFlags::WIREFRAME;
    /// assert_eq!(flags.bits(), (1 << 15) | (1 << 28));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MaterialVarFlags: u32 {
        const DEBUG = 1 << 0;
        const NO_DEBUG_OVERRIDE = 1 << 1;
        const NO_DRAW = 1 << 2;
        const USE_IN_FILLRATE_MODE = 1 << 3;
        const VERTEXCOLOR = 1 << 4;
        const VERTEXALPHA = 1 << 5;
        const SELFILLUM = 1 << 6;
        const ADDITIVE = 1 << 7;
        const ALPHATEST = 1 << 8;
        const MULTIPASS = 1 << 9;
        const ZNEARER = 1 << 10;
        const MODEL = 1 << 11;
        const FLAT = 1 << 12;
        const NOCULL = 1 << 13;
        const NOFOG = 1 << 14;
        const IGNOREZ = 1 << 15;
        const DECAL = 1 << 16;
        const ENVMAPSPHERE = 1 << 17;
        const NOALPHAMOD = 1 << 18;
        const ENVMAPCAMERASPACE = 1 << 19;
        const BASEALPHAENVMAPMASK = 1 << 20;
        const TRANSLUCENT = 1 << 21;
        const NORMALMAPALPHAENVMAPMASK = 1 << 22;
        const NEEDS_SOFTWARE_SKINNING = 1 << 23;
        const OPAQUETEXTURE = 1 << 24;
        const ENVMAPMODE = 1 << 25;
        const SUPPRESS_DECALS = 1 << 26;
        const HALFLAMBERT = 1 << 27;
        const WIREFRAME = 1 << 28;
        const ALLOWALPHATOCOVERAGE = 1 << 29;
        const IGNORE_ALPHA_MODULATION = 1 << 30;
    }
}

impl MaterialVarFlags {
    /// Parses a raw host mask, rejecting bits the host does not define.
    pub fn from_host(raw: u32) -> BindResult<Self> {
        Self::from_bits(raw).ok_or(BindError::UnknownFlagBits(raw & !Self::all().bits()))
    }

    /// Raw value of a set holding exactly one flag.
    pub fn single_bit(self) -> BindResult<u32> {
        if self.bits().count_ones() == 1 {
            Ok(self.bits())
        } else {
            Err(BindError::NotASingleFlag(self.bits()))
        }
    }
}

/// Material properties queryable with `GetPropertyFlag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
pub enum MaterialPropertyType {
    NeedsLightmap = 0,
    Opacity = 1,
    Reflectivity = 2,
    NeedsBumpedLightmaps = 3,
}

impl MaterialPropertyType {
    pub fn from_host(raw: i32) -> BindResult<Self> {
        Self::try_from(raw).map_err(|e| BindError::InvalidPropertyType(e.number))
    }
}

/// Status returned by the preview image queries.
///
/// The host reports failure through this value, not through an error
/// channel, and the layer hands it back unchanged. Values outside the
/// host's table are kept in [`PreviewImageStatus::Unknown`] rather than
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(i32)]
pub enum PreviewImageStatus {
    Bad = 0,
    Ok = 1,
    NoPreviewImage = 2,
    #[num_enum(catch_all)]
    Unknown(i32),
}

impl PreviewImageStatus {
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl From<PreviewImageStatus> for i32 {
    fn from(status: PreviewImageStatus) -> Self {
        match status {
            PreviewImageStatus::Bad => 0,
            PreviewImageStatus::Ok => 1,
            PreviewImageStatus::NoPreviewImage => 2,
            PreviewImageStatus::Unknown(raw) => raw,
        }
    }
}

/// Host image format identifier.
///
/// Image formats themselves live outside this layer; the value is carried
/// through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ImageFormat(i32);

impl ImageFormat {
    pub const UNKNOWN: Self = Self(-1);

    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl Default for ImageFormat {
    fn default() -> Self {
        Self::UNKNOWN
    }
}
