use thiserror::Error;

pub type BindResult<T> = Result<T, BindError>;

/// Errors the binding layer can detect on its own.
///
/// Most ways a foreign call can go wrong (a wrong slot, a wrong signature, a
/// destroyed host object) are not detectable here and never produce one of
/// these. What remains are checks on values before they reach the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("null handle for interface {interface}")]
    NullHandle { interface: &'static str },

    #[error("unknown material var flag bits: {0:#010x}")]
    UnknownFlagBits(u32),

    #[error("expected exactly one material var flag, got {0:#010x}")]
    NotASingleFlag(u32),

    #[error("invalid material property type: {0}")]
    InvalidPropertyType(i32),
}
