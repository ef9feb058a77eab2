//! Declared call signatures for vtable slots.

use std::fmt;

/// Calling convention used to invoke a host instance method.
///
/// The host compiler passes `self` implicitly. On 32-bit x86 MSVC builds
/// that means `thiscall` (`self` in `ecx`); everywhere else it is the plain
/// C convention with `self` as the first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallingConvention {
    /// `self` in `ecx`, remaining arguments on the stack, callee cleans up.
    Thiscall,
    /// C convention, `self` as the first argument.
    CdeclObjFirst,
}

impl CallingConvention {
    /// The convention host instance methods use on the current target.
    #[cfg(all(target_arch = "x86", windows))]
    pub const HOST: Self = Self::Thiscall;

    /// The convention host instance methods use on the current target.
    #[cfg(not(all(target_arch = "x86", windows)))]
    pub const HOST: Self = Self::CdeclObjFirst;

    pub fn name(self) -> &'static str {
        match self {
            Self::Thiscall => "thiscall",
            Self::CdeclObjFirst => "cdecl_objfirst",
        }
    }
}

/// Physical type of a value crossing the foreign boundary.
///
/// Only the ABI class matters here: a `Ptr` may point at a float array, a
/// `Vector` or an opaque host object alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiType {
    Void,
    Bool,
    I32,
    U32,
    U64,
    F32,
    /// Host enum passed as a 32-bit integer.
    Enum,
    /// `const char*` owned by the host or by the caller for the call.
    CStr,
    /// Pointer to caller-owned memory the host writes into.
    OutPtr,
    /// Pointer to a host object or host-owned memory.
    Ptr,
}

impl AbiType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::I32 => "int",
            Self::U32 => "uint",
            Self::U64 => "uint64",
            Self::F32 => "float",
            Self::Enum => "enum",
            Self::CStr => "const char*",
            Self::OutPtr => "out*",
            Self::Ptr => "ptr",
        }
    }
}

/// Declared signature of a host virtual method.
///
/// The implicit `self` argument is not listed in `params`. A signature is
/// documentation the method table can validate and fingerprint; it has no
/// way to check the host's real signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallSignature {
    pub params: Vec<AbiType>,
    pub return_type: AbiType,
    pub convention: CallingConvention,
    pub is_const: bool,
}

impl CallSignature {
    /// A non-const instance method using the host convention.
    pub fn method(return_type: AbiType, params: impl Into<Vec<AbiType>>) -> Self {
        Self {
            params: params.into(),
            return_type,
            convention: CallingConvention::HOST,
            is_const: false,
        }
    }

    /// A const instance method using the host convention.
    pub fn const_method(return_type: AbiType, params: impl Into<Vec<AbiType>>) -> Self {
        Self {
            is_const: true,
            ..Self::method(return_type, params)
        }
    }

    /// Number of declared parameters, excluding `self`.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for CallSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(this", self.return_type.name(), self.convention.name())?;
        for param in &self.params {
            write!(f, ", {}", param.name())?;
        }
        f.write_str(")")?;
        if self.is_const {
            f.write_str(" const")?;
        }
        Ok(())
    }
}
