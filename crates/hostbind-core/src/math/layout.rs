//! The one place geometry values are reinterpreted as other types.
//!
//! The host freely views one type through another with the same leading
//! fields: a `Vector` as a `VectorByValue`, the first two floats of a
//! `Vector` as a `Vector2D`, the first three floats of a `VectorAligned` as
//! a `Vector`. All of those views go through the functions below, which
//! check size and alignment at compile time and use `bytemuck` for the cast
//! itself. The nominal `ByValue` wrappers are `#[repr(transparent)]` and go
//! through [`nominal`].

use bytemuck::{Pod, TransparentWrapper};
use std::mem::{align_of, size_of};

/// Views the leading `size_of::<U>()` bytes of `value` as a `U`.
pub(crate) fn leading<T: Pod, U: Pod>(value: &T) -> &U {
    const {
        assert!(size_of::<U>() <= size_of::<T>());
        assert!(align_of::<U>() <= align_of::<T>());
    }
    bytemuck::from_bytes(&bytemuck::bytes_of(value)[..size_of::<U>()])
}

/// Mutable form of [`leading`].
pub(crate) fn leading_mut<T: Pod, U: Pod>(value: &mut T) -> &mut U {
    const {
        assert!(size_of::<U>() <= size_of::<T>());
        assert!(align_of::<U>() <= align_of::<T>());
    }
    bytemuck::from_bytes_mut(&mut bytemuck::bytes_of_mut(value)[..size_of::<U>()])
}

/// Views `value` as the nominal wrapper type `W` with identical layout.
pub(crate) fn nominal<T, W: TransparentWrapper<T>>(value: &T) -> &W {
    W::wrap_ref(value)
}

/// Mutable form of [`nominal`].
pub(crate) fn nominal_mut<T, W: TransparentWrapper<T>>(value: &mut T) -> &mut W {
    W::wrap_mut(value)
}
