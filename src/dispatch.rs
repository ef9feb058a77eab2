//! Raw vtable access.
//!
//! Every read of host vtable memory and every reinterpretation of a slot as
//! a callable function pointer happens in this module. Nothing here can
//! check that a slot index or a function pointer type matches what the host
//! compiled; that is the job of the method table in `hostbind-registry`,
//! validated once against a fixture before any of this runs.

use std::ffi::{CStr, c_char, c_void};
use std::mem::{size_of, transmute_copy};

use hostbind_core::SlotIndex;

/// One entry of a host vtable: the address of a method's code.
pub type VTableEntry = *const c_void;

/// What every host object starts with.
///
/// The host compiler places the vtable pointer at offset 0. The rest of the
/// object is opaque to this layer.
#[repr(C)]
pub struct RawObject {
    pub vtable: *const VTableEntry,
}

/// Reads the vtable pointer of a host object.
///
/// # Safety
///
/// `this` must point at a live host object whose first field is its vtable
/// pointer.
#[inline]
pub unsafe fn read_vtable(this: *const c_void) -> *const VTableEntry {
    unsafe { (*this.cast::<RawObject>()).vtable }
}

/// Reads the function address stored in `slot`.
///
/// # Safety
///
/// As for [`read_vtable`], and `slot` must lie inside the object's vtable.
#[inline]
pub unsafe fn slot_address(this: *const c_void, slot: SlotIndex) -> *const c_void {
    unsafe { *read_vtable(this).add(slot.index()) }
}

/// Reinterprets the function in `slot` as the function pointer type `F`.
///
/// `F` must be pointer sized; anything else fails to compile.
///
/// # Safety
///
/// As for [`slot_address`], and `F` must be a function pointer type with
/// the exact parameters, return type and calling convention the host
/// compiled for that slot. Calling through a mismatched `F` is undefined
/// behaviour in the host.
#[inline]
pub unsafe fn vfunc<F: Copy>(this: *const c_void, slot: SlotIndex) -> F {
    const {
        assert!(
            size_of::<F>() == size_of::<VTableEntry>(),
            "vtable slots hold pointer-sized function pointers"
        )
    };
    let entry = unsafe { slot_address(this, slot) };
    unsafe { transmute_copy::<VTableEntry, F>(&entry) }
}

/// Views the whole vtable as a `#[repr(C)]` struct of function pointers.
///
/// # Safety
///
/// As for [`read_vtable`]. `V` must declare every slot up to the last one it
/// uses, in host order, each with the host's exact signature, and the
/// returned reference must not outlive the object.
#[inline]
pub unsafe fn typed_vtable<'a, V>(this: *const c_void) -> &'a V {
    unsafe { &*read_vtable(this).cast::<V>() }
}

/// Borrows a host-owned C string.
///
/// Returns `None` for null.
///
/// # Safety
///
/// A non-null `ptr` must point at a nul-terminated string that stays
/// unchanged and allocated for `'a`.
#[inline]
pub unsafe fn borrow_cstr<'a>(ptr: *const c_char) -> Option<&'a CStr> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) })
    }
}

/// Borrows a host-owned array of `len` elements.
///
/// A null pointer or a non-positive length gives an empty slice.
///
/// # Safety
///
/// A non-null `ptr` must point at `len` initialized, properly aligned `T`
/// that stay unchanged and allocated for `'a`.
#[inline]
pub unsafe fn borrow_slice<'a, T>(ptr: *const T, len: i32) -> &'a [T] {
    match usize::try_from(len) {
        Ok(len) if len > 0 && !ptr.is_null() => unsafe { std::slice::from_raw_parts(ptr, len) },
        _ => &[],
    }
}
