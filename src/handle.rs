//! Typed, non-null pointers to host objects.

use std::ffi::c_void;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use hostbind_core::{BindError, BindResult, SlotIndex};

use crate::dispatch::{self, VTableEntry};

/// A host interface this crate can call through.
pub trait ForeignInterface {
    /// Interface name, as registered in the method table.
    const NAME: &'static str;
    /// Number of slots in the host vtable.
    const SLOT_COUNT: usize;
    /// `#[repr(C)]` struct declaring every slot in host order.
    type VTable;
}

/// A pointer to a live host object implementing `I`.
///
/// The handle does not own the object and never checks that it is still
/// alive. It is `Copy`, and it is neither `Send` nor `Sync`: host calls are
/// made on the thread the host expects them on, which the marker can
/// document but not prove.
pub struct ForeignHandle<I: ForeignInterface> {
    ptr: NonNull<c_void>,
    _marker: PhantomData<(fn() -> I, *const ())>,
}

impl<I: ForeignInterface> ForeignHandle<I> {
    /// Wraps a pointer received from the host.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point at a host object implementing `I`, with
    /// its vtable pointer at offset 0, and the object must stay alive for as
    /// long as this handle or any copy of it is used.
    pub unsafe fn from_raw(ptr: *mut c_void) -> BindResult<Self> {
        let ptr = NonNull::new(ptr).ok_or(BindError::NullHandle {
            interface: I::NAME,
        })?;
        tracing::trace!(interface = I::NAME, ptr = ?ptr, "wrapped host object");
        Ok(Self {
            ptr,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr.as_ptr()
    }

    /// Address of the object's vtable.
    #[inline]
    pub fn vtable_address(&self) -> *const VTableEntry {
        // SAFETY: `from_raw` requires a live object with its vtable at offset 0.
        unsafe { dispatch::read_vtable(self.as_ptr()) }
    }

    /// Address of the code in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is past the interface's last slot.
    pub fn slot_address(&self, slot: SlotIndex) -> *const c_void {
        assert!(
            slot.index() < I::SLOT_COUNT,
            "{} has {} slots, {slot} is out of range",
            I::NAME,
            I::SLOT_COUNT
        );
        // SAFETY: live object per `from_raw`, slot checked above.
        unsafe { dispatch::slot_address(self.as_ptr(), slot) }
    }

    /// The interface's vtable viewed as `I::VTable`.
    #[inline]
    pub fn vtable(&self) -> &I::VTable {
        // SAFETY: live object per `from_raw`; `I::VTable` declares every slot
        // of `I` in host order.
        unsafe { dispatch::typed_vtable(self.as_ptr()) }
    }

    /// Function in `slot`, reinterpreted as `F`.
    ///
    /// # Safety
    ///
    /// `F` must be a [`host_fn!`](crate::host_fn) type matching the host's
    /// signature for that slot exactly.
    #[inline]
    pub unsafe fn method<F: Copy>(&self, slot: SlotIndex) -> F {
        debug_assert!(slot.index() < I::SLOT_COUNT, "{} {slot} out of range", I::NAME);
        unsafe { dispatch::vfunc(self.as_ptr(), slot) }
    }
}

impl<I: ForeignInterface> Clone for ForeignHandle<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ForeignInterface> Copy for ForeignHandle<I> {}

impl<I: ForeignInterface> PartialEq for ForeignHandle<I> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<I: ForeignInterface> Eq for ForeignHandle<I> {}

impl<I: ForeignInterface> fmt::Debug for ForeignHandle<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(I::NAME).field(&self.ptr).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    struct Probe;

    #[repr(C)]
    struct ProbeVTable {
        value: crate::host_fn!((*mut c_void) -> u32),
    }

    impl ForeignInterface for Probe {
        const NAME: &'static str = "IProbe";
        const SLOT_COUNT: usize = 1;
        type VTable = ProbeVTable;
    }

    crate::host_method! {
        fn value(this: *mut c_void) -> u32 {
            // SAFETY: only ever called with a pointer to `ProbeObject`.
            unsafe { (*this.cast::<ProbeObject>()).value }
        }
    }

    static PROBE_VTABLE: ProbeVTable = ProbeVTable { value };

    #[repr(C)]
    struct ProbeObject {
        vtable: *const ProbeVTable,
        value: u32,
    }

    #[test]
    fn null_is_rejected() {
        let err = unsafe { ForeignHandle::<Probe>::from_raw(ptr::null_mut()) }.unwrap_err();
        assert_eq!(err, BindError::NullHandle { interface: "IProbe" });
        assert_eq!(err.to_string(), "null handle for interface IProbe");
    }

    #[test]
    fn typed_and_manual_calls_reach_the_object() {
        let mut object = ProbeObject {
            vtable: &PROBE_VTABLE,
            value: 99,
        };
        let handle =
            unsafe { ForeignHandle::<Probe>::from_raw(ptr::from_mut(&mut object).cast()) }.unwrap();

        assert_eq!(handle.vtable_address().cast::<ProbeVTable>(), ptr::from_ref(&PROBE_VTABLE));
        assert_eq!(handle.slot_address(SlotIndex::new(0)), PROBE_VTABLE.value as *const c_void);
        unsafe {
            assert_eq!((handle.vtable().value)(handle.as_ptr()), 99);
            let manual: crate::host_fn!((*mut c_void) -> u32) = handle.method(SlotIndex::new(0));
            assert_eq!(manual(handle.as_ptr()), 99);
        }
    }

    #[test]
    fn copies_compare_by_address() {
        let mut object = ProbeObject {
            vtable: &PROBE_VTABLE,
            value: 0,
        };
        let handle =
            unsafe { ForeignHandle::<Probe>::from_raw(ptr::from_mut(&mut object).cast()) }.unwrap();
        let copy = handle;
        assert_eq!(handle, copy);
        assert!(format!("{handle:?}").starts_with("IProbe("));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn slot_past_the_end_panics() {
        let mut object = ProbeObject {
            vtable: &PROBE_VTABLE,
            value: 0,
        };
        let handle =
            unsafe { ForeignHandle::<Probe>::from_raw(ptr::from_mut(&mut object).cast()) }.unwrap();
        handle.slot_address(SlotIndex::new(1));
    }
}
