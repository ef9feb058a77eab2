//! Vtable slot addressing.

use std::fmt;

/// Zero-based position of a method's function pointer inside a host vtable.
///
/// Slot numbers come from reverse-engineering a specific host build. Nothing
/// at runtime can confirm them; the method table in `hostbind-registry`
/// validates them against a fixture of that build instead.
///
/// # Example
///
/// ```
/// use hostbind_core::SlotIndex;
///
/// let slot = SlotIndex::new(27);
/// assert_eq!(slot.index(), 27);
/// assert_eq!(slot.byte_offset(), 27 * std::mem::size_of::<*const ()>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(usize);

impl SlotIndex {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Byte offset of this slot from the start of the vtable.
    #[inline]
    pub const fn byte_offset(self) -> usize {
        self.0 * std::mem::size_of::<*const ()>()
    }

    /// The slot immediately after this one.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

impl From<usize> for SlotIndex {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<SlotIndex> for usize {
    fn from(slot: SlotIndex) -> Self {
        slot.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_byte_offset_is_pointer_scaled() {
        let ptr = std::mem::size_of::<*const ()>();
        assert_eq!(SlotIndex::new(0).byte_offset(), 0);
        assert_eq!(SlotIndex::new(1).byte_offset(), ptr);
        assert_eq!(SlotIndex::new(56).byte_offset(), 56 * ptr);
    }

    #[test]
    fn slot_display() {
        assert_eq!(format!("{}", SlotIndex::new(12)), "slot 12");
    }

    #[test]
    fn slot_ordering_and_next() {
        let a = SlotIndex::new(3);
        assert!(a < a.next());
        assert_eq!(a.next().index(), 4);
    }

    #[test]
    fn slot_conversions() {
        let slot: SlotIndex = 9usize.into();
        let raw: usize = slot.into();
        assert_eq!(raw, 9);
    }
}
