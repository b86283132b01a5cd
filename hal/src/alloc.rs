use std::{
    alloc::Layout,
    fmt,
    ops::{Deref, DerefMut},
    ptr::NonNull,
};

use bytemuck::Zeroable;

use crate::{DEFAULTALIGN, is_aligned_custom};

/// Zero-initialised, fixed-length buffer with a guaranteed alignment.
///
/// Unlike a `Vec<T>` built from an over-aligned allocation, the buffer keeps
/// the [`Layout`] it was allocated with and releases memory with the same
/// layout. The allocation is padded to a multiple of the alignment, so even an
/// empty buffer owns a valid, aligned pointer.
pub struct AlignedVec<T: Zeroable> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
}

unsafe impl<T: Zeroable + Send> Send for AlignedVec<T> {}
unsafe impl<T: Zeroable + Sync> Sync for AlignedVec<T> {}

impl<T: Zeroable> AlignedVec<T> {
    /// Allocates `len` zeroed elements aligned to [`DEFAULTALIGN`] bytes.
    pub fn zeroed(len: usize) -> Self {
        Self::zeroed_with_align(len, DEFAULTALIGN)
    }

    /// Allocates `len` zeroed elements aligned to `align` bytes.
    ///
    /// # Panics
    ///
    /// - If `T` is zero-sized.
    /// - If `align` is not a power of two or is smaller than `align_of::<T>()`.
    pub fn zeroed_with_align(len: usize, align: usize) -> Self {
        assert!(size_of::<T>() > 0, "AlignedVec: zero-sized types are not supported");
        assert!(align.is_power_of_two(), "alignment must be a power of two but is {align}");
        assert!(
            align >= align_of::<T>(),
            "alignment {align} is smaller than the natural alignment {} of the element type",
            align_of::<T>()
        );

        let bytes: usize = (len * size_of::<T>()).max(1).next_multiple_of(align);
        let layout: Layout = match Layout::from_size_align(bytes, align) {
            Ok(layout) => layout,
            Err(err) => panic!("invalid layout for {len} elements aligned to {align}: {err}"),
        };

        // SAFETY: `layout` has a non-zero size and `T: Zeroable` makes the
        // all-zero bit pattern a valid value for every element.
        let raw: *mut u8 = unsafe { std::alloc::alloc_zeroed(layout) };
        let ptr: NonNull<T> = match NonNull::new(raw as *mut T) {
            Some(ptr) => ptr,
            None => std::alloc::handle_alloc_error(layout),
        };
        debug_assert!(is_aligned_custom(ptr.as_ptr(), align));

        Self { ptr, len, layout }
    }

    /// Allocates an aligned copy of `data`.
    pub fn from_slice(data: &[T]) -> Self
    where
        T: Copy,
    {
        let mut buf: Self = Self::zeroed(data.len());
        buf.copy_from_slice(data);
        buf
    }

    pub fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T: Zeroable> Deref for AlignedVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // SAFETY: `ptr` points to `len` initialised elements owned by `self`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Zeroable> DerefMut for AlignedVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: same as above, and `&mut self` guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Zeroable> Drop for AlignedVec<T> {
    fn drop(&mut self) {
        // SAFETY: allocated in `zeroed_with_align` with exactly this layout.
        unsafe { std::alloc::dealloc(self.ptr.as_ptr() as *mut u8, self.layout) }
    }
}

impl<T: Zeroable + Copy> Clone for AlignedVec<T> {
    fn clone(&self) -> Self {
        let mut buf: Self = Self::zeroed_with_align(self.len, self.layout.align());
        buf.copy_from_slice(self);
        buf
    }
}

impl<T: Zeroable + fmt::Debug> fmt::Debug for AlignedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
