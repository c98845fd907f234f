use crate::error::{Error, Result};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Used internally to make sure all memory allocations
/// are aligned to 16 bytes.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
struct U128(u128);
const ALIGNMENT: usize = 16;

/// This method allocate zeroed memory area with alignment of 16 bytes.
/// The unit of input capacity is byte.
/// If it's not multiple of 16, it will be rounded up to.
///
/// The memory is leaked, and raw pointer is returned.
/// Caller should always call free_aligned to release the memory.
#[inline]
fn alloc_aligned_zeroed(cap: usize) -> (NonNull<u8>, usize) {
    let cap_u128 = (cap + ALIGNMENT - 1) / ALIGNMENT;
    let boxed: Box<[U128]> = vec![U128(0); cap_u128].into_boxed_slice();
    let cap = boxed.len() * ALIGNMENT;
    let ptr = NonNull::from(Box::leak(boxed)).cast::<u8>();
    (ptr, cap)
}

/// Release memory allocated by [`alloc_aligned_zeroed`].
///
/// # Safety
///
/// Caller must guarantee the input pointer and size is identical to
/// the returned value of `alloc_aligned_zeroed`, and only call this method
/// once. After this call, the memory must not be used.
#[inline]
unsafe fn free_aligned(ptr: NonNull<u8>, cap: usize) {
    debug_assert!(cap % ALIGNMENT == 0);
    let cap_u128 = cap / ALIGNMENT;
    let slice = std::ptr::slice_from_raw_parts_mut(ptr.as_ptr() as *mut U128, cap_u128);
    drop(Box::from_raw(slice));
}

#[derive(Debug)]
struct Accounting {
    limit: usize,
    allocated: AtomicUsize,
    peak: AtomicUsize,
}

/// Allocator hands out aligned byte arrays and keeps track of
/// the total bytes currently held by them.
///
/// It is cheap to clone. All clones share the same limit and
/// accounting, so a vector and every buffer it creates are
/// charged to the same budget.
#[derive(Debug, Clone)]
pub struct Allocator {
    inner: Arc<Accounting>,
}

impl Allocator {
    /// Create a new allocator which refuses to hold more than
    /// `limit` bytes at any time.
    #[inline]
    pub fn new(limit: usize) -> Self {
        Allocator {
            inner: Arc::new(Accounting {
                limit,
                allocated: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }),
        }
    }

    /// Create an allocator without limit.
    #[inline]
    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }

    /// Returns the byte limit of this allocator.
    #[inline]
    pub fn limit(&self) -> usize {
        self.inner.limit
    }

    /// Returns bytes currently held by live arrays.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.inner.allocated.load(Ordering::Acquire)
    }

    /// Returns the highest value [`allocated_bytes`](Self::allocated_bytes) ever reached.
    #[inline]
    pub fn peak_bytes(&self) -> usize {
        self.inner.peak.load(Ordering::Acquire)
    }

    /// Allocate a zeroed array with at least given number of bytes.
    /// Note: capacity is always aligned to multiple of 16.
    #[inline]
    pub fn allocate(&self, cap_u8: usize) -> Result<RawArray> {
        let requested = cap_u8.checked_add(ALIGNMENT - 1).ok_or(Error::CapacityExhausted {
            requested: cap_u8,
            limit: self.limit(),
        })? & !(ALIGNMENT - 1);
        self.acquire(requested)?;
        let (ptr, cap_u8) = alloc_aligned_zeroed(requested);
        debug_assert_eq!(requested, cap_u8);
        Ok(RawArray {
            ptr,
            cap_u8,
            alloc: self.clone(),
        })
    }

    /// Returns an array with no memory, which never fails.
    #[inline]
    pub fn empty(&self) -> RawArray {
        let (ptr, cap_u8) = alloc_aligned_zeroed(0);
        RawArray {
            ptr,
            cap_u8,
            alloc: self.clone(),
        }
    }

    #[inline]
    fn acquire(&self, n: usize) -> Result<()> {
        let limit = self.inner.limit;
        match self
            .inner
            .allocated
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |curr| {
                curr.checked_add(n).filter(|total| *total <= limit)
            }) {
            Ok(prev) => {
                self.inner.peak.fetch_max(prev + n, Ordering::AcqRel);
                Ok(())
            }
            Err(curr) => {
                log::warn!(
                    "allocation of {} bytes refused, {} of {} bytes in use",
                    n,
                    curr,
                    limit
                );
                Err(Error::CapacityExhausted {
                    requested: n,
                    limit,
                })
            }
        }
    }

    /// Charge given bytes regardless of limit.
    /// Returns whether the allocator is still within limit.
    #[inline]
    fn force_acquire(&self, n: usize) -> bool {
        let prev = self.inner.allocated.fetch_add(n, Ordering::AcqRel);
        let total = prev.saturating_add(n);
        self.inner.peak.fetch_max(total, Ordering::AcqRel);
        total <= self.inner.limit
    }

    /// Returns whether two allocators share the same accounting.
    #[inline]
    pub fn same(&self, other: &Allocator) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    #[inline]
    fn release(&self, n: usize) {
        let prev = self.inner.allocated.fetch_sub(n, Ordering::AcqRel);
        debug_assert!(prev >= n);
    }
}

impl Default for Allocator {
    #[inline]
    fn default() -> Self {
        Allocator::unlimited()
    }
}

/// RawArray is a safe abstraction of an aligned, zero-initialized
/// byte array charged to an [`Allocator`].
///
/// Memory is returned to the allocator exactly once, when the array
/// is dropped.
#[derive(Debug)]
pub struct RawArray {
    ptr: NonNull<u8>,
    cap_u8: usize,
    alloc: Allocator,
}

unsafe impl Send for RawArray {}
unsafe impl Sync for RawArray {}

impl Drop for RawArray {
    #[inline]
    fn drop(&mut self) {
        // # SAFETY
        //
        // The pointer and capacity are guaranteed to be always valid.
        unsafe { free_aligned(self.ptr, self.cap_u8) }
        self.alloc.release(self.cap_u8);
    }
}

impl RawArray {
    /// Returns byte capacity.
    #[inline]
    pub fn cap_u8(&self) -> usize {
        self.cap_u8
    }

    /// Returns the allocator this array is charged to.
    #[inline]
    pub fn allocator(&self) -> &Allocator {
        &self.alloc
    }

    /// Returns immutable byte slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        // # SAFETY
        //
        // Pointer and capacity are only replaced together, and memory
        // is zero-initialized on allocation.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr() as *const u8, self.cap_u8) }
    }

    /// Returns mutable byte slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        // # SAFETY
        //
        // Pointer and capacity are only replaced together, and memory
        // is zero-initialized on allocation.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.cap_u8) }
    }

    /// Grow the array to at least given number of bytes.
    /// Existing content is preserved and the new region is zeroed.
    ///
    /// The new memory is acquired before the old one is released,
    /// so the array is untouched if allocation fails.
    #[inline]
    pub fn reallocate(&mut self, cap_u8: usize) -> Result<()> {
        if cap_u8 <= self.cap_u8 {
            return Ok(());
        }
        let mut new_arr = self.alloc.allocate(cap_u8)?;
        new_arr.as_slice_mut()[..self.cap_u8].copy_from_slice(self.as_slice());
        *self = new_arr;
        Ok(())
    }

    /// Move accounting of this array to target allocator.
    ///
    /// The memory itself is not touched. Target is charged even
    /// if it goes beyond its limit, and the return value tells
    /// whether the target is still within limit.
    #[inline]
    pub fn transfer_accounting(&mut self, target: &Allocator) -> bool {
        if self.alloc.same(target) {
            return true;
        }
        let fit = target.force_acquire(self.cap_u8);
        self.alloc.release(self.cap_u8);
        self.alloc = target.clone();
        fit
    }

    /// Fill the whole array with zeros.
    #[inline]
    pub fn zero(&mut self) {
        self.as_slice_mut().fill(0);
    }
}
