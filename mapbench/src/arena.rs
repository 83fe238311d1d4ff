//! Bump-pointer arena over a single anonymous memory map.
//!
//! The arena reserves its whole capacity up front and hands out raw
//! pointers by advancing a cursor. Individual allocations are never freed;
//! [`Arena::reset`] throws the entire region away and reserves a fresh one.
//! This trades flexibility for allocation cost: a successful `alloc` is a
//! bounds check and an addition.

use std::io;
use std::ptr::NonNull;

use memmap2::MmapMut;

/// Default capacity when none is given (256 MiB).
pub const DEFAULT_CAPACITY: usize = 256 * 1024 * 1024;

/// Minimum alignment of every allocation.
const MIN_ALIGN: usize = 8;

fn page_size() -> usize {
    #[cfg(unix)]
    {
        static PAGE_SIZE: std::sync::OnceLock<usize> = std::sync::OnceLock::new();
        *PAGE_SIZE.get_or_init(|| {
            let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
            assert!(size > 0, "failed to get page size");
            size as usize
        })
    }

    #[cfg(not(unix))]
    {
        4096
    }
}

/// A fixed-capacity bump allocator.
///
/// Exclusively owned by its creator: the arena is movable but not
/// clonable, and every pointer it hands out is tied to its lifetime.
///
/// # Pointer validity
///
/// Pointers returned by [`alloc`](Self::alloc) and
/// [`alloc_bytes`](Self::alloc_bytes) stay valid until the arena is
/// dropped **or** [`reset`](Self::reset) is called. `reset` replaces the
/// whole mapping, so callers must not retain pointers across it.
pub struct Arena {
    map: MmapMut,
    cap: usize,
    used: usize,
}

impl Arena {
    /// Reserve an arena of [`DEFAULT_CAPACITY`].
    pub fn new() -> io::Result<Self> {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Reserve an arena of at least `capacity` bytes, rounded up to the
    /// page size. [`capacity`](Self::capacity) reports the rounded value.
    pub fn with_capacity(capacity: usize) -> io::Result<Self> {
        let page = page_size();
        let cap = capacity
            .max(1)
            .checked_add(page - 1)
            .map(|c| c & !(page - 1))
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "capacity overflow"))?;
        let map = MmapMut::map_anon(cap)?;
        Ok(Self { map, cap, used: 0 })
    }

    /// Carve out `size` bytes and advance the cursor.
    ///
    /// Returns `None` when the remaining space is insufficient; a failed
    /// call does not advance the cursor, so the caller may `reset` and
    /// retry, or fall back to another allocator.
    pub fn alloc(&mut self, size: usize) -> Option<NonNull<u8>> {
        let offset = (self.used + MIN_ALIGN - 1) & !(MIN_ALIGN - 1);
        let end = offset.checked_add(size)?;
        if end > self.cap {
            return None;
        }
        // SAFETY: offset..end lies within the mapping.
        let ptr = unsafe { self.map.as_mut_ptr().add(offset) };
        self.used = end;
        NonNull::new(ptr)
    }

    /// Allocate `bytes.len()` bytes and copy `bytes` into them.
    pub fn alloc_bytes(&mut self, bytes: &[u8]) -> Option<NonNull<[u8]>> {
        let ptr = self.alloc(bytes.len())?;
        // SAFETY: `ptr` addresses `bytes.len()` writable bytes inside the
        // mapping, which cannot overlap the source slice.
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr(), bytes.len());
        }
        Some(NonNull::slice_from_raw_parts(ptr, bytes.len()))
    }

    /// Total bytes this arena can hand out before needing a reset.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Bytes still available.
    #[inline]
    pub fn space(&self) -> usize {
        self.cap - self.used
    }

    /// Bytes consumed so far (including alignment padding).
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Release the region and reserve a fresh one of the same capacity.
    ///
    /// Every previously returned pointer is invalidated without notice.
    pub fn reset(&mut self) -> io::Result<()> {
        self.map = MmapMut::map_anon(self.cap)?;
        self.used = 0;
        Ok(())
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.cap)
            .field("used", &self.used)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_within_capacity() {
        let mut arena = Arena::with_capacity(4096).unwrap();
        let cap = arena.capacity();

        // A fresh arena satisfies an allocation of its whole capacity.
        assert!(arena.alloc(cap).is_some());
        assert_eq!(arena.space(), 0);
        assert!(arena.alloc(1).is_none());
    }

    #[test]
    fn test_alloc_beyond_capacity_fails_cleanly() {
        let mut arena = Arena::with_capacity(4096).unwrap();
        let cap = arena.capacity();

        assert!(arena.alloc(cap + 1).is_none());
        // A failed alloc must not consume space.
        assert_eq!(arena.space(), cap);
        assert!(arena.alloc(cap).is_some());
    }

    #[test]
    fn test_reset_restores_full_capacity() {
        let mut arena = Arena::with_capacity(4096).unwrap();
        let cap = arena.capacity();

        assert!(arena.alloc(cap).is_some());
        for _ in 0..3 {
            assert!(arena.alloc(64).is_none());
        }

        arena.reset().unwrap();
        assert_eq!(arena.space(), cap);
        assert_eq!(arena.used(), 0);
        assert!(arena.alloc(cap).is_some());
    }

    #[test]
    fn test_alloc_bytes_roundtrip() {
        let mut arena = Arena::with_capacity(4096).unwrap();

        let hello = arena.alloc_bytes(b"hello").unwrap();
        let world = arena.alloc_bytes(b"world").unwrap();

        // SAFETY: no reset between allocation and read.
        unsafe {
            assert_eq!(hello.as_ref(), b"hello");
            assert_eq!(world.as_ref(), b"world");
        }
    }

    #[test]
    fn test_allocations_are_aligned() {
        let mut arena = Arena::with_capacity(4096).unwrap();

        let a = arena.alloc(3).unwrap();
        let b = arena.alloc(3).unwrap();
        assert_eq!(a.as_ptr() as usize % 8, 0);
        assert_eq!(b.as_ptr() as usize % 8, 0);
        assert!(b.as_ptr() as usize >= a.as_ptr() as usize + 3);
    }

    #[test]
    fn test_capacity_is_page_rounded() {
        let arena = Arena::with_capacity(100).unwrap();
        assert!(arena.capacity() >= 100);
        assert_eq!(arena.capacity() % page_size(), 0);
    }

    #[test]
    fn test_zero_sized_alloc() {
        let mut arena = Arena::with_capacity(4096).unwrap();
        assert!(arena.alloc(0).is_some());
        assert_eq!(arena.space(), arena.capacity());
    }
}
