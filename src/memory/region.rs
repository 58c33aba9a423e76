//! A handle to a byte region owned somewhere else: a heap buffer, a page from an allocator,
//! or a borrow of either. Rows only ever look at regions through these traits.
use bytes::{Bytes, BytesMut};

bitflags! {
    pub struct RegionFlags: u8 {
        /// Not a plain heap array, must be streamed through a scratch buffer.
        const OFF_HEAP = 0b00000001;
        /// Holds indexes into an object pool instead of self contained values.
        const OBJECT_POOL = 0b00000010;
    }
}

pub trait MemoryRegion {
    fn as_bytes(&self) -> &[u8];

    fn flags(&self) -> RegionFlags {
        RegionFlags::empty()
    }

    /// Gives access to the region as a shared buffer if that is what backs it, so
    /// callers can hand it out without copying.
    fn as_shared(&self) -> Option<&Bytes> {
        None
    }
}

pub trait MemoryRegionMut: MemoryRegion {
    fn as_bytes_mut(&mut self) -> &mut [u8];
}

impl MemoryRegion for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl MemoryRegionMut for [u8] {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl MemoryRegion for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }
}

impl MemoryRegionMut for Vec<u8> {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl MemoryRegion for Bytes {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_shared(&self) -> Option<&Bytes> {
        Some(self)
    }
}

impl MemoryRegion for BytesMut {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl MemoryRegionMut for BytesMut {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl<T: MemoryRegion + ?Sized> MemoryRegion for &T {
    fn as_bytes(&self) -> &[u8] {
        (**self).as_bytes()
    }

    fn flags(&self) -> RegionFlags {
        (**self).flags()
    }

    fn as_shared(&self) -> Option<&Bytes> {
        (**self).as_shared()
    }
}

impl<T: MemoryRegion + ?Sized> MemoryRegion for &mut T {
    fn as_bytes(&self) -> &[u8] {
        (**self).as_bytes()
    }

    fn flags(&self) -> RegionFlags {
        (**self).flags()
    }

    fn as_shared(&self) -> Option<&Bytes> {
        (**self).as_shared()
    }
}

impl<T: MemoryRegionMut + ?Sized> MemoryRegionMut for &mut T {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        (**self).as_bytes_mut()
    }
}
