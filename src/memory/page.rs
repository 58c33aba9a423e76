//! Fixed size pages handed out to callers that want rows living outside a plain heap array.
//! The allocator only hands memory out, the holder of a page decides when it is dropped.
use super::{MemoryRegion, MemoryRegionMut, RegionFlags};
use crate::constants::PAGE_SIZE;
use bytes::BytesMut;
use std::fmt;

#[derive(Debug)]
pub struct Page {
    number: usize,
    flags: RegionFlags,
    data: BytesMut,
}

impl Page {
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Zeroes the page so it can be handed to the next batch of rows.
    pub fn clear(&mut self) {
        for b in self.data.iter_mut() {
            *b = 0;
        }
    }
}

impl MemoryRegion for Page {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn flags(&self) -> RegionFlags {
        self.flags
    }
}

impl MemoryRegionMut for Page {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page")?;
        writeln!(f, "\tNumber: {}", self.number)?;
        writeln!(f, "\tSize: {}", self.data.len())?;
        writeln!(f, "\tFlags: {:?}", self.flags)
    }
}

#[derive(Debug)]
pub struct PageAllocator {
    page_size: usize,
    allocated: usize,
}

impl PageAllocator {
    pub fn new() -> PageAllocator {
        PageAllocator::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> PageAllocator {
        PageAllocator {
            page_size,
            allocated: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// How many pages this allocator has handed out so far.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    pub fn allocate(&mut self) -> Page {
        self.allocate_with_flags(RegionFlags::OFF_HEAP)
    }

    /// A page whose rows hold object pool indexes, rows bound to it cannot be copied.
    pub fn allocate_pooled(&mut self) -> Page {
        self.allocate_with_flags(RegionFlags::OFF_HEAP | RegionFlags::OBJECT_POOL)
    }

    fn allocate_with_flags(&mut self, flags: RegionFlags) -> Page {
        let mut data = BytesMut::with_capacity(self.page_size);
        data.resize(self.page_size, 0);

        let number = self.allocated;
        self.allocated += 1;
        debug!("Allocated page {} of {} bytes", number, self.page_size);

        Page {
            number,
            flags,
            data,
        }
    }
}

impl Default for PageAllocator {
    fn default() -> Self {
        Self::new()
    }
}
