mod page;
pub use page::Page;
pub use page::PageAllocator;

pub mod platform;

mod region;
pub use region::MemoryRegion;
pub use region::MemoryRegionMut;
pub use region::RegionFlags;
