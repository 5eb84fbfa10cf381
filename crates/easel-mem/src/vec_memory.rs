use easel_types::{Pages, WASM_MAX_PAGES};

use crate::error::{MemError, MemResult};
use crate::linear::{check_range, LinearMemory};

/// Growable host-side linear memory backed by a zero-initialised `Vec<u8>`.
///
/// The native stand-in for a guest `WebAssembly.Memory`: it starts at a whole
/// number of wasm pages, only ever grows, fresh pages read as zero, and an
/// optional page ceiling mirrors the `maximum` of the real thing. The wasm32
/// hard limit of 65536 pages applies either way.
#[derive(Debug, Clone)]
pub struct VecMemory {
    data: Vec<u8>,
    max_pages: Pages,
}

impl VecMemory {
    /// Creates a memory of `initial` zeroed pages with no ceiling short of
    /// the wasm32 address-space limit.
    pub fn new(initial: Pages) -> MemResult<Self> {
        Self::with_max(initial, Pages::new(WASM_MAX_PAGES))
    }

    /// Creates a memory of `initial` zeroed pages that refuses to grow past
    /// `max` pages in total.
    pub fn with_max(initial: Pages, max: Pages) -> MemResult<Self> {
        let mut mem = Self {
            data: Vec::new(),
            max_pages: Pages::new(max.get().min(WASM_MAX_PAGES)),
        };
        mem.grow(initial)?;
        Ok(mem)
    }

    /// Current size in whole pages.
    pub fn pages(&self) -> Pages {
        Pages::covering(self.data.len() as u64)
    }

    #[inline]
    fn range_to_usize(&self, addr: u64, len: usize) -> MemResult<(usize, usize)> {
        check_range(self.size(), addr, len)?;
        // Capacity is at most 4 GiB and the range ends inside it, so these
        // conversions only fail on 16-bit-style targets we do not support.
        let start = usize::try_from(addr).map_err(|_| MemError::OffsetOverflow)?;
        let end = start.checked_add(len).ok_or(MemError::OffsetOverflow)?;
        Ok((start, end))
    }
}

impl LinearMemory for VecMemory {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_into(&self, addr: u64, dst: &mut [u8]) -> MemResult<()> {
        let (start, end) = self.range_to_usize(addr, dst.len())?;
        dst.copy_from_slice(&self.data[start..end]);
        Ok(())
    }

    fn write_from(&mut self, addr: u64, src: &[u8]) -> MemResult<()> {
        let (start, end) = self.range_to_usize(addr, src.len())?;
        self.data[start..end].copy_from_slice(src);
        Ok(())
    }

    fn grow(&mut self, pages: Pages) -> MemResult<()> {
        if pages.get() == 0 {
            return Ok(());
        }
        let requested = pages.get();
        let new_pages = self
            .pages()
            .checked_add(pages)
            .ok_or(MemError::GrowthFailed { requested })?;
        if new_pages > self.max_pages {
            return Err(MemError::GrowthLimit {
                requested,
                limit: self.max_pages.get(),
            });
        }
        let new_len = usize::try_from(new_pages.byte_len())
            .map_err(|_| MemError::GrowthFailed { requested })?;
        let additional = new_len - self.data.len();
        self.data
            .try_reserve_exact(additional)
            .map_err(|_| MemError::GrowthFailed { requested })?;
        self.data.resize(new_len, 0);
        Ok(())
    }
}
