use easel_mem::{LinearMemory, MemError};
use easel_types::{Bytes, GuestPtr, Pages};

use crate::error::{HeapError, HeapResult};

/// Alignment unit of the heap. Every block length and every returned pointer
/// is a multiple of this, which also lets the zero-fill run a word at a time.
pub const ALIGN_BYTES: u64 = 8;

const fn align_up(len: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    (len + align - 1) & !(align - 1)
}

/// One contiguous span of the managed heap.
///
/// Addresses and lengths are `u64` here (like the [`LinearMemory`] layer) so
/// a block can sit right up against the 4 GiB wasm32 boundary; public heap
/// pointers are the 32-bit [`GuestPtr`] flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub addr: u64,
    pub len: u64,
    pub free: bool,
}

impl Block {
    pub fn end(&self) -> u64 {
        self.addr + self.len
    }
}

/// Running totals for diagnostics, derived from the block list on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapStats {
    /// Current capacity of the underlying memory, in bytes.
    pub capacity: u64,
    /// Start of the managed span (the memory's size at construction time).
    pub base: u64,
    /// Bytes currently handed out, including alignment padding.
    pub allocated: u64,
    /// Bytes currently free for reuse.
    pub free: u64,
    /// Number of blocks in the partition.
    pub blocks: usize,
}

/// First-fit block allocator over a guest linear memory it owns.
///
/// The block list is kept in address order and exactly partitions
/// `[base, capacity)` at all times, including across failed operations.
/// Freed blocks coalesce with their immediate *successor* only; a free
/// predecessor is left as a separate block. That matches the allocation
/// patterns this heap serves (short-lived records freed in creation order)
/// and keeps `free` O(log n) + O(1); end-of-heap fragmentation heals anyway
/// because growth merges fresh pages into a trailing free block.
#[derive(Debug, Clone)]
pub struct Allocator<M> {
    mem: M,
    base: u64,
    blocks: Vec<Block>,
}

impl<M: LinearMemory> Allocator<M> {
    /// Takes ownership of `mem` and starts managing everything past its
    /// current end. The guest image below that point is never touched.
    pub fn new(mem: M) -> Self {
        let base = mem.size();
        // Zero-length free seed block: keeps the partition invariant true
        // from the start and gives the first growth a block to merge into.
        let blocks = vec![Block {
            addr: base,
            len: 0,
            free: true,
        }];
        Self { mem, base, blocks }
    }

    /// Reserves `size` bytes (rounded up to [`ALIGN_BYTES`]) and zero-fills
    /// them. Grows the memory by whole pages when no free block fits; a
    /// refused growth surfaces as [`MemError::GrowthLimit`] or
    /// [`MemError::GrowthFailed`] with the heap unchanged.
    ///
    /// A zero-byte request succeeds and returns a valid, freeable pointer to
    /// an empty block.
    pub fn alloc(&mut self, size: Bytes) -> HeapResult<GuestPtr> {
        let rounded = align_up(size.as_u64(), ALIGN_BYTES);
        let index = match self.find_free(rounded) {
            Some(index) => index,
            None => self.extend_for(rounded)?,
        };
        let addr = self.blocks[index].addr;
        // A block can only start at 2^32 when a zero-length request lands at
        // the end of a completely full 4 GiB memory; that offset no longer
        // fits the guest pointer width. Checked before claiming so the
        // failure leaves the block list alone.
        let ptr = u32::try_from(addr).map_err(|_| MemError::OffsetOverflow)?;
        self.split_and_claim(index, rounded);
        self.zero_fill(addr, rounded)?;
        Ok(GuestPtr::new(ptr))
    }

    /// Returns the block starting at `ptr` to the free list.
    ///
    /// Freeing a pointer that is not a block start is an error and changes
    /// nothing. Freeing an already-free block is tolerated: it logs a
    /// warning and leaves the heap as it is, since the bytes are already
    /// reusable.
    pub fn free(&mut self, ptr: GuestPtr) -> HeapResult<()> {
        let index = self
            .find_block(ptr.as_u64())
            .ok_or(HeapError::InvalidFree { ptr })?;
        if self.blocks[index].free {
            tracing::warn!(%ptr, "double free of heap block");
            return Ok(());
        }
        self.blocks[index].free = true;
        self.coalesce_forward(index);
        Ok(())
    }

    /// Start of the managed span.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// The partition, in address order. Exposed read-only for diagnostics
    /// and tests.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn stats(&self) -> HeapStats {
        let mut allocated = 0;
        let mut free = 0;
        for block in &self.blocks {
            if block.free {
                free += block.len;
            } else {
                allocated += block.len;
            }
        }
        HeapStats {
            capacity: self.mem.size(),
            base: self.base,
            allocated,
            free,
            blocks: self.blocks.len(),
        }
    }

    pub fn memory(&self) -> &M {
        &self.mem
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.mem
    }

    pub fn into_inner(self) -> M {
        self.mem
    }

    /// Lowest-address free block that fits `len`.
    fn find_free(&self, len: u64) -> Option<usize> {
        self.blocks
            .iter()
            .position(|block| block.free && block.len >= len)
    }

    /// Grows the memory until the trailing free block fits `len` and returns
    /// its index. The page deficit is computed up front and requested as a
    /// single grow, so a refusal leaves both the memory and the block list
    /// untouched.
    fn extend_for(&mut self, len: u64) -> HeapResult<usize> {
        let tail_free = match self.blocks.last() {
            Some(last) if last.free => last.len,
            _ => 0,
        };
        // `find_free` failed, so the trailing free space (if any) is short.
        let deficit = len - tail_free;
        let pages = Pages::covering(deficit);
        let old_size = self.mem.size();
        self.mem.grow(pages)?;
        let grown = self.mem.size() - old_size;
        tracing::trace!(
            pages = pages.get(),
            capacity = self.mem.size(),
            "grew guest heap"
        );
        match self.blocks.last_mut() {
            Some(last) if last.free => last.len += grown,
            _ => self.blocks.push(Block {
                addr: old_size,
                len: grown,
                free: true,
            }),
        }
        Ok(self.blocks.len() - 1)
    }

    /// Claims `len` bytes at the front of the free block at `index`,
    /// splitting off the surplus as a new free block.
    fn split_and_claim(&mut self, index: usize, len: u64) {
        let block = self.blocks[index];
        debug_assert!(block.free && block.len >= len);
        if block.len > len {
            self.blocks[index] = Block {
                addr: block.addr,
                len,
                free: false,
            };
            self.blocks.insert(
                index + 1,
                Block {
                    addr: block.addr + len,
                    len: block.len - len,
                    free: true,
                },
            );
        } else {
            self.blocks[index].free = false;
        }
    }

    /// Merges the block at `index` with its immediate successor when that
    /// successor is free. Predecessors are deliberately left alone.
    fn coalesce_forward(&mut self, index: usize) {
        if index + 1 < self.blocks.len() && self.blocks[index + 1].free {
            let successor_len = self.blocks[index + 1].len;
            self.blocks[index].len += successor_len;
            self.blocks.remove(index + 1);
        }
    }

    /// Index of the block starting at `addr`. Zero-length blocks can share
    /// their address with their successor, so an allocated block wins over a
    /// free twin; among free twins the first is reported (and drawn through
    /// the double-free path).
    fn find_block(&self, addr: u64) -> Option<usize> {
        let first = self.blocks.partition_point(|block| block.addr < addr);
        let mut first_free = None;
        for index in first..self.blocks.len() {
            let block = &self.blocks[index];
            if block.addr != addr {
                break;
            }
            if !block.free {
                return Some(index);
            }
            if first_free.is_none() {
                first_free = Some(index);
            }
        }
        first_free
    }

    /// Zeroes `[addr, addr + len)` one 8-byte word at a time. `len` is
    /// always a multiple of the alignment unit here.
    fn zero_fill(&mut self, addr: u64, len: u64) -> HeapResult<()> {
        debug_assert_eq!(len % ALIGN_BYTES, 0);
        let mut offset = 0;
        while offset < len {
            self.mem.write_u64_le(addr + offset, 0)?;
            offset += ALIGN_BYTES;
        }
        Ok(())
    }
}
