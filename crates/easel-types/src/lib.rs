#![forbid(unsafe_code)]
#![no_std]

//! Flavoured numeric types for the guest linear-memory manager.
//!
//! The heap and struct-view layers juggle three kinds of integer that are all
//! "just a number" on the wire: byte offsets into guest memory, byte counts,
//! and wasm page counts. Mixing them up compiles fine with raw integers and
//! corrupts guest state at runtime, so each flavour gets its own wrapper:
//!
//! - [`GuestPtr`]: a byte offset into guest linear memory. 32-bit, because
//!   that is the pointer width the wasm32 guest stores in shared records.
//! - [`Bytes`]: a byte count (allocation sizes, field widths).
//! - [`Pages`]: a count of 64 KiB wasm pages (growth granularity).
//!
//! Arithmetic between different flavours is deliberately not implemented.

use core::fmt;
use core::ops::{Add, AddAssign, Sub};

/// Size of one WebAssembly page. Linear memory only ever grows in whole
/// multiples of this.
pub const WASM_PAGE_BYTES: u32 = 64 * 1024;

/// Hard page limit of a wasm32 linear memory (65536 pages = 4 GiB).
pub const WASM_MAX_PAGES: u32 = 65536;

/// A byte offset into guest linear memory, as seen by the guest.
///
/// This is the value stored in 4-byte pointer fields of records shared with
/// the guest module. Host-side range arithmetic widens to `u64` (see
/// [`GuestPtr::as_u64`]) so `offset + len` can never wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GuestPtr(u32);

impl GuestPtr {
    /// The guest null pointer.
    pub const NULL: GuestPtr = GuestPtr(0);

    pub const fn new(offset: u32) -> Self {
        GuestPtr(offset)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn as_u64(self) -> u64 {
        self.0 as u64
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, len: Bytes) -> Option<GuestPtr> {
        self.0.checked_add(len.0).map(GuestPtr)
    }
}

impl From<u32> for GuestPtr {
    fn from(offset: u32) -> Self {
        GuestPtr(offset)
    }
}

impl fmt::Display for GuestPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// A count of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Bytes(u32);

impl Bytes {
    pub const ZERO: Bytes = Bytes(0);

    pub const fn new(len: u32) -> Self {
        Bytes(len)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn as_u64(self) -> u64 {
        self.0 as u64
    }

    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Bytes) -> Option<Bytes> {
        self.0.checked_add(other.0).map(Bytes)
    }
}

impl From<u32> for Bytes {
    fn from(len: u32) -> Self {
        Bytes(len)
    }
}

impl Add for Bytes {
    type Output = Bytes;

    fn add(self, rhs: Bytes) -> Bytes {
        Bytes(self.0 + rhs.0)
    }
}

impl AddAssign for Bytes {
    fn add_assign(&mut self, rhs: Bytes) {
        self.0 += rhs.0;
    }
}

impl Sub for Bytes {
    type Output = Bytes;

    fn sub(self, rhs: Bytes) -> Bytes {
        Bytes(self.0 - rhs.0)
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A count of 64 KiB wasm pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pages(u32);

impl Pages {
    pub const fn new(count: u32) -> Self {
        Pages(count)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Total size of this many pages, in bytes. Widened to `u64` because the
    /// full wasm32 address space (65536 pages) does not fit in `u32`.
    pub const fn byte_len(self) -> u64 {
        self.0 as u64 * WASM_PAGE_BYTES as u64
    }

    pub fn checked_add(self, other: Pages) -> Option<Pages> {
        self.0.checked_add(other.0).map(Pages)
    }

    /// Smallest page count whose [`byte_len`](Pages::byte_len) is at least
    /// `bytes`.
    pub const fn covering(bytes: u64) -> Pages {
        Pages(bytes.div_ceil(WASM_PAGE_BYTES as u64) as u32)
    }
}

impl From<u32> for Pages {
    fn from(count: u32) -> Self {
        Pages(count)
    }
}

impl Add for Pages {
    type Output = Pages;

    fn add(self, rhs: Pages) -> Pages {
        Pages(self.0 + rhs.0)
    }
}

impl fmt::Display for Pages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
