use thiserror::Error;

/// Errors returned by [`LinearMemory`](crate::LinearMemory) implementations.
///
/// Every variant is fatal to the failing call and leaves the buffer exactly
/// as it was; none of these are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemError {
    /// The requested range ends past the current capacity.
    #[error("linear memory access out of range: addr={addr:#x} len={len} capacity={capacity:#x}")]
    OutOfBounds { addr: u64, len: usize, capacity: u64 },

    /// `addr + len` does not fit in the address arithmetic.
    #[error("linear memory offset arithmetic overflowed")]
    OffsetOverflow,

    /// Growth was refused because it would exceed the configured page limit.
    #[error("cannot grow linear memory by {requested} pages: {limit}-page limit reached")]
    GrowthLimit { requested: u32, limit: u32 },

    /// The host could not provide the requested pages (allocation failure, or
    /// the engine refused the `memory.grow`).
    #[error("host failed to provide {requested} more pages of linear memory")]
    GrowthFailed { requested: u32 },
}

pub type MemResult<T> = Result<T, MemError>;
