use easel_mem::MemError;
use easel_types::GuestPtr;
use thiserror::Error;

/// Errors returned by the heap allocator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `free` was called with a pointer that is not the start of any heap
    /// block. The heap is left untouched.
    #[error("invalid free: {ptr} is not the start of any heap block")]
    InvalidFree { ptr: GuestPtr },

    /// The underlying linear memory rejected an access or refused to grow.
    #[error(transparent)]
    Mem(#[from] MemError),
}

pub type HeapResult<T> = Result<T, HeapError>;
