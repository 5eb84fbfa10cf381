#![forbid(unsafe_code)]

//! First-fit block allocator over guest linear memory.
//!
//! The host hands out regions of the guest's own linear memory so that
//! records shared with the guest (surfaces, event structs, strings) live at
//! stable guest-visible addresses. Design points:
//!
//! - The allocator owns its [`LinearMemory`](easel_mem::LinearMemory) and an
//!   address-ordered block list that exactly partitions the managed span:
//!   every byte from the heap base to the current capacity belongs to
//!   exactly one block, allocated or free.
//! - The heap base is the memory's size at construction time: everything
//!   below it (the guest image, its data and stack) is never touched, and
//!   the heap only manages space appended afterwards by whole-page growth.
//! - Allocations are 8-byte aligned, zero-filled, and stable: growth appends
//!   pages, so a pointer stays valid until it is freed.
//! - Failures are total: a refused growth or a bad free leaves the block
//!   list and the memory exactly as they were.

mod allocator;
mod error;

pub use allocator::{Allocator, Block, HeapStats, ALIGN_BYTES};
pub use error::{HeapError, HeapResult};
