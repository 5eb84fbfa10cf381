#![forbid(unsafe_code)]

//! Raw linear-memory abstraction underneath the guest heap and struct-view
//! layers.
//!
//! Guest state lives in a single growable byte buffer (on the web, a
//! `WebAssembly.Memory`). Everything above this crate manipulates that buffer
//! through one seam:
//!
//! - [`LinearMemory`]: bounds-checked byte access plus little-endian typed
//!   accessors and whole-page growth.
//! - [`VecMemory`]: the native implementation over a zero-initialised
//!   `Vec<u8>`, with an optional page ceiling mirroring the `maximum` of a
//!   real `WebAssembly.Memory`.
//! - `JsMemory` (wasm32 only): the same contract bound to a live JS
//!   `WebAssembly.Memory` object.
//!
//! All addresses are `u64` at this layer; flavoured wrappers ([`easel_types`])
//! appear at the public heap and view APIs, not in the byte plumbing.

mod error;
#[cfg(target_arch = "wasm32")]
mod js_memory;
mod linear;
mod vec_memory;

pub use error::{MemError, MemResult};
#[cfg(target_arch = "wasm32")]
pub use js_memory::JsMemory;
pub use linear::LinearMemory;
pub use vec_memory::VecMemory;
