//! Typed struct views over guest linear memory.
//!
//! Structs shared with the wasm32 guest are packed little-endian records at
//! fixed offsets. [`SchemaBuilder`] turns a field-by-field declaration into
//! precomputed offsets and typed [`Field`] handles; [`StructView`] and
//! [`StructViewMut`] bind those handles to a memory and base address for
//! bounds-checked reads and writes.
//!
//! ```
//! use easel_abi::{SchemaBuilder, StructViewMut};
//! use easel_mem::VecMemory;
//! use easel_types::{GuestPtr, Pages};
//!
//! let mut b = SchemaBuilder::new();
//! let w = b.field::<i32>("w");
//! let h = b.field::<i32>("h");
//! let rect = b.finish();
//! assert_eq!(rect.size_bytes().get(), 8);
//!
//! let mut mem = VecMemory::new(Pages::new(1))?;
//! let mut view = StructViewMut::new(&mut mem, GuestPtr::new(64));
//! view.set(w, 640)?;
//! view.set(h, 480)?;
//! assert_eq!(view.get(w)?, 640);
//! # Ok::<(), easel_mem::MemError>(())
//! ```

#![forbid(unsafe_code)]

mod field;
mod schema;
mod view;

pub use field::{FieldCodec, FieldTy};
pub use schema::{Field, FieldDef, Schema, SchemaBuilder};
pub use view::{StructView, StructViewMut};
