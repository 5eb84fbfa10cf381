use core::fmt;

use easel_mem::{LinearMemory, MemResult};
use easel_types::{Bytes, GuestPtr};

/// Wire type of a single struct field.
///
/// Every variant has a fixed width and is stored little-endian (single bytes
/// trivially so), matching the layout the wasm32 guest compiles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTy {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
}

impl FieldTy {
    /// Width of the field in bytes.
    pub const fn width(self) -> u32 {
        match self {
            FieldTy::U8 | FieldTy::I8 | FieldTy::Bool => 1,
            FieldTy::U16 | FieldTy::I16 => 2,
            FieldTy::U32 | FieldTy::I32 | FieldTy::F32 => 4,
            FieldTy::U64 | FieldTy::I64 | FieldTy::F64 => 8,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FieldTy::U8 => "u8",
            FieldTy::U16 => "u16",
            FieldTy::U32 => "u32",
            FieldTy::U64 => "u64",
            FieldTy::I8 => "i8",
            FieldTy::I16 => "i16",
            FieldTy::I32 => "i32",
            FieldTy::I64 => "i64",
            FieldTy::F32 => "f32",
            FieldTy::F64 => "f64",
            FieldTy::Bool => "bool",
        }
    }
}

impl fmt::Display for FieldTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A value that can be read from and written to a struct field.
///
/// The codec pins the field's wire type and converts between the guest's
/// little-endian bytes and the Rust value. Newtypes that wrap a primitive
/// scalar implement this by delegating to the wrapped type, which retypes
/// the field without changing its layout; [`GuestPtr`] and [`Bytes`] do
/// exactly that on top of `u32`.
pub trait FieldCodec: Copy {
    /// Wire type this codec reads and writes.
    const TY: FieldTy;

    fn read_from<M: LinearMemory>(mem: &M, addr: u64) -> MemResult<Self>;

    fn write_to<M: LinearMemory>(mem: &mut M, addr: u64, value: Self) -> MemResult<()>;
}

macro_rules! scalar_codec {
    ($ty:ty, $variant:ident, $read:ident, $write:ident) => {
        impl FieldCodec for $ty {
            const TY: FieldTy = FieldTy::$variant;

            fn read_from<M: LinearMemory>(mem: &M, addr: u64) -> MemResult<Self> {
                mem.$read(addr)
            }

            fn write_to<M: LinearMemory>(mem: &mut M, addr: u64, value: Self) -> MemResult<()> {
                mem.$write(addr, value)
            }
        }
    };
}

scalar_codec!(u8, U8, read_u8_le, write_u8_le);
scalar_codec!(u16, U16, read_u16_le, write_u16_le);
scalar_codec!(u32, U32, read_u32_le, write_u32_le);
scalar_codec!(u64, U64, read_u64_le, write_u64_le);
scalar_codec!(i8, I8, read_i8_le, write_i8_le);
scalar_codec!(i16, I16, read_i16_le, write_i16_le);
scalar_codec!(i32, I32, read_i32_le, write_i32_le);
scalar_codec!(i64, I64, read_i64_le, write_i64_le);
scalar_codec!(f32, F32, read_f32_le, write_f32_le);
scalar_codec!(f64, F64, read_f64_le, write_f64_le);

/// Any nonzero byte reads back as `true`.
impl FieldCodec for bool {
    const TY: FieldTy = FieldTy::Bool;

    fn read_from<M: LinearMemory>(mem: &M, addr: u64) -> MemResult<Self> {
        Ok(mem.read_u8_le(addr)? != 0)
    }

    fn write_to<M: LinearMemory>(mem: &mut M, addr: u64, value: Self) -> MemResult<()> {
        mem.write_u8_le(addr, u8::from(value))
    }
}

/// Guest pointers travel as plain `u32` fields.
impl FieldCodec for GuestPtr {
    const TY: FieldTy = FieldTy::U32;

    fn read_from<M: LinearMemory>(mem: &M, addr: u64) -> MemResult<Self> {
        Ok(GuestPtr::new(mem.read_u32_le(addr)?))
    }

    fn write_to<M: LinearMemory>(mem: &mut M, addr: u64, value: Self) -> MemResult<()> {
        mem.write_u32_le(addr, value.get())
    }
}

/// Byte counts (pitches, lengths) travel as plain `u32` fields.
impl FieldCodec for Bytes {
    const TY: FieldTy = FieldTy::U32;

    fn read_from<M: LinearMemory>(mem: &M, addr: u64) -> MemResult<Self> {
        Ok(Bytes::new(mem.read_u32_le(addr)?))
    }

    fn write_to<M: LinearMemory>(mem: &mut M, addr: u64, value: Self) -> MemResult<()> {
        mem.write_u32_le(addr, value.get())
    }
}
