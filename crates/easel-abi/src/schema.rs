use core::fmt;
use core::marker::PhantomData;

use easel_types::Bytes;

use crate::field::{FieldCodec, FieldTy};

/// Typed handle to one field of a schema.
///
/// Carries the field's precomputed byte offset and the codec to use at that
/// offset. Handles are plain copies; they stay valid for any view built over
/// the schema that produced them.
pub struct Field<T> {
    offset: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Field<T> {
    /// Byte offset of this field from the start of the struct.
    pub fn offset(self) -> Bytes {
        Bytes::new(self.offset)
    }
}

impl<T: FieldCodec> Field<T> {
    /// Retypes this field under another codec of the same width.
    ///
    /// The offset and the bytes on the wire are untouched; only the Rust
    /// type used to read and write them changes.
    ///
    /// # Panics
    ///
    /// Panics if the two codecs have different widths, since that would
    /// change the struct's layout.
    pub fn cast<U: FieldCodec>(self) -> Field<U> {
        assert_eq!(
            T::TY.width(),
            U::TY.width(),
            "cannot retype a {} field as {}",
            T::TY,
            U::TY,
        );
        Field {
            offset: self.offset,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("offset", &self.offset).finish()
    }
}

/// Name, wire type and offset of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: FieldTy,
    pub offset: u32,
}

/// Accumulates fields in declaration order.
///
/// Fields are packed back to back with no alignment padding, exactly as the
/// guest-side headers declare them; each field's offset is the running total
/// of the widths before it.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDef>,
    size: u32,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field and returns its typed handle.
    ///
    /// # Panics
    ///
    /// Panics if the running layout no longer fits 32-bit offsets.
    pub fn field<T: FieldCodec>(&mut self, name: &'static str) -> Field<T> {
        let ty = T::TY;
        let offset = self.size;
        self.size = match self.size.checked_add(ty.width()) {
            Some(size) => size,
            None => panic!("struct layout overflows 32-bit offsets at field `{name}`"),
        };
        self.fields.push(FieldDef { name, ty, offset });
        Field {
            offset,
            _marker: PhantomData,
        }
    }

    pub fn finish(self) -> Schema {
        Schema {
            fields: self.fields,
            size: self.size,
        }
    }
}

/// Completed field layout: the declared fields plus the struct's total size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldDef>,
    size: u32,
}

impl Schema {
    /// Total struct size, the sum of all field widths.
    pub fn size_bytes(&self) -> Bytes {
        Bytes::new(self.size)
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field_named(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|d| d.name == name)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "struct of {} bytes", self.size)?;
        for d in &self.fields {
            writeln!(f, "  {:#06x} {:>4} {}", d.offset, d.ty, d.name)?;
        }
        Ok(())
    }
}
