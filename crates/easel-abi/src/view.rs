use easel_mem::{LinearMemory, MemResult};
use easel_types::GuestPtr;

use crate::field::FieldCodec;
use crate::schema::Field;

/// Read-only view of one struct instance.
///
/// Binds a memory and a base address; field handles from the struct's schema
/// resolve to `base + offset`. Every access is bounds-checked against the
/// memory's current capacity.
pub struct StructView<'m, M> {
    mem: &'m M,
    base: GuestPtr,
}

impl<'m, M: LinearMemory> StructView<'m, M> {
    pub fn new(mem: &'m M, base: GuestPtr) -> Self {
        Self { mem, base }
    }

    pub fn base(&self) -> GuestPtr {
        self.base
    }

    pub fn get<T: FieldCodec>(&self, field: Field<T>) -> MemResult<T> {
        T::read_from(self.mem, self.base.as_u64() + field.offset().as_u64())
    }
}

/// Mutable view of one struct instance.
pub struct StructViewMut<'m, M> {
    mem: &'m mut M,
    base: GuestPtr,
}

impl<'m, M: LinearMemory> StructViewMut<'m, M> {
    pub fn new(mem: &'m mut M, base: GuestPtr) -> Self {
        Self { mem, base }
    }

    pub fn base(&self) -> GuestPtr {
        self.base
    }

    pub fn get<T: FieldCodec>(&self, field: Field<T>) -> MemResult<T> {
        T::read_from(self.mem, self.base.as_u64() + field.offset().as_u64())
    }

    pub fn set<T: FieldCodec>(&mut self, field: Field<T>, value: T) -> MemResult<()> {
        T::write_to(self.mem, self.base.as_u64() + field.offset().as_u64(), value)
    }
}

#[cfg(test)]
mod tests {
    use easel_mem::VecMemory;
    use easel_types::Pages;

    use crate::schema::SchemaBuilder;

    use super::*;

    #[test]
    fn set_then_get_round_trips_each_field() {
        let mut b = SchemaBuilder::new();
        let x = b.field::<i32>("x");
        let big = b.field::<u64>("big");
        let half = b.field::<f32>("half");
        let flag = b.field::<bool>("flag");

        let mut mem = VecMemory::new(Pages::new(1)).unwrap();
        let base = GuestPtr::new(128);
        let mut view = StructViewMut::new(&mut mem, base);
        view.set(x, -7).unwrap();
        view.set(big, 0xdead_beef_0123_4567).unwrap();
        view.set(half, 1.5).unwrap();
        view.set(flag, true).unwrap();

        let view = StructView::new(&mem, base);
        assert_eq!(view.get(x).unwrap(), -7);
        assert_eq!(view.get(big).unwrap(), 0xdead_beef_0123_4567);
        assert_eq!(view.get(half).unwrap(), 1.5);
        assert!(view.get(flag).unwrap());
    }

    #[test]
    fn the_same_handles_work_at_any_base() {
        let mut b = SchemaBuilder::new();
        let w = b.field::<i32>("w");
        let h = b.field::<i32>("h");
        let stride = b.finish().size_bytes();

        let mut mem = VecMemory::new(Pages::new(1)).unwrap();
        for i in 0..4u32 {
            let base = GuestPtr::new(i * stride.get());
            let mut view = StructViewMut::new(&mut mem, base);
            view.set(w, i as i32 * 10).unwrap();
            view.set(h, i as i32 * 10 + 1).unwrap();
        }

        let third = StructView::new(&mem, GuestPtr::new(2 * stride.get()));
        assert_eq!(third.get(w).unwrap(), 20);
        assert_eq!(third.get(h).unwrap(), 21);
    }

    #[test]
    fn access_past_the_end_of_memory_is_rejected() {
        let mut b = SchemaBuilder::new();
        let lo = b.field::<u32>("lo");
        let hi = b.field::<u32>("hi");

        let mut mem = VecMemory::new(Pages::new(1)).unwrap();
        let capacity = mem.size() as u32;

        // The struct straddles the end: first field fits, second does not.
        let base = GuestPtr::new(capacity - 4);
        let mut view = StructViewMut::new(&mut mem, base);
        view.set(lo, 1).unwrap();
        assert!(view.set(hi, 2).is_err());
        assert!(view.get(hi).is_err());
    }
}
