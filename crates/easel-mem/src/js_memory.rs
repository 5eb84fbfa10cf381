use easel_types::Pages;
use js_sys::WebAssembly;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::{MemError, MemResult};
use crate::linear::{check_range, LinearMemory};

/// [`LinearMemory`] bound to a live JS `WebAssembly.Memory`.
///
/// Reads and writes copy through a fresh `Uint8Array` view of the current
/// buffer, so the binding stays valid across growth (growth detaches the old
/// `ArrayBuffer`) and never holds Rust references into memory that JS or the
/// guest can mutate.
#[derive(Debug, Clone)]
pub struct JsMemory {
    mem: WebAssembly::Memory,
}

impl JsMemory {
    pub fn new(mem: WebAssembly::Memory) -> Self {
        Self { mem }
    }

    /// `Memory.prototype.grow` invoked through `Function::call1` so that the
    /// `RangeError` thrown at the memory's declared maximum is caught instead
    /// of trapping the whole module.
    fn grow_raw(&self, delta_pages: u32) -> Result<u32, JsValue> {
        let grow = js_sys::Reflect::get(self.mem.as_ref(), &JsValue::from_str("grow"))?;
        let grow = grow.dyn_into::<js_sys::Function>()?;
        let prev = grow.call1(self.mem.as_ref(), &JsValue::from_f64(f64::from(delta_pages)))?;
        prev.as_f64()
            .map(|pages| pages as u32)
            .ok_or_else(|| JsValue::from_str("Memory.grow returned a non-number"))
    }
}

impl LinearMemory for JsMemory {
    fn size(&self) -> u64 {
        // `byteLength` is read as an f64 because a full 65536-page memory is
        // exactly 2^32 bytes, which a u32 binding would wrap to zero.
        js_sys::Reflect::get(&self.mem.buffer(), &JsValue::from_str("byteLength"))
            .ok()
            .and_then(|len| len.as_f64())
            .map_or(0, |len| len as u64)
    }

    fn read_into(&self, addr: u64, dst: &mut [u8]) -> MemResult<()> {
        check_range(self.size(), addr, dst.len())?;
        if dst.is_empty() {
            return Ok(());
        }
        let start = u32::try_from(addr).map_err(|_| MemError::OffsetOverflow)?;
        let len = u32::try_from(dst.len()).map_err(|_| MemError::OffsetOverflow)?;
        let view = js_sys::Uint8Array::new_with_byte_offset_and_length(
            &self.mem.buffer(),
            start,
            len,
        );
        view.copy_to(dst);
        Ok(())
    }

    fn write_from(&mut self, addr: u64, src: &[u8]) -> MemResult<()> {
        check_range(self.size(), addr, src.len())?;
        if src.is_empty() {
            return Ok(());
        }
        let start = u32::try_from(addr).map_err(|_| MemError::OffsetOverflow)?;
        let len = u32::try_from(src.len()).map_err(|_| MemError::OffsetOverflow)?;
        let view = js_sys::Uint8Array::new_with_byte_offset_and_length(
            &self.mem.buffer(),
            start,
            len,
        );
        view.copy_from(src);
        Ok(())
    }

    fn grow(&mut self, pages: Pages) -> MemResult<()> {
        if pages.get() == 0 {
            return Ok(());
        }
        self.grow_raw(pages.get())
            .map(|_prev_pages| ())
            .map_err(|_err| MemError::GrowthFailed {
                requested: pages.get(),
            })
    }
}
