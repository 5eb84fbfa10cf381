use easel_types::Pages;

use crate::error::{MemError, MemResult};

/// A single growable guest linear memory.
///
/// All externally-visible addresses are `u64` so range arithmetic cannot wrap
/// even when the buffer approaches the full 4 GiB wasm32 address space.
/// Implementations bounds-check every access against the *current* capacity
/// and return [`MemError::OutOfBounds`] instead of panicking.
///
/// Multi-byte accessors are explicitly little-endian: the buffer is shared
/// with a wasm32 guest, and wasm linear memory is little-endian by
/// specification, regardless of the host.
pub trait LinearMemory {
    /// Current capacity in bytes. Only ever increases.
    fn size(&self) -> u64;

    /// Reads `dst.len()` bytes starting at `addr` into `dst`.
    fn read_into(&self, addr: u64, dst: &mut [u8]) -> MemResult<()>;

    /// Writes all of `src` starting at `addr`.
    fn write_from(&mut self, addr: u64, src: &[u8]) -> MemResult<()>;

    /// Appends `pages` whole wasm pages of zeroed memory. Existing contents
    /// and addresses are untouched; on failure the buffer is unchanged.
    fn grow(&mut self, pages: Pages) -> MemResult<()>;

    fn read_u8_le(&self, addr: u64) -> MemResult<u8> {
        let mut buf = [0u8; 1];
        self.read_into(addr, &mut buf)?;
        Ok(buf[0])
    }

    fn read_u16_le(&self, addr: u64) -> MemResult<u16> {
        let mut buf = [0u8; 2];
        self.read_into(addr, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_u32_le(&self, addr: u64) -> MemResult<u32> {
        let mut buf = [0u8; 4];
        self.read_into(addr, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_u64_le(&self, addr: u64) -> MemResult<u64> {
        let mut buf = [0u8; 8];
        self.read_into(addr, &mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn read_i8_le(&self, addr: u64) -> MemResult<i8> {
        let mut buf = [0u8; 1];
        self.read_into(addr, &mut buf)?;
        Ok(buf[0] as i8)
    }

    fn read_i16_le(&self, addr: u64) -> MemResult<i16> {
        let mut buf = [0u8; 2];
        self.read_into(addr, &mut buf)?;
        Ok(i16::from_le_bytes(buf))
    }

    fn read_i32_le(&self, addr: u64) -> MemResult<i32> {
        let mut buf = [0u8; 4];
        self.read_into(addr, &mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    fn read_i64_le(&self, addr: u64) -> MemResult<i64> {
        let mut buf = [0u8; 8];
        self.read_into(addr, &mut buf)?;
        Ok(i64::from_le_bytes(buf))
    }

    fn read_f32_le(&self, addr: u64) -> MemResult<f32> {
        let mut buf = [0u8; 4];
        self.read_into(addr, &mut buf)?;
        Ok(f32::from_le_bytes(buf))
    }

    fn read_f64_le(&self, addr: u64) -> MemResult<f64> {
        let mut buf = [0u8; 8];
        self.read_into(addr, &mut buf)?;
        Ok(f64::from_le_bytes(buf))
    }

    fn write_u8_le(&mut self, addr: u64, value: u8) -> MemResult<()> {
        self.write_from(addr, &[value])
    }

    fn write_u16_le(&mut self, addr: u64, value: u16) -> MemResult<()> {
        self.write_from(addr, &value.to_le_bytes())
    }

    fn write_u32_le(&mut self, addr: u64, value: u32) -> MemResult<()> {
        self.write_from(addr, &value.to_le_bytes())
    }

    fn write_u64_le(&mut self, addr: u64, value: u64) -> MemResult<()> {
        self.write_from(addr, &value.to_le_bytes())
    }

    fn write_i8_le(&mut self, addr: u64, value: i8) -> MemResult<()> {
        self.write_from(addr, &[value as u8])
    }

    fn write_i16_le(&mut self, addr: u64, value: i16) -> MemResult<()> {
        self.write_from(addr, &value.to_le_bytes())
    }

    fn write_i32_le(&mut self, addr: u64, value: i32) -> MemResult<()> {
        self.write_from(addr, &value.to_le_bytes())
    }

    fn write_i64_le(&mut self, addr: u64, value: i64) -> MemResult<()> {
        self.write_from(addr, &value.to_le_bytes())
    }

    fn write_f32_le(&mut self, addr: u64, value: f32) -> MemResult<()> {
        self.write_from(addr, &value.to_le_bytes())
    }

    fn write_f64_le(&mut self, addr: u64, value: f64) -> MemResult<()> {
        self.write_from(addr, &value.to_le_bytes())
    }
}

pub(crate) fn check_range(capacity: u64, addr: u64, len: usize) -> MemResult<()> {
    let end = addr
        .checked_add(len as u64)
        .ok_or(MemError::OffsetOverflow)?;
    if end > capacity {
        return Err(MemError::OutOfBounds {
            addr,
            len,
            capacity,
        });
    }
    Ok(())
}
