//! Byte-level access to another address space.
use std::collections::BTreeMap;

use crate::api::ProbeError;

/// Random-access reads of a foreign address space.
pub trait MemoryReader {
    /// Fill `buf` with the bytes at `address`. Partial reads are errors.
    fn read_at(&self, address: u64, buf: &mut [u8]) -> Result<(), ProbeError>;

    fn read_u64(&self, address: u64) -> Result<u64, ProbeError> {
        let mut buf = [0u8; 8];
        self.read_at(address, &mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }
}

impl<T: MemoryReader + ?Sized> MemoryReader for &T {
    fn read_at(&self, address: u64, buf: &mut [u8]) -> Result<(), ProbeError> {
        (**self).read_at(address, buf)
    }
}

impl<T: MemoryReader + ?Sized> MemoryReader for Box<T> {
    fn read_at(&self, address: u64, buf: &mut [u8]) -> Result<(), ProbeError> {
        (**self).read_at(address, buf)
    }
}

/// Synthetic address space made of disjoint byte regions.
///
/// Reads must fall entirely inside one region; anything else fails like an
/// unmapped page would.
#[derive(Clone, Debug, Default)]
pub struct SparseMemory {
    regions: BTreeMap<u64, Vec<u8>>,
}

impl SparseMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `bytes` at `address`, replacing any region starting there.
    pub fn write_bytes(&mut self, address: u64, bytes: &[u8]) -> &mut Self {
        self.regions.insert(address, bytes.to_vec());
        self
    }

    pub fn write_u8(&mut self, address: u64, value: u8) -> &mut Self {
        self.write_bytes(address, &[value])
    }

    pub fn write_u16(&mut self, address: u64, value: u16) -> &mut Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u32(&mut self, address: u64, value: u32) -> &mut Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u64(&mut self, address: u64, value: u64) -> &mut Self {
        self.write_bytes(address, &value.to_le_bytes())
    }
}

impl MemoryReader for SparseMemory {
    fn read_at(&self, address: u64, buf: &mut [u8]) -> Result<(), ProbeError> {
        let len = buf.len();
        let failed = || ProbeError::ReadFailed { address, len };

        let (&start, bytes) = self.regions.range(..=address).next_back().ok_or_else(failed)?;
        let from = (address - start) as usize;
        let to = from.checked_add(len).ok_or_else(failed)?;
        let source = bytes.get(from..to).ok_or_else(failed)?;
        buf.copy_from_slice(source);
        Ok(())
    }
}
