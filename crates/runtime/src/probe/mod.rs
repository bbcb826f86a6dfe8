//! Reads the game's state out of its process memory.
//!
//! [`StateProbe`] attaches to the game on every capture, walks the
//! [`OffsetSchema`] pointer chains and decodes the raw fields into a
//! [`GameSnapshot`]. Any failure along the way yields no snapshot; the caller
//! simply tries again on the next tick.
pub mod memory;
pub mod process;
pub mod schema;

use std::collections::HashMap;

use overlay_core::{AreaId, Difficulty, GameSnapshot, TilePosition, WindowHandle};
use tracing::{debug, trace};

use crate::api::ProbeError;
use memory::MemoryReader;
use schema::{Field, FieldSpec, OffsetSchema, ProbeOffsets};

pub use memory::SparseMemory;
pub use process::{
    GameProcess, InMemoryAttacher, InMemoryProcess, ProcessAttacher, default_attacher,
};

/// Default executable name of the game.
pub const DEFAULT_PROCESS_NAME: &str = "D2R";

/// Which process to probe and where its fields live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeConfig {
    pub process_name: String,
    pub offsets: ProbeOffsets,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            process_name: DEFAULT_PROCESS_NAME.to_string(),
            offsets: ProbeOffsets::default(),
        }
    }
}

/// Anything that can produce the current game snapshot.
pub trait SnapshotSource: Send {
    /// `None` when the game is not running, not in a game, or unreadable.
    fn capture(&mut self) -> Option<GameSnapshot>;
}

pub struct StateProbe<A> {
    attacher: A,
    process_name: String,
    schema: OffsetSchema,
}

impl<A: ProcessAttacher> StateProbe<A> {
    pub fn new(attacher: A, config: ProbeConfig) -> Self {
        Self {
            attacher,
            process_name: config.process_name,
            schema: OffsetSchema::new(config.offsets),
        }
    }

    pub fn with_schema(mut self, schema: OffsetSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Attach, read and decode one snapshot. The process handle is released
    /// before returning.
    pub fn try_capture(&self) -> Result<GameSnapshot, ProbeError> {
        let process = self.attacher.attach(&self.process_name)?;
        trace!(pid = process.pid(), "capturing snapshot");
        decode_snapshot(
            &self.schema,
            &*process,
            process.module_base(),
            process.main_window(),
        )
    }
}

impl<A: ProcessAttacher> SnapshotSource for StateProbe<A> {
    fn capture(&mut self) -> Option<GameSnapshot> {
        match self.try_capture() {
            Ok(snapshot) => Some(snapshot),
            Err(error) => {
                debug!(%error, "no snapshot this tick");
                None
            }
        }
    }
}

/// Walks offset chains, memoizing intermediate pointers so shared prefixes
/// are read once per capture.
struct ChainResolver<'a, R: ?Sized> {
    reader: &'a R,
    base: u64,
    hops: HashMap<Vec<u64>, u64>,
}

impl<'a, R: MemoryReader + ?Sized> ChainResolver<'a, R> {
    fn new(reader: &'a R, base: u64) -> Self {
        Self {
            reader,
            base,
            hops: HashMap::new(),
        }
    }

    /// Address of the field at the end of `path`.
    fn resolve(&mut self, path: &[u64]) -> Result<u64, ProbeError> {
        let Some((&last, hops)) = path.split_last() else {
            return Ok(self.base);
        };

        let mut address = self.base;
        for depth in 0..hops.len() {
            let prefix = &hops[..=depth];
            address = match self.hops.get(prefix) {
                Some(&pointer) => pointer,
                None => {
                    let slot = offset(address, hops[depth])?;
                    let pointer = self.reader.read_u64(slot)?;
                    self.hops.insert(prefix.to_vec(), pointer);
                    pointer
                }
            };
        }
        offset(address, last)
    }

    fn read(&mut self, spec: &FieldSpec) -> Result<Vec<u8>, ProbeError> {
        let address = self.resolve(&spec.path)?;
        let mut buf = vec![0u8; spec.width.len()];
        self.reader.read_at(address, &mut buf)?;
        Ok(buf)
    }
}

fn offset(base: u64, offset: u64) -> Result<u64, ProbeError> {
    base.checked_add(offset)
        .ok_or(ProbeError::AddressOverflow { base, offset })
}

/// Raw little-endian field values keyed by field.
#[derive(Debug, Default)]
struct RawFields {
    values: HashMap<Field, Vec<u8>>,
}

impl RawFields {
    fn bytes(&self, field: Field) -> Result<&[u8], ProbeError> {
        self.values
            .get(&field)
            .map(Vec::as_slice)
            .ok_or(ProbeError::MissingField(field.into()))
    }

    fn int(&self, field: Field) -> Result<u64, ProbeError> {
        Ok(le_value(self.bytes(field)?))
    }
}

fn le_value(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take(8)
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// Player names are fixed-width, NUL-padded ASCII.
fn decode_name(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Evaluate `schema` against `reader` rooted at `base` and decode the result.
pub fn decode_snapshot<R: MemoryReader + ?Sized>(
    schema: &OffsetSchema,
    reader: &R,
    base: u64,
    window: WindowHandle,
) -> Result<GameSnapshot, ProbeError> {
    let mut resolver = ChainResolver::new(reader, base);
    let mut raw = RawFields::default();

    for spec in schema.fields() {
        let bytes = resolver.read(spec)?;
        if spec.null_guard && le_value(&bytes) == 0 {
            return Err(ProbeError::NoActiveGame);
        }
        raw.values.insert(spec.field, bytes);
    }

    let difficulty_byte = raw.int(Field::Difficulty)? as u8;
    let difficulty = Difficulty::from_repr(difficulty_byte)
        .ok_or(ProbeError::UnknownDifficulty(difficulty_byte))?;

    Ok(GameSnapshot {
        player_name: decode_name(raw.bytes(Field::PlayerName)?),
        player_position: TilePosition::new(
            raw.int(Field::PositionX)? as u16,
            raw.int(Field::PositionY)? as u16,
        ),
        map_seed: raw.int(Field::MapSeed)? as u32,
        area: AreaId(raw.int(Field::AreaId)? as u32),
        act: raw.int(Field::Act)? as u32,
        difficulty,
        map_shown: raw.int(Field::MapShown)? != 0,
        window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_values() {
        assert_eq!(le_value(&[0x34, 0x12]), 0x1234);
        assert_eq!(le_value(&[0xff]), 0xff);
        assert_eq!(le_value(&[]), 0);
    }

    #[test]
    fn names_stop_at_nul() {
        let mut raw = [0u8; 16];
        raw[..5].copy_from_slice(b"Alice");
        raw[7] = b'x';
        assert_eq!(decode_name(&raw), "Alice");
        assert_eq!(decode_name(b"ExactlySixteen!!"), "ExactlySixteen!!");
    }

    #[test]
    fn shared_prefixes_are_read_once() {
        struct Counting {
            memory: SparseMemory,
            reads: std::cell::Cell<usize>,
        }
        impl MemoryReader for Counting {
            fn read_at(&self, address: u64, buf: &mut [u8]) -> Result<(), ProbeError> {
                self.reads.set(self.reads.get() + 1);
                self.memory.read_at(address, buf)
            }
        }

        let mut memory = SparseMemory::new();
        memory.write_u64(0x1010, 0x2000);
        memory.write_u32(0x2004, 7);
        memory.write_u32(0x2008, 9);
        let reader = Counting {
            memory,
            reads: std::cell::Cell::new(0),
        };

        let mut resolver = ChainResolver::new(&reader, 0x1000);
        assert_eq!(resolver.resolve(&[0x10, 0x04]).unwrap(), 0x2004);
        assert_eq!(resolver.resolve(&[0x10, 0x08]).unwrap(), 0x2008);
        assert_eq!(reader.reads.get(), 1);
    }
}
