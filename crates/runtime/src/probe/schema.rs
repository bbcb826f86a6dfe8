//! Declarative description of where each snapshot field lives.
//!
//! A field is reached through a chain of offsets rooted at the game module's
//! base address. Every offset except the last is followed by reading a
//! little-endian pointer at `current + offset`; the last offset addresses the
//! field itself.

/// Default offsets for the supported game build.
///
/// These move between builds; override them through [`ProbeOffsets`].
pub const DEFAULT_PLAYER_UNIT_OFFSET: u64 = 0x2027660;
pub const DEFAULT_IN_GAME_MAP_OFFSET: u64 = 0x20479A2;

const PLAYER_NAME_LEN: usize = 16;

/// Build-specific root offsets relative to the module base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeOffsets {
    pub player_unit: u64,
    pub in_game_map: u64,
}

impl Default for ProbeOffsets {
    fn default() -> Self {
        Self {
            player_unit: DEFAULT_PLAYER_UNIT_OFFSET,
            in_game_map: DEFAULT_IN_GAME_MAP_OFFSET,
        }
    }
}

/// Storage width of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    U8,
    U16,
    U32,
    Pointer,
    Bytes(usize),
}

impl Width {
    pub const fn len(self) -> usize {
        match self {
            Width::U8 => 1,
            Width::U16 => 2,
            Width::U32 => 4,
            Width::Pointer => 8,
            Width::Bytes(len) => len,
        }
    }
}

/// Snapshot fields read from process memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    PlayerName,
    Difficulty,
    Act,
    MapSeed,
    PositionX,
    PositionY,
    LevelPointer,
    AreaId,
    MapShown,
}

/// One field and the offset chain that reaches it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub path: Vec<u64>,
    pub width: Width,
    /// A zero value means no game is in progress; evaluation stops there.
    pub null_guard: bool,
}

impl FieldSpec {
    fn new(field: Field, path: &[u64], width: Width) -> Self {
        Self {
            field,
            path: path.to_vec(),
            width,
            null_guard: false,
        }
    }

    fn guarded(mut self) -> Self {
        self.null_guard = true;
        self
    }
}

/// Ordered set of field specs evaluated by the probe.
///
/// Order matters: guarded fields should precede the fields that depend on
/// the same chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OffsetSchema {
    fields: Vec<FieldSpec>,
}

impl OffsetSchema {
    pub fn new(offsets: ProbeOffsets) -> Self {
        let unit = offsets.player_unit;
        let level = [unit, 0x38, 0x20, 0x18, 0x90];
        let mut area = level.to_vec();
        area.push(0x1F8);

        Self {
            fields: vec![
                FieldSpec::new(
                    Field::PlayerName,
                    &[unit, 0x10, 0x00],
                    Width::Bytes(PLAYER_NAME_LEN),
                ),
                FieldSpec::new(Field::Difficulty, &[unit, 0x20, 0x70, 0x830], Width::U8),
                FieldSpec::new(Field::Act, &[unit, 0x20, 0x20], Width::U32),
                FieldSpec::new(Field::MapSeed, &[unit, 0x20, 0x14], Width::U32),
                FieldSpec::new(Field::PositionX, &[unit, 0x38, 0x02], Width::U16),
                FieldSpec::new(Field::PositionY, &[unit, 0x38, 0x06], Width::U16),
                FieldSpec::new(Field::LevelPointer, &level, Width::Pointer).guarded(),
                FieldSpec::new(Field::AreaId, &area, Width::U32),
                FieldSpec::new(Field::MapShown, &[offsets.in_game_map], Width::U8),
            ],
        }
    }

    pub fn from_fields(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, field: Field) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.field == field)
    }
}

impl Default for OffsetSchema {
    fn default() -> Self {
        Self::new(ProbeOffsets::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_a_chain() {
        let schema = OffsetSchema::default();
        for field in [
            Field::PlayerName,
            Field::Difficulty,
            Field::Act,
            Field::MapSeed,
            Field::PositionX,
            Field::PositionY,
            Field::LevelPointer,
            Field::AreaId,
            Field::MapShown,
        ] {
            let spec = schema.field(field).expect("field present");
            assert!(!spec.path.is_empty(), "{field} has an empty chain");
        }
    }

    #[test]
    fn area_chain_extends_level_chain() {
        let schema = OffsetSchema::default();
        let level = schema.field(Field::LevelPointer).unwrap();
        let area = schema.field(Field::AreaId).unwrap();

        assert!(level.null_guard);
        assert_eq!(&area.path[..level.path.len()], level.path.as_slice());
        assert_eq!(area.path.last(), Some(&0x1F8));
    }

    #[test]
    fn roots_follow_configured_offsets() {
        let schema = OffsetSchema::new(ProbeOffsets {
            player_unit: 0x10,
            in_game_map: 0x20,
        });
        assert_eq!(schema.field(Field::Act).unwrap().path[0], 0x10);
        assert_eq!(schema.field(Field::MapShown).unwrap().path, vec![0x20]);
    }
}
