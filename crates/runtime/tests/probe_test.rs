//! StateProbe against a synthetic game address space.
use overlay_core::{Area, AreaId, Difficulty, TilePosition, WindowHandle};
use runtime::probe::schema::{DEFAULT_IN_GAME_MAP_OFFSET, DEFAULT_PLAYER_UNIT_OFFSET, ProbeOffsets};
use runtime::{
    InMemoryAttacher, InMemoryProcess, ProbeConfig, ProbeError, SnapshotSource, SparseMemory,
    StateProbe,
};

const MODULE_BASE: u64 = 0x1_4000_0000;
const UNIT: u64 = 0x10_0000;
const NAME: u64 = 0x20_0000;
const ACT: u64 = 0x30_0000;
const ACT_MISC: u64 = 0x40_0000;
const PATH: u64 = 0x50_0000;
const ROOM: u64 = 0x60_0000;
const ROOM_EX: u64 = 0x70_0000;
const LEVEL: u64 = 0x80_0000;

/// Game state laid out the way the probe expects to find it.
struct GameImage {
    name: &'static str,
    difficulty: u8,
    act: u32,
    seed: u32,
    position: (u16, u16),
    level: u64,
    area: u32,
    map_shown: bool,
}

impl Default for GameImage {
    fn default() -> Self {
        Self {
            name: "Sorceress",
            difficulty: 1,
            act: 0,
            seed: 0xDEAD_BEEF,
            position: (5123, 4871),
            level: LEVEL,
            area: Area::ColdPlains as u32,
            map_shown: true,
        }
    }
}

impl GameImage {
    fn memory(&self, offsets: ProbeOffsets) -> SparseMemory {
        let mut name = [0u8; 16];
        name[..self.name.len()].copy_from_slice(self.name.as_bytes());

        let mut memory = SparseMemory::new();
        memory
            .write_u64(MODULE_BASE + offsets.player_unit, UNIT)
            .write_u64(UNIT + 0x10, NAME)
            .write_bytes(NAME, &name)
            .write_u64(UNIT + 0x20, ACT)
            .write_u32(ACT + 0x14, self.seed)
            .write_u32(ACT + 0x20, self.act)
            .write_u64(ACT + 0x70, ACT_MISC)
            .write_u8(ACT_MISC + 0x830, self.difficulty)
            .write_u64(UNIT + 0x38, PATH)
            .write_u16(PATH + 0x02, self.position.0)
            .write_u16(PATH + 0x06, self.position.1)
            .write_u64(PATH + 0x20, ROOM)
            .write_u64(ROOM + 0x18, ROOM_EX)
            .write_u64(ROOM_EX + 0x90, self.level)
            .write_u32(LEVEL + 0x1F8, self.area)
            .write_u8(MODULE_BASE + offsets.in_game_map, u8::from(self.map_shown));
        memory
    }

    fn process(&self) -> InMemoryProcess {
        InMemoryProcess {
            pid: 4242,
            module_base: MODULE_BASE,
            window: WindowHandle(0xA0),
            memory: self.memory(ProbeOffsets::default()),
        }
    }
}

fn probe_for(process: InMemoryProcess) -> StateProbe<InMemoryAttacher> {
    StateProbe::new(InMemoryAttacher::new(process), ProbeConfig::default())
}

#[test]
fn captures_every_field() {
    let probe = probe_for(GameImage::default().process());

    let snapshot = probe.try_capture().expect("snapshot");

    assert_eq!(snapshot.player_name, "Sorceress");
    assert_eq!(snapshot.difficulty, Difficulty::Nightmare);
    assert_eq!(snapshot.act, 0);
    assert_eq!(snapshot.map_seed, 0xDEAD_BEEF);
    assert_eq!(snapshot.player_position, TilePosition::new(5123, 4871));
    assert_eq!(snapshot.area, AreaId::from(Area::ColdPlains));
    assert!(snapshot.map_shown);
    assert_eq!(snapshot.window, WindowHandle(0xA0));
    assert!(snapshot.has_active_game());
}

#[test]
fn null_level_pointer_means_no_game() {
    let image = GameImage {
        level: 0,
        ..GameImage::default()
    };
    let mut probe = probe_for(image.process());

    assert!(matches!(probe.try_capture(), Err(ProbeError::NoActiveGame)));
    assert!(probe.capture().is_none());
}

#[test]
fn unknown_difficulty_is_rejected() {
    let image = GameImage {
        difficulty: 3,
        ..GameImage::default()
    };
    let probe = probe_for(image.process());

    assert!(matches!(
        probe.try_capture(),
        Err(ProbeError::UnknownDifficulty(3))
    ));
}

#[test]
fn missing_process_yields_nothing() {
    let attacher = InMemoryAttacher::default();
    let mut probe = StateProbe::new(attacher.clone(), ProbeConfig::default());

    assert!(matches!(
        probe.try_capture(),
        Err(ProbeError::ProcessNotFound(name)) if name == "D2R"
    ));
    assert!(probe.capture().is_none());

    attacher.replace(Some(GameImage::default().process()));
    assert!(probe.capture().is_some());
}

#[test]
fn broken_chain_is_a_read_failure() {
    let mut process = GameImage::default().process();
    process.memory = {
        let mut memory = GameImage::default().memory(ProbeOffsets::default());
        // Point the path hop at unmapped memory.
        memory.write_u64(UNIT + 0x38, 0xFFFF_0000);
        memory
    };
    let probe = probe_for(process);

    assert!(matches!(
        probe.try_capture(),
        Err(ProbeError::ReadFailed { .. })
    ));
}

#[test]
fn closed_automap_is_reported() {
    let image = GameImage {
        map_shown: false,
        ..GameImage::default()
    };
    let snapshot = probe_for(image.process()).try_capture().unwrap();
    assert!(!snapshot.map_shown);
}

#[test]
fn offsets_are_configurable() {
    let offsets = ProbeOffsets {
        player_unit: 0x1000,
        in_game_map: 0x2000,
    };
    assert_ne!(offsets.player_unit, DEFAULT_PLAYER_UNIT_OFFSET);
    assert_ne!(offsets.in_game_map, DEFAULT_IN_GAME_MAP_OFFSET);

    let process = InMemoryProcess {
        memory: GameImage::default().memory(offsets),
        ..GameImage::default().process()
    };
    let config = ProbeConfig {
        process_name: "Game".into(),
        offsets,
    };
    let probe = StateProbe::new(InMemoryAttacher::new(process), config);

    let snapshot = probe.try_capture().expect("snapshot with custom offsets");
    assert_eq!(snapshot.map_seed, 0xDEAD_BEEF);
}
