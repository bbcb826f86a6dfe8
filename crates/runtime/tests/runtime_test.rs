//! Runtime wiring: builder validation and an end-to-end frame.
use std::sync::Arc;
use std::time::Duration;

use overlay_core::{
    Area, AreaId, Difficulty, GameSnapshot, MapData, MapPosition, OverlaySettings, Point, Rect,
    TilePosition, WindowHandle,
};
use runtime::{
    FixedDisplay, MemorySurface, Runtime, RuntimeConfig, RuntimeError, SnapshotSource,
    StaticMapProvider,
};

/// Always reports the same snapshot.
#[derive(Clone)]
struct SteadySource(GameSnapshot);

impl SnapshotSource for SteadySource {
    fn capture(&mut self) -> Option<GameSnapshot> {
        Some(self.0.clone())
    }
}

fn in_field() -> GameSnapshot {
    GameSnapshot {
        player_name: "Amazon".into(),
        player_position: TilePosition::new(310, 410),
        map_seed: 1234,
        area: Area::DarkWood.into(),
        act: 0,
        difficulty: Difficulty::Hell,
        map_shown: true,
        window: WindowHandle(0x1),
    }
}

fn config() -> RuntimeConfig {
    RuntimeConfig {
        settings: OverlaySettings {
            update_interval_ms: 10,
            map_position: MapPosition::Middle,
            ..OverlaySettings::default()
        },
        fetch_timeout: Duration::from_secs(1),
    }
}

#[tokio::test]
async fn builder_requires_every_component() {
    let outcome = Runtime::builder().config(config()).build();
    assert!(matches!(
        outcome,
        Err(RuntimeError::MissingComponent("snapshot source"))
    ));

    let outcome = Runtime::builder()
        .snapshot_source(SteadySource(in_field()))
        .surface(MemorySurface::new())
        .build();
    assert!(matches!(
        outcome,
        Err(RuntimeError::MissingComponent("map provider"))
    ));
}

#[tokio::test]
async fn runtime_draws_published_frames() {
    let provider = StaticMapProvider::new([(
        AreaId::from(Area::DarkWood),
        MapData {
            area_origin: Point::new(300, 400),
            map_rows: vec![vec![1; 40]; 30],
        },
    )]);
    let surface = MemorySurface::new();
    let display = FixedDisplay::new(Rect::new(0, 0, 800, 600)).assume_focused(true);

    let runtime = Runtime::builder()
        .config(config())
        .snapshot_source(SteadySource(in_field()))
        .map_provider(Arc::new(provider.clone()))
        .window_system(Arc::new(display))
        .surface(surface.clone())
        .build()
        .expect("runtime builds");
    let handle = runtime.handle();

    let drawn = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if surface.state().draw_count > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(drawn.is_ok(), "renderer never drew a frame");

    let frame = handle.latest_frame().expect("frame published");
    assert!(!frame.hidden);
    assert!(frame.map.is_some());

    let state = surface.state();
    assert_eq!(state.opacity, Some(OverlaySettings::DEFAULT_OPACITY));
    let (image, anchor) = state.last_draw.expect("drawn");
    assert_eq!(
        anchor,
        Point::new(
            (800 - image.width() as i32) / 2,
            (600 - image.height() as i32) / 2
        )
    );

    // A steady snapshot must not refetch.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(provider.calls().len(), 2);

    runtime.shutdown().await.expect("clean shutdown");
    assert!(handle.is_shutting_down());
}
