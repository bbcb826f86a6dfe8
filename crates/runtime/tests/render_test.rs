//! Overlay renderer against an in-memory surface.
use std::sync::Arc;

use overlay_core::{
    Area, Difficulty, GameSnapshot, MapData, MapPosition, MarkerStyle, OverlaySettings, Point,
    Rect, Rgba, TilePosition, WindowHandle,
};
use runtime::{FixedDisplay, MemorySurface, OverlayFrame, OverlayRenderer, RenderOutcome};

const SCREEN: Rect = Rect::new(0, 0, 1000, 800);
const GAME_WINDOW: WindowHandle = WindowHandle(0x99);

fn frame(map: Option<MapData>, hidden: bool) -> OverlayFrame {
    OverlayFrame {
        snapshot: GameSnapshot {
            player_name: "Druid".into(),
            player_position: TilePosition::new(1005, 2005),
            map_seed: 9,
            area: Area::BloodMoor.into(),
            act: 0,
            difficulty: Difficulty::Normal,
            map_shown: true,
            window: GAME_WINDOW,
        },
        map: map.map(Arc::new),
        hidden,
    }
}

/// 21×21 grid with walls on the border only.
fn walled_map() -> MapData {
    let rows = (0..21)
        .map(|y| {
            (0..21)
                .map(|x| i32::from(x == 0 || y == 0 || x == 20 || y == 20))
                .collect()
        })
        .collect();
    MapData {
        area_origin: Point::new(1000, 2000),
        map_rows: rows,
    }
}

fn settings() -> OverlaySettings {
    OverlaySettings {
        map_position: MapPosition::TopLeft,
        auto_scroll: false,
        rotate_radians: 0.0,
        scale: 1.0,
        marker: MarkerStyle {
            color: Rgba([255, 0, 0, 255]),
            size: 3,
        },
        ..OverlaySettings::default()
    }
}

fn renderer(settings: OverlaySettings, surface: &MemorySurface) -> OverlayRenderer {
    OverlayRenderer::new(
        Arc::new(settings),
        Arc::new(FixedDisplay::new(SCREEN)),
        Box::new(surface.clone()),
    )
}

#[test]
fn hidden_frames_hide_the_surface() {
    let surface = MemorySurface::new();
    let mut renderer = renderer(settings(), &surface);

    let outcome = renderer.render(&frame(Some(walled_map()), true)).unwrap();

    assert_eq!(outcome, RenderOutcome::Hidden);
    assert!(!surface.state().visible);
    assert_eq!(surface.state().draw_count, 0);
}

#[test]
fn missing_or_empty_map_skips_drawing() {
    let surface = MemorySurface::new();
    let mut renderer = renderer(settings(), &surface);

    assert_eq!(
        renderer.render(&frame(None, false)).unwrap(),
        RenderOutcome::NoMapData
    );
    assert_eq!(
        renderer.render(&frame(Some(MapData::default()), false)).unwrap(),
        RenderOutcome::NoMapData
    );
    assert_eq!(surface.state().draw_count, 0);
}

#[test]
fn map_without_walls_keeps_surface_hidden() {
    let surface = MemorySurface::new();
    let mut renderer = renderer(settings(), &surface);
    let open_floor = MapData {
        area_origin: Point::new(1000, 2000),
        map_rows: vec![vec![0; 21]; 21],
    };

    let outcome = renderer.render(&frame(Some(open_floor), false)).unwrap();

    assert_eq!(outcome, RenderOutcome::NoMapData);
    assert!(!surface.state().visible);
    assert_eq!(surface.state().draw_count, 0);
}

#[test]
fn draws_at_fixed_anchor_with_marker_on_player() {
    let surface = MemorySurface::new();
    let mut renderer = renderer(settings(), &surface);

    let outcome = renderer.render(&frame(Some(walled_map()), false)).unwrap();

    let RenderOutcome::Drawn { anchor, size } = outcome else {
        panic!("expected a draw, got {outcome:?}");
    };
    assert_eq!(anchor, Point::ORIGIN);

    let state = surface.state();
    assert!(state.visible);
    assert_eq!(state.geometry, Some(SCREEN));
    let (image, drawn_at) = state.last_draw.expect("frame drawn");
    assert_eq!(drawn_at, anchor);
    assert_eq!(image.dimensions(), size);
    // Player sits at (5, 5) inside the grid.
    assert_eq!(*image.get_pixel(5, 5), Rgba([255, 0, 0, 255]));
}

#[test]
fn top_right_anchor_hugs_the_edge() {
    let surface = MemorySurface::new();
    let settings = OverlaySettings {
        map_position: MapPosition::TopRight,
        ..settings()
    };
    let mut renderer = renderer(settings, &surface);

    let RenderOutcome::Drawn { anchor, size } =
        renderer.render(&frame(Some(walled_map()), false)).unwrap()
    else {
        panic!("expected a draw");
    };
    assert_eq!(anchor, Point::new(1000 - size.0 as i32, 0));
}

#[test]
fn autoscroll_centres_the_player() {
    let surface = MemorySurface::new();
    let settings = OverlaySettings {
        auto_scroll: true,
        ..settings()
    };
    let mut renderer = renderer(settings, &surface);

    let RenderOutcome::Drawn { anchor, .. } =
        renderer.render(&frame(Some(walled_map()), false)).unwrap()
    else {
        panic!("expected a draw");
    };
    assert_eq!(anchor + Point::new(5, 5), SCREEN.half_extents());
}

#[test]
fn rotated_and_scaled_map_keeps_marker_near_player() {
    let surface = MemorySurface::new();
    let settings = OverlaySettings {
        rotate_radians: std::f64::consts::FRAC_PI_4,
        scale: 2.0,
        ..settings()
    };
    let mut renderer = renderer(settings, &surface);

    let solid = MapData {
        map_rows: vec![vec![1; 21]; 21],
        ..walled_map()
    };
    renderer.render(&frame(Some(solid), false)).unwrap();

    let (image, _) = surface.state().last_draw.expect("frame drawn");
    let red = image.pixels().filter(|p| **p == Rgba([255, 0, 0, 255])).count();
    assert!(red > 0, "marker should survive the pipeline");
}

#[test]
fn surface_preparation_applies_opacity_and_topmost() {
    let surface = MemorySurface::new().with_window(WindowHandle(0x5));
    let settings = OverlaySettings {
        opacity: 0.4,
        always_on_top: true,
        ..settings()
    };
    let mut renderer = renderer(settings, &surface);

    renderer.prepare_surface();

    assert_eq!(surface.state().opacity, Some(0.4));
}
