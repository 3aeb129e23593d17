use std::time::{Duration, Instant};

use super::*;
use crate::models::HotspotKind;

const METRICS_ANCHOR: &str = "[data-walkthrough=\"metrics-area\"]";

fn hotspot(id: &str, anchor: &str) -> Hotspot {
    Hotspot {
        id: id.to_string(),
        kind: HotspotKind::Data,
        anchor: anchor.to_string(),
        tooltip: "Key metrics".to_string(),
        offset_x: 0.0,
        offset_y: 0.0,
        side: None,
        modal: None,
    }
}

#[test]
fn test_default_side_is_right_of_anchor() {
    let layout = StaticLayout::new(1280.0).with_anchor("#a", Rect::new(100.0, 200.0, 300.0, 40.0));
    let resolved = resolve_hotspot(&hotspot("a", "#a"), &layout).unwrap();

    assert_eq!(resolved.side, Side::Right);
    assert_eq!(resolved.tooltip_side, Side::Right);
    assert_eq!(resolved.left, 400.0 + MARGIN);
    assert_eq!(resolved.top, 200.0 + 20.0 - HOTSPOT_SIZE / 2.0);
}

#[test]
fn test_flips_left_near_right_edge() {
    // right edge 1200, marker would end at 1236 > 1280 - 60
    let layout = StaticLayout::new(1280.0).with_anchor("#a", Rect::new(900.0, 0.0, 300.0, 28.0));
    let resolved = resolve_hotspot(&hotspot("a", "#a"), &layout).unwrap();

    assert_eq!(resolved.side, Side::Left);
    assert_eq!(resolved.tooltip_side, Side::Left);
    assert_eq!(resolved.left, 900.0 - HOTSPOT_SIZE - MARGIN);
}

#[test]
fn test_explicit_side_wins() {
    let layout = StaticLayout::new(1280.0).with_anchor("#a", Rect::new(100.0, 0.0, 100.0, 28.0));
    let mut pinned = hotspot("a", "#a");
    pinned.side = Some(Side::Left);

    let resolved = resolve_hotspot(&pinned, &layout).unwrap();
    assert_eq!(resolved.side, Side::Left);
    assert_eq!(resolved.left, 100.0 - HOTSPOT_SIZE - MARGIN);
}

#[test]
fn test_left_is_clamped_to_viewport() {
    let layout = StaticLayout::new(800.0).with_anchor("#edge", Rect::new(0.0, 0.0, 20.0, 20.0));
    let mut pinned = hotspot("edge", "#edge");
    pinned.side = Some(Side::Left);
    assert_eq!(resolve_hotspot(&pinned, &layout).unwrap().left, MARGIN);

    pinned.side = Some(Side::Right);
    pinned.offset_x = 5000.0;
    assert_eq!(
        resolve_hotspot(&pinned, &layout).unwrap().left,
        800.0 - HOTSPOT_SIZE - MARGIN
    );
}

#[test]
fn test_offsets_are_applied() {
    let layout = StaticLayout::new(1280.0).with_anchor("#a", Rect::new(100.0, 100.0, 100.0, 100.0));
    let mut shifted = hotspot("a", "#a");
    shifted.offset_x = 10.0;
    shifted.offset_y = -20.0;

    let resolved = resolve_hotspot(&shifted, &layout).unwrap();
    assert_eq!(resolved.left, 200.0 + MARGIN + 10.0);
    assert_eq!(resolved.top, 150.0 - HOTSPOT_SIZE / 2.0 - 20.0);
}

#[test]
fn test_missing_anchor_is_excluded_then_included_once_present() {
    let hotspots = vec![
        hotspot("header-nav", "#header"),
        hotspot("metrics-area", METRICS_ANCHOR),
    ];
    let mut layout =
        StaticLayout::new(1280.0).with_anchor("#header", Rect::new(0.0, 0.0, 400.0, 64.0));

    let first = resolve_all(&hotspots, &layout);
    assert_eq!(first.len(), 1);
    assert!(first.iter().all(|p| p.hotspot_id != "metrics-area"));

    layout.insert(METRICS_ANCHOR, Rect::new(40.0, 120.0, 800.0, 160.0));
    let second = resolve_all(&hotspots, &layout);
    let metrics = second
        .iter()
        .find(|p| p.hotspot_id == "metrics-area")
        .unwrap();
    assert!(metrics.left >= MARGIN && metrics.left <= 1280.0 - HOTSPOT_SIZE - MARGIN);
    assert_eq!(metrics.top, 120.0 + 80.0 - HOTSPOT_SIZE / 2.0);
}

#[test]
fn test_step_change_waits_for_settle_delay() {
    let hotspots = vec![hotspot("a", "#a")];
    let layout = StaticLayout::new(1280.0).with_anchor("#a", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut resolver = PositionResolver::new();
    let t0 = Instant::now();

    resolver.on_signal(&Signal::StepChanged { from: 1, to: 2 }, t0);
    assert!(!resolver.poll(t0 + Duration::from_millis(100), &hotspots, &layout));
    assert!(resolver.positions().is_empty());

    assert!(resolver.poll(t0 + SETTLE_DELAY, &hotspots, &layout));
    assert_eq!(resolver.positions().len(), 1);
    assert!(!resolver.is_pending());
}

#[test]
fn test_viewport_change_recomputes_immediately() {
    let hotspots = vec![hotspot("a", "#a")];
    let layout = StaticLayout::new(1280.0).with_anchor("#a", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut resolver = PositionResolver::new();
    let t0 = Instant::now();

    resolver.on_signal(&Signal::StepChanged { from: 1, to: 2 }, t0);
    resolver.on_signal(&Signal::ViewportChanged, t0);
    assert!(resolver.poll(t0, &hotspots, &layout));
}

#[test]
fn test_detached_resolver_ignores_signals_until_new_session() {
    let hotspots = vec![hotspot("a", "#a")];
    let layout = StaticLayout::new(1280.0).with_anchor("#a", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut resolver = PositionResolver::new();
    let t0 = Instant::now();

    resolver.recompute(&hotspots, &layout);
    resolver.on_signal(&Signal::Exited, t0);
    assert!(!resolver.is_attached());
    assert!(resolver.positions().is_empty());

    resolver.on_signal(&Signal::Scrolled, t0);
    assert!(!resolver.poll(t0 + SETTLE_DELAY, &hotspots, &layout));

    resolver.on_signal(&Signal::Started, t0);
    assert!(resolver.is_attached());
    assert!(resolver.poll(t0 + SETTLE_DELAY, &hotspots, &layout));
}

#[test]
fn test_static_layout_from_json() {
    let json = r##"{"viewport_width": 1024, "anchors": {"#chart": {"left": 1, "top": 2, "width": 3, "height": 4}}}"##;
    let layout = StaticLayout::from_json_str(json).unwrap();
    assert_eq!(layout.viewport_width(), 1024.0);
    assert_eq!(layout.anchor_rect("#chart").unwrap().right(), 4.0);

    assert!(StaticLayout::from_json_str(r#"{"viewport_width": 0}"#).is_err());
}

#[test]
fn test_viewport_width_must_be_positive() {
    let mut layout = StaticLayout::new(1280.0);
    for width in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        assert!(layout.set_viewport_width(width).is_err());
    }
    assert_eq!(layout.viewport_width(), 1280.0);

    layout.set_viewport_width(800.0).unwrap();
    assert_eq!(layout.viewport_width(), 800.0);
}
