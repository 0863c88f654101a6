//! Dashboard flow without a terminal: mounting, routing and late results

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;

use seatdesk::app::{App, CollectionRequest};
use seatdesk::core::{CollectionSnapshot, Context, Profile};
use seatdesk::domain::{CollectionNames, Document, PanelKind, SummaryMetrics, SummaryState};
use seatdesk::infrastructure::{RuntimeBridge, RuntimeCommand, RuntimeEvent, SummaryAggregator};
use seatdesk::store::MemoryStore;
use seatdesk::ui::layout;

fn app() -> App {
    App::new(Context::new(
        CollectionNames::default(),
        Profile::default(),
        "memory",
    ))
}

fn press(app: &mut App, ch: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
}

/// Drive a bridge until `done` says so or the deadline passes
fn pump(app: &mut App, bridge: &RuntimeBridge, done: impl Fn(&App) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Some(mount) = app.take_summary_request() {
            bridge.send(RuntimeCommand::FetchSummary { mount }).unwrap();
        }
        for CollectionRequest { mount, collection } in app.take_collection_requests() {
            bridge
                .send(RuntimeCommand::LoadCollection { mount, collection })
                .unwrap();
        }
        for event in bridge.poll_events() {
            match event {
                RuntimeEvent::SummaryReady { mount, state } => {
                    app.apply_summary(mount, state);
                }
                RuntimeEvent::CollectionReady {
                    mount,
                    collection,
                    documents,
                } => app.apply_collection(mount, collection, documents),
                RuntimeEvent::CollectionFailed {
                    mount,
                    collection,
                    message,
                } => app.apply_collection_failed(mount, collection, message),
                RuntimeEvent::Error { message } => panic!("runtime error: {message}"),
            }
        }
        if done(app) {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("timed out waiting for runtime events");
}

#[test]
fn test_zones_then_profile_then_seats() {
    let mut app = app();
    app.mount_dashboard();

    app.select_panel(1);
    assert_eq!(app.active_panel(), PanelKind::Zones);
    app.open_profile();
    assert_eq!(app.active_panel(), PanelKind::Profile);
    app.select_panel(2);
    assert_eq!(app.active_panel(), PanelKind::Seats);
    assert!(!app.router.is_profile());
}

#[test]
fn test_clicking_tabs_and_profile_affordance() {
    let size = ratatui::layout::Rect::new(0, 0, 120, 40);
    let mut app = app();
    app.mount_dashboard();

    let areas = layout::areas(size, false);
    let hits = layout::tab_hit_areas(areas.tabs);
    let (_, zones) = hits[1];
    let idx = layout::tab_at(&areas, zones.x, zones.y).unwrap();
    app.select_panel(idx as i64);
    assert_eq!(app.active_panel(), PanelKind::Zones);

    assert!(layout::rect_contains(areas.profile, areas.profile.x + 1, areas.profile.y + 1));
    app.open_profile();
    let areas = layout::areas(size, app.router.is_profile());
    // No tab strip to click while the profile is shown.
    assert_eq!(layout::tab_at(&areas, zones.x, zones.y), None);
}

#[test]
fn test_any_tab_index_resolves() {
    let mut app = app();
    app.mount_dashboard();
    for index in [-3, -1, 4, 17, i64::MAX] {
        app.select_panel(index);
        assert_eq!(app.active_panel(), PanelKind::Floors);
    }
    for (index, kind) in PanelKind::TABS.iter().enumerate() {
        app.select_panel(index as i64);
        assert_eq!(app.active_panel(), *kind);
    }
}

#[test]
fn test_late_summary_after_teardown_is_dropped() {
    let mut app = app();
    let mount = app.mount_dashboard();
    app.unmount_dashboard();

    let ready = SummaryState::Ready(SummaryMetrics {
        total_floors: 3,
        ..SummaryMetrics::default()
    });
    assert!(!app.apply_summary(mount, ready));
    assert!(app.summary.is_pending());
}

#[test]
fn test_only_latest_mount_updates() {
    let mut app = app();
    let first = app.mount_dashboard();
    press(&mut app, 'r');
    let second = app.live_mount().unwrap();
    assert_ne!(first, second);

    let fresh = SummaryState::Ready(SummaryMetrics {
        total_zones: 5,
        ..SummaryMetrics::default()
    });
    assert!(app.apply_summary(second, fresh.clone()));
    assert!(!app.apply_summary(first, SummaryState::Failed("late".to_string())));
    assert_eq!(app.summary, fresh);
}

fn named(ids: &[&str]) -> Vec<Document> {
    ids.iter()
        .map(|id| Document::from_value(*id, json!({ "name": id })))
        .collect()
}

#[test]
fn test_reload_keeps_fresh_collection_over_late_one() {
    let mut app = app();
    let first = app.mount_dashboard();
    let old = app.take_collection_requests();
    assert_eq!(old.len(), 1);
    assert_eq!(old[0].mount, first);

    app.reload();
    let second = app.live_mount().unwrap();
    let fresh = app.take_collection_requests();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].mount, second);
    assert_eq!(fresh[0].collection, old[0].collection);

    // The retired mount's reply lands first and must not fill the snapshot.
    app.apply_collection(first, old[0].collection.clone(), named(&["stale-1"]));
    assert_eq!(
        app.ctx.snapshot("floors"),
        Some(&CollectionSnapshot::Loading)
    );
    app.apply_collection(second, fresh[0].collection.clone(), named(&["f1", "f2"]));

    let ids: Vec<&str> = app
        .ctx
        .documents("floors")
        .iter()
        .map(|doc| doc.id.as_str())
        .collect();
    assert_eq!(ids, vec!["f1", "f2"]);
}

#[test]
fn test_late_collection_failure_after_reload_is_ignored() {
    let mut app = app();
    let first = app.mount_dashboard();
    app.take_collection_requests();
    app.reload();
    app.take_collection_requests();
    app.status = None;

    app.apply_collection_failed(first, "floors".to_string(), "timeout".to_string());
    assert_eq!(
        app.ctx.snapshot("floors"),
        Some(&CollectionSnapshot::Loading)
    );
    assert!(app.status_text().is_none());
}

#[tokio::test]
async fn test_failed_fetch_leaves_zero_cards() {
    let store = Arc::new(MemoryStore::demo(&CollectionNames::default()));
    store.set_failing(true);
    let aggregator = SummaryAggregator::new(store, CollectionNames::default());

    let mut app = app();
    let mount = app.mount_dashboard();
    assert!(app.summary.is_pending());

    let state = aggregator.run().await;
    assert!(app.apply_summary(mount, state));
    assert!(!app.summary.is_pending());
    assert_eq!(app.summary.metrics(), SummaryMetrics::default());
}

#[test]
fn test_bridge_round_trip() {
    let names = CollectionNames::default();
    let store = Arc::new(MemoryStore::demo(&names));
    let bridge = RuntimeBridge::new(store.clone(), names).unwrap();

    let mut app = app();
    app.mount_dashboard();
    pump(&mut app, &bridge, |app| {
        !app.summary.is_pending()
            && matches!(app.ctx.snapshot("floors"), Some(CollectionSnapshot::Loaded(_)))
    });

    let metrics = app.summary.metrics();
    assert_eq!(metrics.total_floors, 3);
    assert_eq!(metrics.total_zones, 5);
    assert_eq!(metrics.total_seats, 10);
    assert_eq!(metrics.available_seats, 6);
    assert_eq!(metrics.occupancy_rate.to_string(), "40%");
    assert_eq!(app.ctx.documents("floors").len(), 3);
}

#[test]
fn test_panel_loads_collection_on_first_visit() {
    let names = CollectionNames::default();
    let store = Arc::new(MemoryStore::new().with_collection(
        "admins",
        vec![Document::from_value(
            "admin-1",
            json!({ "name": "Ops", "email": "ops@example.com" }),
        )],
    ));
    let bridge = RuntimeBridge::new(store.clone(), names).unwrap();

    let mut app = app();
    app.mount_dashboard();
    press(&mut app, '4');
    assert_eq!(app.active_panel(), PanelKind::Admins);
    pump(&mut app, &bridge, |app| {
        !app.summary.is_pending()
            && matches!(app.ctx.snapshot("floors"), Some(CollectionSnapshot::Loaded(_)))
            && matches!(app.ctx.snapshot("admins"), Some(CollectionSnapshot::Loaded(_)))
    });
    assert_eq!(app.ctx.documents("admins").len(), 1);

    // Revisiting does not read again.
    let reads = store.reads();
    press(&mut app, '1');
    press(&mut app, '4');
    assert!(app.take_collection_requests().is_empty());
    assert_eq!(store.reads(), reads);
}

#[test]
fn test_failed_panel_load_is_reported() {
    let names = CollectionNames::default();
    let store = Arc::new(MemoryStore::new());
    store.set_failing(true);
    let bridge = RuntimeBridge::new(store, names).unwrap();

    let mut app = app();
    app.mount_dashboard();
    pump(&mut app, &bridge, |app| {
        !app.summary.is_pending()
            && matches!(app.ctx.snapshot("floors"), Some(CollectionSnapshot::Failed(_)))
    });
    assert!(matches!(app.summary, SummaryState::Failed(_)));
    assert!(app.status_text().is_some());
}
