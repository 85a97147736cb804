use moodsync::app::config::UserConfig;
use moodsync::app::{App, ViewMode};
use moodsync::catalog::{Catalog, Mood, Track};
use moodsync::detect::DetectedExpression;
use moodsync::player::{AudioEvent, AudioEventKind, SilentOutput};
use std::time::Duration;

/// Helper to create a test app instance
fn create_test_app() -> App {
    let config = UserConfig {
        image_path: Some("/tmp/face.png".to_string()),
        ..UserConfig::default()
    };
    App::new(Catalog::builtin(), Box::new(SilentOutput), &config)
}

/// App whose engine finished loading
fn ready_app() -> App {
    let mut app = create_test_app();
    app.engine_loaded(Ok(()));
    app
}

fn happy() -> Option<DetectedExpression> {
    Some(DetectedExpression::new([("happy", 0.9), ("neutral", 0.1)]))
}

#[test]
fn test_app_initialization() {
    let app = create_test_app();
    assert!(app.is_running);
    assert_eq!(app.view_mode, ViewMode::default());
    assert_eq!(app.mood, None);
    assert!(app.tracks().is_empty());
    assert!(app.player.state().is_none());
}

#[test]
fn test_select_mood_loads_filtered_tracks() {
    let mut app = create_test_app();

    app.select_mood(Mood::Joy);
    let titles: Vec<&str> = app.tracks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Sunshine Vibes", "Golden Hour"]);

    let state = app.player.state().unwrap();
    assert_eq!(state.index, 0);
    assert!(!state.playing);
    assert_eq!(app.mood_selected, 0);

    app.select_mood(Mood::Serenity);
    assert_eq!(app.tracks().len(), 1);
    assert_eq!(app.tracks()[0].title, "Ocean Breeze");
    assert_eq!(app.mood_selected, 4);
}

#[test]
fn test_reselecting_mood_keeps_position() {
    let mut app = create_test_app();
    app.select_mood(Mood::Joy);
    app.toggle_play();
    app.next_track();
    assert_eq!(app.player.state().unwrap().index, 1);

    app.select_mood(Mood::Joy);
    let state = app.player.state().unwrap();
    assert_eq!(state.index, 1);
    assert!(state.playing);
}

#[test]
fn test_mood_without_tracks_is_a_noop_player() {
    let catalog = Catalog::new(vec![Track::new("1", "Only", "One", "a.mp3", "a.jpg", Mood::Joy)]).unwrap();
    let mut app = App::new(catalog, Box::new(SilentOutput), &UserConfig::default());

    app.select_mood(Mood::Focus);
    assert_eq!(app.mood, Some(Mood::Focus));
    assert!(app.tracks().is_empty());

    app.toggle_play();
    app.next_track();
    app.prev_track();
    app.seek_by(10.0);
    assert!(app.player.state().is_none());
    assert!(app.toast.is_none());
}

#[test]
fn test_mood_list_navigation_wraps() {
    let mut app = create_test_app();
    app.move_selection(-1);
    assert_eq!(app.mood_selected, 4);
    app.move_selection(1);
    assert_eq!(app.mood_selected, 0);

    app.move_selection(2);
    app.select_highlighted();
    assert_eq!(app.mood, Some(Mood::Focus));
}

#[test]
fn test_detection_resolves_and_selects_mood() {
    let mut app = ready_app();
    let ticket = app.begin_detection().unwrap();
    assert_eq!(app.view_mode, ViewMode::Detect);
    assert!(app.detection.is_busy());

    app.finish_detection(ticket, Ok(happy()));
    assert_eq!(app.mood, Some(Mood::Joy));
    assert_eq!(app.detection.last_expression(), Some("happy"));
    assert!(!app.detection.is_busy());

    let toast = app.toast.as_ref().unwrap();
    assert!(!toast.is_error);
    assert!(toast.message.contains("happy"));
}

#[test]
fn test_failed_detection_keeps_mood() {
    let mut app = ready_app();
    app.select_mood(Mood::Focus);

    let ticket = app.begin_detection().unwrap();
    app.finish_detection(ticket, Err("engine crashed".to_string()));

    assert_eq!(app.mood, Some(Mood::Focus));
    assert_eq!(app.tracks()[0].title, "Deep Focus");
    let toast = app.toast.as_ref().unwrap();
    assert!(toast.is_error);
    assert!(toast.message.contains("engine crashed"));
}

#[test]
fn test_no_face_keeps_mood_and_notifies() {
    let mut app = ready_app();
    app.select_mood(Mood::Energy);

    let ticket = app.begin_detection().unwrap();
    app.finish_detection(ticket, Ok(None));

    assert_eq!(app.mood, Some(Mood::Energy));
    assert_eq!(
        app.toast.as_ref().map(|t| t.message.as_str()),
        Some("No face detected. Please try again.")
    );
}

#[test]
fn test_second_detection_is_rejected() {
    let mut app = ready_app();
    let first = app.begin_detection().unwrap();
    assert!(app.begin_detection().is_none());
    assert!(app.toast.as_ref().unwrap().is_error);

    // The first request still applies
    app.finish_detection(first, Ok(happy()));
    assert_eq!(app.mood, Some(Mood::Joy));
}

#[test]
fn test_leaving_detect_view_cancels() {
    let mut app = ready_app();
    app.select_mood(Mood::Melancholy);

    let ticket = app.begin_detection().unwrap();
    app.toggle_view();
    assert_eq!(app.view_mode, ViewMode::Manual);
    assert!(!app.detection.is_busy());
    assert_eq!(app.toast.as_ref().map(|t| t.message.as_str()), Some("Detection cancelled"));

    // Late result is dropped
    app.finish_detection(ticket, Ok(happy()));
    assert_eq!(app.mood, Some(Mood::Melancholy));
}

#[test]
fn test_detection_before_models_ready() {
    let mut app = create_test_app();
    assert!(app.begin_detection().is_none());
    assert_eq!(app.mood, None);
    assert!(app.toast.as_ref().unwrap().is_error);

    app.engine_loaded(Err("Failed to load AI models: missing weights".to_string()));
    assert!(app.begin_detection().is_none());
    assert!(app.toast.as_ref().unwrap().message.contains("missing weights"));
}

#[test]
fn test_detection_without_image() {
    let mut app = App::new(Catalog::builtin(), Box::new(SilentOutput), &UserConfig::default());
    app.engine_loaded(Ok(()));

    assert!(app.begin_detection().is_none());
    assert!(!app.detection.is_busy());
    assert!(app.toast.as_ref().unwrap().message.contains("--image"));
}

#[test]
fn test_audio_events_drive_playback() {
    let mut app = create_test_app();
    app.select_mood(Mood::Joy);
    app.toggle_play();
    let epoch = app.player.epoch();

    app.handle_audio_event(AudioEvent {
        epoch,
        kind: AudioEventKind::DurationKnown(120.0),
    });
    app.handle_audio_event(AudioEvent {
        epoch,
        kind: AudioEventKind::TimeTick(30.0),
    });
    app.seek_by(5.0);
    assert_eq!(app.player.state().unwrap().elapsed, 35.0);

    // Stale epoch is ignored
    app.handle_audio_event(AudioEvent {
        epoch: epoch - 1,
        kind: AudioEventKind::TrackEnded,
    });
    assert_eq!(app.player.state().unwrap().index, 0);

    app.handle_audio_event(AudioEvent {
        epoch,
        kind: AudioEventKind::TrackEnded,
    });
    let state = app.player.state().unwrap();
    assert_eq!(state.index, 1);
    assert!(state.playing);
    assert_eq!(state.elapsed, 0.0);
}

#[test]
fn test_start_failure_surfaces_toast() {
    let mut app = create_test_app();
    app.select_mood(Mood::Focus);
    app.toggle_play();

    let epoch = app.player.epoch();
    app.handle_audio_event(AudioEvent {
        epoch,
        kind: AudioEventKind::StartFailed("autoplay blocked".to_string()),
    });

    assert!(!app.player.is_playing());
    assert!(app.toast.as_ref().unwrap().message.contains("autoplay blocked"));
}

#[test]
fn test_toast_expires_on_tick() {
    let config = UserConfig {
        toast_ms: 0,
        ..UserConfig::default()
    };
    let mut app = App::new(Catalog::builtin(), Box::new(SilentOutput), &config);

    app.show_toast("hello");
    assert!(app.toast.is_some());
    std::thread::sleep(Duration::from_millis(5));
    app.on_tick();
    assert!(app.toast.is_none());
}

#[test]
fn test_dismiss_toast() {
    let mut app = create_test_app();
    assert!(!app.dismiss_toast());
    app.show_error("boom");
    assert!(app.toast.as_ref().unwrap().is_error);
    assert!(app.dismiss_toast());
    assert!(app.toast.is_none());
}
