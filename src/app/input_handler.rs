use crate::app::detector::Detector;
use crate::app::{App, ViewMode};
use crate::catalog::Mood;
use crate::detect::StillImage;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use std::sync::Arc;

pub fn handle_key(key: KeyEvent, app: &mut App, detector: &Detector) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    dispatch(key, app, detector);
    // A view switch may have cancelled the outstanding ticket
    detector.sync(app.detection.in_flight());
}

fn dispatch(key: KeyEvent, app: &mut App, detector: &Detector) {
    let keys = app.keys.clone(); // Clone keys to avoid borrowing app

    // Quit ('q')
    if keys.matches(key, &keys.quit) {
        app.is_running = false;
        return;
    }

    // Dismiss ('Esc'): toast first, then back out of the detection view
    if keys.matches(key, &keys.dismiss) {
        if !app.dismiss_toast() && app.view_mode == ViewMode::Detect {
            app.set_view_mode(ViewMode::Manual);
        }
        return;
    }

    if keys.matches(key, &keys.toggle_view) {
        app.toggle_view();
        return;
    }

    // Detect ('d')
    if keys.matches(key, &keys.detect) {
        if let Some(ticket) = app.begin_detection() {
            if let Some(path) = app.image_path.clone() {
                detector.start(ticket, Arc::new(StillImage::new(path)));
            }
        }
        return;
    }

    // Direct mood hotkeys 1-5
    if let KeyCode::Char(c @ '1'..='5') = key.code {
        let idx = c as usize - '1' as usize;
        app.select_mood(Mood::ALL[idx]);
        return;
    }

    if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        app.move_selection(-1);
        return;
    }

    if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        app.move_selection(1);
        return;
    }

    if keys.matches(key, &keys.select) {
        app.select_highlighted();
        return;
    }

    // Play/Pause ('Space')
    if keys.matches(key, &keys.play_pause) {
        app.toggle_play();
        return;
    }

    if keys.matches(key, &keys.next_track) {
        app.next_track();
        return;
    }

    if keys.matches(key, &keys.prev_track) {
        app.prev_track();
        return;
    }

    if keys.matches(key, &keys.seek_forward) {
        app.seek_by(app.seek_step);
        return;
    }

    if keys.matches(key, &keys.seek_backward) {
        app.seek_by(-app.seek_step);
    }
}
