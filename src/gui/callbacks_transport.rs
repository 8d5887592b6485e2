use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app,
    enums::{Event, Key},
    prelude::*,
    window::Window,
};

use super::app_state::{AppState, format_time};
use super::audio_player::PlaybackState;
use super::layout::Widgets;

/// Poll interval for the transport labels (~60 Hz)
const POLL_SECONDS: f64 = 0.016;

// ═══════════════════════════════════════════════════════════════════════════
//  TRANSPORT CALLBACKS
// ═══════════════════════════════════════════════════════════════════════════

pub fn setup_transport_callbacks(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    {
        let state = state.clone();

        let mut btn_play = widgets.btn_play.clone();
        btn_play.set_callback(move |b| {
            let new_state = state.borrow_mut().player.toggle();
            b.set_label(if new_state == PlaybackState::Playing { "Pause" } else { "Play" });
        });
    }
    {
        let state = state.clone();
        let mut btn_play = widgets.btn_play.clone();

        let mut btn_stop = widgets.btn_stop.clone();
        btn_stop.set_callback(move |_| {
            state.borrow_mut().player.stop();
            btn_play.set_label("Play");
        });
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SPACEBAR HANDLER
// ═══════════════════════════════════════════════════════════════════════════

// KeyUp fires once per press; KeyDown repeats while held on some platforms.
pub fn setup_spacebar_handler(win: &mut Window, widgets: &Widgets) {
    let mut btn_play = widgets.btn_play.clone();
    win.handle(move |_, event| {
        if event == Event::KeyUp && app::event_key() == Key::from_char(' ') && btn_play.active() {
            btn_play.do_callback();
            return true;
        }
        false
    });
}

// ═══════════════════════════════════════════════════════════════════════════
//  POLL LOOP
// ═══════════════════════════════════════════════════════════════════════════

pub fn start_poll_loop(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    let state = state.clone();
    let mut lbl_time = widgets.lbl_time.clone();
    let mut btn_play = widgets.btn_play.clone();

    let mut last_label = String::new();
    let mut last_playback = PlaybackState::Stopped;
    app::add_timeout3(POLL_SECONDS, move |handle| {
        let transport = match state.try_borrow() {
            Ok(st) if st.player.has_audio() => Some((
                st.player.position_seconds(),
                st.duration_seconds(),
                st.player.state(),
            )),
            _ => None,
        };

        if let Some((position, duration, playback)) = transport {
            let label = format!("{} / {}", format_time(position), format_time(duration));
            if label != last_label {
                lbl_time.set_label(&label);
                last_label = label;
            }
            // playback parks itself at the end of the file
            if playback != last_playback {
                btn_play.set_label(if playback == PlaybackState::Playing { "Pause" } else { "Play" });
                last_playback = playback;
            }
        }

        app::repeat_timeout3(POLL_SECONDS, handle);
    });
}
