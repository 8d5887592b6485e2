use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use fltk::{app, dialog, prelude::*};

use super::app_state::{AppState, format_time};
use super::layout::Widgets;

// ═══════════════════════════════════════════════════════════════════════════
//  FILE OPERATION CALLBACKS
// ═══════════════════════════════════════════════════════════════════════════

pub fn setup_file_callbacks(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    setup_open_callback(widgets, state);
    setup_close_callback(widgets, state);
}

/// Load `path` and refresh every widget that depends on the current file.
/// Failures are reported in a dialog and the status bar.
pub fn open_file(path: &Path, widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    let mut w = widgets.clone();
    w.status_bar.set_label("Loading audio...");
    app::awake();

    let loaded = state.borrow_mut().load_file(path);
    match loaded {
        Ok(store) => {
            let name = state.borrow().current_filename.clone();
            w.btn_close.activate();
            w.btn_play.activate();
            w.btn_stop.activate();
            w.btn_play.set_label("Play");
            w.scrollbar.activate();
            w.lbl_time.set_label(&format!(
                "{} / {}",
                format_time(0.0),
                format_time(store.duration_seconds())
            ));
            w.status_bar.set_label(&format!(
                "{} | {:.2}s | {} Hz | {} ch | {} samples",
                name,
                store.duration_seconds(),
                store.sample_rate,
                store.channels,
                store.sample_count()
            ));
            let _ = w.graph_display.take_focus();
            w.graph_display.redraw();
        }
        Err(e) => {
            log::error!("{:#}", e);
            dialog::alert_default(&format!("Error loading audio:\n{:#}", e));
            w.status_bar.set_label("Load failed");
        }
    }
}

// ── Open WAV File ──
fn setup_open_callback(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    let state = state.clone();
    let widgets_c = widgets.clone();

    let mut btn_open = widgets.btn_open.clone();
    btn_open.set_callback(move |_| {
        let mut chooser = dialog::NativeFileChooser::new(dialog::NativeFileChooserType::BrowseFile);
        chooser.set_filter("*.wav");
        chooser.show();

        let filename = chooser.filename();
        if filename.as_os_str().is_empty() {
            return;
        }
        open_file(&filename, &widgets_c, &state);
    });
}

// ── Close: unload and clear the graph ──
fn setup_close_callback(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    let state = state.clone();
    let mut w = widgets.clone();

    let mut btn_close = widgets.btn_close.clone();
    btn_close.set_callback(move |b| {
        state.borrow_mut().close_file();
        log::info!("file closed");

        b.deactivate();
        w.btn_play.deactivate();
        w.btn_stop.deactivate();
        w.btn_play.set_label("Play");
        w.scrollbar.set_slider_size(1.0);
        w.scrollbar.set_value(0.0);
        w.scrollbar.deactivate();
        w.lbl_time.set_label(&format!("{} / {}", format_time(0.0), format_time(0.0)));
        w.status_bar.set_label("Ready | Open a WAV file to begin");
        w.graph_display.redraw();
    });
}
