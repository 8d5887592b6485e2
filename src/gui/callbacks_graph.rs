use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::{self, MouseWheel},
    enums::{Event, Key, Shortcut},
    prelude::*,
    widget::Widget,
};

use wavgraph::data::SCROLL_TRACK;
use wavgraph::{KeyCommand, Mode, Point, PointerEvent, ScrollRange, ViewUpdate};

use super::app_state::AppState;
use super::layout::Widgets;
use super::painter;

// ═══════════════════════════════════════════════════════════════════════════
//  GRAPH CALLBACKS
// ═══════════════════════════════════════════════════════════════════════════

pub fn setup_graph_callbacks(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    setup_view_listener(widgets, state);
    setup_graph_draw(widgets, state);
    setup_graph_mouse(widgets, state);
    setup_scrollbar_callback(widgets, state);
    setup_toggle_callbacks(widgets, state);
}

/// Keep the scrollbar thumb and the view label in step with the window.
fn setup_view_listener(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    let mut scrollbar = widgets.scrollbar.clone();
    let mut lbl_view = widgets.lbl_view.clone();

    state.borrow_mut().controller.subscribe(Box::new(move |update: &ViewUpdate| {
        if let Some(range) = update.scroll {
            scrollbar.set_slider_size((range.size / SCROLL_TRACK).clamp(0.0, 1.0) as f32);
            scrollbar.set_value(range.start);
        }
        let bounds = update.bounds;
        if bounds.width() > 0.0 {
            lbl_view.set_label(&format!(
                "Samples {:.0} - {:.0}{}",
                bounds.left,
                bounds.right,
                if update.hard_left { " (start)" } else { "" }
            ));
        } else {
            lbl_view.set_label("");
        }
    }));
}

/// The graph works in widget-local pixels; keep its surface size current.
fn sync_surface(st: &mut AppState, w: &Widget) -> bool {
    st.controller.resize(w.w() as f64, w.h() as f64)
}

fn local_point(w: &Widget) -> Point {
    Point::new((app::event_x() - w.x()) as f64, (app::event_y() - w.y()) as f64)
}

// ── Graph display ──
fn setup_graph_draw(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    let state = state.clone();

    let mut graph_display = widgets.graph_display.clone();
    graph_display.draw(move |w| {
        if !w.visible_r() || w.w() <= 0 || w.h() <= 0 {
            return;
        }
        let Ok(mut st) = state.try_borrow_mut() else { return; };
        sync_surface(&mut st, w);

        let scene = st.scene();
        fltk::draw::push_clip(w.x(), w.y(), w.w(), w.h());
        painter::paint(&scene, w.x(), w.y(), &st.settings.colors);
        fltk::draw::pop_clip();
    });
}

fn key_command() -> Option<KeyCommand> {
    let shift = app::event_state().contains(Shortcut::Shift.into());
    let ctrl = app::event_state().contains(Shortcut::Ctrl.into())
        || app::event_state().contains(Shortcut::Command.into());
    let key = app::event_key();

    let command = if key == Key::Left {
        if shift { KeyCommand::PanLeft } else { KeyCommand::ZoomIn }
    } else if key == Key::Right {
        if shift { KeyCommand::PanRight } else { KeyCommand::ZoomOut }
    } else if key == Key::Up {
        KeyCommand::AmplitudeUp
    } else if key == Key::Down {
        KeyCommand::AmplitudeDown
    } else if key == Key::Home {
        KeyCommand::ResetView
    } else if ctrl && key == Key::from_char('1') {
        KeyCommand::ZoomIn
    } else if ctrl && key == Key::from_char('3') {
        KeyCommand::ZoomOut
    } else if key == Key::from_char('d') {
        KeyCommand::ToggleMode
    } else {
        return None;
    };
    Some(command)
}

// ── Mouse, wheel and keyboard on the graph ──
fn setup_graph_mouse(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    let state = state.clone();
    let mut btn_draw = widgets.btn_draw.clone();
    let mut status_bar = widgets.status_bar.clone();

    let mut graph_display = widgets.graph_display.clone();
    graph_display.handle(move |w, ev| {
        let pointer = match ev {
            Event::Focus | Event::Unfocus | Event::Enter | Event::Leave => return true,
            Event::Push => {
                let _ = w.take_focus();
                let p = local_point(w);
                if app::event_clicks() {
                    Some(PointerEvent::DoubleClick(p))
                } else {
                    Some(PointerEvent::Down(p))
                }
            }
            Event::Drag => Some(PointerEvent::Drag(local_point(w))),
            Event::Released => Some(PointerEvent::Up(local_point(w))),
            Event::MouseWheel => {
                let shift = app::event_state().contains(Shortcut::Shift.into());
                match (app::event_dy(), app::event_dx()) {
                    (MouseWheel::Up, _) if shift => Some(PointerEvent::Scroll { notches: -1.0 }),
                    (MouseWheel::Down, _) if shift => Some(PointerEvent::Scroll { notches: 1.0 }),
                    (MouseWheel::Up, _) => Some(PointerEvent::Wheel { at: local_point(w), notches: 1.0 }),
                    (MouseWheel::Down, _) => Some(PointerEvent::Wheel { at: local_point(w), notches: -1.0 }),
                    (_, MouseWheel::Left) => Some(PointerEvent::Scroll { notches: -1.0 }),
                    (_, MouseWheel::Right) => Some(PointerEvent::Scroll { notches: 1.0 }),
                    _ => None,
                }
            }
            _ => None,
        };

        let Ok(mut st) = state.try_borrow_mut() else { return false; };
        sync_surface(&mut st, w);

        if let Some(event) = pointer {
            let redraw = st.controller.handle_pointer(event);
            if let PointerEvent::DoubleClick(_) = event {
                if let Some(marker) = st.controller.marker() {
                    status_bar.set_label(&format!(
                        "Marker at sample {:.0}, amplitude {:.3} ({:?} bound)",
                        marker.at.index, marker.at.amplitude, marker.bound
                    ));
                }
            }
            drop(st);
            if redraw {
                w.redraw();
            }
            return true;
        }

        if ev == Event::KeyDown {
            let Some(command) = key_command() else { return false; };
            let redraw = st.controller.handle_key(command);
            let draw_mode = st.controller.mode() == Mode::Draw;
            drop(st);
            btn_draw.set_value(draw_mode);
            if redraw {
                w.redraw();
            }
            return true;
        }
        false
    });
}

// ═══════════════════════════════════════════════════════════════════════════
//  SCROLLBAR CALLBACK
// ═══════════════════════════════════════════════════════════════════════════

fn setup_scrollbar_callback(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    let state = state.clone();
    let mut graph_display = widgets.graph_display.clone();

    let mut scrollbar = widgets.scrollbar.clone();
    scrollbar.set_callback(move |s| {
        let Ok(mut st) = state.try_borrow_mut() else { return; };
        // value range is [0, max - slider_size * max], i.e. the window start
        let range = ScrollRange::new(s.value(), s.slider_size() as f64 * SCROLL_TRACK);
        let changed = st.controller.handle_scroll(range);
        drop(st);
        if changed {
            graph_display.redraw();
        }
    });
}

// ═══════════════════════════════════════════════════════════════════════════
//  TOGGLES
// ═══════════════════════════════════════════════════════════════════════════

fn setup_toggle_callbacks(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    {
        let state = state.clone();
        let mut graph_display = widgets.graph_display.clone();

        let mut check_graph = widgets.check_graph.clone();
        check_graph.set_callback(move |c| {
            state.borrow_mut().graph_enabled = c.is_checked();
            graph_display.redraw();
        });
    }
    {
        let state = state.clone();
        let mut graph_display = widgets.graph_display.clone();
        let mut status_bar = widgets.status_bar.clone();

        let mut btn_draw = widgets.btn_draw.clone();
        btn_draw.set_callback(move |b| {
            let mode = if b.value() { Mode::Draw } else { Mode::Graph };
            state.borrow_mut().controller.set_mode(mode);
            status_bar.set_label(match mode {
                Mode::Draw => "Draw mode | drag on the graph to sketch",
                Mode::Graph => "Graph mode | drag to pan, wheel to zoom, double-click to mark",
            });
            let _ = graph_display.take_focus();
            graph_display.redraw();
        });
    }
}
