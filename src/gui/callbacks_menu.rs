use std::cell::RefCell;
use std::rc::Rc;

use fltk::{app, dialog, enums::Shortcut, menu::MenuFlag, prelude::*};

use wavgraph::{KeyCommand, Settings};

use super::app_state::AppState;
use super::layout::Widgets;

// ═══════════════════════════════════════════════════════════════════════════
//  MENU CALLBACKS
// ═══════════════════════════════════════════════════════════════════════════

pub fn setup_menu_callbacks(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    let mut menu = widgets.menu.clone();

    {
        let mut btn_open = widgets.btn_open.clone();
        menu.add("&File/Open WAV...\t", Shortcut::Ctrl | 'o', MenuFlag::Normal,
            move |_| { btn_open.do_callback(); });
    }
    {
        let mut btn_close = widgets.btn_close.clone();
        menu.add("&File/Close\t", Shortcut::Ctrl | 'w', MenuFlag::MenuDivider,
            move |_| {
                if btn_close.active() {
                    btn_close.do_callback();
                }
            });
    }
    {
        let state = state.clone();
        let mut status_bar = widgets.status_bar.clone();
        menu.add("&File/Save Settings\t", Shortcut::None, MenuFlag::MenuDivider,
            move |_| {
                let path = Settings::default_path();
                match state.borrow().settings.save(&path) {
                    Ok(()) => status_bar.set_label(&format!("Settings saved to {}", path.display())),
                    Err(e) => {
                        log::error!("{:#}", e);
                        dialog::alert_default(&format!("Could not save settings:\n{:#}", e));
                    }
                }
            });
    }
    menu.add("&File/Quit\t", Shortcut::Ctrl | 'q', MenuFlag::Normal,
        move |_| { app::quit(); });

    let view_items = [
        ("&View/Zoom In\t", Shortcut::Ctrl | '1', KeyCommand::ZoomIn),
        ("&View/Zoom Out\t", Shortcut::Ctrl | '3', KeyCommand::ZoomOut),
        ("&View/Pan Left\t", Shortcut::None, KeyCommand::PanLeft),
        ("&View/Pan Right\t", Shortcut::None, KeyCommand::PanRight),
        ("&View/Louder\t", Shortcut::None, KeyCommand::AmplitudeUp),
        ("&View/Quieter\t", Shortcut::None, KeyCommand::AmplitudeDown),
        ("&View/Reset View\t", Shortcut::None, KeyCommand::ResetView),
    ];
    for (label, shortcut, command) in view_items {
        let state = state.clone();
        let mut graph_display = widgets.graph_display.clone();
        menu.add(label, shortcut, MenuFlag::Normal, move |_| {
            let changed = state.borrow_mut().controller.handle_key(command);
            if changed {
                graph_display.redraw();
            }
        });
    }
    {
        let mut btn_draw = widgets.btn_draw.clone();
        menu.add("&View/Draw Mode\t", Shortcut::None, MenuFlag::Normal,
            move |_| {
                let on = btn_draw.value();
                btn_draw.set_value(!on);
                btn_draw.do_callback();
            });
    }
}
