use fltk::{
    button::{Button, CheckButton, ToggleButton},
    enums::{Align, FrameType},
    frame::Frame,
    group::Flex,
    menu::MenuBar,
    prelude::*,
    valuator::{Scrollbar, ScrollbarType},
    widget::Widget,
    window::Window,
};

use wavgraph::data::SCROLL_TRACK;
use wavgraph::Settings;

use super::theme;

// ─── Window Layout Constants ────────────────────────────────────────────────────
const MENU_H: i32 = 25;
const STATUS_H: i32 = 25;
const TOOLBAR_H: i32 = 32;
const SCROLL_H: i32 = 18;

// ─── Widgets struct ─────────────────────────────────────────────────────────────
// Cloneable handles to every widget that callbacks need to access.

#[derive(Clone)]
pub struct Widgets {
    pub menu: MenuBar,
    pub btn_open: Button,
    pub btn_close: Button,
    pub btn_play: Button,
    pub btn_stop: Button,
    pub check_graph: CheckButton,
    pub btn_draw: ToggleButton,
    pub lbl_time: Frame,
    pub lbl_view: Frame,
    pub graph_display: Widget,
    pub scrollbar: Scrollbar,
    pub status_bar: Frame,
}

fn toolbar_button(label: &str, width: i32, row: &mut Flex) -> Button {
    let mut btn = Button::default().with_label(label);
    btn.set_color(theme::color(theme::BG_WIDGET));
    btn.set_label_color(theme::color(theme::TEXT_PRIMARY));
    btn.set_label_size(12);
    row.fixed(&btn, width);
    btn
}

// ─── Build UI ───────────────────────────────────────────────────────────────────

pub fn build_ui(settings: &Settings) -> (Window, Widgets) {
    let win_w = settings.window.width.max(400);
    let win_h = settings.window.height.max(300);

    let mut win = Window::new(50, 50, win_w, win_h, "wavgraph");
    win.make_resizable(true);
    win.set_color(theme::color(theme::BG_DARK));

    let mut menu = MenuBar::default().with_size(win_w, MENU_H);
    menu.set_color(theme::color(theme::BG_PANEL));
    menu.set_text_color(theme::color(theme::TEXT_PRIMARY));
    menu.set_text_size(12);

    let mut root = Flex::default()
        .with_pos(0, MENU_H)
        .with_size(win_w, win_h - MENU_H - STATUS_H)
        .column();
    root.set_margin(4);
    root.set_pad(4);

    // ── Toolbar ──
    let mut toolbar = Flex::default().row();
    toolbar.set_pad(4);
    root.fixed(&toolbar, TOOLBAR_H);

    let btn_open = toolbar_button("Open...", 80, &mut toolbar);
    let mut btn_close = toolbar_button("Close", 70, &mut toolbar);
    btn_close.deactivate();

    let mut btn_play = toolbar_button("Play", 70, &mut toolbar);
    btn_play.set_label_color(theme::color(theme::ACCENT_GREEN));
    btn_play.deactivate();

    let mut btn_stop = toolbar_button("Stop", 70, &mut toolbar);
    btn_stop.set_label_color(theme::color(theme::ACCENT_RED));
    btn_stop.deactivate();

    let mut check_graph = CheckButton::default().with_label("Graph Signal");
    check_graph.set_checked(true);
    check_graph.set_label_color(theme::color(theme::TEXT_PRIMARY));
    check_graph.set_label_size(12);
    toolbar.fixed(&check_graph, 110);

    let mut btn_draw = ToggleButton::default().with_label("Draw");
    btn_draw.set_color(theme::color(theme::BG_WIDGET));
    btn_draw.set_selection_color(theme::color(theme::ACCENT_YELLOW));
    btn_draw.set_label_color(theme::color(theme::TEXT_PRIMARY));
    btn_draw.set_label_size(12);
    toolbar.fixed(&btn_draw, 60);

    let mut lbl_time = Frame::default().with_label("0:00.00 / 0:00.00");
    lbl_time.set_label_color(theme::color(theme::TEXT_SECONDARY));
    lbl_time.set_label_size(11);
    toolbar.fixed(&lbl_time, 120);

    let mut lbl_view = Frame::default();
    lbl_view.set_label_color(theme::color(theme::TEXT_SECONDARY));
    lbl_view.set_label_size(11);
    lbl_view.set_align(Align::Inside | Align::Right);

    toolbar.end();

    // ── Graph ──
    let mut graph_display = Widget::default();
    graph_display.set_frame(FrameType::FlatBox);
    graph_display.set_color(theme::color(settings.colors.background));

    // ── Horizontal scrollbar over the whole file ──
    let mut scrollbar = Scrollbar::default();
    scrollbar.set_type(ScrollbarType::Horizontal);
    scrollbar.set_color(theme::color(theme::BG_WIDGET));
    scrollbar.set_selection_color(theme::accent_color());
    scrollbar.set_minimum(0.0);
    scrollbar.set_maximum(SCROLL_TRACK);
    scrollbar.set_slider_size(1.0);
    scrollbar.set_value(0.0);
    scrollbar.deactivate();
    root.fixed(&scrollbar, SCROLL_H);

    root.end();

    // ─── STATUS BAR ───────────────────────────────────────────────────────────

    let mut status_bar = Frame::default()
        .with_pos(0, win_h - STATUS_H)
        .with_size(win_w, STATUS_H)
        .with_label("Ready | Open a WAV file to begin");
    status_bar.set_frame(FrameType::FlatBox);
    status_bar.set_color(theme::color(theme::BG_PANEL));
    status_bar.set_label_color(theme::color(theme::TEXT_SECONDARY));
    status_bar.set_label_size(11);
    status_bar.set_align(Align::Inside | Align::Left);

    win.end();
    win.resizable(&root);

    let widgets = Widgets {
        menu,
        btn_open,
        btn_close,
        btn_play,
        btn_stop,
        check_graph,
        btn_draw,
        lbl_time,
        lbl_view,
        graph_display,
        scrollbar,
        status_bar,
    };

    (win, widgets)
}
