mod gui;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use fltk::{app, prelude::*};

use gui::app_state::AppState;
use gui::{callbacks_file, callbacks_graph, callbacks_menu, callbacks_transport, layout, theme};
use wavgraph::Settings;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load_or_create(&Settings::default_path());

    let app = app::App::default();
    theme::apply_dark_theme();

    let (mut win, widgets) = layout::build_ui(&settings);
    let state = Rc::new(RefCell::new(AppState::new(settings)));

    callbacks_graph::setup_graph_callbacks(&widgets, &state);
    callbacks_file::setup_file_callbacks(&widgets, &state);
    callbacks_transport::setup_transport_callbacks(&widgets, &state);
    callbacks_transport::setup_spacebar_handler(&mut win, &widgets);
    callbacks_menu::setup_menu_callbacks(&widgets, &state);
    callbacks_transport::start_poll_loop(&widgets, &state);

    win.show();

    // wavgraph [FILE.wav]
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        callbacks_file::open_file(&path, &widgets, &state);
    }

    app.run().context("FLTK event loop failed")?;
    Ok(())
}
