pub mod app_state;
pub mod audio_player;
pub mod callbacks_file;
pub mod callbacks_graph;
pub mod callbacks_menu;
pub mod callbacks_transport;
pub mod layout;
pub mod painter;
pub mod theme;
