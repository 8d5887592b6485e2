use fltk::{app, enums::Color};

// Dark theme color palette
pub const BG_DARK: u32        = 0x1e1e2e;  // main background
pub const BG_PANEL: u32       = 0x2a2a3a;  // panel background
pub const BG_WIDGET: u32      = 0x363646;  // button background
pub const TEXT_PRIMARY: u32   = 0xcdd6f4;  // main text
pub const TEXT_SECONDARY: u32 = 0xa6adc8;  // dimmed text
pub const TEXT_DISABLED: u32  = 0x6c7086;  // greyed out text
pub const ACCENT_BLUE: u32   = 0x89b4fa;  // primary accent
pub const ACCENT_GREEN: u32  = 0xa6e3a1;  // play / active toggles
pub const ACCENT_RED: u32    = 0xf38ba8;  // stop
pub const ACCENT_YELLOW: u32 = 0xf9e2af;  // draw mode

fn rgb(hex: u32) -> (u8, u8, u8) {
    (((hex >> 16) & 0xFF) as u8, ((hex >> 8) & 0xFF) as u8, (hex & 0xFF) as u8)
}

pub fn apply_dark_theme() {
    let (r, g, b) = rgb(BG_PANEL);
    app::set_background_color(r, g, b);
    let (r, g, b) = rgb(BG_WIDGET);
    app::set_background2_color(r, g, b);
    let (r, g, b) = rgb(TEXT_PRIMARY);
    app::set_foreground_color(r, g, b);
    let (r, g, b) = rgb(ACCENT_BLUE);
    app::set_selection_color(r, g, b);
    let (r, g, b) = rgb(TEXT_DISABLED);
    app::set_inactive_color(r, g, b);

    app::set_scheme(app::Scheme::Gtk);
}

pub fn color(hex: u32) -> Color {
    Color::from_hex(hex)
}

pub fn accent_color() -> Color {
    Color::from_hex(ACCENT_BLUE)
}
