use fltk::{
    draw::{self, LineStyle},
    enums::{Align, Color, Font},
};

use wavgraph::settings::ColorSettings;
use wavgraph::{Primitive, Role, Scene};

use super::theme;

const LABEL_W: i32 = 120;
const LABEL_H: i32 = 14;

fn role_color(role: Role, colors: &ColorSettings) -> Color {
    theme::color(match role {
        Role::Background => colors.background,
        Role::Frame => colors.frame,
        Role::Grid => colors.grid,
        Role::Signal => colors.signal,
        Role::Curve => colors.curve,
        Role::Marker => colors.marker,
        Role::Label => colors.text,
    })
}

/// Draw `scene` with its origin at widget position (`ox`, `oy`).
pub fn paint(scene: &Scene, ox: i32, oy: i32, colors: &ColorSettings) {
    let px = |x: f64| ox + x.round() as i32;
    let py = |y: f64| oy + y.round() as i32;

    draw::set_font(Font::Helvetica, 11);
    for primitive in scene.iter() {
        draw::set_draw_color(role_color(primitive.role(), colors));
        match primitive {
            Primitive::Rect { rect, filled, .. } => {
                let (w, h) = (rect.w.round() as i32, rect.h.round() as i32);
                if *filled {
                    draw::draw_rectf(px(rect.x), py(rect.y), w, h);
                } else {
                    draw::draw_rect(px(rect.x), py(rect.y), w, h);
                }
            }
            Primitive::Line { from, to, role } => {
                if *role == Role::Grid {
                    draw::set_line_style(LineStyle::Dot, 1);
                }
                draw::draw_line(px(from.x), py(from.y), px(to.x), py(to.y));
                draw::set_line_style(LineStyle::Solid, 0);
            }
            Primitive::Polyline { points, .. } => {
                draw::begin_line();
                for p in points {
                    draw::vertex(ox as f64 + p.x, oy as f64 + p.y);
                }
                draw::end_line();
            }
            Primitive::Dot { center, radius, .. } => {
                let d = (radius * 2.0).round().max(1.0) as i32;
                draw::draw_pie(px(center.x) - d / 2, py(center.y) - d / 2, d, d, 0.0, 360.0);
            }
            Primitive::Text { at, text, .. } => {
                draw::draw_text2(
                    text,
                    px(at.x) - LABEL_W / 2,
                    py(at.y),
                    LABEL_W,
                    LABEL_H,
                    Align::Center | Align::Top,
                );
            }
        }
    }
}
