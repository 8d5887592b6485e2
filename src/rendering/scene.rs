use crate::data::{PlotRect, Point, SampleStore, SignalPoint};
use crate::interaction::InteractionController;
use crate::processing::{CoordinateMapper, DecimationMode, decimate, visible_indices};
use crate::settings::RenderSettings;

use super::ticks::time_ticks;

/// What a primitive depicts. The painter picks colors and line styles by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Background,
    Frame,
    Grid,
    Signal,
    Curve,
    Marker,
    Label,
}

/// Something to draw, in surface pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect { rect: PlotRect, filled: bool, role: Role },
    Line { from: Point, to: Point, role: Role },
    Polyline { points: Vec<Point>, role: Role },
    Dot { center: Point, radius: f64, role: Role },
    /// `at` is the top-center of the text.
    Text { at: Point, text: String, role: Role },
}

impl Primitive {
    pub fn role(&self) -> Role {
        match self {
            Primitive::Rect { role, .. }
            | Primitive::Line { role, .. }
            | Primitive::Polyline { role, .. }
            | Primitive::Dot { role, .. }
            | Primitive::Text { role, .. } => *role,
        }
    }
}

/// Primitives in back-to-front order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

impl Scene {
    fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(move |p| p.role() == role)
    }

    /// Points of the waveform polyline, if one was drawn.
    pub fn signal_points(&self) -> Option<&[Point]> {
        self.primitives.iter().find_map(|p| match p {
            Primitive::Polyline { points, role: Role::Signal } => Some(points.as_slice()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
    pub decimation: DecimationMode,
    pub show_grid: bool,
    pub tick_target: usize,
    pub marker_radius: f64,
    /// The "Graph Signal" toggle
    pub graph_enabled: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self::from_settings(&RenderSettings::default(), true)
    }
}

impl SceneOptions {
    pub fn from_settings(render: &RenderSettings, graph_enabled: bool) -> Self {
        Self {
            decimation: render.decimation,
            show_grid: render.show_grid,
            tick_target: render.tick_target,
            marker_radius: render.marker_radius,
            graph_enabled,
        }
    }
}

pub const PLACEHOLDER_TEXT: &str = "No file loaded";

/// Tick mark length below the draw box
const TICK_LEN: f64 = 4.0;

/// Build everything the graph widget shows for the current state.
pub fn build_scene(
    store: Option<&SampleStore>,
    controller: &InteractionController,
    options: &SceneOptions,
) -> Scene {
    let mut scene = Scene::default();
    let geometry = controller.geometry();
    if geometry.width <= 0.0 || geometry.height <= 0.0 {
        return scene;
    }

    scene.push(Primitive::Rect {
        rect: PlotRect { x: 0.0, y: 0.0, w: geometry.width, h: geometry.height },
        filled: true,
        role: Role::Background,
    });
    if !geometry.has_area() {
        return scene;
    }
    let plot = geometry.plot_rect();
    scene.push(Primitive::Rect { rect: plot, filled: false, role: Role::Frame });

    let store = store.filter(|s| !s.is_empty());
    let (Some(store), Some(mapper)) = (store, controller.mapper()) else {
        scene.push(Primitive::Text {
            at: Point::new(plot.x + plot.w / 2.0, plot.center_y()),
            text: PLACEHOLDER_TEXT.to_string(),
            role: Role::Label,
        });
        return scene;
    };

    if options.show_grid {
        push_grid(&mut scene, &mapper, store.sample_rate, options.tick_target);
    }

    if options.graph_enabled {
        let points = signal_polyline(store, &mapper, geometry.plot_width_px(), options.decimation);
        if !points.is_empty() {
            scene.push(Primitive::Polyline { points, role: Role::Signal });
        }
    }

    let curve = controller.curve().points();
    match curve.len() {
        0 => {}
        1 => scene.push(Primitive::Dot {
            center: curve[0],
            radius: 1.0,
            role: Role::Curve,
        }),
        _ => scene.push(Primitive::Polyline { points: curve.to_vec(), role: Role::Curve }),
    }

    if let Some(marker) = controller.marker() {
        if controller.window().contains(marker.at.index) {
            scene.push(Primitive::Dot {
                center: plot.clamp(mapper.signal_to_screen(marker.at)),
                radius: options.marker_radius,
                role: Role::Marker,
            });
        }
    }

    scene
}

fn push_grid(scene: &mut Scene, mapper: &CoordinateMapper, sample_rate: u32, tick_target: usize) {
    let plot = mapper.plot_rect();
    let zero = mapper.amplitude_to_y(0.0);
    scene.push(Primitive::Line {
        from: Point::new(plot.x, zero),
        to: Point::new(plot.right(), zero),
        role: Role::Grid,
    });

    let bounds = mapper.bounds();
    for tick in time_ticks(bounds.left, bounds.right, sample_rate, tick_target) {
        let x = mapper.index_to_x(tick.index).clamp(plot.x, plot.right());
        scene.push(Primitive::Line {
            from: Point::new(x, plot.y),
            to: Point::new(x, plot.bottom() + TICK_LEN),
            role: Role::Grid,
        });
        scene.push(Primitive::Text {
            at: Point::new(x, plot.bottom() + TICK_LEN),
            text: tick.label,
            role: Role::Label,
        });
    }
}

/// Screen points of the visible samples, at most one per pixel column,
/// pinned vertically to the draw box.
fn signal_polyline(
    store: &SampleStore,
    mapper: &CoordinateMapper,
    columns: usize,
    mode: DecimationMode,
) -> Vec<Point> {
    let bounds = mapper.bounds();
    let Some((first, last)) = visible_indices(bounds.left, bounds.right, store.sample_count()) else {
        return Vec::new();
    };
    let plot = mapper.plot_rect();
    decimate(store.samples(), first, last, columns, mode)
        .into_iter()
        .map(|(index, value)| {
            let p = mapper.signal_to_screen(SignalPoint::new(index as f64, value as f64));
            Point::new(p.x, p.y.clamp(plot.y, plot.bottom()))
        })
        .collect()
}
