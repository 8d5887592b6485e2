use crate::data::{
    FreehandCurve, Marker, MarkerBound, Point, ScrollRange, SurfaceGeometry, ViewWindow,
};
use crate::processing::CoordinateMapper;
use crate::settings::{InteractionSettings, Settings};

use super::events::{KeyCommand, PointerEvent, UpdateSource, ViewUpdate};

pub type ViewListener = Box<dyn FnMut(&ViewUpdate)>;

/// Graph viewing or free-hand drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Graph,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
    DrawingCurve,
}

/// Owns the view window and the draw-surface geometry, and is the only
/// thing that changes them. Every handler returns whether the graph needs
/// a repaint.
pub struct InteractionController {
    window: ViewWindow,
    geometry: SurfaceGeometry,
    default_span: f64,
    amplitude_scale: f64,
    mode: Mode,
    gesture: GestureState,
    anchor: Option<Point>,
    curve: FreehandCurve,
    marker: Option<Marker>,
    config: InteractionSettings,
    listeners: Vec<ViewListener>,
}

impl InteractionController {
    pub fn new(settings: &Settings) -> Self {
        Self {
            window: ViewWindow::new(0, settings.view.default_span),
            geometry: SurfaceGeometry::new(0.0, 0.0, settings.view.margins),
            default_span: settings.view.default_span,
            amplitude_scale: 1.0,
            mode: Mode::Graph,
            gesture: GestureState::Idle,
            anchor: None,
            curve: FreehandCurve::new(),
            marker: None,
            config: settings.interaction.clone(),
            listeners: Vec::new(),
        }
    }

    /// Register a callback for window changes (scrollbar sync, labels, ...).
    pub fn subscribe(&mut self, listener: ViewListener) {
        self.listeners.push(listener);
    }

    pub fn window(&self) -> &ViewWindow {
        &self.window
    }

    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    pub fn amplitude_scale(&self) -> f64 {
        self.amplitude_scale
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn curve(&self) -> &FreehandCurve {
        &self.curve
    }

    pub fn marker(&self) -> Option<Marker> {
        self.marker
    }

    pub fn mapper(&self) -> Option<CoordinateMapper> {
        CoordinateMapper::new(&self.window, &self.geometry, self.amplitude_scale)
    }

    /// A new buffer of `sample_count` samples replaced the old one.
    pub fn load(&mut self, sample_count: usize) {
        self.window = ViewWindow::new(sample_count, self.default_span);
        self.amplitude_scale = 1.0;
        self.reset_gesture();
        self.curve.clear();
        self.marker = None;
        log::debug!("view reset to {:?} over {} samples", self.window.bounds(), sample_count);
        self.notify(UpdateSource::Load);
    }

    pub fn unload(&mut self) {
        self.load(0);
    }

    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let before = self.geometry;
        self.geometry.resize(width, height);
        self.geometry != before
    }

    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.reset_gesture();
        true
    }

    pub fn toggle_mode(&mut self) -> Mode {
        let next = match self.mode {
            Mode::Graph => Mode::Draw,
            Mode::Draw => Mode::Graph,
        };
        self.set_mode(next);
        next
    }

    fn reset_gesture(&mut self) {
        self.gesture = GestureState::Idle;
        self.anchor = None;
    }

    fn notify(&mut self, source: UpdateSource) {
        let update = ViewUpdate {
            bounds: self.window.bounds(),
            scroll: match source {
                UpdateSource::Scrollbar => None,
                _ => Some(self.window.to_scroll_position()),
            },
            hard_left: self.window.is_hard_left(),
            source,
        };
        for listener in self.listeners.iter_mut() {
            listener(&update);
        }
    }

    /// Run a window mutation and tell subscribers if it moved anything.
    fn apply(&mut self, source: UpdateSource, f: impl FnOnce(&mut ViewWindow) -> bool) -> bool {
        let changed = f(&mut self.window);
        if changed {
            self.notify(source);
        }
        changed
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match (self.mode, event) {
            (Mode::Draw, PointerEvent::Down(p)) => {
                self.curve.begin(p);
                self.gesture = GestureState::DrawingCurve;
                true
            }
            (Mode::Draw, PointerEvent::Drag(p)) => {
                if self.gesture != GestureState::DrawingCurve {
                    return false;
                }
                self.curve.extend_to(p);
                true
            }
            (Mode::Draw, PointerEvent::Up(_)) => {
                self.reset_gesture();
                false
            }
            (Mode::Draw, PointerEvent::DoubleClick(_)) => false,

            (Mode::Graph, PointerEvent::Down(p)) => {
                self.anchor = Some(p);
                self.gesture = GestureState::Idle;
                false
            }
            (Mode::Graph, PointerEvent::Drag(p)) => self.drag_to(p),
            (Mode::Graph, PointerEvent::Up(_)) => {
                self.reset_gesture();
                false
            }
            (Mode::Graph, PointerEvent::DoubleClick(p)) => self.mark(p),

            // zoom and scroll behave the same in both modes
            (_, PointerEvent::Wheel { at, notches }) => {
                self.zoom_at(at, self.config.wheel_zoom_step.powf(notches))
            }
            (_, PointerEvent::Magnify { at, scale }) => self.zoom_at(at, scale),
            (_, PointerEvent::Scroll { notches }) => {
                let delta = notches * self.config.pan_fraction * self.window.width();
                self.apply(UpdateSource::Pointer, |w| w.pan(delta))
            }
        }
    }

    fn drag_to(&mut self, p: Point) -> bool {
        let Some(last) = self.anchor else {
            return false;
        };
        let Some(mapper) = self.mapper() else {
            return false;
        };
        self.anchor = Some(p);
        self.gesture = GestureState::Dragging;
        // content follows the pointer, so the window moves the other way
        let delta = -mapper.sample_delta_for_pixels(p.x - last.x);
        self.apply(UpdateSource::Pointer, |w| w.pan(delta))
    }

    fn zoom_at(&mut self, at: Point, scale: f64) -> bool {
        let Some(mapper) = self.mapper() else {
            return false;
        };
        let anchor = mapper.x_to_index(at.x);
        self.apply(UpdateSource::Pointer, |w| w.zoom(scale, anchor))
    }

    /// Record a marker under the pointer and pull the nearer window edge to it.
    fn mark(&mut self, p: Point) -> bool {
        let Some(mapper) = self.mapper() else {
            return false;
        };
        let at = mapper.screen_to_signal(mapper.plot_rect().clamp(p));
        let bounds = self.window.bounds();
        let bound = if at.index - bounds.left <= bounds.right - at.index {
            MarkerBound::Left
        } else {
            MarkerBound::Right
        };
        self.marker = Some(Marker { at, bound });
        match bound {
            MarkerBound::Left => self.window.set_left_bound(at.index),
            MarkerBound::Right => self.window.set_right_bound(at.index),
        };
        log::debug!("marker at sample {:.1} moved {:?} bound", at.index, bound);
        // dependents resync even when the bound was already there
        self.notify(UpdateSource::Pointer);
        true
    }

    pub fn handle_key(&mut self, command: KeyCommand) -> bool {
        let step = self.config.pan_fraction * self.window.width();
        match command {
            KeyCommand::ZoomIn => {
                let scale = self.config.key_zoom_in;
                self.apply(UpdateSource::Keyboard, |w| w.zoom_centered(scale))
            }
            KeyCommand::ZoomOut => {
                let scale = self.config.key_zoom_out;
                self.apply(UpdateSource::Keyboard, |w| w.zoom_centered(scale))
            }
            KeyCommand::PanLeft => self.apply(UpdateSource::Keyboard, |w| w.pan(-step)),
            KeyCommand::PanRight => self.apply(UpdateSource::Keyboard, |w| w.pan(step)),
            KeyCommand::AmplitudeUp => self.scale_amplitude(self.config.amplitude_step),
            KeyCommand::AmplitudeDown => self.scale_amplitude(1.0 / self.config.amplitude_step),
            KeyCommand::ResetView => {
                let amplitude_changed = self.amplitude_scale != 1.0;
                self.amplitude_scale = 1.0;
                let moved = self.apply(UpdateSource::Keyboard, |w| {
                    let before = w.bounds();
                    w.reset();
                    w.bounds() != before
                });
                moved || amplitude_changed
            }
            KeyCommand::ToggleMode => {
                self.toggle_mode();
                true
            }
        }
    }

    fn scale_amplitude(&mut self, factor: f64) -> bool {
        if self.window.is_empty() {
            return false;
        }
        let before = self.amplitude_scale;
        self.amplitude_scale = (self.amplitude_scale * factor)
            .clamp(self.config.amplitude_min, self.config.amplitude_max);
        self.amplitude_scale != before
    }

    /// The user moved the scrollbar thumb to `range`.
    pub fn handle_scroll(&mut self, range: ScrollRange) -> bool {
        self.apply(UpdateSource::Scrollbar, |w| w.set_from_scroll_position(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Margins, WindowBounds};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 600 x 400 draw box at (20, 10) inside a 640 x 440 surface.
    fn controller(samples: usize) -> InteractionController {
        let mut settings = Settings::default();
        settings.view.margins = Margins { left: 20.0, right: 20.0, top: 10.0, bottom: 30.0 };
        let mut c = InteractionController::new(&settings);
        c.resize(640.0, 440.0);
        c.load(samples);
        c
    }

    fn recorder(c: &mut InteractionController) -> Rc<RefCell<Vec<ViewUpdate>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        c.subscribe(Box::new(move |u: &ViewUpdate| sink.borrow_mut().push(*u)));
        log
    }

    #[test]
    fn test_load_resets_and_notifies() {
        let mut c = controller(0);
        let log = recorder(&mut c);
        c.load(44100);
        let updates = log.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].source, UpdateSource::Load);
        assert_eq!(updates[0].bounds, WindowBounds { left: 0.0, right: 1200.0 });
        assert!(updates[0].hard_left);
        let scroll = updates[0].scroll.unwrap();
        assert!((scroll.size - 1200.0 / 44100.0 * 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_pans_with_pointer() {
        let mut c = controller(44100);
        c.handle_scroll(ScrollRange::new(1000.0 / 44100.0 * 1000.0, 0.0));
        assert!((c.window().left() - 1000.0).abs() < 1e-6);

        assert!(!c.handle_pointer(PointerEvent::Down(Point::new(300.0, 100.0))));
        assert!(c.handle_pointer(PointerEvent::Drag(Point::new(330.0, 120.0))));
        assert_eq!(c.gesture(), GestureState::Dragging);
        // 30 px of a 600 px box over 1200 samples
        assert!((c.window().left() - 940.0).abs() < 1e-6);

        assert!(c.handle_pointer(PointerEvent::Drag(Point::new(300.0, 120.0))));
        assert!((c.window().left() - 1000.0).abs() < 1e-6);

        c.handle_pointer(PointerEvent::Up(Point::new(300.0, 120.0)));
        assert_eq!(c.gesture(), GestureState::Idle);
        assert!(!c.handle_pointer(PointerEvent::Drag(Point::new(10.0, 10.0))));
    }

    #[test]
    fn test_drag_past_start_pins_hard_left() {
        let mut c = controller(44100);
        let log = recorder(&mut c);
        c.handle_pointer(PointerEvent::Down(Point::new(100.0, 100.0)));
        // already at 0: dragging right would move before the start
        assert!(!c.handle_pointer(PointerEvent::Drag(Point::new(400.0, 100.0))));
        assert!(c.window().is_hard_left());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_wheel_zooms_around_pointer() {
        let mut c = controller(44100);
        let at = Point::new(170.0, 200.0); // sample 300
        assert!(c.handle_pointer(PointerEvent::Wheel { at, notches: 1.0 }));
        let w = c.window();
        assert!((w.width() - 1200.0 / 1.1).abs() < 1e-9);
        let mapper = c.mapper().unwrap();
        assert!((mapper.x_to_index(at.x) - 300.0).abs() < 1e-9);

        c.handle_pointer(PointerEvent::Wheel { at, notches: -1.0 });
        assert!((c.window().width() - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_magnify_gesture() {
        let mut c = controller(44100);
        assert!(c.handle_pointer(PointerEvent::Magnify { at: Point::new(320.0, 50.0), scale: 2.0 }));
        assert!((c.window().left() - 300.0).abs() < 1e-9);
        assert!((c.window().right() - 900.0).abs() < 1e-9);
        assert!((c.window().magnify_factor() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_double_click_sets_nearer_bound() {
        let mut c = controller(44100);
        let log = recorder(&mut c);

        // sample 200 sits in the left half
        assert!(c.handle_pointer(PointerEvent::DoubleClick(Point::new(120.0, 210.0))));
        let marker = c.marker().unwrap();
        assert_eq!(marker.bound, MarkerBound::Left);
        assert!((marker.at.index - 200.0).abs() < 1e-9);
        assert!(marker.at.amplitude.abs() < 1e-9);
        assert!((c.window().left() - 200.0).abs() < 1e-9);
        assert_eq!(c.window().right(), 1200.0);

        // window is now [200, 1200); x=520 is sample 200 + 5/6 * 1000
        c.handle_pointer(PointerEvent::DoubleClick(Point::new(520.0, 10.0)));
        let marker = c.marker().unwrap();
        assert_eq!(marker.bound, MarkerBound::Right);
        assert!((marker.at.amplitude - 1.0).abs() < 1e-9);
        assert!((c.window().right() - (200.0 + 1000.0 * 5.0 / 6.0)).abs() < 1e-6);

        let updates = log.borrow();
        assert_eq!(updates.len(), 2);
        assert!(updates.iter().all(|u| u.scroll.is_some()));
    }

    #[test]
    fn test_scrollbar_updates_do_not_echo() {
        let mut c = controller(10000);
        let log = recorder(&mut c);
        assert!(c.handle_scroll(ScrollRange::new(500.0, 200.0)));
        assert_eq!(c.window().bounds(), WindowBounds { left: 5000.0, right: 6200.0 });

        let updates = log.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].source, UpdateSource::Scrollbar);
        assert_eq!(updates[0].scroll, None);
    }

    #[test]
    fn test_draw_mode_collects_curve() {
        let mut c = controller(44100);
        let before = c.window().clone();
        assert_eq!(c.toggle_mode(), Mode::Draw);

        c.handle_pointer(PointerEvent::Down(Point::new(50.0, 50.0)));
        assert_eq!(c.gesture(), GestureState::DrawingCurve);
        c.handle_pointer(PointerEvent::Drag(Point::new(60.0, 55.0)));
        c.handle_pointer(PointerEvent::Drag(Point::new(70.0, 65.0)));
        c.handle_pointer(PointerEvent::Up(Point::new(70.0, 65.0)));
        assert_eq!(c.curve().len(), 3);
        assert_eq!(c.window(), &before);

        // a new stroke replaces the old one
        c.handle_pointer(PointerEvent::Down(Point::new(5.0, 5.0)));
        assert_eq!(c.curve().len(), 1);

        assert!(!c.handle_pointer(PointerEvent::DoubleClick(Point::new(100.0, 100.0))));
        assert!(c.marker().is_none());
    }

    #[test]
    fn test_nothing_loaded_is_a_no_op() {
        let mut c = controller(0);
        let log = recorder(&mut c);
        let p = Point::new(200.0, 200.0);
        assert!(!c.handle_pointer(PointerEvent::Down(p)));
        assert!(!c.handle_pointer(PointerEvent::Drag(Point::new(260.0, 200.0))));
        assert!(!c.handle_pointer(PointerEvent::DoubleClick(p)));
        assert!(!c.handle_pointer(PointerEvent::Wheel { at: p, notches: 2.0 }));
        assert!(!c.handle_pointer(PointerEvent::Scroll { notches: 1.0 }));
        assert!(!c.handle_scroll(ScrollRange::new(100.0, 10.0)));
        assert!(!c.handle_key(KeyCommand::ZoomIn));
        assert!(!c.handle_key(KeyCommand::AmplitudeUp));
        assert!(c.mapper().is_none());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_keyboard_zoom_and_amplitude_are_separate() {
        let mut c = controller(44100);
        assert!(c.handle_key(KeyCommand::AmplitudeUp));
        assert!((c.amplitude_scale() - 1.1).abs() < 1e-12);
        assert_eq!(c.window().magnify_factor(), 1.0);

        assert!(c.handle_key(KeyCommand::ZoomIn));
        assert!((c.window().magnify_factor() - 1.101).abs() < 1e-9);
        assert!((c.amplitude_scale() - 1.1).abs() < 1e-12);

        for _ in 0..200 {
            c.handle_key(KeyCommand::AmplitudeUp);
        }
        assert_eq!(c.amplitude_scale(), 50.0);

        assert!(c.handle_key(KeyCommand::ResetView));
        assert_eq!(c.amplitude_scale(), 1.0);
        assert_eq!(c.window().bounds(), WindowBounds { left: 0.0, right: 1200.0 });
        assert_eq!(c.window().magnify_factor(), 1.0);
    }

    #[test]
    fn test_key_pan_steps_by_fraction() {
        let mut c = controller(44100);
        assert!(c.handle_key(KeyCommand::PanRight));
        assert_eq!(c.window().bounds(), WindowBounds { left: 120.0, right: 1320.0 });
        assert!(c.handle_key(KeyCommand::PanLeft));
        assert!(c.window().is_hard_left());
        assert!(c.handle_pointer(PointerEvent::Scroll { notches: 2.0 }));
        assert_eq!(c.window().left(), 240.0);
    }

    #[test]
    fn test_resize_reports_change() {
        let mut c = controller(44100);
        assert!(!c.resize(640.0, 440.0));
        assert!(c.resize(800.0, 440.0));
        assert_eq!(c.mapper().unwrap().plot_rect().w, 760.0);
    }
}
