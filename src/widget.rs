use crate::config::Settings;
use crate::graphics::{draw_frame, draw_line, Canvas};
use crate::input::WidgetEvent;
use crate::layout::{Layout, Rect, SidebarLayout, Viewport, CELL_ASPECT};
use crate::math::{ellipse_points, rotate_point};
use crate::state::AppState;
use crate::timer::{Scheduler, Tick, TimerKind};
use crate::vertex::Vertex;
use crossterm::style::Color;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const ROTATION_HINT: &str = "Click to reverse direction and spin from the opposite side.";

const LOGO_COLOR: Color = Color::Rgb {
    r: 97,
    g: 218,
    b: 251,
};
const LOGO_SHADE: Color = Color::Rgb {
    r: 40,
    g: 110,
    b: 140,
};
const ORBIT_TILTS: [f64; 3] = [0.0, 60.0, 120.0];
const ORBIT_MINOR_AXIS: f64 = 0.38;
const ORBIT_SEGMENTS: usize = 72;
const NUCLEUS_RADIUS: f64 = 0.16;

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Ignored,
    Redraw,
    Quit,
}

/// Spinning logo widget
pub struct IconWidget {
    state: AppState,
    scheduler: Scheduler,
    viewport: Viewport,
    rotation_period: Duration,
    stationary_period: Duration,
    mounted: bool,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl IconWidget {
    /// Creates the widget and starts the periodic tasks its toggles ask for
    pub fn mount(settings: &Settings, viewport: Viewport, now: Instant) -> Self {
        let mut widget = IconWidget {
            state: AppState::new(&settings.initial, now),
            scheduler: Scheduler::new(),
            viewport,
            rotation_period: settings.rotation_period,
            stationary_period: settings.stationary_period,
            mounted: true,
            frames_since_last_update: 0,
            last_fps_calculation: now,
            fps: 0.0,
        };
        widget.sync_timers(now);
        info!(
            width = viewport.width,
            height = viewport.height,
            timers = widget.scheduler.active_count(),
            "widget mounted"
        );
        widget
    }

    /// Releases every periodic task
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.scheduler.cancel_all();
        self.mounted = false;
        info!("widget unmounted");
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn layout(&self) -> Layout {
        Layout::compute(self.viewport, &self.state)
    }

    pub fn is_timer_active(&self, kind: TimerKind) -> bool {
        self.scheduler.is_active(kind)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Dispatches every tick that came due. Returns whether anything changed.
    pub fn run_due_timers(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for tick in self.scheduler.due(now) {
            changed |= self.dispatch(WidgetEvent::Tick(tick), now) == Reaction::Redraw;
        }
        changed
    }

    /// Runs the reaction registered for an event
    pub fn dispatch(&mut self, event: WidgetEvent, now: Instant) -> Reaction {
        if !self.mounted {
            return Reaction::Ignored;
        }
        if !matches!(event, WidgetEvent::Tick(_) | WidgetEvent::PointerMove { .. }) {
            debug!(?event, "dispatch");
        }

        match event {
            WidgetEvent::Tick(Tick {
                kind: TimerKind::Rotation,
                count,
            }) => {
                self.state.rotation_tick(count);
                Reaction::Redraw
            }
            WidgetEvent::Tick(Tick {
                kind: TimerKind::Stationary,
                ..
            }) => {
                self.state.stationary_tick(now);
                Reaction::Redraw
            }
            WidgetEvent::PointerMove { column, row } => {
                self.state.pointer_moved(
                    f64::from(column),
                    f64::from(row),
                    f64::from(self.viewport.width),
                    f64::from(self.viewport.height),
                    now,
                );
                Reaction::Redraw
            }
            WidgetEvent::PointerLeave { has_related_target } => {
                if self.state.pointer_left(has_related_target) {
                    Reaction::Redraw
                } else {
                    Reaction::Ignored
                }
            }
            WidgetEvent::HoverEnter => {
                self.state.hover_entered();
                Reaction::Redraw
            }
            WidgetEvent::HoverLeave => {
                self.state.hover_left();
                Reaction::Redraw
            }
            WidgetEvent::IconClick => {
                if self.state.icon_clicked() {
                    Reaction::Redraw
                } else {
                    Reaction::Ignored
                }
            }
            WidgetEvent::ToggleSidebar => {
                self.state.toggle_sidebar();
                Reaction::Redraw
            }
            WidgetEvent::ToggleRotate => {
                let enabled = self.state.toggle_rotate();
                info!(enabled, "rotation toggled");
                self.sync_timers(now);
                Reaction::Redraw
            }
            WidgetEvent::ToggleSize => {
                let enabled = self.state.toggle_size();
                info!(enabled, "size adjustment toggled");
                Reaction::Redraw
            }
            WidgetEvent::ToggleStationary => {
                let enabled = self.state.toggle_stationary(now);
                info!(enabled, "stationary timer toggled");
                self.sync_timers(now);
                Reaction::Redraw
            }
            WidgetEvent::ToggleDebug => {
                self.state.toggle_debug();
                Reaction::Redraw
            }
            WidgetEvent::SetRotationSpeed(speed) => self.change_speed(speed, now),
            WidgetEvent::AdjustRotationSpeed(delta) => {
                let speed = i32::from(self.state.rotation_speed()) + delta;
                self.change_speed(speed, now)
            }
            WidgetEvent::Resize { width, height } => {
                self.viewport = Viewport::new(width, height);
                debug!(width, height, "viewport resized");
                Reaction::Redraw
            }
            WidgetEvent::Quit => Reaction::Quit,
        }
    }

    fn change_speed(&mut self, speed: i32, now: Instant) -> Reaction {
        if !self.state.set_rotation_speed(speed) {
            return Reaction::Ignored;
        }
        info!(speed = self.state.rotation_speed(), "rotation speed changed");
        // Re-arm so the new speed starts on a fresh period
        if self.scheduler.is_active(TimerKind::Rotation) {
            self.scheduler
                .start(TimerKind::Rotation, self.rotation_period, now);
        }
        Reaction::Redraw
    }

    /// Starts or cancels each periodic task to match its toggle
    fn sync_timers(&mut self, now: Instant) {
        let wanted = [
            (
                TimerKind::Rotation,
                self.state.rotate_enabled(),
                self.rotation_period,
            ),
            (
                TimerKind::Stationary,
                self.state.stationary_enabled(),
                self.stationary_period,
            ),
        ];
        for (kind, enabled, period) in wanted {
            match (enabled, self.scheduler.is_active(kind)) {
                (true, false) => self.scheduler.start(kind, period, now),
                (false, true) => {
                    self.scheduler.cancel(kind);
                }
                _ => {}
            }
        }
    }

    /// Computes the projected logo outline for the current state
    fn compute_logo_vertices(&self, layout: &Layout) -> Vec<Vec<Vertex>> {
        let center = layout.icon_center;
        let radius = layout.icon_radius;
        let angle = self.state.angle();

        ORBIT_TILTS
            .iter()
            .map(|&tilt| {
                ellipse_points(1.0, ORBIT_MINOR_AXIS, tilt, ORBIT_SEGMENTS)
                    .iter()
                    .map(|point| {
                        let position = rotate_point(point, angle);
                        Vertex {
                            position,
                            screen_position: [
                                center[0] + position[0] * radius * CELL_ASPECT,
                                center[1] + position[1] * radius,
                            ],
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn update_fps(&mut self, now: Instant) {
        self.frames_since_last_update += 1;
        let duration = now.saturating_duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
    }

    /// Paints one frame
    pub fn render(&mut self, now: Instant) -> Canvas {
        self.update_fps(now);

        let layout = self.layout();
        let mut canvas = Canvas::new(
            usize::from(self.viewport.width),
            usize::from(self.viewport.height),
        );

        self.draw_logo(&mut canvas, &layout);

        if self.state.show_rotation_label() {
            canvas.draw_text_centered(layout.label_row, ROTATION_HINT, Some(Color::Yellow));
        }

        if self.state.stationary_enabled() {
            for (i, line) in stationary_lines(&self.state).iter().enumerate() {
                canvas.draw_text_centered(layout.timer_row + i as isize, line, Some(Color::White));
            }
        }

        if let Some(sidebar) = layout.sidebar {
            self.draw_sidebar(&mut canvas, &sidebar);
        }

        let button = layout.toggle_button;
        canvas.draw_text(
            button.x as isize,
            button.y as isize,
            &toggle_button_text(self.state.sidebar_visible()),
            Some(Color::Green),
        );

        if self.state.debug() {
            self.draw_debug(&mut canvas);
        }

        canvas
    }

    fn draw_logo(&self, canvas: &mut Canvas, layout: &Layout) {
        for orbit in self.compute_logo_vertices(layout) {
            for pair in orbit.windows(2) {
                // Far half of each orbit is drawn darker
                let color = if pair[0].position[1] >= 0.0 {
                    LOGO_COLOR
                } else {
                    LOGO_SHADE
                };
                draw_line(
                    pair[0].screen_position[0],
                    pair[0].screen_position[1],
                    pair[1].screen_position[0],
                    pair[1].screen_position[1],
                    canvas,
                    '•',
                    Some(color),
                );
            }
        }

        // Nucleus
        let [cx, cy] = layout.icon_center;
        let radius = (layout.icon_radius * NUCLEUS_RADIUS).max(0.5);
        let rows = radius.ceil() as isize;
        let cols = (radius * CELL_ASPECT).ceil() as isize;
        for dy in -rows..=rows {
            for dx in -cols..=cols {
                let nx = dx as f64 / (radius * CELL_ASPECT);
                let ny = dy as f64 / radius;
                if nx * nx + ny * ny <= 1.0 {
                    canvas.put(cx as isize + dx, cy as isize + dy, '@', Some(LOGO_COLOR));
                }
            }
        }
    }

    fn draw_sidebar(&self, canvas: &mut Canvas, sidebar: &SidebarLayout) {
        let panel = sidebar.panel;
        for row in panel.y..panel.y + panel.height {
            for col in panel.x..panel.x + panel.width {
                canvas.put(col as isize, row as isize, ' ', None);
            }
        }
        draw_frame(
            canvas,
            panel.x as isize,
            panel.y as isize,
            panel.width as isize,
            panel.height as isize,
            Some(Color::DarkGrey),
        );

        let at = |rect: Rect| (rect.x as isize, rect.y as isize);
        let text = Some(Color::White);

        let (x, y) = at(sidebar.title);
        canvas.draw_text(x, y, "Settings", Some(Color::Cyan));

        let (x, y) = at(sidebar.rotate_checkbox);
        canvas.draw_text(x, y, &checkbox("Rotate Icon", self.state.rotate_enabled()), text);

        let (x, y) = at(sidebar.speed_label);
        canvas.draw_text(
            x,
            y,
            &format!("Rotate speed: {}", self.state.rotation_speed()),
            text,
        );

        let (x, y) = at(sidebar.speed_slider);
        let fill = sidebar.slider_fill(self.state.rotation_speed());
        for i in 0..sidebar.speed_slider.width {
            let symbol = if i < fill { '█' } else { '░' };
            canvas.put(x + i as isize, y, symbol, Some(Color::Cyan));
        }

        let (x, y) = at(sidebar.size_checkbox);
        canvas.draw_text(x, y, &checkbox("Adjust Icon Size", self.state.size_setting()), text);

        let (x, y) = at(sidebar.stationary_checkbox);
        canvas.draw_text(
            x,
            y,
            &checkbox("Show Stationary Timer", self.state.stationary_enabled()),
            text,
        );

        let (x, y) = at(sidebar.help);
        canvas.draw_text(x, y, "keys: s r z t +/- d q", Some(Color::DarkGrey));
    }

    fn draw_debug(&self, canvas: &mut Canvas) {
        let lines = [
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!("Angle: {:.2}", self.state.angle()),
            format!("Direction: {:+.1}", self.state.rotation_direction()),
            format!("Size: {:.1}", self.state.icon_size()),
            format!("Speed: {}", self.state.rotation_speed()),
            format!("Timers: {}", self.scheduler.active_count()),
            format!("FPS: {:.2}", self.fps),
        ];
        let x = (canvas.width() as isize - 24).max(0);
        for (i, line) in lines.iter().enumerate() {
            canvas.draw_text(x, 1 + i as isize, line, Some(Color::White));
        }
    }
}

impl Drop for IconWidget {
    fn drop(&mut self) {
        self.unmount();
    }
}

pub fn toggle_button_text(sidebar_visible: bool) -> String {
    format!(
        "[ {} Settings ]",
        if sidebar_visible { "Hide" } else { "Show" }
    )
}

fn checkbox(label: &str, checked: bool) -> String {
    format!("[{}] {}", if checked { 'x' } else { ' ' }, label)
}

/// Text shown under the icon while the stationary timer is enabled
pub fn stationary_lines(state: &AppState) -> Vec<String> {
    if state.mouse_left_window() {
        vec![
            "The mouse has moved outside the application window.".to_string(),
            "Please return it to the view to continue interacting with the app.".to_string(),
        ]
    } else {
        vec![format!(
            "Stationary: {:.1} s",
            state.stationary_time().as_secs_f64()
        )]
    }
}
