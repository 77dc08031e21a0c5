//! Placement of the icon and every control, shared by rendering and hit
//! testing so a click always lands on what was drawn.

use crate::math::MAX_ICON_SIZE;
use crate::state::{AppState, MAX_ROTATION_SPEED, MIN_ROTATION_SPEED};

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f64 = 2.0;

const SIDEBAR_WIDTH: u16 = 32;
const SIDEBAR_TOP: u16 = 2;
const SIDEBAR_HEIGHT: u16 = 14;
const SLIDER_WIDTH: u16 = 24;

/// Visible terminal area, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const FALLBACK: Viewport = Viewport {
        width: 80,
        height: 24,
    };

    pub fn new(width: u16, height: u16) -> Self {
        Viewport { width, height }
    }

    /// Asks the terminal for its size
    pub fn detect() -> Self {
        match termsize::get() {
            Some(size) if size.cols > 0 && size.rows > 0 => Viewport::new(size.cols, size.rows),
            _ => Viewport::FALLBACK,
        }
    }

    pub fn center(&self) -> [f64; 2] {
        [f64::from(self.width) / 2.0, f64::from(self.height) / 2.0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && u32::from(column) < u32::from(self.x) + u32::from(self.width)
            && u32::from(row) < u32::from(self.y) + u32::from(self.height)
    }
}

/// Settings panel rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarLayout {
    pub panel: Rect,
    pub title: Rect,
    pub rotate_checkbox: Rect,
    pub speed_label: Rect,
    pub speed_slider: Rect,
    pub size_checkbox: Rect,
    pub stationary_checkbox: Rect,
    pub help: Rect,
}

impl SidebarLayout {
    fn new() -> Self {
        let x = 1;
        let inner = x + 2;
        let row = |offset: u16, width: u16| Rect::new(inner, SIDEBAR_TOP + offset, width, 1);
        SidebarLayout {
            panel: Rect::new(x, SIDEBAR_TOP, SIDEBAR_WIDTH, SIDEBAR_HEIGHT),
            title: row(1, 8),
            rotate_checkbox: row(3, SIDEBAR_WIDTH - 4),
            speed_label: row(4, SIDEBAR_WIDTH - 4),
            speed_slider: row(5, SLIDER_WIDTH),
            size_checkbox: row(7, SIDEBAR_WIDTH - 4),
            stationary_checkbox: row(9, SIDEBAR_WIDTH - 4),
            help: row(11, SIDEBAR_WIDTH - 4),
        }
    }

    /// Speed selected by a click at `column` on the slider
    pub fn speed_at(&self, column: u16) -> i32 {
        let slider = self.speed_slider;
        let track = i32::from(slider.width.saturating_sub(1)).max(1);
        let offset = (i32::from(column) - i32::from(slider.x)).clamp(0, track);
        let range = i32::from(MAX_ROTATION_SPEED - MIN_ROTATION_SPEED);
        i32::from(MIN_ROTATION_SPEED) + (offset * range + track / 2) / track
    }

    /// Number of filled slider cells for a speed
    pub fn slider_fill(&self, speed: u8) -> u16 {
        let track = u32::from(self.speed_slider.width.saturating_sub(1));
        let range = u32::from(MAX_ROTATION_SPEED - MIN_ROTATION_SPEED);
        let offset = u32::from(speed.saturating_sub(MIN_ROTATION_SPEED));
        (1 + (offset * track + range / 2) / range) as u16
    }
}

/// Where everything sits for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub toggle_button: Rect,
    pub sidebar: Option<SidebarLayout>,
    /// Icon center in cell coordinates
    pub icon_center: [f64; 2],
    /// Icon half-height in rows
    pub icon_radius: f64,
    /// Icon bounding box (hover and click target)
    pub icon: Rect,
    pub label_row: isize,
    pub timer_row: isize,
}

impl Layout {
    pub fn compute(viewport: Viewport, state: &AppState) -> Self {
        let center = viewport.center();
        // Largest radius that keeps the icon clear of the button row and the
        // timer line, in both directions
        let max_radius = (f64::from(viewport.height) / 2.0 - 3.0)
            .min(f64::from(viewport.width) / (2.0 * CELL_ASPECT) - 1.0)
            .max(1.0);
        let radius = max_radius * state.icon_size() / MAX_ICON_SIZE;
        let radius_cols = radius * CELL_ASPECT;

        let left = (center[0] - radius_cols).floor().max(0.0);
        let top = (center[1] - radius).floor().max(0.0);
        let right = (center[0] + radius_cols).ceil().min(f64::from(viewport.width));
        let bottom = (center[1] + radius).ceil().min(f64::from(viewport.height));
        let icon = Rect::new(
            left as u16,
            top as u16,
            (right - left).max(1.0) as u16,
            (bottom - top).max(1.0) as u16,
        );

        Layout {
            toggle_button: Rect::new(1, 0, 17, 1),
            sidebar: state.sidebar_visible().then(SidebarLayout::new),
            icon_center: center,
            icon_radius: radius,
            icon,
            label_row: (top as isize - 2).max(1),
            timer_row: (bottom as isize + 1).min(viewport.height as isize - 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InitialState;
    use std::time::Instant;

    fn state() -> AppState {
        AppState::new(&InitialState::default(), Instant::now())
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 4));
        assert!(!rect.contains(6, 4));
        assert!(!rect.contains(5, 5));
        assert!(!rect.contains(1, 3));
    }

    #[test]
    fn test_icon_is_centered() {
        let layout = Layout::compute(Viewport::new(80, 24), &state());
        assert!(layout.icon.contains(40, 12));
        assert!(!layout.icon.contains(0, 0));
        assert_eq!(layout.icon_center, [40.0, 12.0]);
    }

    #[test]
    fn test_icon_grows_with_size() {
        let now = Instant::now();
        let mut small = AppState::new(&InitialState::default(), now);
        small.pointer_moved(40.0, 12.0, 80.0, 24.0, now);
        let mut large = AppState::new(&InitialState::default(), now);
        large.pointer_moved(0.0, 0.0, 80.0, 24.0, now);

        let viewport = Viewport::new(80, 24);
        let small = Layout::compute(viewport, &small);
        let large = Layout::compute(viewport, &large);
        assert!(large.icon_radius > small.icon_radius);
        assert!(large.icon.width > small.icon.width);
    }

    #[test]
    fn test_sidebar_only_when_visible() {
        let mut state = state();
        assert!(Layout::compute(Viewport::FALLBACK, &state).sidebar.is_none());
        state.toggle_sidebar();
        assert!(Layout::compute(Viewport::FALLBACK, &state).sidebar.is_some());
    }

    #[test]
    fn test_slider_maps_columns_to_speed() {
        let sidebar = SidebarLayout::new();
        let slider = sidebar.speed_slider;
        assert_eq!(sidebar.speed_at(slider.x), 1);
        assert_eq!(sidebar.speed_at(slider.x + slider.width - 1), 100);
        assert_eq!(sidebar.speed_at(0), 1);
        assert_eq!(sidebar.speed_at(200), 100);
    }

    #[test]
    fn test_slider_fill_bounds() {
        let sidebar = SidebarLayout::new();
        assert_eq!(sidebar.slider_fill(1), 1);
        assert_eq!(sidebar.slider_fill(100), sidebar.speed_slider.width);
    }
}
