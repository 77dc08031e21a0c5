use crate::math::{icon_size_for_pointer, rotation_step};
use std::time::{Duration, Instant};
use tracing::debug;

pub const MIN_ROTATION_SPEED: u8 = 1;
pub const MAX_ROTATION_SPEED: u8 = 100;

/// Starting values for a freshly mounted widget
#[derive(Debug, Clone, PartialEq)]
pub struct InitialState {
    pub rotation_speed: u8,
    pub rotate_enabled: bool,
    pub size_enabled: bool,
    pub stationary_enabled: bool,
    pub sidebar_visible: bool,
    pub debug: bool,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            rotation_speed: 10,
            rotate_enabled: true,
            size_enabled: true,
            stationary_enabled: true,
            sidebar_visible: false,
            debug: false,
        }
    }
}

/// Application state
///
/// Fields only change through the reaction methods below; every reaction
/// takes the current instant so behavior is reproducible in tests.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current rotation angle in degrees, unbounded
    angle: f64,
    /// Signed angular step multiplier, negated on click
    rotation_direction: f64,
    /// Icon size in [50, 200]
    icon_size: f64,
    /// Time since the pointer last moved
    stationary_time: Duration,
    last_move: Instant,
    /// Rotation speed in [1, 100]
    rotation_speed: u8,
    rotate_enabled: bool,
    size_enabled: bool,
    stationary_enabled: bool,
    /// Pointer left the viewport
    mouse_left_window: bool,
    sidebar_visible: bool,
    icon_hovered: bool,
    /// `size_enabled` as it was before the hover suspended it
    size_before_hover: bool,
    /// Debug overlay
    debug: bool,
}

impl AppState {
    pub fn new(initial: &InitialState, now: Instant) -> Self {
        Self {
            angle: 0.0,
            rotation_direction: 0.5,
            icon_size: 120.0,
            stationary_time: Duration::ZERO,
            last_move: now,
            rotation_speed: initial
                .rotation_speed
                .clamp(MIN_ROTATION_SPEED, MAX_ROTATION_SPEED),
            rotate_enabled: initial.rotate_enabled,
            size_enabled: initial.size_enabled,
            stationary_enabled: initial.stationary_enabled,
            mouse_left_window: false,
            sidebar_visible: initial.sidebar_visible,
            icon_hovered: false,
            size_before_hover: initial.size_enabled,
            debug: initial.debug,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn rotation_direction(&self) -> f64 {
        self.rotation_direction
    }

    pub fn icon_size(&self) -> f64 {
        self.icon_size
    }

    pub fn stationary_time(&self) -> Duration {
        self.stationary_time
    }

    pub fn rotation_speed(&self) -> u8 {
        self.rotation_speed
    }

    pub fn rotate_enabled(&self) -> bool {
        self.rotate_enabled
    }

    pub fn size_enabled(&self) -> bool {
        self.size_enabled
    }

    /// Whether size adjustment is on in the settings panel, ignoring the
    /// temporary suspension while the icon is hovered
    pub fn size_setting(&self) -> bool {
        if self.icon_hovered {
            self.size_before_hover
        } else {
            self.size_enabled
        }
    }

    pub fn stationary_enabled(&self) -> bool {
        self.stationary_enabled
    }

    pub fn mouse_left_window(&self) -> bool {
        self.mouse_left_window
    }

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    pub fn icon_hovered(&self) -> bool {
        self.icon_hovered
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// The reversal hint is shown while hovering a spinning icon
    pub fn show_rotation_label(&self) -> bool {
        self.icon_hovered && self.rotate_enabled
    }

    /// Advances the angle by `ticks` rotation steps
    pub fn rotation_tick(&mut self, ticks: u32) {
        if !self.rotate_enabled {
            return;
        }
        let step = rotation_step(self.rotation_direction, self.rotation_speed);
        self.angle += step * f64::from(ticks);
    }

    pub fn stationary_tick(&mut self, now: Instant) {
        if !self.stationary_enabled {
            return;
        }
        self.stationary_time = now.saturating_duration_since(self.last_move);
    }

    /// Pointer moved to `(x, y)` inside a `width` x `height` viewport
    pub fn pointer_moved(&mut self, x: f64, y: f64, width: f64, height: f64, now: Instant) {
        self.mouse_left_window = false;
        if self.stationary_enabled {
            self.last_move = now;
            self.stationary_time = Duration::ZERO;
        }
        if self.size_enabled {
            self.icon_size = icon_size_for_pointer(x, y, width, height);
        }
    }

    /// A pointer-leave event. Only a leave without a related target is a
    /// viewport exit; returns whether it was one.
    pub fn pointer_left(&mut self, has_related_target: bool) -> bool {
        if has_related_target {
            return false;
        }
        self.mouse_left_window = true;
        self.stationary_time = Duration::ZERO;
        debug!("pointer left the viewport");
        true
    }

    /// Reverses the spin. A no-op while rotation is disabled.
    pub fn icon_clicked(&mut self) -> bool {
        if !self.rotate_enabled {
            return false;
        }
        self.rotation_direction = -self.rotation_direction;
        debug!(direction = self.rotation_direction, "rotation reversed");
        true
    }

    pub fn hover_entered(&mut self) {
        if self.icon_hovered {
            return;
        }
        self.icon_hovered = true;
        self.size_before_hover = self.size_enabled;
        self.size_enabled = false;
    }

    pub fn hover_left(&mut self) {
        if !self.icon_hovered {
            return;
        }
        self.icon_hovered = false;
        self.size_enabled = self.size_before_hover;
    }

    pub fn toggle_rotate(&mut self) -> bool {
        self.rotate_enabled = !self.rotate_enabled;
        self.rotate_enabled
    }

    /// Flips the size setting. While hovered the change lands on the saved
    /// value and takes effect on un-hover.
    pub fn toggle_size(&mut self) -> bool {
        if self.icon_hovered {
            self.size_before_hover = !self.size_before_hover;
            self.size_before_hover
        } else {
            self.size_enabled = !self.size_enabled;
            self.size_enabled
        }
    }

    /// Flips the stationary timer; enabling starts from a fresh reset.
    pub fn toggle_stationary(&mut self, now: Instant) -> bool {
        self.stationary_enabled = !self.stationary_enabled;
        if self.stationary_enabled {
            self.last_move = now;
            self.stationary_time = Duration::ZERO;
        }
        self.stationary_enabled
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_visible = !self.sidebar_visible;
        self.sidebar_visible
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }

    /// Sets the speed, clamped to the slider bounds. Returns whether it changed.
    pub fn set_rotation_speed(&mut self, speed: i32) -> bool {
        let speed = speed.clamp(
            i32::from(MIN_ROTATION_SPEED),
            i32::from(MAX_ROTATION_SPEED),
        ) as u8;
        if speed == self.rotation_speed {
            return false;
        }
        self.rotation_speed = speed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{MAX_ICON_SIZE, MIN_ICON_SIZE};

    fn state() -> (AppState, Instant) {
        let now = Instant::now();
        (AppState::new(&InitialState::default(), now), now)
    }

    #[test]
    fn test_initial_values() {
        let (state, _) = state();
        assert_eq!(state.angle(), 0.0);
        assert_eq!(state.rotation_direction(), 0.5);
        assert_eq!(state.icon_size(), 120.0);
        assert_eq!(state.rotation_speed(), 10);
        assert!(state.rotate_enabled());
        assert!(state.size_enabled());
        assert!(state.stationary_enabled());
        assert!(!state.sidebar_visible());
        assert!(!state.mouse_left_window());
    }

    #[test]
    fn test_rotation_is_monotonic_and_proportional_to_speed() {
        for speed in [1, 10, 55, 100] {
            let (mut state, _) = state();
            state.set_rotation_speed(speed);
            let mut previous = state.angle();
            for _ in 0..5 {
                state.rotation_tick(1);
                let step = state.angle() - previous;
                assert!(step > 0.0);
                assert!((step - 0.5 * f64::from(speed) / 10.0).abs() < 1e-9);
                previous = state.angle();
            }
        }
    }

    #[test]
    fn test_rotation_tick_ignored_when_disabled() {
        let (mut state, _) = state();
        state.toggle_rotate();
        state.rotation_tick(3);
        assert_eq!(state.angle(), 0.0);
    }

    #[test]
    fn test_click_negates_direction() {
        let (mut state, _) = state();
        assert!(state.icon_clicked());
        assert_eq!(state.rotation_direction(), -0.5);
        state.rotation_tick(1);
        assert!(state.angle() < 0.0);
        assert!(state.icon_clicked());
        assert_eq!(state.rotation_direction(), 0.5);
    }

    #[test]
    fn test_click_while_rotation_disabled_is_noop() {
        let (mut state, _) = state();
        state.toggle_rotate();
        assert!(!state.icon_clicked());
        assert_eq!(state.rotation_direction(), 0.5);
    }

    #[test]
    fn test_pointer_position_maps_to_size() {
        let (mut state, now) = state();
        state.pointer_moved(40.0, 12.0, 80.0, 24.0, now);
        assert_eq!(state.icon_size(), MIN_ICON_SIZE);
        state.pointer_moved(0.0, 0.0, 80.0, 24.0, now);
        assert!((state.icon_size() - MAX_ICON_SIZE).abs() < 1e-9);
    }

    #[test]
    fn test_pointer_move_keeps_size_when_disabled() {
        let (mut state, now) = state();
        state.toggle_size();
        state.pointer_moved(0.0, 0.0, 80.0, 24.0, now);
        assert_eq!(state.icon_size(), 120.0);
    }

    #[test]
    fn test_viewport_exit_and_return() {
        let (mut state, now) = state();
        state.stationary_tick(now + Duration::from_millis(700));
        assert_eq!(state.stationary_time(), Duration::from_millis(700));

        assert!(state.pointer_left(false));
        assert!(state.mouse_left_window());
        assert_eq!(state.stationary_time(), Duration::ZERO);

        state.pointer_moved(1.0, 1.0, 80.0, 24.0, now + Duration::from_secs(1));
        assert!(!state.mouse_left_window());
    }

    #[test]
    fn test_leave_with_related_target_is_ignored() {
        let (mut state, now) = state();
        state.stationary_tick(now + Duration::from_millis(300));
        assert!(!state.pointer_left(true));
        assert!(!state.mouse_left_window());
        assert_eq!(state.stationary_time(), Duration::from_millis(300));
    }

    #[test]
    fn test_pointer_move_resets_stationary_time() {
        let (mut state, now) = state();
        state.stationary_tick(now + Duration::from_millis(500));
        state.pointer_moved(3.0, 3.0, 80.0, 24.0, now + Duration::from_millis(600));
        assert_eq!(state.stationary_time(), Duration::ZERO);

        state.stationary_tick(now + Duration::from_millis(800));
        assert_eq!(state.stationary_time(), Duration::from_millis(200));
    }

    #[test]
    fn test_stationary_disable_freezes_and_enable_resets() {
        let (mut state, now) = state();
        state.stationary_tick(now + Duration::from_millis(400));
        assert!(!state.toggle_stationary(now + Duration::from_millis(450)));

        state.stationary_tick(now + Duration::from_secs(3));
        assert_eq!(state.stationary_time(), Duration::from_millis(400));

        let enabled_at = now + Duration::from_secs(5);
        assert!(state.toggle_stationary(enabled_at));
        assert_eq!(state.stationary_time(), Duration::ZERO);
        state.stationary_tick(enabled_at + Duration::from_millis(100));
        assert_eq!(state.stationary_time(), Duration::from_millis(100));
    }

    #[test]
    fn test_hover_suspends_and_restores_size() {
        let (mut state, now) = state();
        state.hover_entered();
        assert!(!state.size_enabled());
        assert!(state.size_setting());
        assert!(state.show_rotation_label());

        state.pointer_moved(0.0, 0.0, 80.0, 24.0, now);
        assert_eq!(state.icon_size(), 120.0);

        state.hover_left();
        assert!(state.size_enabled());
        assert!(!state.show_rotation_label());
    }

    #[test]
    fn test_hover_keeps_size_disabled_if_it_was_off() {
        let (mut state, _) = state();
        state.toggle_size();
        state.hover_entered();
        state.hover_left();
        assert!(!state.size_enabled());
    }

    #[test]
    fn test_size_toggle_while_hovered_applies_on_unhover() {
        let (mut state, _) = state();
        state.hover_entered();
        assert!(!state.toggle_size());
        assert!(!state.size_enabled());
        state.hover_left();
        assert!(!state.size_enabled());
    }

    #[test]
    fn test_rotation_label_hidden_when_rotation_disabled() {
        let (mut state, _) = state();
        state.toggle_rotate();
        state.hover_entered();
        assert!(!state.show_rotation_label());
    }

    #[test]
    fn test_sidebar_toggle_leaves_icon_state_alone() {
        let (mut state, _) = state();
        state.rotation_tick(4);
        let angle = state.angle();
        assert!(state.toggle_sidebar());
        assert!(!state.toggle_sidebar());
        assert_eq!(state.angle(), angle);
        assert_eq!(state.icon_size(), 120.0);
        assert_eq!(state.rotation_direction(), 0.5);
        assert!(state.rotate_enabled());
    }

    #[test]
    fn test_speed_is_clamped() {
        let (mut state, _) = state();
        assert!(state.set_rotation_speed(0));
        assert_eq!(state.rotation_speed(), MIN_ROTATION_SPEED);
        assert!(state.set_rotation_speed(500));
        assert_eq!(state.rotation_speed(), MAX_ROTATION_SPEED);
        assert!(!state.set_rotation_speed(100));
    }
}
