//! Terminal input to widget events.
//!
//! Raw crossterm events carry cell coordinates only; the current layout
//! decides which control (if any) they hit.

use crate::layout::Layout;
use crate::state::AppState;
use crate::timer::Tick;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Everything the widget reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    Tick(Tick),
    PointerMove { column: u16, row: u16 },
    PointerLeave { has_related_target: bool },
    HoverEnter,
    HoverLeave,
    IconClick,
    ToggleSidebar,
    ToggleRotate,
    ToggleSize,
    ToggleStationary,
    ToggleDebug,
    SetRotationSpeed(i32),
    AdjustRotationSpeed(i32),
    Resize { width: u16, height: u16 },
    Quit,
}

/// Translates one terminal event into the widget events it causes, in
/// dispatch order.
pub fn translate(event: &Event, layout: &Layout, state: &AppState) -> Vec<WidgetEvent> {
    match event {
        Event::Key(key) => translate_key(key).into_iter().collect(),
        Event::Mouse(mouse) => translate_mouse(mouse, layout, state),
        // The terminal losing focus is the only viewport exit it reports
        Event::FocusLost => vec![WidgetEvent::PointerLeave {
            has_related_target: false,
        }],
        Event::Resize(width, height) => vec![WidgetEvent::Resize {
            width: *width,
            height: *height,
        }],
        _ => Vec::new(),
    }
}

fn translate_key(key: &KeyEvent) -> Option<WidgetEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(WidgetEvent::Quit),
            _ => None,
        };
    }
    let event = match key.code {
        KeyCode::Esc => WidgetEvent::Quit,
        KeyCode::Enter => WidgetEvent::IconClick,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => WidgetEvent::Quit,
            's' => WidgetEvent::ToggleSidebar,
            'r' => WidgetEvent::ToggleRotate,
            'z' => WidgetEvent::ToggleSize,
            't' => WidgetEvent::ToggleStationary,
            'd' => WidgetEvent::ToggleDebug,
            '+' | '=' => WidgetEvent::AdjustRotationSpeed(1),
            '-' | '_' => WidgetEvent::AdjustRotationSpeed(-1),
            ' ' => WidgetEvent::IconClick,
            _ => return None,
        },
        _ => return None,
    };
    Some(event)
}

fn translate_mouse(mouse: &MouseEvent, layout: &Layout, state: &AppState) -> Vec<WidgetEvent> {
    let (column, row) = (mouse.column, mouse.row);
    let over_sidebar = layout
        .sidebar
        .map(|sidebar| sidebar.panel.contains(column, row))
        .unwrap_or(false);
    let over_icon = !over_sidebar && layout.icon.contains(column, row);

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            let mut events = Vec::with_capacity(3);
            if let (MouseEventKind::Drag(MouseButton::Left), Some(sidebar)) =
                (mouse.kind, layout.sidebar)
            {
                if sidebar.speed_slider.contains(column, row) {
                    events.push(WidgetEvent::SetRotationSpeed(sidebar.speed_at(column)));
                }
            }
            if over_icon && !state.icon_hovered() {
                events.push(WidgetEvent::HoverEnter);
            } else if !over_icon && state.icon_hovered() {
                events.push(WidgetEvent::HoverLeave);
            }
            events.push(WidgetEvent::PointerMove { column, row });
            events
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if layout.toggle_button.contains(column, row) {
                return vec![WidgetEvent::ToggleSidebar];
            }
            if let Some(sidebar) = layout.sidebar.filter(|_| over_sidebar) {
                let hit = if sidebar.rotate_checkbox.contains(column, row) {
                    Some(WidgetEvent::ToggleRotate)
                } else if sidebar.speed_slider.contains(column, row) {
                    Some(WidgetEvent::SetRotationSpeed(sidebar.speed_at(column)))
                } else if sidebar.size_checkbox.contains(column, row) {
                    Some(WidgetEvent::ToggleSize)
                } else if sidebar.stationary_checkbox.contains(column, row) {
                    Some(WidgetEvent::ToggleStationary)
                } else {
                    None
                };
                return hit.into_iter().collect();
            }
            if over_icon {
                vec![WidgetEvent::IconClick]
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Viewport;
    use crate::state::InitialState;
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;
    use std::time::Instant;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn setup(sidebar: bool) -> (AppState, Layout) {
        let mut state = AppState::new(&InitialState::default(), Instant::now());
        if sidebar {
            state.toggle_sidebar();
        }
        let layout = Layout::compute(Viewport::new(80, 24), &state);
        (state, layout)
    }

    #[test]
    fn test_move_outside_icon() {
        let (state, layout) = setup(false);
        let events = translate(&mouse(MouseEventKind::Moved, 0, 20), &layout, &state);
        assert_eq!(events, vec![WidgetEvent::PointerMove { column: 0, row: 20 }]);
    }

    #[test]
    fn test_hover_transitions_precede_move() {
        let (mut state, layout) = setup(false);
        let events = translate(&mouse(MouseEventKind::Moved, 40, 12), &layout, &state);
        assert_eq!(
            events,
            vec![
                WidgetEvent::HoverEnter,
                WidgetEvent::PointerMove { column: 40, row: 12 }
            ]
        );

        state.hover_entered();
        let events = translate(&mouse(MouseEventKind::Moved, 0, 0), &layout, &state);
        assert_eq!(
            events,
            vec![
                WidgetEvent::HoverLeave,
                WidgetEvent::PointerMove { column: 0, row: 0 }
            ]
        );
    }

    #[test]
    fn test_click_on_icon() {
        let (state, layout) = setup(false);
        let events = translate(
            &mouse(MouseEventKind::Down(MouseButton::Left), 40, 12),
            &layout,
            &state,
        );
        assert_eq!(events, vec![WidgetEvent::IconClick]);
    }

    #[test]
    fn test_right_click_ignored() {
        let (state, layout) = setup(false);
        let events = translate(
            &mouse(MouseEventKind::Down(MouseButton::Right), 40, 12),
            &layout,
            &state,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_toggle_button() {
        let (state, layout) = setup(false);
        let button = layout.toggle_button;
        let events = translate(
            &mouse(MouseEventKind::Down(MouseButton::Left), button.x + 2, button.y),
            &layout,
            &state,
        );
        assert_eq!(events, vec![WidgetEvent::ToggleSidebar]);
    }

    #[test]
    fn test_sidebar_controls() {
        let (state, layout) = setup(true);
        let Some(sidebar) = layout.sidebar else {
            panic!("sidebar should be laid out");
        };
        let click = |rect: crate::layout::Rect| {
            translate(
                &mouse(MouseEventKind::Down(MouseButton::Left), rect.x, rect.y),
                &layout,
                &state,
            )
        };
        assert_eq!(click(sidebar.rotate_checkbox), vec![WidgetEvent::ToggleRotate]);
        assert_eq!(click(sidebar.size_checkbox), vec![WidgetEvent::ToggleSize]);
        assert_eq!(click(sidebar.stationary_checkbox), vec![WidgetEvent::ToggleStationary]);
        assert_eq!(click(sidebar.speed_slider), vec![WidgetEvent::SetRotationSpeed(1)]);
        assert!(click(sidebar.title).is_empty());
    }

    #[test]
    fn test_slider_drag() {
        let (state, layout) = setup(true);
        let Some(sidebar) = layout.sidebar else {
            panic!("sidebar should be laid out");
        };
        let slider = sidebar.speed_slider;
        let events = translate(
            &mouse(
                MouseEventKind::Drag(MouseButton::Left),
                slider.x + slider.width - 1,
                slider.y,
            ),
            &layout,
            &state,
        );
        assert_eq!(events[0], WidgetEvent::SetRotationSpeed(100));
        assert!(matches!(events.last(), Some(WidgetEvent::PointerMove { .. })));
    }

    #[test]
    fn test_focus_lost_is_viewport_exit() {
        let (state, layout) = setup(false);
        assert_eq!(
            translate(&Event::FocusLost, &layout, &state),
            vec![WidgetEvent::PointerLeave {
                has_related_target: false
            }]
        );
        assert!(translate(&Event::FocusGained, &layout, &state).is_empty());
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let (state, layout) = setup(false);
        let cases = [
            (KeyCode::Char('s'), WidgetEvent::ToggleSidebar),
            (KeyCode::Char('R'), WidgetEvent::ToggleRotate),
            (KeyCode::Char('z'), WidgetEvent::ToggleSize),
            (KeyCode::Char('t'), WidgetEvent::ToggleStationary),
            (KeyCode::Char('d'), WidgetEvent::ToggleDebug),
            (KeyCode::Char('+'), WidgetEvent::AdjustRotationSpeed(1)),
            (KeyCode::Char('-'), WidgetEvent::AdjustRotationSpeed(-1)),
            (KeyCode::Char(' '), WidgetEvent::IconClick),
            (KeyCode::Enter, WidgetEvent::IconClick),
            (KeyCode::Esc, WidgetEvent::Quit),
            (KeyCode::Char('q'), WidgetEvent::Quit),
        ];
        for (code, expected) in cases {
            assert_eq!(translate(&key(code), &layout, &state), vec![expected]);
        }
    }

    #[test]
    fn test_ctrl_c_quits_and_release_ignored() {
        let (state, layout) = setup(false);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&ctrl_c, &layout, &state), vec![WidgetEvent::Quit]);

        let release = Event::Key(KeyEvent::new_with_kind_and_state(
            KeyCode::Char('s'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));
        assert!(translate(&release, &layout, &state).is_empty());
    }
}
