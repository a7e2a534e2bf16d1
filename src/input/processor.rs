//! Converts raw platform events into viewer commands.
//!
//! The `InputProcessor` owns all transient input state (pointer tracking,
//! drag detection, double-click timing). It is the only thing that sits
//! between raw window events and
//! [`ViewerSession::execute`](crate::viewer::ViewerSession::execute).

use glam::Vec2;
use web_time::{Duration, Instant};

use super::event::{InputEvent, MouseButton};
use super::mouse::{ClickResult, ClickTracker};
use crate::options::InputOptions;
use crate::viewer::ViewerCommand;

/// Converts raw window events into [`ViewerCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input_processor.handle_event(event, Instant::now()) {
///     session.execute(cmd, Instant::now());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    /// Pointer tracking and double-click state machine.
    clicks: ClickTracker,
    /// Whether the primary mouse button is currently held.
    mouse_pressed: bool,
}

impl InputProcessor {
    /// Create a processor with the given gesture thresholds.
    #[must_use]
    pub fn new(options: &InputOptions) -> Self {
        Self {
            clicks: ClickTracker::new(
                Duration::from_millis(options.double_click_ms),
                options.click_slop_px,
            ),
            mouse_pressed: false,
        }
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> Vec2 {
        self.clicks.mouse_pos
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Whether the current press has moved far enough to count as a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.clicks.is_dragging()
    }

    /// Process a raw input event received at `now` and return zero or one
    /// commands.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        now: Instant,
    ) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed, now)
            }
            InputEvent::Scroll { delta } => Some(ViewerCommand::Zoom { delta }),
            InputEvent::DoubleClick { x, y } => {
                Some(ViewerCommand::Pick { x, y })
            }
            InputEvent::Resized { width, height } => {
                Some(ViewerCommand::Resize { width, height })
            }
        }
    }

    /// Cursor moved: orbit while the primary button is held.
    fn handle_cursor_moved(&mut self, pos: Vec2) -> Option<ViewerCommand> {
        let delta = self.clicks.handle_mouse_position(pos);
        if self.mouse_pressed && delta != Vec2::ZERO {
            return Some(ViewerCommand::Orbit { delta });
        }
        None
    }

    /// Track the primary button and turn the second of two quick releases
    /// into a pick.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        now: Instant,
    ) -> Option<ViewerCommand> {
        if button != MouseButton::Left {
            return None;
        }

        if pressed {
            self.clicks.handle_mouse_down();
            self.mouse_pressed = true;
            return None;
        }

        self.mouse_pressed = false;
        match self.clicks.process_mouse_up(now) {
            ClickResult::DoubleClick { position } => Some(ViewerCommand::Pick {
                x: position.x,
                y: position.y,
            }),
            ClickResult::NoAction | ClickResult::SingleClick => None,
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(&InputOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(p: &mut InputProcessor, now: Instant) -> Option<ViewerCommand> {
        p.handle_event(
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            },
            now,
        )
    }

    fn release(p: &mut InputProcessor, now: Instant) -> Option<ViewerCommand> {
        p.handle_event(
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            },
            now,
        )
    }

    #[test]
    fn drag_orbits_and_suppresses_click() {
        let mut p = InputProcessor::default();
        let now = Instant::now();
        assert!(p
            .handle_event(InputEvent::CursorMoved { x: 100.0, y: 100.0 }, now)
            .is_none());
        assert!(press(&mut p, now).is_none());
        assert!(p.mouse_pressed());
        let cmd =
            p.handle_event(InputEvent::CursorMoved { x: 130.0, y: 90.0 }, now);
        assert_eq!(
            cmd,
            Some(ViewerCommand::Orbit {
                delta: Vec2::new(30.0, -10.0)
            })
        );
        assert!(p.is_dragging());
        assert!(release(&mut p, now).is_none());
        assert!(!p.mouse_pressed());
    }

    #[test]
    fn two_clicks_produce_a_pick() {
        let mut p = InputProcessor::default();
        let now = Instant::now();
        let _ = p.handle_event(InputEvent::CursorMoved { x: 40.0, y: 50.0 }, now);
        assert!(press(&mut p, now).is_none());
        assert!(release(&mut p, now).is_none());
        let later = now + Duration::from_millis(150);
        assert!(press(&mut p, later).is_none());
        assert_eq!(
            release(&mut p, later),
            Some(ViewerCommand::Pick { x: 40.0, y: 50.0 })
        );
    }

    #[test]
    fn host_events_pass_through() {
        let mut p = InputProcessor::default();
        let now = Instant::now();
        assert_eq!(
            p.handle_event(InputEvent::DoubleClick { x: 1.0, y: 2.0 }, now),
            Some(ViewerCommand::Pick { x: 1.0, y: 2.0 })
        );
        assert_eq!(
            p.handle_event(InputEvent::Scroll { delta: -1.0 }, now),
            Some(ViewerCommand::Zoom { delta: -1.0 })
        );
        assert_eq!(
            p.handle_event(
                InputEvent::Resized {
                    width: 800,
                    height: 600
                },
                now
            ),
            Some(ViewerCommand::Resize {
                width: 800,
                height: 600
            })
        );
    }

    #[test]
    fn right_button_is_ignored() {
        let mut p = InputProcessor::default();
        let now = Instant::now();
        let cmd = p.handle_event(
            InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: true,
            },
            now,
        );
        assert!(cmd.is_none());
        assert!(!p.mouse_pressed());
    }
}
