use glam::Vec2;
use web_time::{Duration, Instant};

/// Result of processing a mouse-up event through the click state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ClickResult {
    /// The press turned into a drag; no click.
    NoAction,
    /// First click of a potential double-click.
    SingleClick,
    /// Second click inside the time and distance window.
    DoubleClick {
        /// Release position of the second click.
        position: Vec2,
    },
}

/// Tracks pointer position, drag state, and the double-click state
/// machine.
#[derive(Debug, Clone)]
pub(crate) struct ClickTracker {
    pub(crate) mouse_pos: Vec2,
    press_pos: Option<Vec2>,
    is_dragging: bool,
    last_click: Option<(Instant, Vec2)>,
    double_click_window: Duration,
    slop_px: f32,
}

impl ClickTracker {
    /// Create a tracker with no click in progress.
    pub(crate) fn new(double_click_window: Duration, slop_px: f32) -> Self {
        Self {
            mouse_pos: Vec2::ZERO,
            press_pos: None,
            is_dragging: false,
            last_click: None,
            double_click_window,
            slop_px,
        }
    }

    /// Record the press position; a new press starts with no drag.
    pub(crate) fn handle_mouse_down(&mut self) {
        self.press_pos = Some(self.mouse_pos);
        self.is_dragging = false;
    }

    /// Update the cursor position and return the movement delta. Marks the
    /// press as a drag once the pointer leaves the slop radius.
    pub(crate) fn handle_mouse_position(&mut self, pos: Vec2) -> Vec2 {
        let delta = pos - self.mouse_pos;
        self.mouse_pos = pos;
        if let Some(press) = self.press_pos {
            if press.distance(pos) > self.slop_px {
                self.is_dragging = true;
            }
        }
        delta
    }

    /// Whether the current press has turned into a drag.
    pub(crate) fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Process a mouse-up event at `now` and classify it.
    pub(crate) fn process_mouse_up(&mut self, now: Instant) -> ClickResult {
        let was_dragging = self.is_dragging;
        self.press_pos = None;
        self.is_dragging = false;

        if was_dragging {
            self.last_click = None;
            return ClickResult::NoAction;
        }

        let pos = self.mouse_pos;
        let is_double = self.last_click.is_some_and(|(at, last_pos)| {
            now.saturating_duration_since(at) <= self.double_click_window
                && last_pos.distance(pos) <= self.slop_px
        });

        if is_double {
            // A third click starts a new pair.
            self.last_click = None;
            ClickResult::DoubleClick { position: pos }
        } else {
            self.last_click = Some((now, pos));
            ClickResult::SingleClick
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ClickTracker {
        ClickTracker::new(Duration::from_millis(400), 5.0)
    }

    fn click(t: &mut ClickTracker, pos: Vec2, now: Instant) -> ClickResult {
        let _ = t.handle_mouse_position(pos);
        t.handle_mouse_down();
        t.process_mouse_up(now)
    }

    #[test]
    fn two_quick_clicks_make_a_double_click() {
        let mut t = tracker();
        let now = Instant::now();
        let pos = Vec2::new(10.0, 20.0);
        assert_eq!(click(&mut t, pos, now), ClickResult::SingleClick);
        assert_eq!(
            click(&mut t, pos, now + Duration::from_millis(200)),
            ClickResult::DoubleClick { position: pos }
        );
        // Third click opens a new pair.
        assert_eq!(
            click(&mut t, pos, now + Duration::from_millis(300)),
            ClickResult::SingleClick
        );
    }

    #[test]
    fn slow_clicks_stay_single() {
        let mut t = tracker();
        let now = Instant::now();
        let pos = Vec2::new(10.0, 20.0);
        let _ = click(&mut t, pos, now);
        assert_eq!(
            click(&mut t, pos, now + Duration::from_millis(600)),
            ClickResult::SingleClick
        );
    }

    #[test]
    fn distant_second_click_is_single() {
        let mut t = tracker();
        let now = Instant::now();
        let _ = click(&mut t, Vec2::new(10.0, 20.0), now);
        assert_eq!(
            click(&mut t, Vec2::new(60.0, 20.0), now + Duration::from_millis(100)),
            ClickResult::SingleClick
        );
    }

    #[test]
    fn drag_is_not_a_click() {
        let mut t = tracker();
        let now = Instant::now();
        let _ = t.handle_mouse_position(Vec2::ZERO);
        t.handle_mouse_down();
        let delta = t.handle_mouse_position(Vec2::new(30.0, 0.0));
        assert_eq!(delta, Vec2::new(30.0, 0.0));
        assert!(t.is_dragging());
        assert_eq!(t.process_mouse_up(now), ClickResult::NoAction);
    }
}
