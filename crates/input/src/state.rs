use crate::action::Action;
use glam::Vec2;
use std::collections::BTreeSet;

/// Turns absolute cursor positions into deltas.
///
/// The first sample after construction or [`CursorLatch::reset`] only records
/// the position, so the cursor's initial location never reads as a jump.
#[derive(Debug, Clone, Default)]
pub struct CursorLatch {
    last: Option<(f64, f64)>,
}

impl CursorLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cursor position. Returns `(dx, dy)` with `dy` positive when
    /// the cursor moved up the screen, or `None` for the first sample.
    pub fn sample(&mut self, x: f64, y: f64) -> Option<Vec2> {
        let delta = self
            .last
            .map(|(lx, ly)| Vec2::new((x - lx) as f32, (ly - y) as f32));
        self.last = Some((x, y));
        delta
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn is_latched(&self) -> bool {
        self.last.is_some()
    }
}

/// Everything the camera needs from one frame of input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Look delta in pixels; `+y` means look up.
    pub look: Vec2,
    /// Scroll delta in lines; positive scrolls away from the user.
    pub scroll: f32,
    pub held: BTreeSet<Action>,
}

impl FrameInput {
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn with_held(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.held.extend(actions);
        self
    }

    pub fn is_idle(&self) -> bool {
        self.look == Vec2::ZERO && self.scroll == 0.0 && self.held.is_empty()
    }
}

/// Accumulates input events between frames.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeSet<Action>,
    latch: CursorLatch,
    look: Vec2,
    scroll: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an action held. Returns `true` on the press edge.
    pub fn press(&mut self, action: Action) -> bool {
        self.held.insert(action)
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Absolute cursor position, in window pixels.
    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        if let Some(delta) = self.latch.sample(x, y) {
            self.look += delta;
        }
    }

    /// Relative pointer motion in screen space (`+y` is down), as reported by
    /// the device when the cursor is locked.
    pub fn raw_motion(&mut self, dx: f64, dy: f64) {
        self.look += Vec2::new(dx as f32, -dy as f32);
    }

    pub fn scroll(&mut self, lines: f32) {
        self.scroll += lines;
    }

    /// Drop everything tied to the current focus: held keys and the cursor
    /// latch. Pending deltas are discarded too.
    pub fn focus_lost(&mut self) {
        tracing::debug!("input focus lost; releasing {} held actions", self.held.len());
        self.held.clear();
        self.latch.reset();
        self.look = Vec2::ZERO;
        self.scroll = 0.0;
    }

    /// Re-arm the first-sample latch without touching held keys.
    pub fn reset_cursor(&mut self) {
        self.latch.reset();
    }

    /// Hand out the accumulated input and clear the per-frame deltas.
    /// Held actions persist until released.
    pub fn take_frame(&mut self) -> FrameInput {
        let frame = FrameInput {
            look: self.look,
            scroll: self.scroll,
            held: self
                .held
                .iter()
                .copied()
                .filter(|a| !a.is_trigger())
                .collect(),
        };
        self.look = Vec2::ZERO;
        self.scroll = 0.0;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_latched() {
        let mut latch = CursorLatch::new();
        assert!(!latch.is_latched());
        assert_eq!(latch.sample(400.0, 300.0), None);
        assert!(latch.is_latched());
        assert_eq!(latch.sample(410.0, 290.0), Some(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn reset_relatches() {
        let mut latch = CursorLatch::new();
        latch.sample(0.0, 0.0);
        latch.reset();
        assert_eq!(latch.sample(1000.0, 1000.0), None);
    }

    #[test]
    fn cursor_deltas_accumulate_until_taken() {
        let mut input = InputState::new();
        input.cursor_moved(100.0, 100.0);
        input.cursor_moved(105.0, 100.0);
        input.cursor_moved(110.0, 98.0);
        let frame = input.take_frame();
        assert_eq!(frame.look, Vec2::new(10.0, 2.0));

        let next = input.take_frame();
        assert_eq!(next.look, Vec2::ZERO);
    }

    #[test]
    fn raw_motion_inverts_y() {
        let mut input = InputState::new();
        input.raw_motion(3.0, 4.0);
        assert_eq!(input.take_frame().look, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn held_actions_persist_across_frames() {
        let mut input = InputState::new();
        assert!(input.press(Action::MoveForward));
        assert!(!input.press(Action::MoveForward));
        assert!(input.take_frame().is_held(Action::MoveForward));
        assert!(input.take_frame().is_held(Action::MoveForward));
        input.release(Action::MoveForward);
        assert!(input.take_frame().is_idle());
    }

    #[test]
    fn trigger_actions_are_not_reported_as_held() {
        let mut input = InputState::new();
        input.press(Action::ToggleHud);
        assert!(!input.take_frame().is_held(Action::ToggleHud));
    }

    #[test]
    fn scroll_accumulates() {
        let mut input = InputState::new();
        input.scroll(1.0);
        input.scroll(2.0);
        assert_eq!(input.take_frame().scroll, 3.0);
        assert_eq!(input.take_frame().scroll, 0.0);
    }

    #[test]
    fn focus_loss_clears_everything() {
        let mut input = InputState::new();
        input.press(Action::StrafeLeft);
        input.cursor_moved(0.0, 0.0);
        input.cursor_moved(50.0, 0.0);
        input.focus_lost();
        assert!(input.take_frame().is_idle());
        // Latch was reset, so the next sample is swallowed.
        input.cursor_moved(500.0, 500.0);
        assert!(input.take_frame().is_idle());
    }
}
