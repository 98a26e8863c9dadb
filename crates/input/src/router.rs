use crate::intent::{InputIntent, MoveKey};
use fractalspace_common::InputConfig;
use glam::Vec2;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Move(MoveKey),
    /// While held, horizontal drag rolls instead of yawing.
    RollModifier,
}

/// Key code to control mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    map: HashMap<KeyCode, Control>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let map = HashMap::from([
            (KeyCode::KeyW, Control::Move(MoveKey::Forward)),
            (KeyCode::KeyS, Control::Move(MoveKey::Backward)),
            (KeyCode::KeyA, Control::Move(MoveKey::Left)),
            (KeyCode::KeyD, Control::Move(MoveKey::Right)),
            (KeyCode::Space, Control::Move(MoveKey::Up)),
            (KeyCode::ShiftLeft, Control::Move(MoveKey::Down)),
            (KeyCode::ControlLeft, Control::RollModifier),
        ]);
        Self { map }
    }
}

impl KeyBindings {
    pub fn control(&self, key: KeyCode) -> Option<Control> {
        self.map.get(&key).copied()
    }
}

/// Tracks live input state between frames and turns it into an
/// [`InputIntent`] on demand.
///
/// Window events feed the setters as they arrive; the render loop calls
/// [`InputRouter::sample`] exactly once per frame.
#[derive(Debug)]
pub struct InputRouter {
    bindings: KeyBindings,
    held: HashSet<Control>,
    cursor: Option<Vec2>,
    last_sampled: Option<Vec2>,
    look_held: bool,
    scroll: f32,
    pixels_per_line: f32,
}

impl InputRouter {
    pub fn new(bindings: KeyBindings, config: &InputConfig) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            cursor: None,
            last_sampled: None,
            look_held: false,
            scroll: 0.0,
            pixels_per_line: config.pixels_per_line.max(f32::EPSILON),
        }
    }

    /// Record a key transition. Returns false for unbound keys.
    pub fn key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let Some(control) = self.bindings.control(key) else {
            return false;
        };
        if pressed {
            self.held.insert(control);
        } else {
            self.held.remove(&control);
        }
        true
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor = Some(Vec2::new(x as f32, y as f32));
    }

    /// Primary pointer button state; drag-to-look only while held.
    pub fn look_button(&mut self, pressed: bool) {
        self.look_held = pressed;
    }

    pub fn scroll_lines(&mut self, lines: f32) {
        self.scroll += lines;
    }

    pub fn scroll_pixels(&mut self, pixels: f32) {
        self.scroll += pixels / self.pixels_per_line;
    }

    /// Drop all held state, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() || self.look_held {
            tracing::debug!(held = self.held.len(), "releasing held input");
        }
        self.held.clear();
        self.look_held = false;
    }

    /// Build this frame's intent and reset per-frame accumulators.
    pub fn sample(&mut self) -> InputIntent {
        let cursor_delta = match (self.look_held, self.cursor, self.last_sampled) {
            (true, Some(now), Some(then)) => now - then,
            _ => Vec2::ZERO,
        };
        self.last_sampled = self.cursor;

        let moves = self
            .held
            .iter()
            .filter_map(|control| match control {
                Control::Move(key) => Some(*key),
                Control::RollModifier => None,
            })
            .collect();

        InputIntent {
            moves,
            cursor_delta,
            roll: self.held.contains(&Control::RollModifier),
            scroll: std::mem::take(&mut self.scroll),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> InputRouter {
        InputRouter::new(KeyBindings::default(), &InputConfig::default())
    }

    #[test]
    fn no_delta_without_look_button() {
        let mut r = router();
        r.cursor_moved(10.0, 10.0);
        r.sample();
        r.cursor_moved(30.0, 5.0);
        let intent = r.sample();
        assert_eq!(intent.cursor_delta, Vec2::ZERO);
    }

    #[test]
    fn drag_delta_is_relative_to_last_sample() {
        let mut r = router();
        r.cursor_moved(10.0, 10.0);
        r.sample();
        r.look_button(true);
        r.cursor_moved(15.0, 12.0);
        r.cursor_moved(30.0, 5.0);
        let intent = r.sample();
        assert_eq!(intent.cursor_delta, Vec2::new(20.0, -5.0));

        // Nothing moved since the last sample.
        let intent = r.sample();
        assert_eq!(intent.cursor_delta, Vec2::ZERO);
    }

    #[test]
    fn moving_without_drag_does_not_accumulate() {
        let mut r = router();
        r.cursor_moved(0.0, 0.0);
        r.sample();
        r.cursor_moved(100.0, 100.0);
        r.sample();
        r.look_button(true);
        r.cursor_moved(101.0, 100.0);
        assert_eq!(r.sample().cursor_delta, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn concurrent_keys_combine() {
        let mut r = router();
        assert!(r.key(KeyCode::KeyW, true));
        assert!(r.key(KeyCode::KeyD, true));
        assert!(r.key(KeyCode::Space, true));
        let intent = r.sample();
        assert_eq!(intent.moves.len(), 3);
        assert!(intent.moves.contains(&MoveKey::Forward));
        assert!(intent.moves.contains(&MoveKey::Right));
        assert!(intent.moves.contains(&MoveKey::Up));

        r.key(KeyCode::KeyD, false);
        let intent = r.sample();
        assert!(!intent.moves.contains(&MoveKey::Right));
        assert!(intent.moves.contains(&MoveKey::Forward));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut r = router();
        assert!(!r.key(KeyCode::KeyQ, true));
        assert!(r.sample().moves.is_empty());
    }

    #[test]
    fn roll_modifier_sets_flag_only() {
        let mut r = router();
        r.key(KeyCode::ControlLeft, true);
        let intent = r.sample();
        assert!(intent.roll);
        assert!(intent.moves.is_empty());
    }

    #[test]
    fn scroll_resets_each_sample() {
        let mut r = router();
        r.scroll_lines(1.0);
        r.scroll_lines(2.0);
        r.scroll_pixels(40.0);
        assert_eq!(r.sample().scroll, 5.0);
        assert_eq!(r.sample().scroll, 0.0);
    }

    #[test]
    fn release_all_clears_held_state() {
        let mut r = router();
        r.key(KeyCode::KeyW, true);
        r.look_button(true);
        r.release_all();
        r.cursor_moved(0.0, 0.0);
        r.sample();
        r.cursor_moved(5.0, 5.0);
        let intent = r.sample();
        assert!(intent.moves.is_empty());
        assert_eq!(intent.cursor_delta, Vec2::ZERO);
    }
}
