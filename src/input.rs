use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::camera::InputDeltas;

/// Keys held down and the last cursor position, fed from window events
#[derive(Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    cursor: Option<[f64; 2]>,
}

impl InputState {
    pub fn press(&mut self, code: KeyCode) {
        self.keys_down.insert(code);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.keys_down.remove(&code);
    }

    pub fn is_down(&self, code: KeyCode) -> bool {
        self.keys_down.contains(&code)
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor = Some([x, y]);
    }

    /// Forget the cursor, e.g. after it left the window
    pub fn cursor_left(&mut self) {
        self.cursor = None;
    }

    fn axis(&self, pos: KeyCode, neg: KeyCode) -> f32 {
        let mut v = 0.0;
        if self.is_down(pos) {
            v += 1.0;
        }
        if self.is_down(neg) {
            v -= 1.0;
        }
        v
    }

    /// Reduce the current state to axes. With `center`, the cursor offset
    /// from it becomes the look delta.
    pub fn deltas(&self, center: Option<[f64; 2]>) -> InputDeltas {
        let (look_x, look_y) = match (center, self.cursor) {
            (Some(c), Some(p)) => ((p[0] - c[0]) as f32, (p[1] - c[1]) as f32),
            _ => (0.0, 0.0),
        };

        InputDeltas {
            forward: self.axis(KeyCode::KeyW, KeyCode::KeyS),
            strafe: self.axis(KeyCode::KeyD, KeyCode::KeyA),
            turn: self.axis(KeyCode::ArrowLeft, KeyCode::ArrowRight),
            look_x,
            look_y,
        }
    }

    /// The pointer was warped back to `center`
    pub fn recenter(&mut self, center: [f64; 2]) {
        if self.cursor.is_some() {
            self.cursor = Some(center);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_axes() {
        let mut input = InputState::default();
        input.press(KeyCode::KeyW);
        input.press(KeyCode::KeyA);
        input.press(KeyCode::ArrowRight);
        let d = input.deltas(None);
        assert_eq!(d.forward, 1.0);
        assert_eq!(d.strafe, -1.0);
        assert_eq!(d.turn, -1.0);

        input.press(KeyCode::KeyS);
        input.release(KeyCode::KeyA);
        let d = input.deltas(None);
        assert_eq!(d.forward, 0.0);
        assert_eq!(d.strafe, 0.0);
    }

    #[test]
    fn test_look_from_center() {
        let mut input = InputState::default();
        input.cursor_moved(410.0, 290.0);
        let d = input.deltas(Some([400.0, 300.0]));
        assert_eq!(d.look_x, 10.0);
        assert_eq!(d.look_y, -10.0);

        // no capture, no look
        assert_eq!(input.deltas(None).look_x, 0.0);

        input.recenter([400.0, 300.0]);
        assert_eq!(input.deltas(Some([400.0, 300.0])).look_x, 0.0);
    }

    #[test]
    fn test_unknown_cursor_is_still() {
        let mut input = InputState::default();
        input.cursor_moved(10.0, 10.0);
        input.cursor_left();
        input.recenter([5.0, 5.0]);
        let d = input.deltas(Some([5.0, 5.0]));
        assert_eq!((d.look_x, d.look_y), (0.0, 0.0));
    }
}
