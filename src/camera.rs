use crate::config::CameraConfig;

pub const PITCH_LIMIT: f32 = 89.0;

/// Camera state consumed by the projector and renderer. Angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: [f32; 2], // (x, y) in world units
    pub yaw: f32,           // wrapped into [0, 360)
    pub pitch: f32,         // clamped to [-89, 89]
    pub fov: f32,           // horizontal field of view
    pub max_ray_length: f32,
}

impl CameraPose {
    pub fn new(position: [f32; 2], yaw: f32, fov: f32, max_ray_length: f32) -> Self {
        Self {
            position,
            yaw: wrap_degrees(yaw),
            pitch: 0.0,
            fov,
            max_ray_length,
        }
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = clamp_pitch(pitch);
        self
    }

    /// Unit vector along yaw
    #[inline]
    pub fn forward(&self) -> [f32; 2] {
        let (s, c) = self.yaw.to_radians().sin_cos();
        [c, s]
    }

    /// Unit vector toward the right edge of the screen.
    ///
    /// Column 0 looks along `yaw + fov/2`, so screen-right is `yaw - 90`.
    #[inline]
    pub fn right(&self) -> [f32; 2] {
        let (s, c) = self.yaw.to_radians().sin_cos();
        [s, -c]
    }
}

#[inline]
pub fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[inline]
pub fn clamp_pitch(deg: f32) -> f32 {
    deg.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

/// Per-frame input reduced to axes, independent of where it came from
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputDeltas {
    pub forward: f32, // +1 forward, -1 back
    pub strafe: f32,  // +1 right, -1 left
    pub turn: f32,    // keyboard turn axis, +1 turns left (yaw increases)
    pub look_x: f32,  // cursor offset from centre, pixels
    pub look_y: f32,
}

/// Owns the pose and advances it from input
pub struct CameraController {
    pub pose: CameraPose,
    pub move_speed: f32,        // world units/s
    pub turn_speed: f32,        // deg/s
    pub mouse_sensitivity: f32, // scale on look_x/look_y
}

impl CameraController {
    pub fn from_config(config: &CameraConfig) -> Self {
        let pose = CameraPose::new(config.position, config.yaw, config.fov, config.max_ray_length)
            .with_pitch(config.pitch);
        Self {
            pose,
            move_speed: config.move_speed,
            turn_speed: config.turn_speed,
            mouse_sensitivity: config.mouse_sensitivity,
        }
    }

    pub fn advance(&mut self, input: &InputDeltas, dt_s: f32) {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return;
        }

        // Look first so movement follows the updated heading
        let look_x = input.look_x * self.mouse_sensitivity;
        let look_y = input.look_y * self.mouse_sensitivity;
        let yaw = self.pose.yaw + (input.turn - look_x) * self.turn_speed * dt_s;
        self.pose.yaw = wrap_degrees(yaw);
        // Cursor above centre (negative y) looks up
        self.pose.pitch = clamp_pitch(self.pose.pitch - look_y * self.turn_speed * dt_s);

        let mut fwd = input.forward.clamp(-1.0, 1.0);
        let mut strafe = input.strafe.clamp(-1.0, 1.0);
        if fwd == 0.0 && strafe == 0.0 {
            return;
        }

        // Normalize diagonal speed
        let len = (fwd * fwd + strafe * strafe).sqrt();
        if len > 1.0 {
            fwd /= len;
            strafe /= len;
        }

        let dir_fwd = self.pose.forward();
        let dir_right = self.pose.right();
        let step = self.move_speed * dt_s;
        self.pose.position[0] += (dir_fwd[0] * fwd + dir_right[0] * strafe) * step;
        self.pose.position[1] += (dir_fwd[1] * fwd + dir_right[1] * strafe) * step;
    }
}
