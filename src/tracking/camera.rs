use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, Default)]
pub struct CameraMovement {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub aim_left: bool,
    pub aim_right: bool,
    pub aim_up: bool,
    pub aim_down: bool,
}

/// Yaw/pitch camera standing in for the tracked device pose.
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y: f32,
    pub viewport: Vec2,
}

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

impl CameraController {
    pub fn new(position: Vec3, yaw: f32, pitch: f32, fov_y: f32, viewport: Vec2) -> Self {
        let mut camera = Self {
            position,
            yaw,
            pitch,
            fov_y,
            viewport: viewport.max(Vec2::ONE),
        };
        camera.wrap_angles();
        camera
    }

    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        camera_basis(self.yaw, self.pitch)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    pub fn aim(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.wrap_angles();
    }

    /// World-space ray through a pixel, as `(origin, unit direction)`.
    pub fn screen_ray(&self, screen_point: Vec2) -> (Vec3, Vec3) {
        let (forward, right, up) = self.basis();
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.viewport.x / self.viewport.y;
        let ndc_x = screen_point.x / self.viewport.x * 2.0 - 1.0;
        let ndc_y = 1.0 - screen_point.y / self.viewport.y * 2.0;
        let dir = forward + right * (ndc_x * half_width) + up * (ndc_y * half_height);
        (self.position, dir.normalize_or_zero())
    }

    pub fn move_horizontal(&mut self, right: f32, up: f32, forward: f32) {
        let yaw = self.yaw;
        let forward_dir = Vec3::new(yaw.cos(), 0.0, yaw.sin());
        let right_dir = Vec3::new(-yaw.sin(), 0.0, yaw.cos());

        self.position += right_dir * right + Vec3::Y * up + forward_dir * forward;
    }

    pub fn update_movement(&mut self, input: &CameraMovement, frame_dt: f32) -> bool {
        let move_speed = 1.5 * frame_dt;
        let aim_speed = 1.8 * frame_dt;
        let mut changed = false;

        if input.aim_left {
            self.yaw -= aim_speed;
            changed = true;
        }
        if input.aim_right {
            self.yaw += aim_speed;
            changed = true;
        }
        if input.aim_up {
            self.pitch += aim_speed;
            changed = true;
        }
        if input.aim_down {
            self.pitch -= aim_speed;
            changed = true;
        }
        self.wrap_angles();

        let mut forward = 0.0;
        let mut right = 0.0;
        let mut up = 0.0;
        if input.move_forward {
            forward += move_speed;
        }
        if input.move_backward {
            forward -= move_speed;
        }
        if input.move_left {
            right -= move_speed;
        }
        if input.move_right {
            right += move_speed;
        }
        if input.move_up {
            up += move_speed;
        }
        if input.move_down {
            up -= move_speed;
        }

        if forward != 0.0 || right != 0.0 || up != 0.0 {
            self.move_horizontal(right, up, forward);
            changed = true;
        }

        changed
    }

    fn wrap_angles(&mut self) {
        const TWO_PI: f32 = std::f32::consts::PI * 2.0;
        if self.yaw.is_finite() {
            self.yaw = (self.yaw + std::f32::consts::PI).rem_euclid(TWO_PI) - std::f32::consts::PI;
        }
        if self.pitch.is_finite() {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }
}

fn camera_basis(yaw: f32, pitch: f32) -> (Vec3, Vec3, Vec3) {
    let cos_pitch = pitch.cos();
    let forward = Vec3::new(yaw.cos() * cos_pitch, pitch.sin(), yaw.sin() * cos_pitch);
    let right = Vec3::new(-yaw.sin(), 0.0, yaw.cos());
    let up = right.cross(forward).normalize_or_zero();
    (forward, right, up)
}
