use glam::{Mat4, Vec3, Vec4};

const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 1.0, 5.0);
const DEFAULT_AT: Vec3 = Vec3::ZERO;
const DEFAULT_UP: Vec3 = Vec3::Y;

/// A camera's coordinate system: the eye position and the orthonormal basis
/// `u` (right), `v` (up) and `w` (backward). The camera looks along `-w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Default for Camera {
    /// Positioned at `(0, 1, 5)`, looking at the origin with `y` up.
    fn default() -> Self {
        let mut cam = Self {
            eye: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        };
        cam.orient(DEFAULT_EYE, DEFAULT_AT, DEFAULT_UP);
        cam
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> CameraBuilder {
        CameraBuilder {
            eye: DEFAULT_EYE,
            at: DEFAULT_AT,
            up: DEFAULT_UP,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn u(&self) -> Vec3 {
        self.u
    }

    pub fn v(&self) -> Vec3 {
        self.v
    }

    pub fn w(&self) -> Vec3 {
        self.w
    }

    /// Places the camera at `eye`, looking towards `at`.
    ///
    /// An `up` parallel to the viewing direction leaves a degenerate (NaN)
    /// basis behind.
    pub fn orient(&mut self, eye: Vec3, at: Vec3, up: Vec3) {
        self.eye = eye;

        self.w = (eye - at).normalize();
        let right = up.cross(self.w);
        if right.length_squared() <= f32::EPSILON {
            log::warn!(
                "Degenerate camera basis: up `{}` is parallel to the view direction",
                up
            );
        }
        self.u = right.normalize();
        self.v = self.w.cross(self.u).normalize();
    }

    /// The matrix converting from world to camera coordinates: the inverse
    /// rotation times the inverse translation.
    pub fn view_matrix(&self) -> Mat4 {
        let rotation = Mat4::from_cols(
            Vec4::new(self.u.x, self.v.x, self.w.x, 0.0),
            Vec4::new(self.u.y, self.v.y, self.w.y, 0.0),
            Vec4::new(self.u.z, self.v.z, self.w.z, 0.0),
            Vec4::W,
        );
        let translation = Mat4::from_translation(-self.eye);

        rotation * translation
    }

    /// Writes the view matrix into `out`.
    pub fn write_view_matrix(&self, out: &mut Mat4) {
        *out = self.view_matrix();
    }

    /// Rotates the eye and the axes about the origin: first around the
    /// camera's `u` axis by `vert_angle`, then around the world `y` axis by
    /// `horiz_angle` (radians).
    pub fn orbit(&mut self, horiz_angle: f32, vert_angle: f32) {
        let m = Mat4::from_axis_angle(self.u.normalize(), vert_angle);
        self.eye = m.transform_point3(self.eye);
        self.rotate_axes(&m);

        let m = Mat4::from_axis_angle(Vec3::Y, horiz_angle);
        self.eye = m.transform_point3(self.eye);
        self.rotate_axes(&m);
    }

    /// Rotates only the axes: first around the world `y` axis by
    /// `horiz_angle`, then around the (rotated) `u` axis by `vert_angle`.
    pub fn turn(&mut self, horiz_angle: f32, vert_angle: f32) {
        let m = Mat4::from_axis_angle(Vec3::Y, horiz_angle);
        self.rotate_axes(&m);

        let m = Mat4::from_axis_angle(self.u.normalize(), vert_angle);
        self.rotate_axes(&m);
    }

    /// Moves the eye along `u` and `v`, keeping the orientation.
    pub fn track(&mut self, delta_u: f32, delta_v: f32) {
        self.eye += self.u * delta_u;
        self.eye += self.v * delta_v;
    }

    /// Moves the eye along `w`, keeping the orientation.
    pub fn dolly(&mut self, delta: f32) {
        self.eye += self.w * delta;
    }

    fn rotate_axes(&mut self, m: &Mat4) {
        self.u = m.transform_vector3(self.u);
        self.v = m.transform_vector3(self.v);
        self.w = m.transform_vector3(self.w);
    }
}

pub struct CameraBuilder {
    eye: Vec3,
    at: Vec3,
    up: Vec3,
}

impl CameraBuilder {
    pub fn eye(&mut self, eye: Vec3) -> &mut Self {
        self.eye = eye;
        self
    }

    pub fn at(&mut self, at: Vec3) -> &mut Self {
        self.at = at;
        self
    }

    pub fn up(&mut self, up: Vec3) -> &mut Self {
        self.up = up;
        self
    }

    pub fn build(&mut self) -> Camera {
        if self.eye == self.at {
            log::warn!("Camera eye and target coincide: `{}`", self.eye);
        }

        let mut cam = Camera::default();
        cam.orient(self.eye, self.at, self.up);
        cam
    }
}
