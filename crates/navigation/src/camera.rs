use fractalspace_common::NavigationConfig;
use glam::{Mat3, Vec3};

/// Camera pose: position plus an orthonormal orientation frame.
///
/// Columns of `orientation` are the camera's right, up and view (Z) axes in
/// world space. The camera looks along `-Z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub position: Vec3,
    pub orientation: Mat3,
    pub linear_speed: f32,
    pub angular_speed: f32,
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self::from_config(&NavigationConfig::default())
    }
}

impl CameraFrame {
    pub fn from_config(config: &NavigationConfig) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Mat3::IDENTITY,
            linear_speed: config.linear_speed,
            angular_speed: config.angular_speed,
        }
    }

    pub fn right(&self) -> Vec3 {
        self.orientation.x_axis
    }

    pub fn up(&self) -> Vec3 {
        self.orientation.y_axis
    }

    /// Third orientation column. Roll rotates about this axis.
    pub fn view_axis(&self) -> Vec3 {
        self.orientation.z_axis
    }

    /// Direction of travel for the forward key.
    pub fn forward(&self) -> Vec3 {
        -self.orientation.z_axis
    }

    /// Frobenius norm of `MᵀM - I`. Zero for a perfect rotation.
    pub fn orthonormality_error(&self) -> f32 {
        let gram = self.orientation.transpose() * self.orientation - Mat3::IDENTITY;
        gram.to_cols_array().iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Gram-Schmidt re-orthonormalization that keeps the view axis direction
    /// and re-derives right and up from it.
    pub fn renormalize(&mut self) {
        let z = self.orientation.z_axis.normalize();
        let x = self.orientation.y_axis.cross(z).normalize();
        let y = z.cross(x);
        self.orientation = Mat3::from_cols(x, y, z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_frame() {
        let cam = CameraFrame::default();
        assert_eq!(cam.position, Vec3::ZERO);
        assert_eq!(cam.forward(), Vec3::NEG_Z);
        assert_eq!(cam.right(), Vec3::X);
        assert_eq!(cam.up(), Vec3::Y);
        assert_eq!(cam.orthonormality_error(), 0.0);
    }

    #[test]
    fn renormalize_repairs_skew() {
        let mut cam = CameraFrame::default();
        cam.orientation = Mat3::from_cols(
            Vec3::new(1.02, 0.03, 0.0),
            Vec3::new(-0.01, 0.97, 0.05),
            Vec3::new(0.0, 0.02, 1.01),
        );
        assert!(cam.orthonormality_error() > 1e-2);

        let view = cam.view_axis().normalize();
        cam.renormalize();
        assert!(cam.orthonormality_error() < 1e-5);
        assert!(cam.view_axis().abs_diff_eq(view, 1e-6));
        // Right-handed: right x up = view axis.
        assert!(cam.right().cross(cam.up()).abs_diff_eq(cam.view_axis(), 1e-5));
    }

    #[test]
    fn renormalize_keeps_identity_exact() {
        let mut cam = CameraFrame::default();
        cam.renormalize();
        assert_eq!(cam.orientation, Mat3::IDENTITY);
    }
}
