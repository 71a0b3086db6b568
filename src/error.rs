use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowError {
    InvalidDepthRange { near: f32, far: f32 },
    InvalidFieldOfView(f32),
    InvalidAspectRatio(f32),
    NonFiniteMatrix { cascade: usize },
    SingularMatrix { cascade: usize },
}

impl fmt::Display for ShadowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadowError::InvalidDepthRange { near, far } => {
                write!(f, "depth range must satisfy 0 < near < far (near {near}, far {far})")
            }
            ShadowError::InvalidFieldOfView(fov) => {
                write!(f, "vertical field of view {fov} is outside (0, 180) degrees")
            }
            ShadowError::InvalidAspectRatio(aspect) => {
                write!(f, "aspect ratio {aspect} must be positive")
            }
            ShadowError::NonFiniteMatrix { cascade } => {
                write!(f, "crop matrix for cascade {cascade} has non-finite entries")
            }
            ShadowError::SingularMatrix { cascade } => {
                write!(f, "crop matrix for cascade {cascade} is not invertible")
            }
        }
    }
}

impl std::error::Error for ShadowError {}
