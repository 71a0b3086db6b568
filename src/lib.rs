pub mod error;
pub mod math;
pub mod scene;
pub mod settings;
pub mod shadow;

pub use error::ShadowError;
pub use math::{Aabb, BoundingSphere, DepthRange, Frustum};
pub use scene::{Camera, DirectionalLight};
pub use settings::ShadowSettings;
pub use shadow::{
    build_cascade_frustums, compute_crop_matrices, compute_split_planes, Cascade, CascadeSet,
    CascadeUniform, CascadedShadows,
};

/// Installs `env_logger` with an `Info` default that `RUST_LOG` overrides.
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
