// scene/mod.rs

pub mod camera;
pub mod light;

pub use camera::Camera;
pub use light::DirectionalLight;
