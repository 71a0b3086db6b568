use glam::Vec3;
use shadow_cascades::{Camera, CascadedShadows, DirectionalLight, ShadowSettings};

const DEFAULT_SETTINGS_PATH: &str = "shadow_settings.json";

fn demo_camera() -> Camera {
    Camera {
        eye: Vec3::new(0.0, 10.0, 20.0),
        target: Vec3::ZERO,
        up: Vec3::Y,
        fov_y_radians: 45f32.to_radians(),
        aspect_ratio: 16.0 / 9.0,
        near: 0.1,
        far: 100.0,
    }
}

fn main() {
    shadow_cascades::init_logging();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = ShadowSettings::load_from_path(&path);

    let camera = demo_camera();
    let light = DirectionalLight::default();
    let mut shadows = CascadedShadows::new(settings);

    let set = match shadows.update(&camera, light.direction) {
        Ok(set) => set,
        Err(err) => {
            log::error!("Cascade computation failed: {}", err);
            std::process::exit(1);
        }
    };

    log::info!("Split planes: {:?}", set.splits);
    for (index, cascade) in set.cascades.iter().enumerate() {
        log::info!(
            "Cascade {}: [{:.3}, {:.3}] sphere center {:?} radius {:.3}, texel {:.4} world units",
            index,
            cascade.frustum.near(),
            cascade.frustum.far(),
            cascade.crop.sphere.center,
            cascade.crop.sphere.radius,
            cascade.crop.texel_world_size
        );
        log::debug!("Cascade {} matrix: {:?}", index, cascade.view_proj);
    }

    let uniform = shadows.uniform();
    log::info!(
        "Packed {} cascades into {} uniform bytes",
        uniform.count(),
        bytemuck::bytes_of(&uniform).len()
    );
}
