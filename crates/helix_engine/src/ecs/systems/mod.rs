//! Built-in engine systems

pub mod camera_follow;
pub mod motion;
pub mod projectile;

pub use camera_follow::{CameraSystem, CAMERA_PRIORITY};
pub use motion::{MotionSystem, MOTION_PRIORITY};
pub use projectile::{
    ProjectileParams, ProjectileSystem, PROJECTILE_PRIORITY, PROJECTILE_TAG,
};
