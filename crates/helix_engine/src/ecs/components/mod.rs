//! Built-in engine components

pub mod motion;
pub mod projectile;
pub mod transform;

pub use motion::MotionComponent;
pub use projectile::{ProjectileComponent, ProjectilePhase};
pub use transform::TransformComponent;
