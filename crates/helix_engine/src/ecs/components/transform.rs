//! 2D transform component

use std::any::Any;

use crate::ecs::component::{Component, DebugEntry};
use crate::foundation::math::Vec2;

/// World-space position and heading for an entity
#[derive(Debug, Clone, Copy)]
pub struct TransformComponent {
    /// Position in world units
    pub position: Vec2,
    /// Heading in radians
    pub rotation: f32,
}

impl TransformComponent {
    /// Create a transform at the given position, facing right
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
        }
    }

    /// Create a transform with an explicit heading
    pub fn with_rotation(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// Unit vector of the current heading
    pub fn heading(&self) -> Vec2 {
        Vec2::new(self.rotation.cos(), self.rotation.sin())
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::new(Vec2::zeros())
    }
}

impl Component for TransformComponent {
    fn debug_entries(&self) -> Vec<DebugEntry> {
        vec![
            DebugEntry::new("pos", format!("({:.1}, {:.1})", self.position.x, self.position.y)),
            DebugEntry::new("rot", format!("{:.2}", self.rotation)),
        ]
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
