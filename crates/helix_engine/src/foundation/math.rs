//! Math types and helpers
//!
//! Thin aliases over nalgebra so the rest of the runtime talks about
//! game-space vectors without repeating the generic parameters.

/// 2D vector in world or screen space
pub type Vec2 = nalgebra::Vector2<f32>;

/// Create a [`Vec2`] from components
#[inline]
pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Clamp a vector's length to `max_len` (no-op when `max_len <= 0`)
pub fn clamp_length(v: Vec2, max_len: f32) -> Vec2 {
    if max_len <= 0.0 {
        return v;
    }
    let len = v.norm();
    if len > max_len {
        v * (max_len / len)
    } else {
        v
    }
}
