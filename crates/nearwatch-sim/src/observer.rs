//! Scripted observer path.

use nearwatch_core::{Bounds, Vec3};

/// Ticks per full orbit.
pub const ORBIT_TICKS: u64 = 400;

/// Observer position at `tick`: a horizontal orbit around the middle of
/// `bounds`, reaching 80% of the smaller horizontal half-extent.
pub fn observer_at(tick: u64, bounds: &Bounds) -> Vec3 {
    let center = Vec3::new(
        (bounds.min.x + bounds.max.x) * 0.5,
        (bounds.min.y + bounds.max.y) * 0.5,
        (bounds.min.z + bounds.max.z) * 0.5,
    );
    let radius = 0.4 * (bounds.max.x - bounds.min.x).min(bounds.max.z - bounds.min.z);
    let angle = (tick % ORBIT_TICKS) as f32 / ORBIT_TICKS as f32 * std::f32::consts::TAU;

    Vec3::new(
        radius.mul_add(angle.cos(), center.x),
        center.y,
        radius.mul_add(angle.sin(), center.z),
    )
}
