//! Closed-form constant-acceleration kinematics
//!
//! Freefall is integrated exactly rather than stepped, so the ground contact
//! time can be solved for directly and a tick never tunnels through the
//! ground regardless of its length.

/// Speed and height after `dt` seconds under constant `acceleration`
///
/// Uses the trapezoidal form `h + ½(v + v')·dt`, which is exact for constant
/// acceleration.
#[inline]
pub fn project(speed: f64, height: f64, acceleration: f64, dt: f64) -> (f64, f64) {
    let new_speed = speed + acceleration * dt;
    let new_height = height + 0.5 * (new_speed + speed) * dt;
    (new_speed, new_height)
}

/// Time to travel `distance` starting at `speed` under `acceleration`
///
/// Solves `distance = speed·t + ½·acceleration·t²` for the root reached
/// first when moving toward a target below the current position with a
/// negative `acceleration`. `acceleration` must be non-zero and negative;
/// `distance` is the signed displacement (negative = downward).
#[inline]
pub fn time_to_travel(acceleration: f64, speed: f64, distance: f64) -> f64 {
    let discriminant = speed * speed + 2.0 * acceleration * distance;
    debug_assert!(acceleration < 0.0, "acceleration must be negative");
    debug_assert!(
        discriminant >= 0.0,
        "target height is never reached (discriminant {discriminant})"
    );
    (-speed - discriminant.sqrt()) / acceleration
}
