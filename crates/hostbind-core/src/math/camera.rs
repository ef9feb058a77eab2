use super::vector::Vector;

/// Base camera distance scaled by the multiplier in [`camera_offset`].
pub const CAMERA_DISTANCE: f32 = 30.0;

const FULL_TURN: f32 = 360.0;

/// Camera-relative offset derived from a view orientation.
///
/// Pitch and yaw are shifted by one full turn and then brought back down by
/// subtracting 360 while the value is strictly greater than 360. A result of
/// exactly 360 is therefore kept, so a zero view maps to 360, not 0. The
/// third component is [`CAMERA_DISTANCE`] times `multiplier`.
///
/// Once an angle is large enough that subtracting 360 no longer changes it
/// (around 2^33), the rest is taken with `% 360` instead, so the result lies
/// in `[0, 360)` and can differ from repeated subtraction: an exact multiple
/// of 360 comes back as 0, not 360. An infinite angle yields NaN.
///
/// ```
/// use hostbind_core::{Vector, camera_offset};
///
/// assert_eq!(camera_offset(Vector::ZERO, 1), Vector::new(360.0, 360.0, 30.0));
/// assert_eq!(
///     camera_offset(Vector::new(10.0, 370.0, 0.0), 2),
///     Vector::new(10.0, 10.0, 60.0),
/// );
/// ```
pub fn camera_offset(view: Vector, multiplier: i32) -> Vector {
    Vector::new(
        wrap_turn(view.x),
        wrap_turn(view.y),
        CAMERA_DISTANCE * multiplier as f32,
    )
}

/// [`camera_offset`] with a multiplier of 1.
pub fn camera_offset_default(view: Vector) -> Vector {
    camera_offset(view, 1)
}

fn wrap_turn(angle: f32) -> f32 {
    let mut wrapped = FULL_TURN + angle;
    while wrapped > FULL_TURN {
        let next = wrapped - FULL_TURN;
        // Past 2^33 or at infinity the subtraction stops making progress.
        if next == wrapped {
            return next % FULL_TURN;
        }
        wrapped = next;
    }
    wrapped
}
