use crate::geometry::Vec3;

/// Sine and cosine of an angle in degrees, exact at multiples of 90.
pub fn sin_cos_deg(degrees: f32) -> (f32, f32) {
    let wrapped = wrap_degrees(degrees);
    if wrapped == 0.0 {
        (0.0, 1.0)
    } else if wrapped == 90.0 {
        (1.0, 0.0)
    } else if wrapped == 180.0 {
        (0.0, -1.0)
    } else if wrapped == 270.0 {
        (-1.0, 0.0)
    } else {
        wrapped.to_radians().sin_cos()
    }
}

/// Wrap an angle into `[0, 360)`.
#[inline]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let w = degrees.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360 for tiny negative inputs.
    if w >= 360.0 { 0.0 } else { w }
}

/// Horizontal forward and right unit vectors for a look angle (0 = +z, 90 = +x).
pub fn horizontal_basis(horizontal_deg: f32) -> (Vec3, Vec3) {
    let (s, c) = sin_cos_deg(horizontal_deg);
    (Vec3::new(s, 0.0, c), Vec3::new(c, 0.0, -s))
}

/// Unit look direction from a horizontal and a vertical angle (degrees, +vertical looks up).
pub fn direction_from_angles(horizontal_deg: f32, vertical_deg: f32) -> Vec3 {
    let (hs, hc) = sin_cos_deg(horizontal_deg);
    let (vs, vc) = sin_cos_deg(vertical_deg);
    Vec3::new(hs * vc, vs, hc * vc)
}

/// Number of whole ticks covering `ms` milliseconds (rounded up).
#[inline]
pub fn ms_to_ticks(ms: u32, tick_ms: u32) -> u32 {
    if tick_ms == 0 {
        return 0;
    }
    ms.div_ceil(tick_ms)
}
