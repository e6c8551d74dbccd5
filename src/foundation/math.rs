use crate::foundation::core::Rgb8;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Round and clamp a float channel value into `0..=255`.
#[inline]
pub(crate) fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Fractional part in `[0, 1)`, also for negative inputs.
pub(crate) fn fract01(x: f32) -> f32 {
    let f = x - x.floor();
    if f < 0.0 { f + 1.0 } else { f }
}

/// HSV to RGB with `h` as a fraction of the full hue circle and `s`, `v` in `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb8 {
    let h = fract01(h) * 6.0;
    let i = h.floor() as i32;
    let f = h - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i.rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [
        clamp_u8(r.clamp(0.0, 1.0) * 255.0),
        clamp_u8(g.clamp(0.0, 1.0) * 255.0),
        clamp_u8(b.clamp(0.0, 1.0) * 255.0),
    ]
}

/// RGB to HSV, returning `(h, s, v)` with `h` as a fraction of the hue circle.
pub fn rgb_to_hsv(c: Rgb8) -> (f32, f32, f32) {
    let r = f32::from(c[0]) / 255.0;
    let g = f32::from(c[1]) / 255.0;
    let b = f32::from(c[2]) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;
    let v = max;
    let s = if max <= 0.0 { 0.0 } else { d / max };
    if d <= 0.0 {
        return (0.0, s, v);
    }
    let h = if max == r {
        ((g - b) / d).rem_euclid(6.0)
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h / 6.0, s, v)
}

/// Convert a half-degree hue (`0..180`, the 8-bit camera convention) to a fully saturated color.
pub fn half_degree_hue_to_rgb(hue: u32) -> Rgb8 {
    hsv_to_rgb((hue % 180) as f32 / 180.0, 1.0, 1.0)
}

/// Stable pseudo-random value in `[0, 1)` for an integer key and seed.
pub(crate) fn hash01(key: u32, seed: u32) -> f32 {
    let mut n = key.wrapping_mul(374_761_393) ^ seed.wrapping_mul(0x9E37_79B9);
    n = (n ^ (n >> 13)).wrapping_mul(1_274_126_177);
    n ^= n >> 16;
    ((n & 0x00FF_FFFF) as f32) / 16_777_216.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
