//! Hexagonal-model HSV conversion.
//!
//! All components are normalised to `0.0..=1.0`. Hue is `0.0` for achromatic
//! colours (saturation zero).

/// A colour in HSV space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// Hue in `0.0..1.0` shared by the HSV and HSL models.
pub(super) fn hue(r: f32, g: f32, b: f32, max: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    sector / 6.0
}

/// Rebuild RGB from hue, chroma and the lightness offset `m`.
pub(super) fn from_hue_chroma(h: f32, c: f32, m: f32) -> [u8; 3] {
    let h6 = h.rem_euclid(1.0) * 6.0;
    let x = c * (1.0 - ((h6 % 2.0) - 1.0).abs());
    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    Hsv {
        h: hue(r, g, b, max, delta),
        s: if max == 0.0 { 0.0 } else { delta / max },
        v: max,
    }
}

pub fn hsv_to_rgb(hsv: Hsv) -> [u8; 3] {
    let s = hsv.s.clamp(0.0, 1.0);
    let v = hsv.v.clamp(0.0, 1.0);
    let c = v * s;
    from_hue_chroma(hsv.h, c, v - c)
}
