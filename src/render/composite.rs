use crate::{
    assets::decode::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
    foundation::error::{MemeError, MemeResult},
};

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied RGBA8.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = src[i].saturating_add(dc);
    }
    out
}

/// Blend a premultiplied layer over a straight-alpha destination of the same size.
///
/// Only pixels the layer covers go through premultiplication; every other destination pixel is
/// left bit-for-bit unchanged.
pub fn over_straight_in_place(dst: &mut [u8], src: &[u8]) -> MemeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MemeError::render(
            "over_straight_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        premultiply_rgba8_in_place(d);
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
        unpremultiply_rgba8_in_place(d);
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
