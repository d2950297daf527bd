use crate::{
    assets::decode::{PreparedImage, premultiply_rgba8_in_place},
    foundation::error::{FamtreeError, FamtreeResult},
    foundation::math::{add_sat_u8, mul_div255_u16},
    render::backend::FrameRGBA,
};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u16(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - sa;

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u16(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u16(u16::from(src[i]), op);
        let dc = mul_div255_u16(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Composite `src` over `dst`, pixel by pixel. Both buffers must have the same length.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> FamtreeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FamtreeError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Put `frame` on top of `background`.
///
/// The background is center-cropped to the frame's aspect ratio, then scaled with Lanczos3 to
/// exactly the frame size, so it covers the frame without distortion. The result has the frame's
/// size and is premultiplied.
#[tracing::instrument(skip_all, fields(frame = ?(frame.width, frame.height), background = ?(background.width, background.height)))]
pub fn apply_background(frame: &FrameRGBA, background: &PreparedImage) -> FamtreeResult<FrameRGBA> {
    let (fw, fh) = (frame.width, frame.height);
    let (bw, bh) = (background.width, background.height);
    if bw == 0 || bh == 0 {
        return Err(FamtreeError::asset("background image is empty"));
    }
    let expected = fw as usize * fh as usize * 4;
    if frame.data.len() != expected {
        return Err(FamtreeError::render("frame byte length does not match its size"));
    }

    let src = image::RgbaImage::from_raw(bw, bh, background.rgba8_premul.as_ref().clone())
        .ok_or_else(|| FamtreeError::asset("background byte length does not match its size"))?;
    let (cx, cy, cw, ch) = cover_crop(bw, bh, fw, fh);
    let cropped = image::imageops::crop_imm(&src, cx, cy, cw, ch).to_image();
    let scaled = if (cw, ch) == (fw, fh) {
        cropped
    } else {
        image::imageops::resize(&cropped, fw, fh, image::imageops::FilterType::Lanczos3)
    };

    let mut out = Vec::with_capacity(expected);
    for y in 0..fh {
        for x in 0..fw {
            let mut px = scaled.get_pixel(x, y).0;
            // Lanczos ringing can push color above alpha.
            let a = px[3];
            for c in &mut px[..3] {
                *c = (*c).min(a);
            }
            out.extend_from_slice(&px);
        }
    }

    let top = if frame.premultiplied {
        std::borrow::Cow::Borrowed(frame.data.as_slice())
    } else {
        let mut data = frame.data.clone();
        premultiply_rgba8_in_place(&mut data);
        std::borrow::Cow::Owned(data)
    };
    over_in_place(&mut out, &top, 1.0)?;

    Ok(FrameRGBA {
        width: fw,
        height: fh,
        data: out,
        premultiplied: true,
    })
}

/// Centered source rectangle `(x, y, w, h)` of a `bw x bh` image with the aspect ratio of a
/// `fw x fh` frame.
fn cover_crop(bw: u32, bh: u32, fw: u32, fh: u32) -> (u32, u32, u32, u32) {
    let frame_aspect = f64::from(fw.max(1)) / f64::from(fh.max(1));
    let (cw, ch) = if f64::from(bw) / f64::from(bh) > frame_aspect {
        let cw = (f64::from(bh) * frame_aspect).round() as u32;
        (cw.clamp(1, bw), bh)
    } else {
        let ch = (f64::from(bw) / frame_aspect).round() as u32;
        (bw, ch.clamp(1, bh))
    };
    ((bw - cw) / 2, (bh - ch) / 2, cw, ch)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
