//! Image normalization for OCR.
//!
//! Turns an arbitrary captured image into the canonical high-contrast
//! monochrome payload the providers are prompted against. The pipeline is a
//! pure function of the input pixels: decode, grayscale, contrast, binarize,
//! re-encode in the source format, base64.
//!
//! The grayscale and contrast steps are two separate full-strength passes
//! over the 8-bit buffer, not one fused transform. The intermediate rounding
//! of the first pass feeds the second, which changes output bytes; the order
//! and separation are part of the contract.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

use crate::error::ExtractError;
use crate::types::ImagePayload;

/// Normalize a captured image into an OCR-ready [`ImagePayload`].
///
/// The payload is re-encoded in the original MIME type. JPEG re-encoding of
/// a binarized bitmap can introduce compression artifacts around glyph
/// edges; that tradeoff is accepted.
pub fn preprocess(bytes: &[u8], mime_type: &str) -> Result<ImagePayload, ExtractError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| ExtractError::Decode(e.to_string()))?;

    let bitmap = normalize_bitmap(decoded);
    let encoded = encode_bitmap(&bitmap, mime_type)?;
    if encoded.is_empty() {
        return Err(ExtractError::Encode("encoder produced no data".into()));
    }

    Ok(ImagePayload {
        data: STANDARD.encode(&encoded),
        mime_type: mime_type.to_string(),
    })
}

/// Run the three normalization passes over a decoded image.
///
/// After this returns, every color channel is 0 or 255 and the alpha
/// channel is untouched.
pub fn normalize_bitmap(image: DynamicImage) -> RgbaImage {
    let mut canvas = image.to_rgba8();
    grayscale_pass(&mut canvas);
    contrast_pass(&mut canvas);
    binarize_pass(&mut canvas);
    canvas
}

/// Pass 1: each pixel becomes the integer mean of its RGB channels.
fn grayscale_pass(canvas: &mut RgbaImage) {
    for px in canvas.pixels_mut() {
        let [r, g, b, _] = px.0;
        let gray = ((r as u16 + g as u16 + b as u16) / 3) as u8;
        px.0[0] = gray;
        px.0[1] = gray;
        px.0[2] = gray;
    }
}

/// Pass 2: contrast factor 2 around the 50% gray midpoint, clamped.
fn contrast_pass(canvas: &mut RgbaImage) {
    for px in canvas.pixels_mut() {
        for channel in 0..3 {
            let v = px.0[channel] as f32;
            px.0[channel] = ((v - 127.5) * 2.0 + 127.5).clamp(0.0, 255.0) as u8;
        }
    }
}

/// Pass 3: threshold on the channel mean; alpha is left alone.
fn binarize_pass(canvas: &mut RgbaImage) {
    for px in canvas.pixels_mut() {
        let [r, g, b, _] = px.0;
        let mean = (r as u16 + g as u16 + b as u16) / 3;
        let bit = if mean > 128 { 255 } else { 0 };
        px.0[0] = bit;
        px.0[1] = bit;
        px.0[2] = bit;
    }
}

fn encode_bitmap(bitmap: &RgbaImage, mime_type: &str) -> Result<Vec<u8>, ExtractError> {
    let format = ImageFormat::from_mime_type(mime_type)
        .ok_or_else(|| ExtractError::Encode(format!("unsupported image type: {mime_type}")))?;

    let mut out = Cursor::new(Vec::new());
    match format {
        // JPEG has no alpha channel; flatten before encoding.
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(bitmap.clone())
            .to_rgb8()
            .write_to(&mut out, format),
        _ => bitmap.write_to(&mut out, format),
    }
    .map_err(|e| ExtractError::Encode(e.to_string()))?;

    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_image() -> RgbaImage {
        let mut img = RgbaImage::new(4, 3);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = Rgba([
                (x * 60) as u8,
                (y * 90) as u8,
                ((x + y) * 30) as u8,
                200u8.wrapping_add((x * 10) as u8),
            ]);
        }
        img
    }

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn binarization_is_total_and_preserves_alpha() {
        let source = sample_image();
        let normalized = normalize_bitmap(DynamicImage::ImageRgba8(source.clone()));

        for (src, out) in source.pixels().zip(normalized.pixels()) {
            let [r, g, b, a] = out.0;
            assert!(r == 0 || r == 255);
            assert_eq!(r, g);
            assert_eq!(g, b);
            assert_eq!(a, src.0[3], "alpha must pass through unchanged");
        }
    }

    #[test]
    fn bright_and_dark_pixels_land_on_opposite_poles() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([250, 250, 250, 255]));
        img.put_pixel(1, 0, Rgba([10, 10, 10, 255]));

        let normalized = normalize_bitmap(DynamicImage::ImageRgba8(img));
        assert_eq!(normalized.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(normalized.get_pixel(1, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn contrast_pass_doubles_distance_from_midpoint() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([160, 160, 160, 255]));
        img.put_pixel(1, 0, Rgba([120, 120, 120, 255]));

        contrast_pass(&mut img);
        assert_eq!(img.get_pixel(0, 0).0[0], 192);
        assert_eq!(img.get_pixel(1, 0).0[0], 112);
    }

    #[test]
    fn grayscale_rounding_feeds_the_contrast_pass() {
        // (100 + 101 + 103) / 3 truncates to 101 before contrast sees it;
        // a fused transform would compute from 101.33 and land elsewhere.
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([100, 101, 103, 255]));

        grayscale_pass(&mut img);
        assert_eq!(img.get_pixel(0, 0).0[0], 101);
        contrast_pass(&mut img);
        assert_eq!(img.get_pixel(0, 0).0[0], 74);
    }

    #[test]
    fn preprocess_round_trips_through_the_original_format() {
        let payload = preprocess(&png_bytes(&sample_image()), "image/png").unwrap();
        assert_eq!(payload.mime_type, "image/png");

        let decoded = STANDARD.decode(&payload.data).unwrap();
        let reloaded = image::load_from_memory(&decoded).unwrap().to_rgba8();
        for px in reloaded.pixels() {
            assert!(px.0[0] == 0 || px.0[0] == 255);
        }
    }

    #[test]
    fn undecodable_input_is_a_decode_error() {
        let err = preprocess(b"not an image", "image/png").unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }

    #[test]
    fn unknown_mime_type_is_an_encode_error() {
        let err = preprocess(&png_bytes(&sample_image()), "image/x-nope").unwrap_err();
        assert!(matches!(err, ExtractError::Encode(_)));
    }
}
