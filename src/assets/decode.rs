use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::foundation::error::{MemeError, MemeResult};

/// Mime type assumed when a data URL or service payload does not name one.
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// Decoded raster plus the encoded bytes and mime type it came from.
///
/// Cloning is cheap: pixels and bytes are shared. An `ImageAsset` is never mutated; edits and
/// generations produce a new one.
#[derive(Clone, Debug)]
pub struct ImageAsset {
    pixels: Arc<image::RgbaImage>,
    encoded: Arc<Vec<u8>>,
    mime_type: String,
}

impl ImageAsset {
    /// Decode `bytes`, sniffing the mime type from the content.
    pub fn from_bytes(bytes: Vec<u8>) -> MemeResult<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|e| MemeError::input(format!("unrecognized image data: {e}")))?;
        let mime = format.to_mime_type().to_string();
        Self::from_bytes_with_mime(bytes, mime)
    }

    /// Decode `bytes` and keep `mime_type` as the encoding descriptor.
    pub fn from_bytes_with_mime(bytes: Vec<u8>, mime_type: impl Into<String>) -> MemeResult<Self> {
        let dyn_img = image::load_from_memory(&bytes)
            .map_err(|e| MemeError::input(format!("decode image from memory: {e}")))?;
        let mut mime_type = mime_type.into();
        if mime_type.trim().is_empty() {
            mime_type = DEFAULT_MIME_TYPE.to_string();
        }
        Ok(Self {
            pixels: Arc::new(dyn_img.to_rgba8()),
            encoded: Arc::new(bytes),
            mime_type,
        })
    }

    /// Decode a base64 payload tagged with `mime_type`.
    pub fn from_base64(data: &str, mime_type: impl Into<String>) -> MemeResult<Self> {
        let bytes = BASE64
            .decode(data.trim())
            .map_err(|e| MemeError::input(format!("invalid base64 image payload: {e}")))?;
        Self::from_bytes_with_mime(bytes, mime_type)
    }

    /// Decode a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> MemeResult<Self> {
        let (mime, payload) = parse_data_url(url)?;
        Self::from_base64(payload, mime)
    }

    /// Wrap an already decoded raster, encoding it as PNG for the service side.
    pub fn from_rgba(pixels: image::RgbaImage) -> MemeResult<Self> {
        let encoded = crate::export::png::encode_png(&pixels)?;
        Ok(Self {
            pixels: Arc::new(pixels),
            encoded: Arc::new(encoded),
            mime_type: DEFAULT_MIME_TYPE.to_string(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Decoded pixels, straight-alpha RGBA8.
    pub fn pixels(&self) -> &image::RgbaImage {
        &self.pixels
    }

    /// Original encoded bytes.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(self.encoded.as_slice())
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// True when both assets share the same decoded buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// Split a base64 data URL into `(mime, payload)`.
///
/// The mime type falls back to [`DEFAULT_MIME_TYPE`] when the header does not carry one.
pub fn parse_data_url(url: &str) -> MemeResult<(&str, &str)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| MemeError::input("data URL must start with 'data:'"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| MemeError::input("data URL has no payload separator"))?;
    let Some(mime) = header.strip_suffix(";base64") else {
        return Err(MemeError::input("only base64 data URLs are supported"));
    };
    let mime = if mime.is_empty() { DEFAULT_MIME_TYPE } else { mime };
    Ok((mime, payload))
}

/// Convert straight RGBA8 to premultiplied alpha in place.
pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Inverse of [`premultiply_rgba8_in_place`]; opaque pixels are left untouched.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 || a == 0 {
            continue;
        }
        let unmul = |c: u8| -> u8 { ((c as u16 * 255 + a / 2) / a).min(255) as u8 };
        px[0] = unmul(px[0]);
        px[1] = unmul(px[1]);
        px[2] = unmul(px[2]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
