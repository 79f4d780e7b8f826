use crate::Raster;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{AppError, CanvasImage};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder as _, ImageFormat, RgbaImage};

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode the raster as a PNG data URI, like `HTMLCanvasElement.toDataURL()`
pub fn encode(raster: &Raster) -> Result<CanvasImage, AppError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(
            raster.as_raw(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| AppError::Encoding(e.to_string()))?;

    log::debug!(
        "encoded {}x{} drawing into {} png bytes",
        raster.width(),
        raster.height(),
        png.len()
    );
    Ok(CanvasImage::new(format!(
        "{}{}",
        PNG_DATA_URI_PREFIX,
        STANDARD.encode(&png)
    )))
}

/// Inverse of [`encode`]
pub fn decode_data_uri(data_uri: &str) -> Result<RgbaImage, AppError> {
    let payload = data_uri
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or_else(|| AppError::Encoding("not a PNG data URI".to_string()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| AppError::Encoding(e.to_string()))?;
    let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .map_err(|e| AppError::Encoding(e.to_string()))?;
    Ok(image.to_rgba8())
}
