use std::io::Cursor;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, Luma};
use qrcode::QrCode;

use crate::core::traits::ScannableCodeEncoder;
use crate::core::EncodingError;

/// Renders text as a QR code PNG, returned as a `data:` URL
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder;

impl QrCodeEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode `data` as a base64 PNG
    pub fn render_png_base64(data: &str) -> Result<String, EncodingError> {
        let code = QrCode::new(data.as_bytes()).map_err(|e| EncodingError::Qr(e.to_string()))?;
        let image = code.render::<Luma<u8>>().build();

        let dynamic_image = DynamicImage::ImageLuma8(image);
        let mut buffer = Cursor::new(Vec::new());
        dynamic_image
            .write_to(&mut buffer, image::ImageOutputFormat::Png)
            .map_err(|e| EncodingError::Image(e.to_string()))?;

        Ok(general_purpose::STANDARD.encode(buffer.get_ref()))
    }
}

#[async_trait]
impl ScannableCodeEncoder for QrCodeEncoder {
    async fn encode(&self, text: &str) -> Result<String, EncodingError> {
        let png = Self::render_png_base64(text)?;
        Ok(format!("data:image/png;base64,{}", png))
    }
}
