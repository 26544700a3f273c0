//! Deed analyzer: image in, extraction outcome out.

use super::{build_prompt, parse_response, SYSTEM_PROMPT};
use crate::client::AnthropicClient;
use crate::error::{ExtractionError, ExtractionResult};
use crate::models::ExtractionOutcome;
use crate::repositories::DeedExtractor;
use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageError, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Extracts deed fields by sending the scan to a vision model.
pub struct DeedAnalyzer {
    client: AnthropicClient,
}

impl DeedAnalyzer {
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }
}

impl DeedExtractor for DeedAnalyzer {
    fn extract_components(&self, image_path: &Path) -> ExtractionResult<ExtractionOutcome> {
        let png_base64 = encode_grayscale_png(image_path)?;
        let prompt = build_prompt(image_path);

        tracing::info!(
            "Analyzing {} with {}",
            image_path.display(),
            self.client.model()
        );
        let raw_response = self
            .client
            .analyze_image(&png_base64, SYSTEM_PROMPT, &prompt)?;

        Ok(parse_response(&raw_response))
    }
}

/// Load an image (TIFF, PNG or JPEG), convert it to 8-bit grayscale and return
/// it as base64-encoded PNG.
pub fn encode_grayscale_png(image_path: &Path) -> ExtractionResult<String> {
    let image_error = |e: ImageError| match e {
        ImageError::IoError(io) => ExtractionError::Io(io),
        other => ExtractionError::Image {
            path: image_path.display().to_string(),
            reason: other.to_string(),
        },
    };

    let source = image::open(image_path).map_err(image_error)?;
    let grayscale = DynamicImage::ImageLuma8(source.to_luma8());

    let mut png = Cursor::new(Vec::new());
    grayscale
        .write_to(&mut png, ImageFormat::Png)
        .map_err(image_error)?;

    Ok(STANDARD.encode(png.into_inner()))
}
