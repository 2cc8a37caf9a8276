//! PNG and WebP export rendered by the external engine.
//!
//! The SVG layout is wrapped in a minimal HTML page, screenshotted at the
//! SVG's own size, cropped to that box and re-encoded.

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat};

use crate::error::ExportError;
use crate::export::engine::{RenderEngine, Viewport};
use crate::export::format::{Artifact, ExportFormat, FormatDescriptor};
use crate::export::formats::svg::SvgDocument;
use crate::export::platform::PlatformGate;

const PNG: FormatDescriptor = FormatDescriptor {
    id: "png",
    name: "PNG Image",
    extension: "png",
    description: "PNG image with full color emoji support (requires Chromium)",
    binary: true,
    content_type: Some("image/png"),
    requires_engine: true,
};

const WEBP: FormatDescriptor = FormatDescriptor {
    id: "webp",
    name: "WebP Image",
    extension: "webp",
    description: "WebP image with full color emoji support (requires Chromium)",
    binary: true,
    content_type: Some("image/webp"),
    requires_engine: true,
};

pub struct BrowserFormat {
    descriptor: FormatDescriptor,
    encoding: ImageFormat,
    gate: PlatformGate,
    engine: Arc<dyn RenderEngine>,
}

impl BrowserFormat {
    pub fn png(gate: PlatformGate, engine: Arc<dyn RenderEngine>) -> Self {
        Self {
            descriptor: PNG,
            encoding: ImageFormat::Png,
            gate,
            engine,
        }
    }

    pub fn webp(gate: PlatformGate, engine: Arc<dyn RenderEngine>) -> Self {
        Self {
            descriptor: WEBP,
            encoding: ImageFormat::WebP,
            gate,
            engine,
        }
    }
}

impl ExportFormat for BrowserFormat {
    fn descriptor(&self) -> &FormatDescriptor {
        &self.descriptor
    }

    fn convert(&self, tree: &str) -> Result<Artifact, ExportError> {
        self.gate.check()?;
        let svg = SvgDocument::layout(tree);
        let viewport = Viewport {
            width: svg.width,
            height: svg.height,
        };

        let screenshot = {
            let mut session = self.engine.launch()?;
            session.screenshot(&html_page(svg.element()), viewport)?
        };

        let bytes = crop_and_encode(&screenshot, viewport, self.encoding)?;
        Ok(Artifact::Binary(bytes))
    }
}

fn html_page(svg: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n\
         html, body {{ margin: 0; padding: 0; background: #000000; }}\n\
         svg {{ display: block; }}\n</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        svg
    )
}

/// Crop a PNG screenshot to `viewport` and encode it as `encoding`.
fn crop_and_encode(
    screenshot: &[u8],
    viewport: Viewport,
    encoding: ImageFormat,
) -> Result<Vec<u8>, ExportError> {
    let shot = image::load_from_memory_with_format(screenshot, ImageFormat::Png)?;
    let width = viewport.width.min(shot.width());
    let height = viewport.height.min(shot.height());
    let cropped = DynamicImage::ImageRgba8(shot.crop_imm(0, 0, width, height).to_rgba8());

    let mut bytes = Vec::new();
    cropped.write_to(&mut Cursor::new(&mut bytes), encoding)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineFailure;
    use crate::test_utils::FakeEngine;

    #[test]
    fn png_is_cropped_to_svg_box() {
        let engine = FakeEngine::working();
        let format = BrowserFormat::png(PlatformGate::open(), Arc::new(engine.clone()));
        let Artifact::Binary(bytes) = format.convert("📂 root\n└── 📄 a.txt").unwrap() else {
            panic!("expected binary artifact");
        };
        let svg = SvgDocument::layout("📂 root\n└── 📄 a.txt");
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (svg.width, svg.height));
        assert_eq!(engine.launches(), 1);
    }

    #[test]
    fn webp_output_has_riff_header() {
        let format = BrowserFormat::webp(PlatformGate::open(), Arc::new(FakeEngine::working()));
        let artifact = format.convert("📂 root").unwrap();
        let bytes = artifact.as_bytes();
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn engine_failure_propagates() {
        let format = BrowserFormat::png(PlatformGate::open(), Arc::new(FakeEngine::missing()));
        let err = format.convert("x").unwrap_err();
        assert!(matches!(
            err,
            ExportError::EngineUnavailable(EngineFailure::NotInstalled)
        ));
    }

    #[test]
    fn disabled_platform_skips_launch() {
        let engine = FakeEngine::working();
        let gate = PlatformGate::for_platform("linux", &["linux".to_string()]);
        let format = BrowserFormat::png(gate, Arc::new(engine.clone()));
        assert!(matches!(
            format.convert("x"),
            Err(ExportError::UnsupportedPlatform { .. })
        ));
        assert_eq!(engine.launches(), 0);
    }

    #[test]
    fn page_embeds_svg_without_margins() {
        let page = html_page("<svg></svg>\n");
        assert!(page.contains("margin: 0"));
        assert!(page.contains("<body>\n<svg></svg>"));
    }
}
