#![forbid(unsafe_code)]

use crate::render::{HeadlessError, TreeView};
use base64::Engine as _;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color for JPG rendering")]
    JpegBackground,
    #[error("JPG rendering requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("unsupported export format: {0} (expected png or jpg)")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(RasterError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

/// Rasterizes the current view.
///
/// The view is rendered with inline styles for the duration of the export and switched back
/// afterwards, also when rendering or encoding fails.
pub fn export(view: &mut TreeView, format: ExportFormat, options: &RasterOptions) -> Result<Vec<u8>> {
    let inline = view.inline_styles();
    let result = inline
        .to_svg()
        .map_err(RasterError::from)
        .and_then(|svg| match format {
            ExportFormat::Png => svg_to_png(&svg, options),
            ExportFormat::Jpeg => svg_to_jpeg(&svg, options),
        });
    if let Err(err) = &result {
        tracing::warn!(format = format.extension(), error = %err, "raster export failed");
    }
    result
}

/// `data:` URL for exported image bytes.
pub fn data_url(bytes: &[u8], format: ExportFormat) -> String {
    format!(
        "data:{};base64,{}",
        format.mime_type(),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let bg = options.background.as_deref().unwrap_or("white");
    let Some(color) = parse_tiny_skia_color(bg) else {
        return Err(RasterError::JpegBackground);
    };
    if color.alpha() != 1.0 {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let pixmap = svg_to_pixmap(svg, options.scale, Some(bg))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // The background is opaque, so every alpha byte is 255.
    let mut rgb = Vec::with_capacity((w as usize) * (h as usize) * 3);
    for px in pixmap.data().chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "sans-serif".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // usvg maps the viewBox onto the root width/height, so the document size is the output size.
    let size = tree.size();
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        tracing::warn!(scale, "invalid raster scale, using 1");
        1.0
    };
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;

    if let Some(bg) = background {
        match parse_tiny_skia_color(bg) {
            Some(color) => pixmap.fill(color),
            None => tracing::warn!(background = bg, "unrecognized background color, ignoring"),
        }
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        "yellow" => return Some(tiny_skia::Color::from_rgba8(255, 255, 0, 255)),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    let (r, g, b, a) = match bytes.len() {
        3 => (hex1(bytes[0])?, hex1(bytes[1])?, hex1(bytes[2])?, 255),
        4 => (
            hex1(bytes[0])?,
            hex1(bytes[1])?,
            hex1(bytes[2])?,
            hex1(bytes[3])?,
        ),
        6 => (
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            255,
        ),
        8 => (
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            hex2(&bytes[6..8])?,
        ),
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutConfig;
    use crate::render::StyleMode;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;

    const TREE: &str = r#"[{"id":"TEA"},{"id":"TEA.TEAK","def":"a hardwood"},{"id":"TEA.TEAL"}]"#;

    #[test]
    fn svg_to_png_produces_png_signature() {
        let bytes = svg_to_png(SQUARE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn svg_to_jpeg_produces_jpeg_signature() {
        let bytes = svg_to_jpeg(SQUARE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn jpeg_rejects_translucent_backgrounds() {
        let opts = RasterOptions {
            background: Some("#00000080".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            svg_to_jpeg(SQUARE, &opts),
            Err(RasterError::JpegOpaqueBackgroundRequired)
        ));
    }

    #[test]
    fn colors_parse() {
        assert!(parse_tiny_skia_color("#fff").is_some());
        assert!(parse_tiny_skia_color("#FFFFFF80").is_some());
        assert!(parse_tiny_skia_color("white").is_some());
        assert!(parse_tiny_skia_color("#ggg").is_none());
        assert!(parse_tiny_skia_color("teal").is_none());
    }

    #[test]
    fn format_names() {
        assert_eq!("PNG".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("jpeg".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert!("gif".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn data_url_is_base64_with_mime_type() {
        assert_eq!(data_url(b"abc", ExportFormat::Png), "data:image/png;base64,YWJj");
        assert!(data_url(&[], ExportFormat::Jpeg).starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn export_restores_stylesheet_mode() {
        let mut view = TreeView::from_json(TREE, LayoutConfig::default()).unwrap();
        assert_eq!(view.style_mode(), StyleMode::Stylesheet);

        let png = export(&mut view, ExportFormat::Png, &RasterOptions::default()).unwrap();
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
        assert_eq!(view.style_mode(), StyleMode::Stylesheet);

        let bad = RasterOptions {
            background: Some("not-a-color".to_string()),
            ..Default::default()
        };
        assert!(export(&mut view, ExportFormat::Jpeg, &bad).is_err());
        assert_eq!(view.style_mode(), StyleMode::Stylesheet);
        assert!(view.to_svg().unwrap().contains("<style>"));
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn export_failures_are_logged() {
        let mut view = TreeView::from_json(TREE, LayoutConfig::default()).unwrap();
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let bad = RasterOptions {
            background: Some("#00000080".to_string()),
            ..Default::default()
        };
        let result = tracing::subscriber::with_default(subscriber, || {
            export(&mut view, ExportFormat::Jpeg, &bad)
        });
        assert!(matches!(result, Err(RasterError::JpegOpaqueBackgroundRequired)));

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("raster export failed"), "{logs}");
        assert!(logs.contains("WARN"), "{logs}");
    }
}
