// File: crates/ellingham-core/src/output.rs
// Summary: Output format selection and encoding (Skia raster for PNG/JPEG, SVG canvas for vectors).

use std::path::Path;

use skia_safe as skia;
use tracing::info;

use crate::diagram::RenderOptions;
use crate::error::RenderError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Svg,
}

impl OutputFormat {
    /// Pick the format from the file extension; no extension means PNG.
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let Some(ext) = path.extension() else { return Ok(Self::Png) };
        let ext = ext.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "svg" => Ok(Self::Svg),
            _ => Err(RenderError::UnsupportedFormat(ext)),
        }
    }
}

/// Encode and write to `path`, creating parent directories.
pub(crate) fn write(
    path: &Path,
    opts: &RenderOptions,
    draw: impl Fn(&skia::Canvas),
) -> Result<(), RenderError> {
    let format = OutputFormat::from_path(path)?;
    let bytes = match format {
        OutputFormat::Png => raster_bytes(opts, skia::EncodedImageFormat::PNG, "PNG", &draw)?,
        OutputFormat::Jpeg => raster_bytes(opts, skia::EncodedImageFormat::JPEG, "JPEG", &draw)?,
        OutputFormat::Svg => svg_bytes(opts, &draw),
    };

    let io_err = |source| RenderError::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, &bytes).map_err(io_err)?;
    info!(path = %path.display(), ?format, bytes = bytes.len(), "wrote diagram");
    Ok(())
}

pub(crate) fn raster_bytes(
    opts: &RenderOptions,
    format: skia::EncodedImageFormat,
    name: &'static str,
    draw: impl Fn(&skia::Canvas),
) -> Result<Vec<u8>, RenderError> {
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or(RenderError::Surface { width: opts.width, height: opts.height })?;
    draw(surface.canvas());

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image.encode_to_data(format).ok_or(RenderError::Encode(name))?;
    Ok(data.as_bytes().to_vec())
}

pub(crate) fn svg_bytes(opts: &RenderOptions, draw: impl Fn(&skia::Canvas)) -> Vec<u8> {
    let bounds = skia::Rect::from_wh(opts.width as f32, opts.height as f32);
    let canvas = skia::svg::Canvas::new(bounds, None);
    draw(&canvas);
    canvas.end().as_bytes().to_vec()
}
