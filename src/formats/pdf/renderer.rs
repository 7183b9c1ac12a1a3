//! PDF page rasterization
//!
//! Uses MuPDF for page rendering and the `image` crate for PNG encoding.

use std::io::Cursor;

use image::ImageFormat;
use mupdf::{Colorspace, Matrix};

use crate::document::{DocumentError, DocumentFormat, DocumentResult, RenderedView};
use crate::mupdf::SafeDocument;

/// Rasterize 1-based `page` at `scale` into a PNG view
pub(super) fn rasterize_page(
    doc: &SafeDocument,
    page: usize,
    scale: f32,
) -> DocumentResult<RenderedView> {
    let render_error = |reason: String| DocumentError::render(DocumentFormat::Pdf, page, reason);

    doc.with_doc(|mupdf_doc| {
        let loaded = mupdf_doc
            .load_page((page - 1) as i32)
            .map_err(|e| render_error(e.to_string()))?;

        let matrix = Matrix::new_scale(scale, scale);
        let colorspace = Colorspace::device_rgb();
        let pixmap = loaded
            .to_pixmap(&matrix, &colorspace, true, true)
            .map_err(|e| render_error(e.to_string()))?;

        let (png, width, height) = encode_png(&pixmap).map_err(render_error)?;
        Ok(RenderedView::Raster { png, width, height })
    })
    .map_err(|e| match e {
        DocumentError::Decode(reason) => render_error(reason),
        other => other,
    })
}

/// PNG-encode a pixmap, returning the bytes and pixel dimensions
fn encode_png(pixmap: &mupdf::Pixmap) -> Result<(Vec<u8>, u32, u32), String> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let channels = (pixmap.n() as usize).max(1);
    let pixels = width as usize * height as usize;

    // RGB or RGB + alpha samples, widened to RGBA
    let rgba: Vec<u8> = pixmap
        .samples()
        .chunks_exact(channels)
        .take(pixels)
        .flat_map(|px| {
            let channel = |i: usize| px.get(i).copied().unwrap_or(0);
            let alpha = if channels >= 4 { channel(3) } else { 255 };
            [channel(0), channel(1), channel(2), alpha]
        })
        .collect();

    let image = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| format!("pixmap too short for {}x{}", width, height))?;

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok((png, width, height))
}
