use crate::error::WallpaperError;
use fractalspace_common::{FitMode, ScaleFilter, SurfaceSize};
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba};
use std::borrow::Cow;

/// Source rectangle taken from the rendered frame before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Rectangle of `src` that is scaled onto `dst` for a given fit mode.
pub fn crop_rect(src: SurfaceSize, dst: SurfaceSize, fit: FitMode) -> CropRect {
    let full = CropRect {
        x: 0,
        y: 0,
        width: src.width,
        height: src.height,
    };
    if fit == FitMode::Stretch || src.is_empty() || dst.is_empty() {
        return full;
    }

    let (sw, sh) = (src.width as u64, src.height as u64);
    let (dw, dh) = (dst.width as u64, dst.height as u64);
    if sw * dh > dw * sh {
        // Source is wider than the display: trim the sides.
        let width = ((sh * dw) / dh).max(1) as u32;
        CropRect {
            x: (src.width - width) / 2,
            width,
            ..full
        }
    } else {
        let height = ((sw * dh) / dw).max(1) as u32;
        CropRect {
            y: (src.height - height) / 2,
            height,
            ..full
        }
    }
}

/// Crop and scale 4-byte pixels from `src` to exactly `dst`.
///
/// Channels are filtered independently, so any 4x8-bit layout works. When no
/// resampling is needed the input is borrowed.
pub fn fit_frame<'a>(
    pixels: &'a [u8],
    src: SurfaceSize,
    dst: SurfaceSize,
    fit: FitMode,
    filter: ScaleFilter,
) -> Result<Cow<'a, [u8]>, WallpaperError> {
    if src == dst {
        return Ok(Cow::Borrowed(pixels));
    }
    let frame = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(src.width, src.height, pixels).ok_or(
        WallpaperError::FrameSize {
            expected: src,
            actual_bytes: pixels.len(),
        },
    )?;

    let rect = crop_rect(src, dst, fit);
    let cropped = imageops::crop_imm(&frame, rect.x, rect.y, rect.width, rect.height);
    let scaled = imageops::resize(&*cropped, dst.width, dst.height, filter_type(filter));
    Ok(Cow::Owned(scaled.into_raw()))
}

fn filter_type(filter: ScaleFilter) -> FilterType {
    match filter {
        ScaleFilter::Nearest => FilterType::Nearest,
        ScaleFilter::Triangle => FilterType::Triangle,
        ScaleFilter::CatmullRom => FilterType::CatmullRom,
        ScaleFilter::Lanczos3 => FilterType::Lanczos3,
    }
}
