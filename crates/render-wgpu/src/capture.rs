use fractalspace_common::SurfaceSize;

/// Color format of the offscreen render target.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

const BYTES_PER_TEXEL: u32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to map readback buffer: {0}")]
    Map(#[from] wgpu::BufferAsyncError),
    #[error("readback callback was dropped before completing")]
    Disconnected,
    #[error("capture buffer holds {actual} bytes, frame needs {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Offscreen color target plus a persistent readback buffer.
///
/// [`OffscreenTarget::capture_into`] fills an RGB buffer with rows ordered
/// bottom-to-top, the same layout a GL `glReadPixels` produces.
pub struct OffscreenTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    readback: wgpu::Buffer,
    size: SurfaceSize,
    padded_bytes_per_row: u32,
}

impl OffscreenTarget {
    pub fn new(device: &wgpu::Device, size: SurfaceSize) -> Self {
        let size = size.at_least_one();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen_target"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&Default::default());

        let padded_bytes_per_row = padded_row_bytes(size.width);
        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("offscreen_readback"),
            size: padded_bytes_per_row as u64 * size.height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        tracing::debug!(%size, padded_bytes_per_row, "offscreen target created");

        Self {
            texture,
            view,
            readback,
            size,
            padded_bytes_per_row,
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Copy the last rendered frame into `rgb` (`width * height * 3` bytes,
    /// bottom row first). Blocks until the GPU has finished.
    pub fn capture_into(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgb: &mut [u8],
    ) -> Result<(), CaptureError> {
        let expected = self.size.pixel_count() * 3;
        if rgb.len() != expected {
            return Err(CaptureError::SizeMismatch {
                expected,
                actual: rgb.len(),
            });
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("capture_encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_bytes_per_row),
                    rows_per_image: Some(self.size.height),
                },
            },
            wgpu::Extent3d {
                width: self.size.width,
                height: self.size.height,
                depth_or_array_layers: 1,
            },
        );
        let submission = queue.submit(std::iter::once(encoder.finish()));

        let slice = self.readback.slice(..);
        let (tx, rx) = std::sync::mpsc::sync_channel(1);
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = device.poll(wgpu::Maintain::WaitForSubmissionIndex(submission));
        rx.recv().map_err(|_| CaptureError::Disconnected)??;

        {
            let data = slice.get_mapped_range();
            rgba_rows_to_rgb_bottom_up(&data, self.size, self.padded_bytes_per_row as usize, rgb);
        }
        self.readback.unmap();
        Ok(())
    }
}

fn padded_row_bytes(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_TEXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Strip row padding and alpha from top-down RGBA rows, writing RGB rows in
/// bottom-to-top order.
fn rgba_rows_to_rgb_bottom_up(rgba: &[u8], size: SurfaceSize, padded_stride: usize, rgb: &mut [u8]) {
    let width = size.width as usize;
    let height = size.height as usize;
    let rgb_stride = width * 3;
    for row in 0..height {
        let src = &rgba[row * padded_stride..row * padded_stride + width * 4];
        let dst_row = height - 1 - row;
        let dst = &mut rgb[dst_row * rgb_stride..(dst_row + 1) * rgb_stride];
        for (out, texel) in dst.chunks_exact_mut(3).zip(src.chunks_exact(4)) {
            out.copy_from_slice(&texel[..3]);
        }
    }
}
