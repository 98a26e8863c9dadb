use crate::convert::ByteOrder;
use crate::error::WallpaperError;
use fractalspace_common::SurfaceSize;

/// Root-window properties desktop environments read the wallpaper pixmap from.
pub const ROOT_PIXMAP_PROPERTIES: [&str; 2] = ["_XROOTPMAP_ID", "ESETROOT_PMAP_ID"];

/// A display-server surface that receives finished wallpaper frames.
///
/// One pixmap is created up front and reused for the lifetime of the surface;
/// each frame is drawn into it and then republished.
pub trait RootSurface {
    /// Size frames must have when passed to [`RootSurface::draw`].
    fn display_size(&self) -> SurfaceSize;

    /// Byte order 32-bit pixels must be serialized in.
    fn byte_order(&self) -> ByteOrder;

    /// Server id of the persistent wallpaper pixmap.
    fn pixmap(&self) -> u32;

    /// Upload `pixels` (4 bytes per pixel, top row first) into the pixmap.
    fn draw(&mut self, pixels: &[u8], size: SurfaceSize) -> Result<(), WallpaperError>;

    /// Point the root pixmap properties at the pixmap and flush.
    fn publish(&mut self) -> Result<(), WallpaperError>;
}
