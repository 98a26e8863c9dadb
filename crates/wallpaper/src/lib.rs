//! Wallpaper compositor: every frame, convert the captured RGB framebuffer
//! to the server's pixel format, fit it to the display and republish it as
//! the root pixmap.
//!
//! # Invariants
//! - One destination pixmap for the compositor's lifetime; it is redrawn,
//!   never recreated.
//! - `_XROOTPMAP_ID` and `ESETROOT_PMAP_ID` always name that same pixmap.
//! - Capture and publish buffers are sized once from the render size and
//!   reused; only the scaled intermediate is per-frame.

mod compositor;
mod convert;
mod error;
mod scale;
mod surface;
mod x11;

pub use compositor::WallpaperCompositor;
pub use convert::{ByteOrder, argb_to_bytes, rgb_to_argb_flipped};
pub use error::WallpaperError;
pub use scale::{CropRect, crop_rect, fit_frame};
pub use surface::{ROOT_PIXMAP_PROPERTIES, RootSurface};
pub use x11::X11RootSurface;
