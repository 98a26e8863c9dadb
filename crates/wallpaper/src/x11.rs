use crate::convert::ByteOrder;
use crate::error::WallpaperError;
use crate::surface::{ROOT_PIXMAP_PROPERTIES, RootSurface};
use fractalspace_common::{SurfaceSize, WallpaperConfig};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::protocol::randr::ConnectionExt as _;
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ChangeWindowAttributesAux, CloseDown, ConnectionExt as _, CreateGCAux,
    Gcontext, ImageFormat, ImageOrder, Pixmap, PropMode, Window,
};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

/// Fixed part of a PutImage request, including the 4-byte BIG-REQUESTS
/// length that `maximum_request_bytes` allows for.
const PUT_IMAGE_HEADER_BYTES: usize = 28;

/// Root window of the default X screen, drawn through one persistent pixmap.
pub struct X11RootSurface {
    conn: RustConnection,
    root: Window,
    depth: u8,
    pixmap: Pixmap,
    gc: Gcontext,
    atoms: [Atom; 2],
    size: SurfaceSize,
    byte_order: ByteOrder,
    set_root_background: bool,
    retain_permanent: bool,
}

impl X11RootSurface {
    pub fn connect(config: &WallpaperConfig) -> Result<Self, WallpaperError> {
        let (conn, screen_num) = x11rb::connect(None)?;
        let setup = conn.setup();
        let screen = setup
            .roots
            .get(screen_num)
            .ok_or(WallpaperError::NoScreen(screen_num))?;
        let root = screen.root;
        let depth = screen.root_depth;

        let bits_per_pixel = setup
            .pixmap_formats
            .iter()
            .find(|f| f.depth == depth)
            .map(|f| f.bits_per_pixel);
        if bits_per_pixel != Some(32) {
            return Err(WallpaperError::UnsupportedDepth {
                depth,
                bits_per_pixel,
            });
        }
        let byte_order = if setup.image_byte_order == ImageOrder::MSB_FIRST {
            ByteOrder::MsbFirst
        } else {
            ByteOrder::LsbFirst
        };
        let screen_size = SurfaceSize::new(
            screen.width_in_pixels as u32,
            screen.height_in_pixels as u32,
        );

        let size = primary_output_size(&conn, root)
            .unwrap_or(screen_size)
            .at_least_one();

        let mut atoms = [x11rb::NONE; 2];
        for (slot, name) in atoms.iter_mut().zip(ROOT_PIXMAP_PROPERTIES) {
            let atom = conn.intern_atom(false, name.as_bytes())?.reply()?.atom;
            if atom == x11rb::NONE {
                return Err(WallpaperError::MissingAtom(name));
            }
            *slot = atom;
        }

        let pixmap = conn.generate_id()?;
        conn.create_pixmap(
            depth,
            pixmap,
            root,
            clamp_u16(size.width),
            clamp_u16(size.height),
        )?;
        let gc = conn.generate_id()?;
        conn.create_gc(gc, pixmap, &CreateGCAux::new())?;

        if config.retain_permanent {
            conn.set_close_down_mode(CloseDown::RETAIN_PERMANENT)?;
        }
        conn.flush()?;

        tracing::info!(%size, depth, ?byte_order, pixmap, "x11 root surface ready");

        Ok(Self {
            conn,
            root,
            depth,
            pixmap,
            gc,
            atoms,
            size,
            byte_order,
            set_root_background: config.set_root_background,
            retain_permanent: config.retain_permanent,
        })
    }
}

impl RootSurface for X11RootSurface {
    fn display_size(&self) -> SurfaceSize {
        self.size
    }

    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    fn pixmap(&self) -> u32 {
        self.pixmap
    }

    fn draw(&mut self, pixels: &[u8], size: SurfaceSize) -> Result<(), WallpaperError> {
        if size != self.size || pixels.len() != size.pixel_count() * 4 {
            return Err(WallpaperError::FrameSize {
                expected: self.size,
                actual_bytes: pixels.len(),
            });
        }

        let stride = size.width as usize * 4;
        let band = rows_per_request(size.width, self.conn.maximum_request_bytes());
        for (y, rows) in row_bands(size.height, band) {
            let start = y as usize * stride;
            let chunk = &pixels[start..start + rows as usize * stride];
            self.conn.put_image(
                ImageFormat::Z_PIXMAP,
                self.pixmap,
                self.gc,
                clamp_u16(size.width),
                clamp_u16(rows),
                0,
                y.min(i16::MAX as u32) as i16,
                0,
                self.depth,
                chunk,
            )?;
        }
        Ok(())
    }

    fn publish(&mut self) -> Result<(), WallpaperError> {
        for atom in self.atoms {
            self.conn.change_property32(
                PropMode::REPLACE,
                self.root,
                atom,
                AtomEnum::PIXMAP,
                &[self.pixmap],
            )?;
        }
        if self.set_root_background {
            self.conn.change_window_attributes(
                self.root,
                &ChangeWindowAttributesAux::new().background_pixmap(self.pixmap),
            )?;
            self.conn.clear_area(false, self.root, 0, 0, 0, 0)?;
        }
        self.conn.flush()?;
        Ok(())
    }
}

impl Drop for X11RootSurface {
    fn drop(&mut self) {
        let _ = self.conn.free_gc(self.gc);
        if !self.retain_permanent {
            let _ = self.conn.free_pixmap(self.pixmap);
        }
        let _ = self.conn.flush();
    }
}

/// Size of the CRTC driving the primary RandR output, if there is one.
fn primary_output_size(conn: &RustConnection, root: Window) -> Option<SurfaceSize> {
    let lookup = || -> Result<Option<SurfaceSize>, WallpaperError> {
        let output = conn.randr_get_output_primary(root)?.reply()?.output;
        if output == x11rb::NONE {
            return Ok(None);
        }
        let crtc = conn
            .randr_get_output_info(output, x11rb::CURRENT_TIME)?
            .reply()?
            .crtc;
        if crtc == x11rb::NONE {
            return Ok(None);
        }
        let info = conn.randr_get_crtc_info(crtc, x11rb::CURRENT_TIME)?.reply()?;
        let size = SurfaceSize::new(info.width as u32, info.height as u32);
        Ok((!size.is_empty()).then_some(size))
    };
    match lookup() {
        Ok(size) => {
            if size.is_none() {
                tracing::debug!("no primary output, using screen size");
            }
            size
        }
        Err(e) => {
            tracing::debug!("randr query failed, using screen size: {e}");
            None
        }
    }
}

/// Rows of a `width`-pixel, 32bpp image that fit in one PutImage request.
fn rows_per_request(width: u32, max_request_bytes: usize) -> u32 {
    let row_bytes = (width as usize * 4).max(1);
    let rows = max_request_bytes.saturating_sub(PUT_IMAGE_HEADER_BYTES) / row_bytes;
    rows.clamp(1, u16::MAX as usize) as u32
}

/// `(first_row, row_count)` bands of at most `band` rows covering `height`.
fn row_bands(height: u32, band: u32) -> impl Iterator<Item = (u32, u32)> {
    let band = band.max(1);
    (0..height)
        .step_by(band as usize)
        .map(move |y| (y, band.min(height - y)))
}

fn clamp_u16(v: u32) -> u16 {
    v.min(u16::MAX as u32) as u16
}
