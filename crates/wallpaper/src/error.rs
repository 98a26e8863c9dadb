use fractalspace_common::SurfaceSize;

#[derive(Debug, thiserror::Error)]
pub enum WallpaperError {
    #[error("cannot open X display: {0}")]
    Connect(#[from] x11rb::errors::ConnectError),
    #[error("X connection failed: {0}")]
    Connection(#[from] x11rb::errors::ConnectionError),
    #[error("X request failed: {0}")]
    Reply(#[from] x11rb::errors::ReplyError),
    #[error("X resource allocation failed: {0}")]
    ReplyOrId(#[from] x11rb::errors::ReplyOrIdError),
    #[error("X server returned no atom for {0}")]
    MissingAtom(&'static str),
    #[error("X screen {0} does not exist")]
    NoScreen(usize),
    #[error("root depth {depth} is not backed by 32 bits per pixel (server reports {bits_per_pixel:?})")]
    UnsupportedDepth { depth: u8, bits_per_pixel: Option<u8> },
    #[error("frame of {expected} does not match {actual_bytes} bytes")]
    FrameSize {
        expected: SurfaceSize,
        actual_bytes: usize,
    },
}
