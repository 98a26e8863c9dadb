use fractalspace_common::SurfaceSize;

/// Byte order of 32-bit pixels in the server's image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LsbFirst,
    MsbFirst,
}

/// Pack bottom-to-top RGB rows into top-to-bottom `0xAARRGGBB` words with
/// full opacity.
///
/// Source row `y` lands on destination row `height - 1 - y`.
pub fn rgb_to_argb_flipped(rgb: &[u8], size: SurfaceSize, argb: &mut [u32]) {
    let width = size.width as usize;
    let height = size.height as usize;
    debug_assert_eq!(rgb.len(), width * height * 3);
    debug_assert_eq!(argb.len(), width * height);
    if size.is_empty() {
        return;
    }

    for (y, src_row) in rgb.chunks_exact(width * 3).take(height).enumerate() {
        let dst_start = (height - 1 - y) * width;
        let dst_row = &mut argb[dst_start..dst_start + width];
        for (word, px) in dst_row.iter_mut().zip(src_row.chunks_exact(3)) {
            *word = 0xFF00_0000 | ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
        }
    }
}

/// Serialize words in the server's byte order, reusing `out`'s allocation.
pub fn argb_to_bytes(argb: &[u32], order: ByteOrder, out: &mut Vec<u8>) {
    out.clear();
    out.reserve(argb.len() * 4);
    match order {
        ByteOrder::LsbFirst => out.extend(argb.iter().flat_map(|w| w.to_le_bytes())),
        ByteOrder::MsbFirst => out.extend(argb.iter().flat_map(|w| w.to_be_bytes())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_flips_rows_and_packs_argb() {
        // Bottom row first, as read back from the framebuffer.
        #[rustfmt::skip]
        let rgb = [
            0x10, 0x20, 0x30,   0x40, 0x50, 0x60, // source row 0 (bottom)
            0x70, 0x80, 0x90,   0xA0, 0xB0, 0xC0, // source row 1 (top)
        ];
        let mut argb = [0u32; 4];
        rgb_to_argb_flipped(&rgb, SurfaceSize::new(2, 2), &mut argb);
        assert_eq!(argb, [0xFF70_8090, 0xFFA0_B0C0, 0xFF10_2030, 0xFF40_5060]);
    }

    #[test]
    fn single_row_is_unchanged_in_order() {
        let rgb = [255, 0, 0, 0, 255, 0, 0, 0, 255];
        let mut argb = [0u32; 3];
        rgb_to_argb_flipped(&rgb, SurfaceSize::new(3, 1), &mut argb);
        assert_eq!(argb, [0xFFFF_0000, 0xFF00_FF00, 0xFF00_00FF]);
    }

    #[test]
    fn byte_order_serialization() {
        let mut out = Vec::new();
        argb_to_bytes(&[0xFF11_2233], ByteOrder::LsbFirst, &mut out);
        assert_eq!(out, [0x33, 0x22, 0x11, 0xFF]);
        argb_to_bytes(&[0xFF11_2233], ByteOrder::MsbFirst, &mut out);
        assert_eq!(out, [0xFF, 0x11, 0x22, 0x33]);
    }
}
