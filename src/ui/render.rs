use image::RgbaImage;

pub const BG_COLOR: [u8; 3] = [0, 0, 0];

/// Pack RGB into softbuffer u32 format: 0x00RRGGBB.
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

fn unpack_rgb(v: u32) -> (u8, u8, u8) {
    ((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

/// Clear the framebuffer and draw `img` 1:1, centered. Pixels outside the
/// framebuffer are clipped; translucent pixels are blended over the
/// background.
pub fn draw_frame(dst: &mut [u32], dst_w: u32, dst_h: u32, img: &RgbaImage) {
    dst.fill(rgb(BG_COLOR[0], BG_COLOR[1], BG_COLOR[2]));

    let (src_w, src_h) = img.dimensions();
    let x0 = (dst_w as i64 - src_w as i64) / 2;
    let y0 = (dst_h as i64 - src_h as i64) / 2;

    let dx_start = x0.max(0) as u32;
    let dy_start = y0.max(0) as u32;
    let dx_end = ((x0 + src_w as i64).max(0) as u32).min(dst_w);
    let dy_end = ((y0 + src_h as i64).max(0) as u32).min(dst_h);

    let src = img.as_raw();
    for dy in dy_start..dy_end {
        let sy = (dy as i64 - y0) as usize;
        for dx in dx_start..dx_end {
            let sx = (dx as i64 - x0) as usize;
            let si = (sy * src_w as usize + sx) * 4;
            let di = dy as usize * dst_w as usize + dx as usize;
            if di >= dst.len() {
                continue;
            }

            let sa = src[si + 3] as u32;
            if sa == 255 {
                dst[di] = rgb(src[si], src[si + 1], src[si + 2]);
            } else if sa > 0 {
                let inv = 255 - sa;
                let (dr, dg, db) = unpack_rgb(dst[di]);
                let r = ((src[si] as u32 * sa + dr as u32 * inv) / 255) as u8;
                let g = ((src[si + 1] as u32 * sa + dg as u32 * inv) / 255) as u8;
                let b = ((src[si + 2] as u32 * sa + db as u32 * inv) / 255) as u8;
                dst[di] = rgb(r, g, b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn same_size_copies_every_pixel() {
        let img = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 5, 255]));
        let mut buf = vec![0xdeadbeef; 6];
        draw_frame(&mut buf, 3, 2, &img);
        assert_eq!(buf[0], rgb(0, 0, 5));
        assert_eq!(buf[2], rgb(20, 0, 5));
        assert_eq!(buf[5], rgb(20, 10, 5));
    }

    #[test]
    fn smaller_image_is_centered_on_background() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        let mut buf = vec![0; 16];
        draw_frame(&mut buf, 4, 4, &img);
        let white = rgb(255, 255, 255);
        let bg = rgb(BG_COLOR[0], BG_COLOR[1], BG_COLOR[2]);
        assert_eq!(buf[0], bg);
        assert_eq!(buf[5], white);
        assert_eq!(buf[10], white);
        assert_eq!(buf[15], bg);
    }

    #[test]
    fn larger_image_is_clipped() {
        let img = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let mut buf = vec![0; 4];
        draw_frame(&mut buf, 2, 2, &img);
        assert_eq!(buf[0], rgb(1, 1, 0));
        assert_eq!(buf[3], rgb(2, 2, 0));
    }

    #[test]
    fn transparent_pixels_blend_with_background() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 0]));
        let mut buf = vec![rgb(1, 2, 3)];
        draw_frame(&mut buf, 1, 1, &img);
        assert_eq!(buf[0], rgb(BG_COLOR[0], BG_COLOR[1], BG_COLOR[2]));
    }
}
