//! Minimal drawing surface the renderer needs: clear, filled rectangle,
//! and a line segment with a colour per endpoint.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 0RGB in a u32, the layout softbuffer presents
    #[inline]
    pub fn pack(self) -> u32 {
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }

    #[inline]
    pub fn unpack(px: u32) -> Self {
        Self::new((px >> 16) as u8, (px >> 8) as u8, px as u8)
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let f = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }
}

pub trait RenderTarget {
    fn size(&self) -> (usize, usize);

    fn clear(&mut self, color: Rgb);

    /// Fill the pixels covered by `[x, x + w) x [y, y + h)`, clipped to the target
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);

    /// Segment from `p0` to `p1`, colour interpolated between the endpoints
    fn draw_line(&mut self, p0: [f32; 2], c0: Rgb, p1: [f32; 2], c1: Rgb);
}

/// Row-major view over a `u32` pixel buffer
pub struct Frame<'a> {
    buf: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Frame<'a> {
    /// `buf` must hold at least `width * height` pixels; extra pixels are ignored
    pub fn new(buf: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = if width == 0 { 0 } else { height.min(buf.len() / width) };
        Self { buf, width, height }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(Rgb::unpack(self.buf[y * self.width + x]))
        } else {
            None
        }
    }

    #[inline]
    fn put(&mut self, x: i64, y: i64, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }
}

/// Round a span edge to a pixel index inside `0..=limit`
#[inline]
fn clip_edge(v: f32, limit: usize) -> usize {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, limit as f32) as usize
}

impl RenderTarget for Frame<'_> {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgb) {
        let px = color.pack();
        self.buf[..self.width * self.height].fill(px);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        if !(w > 0.0 && h > 0.0) {
            return;
        }
        let x0 = clip_edge(x, self.width);
        let x1 = clip_edge(x + w, self.width);
        let y0 = clip_edge(y, self.height);
        let y1 = clip_edge(y + h, self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let px = color.pack();
        for row in y0..y1 {
            let start = row * self.width;
            self.buf[start + x0..start + x1].fill(px);
        }
    }

    fn draw_line(&mut self, p0: [f32; 2], c0: Rgb, p1: [f32; 2], c1: Rgb) {
        if !(p0.iter().chain(p1.iter()).all(|v| v.is_finite())) {
            return;
        }
        // Keep the walk bounded for wildly off-screen endpoints
        let bound = (self.width.max(self.height) * 4) as f32;
        let clamp = |v: f32| v.round().clamp(-bound, bound) as i64;

        let (mut x, mut y) = (clamp(p0[0]), clamp(p0[1]));
        let (x1, y1) = (clamp(p1[0]), clamp(p1[1]));

        // Bresenham
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let total = dx.max(-dy).max(1) as f32;
        let mut err = dx + dy;
        let mut step = 0u32;

        loop {
            let color = c0.lerp(c1, step as f32 / total);
            self.put(x, y, color.pack());
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn test_pack_roundtrip_layout() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).pack(), 0x0012_3456);
        assert_eq!(Rgb::unpack(0x0012_3456), Rgb::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buf = vec![0u32; 8 * 6];
        let mut frame = Frame::new(&mut buf, 8, 6);
        frame.fill_rect(-3.0, 4.0, 5.0, 100.0, RED);

        assert_eq!(frame.pixel(0, 4), Some(RED));
        assert_eq!(frame.pixel(1, 5), Some(RED));
        assert_eq!(frame.pixel(2, 5), Some(Rgb::default()));
        assert_eq!(frame.pixel(0, 3), Some(Rgb::default()));
    }

    #[test]
    fn test_fill_rect_fully_outside_is_noop() {
        let mut buf = vec![0u32; 4 * 4];
        let mut frame = Frame::new(&mut buf, 4, 4);
        frame.fill_rect(10.0, 10.0, 5.0, 5.0, RED);
        frame.fill_rect(0.0, -20.0, 4.0, 5.0, RED);
        frame.fill_rect(0.0, 0.0, f32::NAN, 5.0, RED);
        assert!(buf.iter().all(|&px| px == 0));
    }

    #[test]
    fn test_line_endpoints_take_their_colors() {
        let mut buf = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buf, 10, 10);
        frame.draw_line([1.0, 1.0], RED, [8.0, 6.0], BLUE);
        assert_eq!(frame.pixel(1, 1), Some(RED));
        assert_eq!(frame.pixel(8, 6), Some(BLUE));
    }

    #[test]
    fn test_line_off_screen_does_not_panic() {
        let mut buf = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buf, 10, 10);
        frame.draw_line([-1e9, -1e9], RED, [1e9, 5.0], BLUE);
        frame.draw_line([f32::INFINITY, 0.0], RED, [5.0, 5.0], BLUE);
    }

    #[test]
    fn test_clear_respects_short_buffer() {
        let mut buf = vec![0u32; 10];
        let mut frame = Frame::new(&mut buf, 4, 4);
        assert_eq!(frame.size(), (4, 2));
        frame.clear(RED);
        assert_eq!(&buf[..8], &[RED.pack(); 8]);
        assert_eq!(&buf[8..], &[0, 0]);
    }
}
