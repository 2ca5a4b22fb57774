// Raster surface the grid is painted onto. Sized once at startup from the
// terminal dimensions; this is where out-of-range channels get truncated and
// alpha is blended, mirroring what a 2D canvas does with the unclamped
// values the palette hands over.
use crate::palette::Fill;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0 };
}

pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::BLACK; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Pixel::BLACK);
    }

    /// Fill an axis-aligned rect. A nonzero rotation rotates the coordinate
    /// system about the surface origin for this rect only (the save /
    /// rotate / fill / restore bracket of a 2D canvas), so the rect lands
    /// swept around (0, 0), not spun in place.
    ///
    /// Channels clamp to 0-255, alpha to 0-1, and alpha blends src-over onto
    /// the existing pixel.
    pub fn fill_rect(&mut self, fill: &Fill, x: f64, y: f64, w: f64, h: f64, rotation_deg: f64) {
        let Some((r, g, b, a)) = components(fill) else {
            return;
        };
        if w <= 0.0 || h <= 0.0 || a <= 0.0 {
            return;
        }
        let (sin, cos) = rotation_deg.to_radians().sin_cos();

        // Device-space bounding box of the (possibly rotated) rect.
        let corners = [
            rotate(x, y, sin, cos),
            rotate(x + w, y, sin, cos),
            rotate(x, y + h, sin, cos),
            rotate(x + w, y + h, sin, cos),
        ];
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for (cx, cy) in corners {
            min_x = min_x.min(cx);
            min_y = min_y.min(cy);
            max_x = max_x.max(cx);
            max_y = max_y.max(cy);
        }
        let x0 = min_x.floor().max(0.0) as u32;
        let y0 = min_y.floor().max(0.0) as u32;
        let x1 = (max_x.ceil().min(self.width as f64) as u32).min(self.width);
        let y1 = (max_y.ceil().min(self.height as f64) as u32).min(self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                // A pixel is covered when its center, rotated back into rect
                // space, falls inside the rect.
                let cx = px as f64 + 0.5;
                let cy = py as f64 + 0.5;
                let ux = cx * cos + cy * sin;
                let uy = -cx * sin + cy * cos;
                if ux >= x && ux < x + w && uy >= y && uy < y + h {
                    let dst = &mut self.pixels[(py * self.width + px) as usize];
                    dst.r = blend(r, dst.r, a);
                    dst.g = blend(g, dst.g, a);
                    dst.b = blend(b, dst.b, a);
                }
            }
        }
    }
}

fn rotate(x: f64, y: f64, sin: f64, cos: f64) -> (f64, f64) {
    (x * cos - y * sin, x * sin + y * cos)
}

fn blend(src: u8, dst: u8, a: f64) -> u8 {
    (src as f64 * a + dst as f64 * (1.0 - a)).round() as u8
}

// Truncation rules of this surface: clamp channels, parse hex, opaque hex.
fn components(fill: &Fill) -> Option<(u8, u8, u8, f64)> {
    match fill {
        Fill::Hex(text) => {
            let digits = text.strip_prefix('#')?;
            if digits.len() != 6 {
                return None;
            }
            let value = u32::from_str_radix(digits, 16).ok()?;
            Some((
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
                1.0,
            ))
        }
        Fill::Rgba { r, g, b, a } => Some((
            clamp_channel(*r),
            clamp_channel(*g),
            clamp_channel(*b),
            a.clamp(0.0, 1.0),
        )),
    }
}

fn clamp_channel(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}
