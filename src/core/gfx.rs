//=========================================================================
// Software Surfaces
//=========================================================================
//
// CPU-side render targets. Each state owns one sized to the display
// resolution and composites it onto the host display surface once per
// rendered frame. Text/font rasterization is not provided here; the
// screens draw structured rectangles.
//
//=========================================================================

//=== Color ===============================================================

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

//=== Surface =============================================================

/// A rectangular pixel buffer.
///
/// All drawing operations clip against the surface bounds; coordinates
/// may be negative or overhang the edges (the credits scroller relies
/// on blitting at negative offsets).
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Surface {
    /// Creates a surface filled with black.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "surface dimensions must be non-zero");
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel data, top-left origin.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Fills an axis-aligned rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let x0 = x.clamp(0, self.width as i32) as u32;
        let y0 = y.clamp(0, self.height as i32) as u32;
        let x1 = (x.saturating_add(w as i32)).clamp(0, self.width as i32) as u32;
        let y1 = (y.saturating_add(h as i32)).clamp(0, self.height as i32) as u32;

        for row in y0..y1 {
            let start = (row * self.width + x0) as usize;
            let end = (row * self.width + x1) as usize;
            self.pixels[start..end].fill(color);
        }
    }

    /// Copies `src` onto this surface with its top-left corner at
    /// `(x, y)`, clipped to the destination bounds.
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32) {
        let dst_x0 = x.max(0);
        let dst_y0 = y.max(0);
        let dst_x1 = (x + src.width as i32).min(self.width as i32);
        let dst_y1 = (y + src.height as i32).min(self.height as i32);

        if dst_x0 >= dst_x1 || dst_y0 >= dst_y1 {
            return;
        }

        let src_x0 = (dst_x0 - x) as u32;
        let copy_w = (dst_x1 - dst_x0) as usize;

        for dst_row in dst_y0..dst_y1 {
            let src_row = (dst_row - y) as u32;
            let src_start = (src_row * src.width + src_x0) as usize;
            let dst_start = (dst_row as u32 * self.width + dst_x0 as u32) as usize;
            self.pixels[dst_start..dst_start + copy_w]
                .copy_from_slice(&src.pixels[src_start..src_start + copy_w]);
        }
    }
}

//=== Tests ===============================================================
