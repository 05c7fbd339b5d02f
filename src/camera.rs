use crate::grid::Grid;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Renders a [`Grid`] to the terminal, one braille dot per cell.
pub struct Camera {
    /// The cell buffer
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the framebuffer, in dots
    w: usize,

    /// Height of the framebuffer, in dots
    h: usize,
}

impl Camera {
    /// Create a camera for a terminal of `cols x rows` characters.
    pub fn new(cols: u16, rows: u16) -> Self {
        let (w, h) = (cols as usize * 2, rows as usize * 4);

        let mut cam = Self {
            cb: Vec::new(),
            fb: String::new(),
            cp: Vec::new(),
            w,
            h,
        };
        cam.alloc();

        cam
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Resize to a terminal of `cols x rows` characters. The cell buffer is cleared.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.w = cols as usize * 2;
        self.h = rows as usize * 4;
        self.alloc();
    }

    fn alloc(&mut self) {
        // For each braille character, we need 3 bytes:
        //  - The leader byte:     0b11100010
        //  - Continuation byte 1: 0b101000xx
        //  - Continuation byte 2: 0b10xxxxxx
        // For each newline, we need one byte: 0b00001010
        //
        // Let `w` and `h` refer to width and height of the cell buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of our framebuffer
        // (that is, not accounting for the trailing newlines expected at the end of each line).
        let (bw, bh) = (self.w.div_ceil(2), self.h.div_ceil(4));

        self.cb = vec![false; self.w * self.h];
        self.cp = vec![BRAILLE_EMPTY; bw * bh];
        self.fb = String::with_capacity(3 * (bw * bh) + bh);
    }

    /// Turns on a single pixel of the framebuffer. Pixels outside the camera are dropped.
    pub fn draw_pixel(&mut self, x: usize, y: usize) {
        if x >= self.w || y >= self.h {
            return;
        }

        let i = self.xy_from(x, y);
        self.cb[i] = true;
    }

    /// Plot every live cell of `grid`, with the grid's origin in the top left corner.
    pub fn draw_grid(&mut self, grid: &Grid) {
        for (x, y) in grid.alive_cells() {
            self.draw_pixel(x, y);
        }
    }

    /// Reset the cell buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Build the frame from the cell buffer. Lines are separated by `\n`.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            if px {
                let (x, y) = self.xy_to(n);
                self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // Every sum of dots stays within U+2800..=U+28FF
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
