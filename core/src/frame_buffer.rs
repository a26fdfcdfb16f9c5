use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # FrameBuffer
/// The 64x32 monochrome display, indexed as `[y][x]` with the origin at the top left.
///
/// Programs only change it through `clear` and `draw_sprite`; renderers read it through `rows`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// Coordinates must already be wrapped onto the display
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    /// Coordinates must already be wrapped onto the display
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[y][x] = on;
    }

    /// XORs a sprite onto the display.
    ///
    /// Each byte of `sprite` is one 8 pixel row, most significant bit leftmost.
    /// Every pixel wraps around the edges independently.
    ///
    /// Returns whether any pixel was turned off.
    ///
    /// # Arguments
    /// * `x` column of the sprite's top left corner
    /// * `y` row of the sprite's top left corner
    /// * `sprite` the rows to draw
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let px = (x as usize + bit) % DISPLAY_WIDTH;
                let was_on = self.get_pixel(px, py);
                collision |= was_on;
                self.set_pixel(px, py, !was_on);
            }
        }
        collision
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    pub fn is_blank(&self) -> bool {
        self.rows().all(|row| row.iter().all(|pixel| !pixel))
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO: [u8; 5] = [0xF0, 0x90, 0x90, 0x90, 0xF0];

    #[test]
    fn test_draws_glyph() {
        let mut frame = FrameBuffer::new();
        assert!(!frame.draw_sprite(1, 1, &ZERO));
        let lit: Vec<bool> = (1..5).map(|x| frame.get_pixel(x, 2)).collect();
        assert_eq!(lit, vec![true, false, false, true]);
        assert!(frame.get_pixel(4, 5));
        assert!(!frame.get_pixel(5, 5));
    }

    #[test]
    fn test_redraw_erases_and_collides() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(10, 10, &ZERO);
        assert!(frame.draw_sprite(10, 10, &ZERO));
        assert!(frame.is_blank());
    }

    #[test]
    fn test_collision_sticks_for_whole_draw() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(0, 0, true);
        // only the very first pixel collides
        assert!(frame.draw_sprite(0, 0, &[0x80, 0xFF]));
        assert!(!frame.get_pixel(0, 0));
        assert!(frame.rows().nth(1).unwrap().iter().take(8).all(|p| *p));
    }

    #[test]
    fn test_wraps_horizontally_per_pixel() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(62, 0, &[0xFF]);
        let lit: Vec<usize> = (0..DISPLAY_WIDTH).filter(|x| frame.get_pixel(*x, 0)).collect();
        assert_eq!(lit, vec![0, 1, 2, 3, 4, 5, 62, 63]);
    }

    #[test]
    fn test_wraps_vertically_per_pixel() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 31, &[0x80, 0x80]);
        assert!(frame.get_pixel(0, 31));
        assert!(frame.get_pixel(0, 0));
    }

    #[test]
    fn test_wraps_start_coordinates() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(64 + 3, 32 + 2, &[0x80]);
        assert!(frame.get_pixel(3, 2));
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &[0xFF; 15]);
        frame.clear();
        assert!(frame.is_blank());
    }
}
