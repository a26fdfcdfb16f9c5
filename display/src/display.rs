use log::info;
use sdl2::pixels::PixelFormatEnum;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::{Color, FrameBuffer, RenderSurface};

/// # Display
/// The Chip-8 display is composed of 64x32 monochrome pixels.
/// Lit pixels are painted in a configurable color on a black background.
/// The display only gets a call to `render` when a sprite is drawn.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    /// * `fullscreen` whether to cover the desktop instead of opening a window
    pub fn new(sdl: &sdl2::Sdl, scale: u32, fullscreen: bool) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let mut builder = video_subsystem.window(
            "Chip-8",
            DISPLAY_WIDTH as u32 * scale,
            DISPLAY_HEIGHT as u32 * scale,
        );
        builder.position_centered();
        if fullscreen {
            builder.fullscreen_desktop();
        }
        let window = builder.build().map_err(|e| e.to_string())?;

        let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        // Keeps the aspect ratio when the desktop resolution decides the size
        canvas
            .set_logical_size(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32)
            .map_err(|e| e.to_string())?;
        info!("opened {}x{} display", DISPLAY_WIDTH, DISPLAY_HEIGHT);

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This flattens the 2D frame buffer by concatenating its rows and expands
    /// every pixel into three bytes: the color's channels when lit, zeroes otherwise.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    /// * `color` the color of lit pixels
    fn frame_to_sdl_texture(frame: &FrameBuffer, color: Color) -> Vec<u8> {
        frame
            .rows()
            .flat_map(|row| row.iter())
            .flat_map(|&lit| {
                if lit {
                    [color.r, color.g, color.b]
                } else {
                    [0, 0, 0]
                }
                .to_vec()
            })
            .collect()
    }
}

impl RenderSurface for Display {
    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    fn render(&mut self, frame: &FrameBuffer, color: Color) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                self.width as u32,
                self.height as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame, color);
        texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            buffer.copy_from_slice(&pixels);
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_sdl_texture() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(1, 0, true);
        frame.set_pixel(0, 1, true);
        let frame = Display::frame_to_sdl_texture(&frame, Color::WHITE);

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(frame, expected);
    }

    #[test]
    fn test_frame_to_sdl_texture_uses_color() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(63, 31, true);
        let green = Color {
            r: 0x00,
            g: 0xFF,
            b: 0x40,
        };
        let texture = Display::frame_to_sdl_texture(&frame, green);

        assert_eq!(texture.len(), 64 * 32 * 3);
        assert_eq!(texture[6141..], [0x00, 0xFF, 0x40]);
        assert!(texture[..6141].iter().all(|b| *b == 0));
    }
}
