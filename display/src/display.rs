use sdl2::pixels::Color;
use sdl2::rect::Rect;

use ocho::FrameBuffer;

/// How the window draws the interpreter's pixels.
pub struct DisplayOptions {
    /// Size multiplier for each pixel.
    pub scale: u32,
    /// Color of lit pixels.
    pub foreground: Color,
    /// Color of unlit pixels.
    pub background: Color,
    /// Draw a background-colored border around each lit pixel.
    pub outline: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            scale: 10,
            foreground: Color::RGB(0xFF, 0xFF, 0xFF),
            background: Color::RGB(0x00, 0x00, 0x00),
            outline: false,
        }
    }
}

/// # Display
///
/// Renders the interpreter's monochrome frame buffer to a scaled SDL2
/// window. Only gets a `render` call when the frame buffer is dirty; the
/// buffer itself is read-only here.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    options: DisplayOptions,
}

impl Display {
    /// Creates a window sized to the frame buffer's geometry times the
    /// pixel scale, bound to an sdl2 context.
    pub fn new(
        sdl: &sdl2::Sdl,
        width: usize,
        height: usize,
        options: DisplayOptions,
    ) -> Result<Self, String> {
        let video = sdl.video()?;
        let window = video
            .window(
                "ocho",
                width as u32 * options.scale,
                height as u32 * options.scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        Ok(Display { canvas, options })
    }

    /// Redraws the whole frame: background clear, one filled rectangle per
    /// lit pixel, then the optional outlines.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        self.canvas.set_draw_color(self.options.background);
        self.canvas.clear();

        let width = frame.width();
        let scale = self.options.scale;
        self.canvas.set_draw_color(self.options.foreground);
        for (idx, &lit) in frame.pixels().iter().enumerate() {
            if lit {
                self.canvas.fill_rect(pixel_rect(idx, width, scale))?;
            }
        }
        if self.options.outline {
            self.canvas.set_draw_color(self.options.background);
            for (idx, &lit) in frame.pixels().iter().enumerate() {
                if lit {
                    self.canvas.draw_rect(pixel_rect(idx, width, scale))?;
                }
            }
        }
        self.canvas.present();
        Ok(())
    }
}

/// Maps a row-major pixel index to its scaled window rectangle.
fn pixel_rect(idx: usize, width: usize, scale: u32) -> Rect {
    let x = (idx % width) as i32 * scale as i32;
    let y = (idx / width) as i32 * scale as i32;
    Rect::new(x, y, scale, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_rects_tile_the_window() {
        assert_eq!(pixel_rect(0, 64, 10), Rect::new(0, 0, 10, 10));
        assert_eq!(pixel_rect(63, 64, 10), Rect::new(630, 0, 10, 10));
        assert_eq!(pixel_rect(64, 64, 10), Rect::new(0, 10, 10, 10));
        assert_eq!(pixel_rect(64 * 32 - 1, 64, 10), Rect::new(630, 310, 10, 10));
    }
}
