//! Pixel canvas the renderer composes diagrams onto.
//!
//! Canvases are value objects: composition copies pixels into a freshly
//! sized target, there is no aliasing between parent and child buffers.

use std::convert::Infallible;
use std::io::Cursor;
use std::path::Path;

use embedded_graphics::mono_font::{ascii, MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle};
use embedded_graphics::text::{Baseline, Text};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

pub const WHITE: Rgb888 = Rgb888::new(255, 255, 255);
pub const BLACK: Rgb888 = Rgb888::new(0, 0, 0);
pub const BLUE: Rgb888 = Rgb888::new(0, 0, 255);
pub const RED: Rgb888 = Rgb888::new(255, 0, 0);
pub const GREEN: Rgb888 = Rgb888::new(0, 200, 0);
pub const SILVER: Rgb888 = Rgb888::new(127, 127, 127);

/// Raster encodings supported for a composed canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpg,
    Gif,
}

impl From<RasterFormat> for ImageFormat {
    fn from(format: RasterFormat) -> ImageFormat {
        match format {
            RasterFormat::Png => ImageFormat::Png,
            RasterFormat::Jpg => ImageFormat::Jpeg,
            RasterFormat::Gif => ImageFormat::Gif,
        }
    }
}

/// Monospaced fonts addressed by the 1-based size index of the
/// configuration surface.
const FONTS: [&MonoFont<'static>; 5] = [
    &ascii::FONT_5X8,
    &ascii::FONT_6X13,
    &ascii::FONT_7X13,
    &ascii::FONT_8X13,
    &ascii::FONT_9X15,
];

fn font(size: usize) -> &'static MonoFont<'static> {
    FONTS[size.clamp(1, FONTS.len()) - 1]
}

/// Width in pixels of `text` drawn at font index `size`.
pub fn text_width(size: usize, text: &str) -> i32 {
    let font = font(size);
    (font.character_size.width + font.character_spacing) as i32 * text.chars().count() as i32
}

/// Glyph height in pixels of font index `size`.
pub fn text_height(size: usize) -> i32 {
    font(size).character_size.height as i32
}

/// White-filled RGB buffer with the drawing primitives the renderer needs.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbImage::from_pixel(width, height, Rgb([255, 255, 255])),
        }
    }

    pub fn width(&self) -> i32 {
        self.pixels.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.pixels.height() as i32
    }

    pub fn pixel(&self, x: i32, y: i32) -> Rgb888 {
        let Rgb([r, g, b]) = *self.pixels.get_pixel(x as u32, y as u32);
        Rgb888::new(r, g, b)
    }

    /// Copy `src` wholesale, top-left corner at `(x, y)`. Pixels falling
    /// outside the target are dropped.
    pub fn blit(&mut self, src: &Canvas, x: i32, y: i32) {
        self.draw(src.pixels.enumerate_pixels().map(|(sx, sy, Rgb([r, g, b]))| {
            Pixel(
                Point::new(x + sx as i32, y + sy as i32),
                Rgb888::new(*r, *g, *b),
            )
        }));
    }

    /// One pixel wide line segment from `(x1, y1)` to `(x2, y2)`.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb888) {
        self.draw_styled(
            Line::new(Point::new(x1, y1), Point::new(x2, y2))
                .into_styled(PrimitiveStyle::with_stroke(color, 1)),
        );
    }

    /// Filled triangle, used for connector arrowheads.
    pub fn filled_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Rgb888,
    ) {
        self.draw_styled(
            Triangle::new(Point::new(x1, y1), Point::new(x2, y2), Point::new(x3, y3))
                .into_styled(PrimitiveStyle::with_fill(color)),
        );
    }

    /// Rectangle outline with corners `(x1, y1)` and `(x2, y2)`.
    pub fn rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb888) {
        self.draw_styled(
            Rectangle::with_corners(Point::new(x1, y1), Point::new(x2, y2))
                .into_styled(PrimitiveStyle::with_stroke(color, 1)),
        );
    }

    /// Rounded rectangle outline with corner radius `radius`.
    pub fn rounded_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, radius: i32, color: Rgb888) {
        self.draw_styled(
            RoundedRectangle::with_equal_corners(
                Rectangle::with_corners(Point::new(x1, y1), Point::new(x2, y2)),
                Size::new(radius as u32, radius as u32),
            )
            .into_styled(PrimitiveStyle::with_stroke(color, 1)),
        );
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn text(&mut self, size: usize, x: i32, y: i32, text: &str, color: Rgb888) {
        let style = MonoTextStyle::new(font(size), color);
        // Drawing into an owned buffer is infallible.
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(self)
            .unwrap();
    }

    /// Encode the buffer as `format` into a byte vector.
    pub fn encode(&self, format: RasterFormat) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(self.pixels.clone())
            .write_to(&mut Cursor::new(&mut bytes), format.into())?;
        Ok(bytes)
    }

    /// Encode the buffer as `format` and write it to `path`.
    pub fn save(&self, path: impl AsRef<Path>, format: RasterFormat) -> Result<(), image::ImageError> {
        self.pixels.save_with_format(path, format.into())
    }

    fn draw_styled(&mut self, drawable: impl Drawable<Color = Rgb888, Output = ()>) {
        // Drawing into an owned buffer is infallible.
        drawable.draw(self).unwrap();
    }

    fn draw(&mut self, pixels: impl IntoIterator<Item = Pixel<Rgb888>>) {
        self.draw_iter(pixels).unwrap();
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = (self.pixels.width() as i32, self.pixels.height() as i32);
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.x < width && point.y >= 0 && point.y < height {
                self.pixels.put_pixel(
                    point.x as u32,
                    point.y as u32,
                    Rgb([color.r(), color.g(), color.b()]),
                );
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }
}
