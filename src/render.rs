use ab_glyph::PxScale;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{
    DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder, Rgb, RgbImage, Rgba,
    RgbaImage,
};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::color::{self, dominant_colors};
use crate::error::RenderError;
use crate::fonts::{FontLibrary, FontResolution};
use crate::qr::{Matrix, MODULE_SIZE};
use crate::request::{Caption, ModuleShape, RenderRequest};

/// Fixed logo width after the aspect-preserving resize, in raster units.
const LOGO_WIDTH: u32 = 60;
/// Caption anchor above the bottom edge, in raster units.
const TEXT_BOTTOM_MARGIN: u32 = 10;
const UNDERLINE_THICKNESS: u32 = 2;

/// The compositing pipeline. Both the HTTP and the desktop adapters feed a
/// [`RenderRequest`] in and get PNG bytes back.
pub struct Renderer {
    fonts: FontLibrary,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            fonts: FontLibrary::new(),
        }
    }

    /// Run the full pipeline: encode, background, modules, logo, caption,
    /// frame, PNG.
    pub fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, RenderError> {
        let matrix = Matrix::encode(&request.payload)?;
        let side = matrix.pixel_side();

        // The logo is decoded up front: gradient seeds are sampled from the
        // original raster, before any resizing.
        let logo = match &request.logo {
            Some(bytes) => Some(image::load_from_memory(bytes).map_err(RenderError::Logo)?),
            None => None,
        };
        let seeds = match &logo {
            Some(img) => {
                let seeds = dominant_colors(&img.to_rgb8());
                log::debug!("Sampled logo colors: {:?} / {:?}", seeds[0], seeds[1]);
                seeds
            }
            None => color::DEFAULT_GRADIENT,
        };

        let background = if request.gradient {
            gradient_background(side, side, seeds[0], seeds[1])
        } else {
            RgbImage::from_pixel(side, side, request.background_color)
        };

        let mut canvas = DynamicImage::ImageRgb8(background).to_rgba8();
        let modules = module_layer(&matrix, request.shape, module_color(request));
        imageops::overlay(&mut canvas, &modules, 0, 0);

        if let Some(logo) = &logo {
            paste_logo(&mut canvas, logo);
        }

        if let Some(caption) = &request.caption {
            self.draw_caption(&mut canvas, caption);
        }

        let canvas = if request.frame_width > 0 {
            framed(&canvas, request.frame_width, request.frame_color)
        } else {
            canvas
        };

        encode_png(canvas)
    }

    fn draw_caption(&self, canvas: &mut RgbaImage, caption: &Caption) {
        let font = match self
            .fonts
            .resolve(&caption.font_family, caption.bold, caption.italic)
        {
            Some(FontResolution::Resolved(font)) => font,
            Some(FontResolution::FallbackDefault(font)) => {
                log::warn!(
                    "Font family {:?} (bold: {}, italic: {}) not found, using default face",
                    caption.font_family,
                    caption.bold,
                    caption.italic
                );
                font
            }
            None => {
                log::warn!("No usable font on this host, skipping caption");
                return;
            }
        };

        let scale = PxScale::from(caption.size as f32);
        let (text_w, text_h) = text_size(scale, &font, &caption.text);
        let (text_w, text_h) = (text_w.max(0) as u32, text_h.max(0) as u32);
        if text_w == 0 || text_h == 0 {
            return;
        }

        let x = canvas.width().saturating_sub(text_w) / 2;
        let y = canvas
            .height()
            .saturating_sub(text_h + TEXT_BOTTOM_MARGIN);
        let fill = rgba(caption.color);
        draw_text_mut(canvas, fill, x as i32, y as i32, scale, &font, &caption.text);

        if caption.underline {
            let underline_y = y + text_h;
            if underline_y + UNDERLINE_THICKNESS <= canvas.height() {
                draw_filled_rect_mut(
                    canvas,
                    Rect::at(x as i32, underline_y as i32).of_size(text_w, UNDERLINE_THICKNESS),
                    fill,
                );
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Gradient output pins the modules to black for contrast, whatever color
/// the form asked for.
fn module_color(request: &RenderRequest) -> Rgba<u8> {
    if request.gradient {
        rgba(color::BLACK)
    } else {
        rgba(request.module_color)
    }
}

/// Top-to-bottom linear blend between two solid layers. The top row carries
/// `top` exactly; the bottom row lands within rounding of `bottom`.
fn gradient_background(width: u32, height: u32, top: Rgb<u8>, bottom: Rgb<u8>) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for (y, row) in img.rows_mut().enumerate() {
        let weight = (255.0 * y as f64 / height as f64).round() as u32;
        let pixel = Rgb([
            blend_channel(top[0], bottom[0], weight),
            blend_channel(top[1], bottom[1], weight),
            blend_channel(top[2], bottom[2], weight),
        ]);
        for p in row {
            *p = pixel;
        }
    }
    img
}

fn blend_channel(a: u8, b: u8, weight: u32) -> u8 {
    ((a as u32 * (255 - weight) + b as u32 * weight + 127) / 255) as u8
}

/// Draw every dark cell at its quantized position onto a transparent layer
/// sized to the full canvas.
fn module_layer(matrix: &Matrix, shape: ModuleShape, fill: Rgba<u8>) -> RgbaImage {
    let mut layer = RgbaImage::new(matrix.pixel_side(), matrix.pixel_side());
    let cell = MODULE_SIZE as i32;

    for y in 0..matrix.side() {
        for x in 0..matrix.side() {
            if !matrix.is_dark(x, y) {
                continue;
            }
            let px = (x * MODULE_SIZE) as i32;
            let py = (y * MODULE_SIZE) as i32;
            match shape {
                ModuleShape::Square => draw_filled_rect_mut(
                    &mut layer,
                    Rect::at(px, py).of_size(MODULE_SIZE, MODULE_SIZE),
                    fill,
                ),
                ModuleShape::Circle => draw_filled_circle_mut(
                    &mut layer,
                    (px + cell / 2, py + cell / 2),
                    cell / 2 - 1,
                    fill,
                ),
            }
        }
    }
    layer
}

/// Resize the logo to the fixed width and paste it centered, letting its
/// own alpha channel mask the paste.
fn paste_logo(canvas: &mut RgbaImage, logo: &DynamicImage) {
    let (w, h) = logo.dimensions();
    let scaled_h = ((LOGO_WIDTH as f64 / w as f64) * h as f64) as u32;
    let resized = imageops::resize(
        &logo.to_rgba8(),
        LOGO_WIDTH,
        scaled_h.max(1),
        FilterType::Lanczos3,
    );

    let x = (canvas.width().saturating_sub(resized.width()) / 2) as i64;
    let y = (canvas.height().saturating_sub(resized.height()) / 2) as i64;
    imageops::overlay(canvas, &resized, x, y);
}

/// Pad the image with a solid border, flattening it onto the frame color.
fn framed(canvas: &RgbaImage, frame_width: u32, fill: Rgb<u8>) -> RgbaImage {
    let mut out = RgbaImage::from_pixel(
        canvas.width() + 2 * frame_width,
        canvas.height() + 2 * frame_width,
        rgba(fill),
    );
    imageops::replace(&mut out, canvas, frame_width as i64, frame_width as i64);
    out
}

fn encode_png(canvas: RgbaImage) -> Result<Vec<u8>, RenderError> {
    // Every stage leaves the canvas opaque, so it flattens to RGB for the wire.
    let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}

fn rgba(c: Rgb<u8>) -> Rgba<u8> {
    Rgba([c[0], c[1], c[2], 255])
}
