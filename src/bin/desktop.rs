use std::path::PathBuf;

use clap::Parser;

use qr_studio::color::parse_color;
use qr_studio::config::Config;
use qr_studio::render::Renderer;
use qr_studio::request::{Caption, ModuleShape, RenderRequest};

/// Generate a styled QR code PNG locally.
///
/// The form mirrors the HTTP surface and additionally exposes the flat
/// module and background colors it keeps to itself.
#[derive(Parser, Debug)]
#[command(name = "qr-studio-desktop", version)]
struct Args {
    /// Text or URL to encode
    data: String,

    /// Logo image pasted at the center of the code
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Flat module color, as a name or #hex (ignored in gradient mode)
    #[arg(long, default_value = "black")]
    qr_color: String,

    /// Flat background color (ignored in gradient mode)
    #[arg(long, default_value = "white")]
    bg_color: String,

    /// Module shape: circle or square
    #[arg(long, default_value = "circle")]
    shape: String,

    /// Blend the background from the logo's two dominant colors
    #[arg(long)]
    gradient: bool,

    /// Border frame width in pixels
    #[arg(long, default_value_t = 10)]
    frame_width: u32,

    /// Border frame color
    #[arg(long, default_value = "black")]
    frame_color: String,

    /// Drop the frame regardless of --frame-width
    #[arg(long)]
    no_frame: bool,

    /// Caption drawn beneath the code
    #[arg(long)]
    text: Option<String>,

    /// Caption color
    #[arg(long, default_value = "black")]
    text_color: String,

    /// Caption font family
    #[arg(long, default_value = "Arial")]
    font: String,

    /// Caption size in pixels
    #[arg(long, default_value_t = 20)]
    text_size: u32,

    #[arg(long)]
    bold: bool,

    #[arg(long)]
    italic: bool,

    #[arg(long)]
    underline: bool,

    /// Output file (defaults to the configured custom_qrcode.png)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = Config::load()?;

    let mut request = RenderRequest::new(args.data);
    request.shape = ModuleShape::parse(&args.shape);
    request.module_color = parse_color(&args.qr_color)?;
    request.background_color = parse_color(&args.bg_color)?;
    request.gradient = args.gradient;
    request.frame_width = if args.no_frame { 0 } else { args.frame_width };
    request.frame_color = parse_color(&args.frame_color)?;

    if let Some(path) = &args.logo {
        request.logo = Some(std::fs::read(path)?);
    }

    if let Some(text) = args.text.filter(|text| !text.is_empty()) {
        request.caption = Some(Caption {
            text,
            color: parse_color(&args.text_color)?,
            font_family: args.font,
            size: args.text_size,
            bold: args.bold,
            italic: args.italic,
            underline: args.underline,
        });
    }

    let png = Renderer::new().render(&request)?;

    let path = args.output.unwrap_or_else(|| config.output_path());
    std::fs::write(&path, png)?;
    log::info!("QR code written to {}", path.display());

    Ok(())
}
