//! Styled QR code rendering.
//!
//! A single compositing pipeline turns a [`RenderRequest`] into PNG bytes:
//! - matrix encoding at the highest error-correction level
//! - flat or gradient background (seeded from the logo's dominant colors)
//! - square or circular modules on a transparent layer, alpha-composited
//! - centered logo paste, optional caption with font styling, border frame
//!
//! The HTTP server (`qr-studio-server`) and the desktop form adapter
//! (`qr-studio-desktop`) are thin translators in front of [`Renderer`].

pub mod color;
pub mod config;
pub mod error;
pub mod fonts;
pub mod qr;
pub mod render;
pub mod request;

pub use error::RenderError;
pub use render::Renderer;
pub use request::{Caption, ModuleShape, RenderRequest};
