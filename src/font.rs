//! Text rendering with ab_glyph.
//!
//! The font is loaded once at startup from disk. When no font can be found
//! the editor keeps working and simply skips text.

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

use crate::graphics::Frame;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Cannot read font {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid font data in {}", .0.display())]
    Invalid(PathBuf),
    #[error("No usable font found in any of the system font locations")]
    NotFound,
}

/// Searched in order when no font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

pub struct FontRenderer {
    font: FontVec,
}

static FONT_RENDERER: OnceLock<FontRenderer> = OnceLock::new();

impl FontRenderer {
    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|_| FontError::Invalid(path.to_path_buf()))?;
        Ok(Self { font })
    }

    /// Uses `configured` when given, otherwise the first loadable system font.
    pub fn discover(configured: Option<&Path>) -> Result<Self, FontError> {
        if let Some(path) = configured {
            return Self::from_file(path);
        }
        for candidate in SYSTEM_FONTS {
            let path = Path::new(candidate);
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(renderer) => {
                    log::info!("Using font {}", path.display());
                    return Ok(renderer);
                }
                Err(err) => log::debug!("Skipping font: {}", err),
            }
        }
        Err(FontError::NotFound)
    }

    pub fn text_width(&self, text: &str, size: f32) -> u32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let width: f32 = text.chars().map(|ch| scaled.h_advance(scaled.glyph_id(ch))).sum();
        width.ceil() as u32
    }

    pub fn line_height(&self, size: f32) -> u32 {
        self.font.as_scaled(PxScale::from(size)).height().ceil() as u32
    }

    /// Draws `text` with its top-left corner at `(x, y)`, clipped to the frame.
    pub fn draw_text(&self, frame: &mut Frame, text: &str, x: i32, y: i32, color: [u8; 3], size: f32) {
        let scale = PxScale::from(size);
        let scaled = self.font.as_scaled(scale);
        let baseline = y as f32 + scaled.ascent();
        let mut caret = x as f32;

        for ch in text.chars() {
            let glyph_id = scaled.glyph_id(ch);
            let glyph = glyph_id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(glyph_id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i32 + gx as i32;
                    let py = bounds.min.y as i32 + gy as i32;
                    frame.blend_pixel(px, py, [color[0], color[1], color[2], 255], coverage);
                });
            }
        }
    }
}

/// Installs the process-wide font. Later calls are ignored.
pub fn install(renderer: FontRenderer) {
    if FONT_RENDERER.set(renderer).is_err() {
        log::warn!("Font already installed, keeping the first one");
    }
}

pub fn get_font() -> Option<&'static FontRenderer> {
    FONT_RENDERER.get()
}

pub fn draw_text(frame: &mut Frame, text: &str, x: i32, y: i32, color: [u8; 3], size: f32) {
    if let Some(font) = get_font() {
        font.draw_text(frame, text, x, y, color, size);
    }
}

/// Width of `text` in pixels, or 0 when no font is installed.
pub fn text_width(text: &str, size: f32) -> u32 {
    get_font().map_or(0, |font| font.text_width(text, size))
}

/// Falls back to the nominal size when no font is installed.
pub fn line_height(size: f32) -> u32 {
    get_font().map_or(size.ceil() as u32, |font| font.line_height(size))
}
