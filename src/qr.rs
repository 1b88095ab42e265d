use qrcode::{EcLevel, QrCode};

use crate::error::RenderError;

/// Raster units per matrix cell.
pub const MODULE_SIZE: u32 = 10;
/// Quiet-zone cells on each side of the matrix.
pub const QUIET_BORDER: u32 = 4;

/// Square boolean grid encoding the payload, quiet border included.
#[derive(Debug, Clone)]
pub struct Matrix {
    cells: Vec<bool>,
    side: u32,
}

impl Matrix {
    /// Encode `data` at the highest error-correction level. The minimal
    /// version that fits is selected automatically; an empty payload or one
    /// past the encoder's capacity is a caller-visible error.
    pub fn encode(data: &str) -> Result<Self, RenderError> {
        if data.is_empty() {
            return Err(RenderError::EmptyPayload);
        }

        let code = QrCode::with_error_correction_level(data, EcLevel::H)?;
        let width = code.width() as u32;
        let side = width + 2 * QUIET_BORDER;

        let mut cells = vec![false; (side * side) as usize];
        for (i, color) in code.to_colors().into_iter().enumerate() {
            if color == qrcode::Color::Dark {
                let x = i as u32 % width + QUIET_BORDER;
                let y = i as u32 / width + QUIET_BORDER;
                cells[(y * side + x) as usize] = true;
            }
        }

        Ok(Self { cells, side })
    }

    /// Cell count per side, quiet border included.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Rendered side length in raster units.
    pub fn pixel_side(&self) -> u32 {
        self.side * MODULE_SIZE
    }

    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        self.cells[(y * self.side + x) as usize]
    }

    pub fn dark_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_payload() {
        assert!(matches!(
            Matrix::encode(""),
            Err(RenderError::EmptyPayload)
        ));
    }

    #[test]
    fn rejects_payload_past_capacity() {
        // Version 40 at EC level H caps out well below 3000 bytes.
        let oversized = "x".repeat(3000);
        assert!(matches!(
            Matrix::encode(&oversized),
            Err(RenderError::Encode(_))
        ));
    }

    #[test]
    fn quiet_border_stays_light() {
        let matrix = Matrix::encode("https://example.com").unwrap();
        let side = matrix.side();
        for a in 0..side {
            for b in 0..QUIET_BORDER {
                assert!(!matrix.is_dark(a, b));
                assert!(!matrix.is_dark(b, a));
                assert!(!matrix.is_dark(a, side - 1 - b));
                assert!(!matrix.is_dark(side - 1 - b, a));
            }
        }
    }

    #[test]
    fn side_grows_with_payload_length() {
        let mut last = 0;
        for len in [1usize, 10, 40, 120, 400] {
            let matrix = Matrix::encode(&"a".repeat(len)).unwrap();
            assert!(matrix.side() >= last);
            last = matrix.side();
        }
    }

    #[test]
    fn finder_pattern_lands_inside_border() {
        let matrix = Matrix::encode("hello").unwrap();
        // Top-left finder corner sits just past the quiet zone.
        assert!(matrix.is_dark(QUIET_BORDER, QUIET_BORDER));
        assert_eq!(matrix.pixel_side(), matrix.side() * MODULE_SIZE);
    }
}
