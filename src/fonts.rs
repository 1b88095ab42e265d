use ab_glyph::FontVec;
use fontdb::{Database, Family, Query, Style, Weight};

/// Outcome of a font lookup, kept explicit so fallbacks reach the logs
/// instead of disappearing into a silent branch.
pub enum FontResolution {
    /// The requested family with the requested style was found.
    Resolved(FontVec),
    /// The request missed; a generic default face stands in.
    FallbackDefault(FontVec),
}

/// System font database, loaded once at startup and shared read-only
/// across requests.
pub struct FontLibrary {
    db: Database,
}

impl FontLibrary {
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Font database loaded with {} faces", db.len());
        Self { db }
    }

    /// Resolve `family` with the requested weight and slant. A miss falls
    /// back to a generic face; `None` means the host has no loadable font
    /// at all and the caption cannot be drawn.
    pub fn resolve(&self, family: &str, bold: bool, italic: bool) -> Option<FontResolution> {
        let weight = if bold { Weight::BOLD } else { Weight::NORMAL };
        let style = if italic { Style::Italic } else { Style::Normal };

        let exact = self.db.query(&Query {
            families: &[Family::Name(family)],
            weight,
            style,
            ..Query::default()
        });
        if let Some(id) = exact {
            if let Some(font) = self.load(id) {
                return Some(FontResolution::Resolved(font));
            }
        }

        let fallback = self
            .db
            .query(&Query {
                families: &[Family::SansSerif, Family::Serif],
                ..Query::default()
            })
            .or_else(|| self.db.faces().next().map(|face| face.id))?;
        self.load(fallback).map(FontResolution::FallbackDefault)
    }

    fn load(&self, id: fontdb::ID) -> Option<FontVec> {
        self.db
            .with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
            })?
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_family_never_resolves_exactly() {
        let library = FontLibrary::new();
        // Depending on the host there may be no fonts at all; either way an
        // invented family must not come back as an exact match.
        match library.resolve("No Such Family 9c4e", false, false) {
            Some(FontResolution::Resolved(_)) => panic!("invented family resolved"),
            Some(FontResolution::FallbackDefault(_)) | None => {}
        }
    }
}
