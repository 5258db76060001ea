use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use usvg::fontdb;

use crate::foundation::error::{MemeError, MemeResult};

/// Preferred caption faces, most preferred first. A generic bold sans-serif closes the chain.
pub const CAPTION_FAMILIES: [&str; 2] = ["Impact", "Arial Black"];

/// Common installed sans families tried, bold, after [`CAPTION_FAMILIES`] and before the generic
/// sans-serif mapping, which often names a family the host does not have.
pub const SANS_FALLBACK_FAMILIES: [&str; 6] = [
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "FreeSans",
];

/// CSS `font-family` value equivalent to the caption fallback chain.
pub const CAPTION_FONT_STACK: &str = "Impact, Arial Black, sans-serif";

/// Where caption font bytes come from.
#[derive(Clone, Debug, Default)]
pub enum FontSource {
    /// Query installed system fonts along [`CAPTION_FAMILIES`].
    #[default]
    System,
    /// Load a specific font file.
    File(PathBuf),
    /// Use in-memory font bytes (face index 0).
    Bytes(Arc<Vec<u8>>),
}

/// Resolved caption face.
#[derive(Clone)]
pub struct MemeFont {
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    /// Family name reported by the font database, when known.
    pub family: Option<String>,
}

impl std::fmt::Debug for MemeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemeFont")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("family", &self.family)
            .finish()
    }
}

impl MemeFont {
    /// Resolve `source` into font bytes.
    pub fn resolve(source: &FontSource) -> MemeResult<Self> {
        match source {
            FontSource::System => {
                let mut db = fontdb::Database::new();
                db.load_system_fonts();
                Self::from_database(&db)
            }
            FontSource::File(path) => Self::from_file(path),
            FontSource::Bytes(bytes) => Ok(Self {
                bytes: bytes.clone(),
                index: 0,
                family: None,
            }),
        }
    }

    /// Read a font file from disk.
    pub fn from_file(path: &Path) -> MemeResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| MemeError::render(format!("read font '{}': {e}", path.display())))?;
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
            family: None,
        })
    }

    /// Pick the best bold face along the caption chain, then the closest bold upright sans face
    /// anywhere in `db`.
    pub fn from_database(db: &fontdb::Database) -> MemeResult<Self> {
        let mut families: Vec<fontdb::Family<'_>> = CAPTION_FAMILIES
            .iter()
            .chain(SANS_FALLBACK_FAMILIES.iter())
            .map(|f| fontdb::Family::Name(f))
            .collect();
        families.push(fontdb::Family::SansSerif);

        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::BOLD,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };

        let id = db
            .query(&query)
            .or_else(|| closest_bold_sans(db))
            .ok_or_else(|| MemeError::render("no fonts available for caption text"))?;

        let family = db
            .face(id)
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()));
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| MemeError::render("selected caption font has no data"))?;

        tracing::debug!(family = ?family, index, "resolved caption font");
        Ok(Self {
            bytes: Arc::new(bytes),
            index,
            family,
        })
    }
}

/// Last resort when no chain family is installed: upright before italic, proportional before
/// monospace, sans before anything else, then weight nearest to bold.
fn closest_bold_sans(db: &fontdb::Database) -> Option<fontdb::ID> {
    db.faces()
        .min_by_key(|face| {
            let name = face
                .families
                .first()
                .map(|(name, _)| name.to_ascii_lowercase())
                .unwrap_or_default();
            (
                face.style != fontdb::Style::Normal,
                face.monospaced,
                !name.contains("sans"),
                face.weight.0.abs_diff(fontdb::Weight::BOLD.0),
                face.stretch != fontdb::Stretch::Normal,
                face.post_script_name.clone(),
            )
        })
        .map(|face| face.id)
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
