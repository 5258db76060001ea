use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use crate::{
    foundation::error::{MemeError, MemeResult},
    render::compositor::CompositeResult,
};

/// Suggested file name for exported memes.
pub const EXPORT_FILE_NAME: &str = "ai-meme.png";

/// Mime type of exported memes.
pub const EXPORT_MIME_TYPE: &str = "image/png";

/// Encoded meme, ready to be offered as a download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// Write the file into `dir` under its suggested name and return the full path.
    pub fn save_in(&self, dir: &Path) -> MemeResult<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| {
            MemeError::render(format!("create output dir '{}': {e}", dir.display()))
        })?;
        let path = dir.join(self.file_name);
        self.save_as(&path)?;
        Ok(path)
    }

    /// Write the file to an explicit path.
    pub fn save_as(&self, path: &Path) -> MemeResult<()> {
        std::fs::write(path, &self.bytes)
            .map_err(|e| MemeError::render(format!("write png '{}': {e}", path.display())))
    }
}

/// Encode `result` as PNG.
#[tracing::instrument(skip_all, fields(width = result.width(), height = result.height()))]
pub fn export(result: &CompositeResult) -> MemeResult<ExportedFile> {
    let bytes = encode_png(result.pixels())?;
    tracing::debug!(bytes = bytes.len(), "encoded meme");
    Ok(ExportedFile {
        file_name: EXPORT_FILE_NAME,
        mime_type: EXPORT_MIME_TYPE,
        bytes,
    })
}

pub(crate) fn encode_png(pixels: &image::RgbaImage) -> MemeResult<Vec<u8>> {
    let mut buf = Vec::new();
    pixels
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| MemeError::render(format!("encode png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
