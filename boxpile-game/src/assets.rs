use std::path::{Path, PathBuf};

/// DejaVu Sans Mono, printable ASCII in 16x32 cells, sixteen to a row.
const FONT_SHEET: &[u8] = include_bytes!("../content/font.png");

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("could not load image `{}`: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("could not decode built-in {name}: {source}")]
    Embedded {
        name: &'static str,
        #[source]
        source: image::ImageError,
    },
}

/// Reads an image file relative to the working directory as 8-bit RGBA.
pub fn load_rgba(path: impl AsRef<Path>) -> Result<image::RgbaImage, AssetError> {
    let path = path.as_ref();
    Ok(image::open(path)
        .map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8())
}

pub fn font_sheet() -> Result<image::RgbaImage, AssetError> {
    decode_embedded("font sheet", FONT_SHEET)
}

fn decode_embedded(name: &'static str, bytes: &[u8]) -> Result<image::RgbaImage, AssetError> {
    Ok(image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|source| AssetError::Embedded { name, source })?
        .into_rgba8())
}
