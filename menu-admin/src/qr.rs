//! Public menu QR codes

use std::path::{Path, PathBuf};

use image::Luma;
use qrcode::{EcLevel, QrCode};

use crate::error::{AdminError, AdminResult};

/// Smallest rendered edge, in pixels
pub const MIN_QR_SIZE: u32 = 200;

/// Public menu page of a restaurant
pub fn public_menu_url(public_base: &str, restaurant_id: &str) -> String {
    format!("{}/{}", public_base.trim_end_matches('/'), restaurant_id)
}

/// Download name for a restaurant's QR image: whitespace runs become `_`
pub fn qr_file_name(restaurant_name: &str) -> String {
    let stem = restaurant_name.split_whitespace().collect::<Vec<_>>().join("_");
    let stem = if stem.is_empty() { "menu" } else { stem.as_str() };
    format!("{}_QR.png", stem)
}

/// Render `content` as a level-H QR PNG at `path`
pub fn write_qr_png(content: &str, path: &Path, size: u32) -> AdminResult<()> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::H)
        .map_err(|e| AdminError::Qr(e.to_string()))?;
    let size = size.max(MIN_QR_SIZE);
    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(size, size)
        .build();
    img.save(path)?;
    Ok(())
}

/// Write the QR for a restaurant's public menu into `out_dir`, returning the
/// file path.
pub fn write_restaurant_qr(
    public_base: &str,
    restaurant_id: &str,
    restaurant_name: &str,
    out_dir: &Path,
    size: u32,
) -> AdminResult<PathBuf> {
    let url = public_menu_url(public_base, restaurant_id);
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(qr_file_name(restaurant_name));
    write_qr_png(&url, &path, size)?;
    tracing::info!(restaurant = %restaurant_id, url = %url, path = %path.display(), "QR written");
    Ok(path)
}
