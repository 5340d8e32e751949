//! Saving finished cards to disk.

use crate::card::CardImage;
use std::path::{Path, PathBuf};

/// Filename prefix for exported cards.
pub const FILE_PREFIX: &str = "新年许愿卡_";

/// A timestamped filename for a card exported right now.
pub fn suggested_filename() -> String {
    format!("{FILE_PREFIX}{}.png", chrono::Utc::now().timestamp_millis())
}

/// Write the card into `dir` under a timestamped name, returning the path.
pub fn download(card: &CardImage, dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(suggested_filename());
    std::fs::write(&path, card.png_bytes())?;
    log::info!("Saved card to {}", path.display());
    Ok(path)
}
