//! File-level operations behind the command line interface.

use std::fs;
use std::path::Path;

use log::info;

use crate::bmp::Bmp;
use crate::codec::{self, CodecOptions, ExtractOutcome, HideOutcome};
use crate::error::BdppError;
use crate::result::Result;

/// Hides `message` inside the cover bitmap and writes the stego file.
pub fn hide(
    cover: &Path,
    stego_out: &Path,
    message: Vec<u8>,
    options: &CodecOptions,
) -> Result<HideOutcome> {
    let mut bmp = Bmp::read(cover)?;
    let mut pixels = bmp.pixel_buffer()?;

    let outcome = codec::hide(&mut pixels, message.as_slice(), options)?;

    bmp.replace_pixels(&pixels)?;
    bmp.write(stego_out)?;

    info!(
        "embedded {} bits into {} of {} blocks of {}",
        outcome.key,
        outcome.stats.embeddable_blocks,
        outcome.stats.total_blocks,
        cover.display()
    );
    Ok(outcome)
}

/// Recovers `key` bits from the stego bitmap and writes them to `out`.
pub fn extract(
    stego: &Path,
    key: usize,
    out: &Path,
    options: &CodecOptions,
) -> Result<ExtractOutcome> {
    let bmp = Bmp::read(stego)?;
    let pixels = bmp.pixel_buffer()?;

    let outcome = codec::extract(&pixels, key, options)?;

    fs::write(out, &outcome.data).map_err(|source| BdppError::WriteError { source })?;

    info!(
        "recovered {} bits from {}",
        outcome.stats.bits_committed,
        stego.display()
    );
    Ok(outcome)
}

/// Renders the container headers and the carrier capacity of a bitmap.
pub fn inspect(path: &Path) -> Result<String> {
    let bmp = Bmp::read(path)?;
    let pixels = bmp.pixel_buffer()?;
    let stats = codec::capacity(&pixels)?;

    Ok(format!(
        "{bmp}Capacity:\n  blocks total:      {}\n  blocks embeddable: {}\n",
        stats.total_blocks, stats.embeddable_blocks
    ))
}
