use std::fs;
use std::path::PathBuf;

use clap::Args;

use bdpp_core::{commands, BdppError};

use crate::commands::codec_options;
use crate::CliResult;

/// Hides data in the pixel blocks of a 1-bpp BMP image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Cover bitmap, used readonly.
    #[arg(short = 'i', long = "in", value_name = "cover file", required = true)]
    pub cover: PathBuf,

    /// The stego bitmap will be stored as this file
    #[arg(short = 'o', long = "out", value_name = "stego file", required = true)]
    pub stego: PathBuf,

    /// File to hide in the image
    #[arg(
        short = 'd',
        long = "data",
        value_name = "data file",
        required_unless_present = "message"
    )]
    pub data_file: Option<PathBuf>,

    /// A text message that will be hidden
    #[arg(
        short,
        long,
        value_name = "text message",
        required_unless_present = "data_file"
    )]
    pub message: Option<String>,

    /// Store centre bits inverted; extraction must use the same setting
    #[arg(long)]
    pub inverted_polarity: bool,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        let message = match (self.data_file, self.message) {
            (Some(path), _) => fs::read(path).map_err(|source| BdppError::ReadError { source })?,
            (None, Some(text)) => text.into_bytes(),
            (None, None) => return Err(BdppError::MissingMessage),
        };

        let outcome = commands::hide(
            &self.cover,
            &self.stego,
            message,
            &codec_options(self.inverted_polarity),
        )?;

        println!("blocks total:      {}", outcome.stats.total_blocks);
        println!("blocks embeddable: {}", outcome.stats.embeddable_blocks);
        println!("bits embedded:     {}", outcome.key);
        println!("capacity used:     {:.1}%", outcome.stats.percent_used());
        if outcome.overflowed() {
            println!(
                "WARNING: message truncated, {} bits did not fit the carrier",
                outcome.bits_dropped
            );
        }
        println!("key: {}", outcome.key);

        Ok(())
    }
}
