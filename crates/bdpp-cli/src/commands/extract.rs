use std::path::PathBuf;

use clap::Args;

use bdpp_core::commands;

use crate::commands::codec_options;
use crate::CliResult;

/// Recovers data hidden in a stego BMP image
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Stego bitmap that contains the hidden data
    #[arg(short = 'i', long = "in", value_name = "stego file", required = true)]
    pub stego: PathBuf,

    /// The key reported by the hide run: the number of bits to recover
    #[arg(short = 'k', long = "key", value_name = "key", required = true)]
    pub key: usize,

    /// Recovered data will be stored as this file
    #[arg(short = 'o', long = "out", value_name = "output file", required = true)]
    pub output: PathBuf,

    /// Read centre bits inverted; must match the hide run
    #[arg(long)]
    pub inverted_polarity: bool,
}

impl ExtractArgs {
    pub fn run(self) -> CliResult<()> {
        let outcome = commands::extract(
            &self.stego,
            self.key,
            &self.output,
            &codec_options(self.inverted_polarity),
        )?;

        println!("blocks total:      {}", outcome.stats.total_blocks);
        println!("blocks embeddable: {}", outcome.stats.embeddable_blocks);
        println!("bits recovered:    {}", outcome.stats.bits_committed);
        println!("capacity used:     {:.1}%", outcome.stats.percent_used());
        if outcome.truncated() {
            println!(
                "WARNING: the carrier held {} bits fewer than the key asked for; \
                 wrong key, wrong image or a damaged stego file",
                outcome.bits_missing
            );
        }

        Ok(())
    }
}
