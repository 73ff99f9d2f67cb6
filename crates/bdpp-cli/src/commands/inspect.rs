use std::path::PathBuf;

use clap::Args;

use bdpp_core::commands;

use crate::CliResult;

/// Prints the container headers and the carrier capacity of a BMP image
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Bitmap to inspect
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub input: PathBuf,
}

impl InspectArgs {
    pub fn run(self) -> CliResult<()> {
        print!("{}", commands::inspect(&self.input)?);
        Ok(())
    }
}
