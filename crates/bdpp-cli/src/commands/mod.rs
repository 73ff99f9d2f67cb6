pub mod extract;
pub mod hide;
pub mod inspect;

use bdpp_core::{CodecOptions, Polarity};

pub(crate) fn codec_options(inverted_polarity: bool) -> CodecOptions {
    CodecOptions {
        polarity: if inverted_polarity {
            Polarity::Inverted
        } else {
            Polarity::Direct
        },
    }
}
