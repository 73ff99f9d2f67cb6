use thiserror::Error;

#[derive(Error, Debug)]
pub enum BdppError {
    /// Represents a file that does not start with the `BM` bitmap signature
    #[error("Not a BMP file, the BM signature is missing")]
    InvalidSignature,

    /// Represents a file too short to hold the bitmap headers
    #[error("File of {0} bytes is too short to hold the bitmap headers")]
    TruncatedHeader(usize),

    /// Represents an info header this crate does not understand, for example OS/2 bitmaps
    #[error("Unsupported bitmap info header of {0} bytes")]
    UnsupportedInfoHeader(u32),

    /// Represents a carrier with the wrong pixel depth, only 1-bpp bitmaps carry data
    #[error("Bitmaps with {0} bits per pixel are not supported, only 1 bit per pixel")]
    UnsupportedBitDepth(u16),

    /// Represents a compressed carrier, only uncompressed BI_RGB pixel data is supported
    #[error("Unsupported bitmap compression method {0}")]
    UnsupportedCompression(u32),

    /// Represents a bitmap stored top-down, the classic bottom-up row order is required
    #[error("Top-down bitmaps are not supported")]
    TopDownBitmap,

    /// Represents a bitmap with zero or negative dimensions
    #[error("Bitmap geometry {width}x{height} is invalid")]
    InvalidGeometry { width: i32, height: i32 },

    /// Represents pixel data that runs past the end of the file
    #[error("Pixel data of {needed} bytes at offset {offset} exceeds the file size of {actual} bytes")]
    TruncatedPixelData {
        offset: usize,
        needed: usize,
        actual: usize,
    },

    /// Represents a pixel buffer shorter than its geometry requires
    #[error(
        "Pixel buffer of {actual} bytes is too small for {width}x{height} at a row stride of {stride} bytes"
    )]
    BufferGeometry {
        width: u32,
        height: u32,
        stride: u32,
        actual: usize,
    },

    /// Represents a pixel buffer whose geometry differs from the cover bitmap it should replace
    #[error("Pixel buffer geometry {got_width}x{got_height} does not match the cover bitmap {want_width}x{want_height}")]
    CarrierMismatch {
        want_width: u32,
        want_height: u32,
        got_width: u32,
        got_height: u32,
    },

    /// A block centre held a value other than 0 or 1. The carrier state is
    /// undefined at this point and the whole operation is aborted.
    #[error("Corrupt pixel value {0} at a block centre, expected 0 or 1")]
    CorruptPixelValue(u8),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write the target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Neither a data file nor a text message was provided
    #[error("API Error: Missing message")]
    MissingMessage,
}
