//! Minimal container support for 1-bpp Windows bitmaps.
//!
//! Parses just enough of the BMP format to hand the packed pixel data to the
//! codec and to write a stego file back whose bytes outside the pixel region
//! are identical to the cover. Compressed, top-down and deeper-than-1-bpp
//! bitmaps are rejected up front.

use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::BdppError;
use crate::pixel::PixelBuffer;
use crate::result::Result;

/// Length of the BITMAPFILEHEADER on disk.
pub const FILE_HEADER_LEN: usize = 14;
/// Length of the classic BITMAPINFOHEADER.
pub const INFO_HEADER_LEN: u32 = 40;

const BI_RGB: u32 = 0;

/// The BITMAPFILEHEADER fields this crate cares about.
#[derive(Debug, Clone, Copy)]
pub struct FileHeader {
    pub file_size: u32,
    pub pixel_offset: u32,
}

/// The BITMAPINFOHEADER, verbatim.
#[derive(Debug, Clone, Copy)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

/// One palette entry, stored on disk in BGR order plus a reserved byte.
#[derive(Debug, Clone, Copy)]
pub struct PaletteEntry {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// A parsed 1-bpp bitmap.
///
/// The raw file bytes are kept around so that writing a stego file only ever
/// touches the pixel region; headers and palette round-trip untouched.
///
/// ```rust
/// use bdpp_core::bmp::Bmp;
/// use bdpp_core::pixel::PixelBuffer;
///
/// let bmp = Bmp::new(&PixelBuffer::zeroed(9, 9));
/// let parsed = Bmp::from_bytes(bmp.as_bytes().to_vec()).unwrap();
///
/// assert_eq!(parsed.width(), 9);
/// assert_eq!(parsed.height(), 9);
/// assert_eq!(parsed.palette().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Bmp {
    header: FileHeader,
    info: InfoHeader,
    palette: Vec<PaletteEntry>,
    raw: Vec<u8>,
}

impl Bmp {
    /// Wraps a pixel buffer in a fresh minimal container: classic info
    /// header, black/white palette, pixel data immediately after.
    pub fn new(pixels: &PixelBuffer) -> Self {
        let data_len = pixels.row_stride() as usize * pixels.height() as usize;
        let pixel_offset = (FILE_HEADER_LEN + INFO_HEADER_LEN as usize + 2 * 4) as u32;
        let file_size = pixel_offset + data_len as u32;

        let header = FileHeader {
            file_size,
            pixel_offset,
        };
        let info = InfoHeader {
            header_size: INFO_HEADER_LEN,
            width: pixels.width() as i32,
            height: pixels.height() as i32,
            planes: 1,
            bit_count: 1,
            compression: BI_RGB,
            image_size: data_len as u32,
            x_pels_per_meter: 0,
            y_pels_per_meter: 0,
            colors_used: 2,
            colors_important: 0,
        };

        let mut raw = Vec::with_capacity(file_size as usize);
        raw.extend_from_slice(b"BM");
        raw.extend_from_slice(&file_size.to_le_bytes());
        raw.extend_from_slice(&0u32.to_le_bytes());
        raw.extend_from_slice(&pixel_offset.to_le_bytes());
        raw.extend_from_slice(&info.header_size.to_le_bytes());
        raw.extend_from_slice(&info.width.to_le_bytes());
        raw.extend_from_slice(&info.height.to_le_bytes());
        raw.extend_from_slice(&info.planes.to_le_bytes());
        raw.extend_from_slice(&info.bit_count.to_le_bytes());
        raw.extend_from_slice(&info.compression.to_le_bytes());
        raw.extend_from_slice(&info.image_size.to_le_bytes());
        raw.extend_from_slice(&info.x_pels_per_meter.to_le_bytes());
        raw.extend_from_slice(&info.y_pels_per_meter.to_le_bytes());
        raw.extend_from_slice(&info.colors_used.to_le_bytes());
        raw.extend_from_slice(&info.colors_important.to_le_bytes());
        raw.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        raw.extend_from_slice(&[0xff, 0xff, 0xff, 0x00]);
        raw.extend_from_slice(&pixels.as_bytes()[..data_len]);

        let palette = vec![
            PaletteEntry {
                red: 0,
                green: 0,
                blue: 0,
            },
            PaletteEntry {
                red: 0xff,
                green: 0xff,
                blue: 0xff,
            },
        ];

        Self {
            header,
            info,
            palette,
            raw,
        }
    }

    /// Reads and parses a bitmap file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read(path).map_err(|source| BdppError::ReadError { source })?;
        Self::from_bytes(raw)
    }

    /// Parses a bitmap from its raw file bytes.
    pub fn from_bytes(raw: Vec<u8>) -> Result<Self> {
        if raw.len() < 2 || &raw[0..2] != b"BM" {
            return Err(BdppError::InvalidSignature);
        }
        if raw.len() < FILE_HEADER_LEN + INFO_HEADER_LEN as usize {
            return Err(BdppError::TruncatedHeader(raw.len()));
        }

        let mut cursor = Cursor::new(&raw[2..]);
        let file_size = cursor.read_u32::<LittleEndian>()?;
        let _reserved = cursor.read_u32::<LittleEndian>()?;
        let pixel_offset = cursor.read_u32::<LittleEndian>()?;

        let info = InfoHeader {
            header_size: cursor.read_u32::<LittleEndian>()?,
            width: cursor.read_i32::<LittleEndian>()?,
            height: cursor.read_i32::<LittleEndian>()?,
            planes: cursor.read_u16::<LittleEndian>()?,
            bit_count: cursor.read_u16::<LittleEndian>()?,
            compression: cursor.read_u32::<LittleEndian>()?,
            image_size: cursor.read_u32::<LittleEndian>()?,
            x_pels_per_meter: cursor.read_i32::<LittleEndian>()?,
            y_pels_per_meter: cursor.read_i32::<LittleEndian>()?,
            colors_used: cursor.read_u32::<LittleEndian>()?,
            colors_important: cursor.read_u32::<LittleEndian>()?,
        };

        if info.header_size < INFO_HEADER_LEN {
            return Err(BdppError::UnsupportedInfoHeader(info.header_size));
        }
        if info.bit_count != 1 {
            return Err(BdppError::UnsupportedBitDepth(info.bit_count));
        }
        if info.compression != BI_RGB {
            return Err(BdppError::UnsupportedCompression(info.compression));
        }
        if info.height < 0 {
            return Err(BdppError::TopDownBitmap);
        }
        if info.width <= 0 || info.height == 0 {
            return Err(BdppError::InvalidGeometry {
                width: info.width,
                height: info.height,
            });
        }

        let palette_offset = FILE_HEADER_LEN + info.header_size as usize;
        let palette_count = match info.colors_used {
            0 => 2,
            n => n as usize,
        };
        if palette_offset + palette_count * 4 > raw.len() {
            return Err(BdppError::TruncatedHeader(raw.len()));
        }
        let palette = raw[palette_offset..palette_offset + palette_count * 4]
            .chunks_exact(4)
            .map(|entry| PaletteEntry {
                blue: entry[0],
                green: entry[1],
                red: entry[2],
            })
            .collect();

        let stride = PixelBuffer::stride_for(info.width as u32);
        let offset = pixel_offset as usize;
        let needed = stride as usize * info.height as usize;
        if offset + needed > raw.len() {
            return Err(BdppError::TruncatedPixelData {
                offset,
                needed,
                actual: raw.len(),
            });
        }

        Ok(Self {
            header: FileHeader {
                file_size,
                pixel_offset,
            },
            info,
            palette,
            raw,
        })
    }

    pub fn width(&self) -> u32 {
        self.info.width as u32
    }

    pub fn height(&self) -> u32 {
        self.info.height as u32
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn info(&self) -> &InfoHeader {
        &self.info
    }

    pub fn palette(&self) -> &[PaletteEntry] {
        &self.palette
    }

    /// The complete file bytes, pixel region included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Clones the pixel region into an owned buffer for the codec.
    pub fn pixel_buffer(&self) -> Result<PixelBuffer> {
        let stride = PixelBuffer::stride_for(self.width());
        let start = self.header.pixel_offset as usize;
        let len = stride as usize * self.height() as usize;
        PixelBuffer::with_stride(
            self.raw[start..start + len].to_vec(),
            self.width(),
            self.height(),
            stride,
        )
    }

    /// Patches the pixel region with a modified buffer of identical
    /// geometry. Everything outside the region stays byte-identical.
    pub fn replace_pixels(&mut self, pixels: &PixelBuffer) -> Result<()> {
        let stride = PixelBuffer::stride_for(self.width());
        if pixels.width() != self.width()
            || pixels.height() != self.height()
            || pixels.row_stride() != stride
        {
            return Err(BdppError::CarrierMismatch {
                want_width: self.width(),
                want_height: self.height(),
                got_width: pixels.width(),
                got_height: pixels.height(),
            });
        }

        let start = self.header.pixel_offset as usize;
        let len = stride as usize * self.height() as usize;
        self.raw[start..start + len].copy_from_slice(&pixels.as_bytes()[..len]);
        Ok(())
    }

    /// Writes the file to disk.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, &self.raw).map_err(|source| BdppError::WriteError { source })
    }
}

/// Header dump in the spirit of the classic bitmap info printers.
impl fmt::Display for Bmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File Header:")?;
        writeln!(f, "  file type:        BM")?;
        writeln!(f, "  file size:        {}", self.header.file_size)?;
        writeln!(f, "  data offset:      {}", self.header.pixel_offset)?;
        writeln!(f, "Info Header:")?;
        writeln!(f, "  header size:      {}", self.info.header_size)?;
        writeln!(f, "  width:            {}", self.info.width)?;
        writeln!(f, "  height:           {}", self.info.height)?;
        writeln!(f, "  planes:           {}", self.info.planes)?;
        writeln!(f, "  bits per pixel:   {}", self.info.bit_count)?;
        writeln!(f, "  compression:      {}", self.info.compression)?;
        writeln!(f, "  image size:       {}", self.info.image_size)?;
        writeln!(f, "  x resolution:     {}", self.info.x_pels_per_meter)?;
        writeln!(f, "  y resolution:     {}", self.info.y_pels_per_meter)?;
        writeln!(f, "  colors used:      {}", self.info.colors_used)?;
        writeln!(f, "  colors important: {}", self.info.colors_important)?;
        writeln!(f, "Palette:")?;
        for (i, entry) in self.palette.iter().enumerate() {
            writeln!(
                f,
                "  {i}: R:{:02x} G:{:02x} B:{:02x}",
                entry.red, entry.green, entry.blue
            )?;
        }
        writeln!(f, "Pixel Data:")?;
        let pixels = &self.raw[self.header.pixel_offset as usize..];
        write!(f, " ")?;
        for byte in pixels.iter().take(24) {
            write!(f, " {byte:02X}")?;
        }
        writeln!(f)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_round_trip_a_synthesized_container() {
        let mut pixels = PixelBuffer::zeroed(9, 9);
        pixels.set(4, 4, 1);

        let bmp = Bmp::new(&pixels);
        let parsed = Bmp::from_bytes(bmp.as_bytes().to_vec()).unwrap();

        assert_eq!(parsed.width(), 9);
        assert_eq!(parsed.height(), 9);
        assert_eq!(parsed.info().bit_count, 1);
        assert_eq!(parsed.pixel_buffer().unwrap(), pixels);
    }

    #[test]
    fn should_reject_a_missing_signature() {
        let mut raw = Bmp::new(&PixelBuffer::zeroed(3, 3)).as_bytes().to_vec();
        raw[0] = b'X';

        assert!(matches!(
            Bmp::from_bytes(raw),
            Err(BdppError::InvalidSignature)
        ));
    }

    #[test]
    fn should_reject_deeper_pixel_formats() {
        let mut raw = Bmp::new(&PixelBuffer::zeroed(3, 3)).as_bytes().to_vec();
        // bit_count lives two bytes after the planes field
        raw[28] = 8;

        assert!(matches!(
            Bmp::from_bytes(raw),
            Err(BdppError::UnsupportedBitDepth(8))
        ));
    }

    #[test]
    fn should_reject_compressed_pixel_data() {
        let mut raw = Bmp::new(&PixelBuffer::zeroed(3, 3)).as_bytes().to_vec();
        raw[30] = 2; // BI_RLE4

        assert!(matches!(
            Bmp::from_bytes(raw),
            Err(BdppError::UnsupportedCompression(2))
        ));
    }

    #[test]
    fn should_reject_truncated_pixel_data() {
        let mut raw = Bmp::new(&PixelBuffer::zeroed(9, 9)).as_bytes().to_vec();
        raw.truncate(raw.len() - 4);

        assert!(matches!(
            Bmp::from_bytes(raw),
            Err(BdppError::TruncatedPixelData { .. })
        ));
    }

    #[test]
    fn should_keep_bytes_outside_the_pixel_region_identical() {
        let pixels = PixelBuffer::zeroed(9, 6);
        let mut bmp = Bmp::new(&pixels);
        let before = bmp.as_bytes().to_vec();

        let mut modified = pixels.clone();
        modified.set(1, 1, 1);
        bmp.replace_pixels(&modified).unwrap();

        let offset = bmp.header().pixel_offset as usize;
        assert_eq!(bmp.as_bytes()[..offset], before[..offset]);
        assert_ne!(bmp.as_bytes()[offset..], before[offset..]);
    }

    #[test]
    fn should_refuse_mismatched_replacement_geometry() {
        let mut bmp = Bmp::new(&PixelBuffer::zeroed(9, 6));
        let result = bmp.replace_pixels(&PixelBuffer::zeroed(6, 9));

        assert!(matches!(result, Err(BdppError::CarrierMismatch { .. })));
    }
}
