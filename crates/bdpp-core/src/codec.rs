//! The embed/extract driver: walks embeddable blocks in deterministic
//! block-index order, committing message bits to centre cells on the hide
//! path and collecting them on the extract path.

use std::io::Read;

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use log::warn;

use crate::bit_iterator::BitIterator;
use crate::block::BlockGrid;
use crate::pixel::PixelBuffer;
use crate::result::Result;
use crate::suitability;

/// Whether a centre bit is stored and read as-is or inverted.
///
/// Historic implementations of this algorithm disagree on the convention:
/// some read the centre bit directly on extraction, some XOR it with 1.
/// The convention is a free choice as long as hide and extract agree, so it
/// is a single option applied symmetrically on both paths. Interoperating
/// with a foreign stego image requires knowing which convention produced it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Polarity {
    #[default]
    Direct,
    Inverted,
}

impl Polarity {
    fn apply(self, bit: u8) -> u8 {
        match self {
            Polarity::Direct => bit,
            Polarity::Inverted => bit ^ 1,
        }
    }
}

/// Codec configuration shared by the hide and extract paths.
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    /// Centre-bit storage convention; must match between hide and extract.
    pub polarity: Polarity,
}

/// Capacity bookkeeping of one hide or extract pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CapacityStats {
    /// Whole 3×3 blocks in the carrier grid.
    pub total_blocks: usize,
    /// Blocks that passed ratio, connectivity and flip-stability tests.
    pub embeddable_blocks: usize,
    /// Bits committed on hiding, or recovered on extraction.
    pub bits_committed: usize,
}

impl CapacityStats {
    /// Share of the embeddable blocks actually used, in percent.
    pub fn percent_used(&self) -> f64 {
        if self.embeddable_blocks == 0 {
            return 0.0;
        }
        self.bits_committed as f64 * 100.0 / self.embeddable_blocks as f64
    }
}

/// What a hide pass did to the carrier.
#[derive(Debug)]
pub struct HideOutcome {
    /// Number of bits embedded. The receiver needs this key to extract.
    pub key: usize,
    pub stats: CapacityStats,
    /// Message bits that did not fit into the carrier.
    pub bits_dropped: usize,
}

impl HideOutcome {
    pub fn overflowed(&self) -> bool {
        self.bits_dropped > 0
    }
}

/// What an extract pass recovered.
#[derive(Debug)]
pub struct ExtractOutcome {
    /// Recovered message, packed MSB-first. The last byte is zero-padded on
    /// the right when the key is not a multiple of eight.
    pub data: Vec<u8>,
    pub stats: CapacityStats,
    /// Bits the key asked for beyond what the carrier held.
    pub bits_missing: usize,
}

impl ExtractOutcome {
    pub fn truncated(&self) -> bool {
        self.bits_missing > 0
    }
}

/// Builds the grid and classifies every block once, before any message bit
/// is looked at. Embeddability depends only on the carrier.
fn classified_grid(pixels: &PixelBuffer) -> Result<(BlockGrid, usize)> {
    let mut grid = BlockGrid::extract(pixels);
    let mut embeddable = 0;
    for block in grid.iter_mut() {
        suitability::classify(block)?;
        if block.is_embeddable() {
            embeddable += 1;
        }
    }
    Ok((grid, embeddable))
}

/// Classifies the carrier without modifying it and reports its capacity.
pub fn capacity(pixels: &PixelBuffer) -> Result<CapacityStats> {
    let (grid, embeddable_blocks) = classified_grid(pixels)?;
    Ok(CapacityStats {
        total_blocks: grid.len(),
        embeddable_blocks,
        bits_committed: 0,
    })
}

/// Embeds `message` into the carrier, one bit per embeddable block centre,
/// in block-index order. The carrier is modified in place.
///
/// A message longer than the capacity is truncated and reported through the
/// outcome, it is not an error; the stego image stays valid either way.
pub fn hide(
    pixels: &mut PixelBuffer,
    message: impl Read,
    options: &CodecOptions,
) -> Result<HideOutcome> {
    let (mut grid, embeddable_blocks) = classified_grid(pixels)?;
    let total_blocks = grid.len();

    let mut bits = BitIterator::new(message);
    let mut key = 0;
    for block in grid.iter_mut().filter(|block| block.is_embeddable()) {
        let Some(bit) = bits.next() else { break };
        block.set_center(options.polarity.apply(bit));
        key += 1;
    }
    let bits_dropped = bits.count();

    grid.write_back(pixels);

    if bits_dropped > 0 {
        warn!(
            "message exceeds carrier capacity, {key} of {embeddable_blocks} embeddable blocks used, {bits_dropped} bits dropped"
        );
    }

    Ok(HideOutcome {
        key,
        stats: CapacityStats {
            total_blocks,
            embeddable_blocks,
            bits_committed: key,
        },
        bits_dropped,
    })
}

/// Recovers `key` bits from the carrier, visiting embeddable blocks in the
/// same deterministic order the hide pass used.
///
/// A key larger than the carrier capacity yields a partial result and a
/// warning; missing bits are never invented.
pub fn extract(pixels: &PixelBuffer, key: usize, options: &CodecOptions) -> Result<ExtractOutcome> {
    let (grid, embeddable_blocks) = classified_grid(pixels)?;
    let total_blocks = grid.len();

    let mut writer = BitWriter::endian(Vec::new(), BigEndian);
    let mut recovered = 0;
    for block in grid.iter().filter(|block| block.is_embeddable()).take(key) {
        let bit = options.polarity.apply(block.center());
        writer.write_bit(bit == 1)?;
        recovered += 1;
    }
    writer.byte_align()?;

    let bits_missing = key - recovered;
    if bits_missing > 0 {
        warn!(
            "carrier holds only {recovered} of the {key} requested bits ({embeddable_blocks} embeddable blocks)"
        );
    }

    Ok(ExtractOutcome {
        data: writer.into_writer(),
        stats: CapacityStats {
            total_blocks,
            embeddable_blocks,
            bits_committed: recovered,
        },
        bits_missing,
    })
}
