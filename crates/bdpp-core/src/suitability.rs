//! The three per-block tests deciding whether a block can carry a payload
//! bit without disturbing its local bit-density pattern.
//!
//! All tests are pure functions of a block's matrix; they never look at the
//! message, at other blocks, or at earlier decisions.

use crate::block::{Block, BlockMatrix};
use crate::error::BdppError;
use crate::result::Result;

/// Cells excluded from each of the four diagonal sections. Every section
/// keeps six of the nine cells; the excluded triple is one diagonal corner.
const SECTION_CORNERS: [[(usize, usize); 3]; 4] = [
    [(1, 2), (2, 1), (2, 2)],
    [(0, 0), (0, 1), (1, 0)],
    [(1, 0), (2, 0), (2, 1)],
    [(0, 1), (0, 2), (1, 2)],
];

/// Zero-count distribution over the four diagonal sections of one block.
/// Bucket `z` counts sections with exactly `z` zero cells of their six.
#[derive(Debug, Default)]
pub struct RatioHistogram {
    buckets: [u32; 7],
}

impl RatioHistogram {
    pub fn record(&mut self, zeros: usize) {
        self.buckets[zeros] += 1;
    }

    /// Number of distinct zero/one ratios observed.
    pub fn distinct(&self) -> usize {
        self.buckets.iter().filter(|&&count| count > 0).count()
    }
}

/// A block whose four diagonal sections all show the same zero/one ratio is
/// too flat to carry a bit.
pub fn ratio_test(matrix: &BlockMatrix) -> bool {
    let mut histogram = RatioHistogram::default();
    for corner in &SECTION_CORNERS {
        let zeros = (0..3)
            .flat_map(|k| (0..3).map(move |l| (k, l)))
            .filter(|cell| !corner.contains(cell))
            .filter(|&(k, l)| matrix[k][l] == 0)
            .count();
        histogram.record(zeros);
    }
    histogram.distinct() >= 2
}

/// Requires the centre region to sit in a run of zero pixels connected
/// horizontally, vertically and diagonally.
pub fn connectivity_test(matrix: &BlockMatrix) -> bool {
    let mut h = false;
    let mut v = false;
    let mut d = false;

    for i in 0..3 {
        if matrix[i][1] != 0 {
            continue;
        }
        if matrix[i][0] == 0 || matrix[i][2] == 0 {
            h = true;
        }
        if i <= 1 && (matrix[i + 1][0] == 0 || matrix[i + 1][2] == 0) {
            d = true;
        }
        if i >= 1 && (matrix[i - 1][0] == 0 || matrix[i - 1][2] == 0) {
            d = true;
        }
    }

    for j in 0..3 {
        if matrix[1][j] == 0 && (matrix[0][j] == 0 || matrix[2][j] == 0) {
            v = true;
        }
    }

    h && v && d
}

/// Probes whether the block would still pass the ratio and connectivity
/// tests after its centre bit is rewritten. Centre values are binary, so
/// testing the flipped configuration covers both possible outcomes. The
/// probe works on a copy; the caller's matrix is never changed.
pub fn flip_stability_test(matrix: &BlockMatrix) -> Result<bool> {
    let mut probe = *matrix;
    probe[1][1] = match probe[1][1] {
        0 => 1,
        1 => 0,
        value => return Err(BdppError::CorruptPixelValue(value)),
    };
    Ok(ratio_test(&probe) && connectivity_test(&probe))
}

/// Runs the test cascade on one block: ratio, then connectivity, then
/// flip-stability. A failed stage leaves the later flags false.
pub(crate) fn classify(block: &mut Block) -> Result<()> {
    block.ratio_pass = ratio_test(block.matrix());
    if !block.ratio_pass {
        return Ok(());
    }

    block.hvd_pass = connectivity_test(block.matrix());
    if !block.hvd_pass {
        return Ok(());
    }

    block.embeddable = flip_stability_test(block.matrix())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // passes all three tests, see the assertions below
    const TEXTURED: BlockMatrix = [[0, 0, 1], [0, 0, 0], [1, 0, 1]];

    #[test]
    fn should_fail_the_ratio_test_on_uniform_blocks() {
        assert!(!ratio_test(&[[0; 3]; 3]));
        assert!(!ratio_test(&[[1; 3]; 3]));
    }

    #[test]
    fn should_fail_the_ratio_test_on_checkerboards() {
        // both parities count four identical section ratios
        assert!(!ratio_test(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]]));
        assert!(!ratio_test(&[[1, 0, 1], [0, 1, 0], [1, 0, 1]]));
    }

    #[test]
    fn should_pass_the_ratio_test_with_two_distinct_sections() {
        // sections count 4, 3, 4 and 4 zeros
        assert!(ratio_test(&TEXTURED));
    }

    #[test]
    fn should_require_all_three_connectivity_directions() {
        assert!(connectivity_test(&TEXTURED));

        // all-zero block is connected in every direction
        assert!(connectivity_test(&[[0; 3]; 3]));

        // lone zero centre has no connected neighbour at all
        assert!(!connectivity_test(&[[1, 1, 1], [1, 0, 1], [1, 1, 1]]));

        // a horizontal run alone is not enough
        assert!(!connectivity_test(&[[1, 1, 1], [0, 0, 0], [1, 1, 1]]));
    }

    #[test]
    fn should_probe_the_flip_without_observable_change() {
        let matrix = TEXTURED;
        let verdict = flip_stability_test(&matrix).unwrap();

        assert!(verdict);
        assert_eq!(matrix, TEXTURED);
    }

    #[test]
    fn should_gate_later_tests_on_earlier_failures() {
        use crate::block::BlockGrid;
        use crate::pixel::PixelBuffer;

        let mut checker = PixelBuffer::zeroed(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                checker.set(x, y, ((x + y) % 2) as u8);
            }
        }
        let mut grid = BlockGrid::extract(&checker);
        let block = grid.iter_mut().next().unwrap();
        classify(block).unwrap();

        assert!(!block.ratio_pass());
        assert!(!block.hvd_pass());
        assert!(!block.is_embeddable());

        let mut textured = PixelBuffer::zeroed(3, 3);
        for (k, row) in TEXTURED.iter().enumerate() {
            for (l, cell) in row.iter().enumerate() {
                textured.set(l as u32, k as u32, *cell);
            }
        }
        let mut grid = BlockGrid::extract(&textured);
        let block = grid.iter_mut().next().unwrap();
        classify(block).unwrap();

        assert!(block.ratio_pass());
        assert!(block.hvd_pass());
        assert!(block.is_embeddable());
    }

    #[test]
    fn should_reject_a_corrupt_centre_value() {
        let mut matrix = TEXTURED;
        matrix[1][1] = 7;

        let result = flip_stability_test(&matrix);
        assert!(matches!(result, Err(BdppError::CorruptPixelValue(7))));
    }
}
