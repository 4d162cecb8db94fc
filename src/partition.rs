use std::ops::Range;

/// A half-open band of image rows owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBlock {
    pub start: usize,
    pub end: usize,
}

// helper methods
impl RowBlock {
    pub fn len(&self) -> usize {
        self.end - self.start
    }
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split `0..height` into `workers` contiguous blocks.
///
/// The first `height % workers` blocks take one extra row, so sizes differ
/// by at most one. With more workers than rows the trailing blocks are empty.
pub fn partition_rows(height: usize, workers: usize) -> Vec<RowBlock> {
    let workers = workers.max(1);
    let rows_per_worker = height / workers;
    let mut remaining_rows = height % workers;

    let mut blocks = Vec::with_capacity(workers);
    let mut start = 0;
    for _ in 0..workers {
        let mut end = start + rows_per_worker;
        if remaining_rows > 0 {
            end += 1;
            remaining_rows -= 1;
        }
        blocks.push(RowBlock { start, end });
        start = end;
    }
    blocks
}
