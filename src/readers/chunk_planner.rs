use memchr::memrchr;

use crate::error::{AggregateError, Result};
use crate::models::Chunk;
use crate::utils::constants::BOUNDARY_SEARCH_BIAS;

/// Partition `buf` into `workers` disjoint, newline-aligned chunks.
///
/// Each internal boundary starts from the nominal cut `i * (len / workers)`,
/// biased forward by [`BOUNDARY_SEARCH_BIAS`] to step past a record straddling
/// the cut, then scans backward to the nearest newline. The backward scan is
/// bounded by the previous boundary and never reads out of range; a non-empty
/// window without a newline fails with [`AggregateError::BoundarySearch`].
///
/// Files smaller than the biased cut collapse the remaining boundaries onto
/// the previous one, producing empty trailing chunks rather than an error.
pub fn plan_chunks(buf: &[u8], workers: usize) -> Result<Vec<Chunk>> {
    if workers == 0 {
        return Err(AggregateError::Config(
            "worker count must be at least 1".to_string(),
        ));
    }

    let len = buf.len();
    if workers == 1 {
        return Ok(vec![Chunk::new(0, len)]);
    }

    let approx = len / workers;
    let mut chunks = Vec::with_capacity(workers);
    let mut prev = 0;

    for i in 1..workers {
        let target = (i * approx + BOUNDARY_SEARCH_BIAS).min(len);

        let boundary = if target <= prev {
            // The biased cut fell behind an earlier boundary; the chunk
            // degenerates to empty.
            prev
        } else {
            match memrchr(b'\n', &buf[prev..target]) {
                Some(pos) => prev + pos + 1,
                None => {
                    return Err(AggregateError::BoundarySearch {
                        boundary: i,
                        window_start: prev,
                        window_end: target,
                    })
                }
            }
        };

        chunks.push(Chunk::new(prev, boundary));
        prev = boundary;
    }

    chunks.push(Chunk::new(prev, len));
    Ok(chunks)
}
