use memchr::memchr;

use crate::error::{AggregateError, Result};
use crate::models::Chunk;
use crate::utils::constants::{COMMENT_BYTE, DELIMITER_BYTE};

/// One parsed `key;value` record.
///
/// The station name borrows straight from the mapped buffer; nothing is copied
/// until the key is first inserted into an accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRecord<'a> {
    pub station: &'a [u8],
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Skipping a `#` line to its newline.
    Comment,
    /// Consuming the station name up to the `;` delimiter.
    Key,
    /// Consuming the measurement up to the newline (or end of range).
    Value,
}

/// Forward-only scanner over one chunk of the mapped buffer.
///
/// A finite state machine exposed as a lazy iterator of parsed records. A
/// malformed record (missing delimiter, unparseable measurement) yields one
/// `Err` carrying the byte offset, after which the scanner is exhausted: the
/// run is aborted rather than resynchronized.
pub struct RecordScanner<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
    state: ScanState,
    key_start: usize,
    key_end: usize,
    failed: bool,
}

impl<'a> RecordScanner<'a> {
    pub fn new(buf: &'a [u8], chunk: Chunk) -> Self {
        debug_assert!(chunk.end <= buf.len());
        Self {
            buf,
            pos: chunk.start,
            end: chunk.end,
            state: ScanState::Key,
            key_start: chunk.start,
            key_end: chunk.start,
            failed: false,
        }
    }

    fn fail(&mut self, offset: usize, reason: String) -> AggregateError {
        self.failed = true;
        AggregateError::InvalidRecord { offset, reason }
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = Result<RawRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while self.pos < self.end {
            match self.state {
                ScanState::Comment => {
                    match memchr(b'\n', &self.buf[self.pos..self.end]) {
                        Some(rel) => self.pos += rel + 1,
                        None => self.pos = self.end,
                    }
                    self.state = ScanState::Key;
                }

                ScanState::Key => match self.buf[self.pos] {
                    b'\n' => self.pos += 1,
                    COMMENT_BYTE => self.state = ScanState::Comment,
                    _ => {
                        let record_start = self.pos;
                        let Some(rel) = memchr(DELIMITER_BYTE, &self.buf[self.pos..self.end])
                        else {
                            return Some(Err(self.fail(
                                record_start,
                                "record has no ';' delimiter".to_string(),
                            )));
                        };

                        let key = &self.buf[self.pos..self.pos + rel];
                        if memchr(b'\n', key).is_some() {
                            return Some(Err(self.fail(
                                record_start,
                                "record has no ';' delimiter before end of line".to_string(),
                            )));
                        }

                        self.key_start = self.pos;
                        self.key_end = self.pos + rel;
                        self.pos += rel + 1;
                        self.state = ScanState::Value;
                    }
                },

                ScanState::Value => {
                    let value_start = self.pos;
                    let value_end = match memchr(b'\n', &self.buf[self.pos..self.end]) {
                        Some(rel) => self.pos + rel,
                        // Final record without a trailing newline.
                        None => self.end,
                    };

                    let raw = &self.buf[value_start..value_end];
                    let value = match std::str::from_utf8(raw)
                        .ok()
                        .and_then(|text| text.parse::<f64>().ok())
                    {
                        Some(value) => value,
                        None => {
                            return Some(Err(self.fail(
                                value_start,
                                format!(
                                    "invalid measurement '{}'",
                                    String::from_utf8_lossy(raw)
                                ),
                            )))
                        }
                    };

                    self.pos = (value_end + 1).min(self.end);
                    self.state = ScanState::Key;

                    return Some(Ok(RawRecord {
                        station: &self.buf[self.key_start..self.key_end],
                        value,
                    }));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(input: &[u8]) -> Vec<Result<RawRecord<'_>>> {
        RecordScanner::new(input, Chunk::new(0, input.len())).collect()
    }

    fn scan_ok(input: &[u8]) -> Vec<(String, f64)> {
        scan_all(input)
            .into_iter()
            .map(|record| {
                let record = record.expect("record should parse");
                (
                    String::from_utf8(record.station.to_vec()).unwrap(),
                    record.value,
                )
            })
            .collect()
    }

    #[test]
    fn test_parses_records() {
        let records = scan_ok(b"Leeds;10.5\nYork;-3.25\nLeeds;0\n");
        assert_eq!(
            records,
            vec![
                ("Leeds".to_string(), 10.5),
                ("York".to_string(), -3.25),
                ("Leeds".to_string(), 0.0),
            ]
        );
    }

    #[test]
    fn test_skips_comment_lines_anywhere() {
        let input = b"# header comment\nLeeds;10.5\n# interspersed\nYork;2.0\n";
        let records = scan_ok(input);
        assert_eq!(
            records,
            vec![("Leeds".to_string(), 10.5), ("York".to_string(), 2.0)]
        );
    }

    #[test]
    fn test_comment_only_input_yields_nothing() {
        assert!(scan_all(b"# one\n# two\n").is_empty());
        // Unterminated trailing comment.
        assert!(scan_all(b"# no newline").is_empty());
    }

    #[test]
    fn test_skips_blank_lines() {
        let records = scan_ok(b"\nLeeds;1.0\n\n\nYork;2.0\n");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_final_record_without_newline() {
        let records = scan_ok(b"Leeds;1.0\nYork;2.5");
        assert_eq!(
            records,
            vec![("Leeds".to_string(), 1.0), ("York".to_string(), 2.5)]
        );
    }

    #[test]
    fn test_empty_chunk_yields_nothing() {
        let buf = b"Leeds;1.0\n";
        let mut scanner = RecordScanner::new(buf, Chunk::new(4, 4));
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_scan_respects_chunk_bounds() {
        let buf = b"Leeds;1.0\nYork;2.0\nHull;3.0\n";
        let records: Vec<_> = RecordScanner::new(buf, Chunk::new(10, 19))
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].station, b"York");
        assert_eq!(records[0].value, 2.0);
    }

    #[test]
    fn test_unparseable_value_is_fatal() {
        let mut scanner = RecordScanner::new(
            b"Leeds;1.0\nYork;oops\nHull;3.0\n",
            Chunk::new(0, 29),
        );

        assert!(scanner.next().unwrap().is_ok());
        let err = scanner.next().unwrap().unwrap_err();
        match err {
            AggregateError::InvalidRecord { offset, reason } => {
                assert_eq!(offset, 15);
                assert!(reason.contains("oops"));
            }
            other => panic!("unexpected error: {other}"),
        }

        // Fatal: the scanner does not resynchronize.
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_missing_delimiter_is_fatal() {
        let input = b"Leeds 10.5\nYork;2.0\n";
        let results = scan_all(input);
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0],
            Err(AggregateError::InvalidRecord { offset: 0, .. })
        ));
    }

    #[test]
    fn test_empty_value_field_is_fatal() {
        let results = scan_all(b"Leeds;\n");
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
