/// Field delimiter between station name and measurement.
pub const DELIMITER_BYTE: u8 = b';';

/// Lines starting with this byte are skipped entirely.
pub const COMMENT_BYTE: u8 = b'#';

/// Forward bias applied to a nominal chunk cut before scanning backward for a
/// newline. Steps past a record that starts just before the cut.
pub const BOUNDARY_SEARCH_BIAS: usize = 50;
