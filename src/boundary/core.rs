/// Whitespace lookup table for word boundary detection.
/// C locale `isspace()`: space, tab, newline, CR, form feed, vertical tab.
const fn make_ws_table() -> [u8; 256] {
    let mut t = [0u8; 256];
    t[0x09] = 1; // \t  horizontal tab
    t[0x0A] = 1; // \n  newline
    t[0x0B] = 1; // \v  vertical tab
    t[0x0C] = 1; // \f  form feed
    t[0x0D] = 1; // \r  carriage return
    t[0x20] = 1; //     space
    t
}

/// Precomputed whitespace lookup: `WS_TABLE[byte] == 1` if whitespace, `0` otherwise.
const WS_TABLE: [u8; 256] = make_ws_table();

/// True if `b` separates words.
#[inline(always)]
pub fn is_space(b: u8) -> bool {
    WS_TABLE[b as usize] != 0
}

/// Earliest offset at or before `offset` where a word can begin.
///
/// Returns `offset` itself when it is 0 or the byte before it is whitespace.
/// Otherwise walks back to the start of the token containing (or ending
/// right before) `offset`. Offsets past the end are clamped to `data.len()`.
pub fn find_start(data: &[u8], offset: usize) -> usize {
    let offset = offset.min(data.len());
    if offset == 0 || is_space(data[offset - 1]) {
        return offset;
    }
    match data[..offset].iter().rposition(|&b| is_space(b)) {
        Some(ws) => ws + 1,
        None => 0,
    }
}

/// First whitespace position at or after `offset`, or `data.len()` if the
/// token runs to the end of the data.
pub fn find_end(data: &[u8], offset: usize) -> usize {
    if offset >= data.len() {
        return data.len();
    }
    match data[offset..].iter().position(|&b| is_space(b)) {
        Some(ws) => offset + ws,
        None => data.len(),
    }
}

/// Word-aligned split point for a raw offset.
///
/// Two neighbouring chunks both evaluate this on their shared raw offset and
/// get the same answer, so their corrected ranges meet exactly. When the
/// raw offset already sits on a boundary it is kept; when it lands inside a
/// token (or just after one), that token stays with the earlier chunk and
/// the split moves forward to the whitespace that ends it.
pub fn align(data: &[u8], offset: usize) -> usize {
    let offset = offset.min(data.len());
    if find_start(data, offset) == offset {
        offset
    } else {
        find_end(data, offset)
    }
}
