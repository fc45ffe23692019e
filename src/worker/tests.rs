use std::path::Path;

use super::*;
use crate::error::FreqError;
use crate::table::{FreqTable, MAX_WORD_LEN};

fn count(data: &[u8]) -> (FreqTable, u64) {
    let mut t = FreqTable::with_buckets(64);
    let n = count_tokens(data, &mut t);
    (t, n)
}

// ──────────────────────────────────────────────────
// ChunkRange
// ──────────────────────────────────────────────────

#[test]
fn test_chunk_range_len() {
    assert_eq!(ChunkRange::new(3, 10).len(), 7);
    assert!(ChunkRange::new(5, 5).is_empty());
    assert_eq!(ChunkRange::new(9, 4).len(), 0);
    assert!(ChunkRange::default().is_empty());
}

// ──────────────────────────────────────────────────
// Tokenizer
// ──────────────────────────────────────────────────

#[test]
fn test_count_tokens_empty() {
    let (t, n) = count(b"");
    assert_eq!(n, 0);
    assert!(t.is_empty());
}

#[test]
fn test_count_tokens_all_whitespace() {
    let (t, n) = count(b" \t\n\r\x0B\x0C ");
    assert_eq!(n, 0);
    assert!(t.is_empty());
}

#[test]
fn test_count_tokens_sentence() {
    let (t, n) = count(b"the cat sat on the mat");
    assert_eq!(n, 6);
    assert_eq!(t.len(), 5);
    assert_eq!(t.get(b"the"), 2);
    assert_eq!(t.get(b"mat"), 1);
}

#[test]
fn test_count_tokens_mixed_whitespace() {
    let (t, n) = count(b"  one\ttwo\n\nthree\r\none  ");
    assert_eq!(n, 4);
    assert_eq!(t.get(b"one"), 2);
    assert_eq!(t.get(b"two"), 1);
    assert_eq!(t.get(b"three"), 1);
}

#[test]
fn test_count_tokens_punctuation_is_word_content() {
    let (t, _) = count(b"end. end end,");
    assert_eq!(t.get(b"end."), 1);
    assert_eq!(t.get(b"end"), 1);
    assert_eq!(t.get(b"end,"), 1);
}

#[test]
fn test_count_tokens_nul_is_word_content() {
    let (t, n) = count(b"a\x00b c");
    assert_eq!(n, 2);
    assert_eq!(t.get(b"a\x00b"), 1);
}

#[test]
fn test_count_tokens_exactly_max_len_kept() {
    let word = vec![b'x'; MAX_WORD_LEN];
    let (t, n) = count(&word);
    assert_eq!(n, 1);
    assert_eq!(t.get(&word), 1);
}

#[test]
fn test_count_tokens_long_token_truncated_once() {
    let mut data = vec![b'a'; 300];
    data.extend_from_slice(b" tail");
    let (t, n) = count(&data);
    assert_eq!(n, 2);
    assert_eq!(t.get(&vec![b'a'; MAX_WORD_LEN]), 1);
    // The remaining 45 bytes are not a separate token
    assert_eq!(t.get(&vec![b'a'; 45]), 0);
    assert_eq!(t.get(b"tail"), 1);
    assert_eq!(t.len(), 2);
}

#[test]
fn test_count_tokens_truncation_merges_common_prefix() {
    let mut a = vec![b'p'; MAX_WORD_LEN];
    a.extend_from_slice(b"-one");
    let mut b = vec![b'p'; MAX_WORD_LEN];
    b.extend_from_slice(b"-two");
    let mut data = a;
    data.push(b' ');
    data.extend_from_slice(&b);
    let (t, n) = count(&data);
    assert_eq!(n, 2);
    assert_eq!(t.len(), 1);
    assert_eq!(t.get(&vec![b'p'; MAX_WORD_LEN]), 2);
}

// ──────────────────────────────────────────────────
// Range correction
// ──────────────────────────────────────────────────

const TEXT: &[u8] = b"the cat sat on the mat";

#[test]
fn test_correct_range_whole_file() {
    let r = correct_range(TEXT, ChunkRange::new(0, TEXT.len() as u64));
    assert_eq!(r, ChunkRange::new(0, TEXT.len() as u64));
}

#[test]
fn test_correct_range_split_mid_word() {
    // raw split at 5 falls inside "cat"
    let left = correct_range(TEXT, ChunkRange::new(0, 5));
    let right = correct_range(TEXT, ChunkRange::new(5, TEXT.len() as u64));
    assert_eq!(left, ChunkRange::new(0, 7));
    assert_eq!(right, ChunkRange::new(7, TEXT.len() as u64));
}

#[test]
fn test_correct_range_clamps_past_end() {
    let r = correct_range(TEXT, ChunkRange::new(100, 200));
    assert_eq!(r, ChunkRange::new(TEXT.len() as u64, TEXT.len() as u64));
}

#[test]
fn test_correct_range_swallowed_chunk_is_empty() {
    // A chunk lying entirely inside one long word owns nothing
    let data = b"aaaaaaaaaaaaaaaa bb";
    let r = correct_range(data, ChunkRange::new(4, 8));
    assert!(r.is_empty());
}

#[test]
fn test_corrected_ranges_tile_data() {
    let n = 7u64;
    let size = TEXT.len() as u64;
    let chunk = size / n;
    let mut prev_end = 0;
    for i in 0..n {
        let end = if i + 1 == n { size } else { (i + 1) * chunk };
        let r = correct_range(TEXT, ChunkRange::new(i * chunk, end));
        assert_eq!(r.start, prev_end, "gap or overlap before chunk {}", i);
        prev_end = r.end;
    }
    assert_eq!(prev_end, size);
}

// ──────────────────────────────────────────────────
// count_chunk / process_chunk
// ──────────────────────────────────────────────────

#[test]
fn test_count_chunk_split_word_counted_once() {
    let left = count_chunk(TEXT, 0, ChunkRange::new(0, 5), 16);
    let right = count_chunk(TEXT, 1, ChunkRange::new(5, TEXT.len() as u64), 16);
    assert_eq!(left.table.get(b"cat"), 1);
    assert_eq!(right.table.get(b"cat"), 0);
    assert_eq!(left.table.get(b"ca"), 0);
    assert_eq!(right.table.get(b"t"), 0);
    assert_eq!(left.tokens + right.tokens, 6);
}

#[test]
fn test_count_chunk_empty_range() {
    let out = count_chunk(TEXT, 3, ChunkRange::new(0, 0), 16);
    assert_eq!(out.index, 3);
    assert_eq!(out.tokens, 0);
    assert!(out.table.is_empty());
}

#[test]
fn test_count_chunk_uses_requested_buckets() {
    let out = count_chunk(TEXT, 0, ChunkRange::new(0, 4), 13);
    assert_eq!(out.table.buckets(), 13);
}

#[test]
fn test_process_chunk_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::write(&path, TEXT).unwrap();
    let out = process_chunk(&path, 0, ChunkRange::new(0, TEXT.len() as u64), 64, false).unwrap();
    assert_eq!(out.tokens, 6);
    assert_eq!(out.table.get(b"the"), 2);
    assert_eq!(out.corrected, ChunkRange::new(0, TEXT.len() as u64));
}

#[test]
fn test_process_chunk_missing_file() {
    let err = process_chunk(
        Path::new("/nonexistent_fwordfreq_chunk"),
        0,
        ChunkRange::new(0, 10),
        16,
        true,
    )
    .unwrap_err();
    assert!(matches!(err, FreqError::Open { .. }));
    assert!(err.to_string().contains("/nonexistent_fwordfreq_chunk"));
}

#[test]
fn test_process_chunk_shared_view_counts_own_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::write(&path, TEXT).unwrap();
    let left = process_chunk(&path, 0, ChunkRange::new(0, 5), 16, true).unwrap();
    let right = process_chunk(&path, 1, ChunkRange::new(5, TEXT.len() as u64), 16, true).unwrap();
    assert_eq!(left.table.get(b"cat"), 1);
    assert_eq!(right.table.get(b"cat"), 0);
    assert_eq!(left.tokens + right.tokens, 6);
}

#[test]
fn test_process_chunk_empty_range_owns_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::write(&path, TEXT).unwrap();
    let out = process_chunk(&path, 4, ChunkRange::new(0, 0), 16, true).unwrap();
    assert_eq!(out.index, 4);
    assert_eq!(out.tokens, 0);
    assert!(out.table.is_empty());
    assert_eq!(out.table.buckets(), 16);
}

#[test]
fn test_process_chunk_empty_range_still_opens() {
    let err = process_chunk(
        Path::new("/nonexistent_fwordfreq_empty_chunk"),
        2,
        ChunkRange::new(0, 0),
        16,
        true,
    )
    .unwrap_err();
    assert!(matches!(err, FreqError::Open { .. }));
}
