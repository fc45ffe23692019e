/// Longest word stored in a table, in bytes.
/// Longer tokens are cut to this prefix by the tokenizer and counted once.
pub const MAX_WORD_LEN: usize = 255;

/// Default bucket count per table.
///
/// Every worker owns a table and the merge step owns one more, so
/// `workers + 1` bucket arrays exist at once. 4M buckets is 16MB per table
/// (zeroed lazily by the allocator) and keeps chains short for vocabularies
/// well into the millions. Raise it with `--buckets` for larger corpora,
/// lower it when running many workers on a small file.
pub const DEFAULT_BUCKETS: usize = 1 << 22;

/// Sentinel for "no entry" in `heads` and `Entry::next`.
/// Links are stored as `index + 1` so that an all-zero bucket array is a
/// valid empty table, which lets `vec![0; n]` use a zeroed allocation.
const NIL: u32 = 0;

#[derive(Debug, Clone)]
struct Entry {
    word: Box<[u8]>,
    count: u64,
    next: u32,
}

/// Word → count table: a fixed bucket array of singly linked chains whose
/// nodes live in one contiguous arena.
///
/// Each distinct word has exactly one entry. New words are prepended to
/// their chain, so iteration yields buckets in index order and, within a
/// bucket, the most recently inserted word first. Callers must not rely
/// on this order.
///
/// # Panics
///
/// Arena links are `u32`, so one table holds at most `u32::MAX - 1`
/// distinct words; inserting past that panics.
#[derive(Debug, Clone)]
pub struct FreqTable {
    heads: Vec<u32>,
    entries: Vec<Entry>,
}

impl Default for FreqTable {
    fn default() -> Self {
        Self::new()
    }
}

/// DJB2 string hash (`h * 33 + byte`, seed 5381).
#[inline]
pub fn djb2(word: &[u8]) -> u64 {
    let mut hash: u64 = 5381;
    for &b in word {
        hash = (hash << 5).wrapping_add(hash).wrapping_add(b as u64);
    }
    hash
}

impl FreqTable {
    /// Table with `DEFAULT_BUCKETS` buckets.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Table with a fixed bucket count. A count of 0 is treated as 1.
    pub fn with_buckets(buckets: usize) -> Self {
        FreqTable {
            heads: vec![NIL; buckets.max(1)],
            entries: Vec::new(),
        }
    }

    #[inline]
    fn bucket_of(&self, word: &[u8]) -> usize {
        (djb2(word) % self.heads.len() as u64) as usize
    }

    /// Insert-or-increment by one.
    #[inline]
    pub fn insert(&mut self, word: &[u8]) {
        self.add(word, 1);
    }

    /// Insert-or-increment by `n`.
    ///
    /// Walks the chain for `word`'s bucket; bumps the existing entry or
    /// prepends a new one with count `n`.
    ///
    /// # Panics
    ///
    /// If `word` is new and the table already holds `u32::MAX - 1` words.
    pub fn add(&mut self, word: &[u8], n: u64) {
        let bucket = self.bucket_of(word);
        let mut link = self.heads[bucket];
        while link != NIL {
            let entry = &mut self.entries[(link - 1) as usize];
            if *entry.word == *word {
                entry.count += n;
                return;
            }
            link = entry.next;
        }

        let link = link_for(self.entries.len());
        self.entries.push(Entry {
            word: word.into(),
            count: n,
            next: self.heads[bucket],
        });
        self.heads[bucket] = link;
    }

    /// Count for `word`, 0 if absent.
    pub fn get(&self, word: &[u8]) -> u64 {
        let mut link = self.heads[self.bucket_of(word)];
        while link != NIL {
            let entry = &self.entries[(link - 1) as usize];
            if *entry.word == *word {
                return entry.count;
            }
            link = entry.next;
        }
        0
    }

    /// Fold every `(word, count)` of `src` into `self`.
    /// Afterwards `self.get(w)` equals the old `self.get(w) + src.get(w)`.
    ///
    /// Walks `src`'s arena rather than its buckets, so the cost is one
    /// `add` per distinct source word whatever `src.buckets()` is.
    pub fn merge(&mut self, src: &FreqTable) {
        for (word, count) in src.entries() {
            self.add(word, count);
        }
    }

    /// Number of distinct words.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens inserted.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Bucket count this table was created with.
    #[inline]
    pub fn buckets(&self) -> usize {
        self.heads.len()
    }

    /// Longest chain, for diagnostics.
    pub fn max_chain(&self) -> usize {
        let mut longest = 0;
        for &head in &self.heads {
            let mut len = 0;
            let mut link = head;
            while link != NIL {
                len += 1;
                link = self.entries[(link - 1) as usize].next;
            }
            longest = longest.max(len);
        }
        longest
    }

    /// Iterate `(word, count)` in bucket order, newest-first within a chain.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            table: self,
            bucket: 0,
            link: NIL,
        }
    }

    /// Iterate `(word, count)` in first-insertion order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&[u8], u64)> + '_ {
        self.entries.iter().map(|e| (&*e.word, e.count))
    }

    /// Entries by descending count, ties broken by byte order of the word.
    pub fn sorted_by_count(&self) -> Vec<(&[u8], u64)> {
        let mut items: Vec<(&[u8], u64)> = self.entries().collect();
        items.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        items
    }
}

/// Link value for the arena slot `index`.
#[inline]
pub(super) fn link_for(index: usize) -> u32 {
    match u32::try_from(index + 1) {
        Ok(link) if link != u32::MAX => link,
        _ => panic!("frequency table exceeded {} entries", u32::MAX - 1),
    }
}

/// Iterator over a table's `(word, count)` pairs.
pub struct Iter<'a> {
    table: &'a FreqTable,
    bucket: usize,
    link: u32,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], u64);

    fn next(&mut self) -> Option<Self::Item> {
        while self.link == NIL {
            if self.bucket >= self.table.heads.len() {
                return None;
            }
            self.link = self.table.heads[self.bucket];
            self.bucket += 1;
        }
        let entry = &self.table.entries[(self.link - 1) as usize];
        self.link = entry.next;
        Some((&*entry.word, entry.count))
    }
}

impl<'a> IntoIterator for &'a FreqTable {
    type Item = (&'a [u8], u64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
