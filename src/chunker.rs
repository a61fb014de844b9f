use std::fmt;

// @module: Fixed-width text chunking

/// A bounded-length contiguous slice of the source text
///
/// The index determines the final reassembly order and is preserved through
/// translation and synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    // @field: Position in the overall document
    pub index: usize,

    // @field: Chunk text
    pub content: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(index: usize, content: impl Into<String>) -> Self {
        Chunk {
            index,
            content: content.into(),
        }
    }

    /// Number of characters in the chunk
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk {} ({} chars)", self.index, self.char_len())
    }
}

/// Split text into fixed-width, non-overlapping chunks by character count.
///
/// Chunk i covers characters `[i*chunk_size, (i+1)*chunk_size)`; the last
/// chunk may be shorter. The split is deliberately not word or sentence
/// aware: a boundary may land mid-word. Concatenating the chunk contents in
/// index order reproduces the input exactly.
///
/// `chunk_size` must be positive; configuration validation rejects zero
/// before the pipeline starts, so this only debug-asserts.
pub fn split_into_chunks(text: &str, chunk_size: usize) -> Vec<Chunk> {
    debug_assert!(chunk_size > 0, "chunk_size must be positive");
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let mut chunks = Vec::with_capacity(text.len() / chunk_size + 1);
    let mut current = String::with_capacity(chunk_size.min(text.len()));
    let mut current_len = 0;

    for ch in text.chars() {
        current.push(ch);
        current_len += 1;
        if current_len == chunk_size {
            chunks.push(Chunk::new(chunks.len(), std::mem::take(&mut current)));
            current_len = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(Chunk::new(chunks.len(), current));
    }

    chunks
}

/// Number of chunks a text of `char_len` characters splits into
pub fn chunk_count(char_len: usize, chunk_size: usize) -> usize {
    if chunk_size == 0 {
        return 0;
    }
    char_len.div_ceil(chunk_size)
}
