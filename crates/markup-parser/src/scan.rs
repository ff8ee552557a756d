//! Tag Scanning
//!
//! Chunked byte search and lookup-table tag matching.
//! Every delimiter is ASCII, so byte offsets returned here are always
//! valid `str` boundaries.

/// Chunk size for batched scanning
pub const CHUNK_SIZE: usize = 16;

/// Shared scanner for tag and attribute names
pub static TAG_SCANNER: TagScanner = TagScanner::new();

/// Find byte in haystack using chunked scanning
pub fn find_char(haystack: &[u8], needle: u8) -> Option<usize> {
    let chunks = haystack.chunks_exact(CHUNK_SIZE);
    let remainder = chunks.remainder();

    let mut offset = 0;

    for chunk in chunks {
        if let Some(i) = chunk.iter().position(|&b| b == needle) {
            return Some(offset + i);
        }
        offset += CHUNK_SIZE;
    }

    remainder.iter().position(|&b| b == needle).map(|i| offset + i)
}

/// Whitespace allowed after a tag name and around `=`: `\t`, `\n`, `\x0C`, `\r` and space
#[inline]
pub const fn is_markup_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

/// Skip markup whitespace starting at `start`
pub fn skip_whitespace(input: &[u8], start: usize) -> usize {
    let mut pos = start;

    while pos + CHUNK_SIZE <= input.len() {
        let chunk = &input[pos..pos + CHUNK_SIZE];
        if chunk.iter().all(|&b| is_markup_whitespace(b)) {
            pos += CHUNK_SIZE;
        } else {
            break;
        }
    }

    while pos < input.len() && is_markup_whitespace(input[pos]) {
        pos += 1;
    }

    pos
}

/// Opening tag recognized at the start of some input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenTag<'a> {
    /// Tag name
    pub name: &'a str,
    /// Everything between the name and `>`
    pub raw_attributes: &'a str,
    /// Byte length of the tag, `<` and `>` included
    pub len: usize,
}

/// Lookup-table tag matcher
pub struct TagScanner {
    /// `[A-Za-z0-9_-]`
    name_chars: [bool; 256],
}

impl Default for TagScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TagScanner {
    pub const fn new() -> Self {
        let mut name_chars = [false; 256];

        let mut c = 0;
        while c < 256 {
            let b = c as u8;
            name_chars[c] = b.is_ascii_alphanumeric() || b == b'_' || b == b'-';
            c += 1;
        }

        Self { name_chars }
    }

    #[inline]
    pub fn is_name_char(&self, b: u8) -> bool {
        self.name_chars[b as usize]
    }

    /// Scan a name run, returning the offset just past it
    pub fn scan_name(&self, input: &[u8], start: usize) -> usize {
        let mut pos = start;

        while pos < input.len() && self.is_name_char(input[pos]) {
            pos += 1;
        }

        pos
    }

    /// Match `<name>` or `<name attrs>` at the very start of `input`.
    ///
    /// Attribute text must be introduced by whitespace and runs to the
    /// first `>`, so `<br/>` is rejected.
    pub fn match_open_tag<'a>(&self, input: &'a str) -> Option<OpenTag<'a>> {
        let bytes = input.as_bytes();
        if bytes.first() != Some(&b'<') {
            return None;
        }

        let name_end = self.scan_name(bytes, 1);
        if name_end == 1 {
            return None;
        }

        let gt = name_end + find_char(&bytes[name_end..], b'>')?;
        if gt > name_end && !is_markup_whitespace(bytes[name_end]) {
            return None;
        }

        Some(OpenTag {
            name: &input[1..name_end],
            raw_attributes: &input[name_end..gt],
            len: gt + 1,
        })
    }
}
