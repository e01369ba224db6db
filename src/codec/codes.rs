//! Alphabetic tile codes and the code allocation scheme
//!
//! A code is a fixed-width numeral in base 52 over the alphabet `a..z A..Z`.
//! Width is the smallest `L` with `52^L` at least the number of distinct
//! values. Allocation is a pure function of the value set and an optional
//! reference table, so re-encoding the same grid always yields the same codes.

use std::collections::{BTreeSet, HashMap};

use crate::spatial::Content;

/// Code symbols in ascending digit order
pub const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of symbols available per code digit
pub const RADIX: usize = 52;

/// Smallest code width able to address `count` distinct values (at least 1)
pub const fn code_width(count: usize) -> usize {
    let mut width = 1;
    let mut capacity = RADIX;
    while capacity < count {
        capacity = capacity.saturating_mul(RADIX);
        width += 1;
    }
    width
}

/// Number of codes addressable at `width`, saturating at `usize::MAX`
pub const fn code_capacity(width: usize) -> usize {
    let mut capacity: usize = 1;
    let mut digit = 0;
    while digit < width {
        capacity = capacity.saturating_mul(RADIX);
        digit += 1;
    }
    capacity
}

/// Render `index` as a base-52 numeral left-padded to `width`
///
/// Most significant digit first; digit `d` maps to `ALPHABET[d]`. Indices
/// too large for `width` produce a longer code.
pub fn int_to_code(index: usize, width: usize) -> String {
    let mut digits = Vec::with_capacity(width);
    let mut rest = index;
    loop {
        digits.push(symbol(rest % RADIX));
        rest /= RADIX;
        if rest == 0 {
            break;
        }
    }
    while digits.len() < width {
        digits.push(symbol(0));
    }
    digits.iter().rev().collect()
}

/// Numeric value of a code, `None` if it contains a non-alphabet symbol
pub fn code_to_int(code: &str) -> Option<usize> {
    code.bytes().try_fold(0usize, |acc, byte| {
        let digit = digit_of(byte)?;
        acc.checked_mul(RADIX)?.checked_add(digit)
    })
}

/// Whether every character of `code` is an alphabet symbol
pub fn is_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|byte| digit_of(byte).is_some())
}

fn symbol(digit: usize) -> char {
    ALPHABET.get(digit).map_or('a', |&byte| char::from(byte))
}

const fn digit_of(byte: u8) -> Option<usize> {
    match byte {
        b'a'..=b'z' => Some((byte - b'a') as usize),
        b'A'..=b'Z' => Some((byte - b'A') as usize + 26),
        _ => None,
    }
}

/// Bidirectional mapping between codes and tile content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    by_code: HashMap<String, Content>,
    by_value: HashMap<Content, String>,
}

impl CodeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a code/value pair
    ///
    /// Returns `false` and leaves the table unchanged when either side is
    /// already mapped, which keeps the mapping bijective.
    pub fn insert(&mut self, code: impl Into<String>, value: impl Into<Content>) -> bool {
        let code = code.into();
        let value = value.into();
        if self.by_code.contains_key(&code) || self.by_value.contains_key(&value) {
            return false;
        }
        self.by_code.insert(code.clone(), value.clone());
        self.by_value.insert(value, code);
        true
    }

    /// Record a dictionary entry read from a map file
    ///
    /// Files may list one value under several codes; every code stays
    /// decodable and reverse lookups answer with the first one seen.
    /// Returns `false` when the code is already defined.
    pub fn define(&mut self, code: impl Into<String>, value: impl Into<Content>) -> bool {
        let code = code.into();
        if self.by_code.contains_key(&code) {
            return false;
        }
        let value = value.into();
        self.by_value
            .entry(value.clone())
            .or_insert_with(|| code.clone());
        self.by_code.insert(code, value);
        true
    }

    /// Content for a code
    pub fn value_of(&self, code: &str) -> Option<&Content> {
        self.by_code.get(code)
    }

    /// Code for a content value
    pub fn code_of(&self, value: &str) -> Option<&str> {
        self.by_value.get(value).map(String::as_str)
    }

    /// Whether the code is in use
    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Length of the longest code, 0 for an empty table
    pub fn width(&self) -> usize {
        self.by_code.keys().map(String::len).max().unwrap_or(0)
    }

    /// Entries in ascending code order (shorter codes first, then by value)
    pub fn entries(&self) -> Vec<(&str, &Content)> {
        let mut entries: Vec<(&str, &Content)> = self
            .by_code
            .iter()
            .map(|(code, value)| (code.as_str(), value))
            .collect();
        entries.sort_by_key(|(code, _)| (code.len(), code_to_int(code)));
        entries
    }
}

/// Assign codes to a set of distinct content values
///
/// Values already present in `reference` keep their code when it fits the
/// current width (re-padded if the reference used a different width).
/// Remaining values take the lowest free codes in sorted value order.
pub fn allocate_codes(values: &BTreeSet<Content>, reference: Option<&CodeTable>) -> CodeTable {
    let width = code_width(values.len());
    let capacity = code_capacity(width);
    let mut table = CodeTable::new();
    let mut fresh = Vec::new();

    for value in values {
        let reused = reference
            .and_then(|reference| reference.code_of(value))
            .and_then(code_to_int)
            .filter(|&index| index < capacity)
            .map(|index| int_to_code(index, width));
        let kept = reused.is_some_and(|code| table.insert(code, value.clone()));
        if !kept {
            fresh.push(value);
        }
    }
    let reused = table.len();

    let mut counter = 0;
    for value in fresh {
        let mut code = int_to_code(counter, width);
        while table.contains_code(&code) {
            counter += 1;
            code = int_to_code(counter, width);
        }
        counter += 1;
        table.insert(code, value.clone());
    }

    tracing::debug!(
        values = values.len(),
        width,
        reused,
        "allocated tile codes"
    );
    table
}
