//! The fixed 66-book canon and positional identifier resolution.
//!
//! OSIS documents in the supported subset carry no book codes, so a book's
//! identifier is determined purely by its ordinal position across both
//! testaments: the first book is `GEN`, the 40th is `MAT`, the 66th `REV`.

use crate::error::{Error, Result};

/// Number of books in the canon.
pub const BOOK_COUNT: usize = 66;

/// Canonical USFM book identifiers in canonical order.
pub const BOOK_IDS: [&str; BOOK_COUNT] = [
    "GEN", "EXO", "LEV", "NUM", "DEU", "JOS", "JDG", "RUT", "1SA", "2SA", "1KI", "2KI", "1CH",
    "2CH", "EZR", "NEH", "EST", "JOB", "PSA", "PRO", "ECC", "SNG", "ISA", "JER", "LAM", "EZK",
    "DAN", "HOS", "JOL", "AMO", "OBA", "JON", "MIC", "NAM", "HAB", "ZEP", "HAG", "ZEC", "MAL",
    "MAT", "MRK", "LUK", "JHN", "ACT", "ROM", "1CO", "2CO", "GAL", "EPH", "PHP", "COL", "1TH",
    "2TH", "1TI", "2TI", "TIT", "PHM", "HEB", "JAS", "1PE", "2PE", "1JN", "2JN", "3JN", "JUD",
    "REV",
];

/// A book's place in the canon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookSlot {
    /// Zero-based index into [`BOOK_IDS`].
    pub index: usize,
}

impl BookSlot {
    /// Resolve the book found at zero-based document position `index`.
    pub fn resolve(index: usize) -> Result<Self> {
        if index < BOOK_COUNT {
            Ok(Self { index })
        } else {
            Err(Error::IndexOutOfRange {
                ordinal: index + 1,
                limit: BOOK_COUNT,
            })
        }
    }

    /// Canonical identifier, e.g. `"GEN"`.
    pub fn id(self) -> &'static str {
        BOOK_IDS[self.index]
    }

    /// One-based sequence number used in output file names.
    pub fn sequence(self) -> usize {
        self.index + 1
    }
}

/// Zero-based canonical position of `id`, if it is a known identifier.
pub fn position(id: &str) -> Option<usize> {
    BOOK_IDS.iter().position(|&known| known == id)
}

pub fn is_known(id: &str) -> bool {
    position(id).is_some()
}

/// Hands out [`BookSlot`]s in document order.
///
/// The counter runs across testaments without resetting.
#[derive(Debug, Default)]
pub struct Resolver {
    next: usize,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the next book. Fails once the canon is exhausted and keeps
    /// failing on later calls.
    pub fn next_book(&mut self) -> Result<BookSlot> {
        let slot = BookSlot::resolve(self.next)?;
        self.next += 1;
        Ok(slot)
    }

    /// Number of books resolved so far.
    pub fn resolved(&self) -> usize {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_boundaries() {
        assert_eq!(BOOK_IDS[0], "GEN");
        assert_eq!(BOOK_IDS[38], "MAL");
        assert_eq!(BOOK_IDS[39], "MAT");
        assert_eq!(BOOK_IDS[65], "REV");
    }

    #[test]
    fn test_table_ids_are_unique() {
        for (i, id) in BOOK_IDS.iter().enumerate() {
            assert_eq!(position(id), Some(i), "duplicate identifier {id}");
        }
    }

    #[test]
    fn test_resolve_slot() {
        let slot = BookSlot::resolve(0).unwrap();
        assert_eq!(slot.id(), "GEN");
        assert_eq!(slot.sequence(), 1);

        let slot = BookSlot::resolve(65).unwrap();
        assert_eq!(slot.id(), "REV");
        assert_eq!(slot.sequence(), 66);
    }

    #[test]
    fn test_resolve_out_of_range() {
        match BookSlot::resolve(66) {
            Err(Error::IndexOutOfRange { ordinal, limit }) => {
                assert_eq!(ordinal, 67);
                assert_eq!(limit, 66);
            }
            other => panic!("Expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_resolver_counts_in_order() {
        let mut resolver = Resolver::new();
        let ids: Vec<_> = (0..BOOK_COUNT)
            .map(|_| resolver.next_book().unwrap().id())
            .collect();
        assert_eq!(ids, BOOK_IDS);
        assert_eq!(resolver.resolved(), 66);

        assert!(resolver.next_book().is_err());
        assert!(resolver.next_book().is_err());
        assert_eq!(resolver.resolved(), 66);
    }

    #[test]
    fn test_is_known() {
        assert!(is_known("1JN"));
        assert!(!is_known("gen"));
        assert!(!is_known("TOB"));
    }
}
