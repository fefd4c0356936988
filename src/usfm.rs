//! USFM rendering for a single book.
//!
//! Output uses only five markers:
//!
//! ```text
//! \id GEN
//! \h Genesis
//! \toc2 Genesis
//! \c 1
//! \v 1 In the beginning...
//! ```
//!
//! Chapter and verse numbers are the 1-based position of the element within
//! its parent; numbering attributes in the source are never consulted.

use std::io::{self, Write};

use crate::canon::BookSlot;
use crate::osis::Book;

/// A book paired with everything needed to render it.
#[derive(Debug, Clone, Copy)]
pub struct BookHeader<'a> {
    pub slot: BookSlot,
    /// Display name for `\h` and `\toc2`; empty when unknown.
    pub name: &'a str,
}

impl<'a> BookHeader<'a> {
    pub fn new(slot: BookSlot, name: &'a str) -> Self {
        Self { slot, name }
    }
}

/// Write `book` as USFM to `writer`.
pub fn write_book<W: Write>(header: BookHeader<'_>, book: &Book, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "\\id {}", header.slot.id())?;
    writeln!(writer, "\\h {}", header.name)?;
    writeln!(writer, "\\toc2 {}", header.name)?;

    for (chapter_index, chapter) in book.chapters.iter().enumerate() {
        writeln!(writer, "\\c {}", chapter_index + 1)?;
        for (verse_index, verse) in chapter.verses.iter().enumerate() {
            writeln!(writer, "\\v {} {}", verse_index + 1, verse.text())?;
        }
    }

    Ok(())
}

/// Render `book` to a string.
pub fn render_book(header: BookHeader<'_>, book: &Book) -> String {
    let mut output = Vec::new();
    write_book(header, book, &mut output).expect("writing to a Vec cannot fail");
    String::from_utf8(output).expect("USFM is built from UTF-8 strings")
}

/// Output file name for a book: `<base>_<NN>_<ID>.usfm`.
pub fn file_name(base: &str, slot: BookSlot) -> String {
    format!("{}_{:02}_{}.usfm", base, slot.sequence(), slot.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osis::{Chapter, Verse};
    use proptest::prelude::*;

    fn slot(index: usize) -> BookSlot {
        BookSlot::resolve(index).unwrap()
    }

    fn book(chapters: &[&[Option<&str>]]) -> Book {
        Book {
            chapters: chapters
                .iter()
                .map(|verses| Chapter {
                    verses: verses
                        .iter()
                        .map(|text| Verse {
                            text: text.map(str::to_string),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_render_without_name() {
        let book = book(&[&[Some("a"), Some("b"), Some("c")], &[Some("d")]]);
        let usfm = render_book(BookHeader::new(slot(0), ""), &book);
        assert_eq!(
            usfm,
            "\\id GEN\n\\h \n\\toc2 \n\\c 1\n\\v 1 a\n\\v 2 b\n\\v 3 c\n\\c 2\n\\v 1 d\n"
        );
    }

    #[test]
    fn test_render_with_name() {
        let book = book(&[&[Some("Amen.")]]);
        let usfm = render_book(BookHeader::new(slot(65), "Revelation"), &book);
        assert!(usfm.starts_with("\\id REV\n\\h Revelation\n\\toc2 Revelation\n"));
    }

    #[test]
    fn test_empty_verse_keeps_trailing_space() {
        let book = book(&[&[None, Some("")]]);
        let usfm = render_book(BookHeader::new(slot(0), ""), &book);
        assert!(usfm.ends_with("\\c 1\n\\v 1 \n\\v 2 \n"));
    }

    #[test]
    fn test_book_without_chapters() {
        let usfm = render_book(BookHeader::new(slot(30), "Obadiah"), &Book::default());
        assert_eq!(usfm, "\\id OBA\n\\h Obadiah\n\\toc2 Obadiah\n");
    }

    #[test]
    fn test_non_ascii_text() {
        let book = book(&[&[Some("בְּרֵאשִׁית בָּרָא אֱלֹהִים")]]);
        let usfm = render_book(BookHeader::new(slot(0), "בראשית"), &book);
        assert!(usfm.contains("\\h בראשית\n"));
        assert!(usfm.contains("\\v 1 בְּרֵאשִׁית בָּרָא אֱלֹהִים\n"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("kjv", slot(0)), "kjv_01_GEN.usfm");
        assert_eq!(file_name("kjv", slot(39)), "kjv_40_MAT.usfm");
        assert_eq!(file_name("my.bible", slot(65)), "my.bible_66_REV.usfm");
    }

    proptest! {
        #[test]
        fn prop_numbering_is_positional(
            shape in prop::collection::vec(0usize..20, 0..10),
        ) {
            let book = Book {
                chapters: shape
                    .iter()
                    .map(|&n| Chapter { verses: vec![Verse::empty(); n] })
                    .collect(),
            };
            let usfm = render_book(BookHeader::new(slot(0), ""), &book);
            let lines: Vec<&str> = usfm.lines().skip(3).collect();

            let mut expected = Vec::new();
            for (c, &n) in shape.iter().enumerate() {
                expected.push(format!("\\c {}", c + 1));
                for v in 0..n {
                    expected.push(format!("\\v {} ", v + 1));
                }
            }
            prop_assert_eq!(lines, expected);
        }
    }
}
