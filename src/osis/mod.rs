//! In-memory model of the supported OSIS subset.
//!
//! The loader only understands a fixed, positional hierarchy:
//!
//! ```xml
//! <osis>
//!   <osisText>
//!     <header>... ignored ...</header>
//!     <div type="x-testament">
//!       <div type="book">
//!         <chapter>
//!           <verse>In the beginning...</verse>
//!         </chapter>
//!       </div>
//!     </div>
//!   </osisText>
//! </osis>
//! ```
//!
//! Element names and attributes are not interpreted. Each verse keeps only
//! the text that precedes its first child element.

mod reader;

pub use reader::{parse_bytes, parse_file, parse_str};
pub(crate) use reader::strip_bom;

/// A parsed document: testaments in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bible {
    pub testaments: Vec<Testament>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Testament {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chapter {
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verse {
    /// Leading direct text of the verse element, if any.
    pub text: Option<String>,
}

impl Bible {
    pub fn new() -> Self {
        Self::default()
    }

    /// All books in document order, testament-major.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.testaments.iter().flat_map(|t| t.books.iter())
    }

    pub fn book_count(&self) -> usize {
        self.testaments.iter().map(|t| t.books.len()).sum()
    }
}

impl Book {
    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|c| c.verses.len()).sum()
    }
}

impl Verse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The verse text, or `""` when there is none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
