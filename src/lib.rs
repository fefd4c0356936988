//! # osis2usfm
//!
//! Converts a Bible in a minimal OSIS XML subset into one USFM file per book.
//!
//! The input is read positionally: the root's first child holds a header
//! followed by testaments, which hold books, chapters and verses. Books are
//! identified by their order in the document against the fixed 66-book
//! canon ([`canon::BOOK_IDS`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! // Writes kjv_01_GEN.usfm, kjv_02_EXO.usfm, ... next to the input.
//! let written = osis2usfm::convert("kjv.osis", Some(Path::new("booknames.txt")))?;
//! println!("{} books", written.len());
//! # Ok::<(), osis2usfm::Error>(())
//! ```
//!
//! ## Rendering in memory
//!
//! ```
//! use osis2usfm::canon::BookSlot;
//! use osis2usfm::usfm::{render_book, BookHeader};
//!
//! let bible = osis2usfm::parse_str(
//!     "<osis><osisText><header/><div><div><chapter>\
//!      <verse>In the beginning</verse></chapter></div></div></osisText></osis>",
//! )?;
//! let book = &bible.testaments[0].books[0];
//! let usfm = render_book(BookHeader::new(BookSlot::resolve(0)?, "Genesis"), book);
//! assert_eq!(usfm, "\\id GEN\n\\h Genesis\n\\toc2 Genesis\n\\c 1\n\\v 1 In the beginning\n");
//! # Ok::<(), osis2usfm::Error>(())
//! ```

pub mod canon;
pub mod convert;
mod error;
pub mod names;
pub mod osis;
pub mod usfm;

pub use convert::{BookSummary, ConvertConfig, Converter, convert};
pub use error::{Error, ParseError, Result};
pub use names::BookNames;
pub use osis::{Bible, parse_file, parse_str};
