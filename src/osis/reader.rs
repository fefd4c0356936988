//! OSIS document loading with quick-xml.
//!
//! The reader is a single pass over the event stream. Every open element is
//! classified by its position relative to its parent ([`Slot`]), which is all
//! the structure the supported subset carries.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, warn};

use super::{Bible, Book, Chapter, Testament, Verse};
use crate::error::{Error, ParseError, Result};

/// Load and parse an OSIS file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Bible> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::parse(path, e))?;
    parse_document(&bytes, path)
}

/// Parse an OSIS document held in memory.
pub fn parse_bytes(bytes: &[u8]) -> Result<Bible> {
    parse_document(bytes, Path::new("<memory>"))
}

pub fn parse_str(xml: &str) -> Result<Bible> {
    parse_bytes(xml.as_bytes())
}

/// Strip UTF-8 BOM if present.
pub(crate) fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

fn parse_document(bytes: &[u8], path: &Path) -> Result<Bible> {
    let xml = std::str::from_utf8(strip_bom(bytes)).map_err(|e| Error::parse(path, e))?;
    let xml = normalize_line_endings(xml);

    let builder = TreeBuilder::default();
    let builder = builder.run(&xml).map_err(|e| Error::parse(path, e))?;

    builder.finish().map_err(|message| Error::Structure {
        path: path.to_path_buf(),
        message,
    })
}

/// XML processors see `\r\n` and lone `\r` as `\n`.
fn normalize_line_endings(xml: &str) -> Cow<'_, str> {
    if xml.contains('\r') {
        Cow::Owned(xml.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(xml)
    }
}

/// Role of an open element, derived from its parent's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Root,
    Container,
    Header,
    Testament,
    Book,
    Chapter,
    Verse,
    Ignored,
}

#[derive(Debug, Default)]
struct TreeBuilder {
    bible: Bible,
    stack: Vec<Slot>,
    root_seen: bool,
    root_children: usize,
    container_children: usize,
    /// Still collecting the current verse's leading text.
    verse_open: bool,
}

impl TreeBuilder {
    fn run(mut self, xml: &str) -> std::result::Result<Self, ParseError> {
        let mut reader = Reader::from_str(xml);

        loop {
            let event = reader.read_event().map_err(|source| ParseError::Xml {
                position: reader.error_position(),
                source,
            })?;

            match event {
                Event::Start(_) => {
                    let slot = self.open(reader.buffer_position())?;
                    self.stack.push(slot);
                }
                Event::Empty(_) => {
                    let slot = self.open(reader.buffer_position())?;
                    self.close(slot);
                }
                Event::End(_) => {
                    let Some(slot) = self.stack.pop() else {
                        return Err(ParseError::Malformed {
                            position: reader.buffer_position(),
                            message: "end tag without matching start tag",
                        });
                    };
                    self.close(slot);
                }
                Event::Text(e) => {
                    self.text(&String::from_utf8_lossy(e.as_ref()), reader.buffer_position())?;
                }
                Event::CData(e) => {
                    self.text(&String::from_utf8_lossy(&e), reader.buffer_position())?;
                }
                // Only the predefined and character references resolve;
                // entities declared in a DOCTYPE internal subset are rejected.
                Event::GeneralRef(e) => {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    let Some(resolved) = resolve_entity(&entity) else {
                        return Err(ParseError::Malformed {
                            position: reader.buffer_position(),
                            message: "undefined entity reference",
                        });
                    };
                    self.text(&resolved, reader.buffer_position())?;
                }
                Event::Eof => break,
                // Comments, processing instructions and declarations carry no
                // structure and do not interrupt verse text.
                _ => {}
            }
        }

        if !self.stack.is_empty() {
            return Err(ParseError::Malformed {
                position: reader.buffer_position(),
                message: "unexpected end of document inside an element",
            });
        }
        if !self.root_seen {
            return Err(ParseError::Malformed {
                position: reader.buffer_position(),
                message: "no root element",
            });
        }

        Ok(self)
    }

    fn open(&mut self, position: u64) -> std::result::Result<Slot, ParseError> {
        let slot = match self.stack.last().copied() {
            None => {
                if self.root_seen {
                    return Err(ParseError::Malformed {
                        position,
                        message: "junk after document element",
                    });
                }
                self.root_seen = true;
                Slot::Root
            }
            Some(Slot::Root) => {
                self.root_children += 1;
                if self.root_children == 1 {
                    Slot::Container
                } else {
                    Slot::Ignored
                }
            }
            Some(Slot::Container) => {
                self.container_children += 1;
                if self.container_children == 1 {
                    Slot::Header
                } else {
                    self.bible.testaments.push(Testament::default());
                    Slot::Testament
                }
            }
            Some(Slot::Testament) => {
                if let Some(testament) = self.bible.testaments.last_mut() {
                    testament.books.push(Book::default());
                }
                Slot::Book
            }
            Some(Slot::Book) => {
                if let Some(book) = self.current_book() {
                    book.chapters.push(Chapter::default());
                }
                Slot::Chapter
            }
            Some(Slot::Chapter) => {
                if let Some(chapter) = self.current_chapter() {
                    chapter.verses.push(Verse::default());
                }
                self.verse_open = true;
                Slot::Verse
            }
            Some(Slot::Verse) => {
                // The first child element ends the verse's leading text.
                self.verse_open = false;
                Slot::Ignored
            }
            Some(Slot::Header | Slot::Ignored) => Slot::Ignored,
        };
        Ok(slot)
    }

    fn close(&mut self, slot: Slot) {
        if slot == Slot::Verse {
            self.verse_open = false;
        }
    }

    fn text(&mut self, text: &str, position: u64) -> std::result::Result<(), ParseError> {
        if text.is_empty() {
            return Ok(());
        }

        if self.stack.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(ParseError::Malformed {
                position,
                message: "text outside the document element",
            });
        }

        if self.verse_open
            && let Some(verse) = self.current_verse()
        {
            verse.text.get_or_insert_with(String::new).push_str(text);
        }
        Ok(())
    }

    fn current_book(&mut self) -> Option<&mut Book> {
        self.bible.testaments.last_mut()?.books.last_mut()
    }

    fn current_chapter(&mut self) -> Option<&mut Chapter> {
        self.current_book()?.chapters.last_mut()
    }

    fn current_verse(&mut self) -> Option<&mut Verse> {
        self.current_chapter()?.verses.last_mut()
    }

    fn finish(self) -> std::result::Result<Bible, String> {
        if self.root_children == 0 {
            return Err("root element has no text container".to_string());
        }
        if self.root_children > 1 {
            warn!(
                extra = self.root_children - 1,
                "root element has more than one child; only the first is converted"
            );
        }
        if self.container_children < 2 {
            return Err("text container has no testament after the header".to_string());
        }

        debug!(
            testaments = self.bible.testaments.len(),
            books = self.bible.book_count(),
            "parsed document"
        );
        Ok(self.bible)
    }
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| c.to_string())
}
