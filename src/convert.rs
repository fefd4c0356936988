//! Whole-document conversion: OSIS file in, one USFM file per book out.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::canon::{BookSlot, Resolver};
use crate::error::{Error, Result};
use crate::names::BookNames;
use crate::osis::{self, Bible, Book};
use crate::usfm::{self, BookHeader};

/// Conversion settings.
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// Display names for `\h` and `\toc2`.
    pub names: BookNames,
    /// Directory for output files. Defaults to the input's directory.
    pub out_dir: Option<PathBuf>,
}

impl ConvertConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(mut self, names: BookNames) -> Self {
        self.names = names;
        self
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }
}

/// Summary of one book, as reported by [`Converter::survey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    pub slot: BookSlot,
    pub name: String,
    pub chapters: usize,
    pub verses: usize,
}

/// Converts parsed documents to USFM files.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert the OSIS file at `input`, returning the paths written.
    ///
    /// Output files are named after the input with its extension removed,
    /// e.g. `bible.osis` → `bible_01_GEN.usfm`, ...
    pub fn convert_file(&self, input: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let input = input.as_ref();
        let base = base_name(input)?;
        let bible = osis::parse_file(input)?;

        let out_dir = match &self.config.out_dir {
            Some(dir) => dir.clone(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        self.write_bible(&bible, &out_dir, &base)
    }

    /// Write every book of `bible` into `out_dir` as `<base>_<NN>_<ID>.usfm`.
    ///
    /// Books are written one at a time. If a book cannot be written, or the
    /// document has more books than the canon, the files already written
    /// are left in place.
    pub fn write_bible(&self, bible: &Bible, out_dir: &Path, base: &str) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(bible.book_count());

        self.for_each_book(bible, |slot, name, book| {
            let path = out_dir.join(usfm::file_name(base, slot));
            write_book_file(&path, BookHeader::new(slot, name), book)?;
            info!(path = %path.display(), chapters = book.chapters.len(), "wrote {}", slot.id());
            written.push(path);
            Ok(())
        })?;

        debug!(books = written.len(), "conversion finished");
        Ok(written)
    }

    /// Describe each book without writing anything.
    pub fn survey(&self, bible: &Bible) -> Result<Vec<BookSummary>> {
        let mut summaries = Vec::with_capacity(bible.book_count());

        self.for_each_book(bible, |slot, name, book| {
            summaries.push(BookSummary {
                slot,
                name: name.to_string(),
                chapters: book.chapters.len(),
                verses: book.verse_count(),
            });
            Ok(())
        })?;

        Ok(summaries)
    }

    /// Visit books in document order with their resolved identifiers.
    ///
    /// The identifier is resolved before `visit` runs, so a book past the
    /// end of the canon fails without producing output.
    fn for_each_book<'b, F>(&self, bible: &'b Bible, mut visit: F) -> Result<()>
    where
        F: FnMut(BookSlot, &str, &'b Book) -> Result<()>,
    {
        let mut resolver = Resolver::new();
        for book in bible.books() {
            let slot = resolver.next_book()?;
            let name = self.config.names.display_name(slot.id());
            visit(slot, name, book)?;
        }
        Ok(())
    }
}

fn write_book_file(path: &Path, header: BookHeader<'_>, book: &Book) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    usfm::write_book(header, book, &mut writer).map_err(|e| Error::io(path, e))?;
    writer.flush().map_err(|e| Error::io(path, e))
}

/// Input file name without its final extension.
fn base_name(input: &Path) -> Result<String> {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Usage(format!("{} is not a file path", input.display())))
}

/// Convert `input` with optional book names, writing next to the input.
pub fn convert(input: impl AsRef<Path>, names: Option<&Path>) -> Result<Vec<PathBuf>> {
    let names = BookNames::load_optional(names)?;
    Converter::with_config(ConvertConfig::new().with_names(names)).convert_file(input)
}
