//! CSV record reader for Zotero exports.
//!
//! The export is a UTF-8 CSV (sometimes with a byte-order mark) whose first
//! line names the columns. Columns are located by name once, when the
//! header is read; rows are then projected into [`SourceRecord`]s without
//! any further string-keyed lookups.

use std::io::Read;

use anyhow::Context;
use csv::{StringRecord, StringRecordsIntoIter};

/// One input row, with every field the conversion consumes.
///
/// Cells are kept verbatim; an absent or empty cell is the empty string.
#[derive(Debug, Default, Clone)]
pub struct SourceRecord {
    pub item_type: String,
    pub title: String,
    pub abstract_note: String,
    pub author: String,
    pub editor: String,
    pub reviewed_author: String,
    pub date: String,
    pub publication_title: String,
    pub volume: String,
    pub issue: String,
    pub pages: String,
    pub doi: String,
    pub url: String,
    pub publisher: String,
    pub place: String,
    pub extra: String,
    pub key: String,
}

/// Column positions resolved from the header row.
#[derive(Debug)]
struct Columns {
    item_type: usize,
    title: usize,
    abstract_note: usize,
    author: usize,
    editor: usize,
    reviewed_author: usize,
    date: usize,
    publication_title: usize,
    volume: usize,
    issue: usize,
    pages: usize,
    doi: usize,
    url: usize,
    publisher: usize,
    place: usize,
    extra: usize,
    key: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> anyhow::Result<Self> {
        // Zotero writes a UTF-8 BOM; strip it in case the CSV layer left it
        // attached to the first header name.
        let names: Vec<&str> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if i == 0 {
                    name.trim_start_matches('\u{feff}')
                } else {
                    name
                }
            })
            .collect();
        let locate = |wanted: &str| -> anyhow::Result<usize> {
            names
                .iter()
                .position(|name| *name == wanted)
                .with_context(|| format!("missing required column {wanted:?}"))
        };
        Ok(Columns {
            item_type: locate("Item Type")?,
            title: locate("Title")?,
            abstract_note: locate("Abstract Note")?,
            author: locate("Author")?,
            editor: locate("Editor")?,
            reviewed_author: locate("Reviewed Author")?,
            date: locate("Date")?,
            publication_title: locate("Publication Title")?,
            volume: locate("Volume")?,
            issue: locate("Issue")?,
            pages: locate("Pages")?,
            doi: locate("DOI")?,
            url: locate("Url")?,
            publisher: locate("Publisher")?,
            place: locate("Place")?,
            extra: locate("Extra")?,
            key: locate("Key")?,
        })
    }
}

impl SourceRecord {
    fn from_row(columns: &Columns, row: &StringRecord) -> Self {
        let cell = |i: usize| row.get(i).unwrap_or_default().to_string();
        SourceRecord {
            item_type: cell(columns.item_type),
            title: cell(columns.title),
            abstract_note: cell(columns.abstract_note),
            author: cell(columns.author),
            editor: cell(columns.editor),
            reviewed_author: cell(columns.reviewed_author),
            date: cell(columns.date),
            publication_title: cell(columns.publication_title),
            volume: cell(columns.volume),
            issue: cell(columns.issue),
            pages: cell(columns.pages),
            doi: cell(columns.doi),
            url: cell(columns.url),
            publisher: cell(columns.publisher),
            place: cell(columns.place),
            extra: cell(columns.extra),
            key: cell(columns.key),
        }
    }
}

/// Lazy iterator over the records of one Zotero CSV export.
///
/// Rows whose "Item Type" cell is empty are separator rows in the export
/// and are skipped. A row whose column count disagrees with the header
/// surfaces as an error from the CSV layer and aborts the run.
pub struct CsvSource<R: Read> {
    rows: StringRecordsIntoIter<R>,
    columns: Columns,
}

impl<R: Read> std::fmt::Debug for CsvSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSource")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl<R: Read> CsvSource<R> {
    pub fn new(reader: R) -> anyhow::Result<Self> {
        let mut csv = csv::ReaderBuilder::new().from_reader(reader);
        let columns = Columns::from_headers(csv.headers().context("reading CSV header")?)?;
        Ok(CsvSource {
            rows: csv.into_records(),
            columns,
        })
    }
}

impl<R: Read> Iterator for CsvSource<R> {
    type Item = anyhow::Result<SourceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let row = match self.rows.next()? {
                Ok(row) => row,
                Err(err) => return Some(Err(err.into())),
            };
            let record = SourceRecord::from_row(&self.columns, &row);
            if record.item_type.is_empty() {
                continue;
            }
            return Some(Ok(record));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Key,Item Type,Publication Year,Author,Title,Abstract Note,Editor,\
Reviewed Author,Date,Publication Title,Volume,Issue,Pages,DOI,Url,Publisher,Place,Extra";

    fn row(item_type: &str, title: &str) -> String {
        format!("K1,{item_type},2020,,{title},,,,2020,,,,,,,,,")
    }

    #[test]
    fn reads_rows_keyed_by_header_names() {
        let input = format!("{HEADER}\n{}", row("journalArticle", "Some Title"));
        let records: Vec<_> = CsvSource::new(input.as_bytes())
            .expect("header")
            .collect::<anyhow::Result<_>>()
            .expect("rows");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item_type, "journalArticle");
        assert_eq!(records[0].title, "Some Title");
        assert_eq!(records[0].key, "K1");
        assert_eq!(records[0].date, "2020");
    }

    #[test]
    fn skips_rows_with_empty_item_type() {
        let input = format!(
            "{HEADER}\n{}\n{}",
            row("", "Separator"),
            row("book", "Kept")
        );
        let records: Vec<_> = CsvSource::new(input.as_bytes())
            .expect("header")
            .collect::<anyhow::Result<_>>()
            .expect("rows");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Kept");
    }

    #[test]
    fn strips_a_leading_byte_order_mark() {
        let input = format!("\u{feff}{HEADER}\n{}", row("book", "T"));
        let source = CsvSource::new(input.as_bytes()).expect("BOM header should resolve");
        assert_eq!(source.count(), 1);
    }

    #[test]
    fn missing_required_column_fails_at_header_time() {
        let err = CsvSource::new("Key,Item Type,Title\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing required column"));
    }

    #[test]
    fn ragged_row_is_fatal() {
        let input = format!("{HEADER}\nK1,book,2020");
        let rows: Vec<_> = CsvSource::new(input.as_bytes()).expect("header").collect();
        assert!(rows.iter().any(|r| r.is_err()));
    }

    #[test]
    fn quoted_cells_keep_embedded_separators() {
        let input = format!(
            "{HEADER}\nK1,book,2020,\"Smith, Jane; Doe, John\",T,,,,2020,,,,,,,,,"
        );
        let records: Vec<_> = CsvSource::new(input.as_bytes())
            .expect("header")
            .collect::<anyhow::Result<_>>()
            .expect("rows");
        assert_eq!(records[0].author, "Smith, Jane; Doe, John");
    }
}
