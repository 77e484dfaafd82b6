use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Destination for reconstructed dense rows.
pub trait RowSink {
    fn write_row(&mut self, row: &[CellValue]) -> Result<()>;
}

impl RowSink for Vec<Vec<CellValue>> {
    fn write_row(&mut self, row: &[CellValue]) -> Result<()> {
        self.push(row.to_vec());
        Ok(())
    }
}

/// CSV writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Terminate records with `\r\n` like the Excel dialect (default: true)
    pub crlf: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
            crlf: true,
        }
    }
}

impl CsvOptions {
    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Use a bare `\n` record terminator
    #[must_use]
    pub fn with_unix_newlines(mut self) -> Self {
        self.crlf = false;
        self
    }
}

/// Row sink writing comma separated records with minimal quoting.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) a CSV file
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), CsvOptions::default()))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W, options: CsvOptions) -> Self {
        let terminator = if options.crlf {
            csv::Terminator::CRLF
        } else {
            csv::Terminator::Any(b'\n')
        };
        let writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);
        Self { writer }
    }

    /// Write a record of plain strings, e.g. a header row
    pub fn write_strings<S: AsRef<str>>(&mut self, record: &[S]) -> Result<()> {
        self.writer
            .write_record(record.iter().map(|field| field.as_ref().as_bytes()))?;
        Ok(())
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| {
                let source = e.error();
                SheetError::Io(std::io::Error::new(source.kind(), source.to_string()))
            })
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, row: &[CellValue]) -> Result<()> {
        let record: Vec<String> = row.iter().map(CellValue::as_str).collect();
        self.writer.write_record(&record)?;
        Ok(())
    }
}

/// Render rows to a CSV string with default options
pub fn rows_to_csv_string(rows: &[Vec<CellValue>]) -> Result<String> {
    let mut sink = CsvSink::new(Vec::new(), CsvOptions::default());
    for row in rows {
        sink.write_row(row)?;
    }
    let buffer = sink.finish()?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
