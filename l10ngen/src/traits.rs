//! Traits at the two I/O seams of l10ngen: reading tabular sources and
//! writing generated artifacts.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use crate::error::Error;

/// A trait for decoding a tabular source from a reader.
///
/// # Example
///
/// ```rust,no_run
/// use l10ngen::{Table, traits::TableCodec};
/// let table = Table::read_from("translations.csv")?;
/// println!("{} rows", table.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TableCodec {
    /// Parse from any reader. The input is handed over as raw bytes so that
    /// a record which is not valid UTF-8 can be dropped on its own.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path, detecting a UTF-8 or UTF-16 byte order mark.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::source_unavailable(format!("cannot open {}", path.display()), Some(Box::new(e)))
        })?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .strip_bom(true)
            .build(file);

        Self::from_reader(BufReader::new(decoder))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

/// Destination for generated artifacts.
///
/// The generator hands every artifact to a sink only after all of them have
/// been rendered; a sink failure aborts the run.
pub trait Sink {
    /// Writes `content` under the relative `path`.
    fn write_text(&mut self, path: &str, content: &str) -> Result<(), Error>;
}
