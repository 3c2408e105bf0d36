//! Traits for format-agnostic parsing and serialization in langtool.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Read, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing and writing one localization file.
///
/// # Example
///
/// ```rust,no_run
/// use langtool::{POFile, traits::Parser};
/// let catalog = POFile::read_from("lang/de/tips.po")?;
/// catalog.write_to("lang/de/tips_copy.po")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    ///
    /// The file is decoded with BOM sniffing, so UTF-16 files (as exported by
    /// some vendor tools) are read the same way as UTF-8 ones.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let decoded = read_text(path)?;
        Self::from_reader(BufReader::new(Cursor::new(decoded)))
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Serialize to an in-memory string.
    fn write_to_string(&self) -> Result<String, Error> {
        let mut buffer = Vec::new();
        self.to_writer(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Reads a whole file as text, honoring a UTF-8 or UTF-16 byte order mark.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let file = File::open(path).map_err(Error::Io)?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
    Ok(decoded)
}
