//! gettext `.po` catalogs, read and written through `rspolib`.
//!
//! [`Parser`] is implemented for [`POFile`] so catalogs load with the same
//! BOM-aware decoding as the other formats. CRLF line endings are folded to
//! LF before the text reaches the PO parser.

use std::io::{BufRead, Write};

use rspolib::{POFile, pofile};

use crate::{error::Error, traits::Parser};

impl Parser for POFile {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let text = text.replace("\r\n", "\n");
        pofile(text.as_str()).map_err(|e| Error::Po(e.to_string()))
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        writer
            .write_all(self.to_string().as_bytes())
            .map_err(Error::Io)
    }
}
