//! JSON emission for inventory documents
//!
//! Ansible reads whatever the script prints on stdout, so documents are
//! written as 4-space indented JSON followed by a newline.

use serde::Serialize;
use std::io::{self, Write};

const INDENT: &[u8] = b"    ";

/// Write `value` as 4-space indented JSON plus a trailing newline
pub fn write_pretty_json<W: Write, T: Serialize + ?Sized>(
    mut writer: W,
    value: &T,
) -> io::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut serializer).map_err(io::Error::from)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
