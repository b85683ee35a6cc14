// src/feed/encoding.rs

use crate::errors::{MitsError, Result};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

/// Decodes raw feed bytes into UTF-8 text.
///
/// A byte order mark wins; otherwise the `encoding="..."` of the XML
/// declaration is used, defaulting to UTF-8.
pub fn decode_feed(bytes: &[u8]) -> Result<String> {
    let (encoding, skip) = match Encoding::for_bom(bytes) {
        Some(found) => found,
        None => (declared_encoding(bytes)?.unwrap_or(UTF_8), 0),
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[skip..]);
    if had_errors {
        return Err(MitsError::Encoding(format!(
            "malformed byte sequence for {}",
            encoding.name()
        )));
    }

    Ok(text.into_owned())
}

/// Reads the encoding label from an XML declaration at the start of `bytes`.
fn declared_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>> {
    let Some(label) = declaration_label(bytes) else {
        return Ok(None);
    };

    let encoding = Encoding::for_label(label).ok_or_else(|| {
        MitsError::Encoding(format!(
            "unsupported encoding {}",
            String::from_utf8_lossy(label)
        ))
    })?;

    // A declaration readable as ASCII without a BOM cannot really be UTF-16.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Ok(Some(UTF_8));
    }

    Ok(Some(encoding))
}

fn declaration_label(bytes: &[u8]) -> Option<&[u8]> {
    let head = &bytes[..bytes.len().min(256)];
    if !head.starts_with(b"<?xml") {
        return None;
    }

    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = &head[..end];

    let at = decl.windows(8).position(|w| w == b"encoding")?;
    let rest = trim_ascii_start(&decl[at + 8..]);
    let rest = trim_ascii_start(rest.strip_prefix(b"=")?);

    let quote = *rest.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let value = &rest[1..];
    let close = value.iter().position(|&b| b == quote)?;
    Some(&value[..close])
}

fn trim_ascii_start(bytes: &[u8]) -> &[u8] {
    let skip = bytes
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    &bytes[skip..]
}
