//! GNU gettext `.mo` catalogs.
//!
//! Layout (all integers 32-bit, byte order given by the magic number):
//!
//! | offset | field                                   |
//! |--------|-----------------------------------------|
//! | 0      | magic `0x950412de`                      |
//! | 4      | revision (major in the high 16 bits)    |
//! | 8      | number of strings `N`                   |
//! | 12     | offset of the original strings table   |
//! | 16     | offset of the translated strings table |
//!
//! Each table holds `N` `(length, offset)` pairs. Plural entries keep the forms NUL-separated
//! (`msgid\0msgid_plural` / `form0\0form1...`); entries with a context are keyed
//! `msgctxt\x04msgid`. The entry with the empty msgid holds the `Key: value` headers.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::debug;

use crate::error::{I18nError, Result};
use crate::plural::PluralRule;

const MAGIC: u32 = 0x950412de;
const CONTEXT_SEPARATOR: char = '\x04';

#[derive(Debug, Clone)]
struct Entry {
    /// Translated forms; a single element for non-plural messages.
    forms: Vec<String>,
    plural: bool,
}

/// A parsed translation catalog for one locale and domain.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, Entry>,
    headers: HashMap<String, String>,
    plural: PluralRule,
}

impl Catalog {
    /// Reads and parses a `.mo` file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes).map_err(|e| match e {
            I18nError::InvalidCatalog { message, .. } => I18nError::InvalidCatalog {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Parses the contents of a `.mo` file.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        if buf.len() < 20 {
            return Err(I18nError::catalog("file too short"));
        }
        if LittleEndian::read_u32(buf) == MAGIC {
            Self::parse::<LittleEndian>(buf)
        } else if BigEndian::read_u32(buf) == MAGIC {
            Self::parse::<BigEndian>(buf)
        } else {
            Err(I18nError::catalog("bad magic number"))
        }
    }

    fn parse<E: ByteOrder>(buf: &[u8]) -> Result<Self> {
        let revision = E::read_u32(&buf[4..]);
        let major = revision >> 16;
        if major > 1 {
            return Err(I18nError::catalog(format!(
                "unsupported major revision {major}"
            )));
        }

        let count = E::read_u32(&buf[8..]) as usize;
        let originals = E::read_u32(&buf[12..]) as usize;
        let translations = E::read_u32(&buf[16..]) as usize;

        let mut catalog = Catalog::default();
        for i in 0..count {
            let msgid = read_string::<E>(buf, originals + i * 8)?;
            let msgstr = read_string::<E>(buf, translations + i * 8)?;

            if msgid.is_empty() {
                catalog.parse_headers(&msgstr)?;
                continue;
            }

            let (key, plural) = match msgid.split_once('\0') {
                Some((singular, _plural)) => (singular.to_string(), true),
                None => (msgid, false),
            };
            let forms = msgstr.split('\0').map(str::to_string).collect();
            catalog.entries.insert(key, Entry { forms, plural });
        }

        debug!(
            entries = catalog.entries.len(),
            nplurals = catalog.plural.nplurals(),
            "catalog parsed"
        );
        Ok(catalog)
    }

    fn parse_headers(&mut self, raw: &str) -> Result<()> {
        for line in raw.lines() {
            if let Some((key, value)) = line.split_once(':') {
                self.headers
                    .insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
            }
        }
        if let Some(forms) = self.headers.get("plural-forms") {
            self.plural = PluralRule::from_header(forms)?;
        }
        Ok(())
    }

    /// Number of translated messages (headers excluded).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Header value by case-insensitive name, e.g. `Language` or `Plural-Forms`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn plural_rule(&self) -> &PluralRule {
        &self.plural
    }

    /// Translation of `msgid`, or `msgid` itself when missing. For a plural entry the first form
    /// is returned.
    pub fn gettext<'a>(&'a self, msgid: &'a str) -> &'a str {
        self.entries
            .get(msgid)
            .and_then(|e| e.forms.first())
            .map(String::as_str)
            .unwrap_or(msgid)
    }

    /// Plural-aware translation. Falls back to `singular` when `n == 1` and to `plural` otherwise
    /// when the entry is missing, has no plural forms, or the rule selects a form the catalog
    /// does not have.
    pub fn ngettext<'a>(&'a self, singular: &'a str, plural: &'a str, n: u64) -> &'a str {
        self.lookup_plural(singular, n)
            .unwrap_or(if n == 1 { singular } else { plural })
    }

    /// Translation of `msgid` within `context`.
    pub fn pgettext<'a>(&'a self, context: &str, msgid: &'a str) -> &'a str {
        let key = context_key(context, msgid);
        self.entries
            .get(&key)
            .and_then(|e| e.forms.first())
            .map(String::as_str)
            .unwrap_or(msgid)
    }

    /// Plural-aware translation within `context`.
    pub fn npgettext<'a>(
        &'a self,
        context: &str,
        singular: &'a str,
        plural: &'a str,
        n: u64,
    ) -> &'a str {
        let key = context_key(context, singular);
        self.lookup_plural(&key, n)
            .unwrap_or(if n == 1 { singular } else { plural })
    }

    fn lookup_plural(&self, key: &str, n: u64) -> Option<&str> {
        let entry = self.entries.get(key).filter(|e| e.plural)?;
        entry.forms.get(self.plural.select(n)).map(String::as_str)
    }
}

fn context_key(context: &str, msgid: &str) -> String {
    format!("{context}{CONTEXT_SEPARATOR}{msgid}")
}

/// Reads the `(length, offset)` descriptor at `at` and returns the UTF-8 string it points to.
fn read_string<E: ByteOrder>(buf: &[u8], at: usize) -> Result<String> {
    let descriptor = buf
        .get(at..at + 8)
        .ok_or_else(|| I18nError::catalog(format!("string table entry at {at} out of bounds")))?;
    let len = E::read_u32(descriptor) as usize;
    let offset = E::read_u32(&descriptor[4..]) as usize;
    let bytes = offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or_else(|| I18nError::catalog(format!("string at {offset} (+{len}) out of bounds")))?;
    String::from_utf8(bytes.to_vec())
        .map_err(|e| I18nError::catalog(format!("string at {offset} is not UTF-8: {e}")))
}
