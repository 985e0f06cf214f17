//! Helpers writing compiled gettext catalogs into a temporary locales directory.

use std::fs;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

pub const UK_HEADER: &str = "Content-Type: text/plain; charset=UTF-8\n\
Language: uk\n\
Plural-Forms: nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);\n";

/// Builds a `.mo` file. Plural entries use `"singular\0plural"` as msgid and NUL-separated forms.
pub fn build_mo<E: ByteOrder>(entries: &[(&str, &str)]) -> Vec<u8> {
    let n = entries.len() as u32;
    let originals = 28u32;
    let translations = originals + 8 * n;
    let mut data_offset = translations + 8 * n;

    let mut out = Vec::new();
    out.write_u32::<E>(0x950412de).unwrap();
    out.write_u32::<E>(0).unwrap();
    out.write_u32::<E>(n).unwrap();
    out.write_u32::<E>(originals).unwrap();
    out.write_u32::<E>(translations).unwrap();
    out.write_u32::<E>(0).unwrap();
    out.write_u32::<E>(0).unwrap();

    let mut data = Vec::new();
    let mut descriptors = |strings: Vec<&str>, out: &mut Vec<u8>| {
        for s in strings {
            out.write_u32::<E>(s.len() as u32).unwrap();
            out.write_u32::<E>(data_offset).unwrap();
            data.extend_from_slice(s.as_bytes());
            data.push(0);
            data_offset += s.len() as u32 + 1;
        }
    };
    descriptors(entries.iter().map(|(id, _)| *id).collect(), &mut out);
    descriptors(entries.iter().map(|(_, s)| *s).collect(), &mut out);

    out.extend_from_slice(&data);
    out
}

pub fn build_mo_le(entries: &[(&str, &str)]) -> Vec<u8> {
    build_mo::<LittleEndian>(entries)
}

pub fn build_mo_be(entries: &[(&str, &str)]) -> Vec<u8> {
    build_mo::<BigEndian>(entries)
}

/// Writes `<root>/<locale>/LC_MESSAGES/<domain>.mo`.
pub fn write_catalog(root: &Path, locale: &str, domain: &str, entries: &[(&str, &str)]) {
    let dir = root.join(locale).join("LC_MESSAGES");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{domain}.mo")), build_mo_le(entries)).unwrap();
}

/// A locales directory with `uk` (three plural forms, a context entry) and `de` catalogs,
/// plus a stray file that must be ignored.
pub fn sample_locales() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(
        dir.path(),
        "uk",
        "bot",
        &[
            ("", UK_HEADER),
            ("Hello", "Привіт"),
            ("apple\0apples", "яблуко\0яблука\0яблук"),
            ("menu\x04Open", "Відкрити меню"),
        ],
    );
    write_catalog(
        dir.path(),
        "de",
        "bot",
        &[
            ("", "Content-Type: text/plain; charset=UTF-8\nPlural-Forms: nplurals=2; plural=(n != 1);\n"),
            ("Hello", "Hallo"),
            ("apple\0apples", "Apfel\0Äpfel"),
        ],
    );
    fs::write(dir.path().join("README.txt"), "not a locale").unwrap();
    dir
}
