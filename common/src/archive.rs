//! リネーム済み画像のZIPパッケージ化（ブラウザ用）

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::naming::disambiguate;

/// (ファイル名, バイト列) をSTORE（無圧縮）でZIPにまとめる
///
/// 同名エントリは `disambiguate` で重複を避ける。`stamp` はその際の接尾辞。
/// 戻り値は (ZIPバイト列, 実際に使われたエントリ名)
pub fn build_zip<'a, I>(entries: I, stamp: u64) -> Result<(Vec<u8>, Vec<String>)>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mut used: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for (name, bytes) in entries {
        let entry_name = disambiguate(name, stamp, |n| used.contains(n));
        writer.start_file(entry_name.as_str(), options)?;
        writer.write_all(bytes)?;
        used.insert(entry_name.clone());
        names.push(entry_name);
    }

    let cursor = writer.finish()?;
    Ok((cursor.into_inner(), names))
}

/// ZIPファイル名: `renamed_images_YYYY-MM-DDTHH-MM-SS.zip`
///
/// # Arguments
/// * `iso_timestamp` - ISO 8601形式（例: `Date.prototype.toISOString()` の戻り値）
pub fn archive_name(iso_timestamp: &str) -> String {
    let stamp: String = iso_timestamp.chars().take(19).collect();
    format!("renamed_images_{}.zip", stamp.replace(':', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_archive_name() {
        let name = archive_name("2026-10-16T08:30:05.123Z");
        assert_eq!(name, "renamed_images_2026-10-16T08-30-05.zip");
    }

    #[test]
    fn test_build_zip_contains_entries() {
        let entries: Vec<(&str, &[u8])> = vec![
            ("red_sunset_over_mountains.png", b"png-bytes".as_slice()),
            ("blue_ocean_wave.jpg", b"jpg-bytes".as_slice()),
        ];
        let (bytes, names) = build_zip(entries, 1).unwrap();
        assert_eq!(names, vec!["red_sunset_over_mountains.png", "blue_ocean_wave.jpg"]);

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut file = archive.by_name("blue_ocean_wave.jpg").unwrap();
        assert_eq!(file.compression(), CompressionMethod::Stored);
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"jpg-bytes".as_slice());
    }

    #[test]
    fn test_build_zip_duplicate_names_do_not_overwrite() {
        let entries: Vec<(&str, &[u8])> = vec![
            ("cat.png", b"one".as_slice()),
            ("cat.png", b"two".as_slice()),
            ("cat.png", b"three".as_slice()),
        ];
        let (bytes, names) = build_zip(entries, 55).unwrap();
        assert_eq!(names, vec!["cat.png", "cat_55.png", "cat_55_1.png"]);

        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);
    }

    #[test]
    fn test_build_zip_empty() {
        let (bytes, names) = build_zip(Vec::<(&str, &[u8])>::new(), 0).unwrap();
        assert!(names.is_empty());
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
