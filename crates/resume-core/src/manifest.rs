//! Манифест эталонных данных (JSONL)
//!
//! Одна строка - один сгенерированный файл, в порядке генерации.

use crate::variation::{Difficulty, Variation};
use crate::GeneratorError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Запись манифеста
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Путь к документу в хранилище: `prefix/filename`
    pub input_pdf: String,
    /// Текст, который должен быть извлечён
    pub target: String,
    pub variation: Variation,
    pub difficulty: Difficulty,
}

/// Путь в хранилище для файла
pub fn storage_uri(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", prefix, file_name)
    }
}

/// Построчная запись манифеста
pub struct ManifestWriter<W: Write> {
    inner: W,
    path: Option<PathBuf>,
    written: usize,
}

impl ManifestWriter<BufWriter<File>> {
    /// Создание файла манифеста (родительские каталоги создаются)
    pub fn create(path: &Path) -> Result<Self, GeneratorError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| GeneratorError::OutputDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = File::create(path).map_err(|source| GeneratorError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            inner: BufWriter::new(file),
            path: Some(path.to_path_buf()),
            written: 0,
        })
    }
}

impl<W: Write> ManifestWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            path: None,
            written: 0,
        }
    }

    /// Добавление записи; non-ASCII пишется как есть
    pub fn append(&mut self, record: &ManifestRecord) -> Result<(), GeneratorError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.inner.write_all(&line).map_err(|e| self.io_error(e))?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Сброс буфера; возвращает число записанных строк
    pub fn finish(mut self) -> Result<usize, GeneratorError> {
        self.inner.flush().map_err(|e| self.io_error(e))?;
        Ok(self.written)
    }

    fn io_error(&self, source: std::io::Error) -> GeneratorError {
        match &self.path {
            Some(path) => GeneratorError::Write {
                path: path.clone(),
                source,
            },
            None => GeneratorError::Io(source),
        }
    }
}

/// Чтение манифеста; пустые строки пропускаются
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestRecord>, GeneratorError> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ManifestRecord {
        ManifestRecord {
            input_pdf: "gs://bucket/resumes/resume_001_noisy.pdf".to_string(),
            target: "氏名: 山田太郎\n生年月日: 1990年1月1日\n住所: 東京都渋谷区1-2-3".to_string(),
            variation: Variation::Noisy,
            difficulty: Difficulty::Hard,
        }
    }

    #[test]
    fn test_line_format() {
        let mut writer = ManifestWriter::new(Vec::new());
        writer.append(&sample_record()).unwrap();
        assert_eq!(writer.written(), 1);
        let bytes = writer.inner;

        let text = String::from_utf8(bytes).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
        // unescaped UTF-8, newline inside target stays escaped
        assert!(text.contains("山田太郎"));
        assert!(text.contains("\\n生年月日"));
        assert!(text.contains("\"variation\":\"noisy\""));
        assert!(text.contains("\"difficulty\":\"hard\""));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dataset.jsonl");

        let mut writer = ManifestWriter::create(&path).unwrap();
        writer.append(&sample_record()).unwrap();
        writer.append(&sample_record()).unwrap();
        assert_eq!(writer.finish().unwrap(), 2);

        let records = read_manifest(&path).unwrap();
        assert_eq!(records, vec![sample_record(), sample_record()]);
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_append_failure_reports_manifest_path() {
        let mut writer = ManifestWriter {
            inner: FullDisk,
            path: Some(PathBuf::from("outputs/dataset.jsonl")),
            written: 0,
        };

        match writer.append(&sample_record()) {
            Err(GeneratorError::Write { path, .. }) => {
                assert_eq!(path, PathBuf::from("outputs/dataset.jsonl"));
            }
            Err(e) => panic!("unexpected error: {}", e),
            Ok(()) => panic!("append should fail"),
        }
        assert_eq!(writer.written(), 0);
    }

    #[test]
    fn test_storage_uri() {
        assert_eq!(storage_uri("gs://b/resumes", "a.pdf"), "gs://b/resumes/a.pdf");
        assert_eq!(storage_uri("gs://b/resumes/", "a.pdf"), "gs://b/resumes/a.pdf");
        assert_eq!(storage_uri("", "a.pdf"), "a.pdf");
    }
}
