use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::DocxError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    name: String,
    data: Vec<u8>,
    stored: bool,
    is_dir: bool,
}

/// The zip container of a DOCX file, held fully in memory. Part order and
/// per-part compression (stored or deflated) are kept on write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    parts: Vec<Part>,
}

impl Package {
    pub fn open(path: &Path) -> Result<Self, DocxError> {
        let file = File::open(path).map_err(|source| DocxError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, DocxError> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let mut data = Vec::new();
            entry.read_to_end(&mut data)?;
            parts.push(Part {
                name: entry.name().to_string(),
                stored: entry.compression() == CompressionMethod::Stored,
                is_dir: entry.is_dir(),
                data,
            });
        }
        Ok(Self { parts })
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|part| part.name == name && !part.is_dir)
            .map(|part| part.data.as_slice())
    }

    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|part| part.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(Part {
                name: name.to_string(),
                data,
                stored: false,
                is_dir: false,
            }),
        }
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|part| part.name.as_str())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for part in &self.parts {
            let method = if part.stored {
                CompressionMethod::Stored
            } else {
                CompressionMethod::Deflated
            };
            let options = SimpleFileOptions::default().compression_method(method);
            if part.is_dir {
                zip.add_directory(part.name.as_str(), options)?;
            } else {
                zip.start_file(part.name.as_str(), options)?;
                zip.write_all(&part.data)?;
            }
        }
        Ok(zip.finish()?.into_inner())
    }
}
