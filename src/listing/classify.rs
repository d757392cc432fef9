//! Object name classification

use std::fmt;

use crate::error::{Error, Result};

/// Kind of sequencing file an object name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Cram,
    Crai,
    Other,
}

impl FileKind {
    fn from_extension(ext: &str) -> Self {
        match ext {
            "cram" => FileKind::Cram,
            "crai" => FileKind::Crai,
            _ => FileKind::Other,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Cram => write!(f, "cram"),
            FileKind::Crai => write!(f, "crai"),
            FileKind::Other => write!(f, "other"),
        }
    }
}

/// A classified object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified<'a> {
    pub sample: &'a str,
    pub kind: FileKind,
}

/// Split a bare file name into sample id and file kind.
///
/// `S.cram` and `S.crai` use the extension directly. `S.cram.crai` is an
/// index named after its CRAM; the final segment decides the kind and the
/// middle one is ignored. Any other number of segments is an error.
pub fn classify(filename: &str) -> Result<Classified<'_>> {
    let parts: Vec<&str> = filename.split('.').collect();
    let (sample, ext) = match parts.as_slice() {
        [sample, ext] => (*sample, *ext),
        [sample, _, ext] => (*sample, *ext),
        _ => {
            return Err(Error::Parse {
                filename: filename.to_string(),
            })
        }
    };

    if sample.is_empty() {
        return Err(Error::Parse {
            filename: filename.to_string(),
        });
    }

    Ok(Classified {
        sample,
        kind: FileKind::from_extension(ext),
    })
}

/// The final `/`-separated segment of an object key.
pub fn file_name(key: &str) -> &str {
    key.rsplit_once('/').map_or(key, |(_, name)| name)
}
