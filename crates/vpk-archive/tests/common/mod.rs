//! Builds small VPK fixtures on disk for the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const INLINE: u16 = 0x7FFF;

/// The 13-byte v1 archive with an empty tree.
pub const EMPTY_V1: &[u8] = b"\x34\x12\xaa\x55\x01\x00\x00\x00\x01\x00\x00\x00\x00";

/// SHA-1 of [`EMPTY_V1`].
pub const EMPTY_V1_SHA1: &str = "a34836ea5bb99b17081fbd4fb962cf37bc63d822";

/// One file to place in a fixture archive.
#[derive(Debug, Clone)]
pub struct FixtureFile {
    pub extension: String,
    pub path: String,
    pub filename: String,
    pub preload: Vec<u8>,
    pub data: Vec<u8>,
    pub archive_index: u16,
}

impl FixtureFile {
    pub fn new(extension: &str, path: &str, filename: &str, content: &[u8]) -> Self {
        Self {
            extension: extension.into(),
            path: path.into(),
            filename: filename.into(),
            preload: Vec::new(),
            data: content.to_vec(),
            archive_index: INLINE,
        }
    }

    /// Move the first `count` bytes of the content into the preload.
    pub fn preload(mut self, count: usize) -> Self {
        let rest = self.data.split_off(count);
        self.preload = std::mem::replace(&mut self.data, rest);
        self
    }

    pub fn in_part(mut self, index: u16) -> Self {
        self.archive_index = index;
        self
    }

    pub fn content(&self) -> Vec<u8> {
        [self.preload.as_slice(), self.data.as_slice()].concat()
    }
}

/// Encoded directory file plus archive part contents.
#[derive(Debug, Default)]
pub struct Fixture {
    pub dir: Vec<u8>,
    pub parts: BTreeMap<u16, Vec<u8>>,
}

impl Fixture {
    pub fn build(version: u32, files: &[FixtureFile]) -> Self {
        let mut grouped: BTreeMap<&str, BTreeMap<&str, Vec<&FixtureFile>>> = BTreeMap::new();
        for file in files {
            grouped
                .entry(file.extension.as_str())
                .or_default()
                .entry(file.path.as_str())
                .or_default()
                .push(file);
        }

        let mut tree = Vec::new();
        let mut inline = Vec::new();
        let mut parts: BTreeMap<u16, Vec<u8>> = BTreeMap::new();

        for (extension, paths) in &grouped {
            cstr(&mut tree, extension);
            for (path, files) in paths {
                cstr(&mut tree, path);
                for file in files {
                    let sink = if file.archive_index == INLINE {
                        &mut inline
                    } else {
                        parts.entry(file.archive_index).or_default()
                    };
                    let offset = sink.len() as u32;
                    sink.extend_from_slice(&file.data);

                    cstr(&mut tree, &file.filename);
                    tree.extend_from_slice(&0u32.to_le_bytes());
                    tree.extend_from_slice(&(file.preload.len() as u16).to_le_bytes());
                    tree.extend_from_slice(&file.archive_index.to_le_bytes());
                    tree.extend_from_slice(&offset.to_le_bytes());
                    tree.extend_from_slice(&(file.data.len() as u32).to_le_bytes());
                    tree.extend_from_slice(&0xFFFFu16.to_le_bytes());
                    tree.extend_from_slice(&file.preload);
                }
                cstr(&mut tree, "");
            }
            cstr(&mut tree, "");
        }
        cstr(&mut tree, "");

        let mut dir = Vec::new();
        dir.extend_from_slice(&0x55AA_1234u32.to_le_bytes());
        dir.extend_from_slice(&version.to_le_bytes());
        dir.extend_from_slice(&(tree.len() as u32).to_le_bytes());
        if version == 2 {
            dir.extend_from_slice(&[0u8; 16]);
        }
        dir.extend_from_slice(&tree);
        dir.extend_from_slice(&inline);

        Self { dir, parts }
    }

    /// Write the directory file as `<stem>_dir.vpk` plus its parts.
    pub fn write(&self, root: &Path, stem: &str) -> PathBuf {
        for (index, data) in &self.parts {
            fs::write(root.join(format!("{stem}_{index:03}.vpk")), data).unwrap();
        }
        let dir_path = root.join(format!("{stem}_dir.vpk"));
        fs::write(&dir_path, &self.dir).unwrap();
        dir_path
    }
}

fn cstr(data: &mut Vec<u8>, s: &str) {
    data.extend_from_slice(s.as_bytes());
    data.push(0);
}

pub fn sha1_hex(data: &[u8]) -> String {
    use sha1::{Digest, Sha1};
    hex::encode(Sha1::digest(data))
}
