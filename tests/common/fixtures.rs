//! Test fixtures: PNG files and configs in scratch directories.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RGBA pixel shorthand
pub type Rgba = [u8; 4];

pub const RED: Rgba = [255, 0, 0, 255];
pub const BLUE: Rgba = [0, 0, 255, 255];
pub const CLEAR: Rgba = [0, 0, 0, 0];

/// Scratch directory that lives as long as the fixture.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write an RGBA PNG and return its path
    pub fn png(&self, name: &str, width: u32, height: u32, pixels: &[Rgba]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, encode_rgba(width, height, pixels)).expect("Failed to write PNG");
        path
    }

    /// Write a config file and return its path
    pub fn config(&self, yaml: &str) -> PathBuf {
        let path = self.path("stitchgrid.yaml");
        std::fs::write(&path, yaml).expect("Failed to write config");
        path
    }
}

/// Encode pixels as an 8-bit RGBA PNG
pub fn encode_rgba(width: u32, height: u32, pixels: &[Rgba]) -> Vec<u8> {
    assert_eq!(pixels.len(), (width * height) as usize, "pixel count mismatch");
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("Failed to write PNG header");
        writer
            .write_image_data(&data)
            .expect("Failed to write PNG data");
    }
    buf.into_inner()
}

/// `width x height` image of one colour
pub fn solid(width: u32, height: u32, color: Rgba) -> Vec<Rgba> {
    vec![color; (width * height) as usize]
}

/// Left half `left`, right half `right`
pub fn split(width: u32, height: u32, left: Rgba, right: Rgba) -> Vec<Rgba> {
    (0..width * height)
        .map(|i| if i % width < width / 2 { left } else { right })
        .collect()
}

/// Read back a file written by the converter
pub fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("Failed to read output");
    serde_json::from_str(&text).expect("Output is not valid JSON")
}
