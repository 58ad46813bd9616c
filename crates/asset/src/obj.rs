//! Lenient OBJ parser: `v`, `vn`, `vt` and triangle/quad `f` lines into flat arrays.
//!
//! Nothing here fails on content. Short or malformed lines are skipped, faces
//! that are neither triangles nor quads are skipped with a warning, and only
//! I/O errors are reported as errors.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::mesh::ObjMesh;

/// Something the parser skipped. The line number is 1-based.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ObjWarning {
    #[error("Face with unsupported number of vertices: {count} (line {line})")]
    UnsupportedFace { line: usize, count: usize },
    #[error("Malformed number '{token}' on line {line}")]
    MalformedNumber { line: usize, token: String },
    #[error("Invalid vertex reference '{token}' on line {line}")]
    InvalidIndex { line: usize, token: String },
}

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<ObjMesh> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open OBJ file: {}", path.as_ref().display()))?;
    load_obj_from_reader(BufReader::new(file))
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<ObjMesh> {
    let mut parser = ObjParser::default();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        parser.feed(line_no + 1, &line);
    }
    Ok(parser.finish().0)
}

/// Parse OBJ text that is already in memory.
pub fn load_obj_from_str(contents: &str) -> ObjMesh {
    parse_obj_with_warnings(contents).0
}

/// Parse OBJ text and also return what was skipped along the way.
pub fn parse_obj_with_warnings(contents: &str) -> (ObjMesh, Vec<ObjWarning>) {
    let mut parser = ObjParser::default();
    for (line_no, line) in contents.lines().enumerate() {
        parser.feed(line_no + 1, line);
    }
    parser.finish()
}

#[derive(Default)]
struct ObjParser {
    mesh: ObjMesh,
    warnings: Vec<ObjWarning>,
}

impl ObjParser {
    fn feed(&mut self, line_no: usize, line: &str) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&tag) = parts.first() else {
            return;
        };

        match tag {
            "v" if parts.len() >= 4 => {
                if let Some(xyz) = self.floats::<3>(line_no, &parts[1..4]) {
                    self.mesh.vertices.extend_from_slice(&xyz);
                }
            }
            "vn" if parts.len() >= 4 => {
                if let Some(n) = self.floats::<3>(line_no, &parts[1..4]) {
                    self.mesh.normals.extend_from_slice(&n);
                }
            }
            "vt" if parts.len() >= 3 => {
                if let Some(uv) = self.floats::<2>(line_no, &parts[1..3]) {
                    self.mesh.texture_coords.extend_from_slice(&uv);
                }
            }
            "f" if parts.len() >= 4 => self.face(line_no, &parts[1..]),
            // Short geometry lines, comments, o/g/s/usemtl/mtllib...
            _ => {}
        }
    }

    fn floats<const N: usize>(&mut self, line_no: usize, tokens: &[&str]) -> Option<[f32; N]> {
        let mut out = [0.0; N];
        for (slot, token) in out.iter_mut().zip(tokens) {
            match token.parse::<f32>() {
                Ok(value) => *slot = value,
                Err(_) => {
                    log::debug!("Skipping line {}: malformed number '{}'", line_no, token);
                    self.warnings.push(ObjWarning::MalformedNumber {
                        line: line_no,
                        token: token.to_string(),
                    });
                    return None;
                }
            }
        }
        Some(out)
    }

    fn face(&mut self, line_no: usize, refs: &[&str]) {
        if refs.len() != 3 && refs.len() != 4 {
            log::warn!(
                "Face with unsupported number of vertices: {} (line {})",
                refs.len(),
                line_no
            );
            self.warnings.push(ObjWarning::UnsupportedFace {
                line: line_no,
                count: refs.len(),
            });
            return;
        }

        let mut face = [0u32; 4];
        for (slot, token) in face.iter_mut().zip(refs) {
            match resolve_vertex_ref(token, self.mesh.vertex_count()) {
                Some(index) => *slot = index,
                None => {
                    log::warn!("Skipping face on line {}: invalid reference '{}'", line_no, token);
                    self.warnings.push(ObjWarning::InvalidIndex {
                        line: line_no,
                        token: token.to_string(),
                    });
                    return;
                }
            }
        }

        self.mesh.indices.extend_from_slice(&face[..3]);
        if refs.len() == 4 {
            // Fan from the first corner.
            self.mesh.indices.extend_from_slice(&[face[0], face[2], face[3]]);
        }
    }

    fn finish(self) -> (ObjMesh, Vec<ObjWarning>) {
        (self.mesh, self.warnings)
    }
}

/// `v`, `v/vt`, `v//vn` or `v/vt/vn`: only `v` is used, texture and normal
/// references are dropped. 1-based positive indices become 0-based; negative
/// ones count back from the vertices declared so far.
fn resolve_vertex_ref(token: &str, vertex_count: usize) -> Option<u32> {
    let first = token.split('/').next()?;
    let raw = first.parse::<i64>().ok()?;
    let index = match raw {
        0 => return None,
        r if r > 0 => r - 1,
        r => vertex_count as i64 + r,
    };
    u32::try_from(index).ok()
}
