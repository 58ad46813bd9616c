//! Asset loading: OBJ text into flat mesh arrays, from files or over HTTP.

pub mod error;
pub mod fetch;
pub mod loader;
pub mod mesh;
pub mod obj;

pub use error::LoadError;
pub use fetch::{AnyFetcher, FileFetcher, HttpFetcher, MemoryFetcher, TextFetcher};
pub use loader::{ObjLoader, PendingLoad, load_obj, load_obj_with};
pub use mesh::ObjMesh;
pub use obj::{ObjWarning, load_obj_from_path, load_obj_from_reader, load_obj_from_str, parse_obj_with_warnings};
