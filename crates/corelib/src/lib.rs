//! Core types: math re-exports, form-matrix builders, uniform upload, errors.

use thiserror::Error;

pub use glam::{Mat4, Vec3};

pub mod form;
pub mod stack;
pub mod uniform;

pub use form::FormMatrix;
pub use stack::{MatrixStack, compose};
pub use uniform::{FORM_MATRIX_UNIFORM, FormUploader, UniformTarget};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Uniform '{0}' not found in program")]
    UniformNotFound(String),
    #[error("Matrix stack underflow: nothing pushed to pop")]
    StackUnderflow,
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_then_scale_matrix() {
        let m = compose(&[form::scale(2.0, 2.0, 2.0), form::translation(1.0, 2.0, 3.0)]);
        // Последний столбец = translation, диагональ = scale.
        let a = m.to_cols_array();
        assert!((a[12] - 1.0).abs() < 1e-6);
        assert!((a[13] - 2.0).abs() < 1e-6);
        assert!((a[14] - 3.0).abs() < 1e-6);
        assert!((a[0] - 2.0).abs() < 1e-6);
        assert!((a[5] - 2.0).abs() < 1e-6);
        assert!((a[10] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn errors_render_readable_messages() {
        let err = CoreError::UniformNotFound(FORM_MATRIX_UNIFORM.to_string());
        assert_eq!(err.to_string(), "Uniform 'uFormMatrix' not found in program");
    }
}
