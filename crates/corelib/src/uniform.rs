//! Uniform upload seam between the form builders and a graphics backend.

use crate::{CoreError, CoreResult, form, form::FormMatrix};

/// Uniform that receives the current form matrix unless overridden.
pub const FORM_MATRIX_UNIFORM: &str = "uFormMatrix";

/// A linked shader program as seen from the host side: named uniforms can be
/// resolved and 4x4 float matrices written to them.
pub trait UniformTarget {
    type Location;

    /// Resolve a uniform by name. `None` if the program has no such uniform.
    fn uniform_location(&self, name: &str) -> Option<Self::Location>;

    /// Write 16 column-major floats (no transpose) to a resolved location.
    fn upload_mat4(&mut self, location: &Self::Location, cols: &[f32; 16]);
}

/// Builds form matrices and pushes them to one named uniform of a target.
/// Each call fully overwrites the uniform; compose beforehand with
/// [`crate::MatrixStack`] if several transforms must combine.
pub struct FormUploader<'t, T: UniformTarget> {
    target: &'t mut T,
    uniform: String,
}

impl<'t, T: UniformTarget> FormUploader<'t, T> {
    pub fn new(target: &'t mut T) -> Self {
        Self {
            target,
            uniform: FORM_MATRIX_UNIFORM.to_string(),
        }
    }

    /// Write to `name` instead of [`FORM_MATRIX_UNIFORM`].
    pub fn with_uniform(mut self, name: impl Into<String>) -> Self {
        self.uniform = name.into();
        self
    }

    #[inline]
    pub fn uniform(&self) -> &str {
        &self.uniform
    }

    /// Upload an arbitrary matrix. Returns it back on success.
    pub fn upload(&mut self, matrix: FormMatrix) -> CoreResult<FormMatrix> {
        let Some(location) = self.target.uniform_location(&self.uniform) else {
            log::warn!("Uniform '{}' not found, matrix not uploaded", self.uniform);
            return Err(CoreError::UniformNotFound(self.uniform.clone()));
        };
        self.target.upload_mat4(&location, &matrix.to_cols_array());
        Ok(matrix)
    }

    pub fn translation(&mut self, dx: f32, dy: f32, dz: f32) -> CoreResult<FormMatrix> {
        self.upload(form::translation(dx, dy, dz))
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> CoreResult<FormMatrix> {
        self.upload(form::scale(sx, sy, sz))
    }

    pub fn shear(&mut self, angle: f32) -> CoreResult<FormMatrix> {
        self.upload(form::shear(angle))
    }

    pub fn rotate_x(&mut self, angle: f32) -> CoreResult<FormMatrix> {
        self.upload(form::rotate_x(angle))
    }

    pub fn rotate_y(&mut self, angle: f32) -> CoreResult<FormMatrix> {
        self.upload(form::rotate_y(angle))
    }

    pub fn rotate_z(&mut self, angle: f32) -> CoreResult<FormMatrix> {
        self.upload(form::rotate_z(angle))
    }
}
