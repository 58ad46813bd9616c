//! Composition of form matrices. Uploading overwrites the uniform, so combined
//! transforms are multiplied here first and uploaded once.

use crate::{CoreError, CoreResult, Mat4, form::FormMatrix};

/// Product of `steps` applied to a vertex in slice order:
/// `compose(&[a, b]) == b * a`. Empty slice gives the identity.
pub fn compose(steps: &[FormMatrix]) -> FormMatrix {
    steps.iter().fold(Mat4::IDENTITY, |acc, m| *m * acc)
}

/// Classic push/pop matrix stack. The current matrix starts at identity.
#[derive(Clone, Debug)]
pub struct MatrixStack {
    current: FormMatrix,
    saved: Vec<FormMatrix>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            current: Mat4::IDENTITY,
            saved: Vec::new(),
        }
    }

    #[inline]
    pub fn current(&self) -> FormMatrix {
        self.current
    }

    /// Number of saved matrices below the current one.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Save the current matrix.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the last saved matrix, returning the one that was discarded.
    pub fn pop(&mut self) -> CoreResult<FormMatrix> {
        let restored = self.saved.pop().ok_or(CoreError::StackUnderflow)?;
        Ok(std::mem::replace(&mut self.current, restored))
    }

    /// Apply `m` after everything already on the current matrix.
    pub fn apply(&mut self, m: FormMatrix) -> &mut Self {
        self.current = m * self.current;
        self
    }

    /// Replace the current matrix.
    pub fn load(&mut self, m: FormMatrix) -> &mut Self {
        self.current = m;
        self
    }

    /// Back to a single identity entry.
    pub fn reset(&mut self) {
        self.current = Mat4::IDENTITY;
        self.saved.clear();
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vec3, form};

    #[test]
    fn compose_applies_in_order() {
        let m = compose(&[form::scale(2.0, 2.0, 2.0), form::translation(1.0, 0.0, 0.0)]);
        // scaled first, then moved
        assert_eq!(m.transform_point3(Vec3::X), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(compose(&[]), Mat4::IDENTITY);
    }

    #[test]
    fn stack_apply_matches_compose() {
        let steps = [form::rotate_z(0.4), form::translation(0.0, 1.0, 0.0), form::scale(1.0, 3.0, 1.0)];
        let mut stack = MatrixStack::new();
        for m in steps {
            stack.apply(m);
        }
        assert!(stack.current().abs_diff_eq(compose(&steps), 1e-6));
    }

    #[test]
    fn push_pop_restores() {
        let mut stack = MatrixStack::new();
        stack.apply(form::translation(1.0, 2.0, 3.0));
        stack.push();
        stack.apply(form::rotate_y(1.0));
        assert_eq!(stack.depth(), 1);

        let discarded = stack.pop().unwrap();
        assert!(discarded.abs_diff_eq(form::rotate_y(1.0) * form::translation(1.0, 2.0, 3.0), 1e-6));
        assert_eq!(stack.current(), form::translation(1.0, 2.0, 3.0));
        assert_eq!(stack.pop(), Err(CoreError::StackUnderflow));
    }

    #[test]
    fn load_and_reset() {
        let mut stack = MatrixStack::default();
        stack.push();
        stack.load(form::scale(4.0, 4.0, 4.0));
        assert_eq!(stack.current(), form::scale(4.0, 4.0, 4.0));
        stack.reset();
        assert_eq!(stack.current(), Mat4::IDENTITY);
        assert_eq!(stack.depth(), 0);
    }
}
