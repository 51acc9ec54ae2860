//! Multi-step form sequencer: free navigation over a fixed list of steps.
//!
//! `next` and `back` saturate at the ends and never fail. Navigation is not
//! gated on validity; `go_to` is the only move that can be refused.

use crate::error::FormError;

#[derive(Debug, Clone)]
pub struct MultiStepForm<S> {
    steps: Vec<S>,
    index: usize,
}

impl<S> MultiStepForm<S> {
    /// A form positioned at its first step. Needs at least one step.
    pub fn new(steps: Vec<S>) -> Result<Self, FormError> {
        if steps.is_empty() {
            return Err(FormError::NoSteps);
        }
        Ok(Self { steps, index: 0 })
    }

    /// A form over a fixed, compile-time list of steps.
    pub fn from_steps<const N: usize>(steps: [S; N]) -> Self {
        const { assert!(N > 0, "a multi-step form needs at least one step") };
        Self {
            steps: Vec::from(steps),
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn current_step(&self) -> &S {
        &self.steps[self.index]
    }

    pub fn is_first_step(&self) -> bool {
        self.index == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.index == self.steps.len() - 1
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1).min(self.steps.len() - 1);
    }

    pub fn back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Jump to `index`, e.g. for reviewing an earlier answer.
    pub fn go_to(&mut self, index: usize) -> Result<(), FormError> {
        if index >= self.steps.len() {
            return Err(FormError::StepOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        self.index = index;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> MultiStepForm<&'static str> {
        MultiStepForm::new(vec!["name", "type", "size"]).unwrap()
    }

    #[test]
    fn empty_form_is_rejected() {
        assert_eq!(
            MultiStepForm::<()>::new(vec![]).err(),
            Some(FormError::NoSteps)
        );
    }

    #[test]
    fn next_and_back_saturate() {
        let mut form = three_steps();
        form.back();
        assert_eq!(form.index(), 0);
        assert!(form.is_first_step());

        form.next();
        form.next();
        form.next();
        assert_eq!(form.index(), 2);
        assert!(form.is_last_step());
        assert_eq!(*form.current_step(), "size");
    }

    #[test]
    fn go_to_rejects_out_of_range() {
        let mut form = three_steps();
        form.go_to(1).unwrap();
        assert_eq!(form.index(), 1);

        assert_eq!(
            form.go_to(3),
            Err(FormError::StepOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(form.index(), 1);
    }

    #[test]
    fn single_step_is_first_and_last() {
        let mut form = MultiStepForm::new(vec!["only"]).unwrap();
        assert!(form.is_first_step());
        assert!(form.is_last_step());
        form.next();
        assert_eq!(form.index(), 0);
    }

    #[test]
    fn reset_returns_to_first_step() {
        let mut form = three_steps();
        form.go_to(2).unwrap();
        form.reset();
        assert_eq!(form.index(), 0);
    }
}
