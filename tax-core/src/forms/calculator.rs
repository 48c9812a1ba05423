use thiserror::Error;

use super::{
    CalculationContext, ComputedForms, ContextError, Form1040, Form1040Income, Form8949, FormId,
    FormLines, FormResult, ScheduleA, ScheduleB, ScheduleD,
};
use crate::{ReturnSnapshot, TaxYearConfig};

/// Failure of a single form calculator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("required form {0} was not computed")]
    MissingRequiredForm(FormId),
}

/// A unit of calculation that produces one form.
///
/// Implementors declare which forms they read; the solver guarantees those
/// (when registered) are computed first and passes exactly them in `deps`.
pub trait FormCalculator {
    fn form_id(&self) -> FormId;

    fn dependencies(&self) -> &[FormId];

    /// # Errors
    ///
    /// Returns [`CalculationError`] when a required input is unavailable.
    fn calculate(
        &self,
        snapshot: &ReturnSnapshot,
        deps: &ComputedForms<'_>,
        ctx: &mut CalculationContext,
    ) -> Result<FormResult, CalculationError>;
}

/// The built-in form calculators, each borrowing one year's parameters.
#[derive(Debug, Clone, Copy)]
pub enum Calculator<'a> {
    ScheduleB(ScheduleB),
    Form8949(Form8949),
    ScheduleD(ScheduleD<'a>),
    Form1040Income(Form1040Income<'a>),
    ScheduleA(ScheduleA<'a>),
    Form1040(Form1040<'a>),
}

impl<'a> Calculator<'a> {
    /// Every calculator the engine registers, in registration order.
    ///
    /// Schedule 8812 and Schedule 3 are not included; Form 1040 reads their
    /// credits as zero.
    pub fn standard_set(config: &'a TaxYearConfig) -> Vec<Calculator<'a>> {
        vec![
            Calculator::ScheduleB(ScheduleB),
            Calculator::Form8949(Form8949),
            Calculator::ScheduleD(ScheduleD::new(config)),
            Calculator::Form1040Income(Form1040Income::new(config)),
            Calculator::ScheduleA(ScheduleA::new(config)),
            Calculator::Form1040(Form1040::new(config)),
        ]
    }
}

impl FormCalculator for Calculator<'_> {
    fn form_id(&self) -> FormId {
        match self {
            Self::ScheduleB(_) => ScheduleB::ID,
            Self::Form8949(_) => Form8949::ID,
            Self::ScheduleD(_) => ScheduleD::ID,
            Self::Form1040Income(_) => Form1040Income::ID,
            Self::ScheduleA(_) => ScheduleA::ID,
            Self::Form1040(_) => Form1040::ID,
        }
    }

    fn dependencies(&self) -> &[FormId] {
        match self {
            Self::ScheduleB(_) => ScheduleB::DEPENDENCIES,
            Self::Form8949(_) => Form8949::DEPENDENCIES,
            Self::ScheduleD(_) => ScheduleD::DEPENDENCIES,
            Self::Form1040Income(_) => Form1040Income::DEPENDENCIES,
            Self::ScheduleA(_) => ScheduleA::DEPENDENCIES,
            Self::Form1040(_) => Form1040::DEPENDENCIES,
        }
    }

    fn calculate(
        &self,
        snapshot: &ReturnSnapshot,
        deps: &ComputedForms<'_>,
        ctx: &mut CalculationContext,
    ) -> Result<FormResult, CalculationError> {
        let lines = match self {
            Self::ScheduleB(form) => FormLines::ScheduleB(form.calculate(snapshot)),
            Self::Form8949(form) => FormLines::Form8949(form.calculate(snapshot)),
            Self::ScheduleD(form) => FormLines::ScheduleD(form.calculate(snapshot, deps)),
            Self::Form1040Income(form) => {
                FormLines::Form1040Income(form.calculate(snapshot, deps, ctx)?)
            }
            Self::ScheduleA(form) => FormLines::ScheduleA(form.calculate(snapshot, deps, ctx)?),
            Self::Form1040(form) => FormLines::Form1040(Box::new(form.calculate(snapshot, deps)?)),
        };
        Ok(FormResult::new(lines))
    }
}
