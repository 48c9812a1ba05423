//! IRS form calculators and their typed line records.
//!
//! Each calculator declares the forms it depends on and produces one
//! [`FormLines`] variant. Calculators only see the results of their declared
//! dependencies (through [`ComputedForms`]) plus the immutable
//! [`ReturnSnapshot`](crate::ReturnSnapshot) and the shared
//! [`CalculationContext`].
//!
//! Form 1040 is split into two calculators: [`Form1040Income`] produces the
//! income section up to AGI and publishes AGI into the context, then
//! [`ScheduleA`] (which needs AGI) runs, then [`Form1040`] finishes the
//! deduction, tax and payment sections.

mod calculator;
mod computed;
mod context;
mod credits;
mod form_1040;
mod form_1040_income;
mod form_8949;
mod form_id;
mod lines;
mod schedule_a;
mod schedule_b;
mod schedule_d;

pub use calculator::{CalculationError, Calculator, FormCalculator};
pub use computed::ComputedForms;
pub use context::{CalculationContext, ContextError};
pub use credits::{Schedule3Lines, Schedule8812Lines};
pub use form_1040::{Form1040, Form1040Lines};
pub use form_1040_income::{Form1040Income, Form1040IncomeLines};
pub use form_8949::{Form8949, Form8949Lines};
pub use form_id::FormId;
pub use lines::{FormLines, FormResult};
pub use schedule_a::{ScheduleA, ScheduleALines};
pub use schedule_b::{ScheduleB, ScheduleBLines};
pub use schedule_d::{ScheduleD, ScheduleDLines};
