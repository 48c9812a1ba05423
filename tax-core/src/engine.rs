//! Top-level orchestration: one call turns a [`ReturnSnapshot`] into a
//! [`CalculationResult`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::forms::{CalculationContext, Calculator, FormId, FormLines, FormResult};
use crate::parameters::ParameterError;
use crate::solver::{FormSolver, SolverError};
use crate::{CalculationResult, DeductionMethod, ReturnSnapshot, TaxYearConfig};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    #[error("return is for tax year {snapshot} but the engine is configured for {engine}")]
    TaxYearMismatch { snapshot: i32, engine: i32 },

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("{0} was not produced by the calculation")]
    MissingForm(FormId),

    #[error("inconsistent result: {0}")]
    Inconsistent(String),
}

/// Computes complete returns for one tax year.
///
/// The engine holds only the year's parameters. Calculators, the solver and
/// the calculation context are built fresh for every call, so one engine can
/// be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    config: &'a TaxYearConfig,
}

impl TaxEngine<'static> {
    /// Engine over the built-in parameters for `year`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Parameters`] if the year is not supported.
    pub fn for_year(year: i32) -> Result<Self, EngineError> {
        Ok(Self::new(TaxYearConfig::for_year(year)?))
    }
}

impl<'a> TaxEngine<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a TaxYearConfig {
        self.config
    }

    /// Runs every form calculator over `snapshot`.
    ///
    /// # Errors
    ///
    /// Fails if the snapshot is for a different tax year, if the form graph
    /// cannot be solved, or if Form 1040 is missing from the results.
    pub fn calculate(
        &self,
        snapshot: &ReturnSnapshot,
    ) -> Result<CalculationResult, EngineError> {
        if snapshot.tax_year != self.config.tax_year {
            return Err(EngineError::TaxYearMismatch {
                snapshot: snapshot.tax_year,
                engine: self.config.tax_year,
            });
        }

        let mut solver = FormSolver::new();
        for calculator in Calculator::standard_set(self.config) {
            solver.register(calculator);
        }

        let mut ctx = CalculationContext::new();
        let computed = solver.solve(snapshot, &mut ctx)?;
        debug!(forms = computed.len(), "Solved return");

        let result = self.build_result(snapshot, computed)?;
        check_consistency(&result)?;

        info!(
            tax_year = result.tax_year,
            filing_status = %result.filing_status,
            agi = %result.agi,
            taxable_income = %result.taxable_income,
            total_tax = %result.total_tax,
            refund = %result.refund_amount,
            owed = %result.amount_owed,
            "Tax calculation complete"
        );

        Ok(result)
    }

    fn build_result(
        &self,
        snapshot: &ReturnSnapshot,
        computed: BTreeMap<FormId, FormResult>,
    ) -> Result<CalculationResult, EngineError> {
        let form_1040 = match computed.get(&FormId::Form1040).map(FormResult::lines) {
            Some(FormLines::Form1040(lines)) => lines.as_ref().clone(),
            _ => return Err(EngineError::MissingForm(FormId::Form1040)),
        };

        let required_forms = self.required_forms(&computed, form_1040.deduction_method);

        let form_results: BTreeMap<FormId, FormLines> = computed
            .into_iter()
            .filter(|(id, _)| !id.is_synthetic())
            .map(|(id, result)| (id, result.into_lines()))
            .collect();

        Ok(CalculationResult {
            tax_year: snapshot.tax_year,
            filing_status: snapshot.filing_status,
            total_income: form_1040.income.total_income,
            agi: form_1040.income.agi,
            taxable_income: form_1040.taxable_income,
            total_tax: form_1040.total_tax,
            total_credits: form_1040.total_credits,
            total_payments: form_1040.total_payments,
            refund_amount: form_1040.refund,
            amount_owed: form_1040.amount_owed,
            effective_tax_rate: form_1040.effective_rate,
            marginal_tax_rate: form_1040.marginal_rate,
            standard_deduction_amount: form_1040.standard_deduction,
            itemized_deduction_amount: form_1040.itemized_deduction,
            deduction_method: form_1040.deduction_method,
            form_results,
            required_forms,
            errors: Vec::new(),
            warnings: Vec::new(),
        })
    }

    /// Forms the taxpayer has to file, in filing order.
    fn required_forms(
        &self,
        computed: &BTreeMap<FormId, FormResult>,
        deduction_method: DeductionMethod,
    ) -> Vec<FormId> {
        let mut required = vec![FormId::Form1040];

        let lines = |id: FormId| computed.get(&id).map(FormResult::lines);

        if let Some(FormLines::ScheduleB(b)) = lines(FormId::ScheduleB) {
            let threshold = self.config.schedule_b_threshold;
            if b.total_interest > threshold || b.total_ordinary_dividends > threshold {
                required.push(FormId::ScheduleB);
            }
        }

        let has_sales = matches!(
            lines(FormId::Form8949),
            Some(FormLines::Form8949(f)) if f.transaction_count > 0
        );
        let has_distributions = matches!(
            lines(FormId::ScheduleD),
            Some(FormLines::ScheduleD(d)) if !d.capital_gain_distributions.is_zero()
        );
        if has_sales {
            required.push(FormId::Form8949);
        }
        if has_sales || has_distributions {
            required.push(FormId::ScheduleD);
        }

        if deduction_method == DeductionMethod::Itemized {
            required.push(FormId::ScheduleA);
        }

        required
    }
}

fn check_consistency(result: &CalculationResult) -> Result<(), EngineError> {
    if result.refund_amount > Decimal::ZERO && result.amount_owed > Decimal::ZERO {
        return Err(EngineError::Inconsistent(format!(
            "both refund ({}) and amount owed ({}) are positive",
            result.refund_amount, result.amount_owed
        )));
    }
    if result.refund_amount - result.amount_owed != result.total_payments - result.total_tax {
        return Err(EngineError::Inconsistent(format!(
            "refund {} and amount owed {} do not settle payments {} against tax {}",
            result.refund_amount, result.amount_owed, result.total_payments, result.total_tax
        )));
    }
    Ok(())
}
