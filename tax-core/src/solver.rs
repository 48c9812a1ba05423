//! Dependency-ordered execution of form calculators.
//!
//! Calculators are ordered by a depth-first walk over their declared
//! dependencies, starting from each calculator in registration order. A
//! dependency that names an unregistered form is skipped; the calculator
//! sees it as absent. A dependency path that revisits a form on the current
//! walk is a cycle and aborts the solve.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::debug;

use crate::ReturnSnapshot;
use crate::forms::{
    CalculationContext, CalculationError, ComputedForms, FormCalculator, FormId, FormResult,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("circular dependency detected involving {0}")]
    CircularDependency(FormId),

    #[error("failed to calculate {form}: {source}")]
    Calculation {
        form: FormId,
        #[source]
        source: CalculationError,
    },

    #[error("calculator for {expected} produced lines for {actual}")]
    MismatchedResult { expected: FormId, actual: FormId },
}

/// Registry of calculators plus the ordering walk over them.
#[derive(Debug, Clone)]
pub struct FormSolver<C> {
    calculators: Vec<C>,
    index: BTreeMap<FormId, usize>,
}

impl<C> Default for FormSolver<C> {
    fn default() -> Self {
        Self {
            calculators: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<C: FormCalculator> FormSolver<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a calculator. Registering a second calculator for the same
    /// form replaces the first but keeps its registration position.
    pub fn register(
        &mut self,
        calculator: C,
    ) {
        let id = calculator.form_id();
        match self.index.get(&id) {
            Some(&slot) => self.calculators[slot] = calculator,
            None => {
                self.index.insert(id, self.calculators.len());
                self.calculators.push(calculator);
            }
        }
    }

    pub fn is_registered(
        &self,
        id: FormId,
    ) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    /// Order in which registered forms are computed. Every form appears after
    /// all of its registered dependencies.
    ///
    /// # Errors
    ///
    /// [`SolverError::CircularDependency`] naming the form at which the cycle
    /// was found.
    pub fn execution_order(&self) -> Result<Vec<FormId>, SolverError> {
        let mut visited = BTreeSet::new();
        let mut order = Vec::with_capacity(self.calculators.len());

        for calculator in &self.calculators {
            let mut ancestors = BTreeSet::new();
            self.visit(calculator.form_id(), &mut ancestors, &mut visited, &mut order)?;
        }

        Ok(order)
    }

    fn visit(
        &self,
        id: FormId,
        ancestors: &mut BTreeSet<FormId>,
        visited: &mut BTreeSet<FormId>,
        order: &mut Vec<FormId>,
    ) -> Result<(), SolverError> {
        if ancestors.contains(&id) {
            return Err(SolverError::CircularDependency(id));
        }
        if visited.contains(&id) {
            return Ok(());
        }

        ancestors.insert(id);
        if let Some(calculator) = self.get(id) {
            for &dep in calculator.dependencies() {
                if self.is_registered(dep) {
                    self.visit(dep, ancestors, visited, order)?;
                } else {
                    debug!(form = %id, dependency = %dep, "Skipping unregistered dependency");
                }
            }
        }
        ancestors.remove(&id);

        visited.insert(id);
        order.push(id);
        Ok(())
    }

    /// Computes every registered form in dependency order.
    ///
    /// Each calculator receives only its declared dependencies.
    ///
    /// # Errors
    ///
    /// A cycle in the registered graph, or the first calculator failure.
    pub fn solve(
        &self,
        snapshot: &ReturnSnapshot,
        ctx: &mut CalculationContext,
    ) -> Result<BTreeMap<FormId, FormResult>, SolverError> {
        let order = self.execution_order()?;
        debug!(?order, "Resolved form execution order");

        let mut results: BTreeMap<FormId, FormResult> = BTreeMap::new();
        for id in order {
            let Some(calculator) = self.get(id) else {
                continue;
            };

            let result = {
                let mut deps = ComputedForms::new();
                for dep in calculator.dependencies() {
                    if let Some(computed) = results.get(dep) {
                        deps.insert(computed);
                    }
                }
                calculator
                    .calculate(snapshot, &deps, ctx)
                    .map_err(|source| SolverError::Calculation { form: id, source })?
            };

            if result.form_id() != id {
                return Err(SolverError::MismatchedResult {
                    expected: id,
                    actual: result.form_id(),
                });
            }

            debug!(form = %id, "Computed form");
            results.insert(id, result);
        }

        Ok(results)
    }

    fn get(
        &self,
        id: FormId,
    ) -> Option<&C> {
        self.index.get(&id).map(|&slot| &self.calculators[slot])
    }
}
