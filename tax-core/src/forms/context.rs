use rust_decimal::Decimal;
use thiserror::Error;

/// Misuse of the shared calculation context. Always a registration or
/// ordering bug, never a data problem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("AGI read before the Form 1040 income section produced it")]
    AgiUnavailable,

    #[error("AGI already set to {existing}; refusing to overwrite with {attempted}")]
    AgiAlreadySet {
        existing: Decimal,
        attempted: Decimal,
    },
}

/// Values derived mid-calculation that later calculators read.
///
/// One context lives for exactly one calculation. AGI is written once by
/// [`Form1040Income`](super::Form1040Income); calculators ordered after it
/// (Schedule A) read it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationContext {
    agi: Option<Decimal>,
}

impl CalculationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// [`ContextError::AgiAlreadySet`] on a second write.
    pub fn set_agi(
        &mut self,
        agi: Decimal,
    ) -> Result<(), ContextError> {
        match self.agi {
            Some(existing) => Err(ContextError::AgiAlreadySet {
                existing,
                attempted: agi,
            }),
            None => {
                self.agi = Some(agi);
                Ok(())
            }
        }
    }

    /// # Errors
    ///
    /// [`ContextError::AgiUnavailable`] if nothing has published AGI yet.
    pub fn agi(&self) -> Result<Decimal, ContextError> {
        self.agi.ok_or(ContextError::AgiUnavailable)
    }
}
