use std::collections::BTreeMap;

use super::{
    Form1040IncomeLines, Form8949Lines, FormId, FormLines, FormResult, Schedule3Lines,
    Schedule8812Lines, ScheduleALines, ScheduleBLines, ScheduleDLines,
};

/// Read-only view of already-computed forms handed to one calculator.
///
/// The solver populates it with the calculator's declared dependencies only.
/// A dependency that was not registered is simply missing, and the typed
/// accessors return `None` for it.
#[derive(Debug, Clone, Default)]
pub struct ComputedForms<'a> {
    forms: BTreeMap<FormId, &'a FormResult>,
}

impl<'a> ComputedForms<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        result: &'a FormResult,
    ) {
        self.forms.insert(result.form_id(), result);
    }

    pub fn get(
        &self,
        id: FormId,
    ) -> Option<&'a FormLines> {
        self.forms.get(&id).map(|r| r.lines())
    }

    pub fn contains(
        &self,
        id: FormId,
    ) -> bool {
        self.forms.contains_key(&id)
    }

    pub fn schedule_b(&self) -> Option<&'a ScheduleBLines> {
        match self.get(FormId::ScheduleB) {
            Some(FormLines::ScheduleB(lines)) => Some(lines),
            _ => None,
        }
    }

    pub fn form_8949(&self) -> Option<&'a Form8949Lines> {
        match self.get(FormId::Form8949) {
            Some(FormLines::Form8949(lines)) => Some(lines),
            _ => None,
        }
    }

    pub fn schedule_d(&self) -> Option<&'a ScheduleDLines> {
        match self.get(FormId::ScheduleD) {
            Some(FormLines::ScheduleD(lines)) => Some(lines),
            _ => None,
        }
    }

    pub fn form_1040_income(&self) -> Option<&'a Form1040IncomeLines> {
        match self.get(FormId::Form1040Income) {
            Some(FormLines::Form1040Income(lines)) => Some(lines),
            _ => None,
        }
    }

    pub fn schedule_a(&self) -> Option<&'a ScheduleALines> {
        match self.get(FormId::ScheduleA) {
            Some(FormLines::ScheduleA(lines)) => Some(lines),
            _ => None,
        }
    }

    pub fn schedule_8812(&self) -> Option<&'a Schedule8812Lines> {
        match self.get(FormId::Schedule8812) {
            Some(FormLines::Schedule8812(lines)) => Some(lines),
            _ => None,
        }
    }

    pub fn schedule_3(&self) -> Option<&'a Schedule3Lines> {
        match self.get(FormId::Schedule3) {
            Some(FormLines::Schedule3(lines)) => Some(lines),
            _ => None,
        }
    }
}
