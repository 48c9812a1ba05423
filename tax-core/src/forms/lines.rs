use serde::Serialize;

use super::{
    Form1040IncomeLines, Form1040Lines, Form8949Lines, FormId, Schedule3Lines,
    Schedule8812Lines, ScheduleALines, ScheduleBLines, ScheduleDLines,
};

/// The computed lines of one form. Serializes as a flat map of line
/// identifier to value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormLines {
    ScheduleB(ScheduleBLines),
    Form8949(Form8949Lines),
    ScheduleD(ScheduleDLines),
    Form1040Income(Form1040IncomeLines),
    ScheduleA(ScheduleALines),
    Form1040(Box<Form1040Lines>),
    Schedule8812(Schedule8812Lines),
    Schedule3(Schedule3Lines),
}

impl FormLines {
    pub fn form_id(&self) -> FormId {
        match self {
            Self::ScheduleB(_) => FormId::ScheduleB,
            Self::Form8949(_) => FormId::Form8949,
            Self::ScheduleD(_) => FormId::ScheduleD,
            Self::Form1040Income(_) => FormId::Form1040Income,
            Self::ScheduleA(_) => FormId::ScheduleA,
            Self::Form1040(_) => FormId::Form1040,
            Self::Schedule8812(_) => FormId::Schedule8812,
            Self::Schedule3(_) => FormId::Schedule3,
        }
    }
}

/// A finished form: its identifier and its lines. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormResult {
    form_id: FormId,
    lines: FormLines,
}

impl FormResult {
    pub fn new(lines: FormLines) -> Self {
        Self {
            form_id: lines.form_id(),
            lines,
        }
    }

    pub fn form_id(&self) -> FormId {
        self.form_id
    }

    pub fn lines(&self) -> &FormLines {
        &self.lines
    }

    pub fn into_lines(self) -> FormLines {
        self.lines
    }
}
