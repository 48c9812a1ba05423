use serde::{Deserialize, Serialize};

/// Identifier of every form the engine knows about.
///
/// The string form (`as_str`, and the serde representation) is the key the
/// PDF and validation collaborators use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormId {
    #[serde(rename = "schedule_b")]
    ScheduleB,
    #[serde(rename = "form_8949")]
    Form8949,
    #[serde(rename = "schedule_d")]
    ScheduleD,
    /// Income section of Form 1040 (lines 1a–11). Folded into `form_1040`
    /// in calculation output.
    #[serde(rename = "form_1040_income")]
    Form1040Income,
    #[serde(rename = "schedule_a")]
    ScheduleA,
    #[serde(rename = "form_1040")]
    Form1040,
    #[serde(rename = "schedule_8812")]
    Schedule8812,
    #[serde(rename = "schedule_3")]
    Schedule3,
}

impl FormId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScheduleB => "schedule_b",
            Self::Form8949 => "form_8949",
            Self::ScheduleD => "schedule_d",
            Self::Form1040Income => "form_1040_income",
            Self::ScheduleA => "schedule_a",
            Self::Form1040 => "form_1040",
            Self::Schedule8812 => "schedule_8812",
            Self::Schedule3 => "schedule_3",
        }
    }

    /// True for calculation phases that are not filed as forms of their own.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Form1040Income)
    }
}

impl std::fmt::Display for FormId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
