use thiserror::Error;

/// Working copy of one record while its edit form is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub absolute_index: usize,
    pub buffer: Vec<String>,
    pub saving: bool,
}

/// Full-row write addressed by the spreadsheet's 1-based row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowUpdate {
    pub absolute_index: usize,
    pub row_index: usize,
    pub values: Vec<String>,
}

impl RowUpdate {
    pub fn for_row(absolute_index: usize, values: Vec<String>) -> Self {
        Self {
            absolute_index,
            row_index: absolute_index + 1,
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no record is being edited")]
    NoSession,
    #[error("another record is already being edited")]
    SessionOpen,
    #[error("row {0} is not a record of the loaded sheet")]
    RowOutOfRange(usize),
    #[error("row {0} is already being saved")]
    RowBusy(usize),
    #[error("the sheet has no status column")]
    NoStatusColumn,
    #[error("row {0} has no save in flight")]
    NotSaving(usize),
}
