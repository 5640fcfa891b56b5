use std::collections::BTreeSet;

use crate::domain::dates::canonical_editable;
use crate::domain::entities::edit::{EditError, EditSession, RowUpdate};
use crate::domain::entities::sheet::{Sheet, SheetValues};
use crate::domain::roles::{header_role, ColumnRoles};
use crate::domain::status::classify_record;
use crate::domain::view::{build_view, PatientView, ViewQuery};

/// Client-side state for one signed-in session: the loaded sheet, the
/// snapshot used as the dirty-check baseline, at most one open edit
/// session, and the rows with a write in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    sheet: Sheet,
    snapshot: Sheet,
    roles: ColumnRoles,
    session: Option<EditSession>,
    saving_rows: BTreeSet<usize>,
}

impl Workspace {
    pub fn from_values(values: SheetValues) -> Self {
        let mut workspace = Self::default();
        workspace.replace(values);
        workspace
    }

    /// Wholesale replacement after a load. Any open edit is dropped; rows
    /// with a write in flight stay flagged until that write finishes.
    pub fn replace(&mut self, values: SheetValues) {
        self.sheet = Sheet::new(values);
        self.snapshot = self.sheet.clone();
        self.roles = header_role(self.sheet.header());
        self.session = None;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn snapshot(&self) -> &Sheet {
        &self.snapshot
    }

    pub fn roles(&self) -> &ColumnRoles {
        &self.roles
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_saving(&self, absolute_index: usize) -> bool {
        self.saving_rows.contains(&absolute_index)
    }

    pub fn has_writes_in_flight(&self) -> bool {
        !self.saving_rows.is_empty()
    }

    pub fn view(&self, query: &ViewQuery) -> PatientView<'_> {
        build_view(&self.sheet, &self.roles, query)
    }

    pub fn begin_edit(&mut self, absolute_index: usize) -> Result<(), EditError> {
        if self.session.is_some() {
            return Err(EditError::SessionOpen);
        }
        let buffer = self.editable_copy(&self.sheet, absolute_index)?;
        self.session = Some(EditSession {
            absolute_index,
            buffer,
            saving: false,
        });
        Ok(())
    }

    /// Replaces one cell of the buffer, padding short records with empty cells.
    pub fn set_field(&mut self, col: usize, value: impl Into<String>) -> Result<(), EditError> {
        let session = self.editable_session()?;
        if session.buffer.len() <= col {
            session.buffer.resize(col + 1, String::new());
        }
        session.buffer[col] = value.into();
        Ok(())
    }

    /// Reloads the buffer from the snapshot without closing the session.
    pub fn reset_edit(&mut self) -> Result<(), EditError> {
        let absolute_index = self.editable_session()?.absolute_index;
        let buffer = self.editable_copy(&self.snapshot, absolute_index)?;
        if let Some(session) = self.session.as_mut() {
            session.buffer = buffer;
        }
        Ok(())
    }

    pub fn discard_edit(&mut self) -> Result<(), EditError> {
        if let Some(session) = &self.session {
            if session.saving {
                return Err(EditError::RowBusy(session.absolute_index));
            }
        }
        self.session = None;
        Ok(())
    }

    /// Order-sensitive comparison of the buffer against the snapshot record.
    pub fn is_dirty(&self) -> bool {
        match &self.session {
            Some(session) => {
                self.snapshot.row(session.absolute_index) != Some(session.buffer.as_slice())
            }
            None => false,
        }
    }

    pub fn prepare_save(&mut self) -> Result<RowUpdate, EditError> {
        let absolute_index = self.editable_session()?.absolute_index;
        if self.saving_rows.contains(&absolute_index) {
            return Err(EditError::RowBusy(absolute_index));
        }
        let session = self.session.as_mut().ok_or(EditError::NoSession)?;
        session.saving = true;
        self.saving_rows.insert(absolute_index);
        Ok(RowUpdate::for_row(absolute_index, session.buffer.clone()))
    }

    /// Success writes the buffer into both sheet and snapshot and closes the
    /// session; failure returns the session to editing with its buffer.
    pub fn finish_save(&mut self, update: &RowUpdate, succeeded: bool) -> Result<(), EditError> {
        if !self.saving_rows.remove(&update.absolute_index) {
            return Err(EditError::NotSaving(update.absolute_index));
        }
        let owns_session = self
            .session
            .as_ref()
            .is_some_and(|s| s.absolute_index == update.absolute_index && s.saving);

        if succeeded {
            self.commit_row(update);
            if owns_session {
                self.session = None;
            }
        } else if let Some(session) = self.session.as_mut().filter(|_| owns_session) {
            session.saving = false;
        }
        Ok(())
    }

    /// Flips Pending/Attended on one record without touching the edit buffer.
    pub fn prepare_toggle(&mut self, absolute_index: usize) -> Result<RowUpdate, EditError> {
        let status_col = self.roles.status.ok_or(EditError::NoStatusColumn)?;
        if self.saving_rows.contains(&absolute_index) {
            return Err(EditError::RowBusy(absolute_index));
        }
        let record = self
            .sheet
            .row(absolute_index)
            .filter(|_| self.sheet.is_record_index(absolute_index))
            .ok_or(EditError::RowOutOfRange(absolute_index))?;

        let next = classify_record(record, Some(status_col)).toggled();
        let mut values = record.to_vec();
        if values.len() <= status_col {
            values.resize(status_col + 1, String::new());
        }
        values[status_col] = next.label().to_string();

        self.saving_rows.insert(absolute_index);
        Ok(RowUpdate::for_row(absolute_index, values))
    }

    pub fn finish_toggle(&mut self, update: &RowUpdate, succeeded: bool) -> Result<(), EditError> {
        if !self.saving_rows.remove(&update.absolute_index) {
            return Err(EditError::NotSaving(update.absolute_index));
        }
        if succeeded {
            self.commit_row(update);
        }
        Ok(())
    }

    fn commit_row(&mut self, update: &RowUpdate) {
        self.sheet
            .replace_row(update.absolute_index, update.values.clone());
        self.snapshot
            .replace_row(update.absolute_index, update.values.clone());
    }

    fn editable_session(&mut self) -> Result<&mut EditSession, EditError> {
        let session = self.session.as_mut().ok_or(EditError::NoSession)?;
        if session.saving {
            return Err(EditError::RowBusy(session.absolute_index));
        }
        Ok(session)
    }

    fn editable_copy(&self, source: &Sheet, absolute_index: usize) -> Result<Vec<String>, EditError> {
        if !source.is_record_index(absolute_index) {
            return Err(EditError::RowOutOfRange(absolute_index));
        }
        let mut buffer = source
            .row(absolute_index)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        if let Some(cell) = self.roles.last_contact.and_then(|col| buffer.get_mut(col)) {
            if let Some(canonical) = canonical_editable(cell) {
                *cell = canonical;
            }
        }
        Ok(buffer)
    }
}
