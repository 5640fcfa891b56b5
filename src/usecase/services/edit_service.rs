use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::entities::edit::{EditError, RowUpdate};
use crate::domain::entities::workspace::Workspace;
use crate::usecase::ports::sheet_client::{validate_update, SheetClient, SheetError};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

pub struct EditService {
    client: Arc<dyn SheetClient>,
}

impl EditService {
    pub fn new(client: Arc<dyn SheetClient>) -> Self {
        Self { client }
    }

    /// The remote half of a save. Callers that cannot hold the workspace
    /// across an await use this between `prepare_*` and `finish_*`.
    pub async fn push(&self, update: &RowUpdate) -> Result<(), SheetError> {
        validate_update(update.row_index, &update.values)?;
        debug!(
            row_index = update.row_index,
            cells = update.values.len(),
            "sending row update"
        );
        let result = self
            .client
            .update(update.row_index, update.values.clone())
            .await;
        match &result {
            Ok(()) => info!(row_index = update.row_index, "row updated"),
            Err(err) => warn!(row_index = update.row_index, error = %err, "row update failed"),
        }
        result
    }

    pub async fn commit(&self, workspace: &mut Workspace) -> Result<(), WorkflowError> {
        let update = workspace.prepare_save()?;
        let outcome = self.push(&update).await;
        Self::settle_save(workspace, &update, outcome)
    }

    pub async fn toggle_status(
        &self,
        workspace: &mut Workspace,
        absolute_index: usize,
    ) -> Result<(), WorkflowError> {
        let update = workspace.prepare_toggle(absolute_index)?;
        let outcome = self.push(&update).await;
        Self::settle_toggle(workspace, &update, outcome)
    }

    /// Applies the outcome of a pushed save and reports the remote result.
    pub fn settle_save(
        workspace: &mut Workspace,
        update: &RowUpdate,
        outcome: Result<(), SheetError>,
    ) -> Result<(), WorkflowError> {
        if let Err(err) = workspace.finish_save(update, outcome.is_ok()) {
            warn!(row_index = update.row_index, error = %err, "save finished without a pending write");
        }
        outcome.map_err(WorkflowError::from)
    }

    pub fn settle_toggle(
        workspace: &mut Workspace,
        update: &RowUpdate,
        outcome: Result<(), SheetError>,
    ) -> Result<(), WorkflowError> {
        if let Err(err) = workspace.finish_toggle(update, outcome.is_ok()) {
            warn!(row_index = update.row_index, error = %err, "toggle finished without a pending write");
        }
        outcome.map_err(WorkflowError::from)
    }
}
