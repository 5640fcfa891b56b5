use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::sheet::SheetValues;
use crate::domain::entities::workspace::Workspace;
use crate::usecase::ports::sheet_client::{SheetClient, SheetError};

pub struct QueryService {
    client: Arc<dyn SheetClient>,
}

impl QueryService {
    pub fn new(client: Arc<dyn SheetClient>) -> Self {
        Self { client }
    }

    pub async fn load(&self) -> Result<SheetValues, SheetError> {
        match self.client.read().await {
            Ok(values) => {
                info!(rows = values.len(), "sheet loaded");
                Ok(values)
            }
            Err(err) => {
                warn!(error = %err, "sheet load failed");
                Err(err)
            }
        }
    }

    /// Loads into `workspace`. A failed load leaves the workspace empty.
    pub async fn reload(&self, workspace: &mut Workspace) -> Result<usize, SheetError> {
        let loaded = self.load().await;
        Self::settle(workspace, loaded)
    }

    /// Applies a finished load. Callers that cannot hold the workspace
    /// across an await pair this with `load`.
    pub fn settle(
        workspace: &mut Workspace,
        loaded: Result<SheetValues, SheetError>,
    ) -> Result<usize, SheetError> {
        match loaded {
            Ok(values) => {
                workspace.replace(values);
                Ok(workspace.sheet().record_count())
            }
            Err(err) => {
                workspace.clear();
                Err(err)
            }
        }
    }
}
