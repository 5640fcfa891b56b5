use anyhow::Result;

use crate::usecase::ports::identity::Session;

/// Where the signed-in session survives an application restart.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}
