use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use dioxus::prelude::*;
use tracing::{info, warn};

use crate::config::{default_session_path, AppConfig, SheetsCredential};
use crate::infra::firebase::auth::FirebaseAuth;
use crate::infra::session_store::FileSessionStore;
use crate::infra::sheets::client::{GoogleSheetsClient, SheetsAuth};
use crate::infra::sheets::service_account::{ServiceAccountKey, TokenSource};
use crate::ui::dashboard::Dashboard;
use crate::ui::guard::{resolve, Route};
use crate::ui::login::LoginView;
use crate::ui::session::SessionContext;
use crate::usecase::ports::identity::IdentityProvider;
use crate::usecase::ports::session_store::SessionStore;
use crate::usecase::ports::sheet_client::SheetClient;
use crate::usecase::services::edit_service::EditService;
use crate::usecase::services::query_service::QueryService;
use crate::usecase::services::session_service::SessionService;

/// Services shared by every screen, wired once at startup.
#[derive(Clone)]
pub struct Services {
    pub query: Arc<QueryService>,
    pub edit: Arc<EditService>,
    pub session: Arc<SessionService>,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.query, &other.query)
            && Arc::ptr_eq(&self.edit, &other.edit)
            && Arc::ptr_eq(&self.session, &other.session)
    }
}

impl Services {
    pub fn new(
        sheets: Arc<dyn SheetClient>,
        identity: Arc<dyn IdentityProvider>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            query: Arc::new(QueryService::new(sheets.clone())),
            edit: Arc::new(EditService::new(sheets)),
            session: Arc::new(SessionService::new(identity, sessions)),
        }
    }

    pub fn from_config(config: &AppConfig, session_path: PathBuf) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pacientes/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build http client")?;

        let auth = match &config.credential {
            SheetsCredential::ServiceAccount(path) => {
                let key = ServiceAccountKey::from_file(path).with_context(|| {
                    format!("failed to load service account: {}", path.display())
                })?;
                let tokens = TokenSource::new(key, http.clone());
                info!(account = tokens.client_email(), "using service account for sheets");
                SheetsAuth::ServiceAccount(tokens)
            }
            SheetsCredential::ApiKey(key) => {
                warn!("no service account configured; sheet writes will be refused");
                SheetsAuth::ApiKey(key.clone())
            }
        };

        let sheets = GoogleSheetsClient::new(http.clone(), &config.spreadsheet_id, &config.tab, auth);
        let identity = FirebaseAuth::new(http, &config.firebase_api_key);
        let sessions = FileSessionStore::new(session_path);

        Ok(Self::new(
            Arc::new(sheets),
            Arc::new(identity),
            Arc::new(sessions),
        ))
    }
}

#[derive(Clone)]
struct Startup {
    services: Services,
    page_size: usize,
}

fn startup() -> Result<Startup> {
    let config = AppConfig::load().context("failed to load configuration")?;
    let session_path = default_session_path()?;
    let services = Services::from_config(&config, session_path)?;
    info!(tab = %config.tab, page_size = config.page_size, "configuration loaded");
    Ok(Startup {
        services,
        page_size: config.page_size,
    })
}

#[component]
pub fn App() -> Element {
    let startup = use_hook(|| startup().map_err(|err| format!("{err:#}")));

    match startup {
        Ok(Startup { services, page_size }) => rsx! {
            Shell { services, page_size }
        },
        Err(err) => rsx! {
            div { style: "padding: 24px; font-family: sans-serif;",
                h3 { "Não foi possível iniciar o sistema" }
                p { "{err}" }
            }
        },
    }
}

#[component]
fn Shell(services: Services, page_size: usize) -> Element {
    let restore_from = services.session.clone();
    let session = use_signal(move || restore_from.restore(Utc::now()));
    let context = SessionContext::new(session, services.session.clone());
    let mut route = use_signal(|| Route::Home);

    match resolve(route(), context.is_signed_in()) {
        Route::Login => rsx! {
            LoginView {
                session: context,
                on_signed_in: move |_| route.set(Route::Dashboard),
            }
        },
        Route::Home | Route::Dashboard => rsx! {
            Dashboard { session: context, services, page_size }
        },
    }
}
