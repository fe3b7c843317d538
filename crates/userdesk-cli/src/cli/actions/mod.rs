use anyhow::Result;
use secrecy::SecretString;
use tracing::warn;
use userdesk_client::HttpTransport;
use userdesk_config::{AppConfig, Session, SessionStore};
use userdesk_service::HttpUserService;

pub mod fields;
pub mod session;
pub mod users;

mod run;

pub use fields::UserFields;

/// Options of `list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub take: Option<u32>,
    pub search: Option<String>,
    pub trashed: bool,
}

#[derive(Debug)]
pub enum SessionAction {
    SetToken(SecretString),
    Clear,
    Show,
}

#[derive(Debug)]
pub enum Action {
    List(ListOptions),
    Show { uid: String },
    Me,
    Create(UserFields),
    Update { uid: String, fields: UserFields },
    Patch { uid: String, fields: UserFields },
    Delete { uid: String },
    Trash { uid: String },
    Restore { uid: String },
    Token { uid: String, expires_in: Option<u64> },
    Session(SessionAction),
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    /// Returns an error if the request fails or the output cannot be rendered
    pub async fn execute(self, context: &Context) -> Result<()> {
        run::execute(self, context).await
    }
}

/// Resolved configuration plus output preferences.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: AppConfig,
    pub json: bool,
}

impl Context {
    #[must_use]
    pub const fn new(config: AppConfig, json: bool) -> Self {
        Self { config, json }
    }

    /// Opens the session store named by the configuration.
    ///
    /// # Errors
    /// Returns an error if there is no location for the store
    pub fn session_store(&self) -> Result<SessionStore> {
        Ok(SessionStore::from_config(&self.config.session)?)
    }

    /// Builds the user service with the resolved session.
    ///
    /// # Errors
    /// Returns an error if the session store is unreadable or the transport
    /// cannot be built
    pub fn service(&self) -> Result<HttpUserService> {
        let store = match SessionStore::from_config(&self.config.session) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("Session store unavailable, using configured token only: {}", e);
                None
            }
        };
        let session = Session::resolve(&self.config.session, store.as_ref())?;
        let transport = HttpTransport::new(&self.config.api, session)?;
        Ok(HttpUserService::new(transport))
    }
}
