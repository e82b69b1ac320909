//! Shared state handed to every controller.
//!
//! Replaces ambient globals: the API client, the page boundary, the session
//! and the configuration travel together and are borrowed by controllers.

use std::sync::Arc;

use crate::api::{ApiError, HospitalApi, RestClient};
use crate::config::PortalConfig;
use crate::session::{FileStore, Session, StoreError};
use crate::ui::Ui;

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct PortalContext<A, U> {
    pub api: A,
    pub ui: U,
    pub session: Session,
    pub config: PortalConfig,
}

impl<A: HospitalApi, U: Ui> PortalContext<A, U> {
    pub fn new(api: A, ui: U, session: Session, config: PortalConfig) -> Self {
        Self {
            api,
            ui,
            session,
            config,
        }
    }
}

impl<U: Ui> PortalContext<RestClient, U> {
    /// Production wiring: REST client and file-backed session from `config`.
    pub fn from_config(ui: U, config: PortalConfig) -> Result<Self, ContextError> {
        let api = RestClient::from_config(&config)?;
        let store = FileStore::open(&config.session_file)?;
        tracing::info!(
            base_url = %api.base_url(),
            session_file = %config.session_file.display(),
            "Portal context ready"
        );
        Ok(Self::new(api, ui, Session::new(Arc::new(store)), config))
    }
}
