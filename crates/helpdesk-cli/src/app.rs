//! Application state shared by every command.

use std::sync::Arc;

use anyhow::Result;
use helpdesk_core::{ApiClient, AuthService, Config, Services, SessionExpired, SessionStore};
use tracing::debug;

use crate::output::Output;
use crate::router::Router;

pub struct App {
    pub config: Config,
    pub api: ApiClient,
    pub auth: AuthService,
    pub services: Services,
    pub router: Router,
    pub output: Output,
}

impl App {
    /// Build the app from configuration, opening the configured session store
    pub fn new(config: Config, api_url_override: Option<String>, json: bool) -> Result<Self> {
        let store = config.open_session_store()?;
        Self::with_store(config, store, api_url_override, json)
    }

    pub fn with_store(
        config: Config,
        store: Arc<dyn SessionStore>,
        api_url_override: Option<String>,
        json: bool,
    ) -> Result<Self> {
        let base_url = api_url_override.unwrap_or_else(|| config.api_base_url());
        debug!(base_url = %base_url, backend = %config.session_backend(), "Creating API client");
        let api = ApiClient::with_timeout(&base_url, store, config.request_timeout())?;

        let router = Router::new();
        let output = Output::new(json);
        let listener_router = router.clone();
        api.on_session_expired(move |event: &SessionExpired| {
            if listener_router.navigate(event.redirect_to) && !output.is_json() {
                eprintln!("Session expired. Run `helpdesk login` to sign in again.");
            }
        });

        Ok(Self {
            auth: AuthService::new(api.clone()),
            services: Services::new(&api),
            config,
            api,
            router,
            output,
        })
    }
}
