use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::{
    config::Config,
    libraries::proximity::ProximitySearch,
    services::{
        admin::AdminAllowList,
        catalog::Catalog,
        kv_store::{FileStore, KeyValueStore},
        request_store::RequestStore,
        search_session::SearchSession,
    },
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub search: Arc<SearchSession>,
    pub requests: Arc<RequestStore>,
    pub admins: Arc<AdminAllowList>,
}

impl AppState {
    /// Assemble state from already constructed collaborators
    pub fn new(
        config: Config,
        catalog: Catalog,
        requests: RequestStore,
    ) -> Result<Self> {
        let reference = config
            .reference_point()
            .context("Reference location is invalid")?;

        let catalog = Arc::new(catalog);
        let search = SearchSession::new(
            Arc::clone(&catalog),
            ProximitySearch::new(reference),
            config.location_timeout(),
        );
        let admins = AdminAllowList::new(config.admin_user_ids.iter().cloned());

        Ok(Self {
            config,
            catalog,
            search: Arc::new(search),
            requests: Arc::new(requests),
            admins: Arc::new(admins),
        })
    }

    /// Load the catalog and the request store described by `config`
    pub async fn initialize(config: Config) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_file(path)
                .await
                .with_context(|| format!("Failed to load catalog from {}", path))?,
            None => Catalog::embedded().context("Embedded catalog is invalid")?,
        };
        info!("Catalog ready with {} points", catalog.len());

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.data_dir));
        let requests = RequestStore::load(store)
            .await
            .context("Failed to load stored requests")?;

        let state = Self::new(config, catalog, requests)?;
        info!("{} administrators configured", state.admins.len());

        Ok(state)
    }
}
