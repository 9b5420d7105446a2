use std::sync::Arc;

use crate::admin_service::AdminService;
use crate::api::{ApiClient, ApiConfig, Credentials};
use crate::error::ApiError;
use crate::generator_service::GeneratorService;
use crate::library_service::PaperLibraryService;
use crate::paper_service::{HttpPaperService, PaperService};
use crate::profile_service::ProfileService;
use crate::results_service::ResultsService;
use crate::subscription_service::SubscriptionService;
use crate::transactions_service::TransactionsService;

/// Assembles the app-facing services for one signed-in user.
#[derive(Clone)]
pub struct AppServices {
    papers: Arc<dyn PaperService>,
    library: Arc<PaperLibraryService>,
    generator: Arc<GeneratorService>,
    results: Arc<ResultsService>,
    subscriptions: Arc<SubscriptionService>,
    transactions: Arc<TransactionsService>,
    profile: Arc<ProfileService>,
    admin: Arc<AdminService>,
}

impl AppServices {
    /// Build HTTP-backed services sharing one client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the API configuration is unusable.
    pub fn connect(config: &ApiConfig, credentials: Credentials) -> Result<Self, ApiError> {
        let api = ApiClient::new(config)?;
        Ok(Self::from_client(api, credentials))
    }

    #[must_use]
    pub fn from_client(api: ApiClient, credentials: Credentials) -> Self {
        tracing::debug!(base_url = %api.base_url(), "services ready");
        Self {
            papers: Arc::new(HttpPaperService::new(api.clone(), credentials.clone())),
            library: Arc::new(PaperLibraryService::new(api.clone(), credentials.clone())),
            generator: Arc::new(GeneratorService::new(api.clone(), credentials.clone())),
            results: Arc::new(ResultsService::new(api.clone(), credentials.clone())),
            subscriptions: Arc::new(SubscriptionService::new(api.clone())),
            transactions: Arc::new(TransactionsService::new(api.clone(), credentials.clone())),
            profile: Arc::new(ProfileService::new(api.clone(), credentials.clone())),
            admin: Arc::new(AdminService::new(api, credentials)),
        }
    }

    #[must_use]
    pub fn papers(&self) -> Arc<dyn PaperService> {
        Arc::clone(&self.papers)
    }

    #[must_use]
    pub fn library(&self) -> Arc<PaperLibraryService> {
        Arc::clone(&self.library)
    }

    #[must_use]
    pub fn generator(&self) -> Arc<GeneratorService> {
        Arc::clone(&self.generator)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }

    #[must_use]
    pub fn subscriptions(&self) -> Arc<SubscriptionService> {
        Arc::clone(&self.subscriptions)
    }

    #[must_use]
    pub fn transactions(&self) -> Arc<TransactionsService> {
        Arc::clone(&self.transactions)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }

    #[must_use]
    pub fn admin(&self) -> Arc<AdminService> {
        Arc::clone(&self.admin)
    }
}
