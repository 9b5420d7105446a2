use std::sync::Arc;

use exam_core::model::UserProfile;
use services::{
    AdminService, FileDownloader, GeneratorService, PaperLibraryService, PaperService,
    ProfileService, ResultsService, SubscriptionService, TransactionsService,
};

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn user(&self) -> Option<UserProfile>;

    fn papers(&self) -> Arc<dyn PaperService>;
    fn library(&self) -> Arc<PaperLibraryService>;
    fn generator(&self) -> Arc<GeneratorService>;
    fn results(&self) -> Arc<ResultsService>;
    fn subscriptions(&self) -> Arc<SubscriptionService>;
    fn transactions(&self) -> Arc<TransactionsService>;
    fn profile(&self) -> Arc<ProfileService>;
    fn admin(&self) -> Arc<AdminService>;
    fn downloader(&self) -> Arc<dyn FileDownloader>;
}

#[derive(Clone)]
pub struct AppContext {
    user: Option<UserProfile>,

    papers: Arc<dyn PaperService>,
    library: Arc<PaperLibraryService>,
    generator: Arc<GeneratorService>,
    results: Arc<ResultsService>,
    subscriptions: Arc<SubscriptionService>,
    transactions: Arc<TransactionsService>,
    profile: Arc<ProfileService>,
    admin: Arc<AdminService>,
    downloader: Arc<dyn FileDownloader>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            user: app.user(),
            papers: app.papers(),
            library: app.library(),
            generator: app.generator(),
            results: app.results(),
            subscriptions: app.subscriptions(),
            transactions: app.transactions(),
            profile: app.profile(),
            admin: app.admin(),
            downloader: app.downloader(),
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
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

    /// True when the signed-in user may open the admin panel.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }

    #[must_use]
    pub fn downloader(&self) -> Arc<dyn FileDownloader> {
        Arc::clone(&self.downloader)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
