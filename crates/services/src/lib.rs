#![forbid(unsafe_code)]

pub mod admin_service;
pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod download;
pub mod error;
pub mod generator_service;
pub mod library_service;
pub mod notify;
pub mod paper_service;
pub mod profile_service;
pub mod quiz;
pub mod results_service;
pub mod subscription_service;
pub mod transactions_service;

pub use admin_service::AdminService;
pub use api::{ApiClient, ApiConfig, Credentials};
pub use app_services::AppServices;
pub use auth_service::{AuthService, AuthSession, SignupForm};
pub use download::{DownloadedFile, FileDownloader, FsDownloader};
pub use error::{AdminError, ApiError, AuthError, DownloadError, GeneratorError, QuizError};
pub use generator_service::GeneratorService;
pub use library_service::{DownloadVariant, PaperLibraryService};
pub use notify::{LogSink, NotificationSink};
pub use paper_service::{HttpPaperService, PaperService};
pub use profile_service::ProfileService;
pub use quiz::{PendingSubmission, QuizPhase, QuizSession};
pub use results_service::ResultsService;
pub use subscription_service::SubscriptionService;
pub use transactions_service::TransactionsService;
