use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;

use exam_core::model::{PaperId, PaperSummary};

use crate::api::{ApiClient, Credentials};
use crate::download::{DownloadedFile, FileDownloader};
use crate::error::{ApiError, DownloadError};

/// Which PDF of a paper to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadVariant {
    Paper,
    AnswerKey,
}

impl DownloadVariant {
    fn endpoint(self) -> &'static str {
        match self {
            DownloadVariant::Paper => "download",
            DownloadVariant::AnswerKey => "download-answers",
        }
    }

    /// Toast shown once the file is stored.
    #[must_use]
    pub fn success_message(self) -> &'static str {
        match self {
            DownloadVariant::Paper => "Paper downloaded successfully!",
            DownloadVariant::AnswerKey => "Answer key downloaded!",
        }
    }

    /// File name for `title`: anything outside `[A-Za-z0-9]` becomes `_`.
    #[must_use]
    pub fn file_name(self, title: &str) -> String {
        let stem: String = title
            .chars()
            .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
            .collect();
        match self {
            DownloadVariant::Paper => format!("{stem}.pdf"),
            DownloadVariant::AnswerKey => format!("{stem}_Answer_Key.pdf"),
        }
    }
}

#[derive(Deserialize)]
struct PapersResponse {
    papers: Vec<PaperSummary>,
}

type InFlight = Arc<Mutex<HashSet<(PaperId, DownloadVariant)>>>;

/// The user's generated papers: listing, deletion and PDF downloads.
#[derive(Clone)]
pub struct PaperLibraryService {
    api: ApiClient,
    credentials: Credentials,
    in_flight: InFlight,
}

impl PaperLibraryService {
    #[must_use]
    pub fn new(api: ApiClient, credentials: Credentials) -> Self {
        Self {
            api,
            credentials,
            in_flight: Arc::default(),
        }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list(&self) -> Result<Vec<PaperSummary>, ApiError> {
        let response: PapersResponse = self
            .api
            .get_json(&["papers"], Some(&self.credentials))
            .await?;
        Ok(response.papers)
    }

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the paper is already gone.
    pub async fn delete(&self, paper_id: &PaperId) -> Result<(), ApiError> {
        self.api
            .delete(&["papers", paper_id.as_str()], Some(&self.credentials))
            .await?;
        tracing::info!(%paper_id, "paper deleted");
        Ok(())
    }

    /// Fetch a PDF and hand it to `downloader`.
    ///
    /// At most one download per paper and variant runs at a time.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::InProgress` while the same download is running,
    /// `DownloadError::Api` if the fetch fails and `DownloadError::Io` if the
    /// file cannot be stored.
    pub async fn download(
        &self,
        paper_id: &PaperId,
        title: &str,
        variant: DownloadVariant,
        downloader: &dyn FileDownloader,
    ) -> Result<DownloadedFile, DownloadError> {
        let _guard = InFlightGuard::acquire(&self.in_flight, paper_id, variant)?;

        let bytes = self
            .api
            .get_bytes(
                &["papers", paper_id.as_str(), variant.endpoint()],
                Some(&self.credentials),
            )
            .await?;
        downloader.save(&variant.file_name(title), &bytes).await
    }
}

struct InFlightGuard {
    set: InFlight,
    key: (PaperId, DownloadVariant),
}

impl InFlightGuard {
    fn acquire(
        set: &InFlight,
        paper_id: &PaperId,
        variant: DownloadVariant,
    ) -> Result<Self, DownloadError> {
        let key = (paper_id.clone(), variant);
        let inserted = set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone());
        if !inserted {
            tracing::debug!(%paper_id, ?variant, "download already running");
            return Err(DownloadError::InProgress);
        }
        Ok(Self {
            set: Arc::clone(set),
            key,
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
