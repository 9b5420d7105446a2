use serde::Deserialize;

use exam_core::model::Transaction;

use crate::api::{ApiClient, Credentials};
use crate::download::{DownloadedFile, FileDownloader};
use crate::error::{ApiError, DownloadError};

#[derive(Deserialize)]
pub(crate) struct TransactionsResponse {
    pub(crate) transactions: Vec<Transaction>,
}

/// Purchase history of the signed-in user and its PDF receipts.
#[derive(Clone)]
pub struct TransactionsService {
    api: ApiClient,
    credentials: Credentials,
}

impl TransactionsService {
    #[must_use]
    pub fn new(api: ApiClient, credentials: Credentials) -> Self {
        Self { api, credentials }
    }

    /// Newest first, as the backend sorts them.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list(&self) -> Result<Vec<Transaction>, ApiError> {
        let response: TransactionsResponse = self
            .api
            .get_json(&["transactions"], Some(&self.credentials))
            .await?;
        Ok(response.transactions)
    }

    /// Fetch the receipt PDF and store it as `Receipt_<number>.pdf`.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::Api` if the fetch fails, for example
    /// `ApiError::Forbidden` for someone else's transaction, and
    /// `DownloadError::Io` if the file cannot be stored.
    pub async fn download_receipt(
        &self,
        transaction: &Transaction,
        downloader: &dyn FileDownloader,
    ) -> Result<DownloadedFile, DownloadError> {
        let bytes = self
            .api
            .get_bytes(
                &["transactions", transaction.id.as_str(), "receipt"],
                Some(&self.credentials),
            )
            .await?;
        let file = downloader
            .save(&transaction.receipt_file_name(), &bytes)
            .await?;
        tracing::info!(transaction = %transaction.id, "receipt downloaded");
        Ok(file)
    }
}
