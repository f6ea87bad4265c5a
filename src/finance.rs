//! Finance screen logic: bank-statement CSV upload and rejected-transaction
//! handling. Thin display-and-delegate layer; all matching happens
//! server-side.

use tracing::info;

use crate::client::{CsvUploadFeedback, RegistrationApi, RejectedTransaction};
use crate::error::Result;

/// Inline message when a file with the wrong extension is picked.
pub const CSV_FORMAT_ERROR: &str = "Die Datei muss im .csv-Format sein!";

/// Outcome of an upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Rejected locally; no request was made.
    InvalidFormat,
    Feedback(CsvUploadFeedback),
}

fn has_csv_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("csv"))
}

/// Uploads a bank statement export. Files without a `.csv` extension are
/// rejected before any network call.
pub async fn upload_statement(
    api: &dyn RegistrationApi,
    filename: &str,
    content: Vec<u8>,
) -> Result<UploadOutcome> {
    if !has_csv_extension(filename) {
        info!(filename, "rejected upload, not a csv file");
        return Ok(UploadOutcome::InvalidFormat);
    }
    let feedback = api.upload_payment_csv(filename, content).await?;
    Ok(UploadOutcome::Feedback(feedback))
}

/// User-facing feedback line for an upload outcome.
pub fn feedback_message(outcome: UploadOutcome) -> String {
    match outcome {
        UploadOutcome::InvalidFormat => CSV_FORMAT_ERROR.to_string(),
        UploadOutcome::Feedback(CsvUploadFeedback::Failed) => {
            "Die Datei konnte nicht verarbeitet werden!".to_string()
        }
        UploadOutcome::Feedback(CsvUploadFeedback::Accepted { confirmed, rejected }) => {
            format!(
                "Upload erfolgreich, {confirmed} Transaktionen bestätigt und {rejected} abgelehnt!"
            )
        }
    }
}

/// Transactions the server could not reconcile, including its opaque
/// duplicate flag.
pub async fn rejected_transactions(
    api: &dyn RegistrationApi,
) -> Result<Vec<RejectedTransaction>> {
    api.rejected_transactions().await
}

/// Deletes the selected faulty transactions.
pub async fn delete_transactions(api: &dyn RegistrationApi, ids: &[i64]) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    info!(count = ids.len(), "deleting rejected transactions");
    api.delete_rejected_transactions(ids).await
}
