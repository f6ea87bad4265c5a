//! Backend API client.
//!
//! [`RegistrationApi`] is the seam between the flow stages and the HTTP
//! backend; stages only ever see the trait, tests swap in mocks. [`HttpApi`]
//! is the reqwest implementation. Wire field names match the backend 1:1.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::draft::{Merchandise, RegistrationDraft};
use crate::error::{PaceError, Result};

/// Registration payload as posted to `POST /api/runners`. Toggles serialize
/// the way the backend expects them: `"on"`/`"off"`, with `"null"` as the
/// not-chosen sentinel for dropdowns that were never shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub firstname: String,
    pub lastname: String,
    pub team: String,
    pub email: String,
    pub repeat: String,
    pub starting_point: String,
    pub running_level: String,
    pub donation: String,
    pub confirm: String,
    pub bsv_participant: bool,

    pub tshirt_toggle: String,
    pub tshirt_model: String,
    pub tshirt_size: String,
    pub country: String,
    pub address_firstname: String,
    pub address_lastname: String,
    pub street_name: String,
    pub house_number: String,
    pub address_extra: String,
    pub postal_code: String,
    pub city: String,
}

impl From<&RegistrationDraft> for RegistrationRequest {
    fn from(draft: &RegistrationDraft) -> Self {
        let email = draft.email.clone().unwrap_or_default();
        let mut request = Self {
            firstname: draft.firstname.clone().unwrap_or_default(),
            lastname: draft.lastname.clone().unwrap_or_default(),
            team: draft.team.clone().unwrap_or_default(),
            repeat: email.clone(),
            email,
            starting_point: draft.starting_point.as_str().to_string(),
            running_level: draft.running_level.as_str().to_string(),
            donation: draft.donation.to_string(),
            confirm: "on".to_string(),
            bsv_participant: draft.bsv_participant,
            tshirt_toggle: "off".to_string(),
            tshirt_model: "null".to_string(),
            tshirt_size: "null".to_string(),
            country: String::new(),
            address_firstname: String::new(),
            address_lastname: String::new(),
            street_name: String::new(),
            house_number: String::new(),
            address_extra: String::new(),
            postal_code: String::new(),
            city: String::new(),
        };
        if let Merchandise::Shirt(order) = &draft.merchandise {
            request.tshirt_toggle = "on".to_string();
            request.tshirt_model = order.model.as_str().to_string();
            request.tshirt_size = order.size.as_str().to_string();
            request.country = order.country.clone();
            request.address_firstname = order.address.firstname.clone();
            request.address_lastname = order.address.lastname.clone();
            request.street_name = order.address.street_name.clone();
            request.house_number = order.address.house_number.clone();
            request.address_extra = order.address.extra.clone().unwrap_or_default();
            request.postal_code = order.address.postal_code.clone();
            request.city = order.address.city.clone();
        }
        request
    }
}

/// Server-assigned outcome of a successful registration. Immutable once
/// received; `runner_id` + `start_number` + `verification_code` build the
/// durable status link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResult {
    pub runner_id: String,
    pub start_number: i64,
    pub donation: String,
    pub tshirt_cost: String,
    pub reason_for_payment: String,
    pub verification_code: String,
    pub email_provided: bool,
}

impl RegistrationResult {
    /// Donation plus shirt cost. The backend sends both as strings; anything
    /// unparseable counts as zero rather than failing the render.
    pub fn total_due(&self) -> u32 {
        parse_amount(&self.donation) + parse_amount(&self.tshirt_cost)
    }
}

fn parse_amount(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Payment and delivery state for the status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerStatus {
    pub runner_id: String,
    pub start_number: i64,
    pub donation: String,
    pub tshirt_cost: String,
    pub payment: String,
    pub is_paid: bool,

    pub is_tshirt_booked: bool,
    #[serde(default)]
    pub tshirt_model: String,
    #[serde(default)]
    pub tshirt_size: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub address_firstname: String,
    #[serde(default)]
    pub address_lastname: String,
    #[serde(default)]
    pub street_name: String,
    #[serde(default)]
    pub house_number: String,
    #[serde(default)]
    pub address_extra: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub delivery_status: String,
}

/// Site-wide flags from `GET /api/theme`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    pub event_title: String,
    pub event_description: String,
    pub closed_registration_message: String,
    pub is_registration_open: bool,
    pub tshirts_enabled: bool,
}

/// Outcome of a bank-statement CSV upload, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvUploadFeedback {
    /// Server could not process the file.
    Failed,
    Accepted { confirmed: u64, rejected: u64 },
}

impl CsvUploadFeedback {
    /// The wire format is a bare pair; a leading -1 signals a failed parse.
    fn from_wire(values: &[i64]) -> Self {
        match values {
            [confirmed, rejected, ..] if *confirmed >= 0 => CsvUploadFeedback::Accepted {
                confirmed: *confirmed as u64,
                rejected: *rejected as u64,
            },
            _ => CsvUploadFeedback::Failed,
        }
    }
}

/// A bank transaction the server could not match to a registration.
/// `possible_duplicate` is computed server-side and passed through opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedTransaction {
    pub id: i64,
    pub runner_ids: String,
    pub reasons_for_payment: String,
    pub payment_amount: String,
    pub expected_amount: String,
    pub currency: String,
    pub date_of_payment: String,
    pub payer_name: String,
    pub iban: String,
    #[serde(default)]
    pub possible_duplicate: bool,
}

/// The external Registration API, one method per backend endpoint.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    async fn submit_registration(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResult>;

    async fn runner_status(
        &self,
        runner_id: &str,
        verification_code: &str,
    ) -> Result<RunnerStatus>;

    async fn theme(&self) -> Result<ThemeSettings>;

    async fn upload_payment_csv(&self, filename: &str, content: Vec<u8>)
    -> Result<CsvUploadFeedback>;

    async fn rejected_transactions(&self) -> Result<Vec<RejectedTransaction>>;

    async fn delete_rejected_transactions(&self, ids: &[i64]) -> Result<()>;
}

/// reqwest-based implementation against the configured backend.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn check_status(response: &reqwest::Response) -> Result<()> {
    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), url = %response.url(), "backend returned an error");
        return Err(PaceError::Api {
            status: status.as_u16(),
        });
    }
    Ok(())
}

#[async_trait]
impl RegistrationApi for HttpApi {
    async fn submit_registration(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResult> {
        let response = self
            .http
            .post(self.url("/api/runners"))
            .json(request)
            .send()
            .await?;
        check_status(&response)?;
        let result: RegistrationResult = response.json().await?;
        info!(runner_id = %result.runner_id, "registration accepted");
        Ok(result)
    }

    async fn runner_status(
        &self,
        runner_id: &str,
        verification_code: &str,
    ) -> Result<RunnerStatus> {
        let response = self
            .http
            .get(self.url(&format!("/api/runners/{runner_id}")))
            .query(&[("verification_code", verification_code)])
            .send()
            .await?;
        check_status(&response)?;
        Ok(response.json().await?)
    }

    async fn theme(&self) -> Result<ThemeSettings> {
        let response = self.http.get(self.url("/api/theme")).send().await?;
        check_status(&response)?;
        Ok(response.json().await?)
    }

    async fn upload_payment_csv(
        &self,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<CsvUploadFeedback> {
        let response = self
            .http
            .post(self.url("/api/payments"))
            .query(&[("filename", filename)])
            .body(content)
            .send()
            .await?;
        check_status(&response)?;
        let values: Vec<i64> = response.json().await?;
        Ok(CsvUploadFeedback::from_wire(&values))
    }

    async fn rejected_transactions(&self) -> Result<Vec<RejectedTransaction>> {
        let response = self
            .http
            .get(self.url("/api/rejected_transactions"))
            .send()
            .await?;
        check_status(&response)?;
        Ok(response.json().await?)
    }

    async fn delete_rejected_transactions(&self, ids: &[i64]) -> Result<()> {
        let response = self
            .http
            .delete(self.url("/api/rejected_transactions"))
            .json(&ids)
            .send()
            .await?;
        check_status(&response)
    }
}
