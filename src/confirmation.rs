//! Confirmation stage (right after submit) and the durable status stage.

use tracing::info;

use crate::client::{RegistrationApi, RegistrationResult, RunnerStatus};
use crate::config::EventConfig;
use crate::error::{PaceError, Result};
use crate::session::RunnerSessionContext;

/// Bank transfer details rendered after a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInstructions {
    pub total_due: u32,
    pub account_holder: String,
    pub bank_name: String,
    pub iban: String,
    pub bic: String,
    pub reason_for_payment: String,
}

impl PaymentInstructions {
    fn new(event: &EventConfig, total_due: u32, reason_for_payment: String) -> Self {
        Self {
            total_due,
            account_holder: event.account_holder.clone(),
            bank_name: event.bank_name.clone(),
            iban: event.iban.clone(),
            bic: event.bic.clone(),
            reason_for_payment,
        }
    }
}

pub struct ConfirmationStage {
    result: RegistrationResult,
}

impl ConfirmationStage {
    /// Reads the registration result from the session context; the context
    /// itself falls back to its shadow copy, so a reload keeps this page
    /// alive. `None` only when no registration was completed at all.
    pub fn load(session: &mut RunnerSessionContext) -> Option<Self> {
        session.get_result().cloned().map(|result| Self { result })
    }

    pub fn result(&self) -> &RegistrationResult {
        &self.result
    }

    pub fn payment_instructions(&self, event: &EventConfig) -> PaymentInstructions {
        PaymentInstructions::new(
            event,
            self.result.total_due(),
            self.result.reason_for_payment.clone(),
        )
    }

    /// Durable deep link for later status lookups. This link, not a login
    /// session, is the registrant's long-term access credential.
    pub fn status_link(&self) -> String {
        format!(
            "/status?runner_id={}&start_number={}&verification_code={}",
            self.result.runner_id, self.result.start_number, self.result.verification_code
        )
    }

    /// Whether to mention the confirmation mail that went out.
    pub fn email_provided(&self) -> bool {
        self.result.email_provided
    }
}

/// What the status page renders.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusView {
    /// Unknown runner or wrong verification code; nothing partial is shown.
    NotFound,
    Found(StatusPage),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusPage {
    status: RunnerStatus,
}

/// Shirt block of the status page, present only when a shirt was booked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShirtStatus {
    pub model: String,
    pub size: String,
    pub address_lines: Vec<String>,
    pub delivery_status: String,
}

impl StatusPage {
    pub fn start_number(&self) -> i64 {
        self.status.start_number
    }

    pub fn is_paid(&self) -> bool {
        self.status.is_paid
    }

    /// Transfer details, rendered only while the payment is outstanding.
    pub fn payment_instructions(&self, event: &EventConfig) -> Option<PaymentInstructions> {
        if self.status.is_paid {
            return None;
        }
        let total = amount(&self.status.donation) + amount(&self.status.tshirt_cost);
        Some(PaymentInstructions::new(
            event,
            total,
            self.status.payment.clone(),
        ))
    }

    pub fn payment_status_label(&self) -> &'static str {
        if self.status.is_paid {
            "Schon bezahlt"
        } else {
            "Ausstehend"
        }
    }

    pub fn shirt_status(&self) -> Option<ShirtStatus> {
        if !self.status.is_tshirt_booked {
            return None;
        }
        let s = &self.status;
        let mut address_lines = vec![
            format!("{} {}", s.address_firstname, s.address_lastname),
            format!("{} {}", s.street_name, s.house_number),
        ];
        if !s.address_extra.is_empty() {
            address_lines.push(s.address_extra.clone());
        }
        address_lines.push(format!("{} {}", s.postal_code, s.city));
        address_lines.push(s.country.clone());
        Some(ShirtStatus {
            model: model_label(&s.tshirt_model),
            size: s.tshirt_size.to_uppercase(),
            address_lines,
            delivery_status: s.delivery_status.clone(),
        })
    }
}

fn amount(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

fn model_label(wire: &str) -> String {
    match wire.parse::<crate::options::ShirtModel>() {
        Ok(model) => model.label().to_string(),
        Err(_) => wire.to_string(),
    }
}

/// Performs the one status fetch for the durable link. Any non-200 from the
/// backend renders as not-found; only transport-level failures bubble up.
pub async fn lookup_status(
    api: &dyn RegistrationApi,
    runner_id: &str,
    verification_code: &str,
) -> Result<StatusView> {
    match api.runner_status(runner_id, verification_code).await {
        Ok(status) => {
            info!(runner_id, "status lookup succeeded");
            Ok(StatusView::Found(StatusPage { status }))
        }
        Err(PaceError::Api { status }) => {
            info!(runner_id, status, "status lookup rejected, rendering not-found");
            Ok(StatusView::NotFound)
        }
        Err(err) => Err(err),
    }
}
