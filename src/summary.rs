//! Summary stage: recap, edit-back, and the actual submission.

use tracing::{info, warn};

use crate::client::{RegistrationApi, RegistrationRequest, RegistrationResult};
use crate::draft::{DraftFields, Merchandise, RegistrationDraft};
use crate::error::Result;
use crate::options::Selection;
use crate::pricing::{self, SHIRT_BASE_PRICE};
use crate::session::RunnerSessionContext;
use crate::store::DraftStore;

/// Human-readable recap of the draft, section by section. The shirt and
/// shipping sections exist only when merchandise was booked.
#[derive(Debug, Clone, PartialEq)]
pub struct Recap {
    pub personal: Vec<String>,
    pub shirt: Option<Vec<String>>,
    pub shipping_address: Option<Vec<String>>,
    pub costs: Vec<String>,
    pub total_line: String,
}

pub struct SummaryStage {
    draft: RegistrationDraft,
}

impl SummaryStage {
    pub fn new(draft: RegistrationDraft) -> Self {
        Self { draft }
    }

    /// Reads the draft back from the store, e.g. after a reload on the
    /// summary page. `None` when there is nothing valid to summarize.
    pub fn load(store: &mut DraftStore) -> Option<Self> {
        store.frozen_draft().map(Self::new)
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Recomputed total. The pricing rule is applied once more as a
    /// cross-check against the cost frozen into the draft.
    pub fn total_due(&self) -> u32 {
        let recomputed = match &self.draft.merchandise {
            Merchandise::None => 0,
            Merchandise::Shirt(order) => {
                pricing::shirt_cost(true, Selection::Chosen(order.region))
            }
        };
        if recomputed != self.draft.shirt_cost() {
            warn!(
                frozen = self.draft.shirt_cost(),
                recomputed, "shirt cost mismatch, using recomputed value"
            );
        }
        self.draft.donation + recomputed
    }

    pub fn recap(&self) -> Recap {
        let draft = &self.draft;
        let mut personal = vec![
            format!(
                "Name: {} {}",
                draft.firstname.as_deref().unwrap_or_default(),
                draft.lastname.as_deref().unwrap_or_default()
            ),
            format!("Team: {}", draft.team.as_deref().unwrap_or_default()),
            format!("E-Mail: {}", draft.email.as_deref().unwrap_or_default()),
            format!("Startort: {}", draft.starting_point.short_label()),
            format!("Laufniveau: {}.", draft.running_level.label()),
        ];
        if draft.bsv_participant {
            personal.push("BSV-Teilnahme: Ja".to_string());
        }

        let (shirt, shipping_address) = match draft.shirt_order() {
            None => (None, None),
            Some(order) => {
                let shirt = vec![
                    format!("Modell: {}", order.model.label()),
                    format!("Größe: {}", order.size.label()),
                ];
                let mut address = vec![
                    format!("{} {}", order.address.firstname, order.address.lastname),
                    format!("{} {}", order.address.street_name, order.address.house_number),
                ];
                if let Some(extra) = &order.address.extra {
                    address.push(extra.clone());
                }
                address.push(format!("{} {}", order.address.postal_code, order.address.city));
                address.push(order.country.clone());
                (Some(shirt), Some(address))
            }
        };

        let mut costs = vec![format!("Spendenbeitrag: {}€", draft.donation)];
        if let Some(order) = draft.shirt_order() {
            costs.push(format!("T-Shirt-Kosten: {SHIRT_BASE_PRICE}€"));
            // Surcharge shown separately even though the calculator returns
            // the combined figure.
            let surcharge = order.cost - SHIRT_BASE_PRICE;
            if surcharge > 0 {
                costs.push(format!("Versandkosten: {surcharge}€"));
            } else {
                costs.push("Versand: kostenlos (innerhalb Deutschland)".to_string());
            }
        }

        Recap {
            personal,
            shirt,
            shipping_address,
            costs,
            total_line: format!("Zu zahlen: {}€", self.total_due()),
        }
    }

    /// Hands the draft back for editing; nothing is cleared, so the form
    /// restores exactly the values shown here.
    pub fn edit(&self) -> DraftFields {
        self.draft.thaw()
    }

    /// Submits the draft to the registration API. The exclusive borrow keeps
    /// a second confirm from starting while one is outstanding; dropping the
    /// returned future abandons the request and leaves the stage usable. On
    /// success the draft's shadow copy is cleared and the result lands in the
    /// runner session context; on failure the stage stays as is for a manual
    /// retry.
    pub async fn confirm(
        &mut self,
        api: &dyn RegistrationApi,
        store: &mut DraftStore,
        session: &mut RunnerSessionContext,
    ) -> Result<RegistrationResult> {
        let request = RegistrationRequest::from(&self.draft);
        match api.submit_registration(&request).await {
            Ok(result) => {
                info!(runner_id = %result.runner_id, "registration submitted");
                store.clear();
                session.set_result(result.clone())?;
                Ok(result)
            }
            Err(err) => {
                warn!(%err, "registration submission failed");
                Err(err)
            }
        }
    }
}
