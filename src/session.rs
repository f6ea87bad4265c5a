//! Runner session context: the just-created registration result.
//!
//! Separate from the draft store, with its own shadow copy, so reloading the
//! confirmation page keeps the server-assigned identifiers even though the
//! draft itself is already gone.

use std::path::Path;

use crate::client::RegistrationResult;
use crate::error::Result;
use crate::store::{RESULT_KEY, ShadowSlot};

pub struct RunnerSessionContext {
    slot: Option<RegistrationResult>,
    shadow: ShadowSlot<RegistrationResult>,
}

impl RunnerSessionContext {
    pub fn new(storage_dir: &Path) -> Self {
        Self {
            slot: None,
            shadow: ShadowSlot::new(storage_dir, RESULT_KEY),
        }
    }

    /// Stores the result, flushing the shadow copy before returning.
    pub fn set_result(&mut self, result: RegistrationResult) -> Result<()> {
        self.shadow.save(&result)?;
        self.slot = Some(result);
        Ok(())
    }

    /// Current result, rehydrated from the shadow copy after a reload.
    pub fn get_result(&mut self) -> Option<&RegistrationResult> {
        if self.slot.is_none() {
            self.slot = self.shadow.load();
        }
        self.slot.as_ref()
    }

    pub fn clear(&mut self) {
        self.slot = None;
        self.shadow.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn result() -> RegistrationResult {
        RegistrationResult {
            runner_id: "42".into(),
            start_number: 101,
            donation: "10".into(),
            tshirt_cost: "0".into(),
            reason_for_payment: "LGR-AB123".into(),
            verification_code: "s3cret".into(),
            email_provided: false,
        }
    }

    #[test]
    fn result_survives_a_reload() {
        let dir = tempdir().unwrap();
        let mut session = RunnerSessionContext::new(dir.path());
        session.set_result(result()).unwrap();

        let mut reloaded = RunnerSessionContext::new(dir.path());
        assert_eq!(reloaded.get_result(), Some(&result()));
    }

    #[test]
    fn result_shadow_is_independent_from_the_draft_shadow() {
        let dir = tempdir().unwrap();
        let mut session = RunnerSessionContext::new(dir.path());
        session.set_result(result()).unwrap();

        let mut drafts = crate::store::DraftStore::new(dir.path());
        assert_eq!(drafts.get_draft(), None);
        drafts.clear();

        let mut reloaded = RunnerSessionContext::new(dir.path());
        assert_eq!(reloaded.get_result(), Some(&result()));
    }
}
