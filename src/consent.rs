use crate::draft::LeadDraft;

/// Fixed reason surfaced when submission is attempted without consent.
pub const CONSENT_MESSAGE: &str = "Please provide consent to process your data";

/// Outcome of the consent check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentDecision {
    Allowed,
    Blocked(&'static str),
}

/// Pure gate over the draft's consent flag. Must run before any network
/// call; a `Blocked` result short-circuits submission entirely.
pub fn check(draft: &LeadDraft) -> ConsentDecision {
    if draft.consent {
        ConsentDecision::Allowed
    } else {
        ConsentDecision::Blocked(CONSENT_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_without_consent() {
        let draft = LeadDraft::default();
        assert_eq!(check(&draft), ConsentDecision::Blocked(CONSENT_MESSAGE));
    }

    #[test]
    fn allows_with_consent() {
        let mut draft = LeadDraft::default();
        draft.consent = true;
        assert_eq!(check(&draft), ConsentDecision::Allowed);
    }
}
