//! Top-N rankings over a finished ledger.

use crate::indexer::ledger::Ledger;
use crate::models::{Metric, RankedUser};

pub fn most_talkative(ledger: &Ledger, n: usize) -> Vec<RankedUser> {
    ledger.top_n(Metric::MessagesSent, n)
}

/// Ranked by messages carrying a reply reference, resolved or not.
pub fn most_replier(ledger: &Ledger, n: usize) -> Vec<RankedUser> {
    ledger.top_n(Metric::RepliesMade, n)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rankings {
    pub talkative: Vec<RankedUser>,
    pub repliers: Vec<RankedUser>,
    pub askers: Vec<RankedUser>,
    pub answerers: Vec<RankedUser>,
}

impl Rankings {
    /// Compute every ranking. The ledger is read-only here, so the four
    /// sorts run in parallel.
    pub fn compute(ledger: &Ledger, n: usize) -> Self {
        let ((talkative, repliers), (askers, answerers)) = rayon::join(
            || {
                rayon::join(
                    || most_talkative(ledger, n),
                    || most_replier(ledger, n),
                )
            },
            || {
                rayon::join(
                    || ledger.top_n(Metric::QuestionsAsked, n),
                    || ledger.top_n(Metric::AnswersGiven, n),
                )
            },
        );
        Self {
            talkative,
            repliers,
            askers,
            answerers,
        }
    }

    pub fn get(&self, metric: Metric) -> &[RankedUser] {
        match metric {
            Metric::MessagesSent => &self.talkative,
            Metric::RepliesMade => &self.repliers,
            Metric::QuestionsAsked => &self.askers,
            Metric::AnswersGiven => &self.answerers,
        }
    }
}
