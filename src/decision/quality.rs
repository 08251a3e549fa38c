//! Default decision maker: accept releases whose detected quality the
//! movie's profile allows, best rung of the ladder first.

use std::cmp::Reverse;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use super::{Decision, DecisionMaker, Rejection};
use crate::indexers::ReleaseInfo;
use crate::profiles::{Profile, ProfileStore, Quality};
use crate::search::SearchCriteria;

/// Decides on releases by quality alone.
///
/// Every release yields exactly one decision. Accepted releases sort before
/// rejected ones; within each group higher ladder positions come first, then
/// larger releases. Ties keep their input order.
pub struct QualityDecisionMaker {
    profiles: Arc<dyn ProfileStore>,
}

impl QualityDecisionMaker {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    fn evaluate(profile: &Profile, release: ReleaseInfo) -> Decision {
        let quality = Quality::parse(&release.title);

        if quality == Quality::Unknown {
            return Decision::reject(release, quality, vec![Rejection::permanent("Unknown quality")]);
        }

        if !profile.is_allowed(quality) {
            let reason = format!("{quality} is not wanted in profile '{}'", profile.name);
            return Decision::reject(release, quality, vec![Rejection::permanent(reason)]);
        }

        Decision::accept(release, quality)
    }
}

impl DecisionMaker for QualityDecisionMaker {
    fn search_decisions(
        &self,
        reports: Vec<ReleaseInfo>,
        criteria: &SearchCriteria,
    ) -> Result<Vec<Decision>> {
        let profile = self.profiles.get(criteria.movie().profile_id)?;
        let best = profile.last_allowed_quality()?;

        debug!(
            criteria = %criteria,
            profile = %profile.name,
            best = %best,
            cutoff = %profile.cutoff,
            count = reports.len(),
            "Evaluating releases"
        );

        let mut decisions: Vec<Decision> = reports
            .into_iter()
            .map(|release| Self::evaluate(&profile, release))
            .collect();

        decisions.sort_by_key(|d| {
            (
                Reverse(d.approved()),
                Reverse(profile.quality_index(d.quality)),
                Reverse(d.release.size),
            )
        });

        Ok(decisions)
    }
}
