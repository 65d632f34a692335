//! Picks the single biggest issue with an ordered rule list; first match wins.

use serde::Serialize;

use crate::review::models::SignalSet;
use crate::review::profile::DocumentProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BiggestIssue {
    TargetRoleUnclear,
    DutiesNotImpact,
    MissingProjects,
    TightenFirstImpression,
}

impl BiggestIssue {
    pub fn message(self, profile: &DocumentProfile) -> &'static str {
        let texts = &profile.issues;
        match self {
            BiggestIssue::TargetRoleUnclear => texts.target_unclear,
            BiggestIssue::DutiesNotImpact => texts.duties_not_impact,
            BiggestIssue::MissingProjects => texts.missing_projects,
            BiggestIssue::TightenFirstImpression => texts.tighten_first_impression,
        }
    }
}

pub fn prioritize(signals: &SignalSet, target_role: Option<&str>) -> BiggestIssue {
    if target_role.is_none() && signals.detected_roles.is_empty() {
        BiggestIssue::TargetRoleUnclear
    } else if signals.metrics_count == 0 {
        BiggestIssue::DutiesNotImpact
    } else if !signals.has_projects {
        BiggestIssue::MissingProjects
    } else {
        BiggestIssue::TightenFirstImpression
    }
}
