use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::review::profile::DocumentKind;

/// Text and optional target role for a single review request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInput {
    pub text: String,
    pub target_role: Option<String>,
}

impl DocumentInput {
    /// Blank target roles are treated as absent.
    pub fn new(text: impl Into<String>, target_role: Option<String>) -> Self {
        Self {
            text: text.into(),
            target_role: target_role
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        }
    }

    pub fn target_role(&self) -> Option<&str> {
        self.target_role.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    RoleClarity,
    Projects,
    ImpactBullets,
    SkillsCredibility,
    AtsReadability,
    Formatting,
    Completeness,
}

impl Dimension {
    pub fn key(self) -> &'static str {
        match self {
            Dimension::RoleClarity => "roleClarity",
            Dimension::Projects => "projects",
            Dimension::ImpactBullets => "impactBullets",
            Dimension::SkillsCredibility => "skillsCredibility",
            Dimension::AtsReadability => "atsReadability",
            Dimension::Formatting => "formatting",
            Dimension::Completeness => "completeness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    Close,
    NotReady,
}

impl Readiness {
    /// ≥80 ready, 65–79 close, below 65 not ready.
    pub fn from_overall(overall: u8) -> Self {
        match overall {
            80.. => Readiness::Ready,
            65..=79 => Readiness::Close,
            _ => Readiness::NotReady,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Readiness::Ready => "Ready",
            Readiness::Close => "Close",
            Readiness::NotReady => "Not ready",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleHit {
    pub role: &'static str,
    pub hits: usize,
}

/// Everything the detector found in one document. Built once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSet {
    pub has_contact: bool,
    pub has_summary: bool,
    pub has_education: bool,
    pub has_experience: bool,
    pub has_projects: bool,
    pub has_skills: bool,
    pub has_certifications: bool,
    pub metrics_count: usize,
    pub weak_words_count: usize,
    pub weak_phrases: Vec<&'static str>,
    pub detected_roles: Vec<RoleHit>,
    pub multi_role_ambiguity: bool,
    pub bullet_lines: usize,
    pub word_count: usize,
    pub headline: Option<String>,
}

impl SignalSet {
    pub fn top_role(&self) -> Option<&'static str> {
        self.detected_roles.first().map(|hit| hit.role)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubScore {
    pub dimension: Dimension,
    pub label: &'static str,
    pub score: u8,
}

/// Clamped sub-scores in profile order plus the weighted overall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCard {
    pub sub_scores: Vec<SubScore>,
    pub overall: u8,
}

impl ScoreCard {
    pub fn get(&self, dimension: Dimension) -> Option<u8> {
        self.sub_scores
            .iter()
            .find(|s| s.dimension == dimension)
            .map(|s| s.score)
    }
}

/// Serialized as `{ "roleClarity": 55, ... }`; the overall is reported separately.
impl Serialize for ScoreCard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sub_scores.len()))?;
        for sub in &self.sub_scores {
            map.serialize_entry(sub.dimension.key(), &sub.score)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionCritique {
    pub title: String,
    pub summary: String,
    pub findings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteExample {
    pub title: String,
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    pub label: String,
    pub action: String,
}

/// The finished critique. Rendered to HTML or serialized as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub kind: DocumentKind,
    pub title: String,
    pub readiness: Readiness,
    pub verdict: String,
    pub biggest_issue: String,
    pub reality_check: String,
    pub target_role: Option<String>,
    pub headline: Option<String>,
    pub overall: u8,
    pub score_breakdown: ScoreCard,
    pub signals: SignalSet,
    pub sections: Vec<SectionCritique>,
    pub rewrites: Vec<RewriteExample>,
    pub plan: Vec<PlanStep>,
    pub fix_before_applying: Vec<String>,
    pub closing: String,
}
