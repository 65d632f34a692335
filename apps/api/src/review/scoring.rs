//! Scorer: signals → bounded sub-scores → weighted overall.
//!
//! Every dimension starts from a fixed base and moves by fixed point values per
//! signal. Each sub-score is clamped to 0–100 on its own before the overall is taken.

use crate::review::models::{Dimension, ScoreCard, SignalSet, SubScore};
use crate::review::profile::{DocumentKind, DocumentProfile};
use crate::review::signals::count_term;

const METRIC_POINTS: i32 = 10;
const METRIC_CAP: usize = 5;
const WEAK_PENALTY: i32 = 8;
const WEAK_CAP: usize = 4;

pub fn score(profile: &DocumentProfile, signals: &SignalSet, target_role: Option<&str>) -> ScoreCard {
    let sub_scores: Vec<SubScore> = profile
        .dimensions
        .iter()
        .map(|&(dimension, _, label)| SubScore {
            dimension,
            label,
            score: clamp_score(raw_score(profile.kind, dimension, signals, target_role)),
        })
        .collect();

    let weighted: f64 = sub_scores
        .iter()
        .zip(profile.dimensions)
        .map(|(sub, (_, weight, _))| f64::from(sub.score) * weight)
        .sum();
    let overall = weighted.round().clamp(0.0, 100.0) as u8;

    ScoreCard {
        sub_scores,
        overall,
    }
}

pub fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

fn raw_score(
    kind: DocumentKind,
    dimension: Dimension,
    s: &SignalSet,
    target_role: Option<&str>,
) -> i32 {
    match dimension {
        Dimension::RoleClarity => role_clarity(kind, s, target_role),
        Dimension::Projects => {
            20
                + points(s.has_projects, 40)
                + points(!s.detected_roles.is_empty(), 15)
                + points(s.metrics_count >= 2, 10)
                + points(s.has_skills, 10)
        }
        Dimension::ImpactBullets => {
            25 + METRIC_POINTS * s.metrics_count.min(METRIC_CAP) as i32
                - WEAK_PENALTY * s.weak_words_count.min(WEAK_CAP) as i32
                + points(s.has_experience, 10)
        }
        Dimension::SkillsCredibility => {
            30 + points(s.has_skills, 25)
                + points(!s.detected_roles.is_empty(), 15)
                + points(s.has_projects, 10)
                - points(s.weak_words_count >= 3, 10)
        }
        Dimension::AtsReadability => {
            40 + points(s.has_contact, 10)
                + points(s.has_education, 10)
                + points(s.has_experience, 10)
                + points(s.has_skills, 10)
                + points(s.bullet_lines >= 3, 10)
        }
        Dimension::Formatting => {
            50 + points(s.bullet_lines >= 3, 15)
                + points(s.has_contact, 10)
                + points((250..=900).contains(&s.word_count), 10)
                - points(s.word_count > 1100, 20)
        }
        Dimension::Completeness => {
            20 + points(s.has_summary, 16)
                + points(s.has_experience, 16)
                + points(s.has_education, 16)
                + points(s.has_skills, 16)
                + points(s.has_certifications, 16)
        }
    }
}

fn role_clarity(kind: DocumentKind, s: &SignalSet, target_role: Option<&str>) -> i32 {
    let mut raw = 30;
    raw += points(target_role.is_some(), 20);
    raw += points(!s.detected_roles.is_empty(), 15);
    raw += points(target_matches_top_role(s, target_role), 10);
    raw += points(s.has_summary, 10);
    raw -= points(s.multi_role_ambiguity, 20);
    if kind == DocumentKind::LinkedIn {
        raw -= points(s.weak_phrases.len() >= 2, 15);
    }
    raw
}

/// True when the stated target names the discipline the text leans toward.
pub fn target_matches_top_role(s: &SignalSet, target_role: Option<&str>) -> bool {
    match (target_role, s.top_role()) {
        (Some(target), Some(top)) => {
            count_term(&target.to_lowercase(), &top.to_lowercase()) > 0
        }
        _ => false,
    }
}

fn points(condition: bool, value: i32) -> i32 {
    if condition {
        value
    } else {
        0
    }
}
