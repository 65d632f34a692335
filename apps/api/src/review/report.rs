//! Report assembly: fills the profile's templates from signals, scores and the issue.

use crate::errors::ReviewError;
use crate::review::issues::BiggestIssue;
use crate::review::models::{
    DocumentInput, PlanStep, Readiness, Report, RewriteExample, ScoreCard, SectionCritique,
    SignalSet,
};
use crate::review::profile::{CritiqueSection, DocumentKind, DocumentProfile};
use crate::review::scoring::target_matches_top_role;

const BLANK: &str = "____";
const FIX_LIST_LIMIT: usize = 3;
const THIN_WORD_COUNT: usize = 150;
const LONG_WORD_COUNT: usize = 900;

pub fn build_report(
    profile: &DocumentProfile,
    input: &DocumentInput,
    signals: &SignalSet,
    card: &ScoreCard,
    issue: BiggestIssue,
) -> Result<Report, ReviewError> {
    check_score_card(profile, card)?;

    let readiness = Readiness::from_overall(card.overall);
    let target_role = input.target_role();

    let sections: Vec<SectionCritique> = profile
        .critiques
        .iter()
        .filter_map(|template| {
            let findings = findings_for(template.section, profile.kind, signals, target_role);
            (!findings.is_empty()).then(|| SectionCritique {
                title: template.title.to_string(),
                summary: template.summary.to_string(),
                findings,
            })
        })
        .collect();

    let fix_before_applying = sections
        .iter()
        .take(FIX_LIST_LIMIT)
        .map(|s| s.title.clone())
        .collect();

    let role = role_placeholder(signals, target_role);
    let rewrites = profile
        .rewrites
        .iter()
        .map(|r| RewriteExample {
            title: r.title.to_string(),
            template: r.template.replace("{role}", &role),
        })
        .collect();

    let plan = profile
        .plan
        .iter()
        .enumerate()
        .map(|(i, action)| PlanStep {
            label: format!("{} {}", profile.plan_label, i + 1),
            action: action.to_string(),
        })
        .collect();

    Ok(Report {
        kind: profile.kind,
        title: profile.title.to_string(),
        readiness,
        verdict: profile.verdicts.for_tier(readiness).to_string(),
        biggest_issue: issue.message(profile).to_string(),
        reality_check: profile.reality_check.to_string(),
        target_role: target_role.map(str::to_string),
        headline: signals.headline.clone(),
        overall: card.overall,
        score_breakdown: card.clone(),
        signals: signals.clone(),
        sections,
        rewrites,
        plan,
        fix_before_applying,
        closing: profile.closing.to_string(),
    })
}

fn check_score_card(profile: &DocumentProfile, card: &ScoreCard) -> Result<(), ReviewError> {
    if card.overall > 100 {
        return Err(ReviewError::MalformedScoreCard(format!(
            "overall {} out of range",
            card.overall
        )));
    }
    for (dimension, _, _) in profile.dimensions {
        match card.get(*dimension) {
            Some(score) if score <= 100 => {}
            Some(score) => {
                return Err(ReviewError::MalformedScoreCard(format!(
                    "{} = {score} out of range",
                    dimension.key()
                )))
            }
            None => {
                return Err(ReviewError::MalformedScoreCard(format!(
                    "missing {}",
                    dimension.key()
                )))
            }
        }
    }
    Ok(())
}

/// Target role, else the strongest detected discipline, else a blank.
fn role_placeholder(signals: &SignalSet, target_role: Option<&str>) -> String {
    match (target_role, signals.top_role()) {
        (Some(target), _) => target.to_string(),
        (None, Some(top)) => format!("{top} Engineer"),
        (None, None) => BLANK.to_string(),
    }
}

fn findings_for(
    section: CritiqueSection,
    kind: DocumentKind,
    s: &SignalSet,
    target_role: Option<&str>,
) -> Vec<String> {
    let mut findings = Vec::new();
    match section {
        CritiqueSection::Header => {
            if !s.has_contact {
                findings.push(
                    "No email or phone number found near the top. Make it easy to reach you."
                        .to_string(),
                );
            }
        }
        CritiqueSection::Positioning => {
            match target_role {
                None => findings.push(
                    "No target role was given. Decide on one before you polish anything else."
                        .to_string(),
                ),
                Some(target) => {
                    if let Some(top) = s.top_role() {
                        if !target_matches_top_role(s, Some(target)) {
                            findings.push(format!(
                                "Your target is \"{target}\", but the content leans {top}. Make the target role's work the most visible."
                            ));
                        }
                    }
                }
            }
            if s.detected_roles.is_empty() {
                findings.push(
                    "No engineering discipline stands out from the content. Name your tools and domain."
                        .to_string(),
                );
            }
            if s.multi_role_ambiguity {
                let names: Vec<&str> = s.detected_roles.iter().take(3).map(|r| r.role).collect();
                findings.push(format!(
                    "The content splits between {}. Pick one direction and cut or demote the rest.",
                    names.join(", ")
                ));
            }
            if !s.has_summary {
                findings.push(match kind {
                    DocumentKind::Resume => {
                        "Add a one or two line summary that names the role you want.".to_string()
                    }
                    DocumentKind::LinkedIn => {
                        "No About section found. Use it to state direction and proof.".to_string()
                    }
                });
            }
            if kind == DocumentKind::LinkedIn && !s.weak_phrases.is_empty() {
                findings.push(format!(
                    "Trait words like {} say nothing about direction. Replace them with the role and tools.",
                    quoted_list(&s.weak_phrases)
                ));
            }
        }
        CritiqueSection::Education => {
            if !s.has_education {
                findings.push(
                    "No education section detected. List degree, school and graduation date."
                        .to_string(),
                );
            }
        }
        CritiqueSection::Experience => {
            if !s.has_experience {
                findings.push(
                    "No experience section detected. Internships, co-ops and part-time technical work all count."
                        .to_string(),
                );
            }
            match s.metrics_count {
                0 => findings.push(
                    "None of your bullets show a number. Add what changed, by how much, and how you did it."
                        .to_string(),
                ),
                1 | 2 => findings.push(format!(
                    "Only {} quantified result(s) found. Most bullets should carry one.",
                    s.metrics_count
                )),
                _ => {}
            }
            if kind == DocumentKind::Resume && !s.weak_phrases.is_empty() {
                findings.push(format!(
                    "Vague phrases found: {}. Replace them with what you built or changed.",
                    quoted_list(&s.weak_phrases)
                ));
            }
        }
        CritiqueSection::Projects => {
            if !s.has_projects {
                findings.push(
                    "No projects found. Add one or two with the problem, your contribution, tools and result."
                        .to_string(),
                );
            }
        }
        CritiqueSection::Skills => {
            if !s.has_skills {
                findings.push(
                    "No skills section detected. List the tools you can defend in an interview."
                        .to_string(),
                );
            } else if s.detected_roles.is_empty() {
                findings.push(
                    "Your skills are not backed by any discipline-specific tools in the rest of the text."
                        .to_string(),
                );
            }
        }
        CritiqueSection::Certifications => {
            if !s.has_certifications {
                findings.push(
                    "Licenses & Certifications is empty. Add FE/EIT or tool certifications if you hold them."
                        .to_string(),
                );
            }
        }
        CritiqueSection::Formatting => {
            if s.bullet_lines < 3 {
                findings.push(
                    "Few or no bullet points found. Use short bullets so a scan picks up results."
                        .to_string(),
                );
            }
            if s.word_count > LONG_WORD_COUNT {
                findings.push(format!(
                    "At about {} words this likely runs past one page. Cut to the strongest material.",
                    s.word_count
                ));
            } else if s.word_count < THIN_WORD_COUNT {
                findings.push(format!(
                    "At about {} words the content is thin. Fill it with projects and results.",
                    s.word_count
                ));
            }
        }
    }
    findings
}

fn quoted_list(phrases: &[&str]) -> String {
    phrases
        .iter()
        .map(|p| format!("\"{p}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
