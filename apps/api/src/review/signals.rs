//! Section/signal detector. Never fails: anything not found is `false` or `0`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::review::models::{RoleHit, SignalSet};
use crate::review::profile::{DocumentProfile, ROLE_TABLE};

static CONTACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}|\(?\b\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b|linkedin\.com/in/",
    )
    .expect("valid regex")
});

const BULLET_MARKERS: &[char] = &['-', '•', '*', '▪', '◦', '–', '●'];
const HEADLINE_MAX_CHARS: usize = 120;
/// Top and third role closer than this reads as a document without a direction.
const AMBIGUITY_GAP: usize = 2;

/// Runs every detector in `profile` against already-normalized text.
pub fn detect(profile: &DocumentProfile, text: &str) -> SignalSet {
    let lower = text.to_lowercase();
    let sections = &profile.sections;

    let weak_phrases: Vec<&'static str> = profile
        .weak_phrases
        .iter()
        .copied()
        .filter(|phrase| count_term(&lower, phrase) > 0)
        .collect();
    let weak_words_count = weak_phrases
        .iter()
        .map(|phrase| count_term(&lower, phrase))
        .sum();

    let detected_roles = detect_roles(&lower);
    let multi_role_ambiguity = profile.detect_ambiguity && is_ambiguous(&detected_roles);

    SignalSet {
        has_contact: CONTACT.is_match(text),
        has_summary: contains_any(&lower, sections.summary)
            || profile.summary_heading.is_some_and(|heading| heading.is_match(text)),
        has_education: contains_any(&lower, sections.education),
        has_experience: contains_any(&lower, sections.experience),
        has_projects: contains_any(&lower, sections.projects),
        has_skills: contains_any(&lower, sections.skills),
        has_certifications: contains_any(&lower, sections.certifications),
        metrics_count: profile.metrics.find_iter(text).count(),
        weak_words_count,
        weak_phrases,
        detected_roles,
        multi_role_ambiguity,
        bullet_lines: count_bullet_lines(text),
        word_count: text.split_whitespace().count(),
        headline: headline(text),
    }
}

/// Roles with at least one keyword present, most hits first, ties in table order.
pub fn detect_roles(lower: &str) -> Vec<RoleHit> {
    let mut hits: Vec<RoleHit> = ROLE_TABLE
        .iter()
        .map(|(role, keywords)| RoleHit {
            role: *role,
            hits: keywords
                .iter()
                .filter(|kw| count_term(lower, kw) > 0)
                .count(),
        })
        .filter(|hit| hit.hits > 0)
        .collect();
    // stable: equal counts keep table order
    hits.sort_by(|a, b| b.hits.cmp(&a.hits));
    hits
}

fn is_ambiguous(roles: &[RoleHit]) -> bool {
    match (roles.first(), roles.get(2)) {
        (Some(top), Some(third)) => top.hits - third.hits <= AMBIGUITY_GAP,
        _ => false,
    }
}

fn contains_any(lower: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| count_term(lower, term) > 0)
}

/// Counts occurrences of `term` that are not glued to a neighbouring letter or digit.
pub(crate) fn count_term(haystack: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    haystack
        .match_indices(term)
        .filter(|(start, matched)| {
            let before = haystack[..*start].chars().next_back();
            let after = haystack[start + matched.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .count()
}

fn count_bullet_lines(text: &str) -> usize {
    text.lines()
        .filter(|line| line.trim_start().starts_with(BULLET_MARKERS))
        .count()
}

fn headline(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(HEADLINE_MAX_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::profile::{LINKEDIN, RESUME};

    #[test]
    fn test_count_term_respects_word_boundaries() {
        assert_eq!(count_term("a decade of arcade games", "cad"), 0);
        assert_eq!(count_term("cad, cad and cam", "cad"), 2);
        assert_eq!(count_term("rapid api work", "api"), 1);
        assert_eq!(count_term("c++ and c++17", "c++"), 1);
    }

    #[test]
    fn test_count_term_handles_multibyte_neighbours() {
        assert_eq!(count_term("•skills•", "skills"), 1);
        assert_eq!(count_term("éskills", "skills"), 0);
    }

    #[test]
    fn test_section_flags_from_keywords() {
        let signals = detect(
            &RESUME,
            "Education: B.S. Mechanical Engineering\nSkills: SolidWorks\nProjects: rover",
        );
        assert!(signals.has_education);
        assert!(signals.has_skills);
        assert!(signals.has_projects);
        assert!(!signals.has_experience);
    }

    #[test]
    fn test_no_keywords_yields_all_false() {
        let signals = detect(&RESUME, "I like to build things and learn new ideas every day.");
        assert!(!signals.has_education);
        assert!(!signals.has_experience);
        assert!(!signals.has_projects);
        assert!(!signals.has_skills);
        assert!(signals.detected_roles.is_empty());
        assert_eq!(signals.metrics_count, 0);
    }

    #[test]
    fn test_roles_sorted_by_hits_then_table_order() {
        // Software 1 (python), Electrical 1 (pcb), Mechanical 2 (solidworks, fea)
        let roles = detect_roles("pcb layout, python scripts, solidworks and fea");
        let names: Vec<_> = roles.iter().map(|r| r.role).collect();
        assert_eq!(names, vec!["Mechanical", "Electrical", "Software"]);
        assert_eq!(roles[0].hits, 2);
    }

    #[test]
    fn test_hit_count_is_distinct_keywords() {
        let roles = detect_roles("python python python");
        assert_eq!(roles, vec![RoleHit { role: "Software", hits: 1 }]);
    }

    #[test]
    fn test_multi_role_ambiguity_when_top_three_are_close() {
        let text = "pcb firmware, solidworks fea, python linux";
        let signals = detect(&RESUME, text);
        assert_eq!(signals.detected_roles.len(), 3);
        assert!(signals.multi_role_ambiguity);
    }

    #[test]
    fn test_no_ambiguity_when_one_role_dominates() {
        let text = "mechanical solidworks cad fea ansys thermal, python, pcb";
        let signals = detect(&RESUME, text);
        assert!(!signals.multi_role_ambiguity);
    }

    #[test]
    fn test_ambiguity_is_resume_only() {
        let text = "pcb firmware, solidworks fea, python linux";
        assert!(!detect(&LINKEDIN, text).multi_role_ambiguity);
    }

    #[test]
    fn test_weak_phrases_counted_per_occurrence() {
        let signals = detect(
            &RESUME,
            "Responsible for testing. Responsible for docs. Motivated engineer.",
        );
        assert_eq!(signals.weak_words_count, 3);
        assert_eq!(signals.weak_phrases, vec!["responsible for", "motivated"]);
    }

    #[test]
    fn test_linkedin_about_needs_a_heading() {
        let prose = "Mechanical engineering student. I care about tolerances.\n".repeat(5);
        assert!(!detect(&LINKEDIN, &prose).has_summary);

        let headline = "Headline reviews are what I write about most.";
        assert!(!detect(&LINKEDIN, headline).has_summary);

        for text in [
            "Jane Doe\nAbout\nMechanical engineering student.",
            "Jane Doe\nABOUT ME\nMechanical engineering student.",
            "Headline: Mechanical engineering student",
            "  Summary:\tthermal systems",
        ] {
            assert!(detect(&LINKEDIN, text).has_summary, "{text:?}");
        }
    }

    #[test]
    fn test_resume_summary_stays_keyword_based() {
        assert!(detect(&RESUME, "Objective: a controls role").has_summary);
        assert!(!detect(&RESUME, "I care about tolerances.").has_summary);
    }

    #[test]
    fn test_contact_detection() {
        assert!(detect(&RESUME, "jane.doe@example.com").has_contact);
        assert!(detect(&RESUME, "(555) 123-4567").has_contact);
        assert!(detect(&RESUME, "linkedin.com/in/janedoe").has_contact);
        assert!(!detect(&RESUME, "no way to reach me").has_contact);
    }

    #[test]
    fn test_bullets_words_and_headline() {
        let signals = detect(&RESUME, "Jane Doe\n- one\n• two\n* three\nplain line");
        assert_eq!(signals.bullet_lines, 3);
        assert_eq!(signals.word_count, 10);
        assert_eq!(signals.headline.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_headline_truncated() {
        let long = "x".repeat(500);
        let signals = detect(&LINKEDIN, &long);
        assert_eq!(signals.headline.map(|h| h.chars().count()), Some(120));
    }

    #[test]
    fn test_empty_text_degrades_gracefully() {
        let signals = detect(&LINKEDIN, "");
        assert_eq!(signals, SignalSet::default());
    }
}
