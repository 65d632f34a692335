//! Per-document-kind configuration for the heuristic review engine.
//!
//! The detector, scorer, prioritizer and report builder are shared; everything that
//! differs between a resume and a LinkedIn profile (keyword tables, metric pattern,
//! dimension weights, wording) lives in a static `DocumentProfile`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::review::models::{Dimension, Readiness};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    #[serde(rename = "linkedin")]
    LinkedIn,
}

impl DocumentKind {
    pub fn profile(self) -> &'static DocumentProfile {
        match self {
            DocumentKind::Resume => &RESUME,
            DocumentKind::LinkedIn => &LINKEDIN,
        }
    }
}

/// Sections a critique block can be emitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CritiqueSection {
    Header,
    Positioning,
    Education,
    Experience,
    Projects,
    Skills,
    Certifications,
    Formatting,
}

pub struct CritiqueTemplate {
    pub section: CritiqueSection,
    pub title: &'static str,
    pub summary: &'static str,
}

pub struct RewriteTemplate {
    pub title: &'static str,
    /// `{role}` is replaced with the target or detected role.
    pub template: &'static str,
}

pub struct SectionKeywords {
    pub summary: &'static [&'static str],
    pub education: &'static [&'static str],
    pub experience: &'static [&'static str],
    pub projects: &'static [&'static str],
    pub skills: &'static [&'static str],
    pub certifications: &'static [&'static str],
}

pub struct VerdictTexts {
    pub ready: &'static str,
    pub close: &'static str,
    pub not_ready: &'static str,
}

impl VerdictTexts {
    pub fn for_tier(&self, tier: Readiness) -> &'static str {
        match tier {
            Readiness::Ready => self.ready,
            Readiness::Close => self.close,
            Readiness::NotReady => self.not_ready,
        }
    }
}

pub struct IssueTexts {
    pub target_unclear: &'static str,
    pub duties_not_impact: &'static str,
    pub missing_projects: &'static str,
    pub tighten_first_impression: &'static str,
}

pub struct DocumentProfile {
    pub kind: DocumentKind,
    /// Used in length-gate messages ("Resume text is too short").
    pub label: &'static str,
    pub title: &'static str,
    pub sections: SectionKeywords,
    /// Line-anchored heading that also marks the summary as present.
    pub summary_heading: Option<&'static Lazy<Regex>>,
    pub weak_phrases: &'static [&'static str],
    pub metrics: &'static Lazy<Regex>,
    pub detect_ambiguity: bool,
    /// Scored dimensions, in display order, with their overall weight and label.
    pub dimensions: &'static [(Dimension, f64, &'static str)],
    pub critiques: &'static [CritiqueTemplate],
    pub rewrites: &'static [RewriteTemplate],
    pub plan_label: &'static str,
    pub plan: &'static [&'static str],
    pub verdicts: VerdictTexts,
    pub issues: IssueTexts,
    pub reality_check: &'static str,
    pub closing: &'static str,
}

/// Discipline keyword table. Declaration order breaks ties between equal hit counts.
pub const ROLE_TABLE: &[(&str, &[&str])] = &[
    (
        "Electrical",
        &[
            "electrical",
            "circuit",
            "circuits",
            "pcb",
            "embedded",
            "firmware",
            "power electronics",
            "altium",
            "fpga",
            "analog",
            "microcontroller",
            "oscilloscope",
        ],
    ),
    (
        "Mechanical",
        &[
            "mechanical",
            "solidworks",
            "cad",
            "gd&t",
            "fea",
            "ansys",
            "thermal",
            "fixture",
            "machining",
            "creo",
            "tolerance",
        ],
    ),
    (
        "Systems",
        &[
            "systems engineer",
            "systems engineering",
            "requirements",
            "integration",
            "mbse",
            "sysml",
            "verification",
            "interface control",
        ],
    ),
    (
        "Test",
        &[
            "test engineer",
            "labview",
            "validation",
            "test plan",
            "test fixture",
            "dvt",
            "test automation",
            "data acquisition",
        ],
    ),
    (
        "Software",
        &[
            "software",
            "python",
            "c++",
            "java",
            "git",
            "api",
            "linux",
            "javascript",
            "rust",
            "sql",
        ],
    ),
    (
        "Manufacturing",
        &[
            "manufacturing",
            "lean",
            "six sigma",
            "process improvement",
            "cycle time",
            "kaizen",
            "production",
            "yield",
            "dfm",
        ],
    ),
    (
        "Civil",
        &[
            "civil",
            "structural",
            "revit",
            "geotechnical",
            "surveying",
            "autocad civil",
            "stormwater",
        ],
    ),
];

// Percentages, currency, multipliers, comma-grouped numbers, and counts of a unit noun.
static RESUME_METRICS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        \d+(?:\.\d+)?\s?%
        | [$€£]\s?\d[\d,]*(?:\.\d+)?\s?[kmb]?\b
        | \b\d+(?:\.\d+)?x\b
        | \b\d{1,3}(?:,\d{3})+\b
        | \b\d+\+?\s+(?:users|customers|parts|units|hours|hrs|days|weeks|months|engineers|tests|designs|people|students|members|samples|boards|prototypes|iterations|components|sensors)\b",
    )
    .expect("valid regex")
});

// LinkedIn additionally credits `N+` style multi-digit counts ("40+ students").
static LINKEDIN_METRICS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        \d+(?:\.\d+)?\s?%
        | [$€£]\s?\d[\d,]*(?:\.\d+)?\s?[kmb]?\b
        | \b\d+(?:\.\d+)?x\b
        | \b\d{1,3}(?:,\d{3})+\b
        | \b\d{2,}\+
        | \b\d+\s+(?:users|customers|parts|units|hours|engineers|tests|designs|people|students|members|prototypes|iterations)\b",
    )
    .expect("valid regex")
});

// "About", "Headline" or "Summary" as a heading: alone on its line or followed by a colon.
static LINKEDIN_SUMMARY_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:about(?:[ \t]+me)?|headline|summary)[ \t]*(?::|$)")
        .expect("valid regex")
});

pub static RESUME: DocumentProfile = DocumentProfile {
    kind: DocumentKind::Resume,
    label: "Resume",
    title: "Resume Review",
    sections: SectionKeywords {
        summary: &["summary", "objective", "profile", "professional summary"],
        education: &[
            "education",
            "university",
            "college",
            "bachelor",
            "bachelors",
            "master",
            "masters",
            "b.s.",
            "b.sc",
            "m.s.",
            "gpa",
            "degree",
        ],
        experience: &[
            "experience",
            "internship",
            "intern",
            "co-op",
            "employment",
            "work history",
        ],
        projects: &["projects", "project", "capstone", "senior design"],
        skills: &[
            "skills",
            "technical skills",
            "tools",
            "technologies",
            "proficient",
        ],
        certifications: &[
            "certification",
            "certifications",
            "certified",
            "fe exam",
            "eit",
        ],
    },
    summary_heading: None,
    weak_phrases: &[
        "responsible for",
        "duties included",
        "duties include",
        "worked on",
        "helped with",
        "assisted with",
        "tasked with",
        "hardworking",
        "hard-working",
        "motivated",
        "passionate",
        "team player",
        "detail-oriented",
        "fast learner",
    ],
    metrics: &RESUME_METRICS,
    detect_ambiguity: true,
    dimensions: &[
        (Dimension::RoleClarity, 0.22, "Role clarity"),
        (Dimension::Projects, 0.18, "Projects strength"),
        (Dimension::ImpactBullets, 0.22, "Impact bullets"),
        (Dimension::SkillsCredibility, 0.18, "Skills credibility"),
        (Dimension::AtsReadability, 0.12, "ATS readability"),
        (Dimension::Formatting, 0.08, "Formatting"),
    ],
    critiques: &[
        CritiqueTemplate {
            section: CritiqueSection::Header,
            title: "Header",
            summary: "The header has one job: make it easy to contact you.",
        },
        CritiqueTemplate {
            section: CritiqueSection::Positioning,
            title: "Summary / Positioning",
            summary: "The top third has to say which role this resume is for.",
        },
        CritiqueTemplate {
            section: CritiqueSection::Education,
            title: "Education",
            summary: "Education anchors an early-career resume.",
        },
        CritiqueTemplate {
            section: CritiqueSection::Projects,
            title: "Projects",
            summary: "Projects are where you prove you can do the work.",
        },
        CritiqueTemplate {
            section: CritiqueSection::Experience,
            title: "Experience",
            summary: "Experience bullets should show results, not duties.",
        },
        CritiqueTemplate {
            section: CritiqueSection::Skills,
            title: "Skills",
            summary: "Skills only count when the rest of the resume backs them up.",
        },
        CritiqueTemplate {
            section: CritiqueSection::Formatting,
            title: "Formatting / ATS",
            summary: "Screening software and tired recruiters both need clean structure.",
        },
    ],
    rewrites: &[
        RewriteTemplate {
            title: "Impact bullet",
            template: "Reduced ____ by ___% by redesigning ____ using ____.",
        },
        RewriteTemplate {
            title: "Project bullet",
            template: "Designed and built ____ to solve ____; tested ___ iterations and improved ____ by ___%.",
        },
        RewriteTemplate {
            title: "Skills credibility",
            template: "{role} tools: ____ (used in ____), ____ (used in ____), ____ (used in ____).",
        },
    ],
    plan_label: "Day",
    plan: &[
        "Pick one target role and rewrite the top third of the resume around it.",
        "Rewrite every experience bullet as action, tool, and measurable result.",
        "Add or rebuild the Projects section with your two strongest projects.",
        "Trim the skills list to tools you can point to elsewhere on the page.",
        "Clean up formatting: one column, consistent dates, standard section headings.",
        "Cut anything that does not support the target role.",
        "Read the resume for 10 seconds as a recruiter would, fix what you miss, then apply.",
    ],
    verdicts: VerdictTexts {
        ready: "Ready to apply. The match is clear and the bullets carry weight.",
        close: "Close. Fix the items below before you send this out.",
        not_ready: "Not ready yet. This resume will struggle to get callbacks as written.",
    },
    issues: IssueTexts {
        target_unclear: "Your target role is unclear. A recruiter cannot tell which job this resume is for.",
        duties_not_impact: "Your bullets read like duties, not impact. None of them show a measurable result.",
        missing_projects: "You are missing a Projects section, the place early-career engineers prove they can do the work.",
        tighten_first_impression: "Tighten the top third so the match to the role is obvious in a quick scan.",
    },
    reality_check: "A recruiter decides in under 10 seconds whether this resume matches the role. Role clarity and impact bullets decide callbacks.",
    closing: "Thank you for sending this in for review. These are opinions, not absolute rules. Take what works for you and leave the rest.\n\nThanks,\nYour Friend and Mentor",
};

pub static LINKEDIN: DocumentProfile = DocumentProfile {
    kind: DocumentKind::LinkedIn,
    label: "LinkedIn",
    title: "LinkedIn Profile Review",
    sections: SectionKeywords {
        summary: &[],
        education: &[
            "education",
            "university",
            "college",
            "bachelor",
            "bachelors",
            "master",
            "masters",
            "b.s.",
            "m.s.",
            "degree",
        ],
        experience: &["experience", "internship", "intern", "co-op"],
        projects: &["projects", "project", "capstone", "senior design"],
        skills: &["skills", "top skills", "endorsements"],
        certifications: &[
            "licenses & certifications",
            "certification",
            "certifications",
            "certified",
        ],
    },
    summary_heading: Some(&LINKEDIN_SUMMARY_HEADING),
    weak_phrases: &[
        "passionate",
        "motivated",
        "hardworking",
        "hard-working",
        "aspiring",
        "seeking opportunities",
        "looking for opportunities",
        "open to work",
        "responsible for",
        "team player",
        "go-getter",
        "enthusiastic",
    ],
    metrics: &LINKEDIN_METRICS,
    detect_ambiguity: false,
    dimensions: &[
        (Dimension::RoleClarity, 0.2, "Positioning"),
        (Dimension::ImpactBullets, 0.2, "Experience signal"),
        (Dimension::Projects, 0.2, "Projects"),
        (Dimension::SkillsCredibility, 0.2, "Skills credibility"),
        (Dimension::Completeness, 0.2, "Profile completeness"),
    ],
    critiques: &[
        CritiqueTemplate {
            section: CritiqueSection::Positioning,
            title: "Positioning & Headline",
            summary: "Someone landing on the profile should know your direction within five seconds.",
        },
        CritiqueTemplate {
            section: CritiqueSection::Experience,
            title: "Experience",
            summary: "Signal beats prestige: decisions, constraints and results.",
        },
        CritiqueTemplate {
            section: CritiqueSection::Projects,
            title: "Projects",
            summary: "A few strong projects beat many weak ones.",
        },
        CritiqueTemplate {
            section: CritiqueSection::Skills,
            title: "Skills",
            summary: "Skills should line up with what the profile proves.",
        },
        CritiqueTemplate {
            section: CritiqueSection::Education,
            title: "Education",
            summary: "Keep education accurate and easy to find.",
        },
        CritiqueTemplate {
            section: CritiqueSection::Certifications,
            title: "Licenses & Certifications",
            summary: "Certifications are cheap credibility when you have them.",
        },
    ],
    rewrites: &[
        RewriteTemplate {
            title: "Headline",
            template: "{role} | ____ | ____ (tools you can prove) | Graduating ____",
        },
        RewriteTemplate {
            title: "About opener",
            template: "I am a ____ focused on {role} work. Most recently I ____, which ____.",
        },
        RewriteTemplate {
            title: "Experience bullet",
            template: "Cut ____ from ___ to ___ (___%) by ____ using ____.",
        },
    ],
    plan_label: "Step",
    plan: &[
        "Rewrite the headline to name one target role and two provable tools.",
        "Rewrite the About section: direction first, proof second, what you want next last.",
        "Rewrite each experience entry around one decision and one measurable result.",
        "Add your strongest one or two projects with problem, tools and outcome.",
        "Prune skills to the ones your experience and projects back up.",
        "Connect with engineers and recruiters at target companies, then message a few each week.",
    ],
    verdicts: VerdictTexts {
        ready: "Internship and entry-level ready. The profile supports outreach as is.",
        close: "Close to ready. Fix the items below before you start networking hard.",
        not_ready: "Not ready for active outreach. Fix positioning and proof first.",
    },
    issues: IssueTexts {
        target_unclear: "Your positioning is unclear. Nothing in the profile tells a recruiter which role you want.",
        duties_not_impact: "Your experience reads like a list of duties, not impact. Add measurable results.",
        missing_projects: "Your profile shows no projects. Add one or two strong ones to prove hands-on skill.",
        tighten_first_impression: "Tighten your headline so the match to your target role is obvious at a glance.",
    },
    reality_check: "Your profile exists to answer one question: is this person worth messaging, referring, or interviewing? Positioning must be clear within five seconds.",
    closing: "Thanks,\nYour Friend and Mentor",
};
