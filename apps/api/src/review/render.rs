//! Presentation adapters over a `Report`.
//!
//! `render_html` fills an askama template, which escapes every interpolated value.
//! The JSON adapter is the `Serialize` impl on `Report` itself.

use askama::Template;
use serde::Deserialize;

use crate::review::models::Report;

/// Output shape requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewFormat {
    #[default]
    Html,
    Json,
}

/// Escapes text placed into generated markup outside the review template.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Template)]
#[template(source = r#"<div class="review">
<h2>{{ report.title }}</h2>
<p><strong>Readiness:</strong> {{ report.readiness.label() }} ({{ report.overall }}/100). {{ report.verdict }}</p>
<p><strong>Biggest issue:</strong> {{ report.biggest_issue }}</p>
{% if let Some(target) = report.target_role -%}
<p><strong>Target role:</strong> {{ target }}</p>
{% endif -%}
{% if let Some(headline) = report.headline -%}
<p><strong>First line as read:</strong> {{ headline }}</p>
{% endif -%}
<p>{{ report.reality_check }}</p>
<hr>
<h3>Scorecard</h3>
<ul>
<li><strong>Overall:</strong> {{ report.overall }}</li>
{% for sub in report.score_breakdown.sub_scores -%}
<li><strong>{{ sub.label }}:</strong> {{ sub.score }}</li>
{% endfor -%}
</ul>
{% if !roles.is_empty() -%}
<p><strong>Disciplines detected:</strong> {{ roles }}</p>
{% endif -%}
<h3>Section-by-section critique</h3>
{% if report.sections.is_empty() -%}
<p>No section-level blockers found.</p>
{% endif -%}
{% for section in report.sections -%}
<h4>{{ section.title }}</h4>
<p>{{ section.summary }}</p>
<ul>
{% for finding in section.findings -%}
<li>{{ finding }}</li>
{% endfor -%}
</ul>
{% endfor -%}
<h3>Rewrite examples</h3>
<ol>
{% for rewrite in report.rewrites -%}
<li><strong>{{ rewrite.title }}:</strong> {{ rewrite.template }}</li>
{% endfor -%}
</ol>
<h3>Plan</h3>
<ol>
{% for step in report.plan -%}
<li><strong>{{ step.label }}:</strong> {{ step.action }}</li>
{% endfor -%}
</ol>
<h3>Final recommendation</h3>
<p>{{ report.verdict }}</p>
<p><strong>Single biggest improvement:</strong> {{ report.biggest_issue }}</p>
{% if !report.fix_before_applying.is_empty() -%}
<p><strong>Fix before applying:</strong></p>
<ul>
{% for item in report.fix_before_applying -%}
<li>{{ item }}</li>
{% endfor -%}
</ul>
{% endif -%}
<hr>
{% for paragraph in closing -%}
<p>{% for line in paragraph %}{% if !loop.first %}<br>{% endif %}{{ line }}{% endfor %}</p>
{% endfor -%}
</div>"#, ext = "html")]
struct ReviewTemplate<'a> {
    report: &'a Report,
    /// "Mechanical (3), Test (1)", empty when no discipline was detected.
    roles: String,
    /// Closing paragraphs split into lines; joined with `<br>` in the template.
    closing: Vec<Vec<&'a str>>,
}

impl<'a> ReviewTemplate<'a> {
    fn new(report: &'a Report) -> Self {
        let roles = report
            .signals
            .detected_roles
            .iter()
            .map(|r| format!("{} ({})", r.role, r.hits))
            .collect::<Vec<_>>()
            .join(", ");
        let closing = report
            .closing
            .split("\n\n")
            .map(|paragraph| paragraph.lines().collect())
            .collect();
        Self {
            report,
            roles,
            closing,
        }
    }
}

/// Renders the ready-to-inject HTML fragment for a report.
pub fn render_html(report: &Report) -> Result<String, askama::Error> {
    ReviewTemplate::new(report).render()
}
