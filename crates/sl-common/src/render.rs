//! Plain-text renderings of the dashboard fragments.

use std::fmt::Write as _;

use rand::Rng;

use crate::criteria::CriteriaWeights;
use crate::notify::{Notification, NotificationKind};
use crate::progress;
use crate::session::{Modal, Session, SuccessMetrics};
use crate::shortlist::{DiversityAssessment, DiversityLine, Standing};
use crate::{Candidate, CandidateStatus, Requisition};

const BAR_WIDTH: usize = 30;
const LABEL_WIDTH: usize = 16;

pub fn progress_bar(requisition: &Requisition) -> String {
    let pct = progress::percentage(requisition);
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}] {:>3.0}%  {}  ({} remaining)",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        pct,
        progress::progress_text(requisition),
        progress::time_remaining_text(requisition),
    )
}

pub fn header(requisition: &Requisition) -> String {
    format!("{} [{}]", requisition.title, requisition.id)
}

pub fn criteria(weights: &CriteriaWeights) -> String {
    let mut out = String::new();
    for (name, weight) in weights.iter() {
        let dots = ".".repeat(LABEL_WIDTH.saturating_sub(name.len()) + 2);
        let _ = writeln!(out, "  {name} {dots} {weight:>3}%");
    }
    let _ = write!(out, "  total {} {:>3}%", ".".repeat(LABEL_WIDTH - 3), weights.total());
    out
}

fn status_marker(status: CandidateStatus) -> &'static str {
    match status {
        CandidateStatus::Approved => "[✓ approve]",
        CandidateStatus::Pending => "[? hold   ]",
        CandidateStatus::Rejected => "[× reject ]",
    }
}

pub fn candidates(list: &[Candidate]) -> String {
    list.iter()
        .map(|candidate| {
            format!(
                "  {} {} ({}) {} - {}",
                status_marker(candidate.status),
                candidate.name,
                candidate.id,
                candidate.score,
                candidate.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn diversity_line(line: &DiversityLine) -> String {
    let marker = match line.standing {
        Standing::Good => "✓",
        Standing::Warning => "⚠",
    };
    format!("  {marker} {}: {}", line.label, line.text)
}

pub fn diversity(assessment: &DiversityAssessment) -> String {
    format!(
        "{}\n{}",
        diversity_line(&assessment.women),
        diversity_line(&assessment.underrepresented)
    )
}

pub fn notifications<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a Notification>,
{
    items
        .into_iter()
        .map(|item| {
            let tag = match item.kind {
                NotificationKind::Toast => "toast",
                NotificationKind::Feedback => "feedback",
                NotificationKind::Success => "success",
            };
            format!("  ({tag}) {}", item.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn stat_cards(metrics: Option<&SuccessMetrics>) -> String {
    match metrics {
        Some(metrics) => format!(
            "  time saved {} | accuracy {} | success {} | throughput {}",
            metrics.time_saved, metrics.accuracy, metrics.success_rate, metrics.throughput
        ),
        None => "  stats update after the shortlist is sent".to_string(),
    }
}

/// Whole page as currently visible: dashboard plus any open modal.
pub fn page<R: Rng>(session: &Session<R>) -> String {
    let state = session.state();
    let mut out = String::new();

    let _ = writeln!(out, "== {} ({})", header(&state.requisition), session.view().as_ref());
    let _ = writeln!(out, "{}", progress_bar(&state.requisition));
    let _ = writeln!(out, "{}", stat_cards(session.success_metrics()));
    let _ = writeln!(out, "  review zone: {}", session.review_zone().label());

    if session.is_open(Modal::CriteriaSetup) {
        let saving = if session.is_saving() { " (saving...)" } else { "" };
        let _ = writeln!(out, "-- criteria setup{saving}");
        let _ = writeln!(out, "{}", criteria(&state.requisition.criteria));
    }
    if session.is_open(Modal::Shortlist) {
        let _ = writeln!(out, "-- shortlist");
        let _ = writeln!(out, "{}", candidates(&state.candidates));
        let _ = writeln!(out, "{}", diversity(&session.diversity()));
    }

    let active = session.active_notifications();
    if !active.is_empty() {
        let _ = writeln!(out, "-- notifications");
        let _ = writeln!(out, "{}", notifications(active));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortlist::assess;
    use crate::DiversityStats;

    #[test]
    fn progress_bar_shows_counts_and_remaining() {
        let line = progress_bar(&Requisition::sample());
        assert!(line.starts_with("[####################----------]"));
        assert!(line.contains("66%"));
        assert!(line.contains("347 of 523 applications screened"));
        assert!(line.contains("(1.8 hours remaining)"));
    }

    #[test]
    fn criteria_lists_each_weight_and_total() {
        let text = criteria(&CriteriaWeights::default());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].trim_start().starts_with("technical"));
        assert!(lines[0].ends_with(" 40%"));
        assert!(lines[4].ends_with("100%"));
    }

    #[test]
    fn candidate_cards_mark_status() {
        let text = candidates(&Candidate::sample_shortlist());
        assert!(text.contains("[✓ approve] Sarah Kim (sarah) 94"));
        assert!(text.contains("[? hold   ] Lisa Wang (lisa) 89"));
    }

    #[test]
    fn diversity_marks_warnings() {
        let text = diversity(&assess(&DiversityStats::default()));
        assert!(text.contains("✓ Women representation: 42% women (vs 38% applicant pool)"));
        assert!(text.contains("⚠ Underrepresented minorities: 23% (vs 31% applicant pool)"));
    }
}
