use crate::domain::model::{Card, DeliveryOutcome, ParticipantOutcome, RoundReport};

impl RoundReport {
    pub fn delivered_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, DeliveryOutcome::Delivered { .. }))
            .count()
    }

    pub fn exhausted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, DeliveryOutcome::CardsExhausted))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ParticipantOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, DeliveryOutcome::DeliveryFailed { .. }))
    }

    /// Cards that were actually delivered, by display name, in roster order.
    pub fn cards(&self) -> Vec<(&str, Card)> {
        self.outcomes
            .iter()
            .filter_map(|o| match o.outcome {
                DeliveryOutcome::Delivered { card } => Some((o.display_name.as_str(), card)),
                _ => None,
            })
            .collect()
    }

    /// The list posted back to the group; `None` when every delivery went through.
    pub fn failure_announcement(&self, header: &str) -> Option<String> {
        let lines: Vec<String> = self
            .failures()
            .filter_map(|o| match &o.outcome {
                DeliveryOutcome::DeliveryFailed { reason, .. } => {
                    Some(format!("{}: {}", o.display_name, reason))
                }
                _ => None,
            })
            .collect();

        if lines.is_empty() {
            None
        } else {
            Some(format!("{}\n{}", header, lines.join("\n")))
        }
    }

    pub fn summary(&self) -> String {
        let elapsed = self.finished_at - self.started_at;
        format!(
            "Theme: {}{} | delivered: {}, cards exhausted: {}, failed: {} | {} ms",
            self.theme.text(),
            if self.theme.is_fallback() { " (fallback)" } else { "" },
            self.delivered_count(),
            self.exhausted_count(),
            self.failed_count(),
            elapsed.num_milliseconds()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AnnouncedTheme;
    use chrono::Utc;

    fn outcome(name: &str, outcome: DeliveryOutcome) -> ParticipantOutcome {
        ParticipantOutcome {
            user_id: format!("id-{}", name),
            display_name: name.to_string(),
            outcome,
        }
    }

    fn sample_report() -> RoundReport {
        let now = Utc::now();
        RoundReport {
            theme: AnnouncedTheme::Drawn("海".to_string()),
            outcomes: vec![
                outcome("alice", DeliveryOutcome::Delivered { card: 12 }),
                outcome(
                    "bob",
                    DeliveryOutcome::DeliveryFailed {
                        card: Some(80),
                        reason: "recipient unreachable: dms closed".to_string(),
                    },
                ),
                outcome("carol", DeliveryOutcome::CardsExhausted),
            ],
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn test_counters() {
        let report = sample_report();
        assert_eq!(report.delivered_count(), 1);
        assert_eq!(report.exhausted_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.cards(), vec![("alice", 12)]);
    }

    #[test]
    fn test_failure_announcement_lists_failed_users() {
        let report = sample_report();
        let text = report.failure_announcement("Failed:").unwrap();
        assert_eq!(text, "Failed:\nbob: recipient unreachable: dms closed");
    }

    #[test]
    fn test_no_failure_announcement_when_clean() {
        let mut report = sample_report();
        report.outcomes.remove(1);
        assert!(report.failure_announcement("Failed:").is_none());
    }

    #[test]
    fn test_summary_marks_fallback_theme() {
        let mut report = sample_report();
        report.theme = AnnouncedTheme::Fallback("pick one yourselves".to_string());
        let summary = report.summary();
        assert!(summary.contains("(fallback)"));
        assert!(summary.contains("failed: 1"));
    }

    #[test]
    fn test_report_serializes_outcomes_flat() {
        let report = sample_report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["theme"]["kind"], "drawn");
        assert_eq!(json["outcomes"][0]["status"], "delivered");
        assert_eq!(json["outcomes"][0]["card"], 12);
        assert_eq!(json["outcomes"][1]["display_name"], "bob");
    }
}
