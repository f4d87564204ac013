//! Attempt records with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attempt::AssessmentAttempt;
use crate::error::AssessmentError;
use crate::results::{Response, ScoreSummary};

/// A completed attempt, detached from its bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: Uuid,
    pub bank_title: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// Answers in the order they were given.
    pub responses: Vec<Response>,
    pub summary: ScoreSummary,
}

impl AssessmentAttempt {
    /// Snapshot a completed attempt.
    pub fn record(&self) -> Result<AttemptRecord, AssessmentError> {
        let summary = self.score()?;
        let completed_at = self.completed_at().ok_or(AssessmentError::NotCompleted)?;

        Ok(AttemptRecord {
            id: self.id(),
            bank_title: self.bank().title().to_string(),
            started_at: self.started_at(),
            completed_at,
            responses: self.responses().to_vec(),
            summary,
        })
    }
}

impl AttemptRecord {
    /// Save the record as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize attempt")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write attempt to {}", path.display()))?;
        Ok(())
    }

    /// Load a record from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read attempt from {}", path.display()))?;
        let record: AttemptRecord =
            serde_json::from_str(&content).context("failed to parse attempt JSON")?;
        Ok(record)
    }

    /// Format the record as markdown.
    pub fn to_markdown(&self) -> String {
        let s = &self.summary;
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.bank_title));
        md.push_str(&format!(
            "**Result:** {} ({}/{} correct, {}%, pass mark {}%)\n\n",
            if s.passed { "PASS" } else { "FAIL" },
            s.correct_count,
            s.total_count,
            s.percent,
            s.passing_score_percent
        ));

        md.push_str("| # | Question | Answer | Result |\n");
        md.push_str("|---|----------|--------|--------|\n");
        for (i, r) in self.responses.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                i + 1,
                r.question_id,
                r.selected_index + 1,
                if r.correct { "correct" } else { "incorrect" }
            ));
        }

        md
    }
}
