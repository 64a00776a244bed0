//! Live channel frame classification
//!
//! Every text frame pushed by the job runner is classified into exactly one
//! [`StatusFrame`]. Classification is pure so it can be exercised with literal
//! frame fixtures; applying the result to the event log happens in the app
//! crate.

use serde::Serialize;

use crate::types::Severity;

/// Job-lifecycle transition announced by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    Paused,
    Resumed,
    Stopped,
    Reset,
    ResetComplete,
    Done,
}

impl ControlKind {
    /// Parse a wire keyword. Unknown keywords return `None`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "paused" => Some(ControlKind::Paused),
            "resumed" => Some(ControlKind::Resumed),
            "stopped" => Some(ControlKind::Stopped),
            "reset" => Some(ControlKind::Reset),
            "reset-complete" => Some(ControlKind::ResetComplete),
            "done" => Some(ControlKind::Done),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ControlKind::Paused => "paused",
            ControlKind::Resumed => "resumed",
            ControlKind::Stopped => "stopped",
            ControlKind::Reset => "reset",
            ControlKind::ResetComplete => "reset-complete",
            ControlKind::Done => "done",
        }
    }

    /// Event log line for this control event.
    ///
    /// `Reset` has no line of its own: its only effect is clearing the log.
    pub fn log_line(&self) -> Option<(Severity, &'static str)> {
        match self {
            ControlKind::Paused => Some((Severity::Warning, "Evaluation paused")),
            ControlKind::Resumed => Some((Severity::Info, "Evaluation resumed")),
            ControlKind::Stopped => Some((Severity::Warning, "Evaluation stopped")),
            ControlKind::Reset => None,
            ControlKind::ResetComplete => Some((Severity::Success, "Evaluation reset complete")),
            ControlKind::Done => Some((Severity::Success, "Evaluation finished")),
        }
    }

    /// Whether applying this event clears the event log first
    pub fn clears_log(&self) -> bool {
        matches!(self, ControlKind::Reset)
    }
}

/// One evaluated question streamed from the runner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEvent {
    pub domain: String,
    pub question: String,
    /// Model answer, kept as raw JSON since the runner does not fix its type
    pub answer: serde_json::Value,
    pub response_time_ms: Option<f64>,
}

impl ResultEvent {
    /// Format as `domain: "question" → answer (N ms)`
    pub fn display_line(&self) -> String {
        let answer = match &self.answer {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let time = match self.response_time_ms {
            Some(ms) => format!("{} ms", ms),
            None => "? ms".to_string(),
        };
        format!(
            "{}: \"{}\" → {} ({})",
            self.domain, self.question, answer, time
        )
    }
}

/// Classified live channel frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusFrame {
    /// Recognized `status` keyword
    Control { control: ControlKind },
    /// Result payload (`domain` plus non-null `answer`)
    Result { result: ResultEvent },
    /// `status` present but not one of the recognized keywords; ignored
    Unrecognized { status: String },
    /// Not JSON, or matches neither payload shape
    Malformed { raw: String },
}

impl StatusFrame {
    pub fn control(kind: ControlKind) -> Self {
        StatusFrame::Control { control: kind }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, StatusFrame::Malformed { .. })
    }
}

/// Classify one raw text frame.
///
/// Rules, in order:
/// 1. Anything that is not a JSON object is `Malformed`.
/// 2. A non-null `status` wins over result-shaped fields: a known keyword is
///    `Control`, anything else (including non-string values) is `Unrecognized`.
/// 3. A string `domain` with a non-null `answer` is `Result`.
/// 4. Everything else is `Malformed`.
pub fn classify_frame(raw: &str) -> StatusFrame {
    let malformed = || StatusFrame::Malformed {
        raw: raw.to_string(),
    };

    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return malformed(),
    };
    let Some(obj) = value.as_object() else {
        return malformed();
    };

    match obj.get("status") {
        Some(serde_json::Value::Null) | None => {}
        Some(serde_json::Value::String(status)) => {
            return match ControlKind::from_keyword(status) {
                Some(kind) => StatusFrame::control(kind),
                None => StatusFrame::Unrecognized {
                    status: status.clone(),
                },
            };
        }
        Some(other) => {
            return StatusFrame::Unrecognized {
                status: other.to_string(),
            };
        }
    }

    let domain = obj.get("domain").and_then(|v| v.as_str());
    let answer = obj.get("answer").filter(|v| !v.is_null());

    match (domain, answer) {
        (Some(domain), Some(answer)) => StatusFrame::Result {
            result: ResultEvent {
                domain: domain.to_string(),
                question: obj
                    .get("question")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                answer: answer.clone(),
                response_time_ms: obj.get("responseTime").and_then(|v| v.as_f64()),
            },
        },
        _ => malformed(),
    }
}
