//! Interactive session orchestration.
//!
//! `SessionController` is the write-side API for a host: it turns a
//! measurement into a stored result, forwards deletions to the history, and
//! tracks which view is on screen. Hosts render from `SessionController::state`.

use crate::engine::{classify, compute_bmi, ideal_weight_label};
use crate::history::HistoryStore;
use crate::storage::KvBackend;
use crate::{MeasurementInput, ResultRecord, View};
use chrono::{DateTime, Duration, Local, SecondsFormat, Utc};

/// Record id for a creation instant
///
/// UTC RFC 3339 with a fixed nine-digit fraction, so ids compare in the same
/// order as their instants.
pub fn record_id(created_at: DateTime<Utc>) -> String {
    created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Read-only view of session state for rendering
#[derive(Clone, Copy, Debug)]
pub struct SessionSnapshot<'a> {
    pub view: View,
    pub current_result: Option<&'a ResultRecord>,
    pub history: &'a [ResultRecord],
}

/// Orchestrates a single interactive session
pub struct SessionController<B: KvBackend> {
    history: HistoryStore<B>,
    current_view: View,
    current_result: Option<ResultRecord>,
    date_format: String,
    /// Creation instant of the newest record this session knows about
    last_created_at: Option<DateTime<Utc>>,
}

impl<B: KvBackend> SessionController<B> {
    /// Start a session on top of an opened history
    pub fn new(history: HistoryStore<B>, date_format: impl Into<String>) -> Self {
        let last_created_at = history.records().iter().map(|r| r.created_at).max();
        Self {
            history,
            current_view: View::Input,
            current_result: None,
            date_format: date_format.into(),
            last_created_at,
        }
    }

    /// Compute and store a result for `input`, then show it
    pub fn submit_measurement(&mut self, input: MeasurementInput) -> ResultRecord {
        self.submit_measurement_at(input, Utc::now())
    }

    /// Same as `submit_measurement`, with an explicit clock reading
    ///
    /// The creation instant is moved forward by one nanosecond past the
    /// newest known record when `now` does not advance, keeping ids unique
    /// and increasing.
    pub fn submit_measurement_at(
        &mut self,
        input: MeasurementInput,
        now: DateTime<Utc>,
    ) -> ResultRecord {
        let created_at = match self.last_created_at {
            Some(last) if now <= last => last + Duration::nanoseconds(1),
            _ => now,
        };
        self.last_created_at = Some(created_at);

        let bmi = compute_bmi(input.weight_kg, input.height_cm);
        let category = classify(bmi);
        let ideal_weight_label = ideal_weight_label(input.height_cm, input.gender);

        let record = ResultRecord {
            id: record_id(created_at),
            bmi,
            category,
            ideal_weight_label,
            display_date: self.format_display_date(created_at),
            created_at,
            input,
        };

        tracing::info!(
            "Computed BMI {} ({:?}) for record {}",
            record.bmi,
            record.category,
            record.id
        );

        self.current_result = Some(record.clone());
        self.history.append(record.clone());
        self.current_view = View::Result;
        record
    }

    /// Delete a history entry by id
    ///
    /// The current view and current result are left untouched, even when the
    /// deleted entry is the one on screen.
    pub fn delete_history_entry(&mut self, id: &str) {
        self.history.remove(id);
    }

    /// Move to another view
    ///
    /// Returns `false` and stays put when the transition is not allowed
    /// (only a submission enters `Result`, and `Result` only leads back to
    /// `Input`).
    pub fn navigate(&mut self, to: View) -> bool {
        if !self.current_view.can_transition_to(to) {
            tracing::debug!(
                "Ignoring navigation from {:?} to {:?}",
                self.current_view,
                to
            );
            return false;
        }
        self.current_view = to;
        true
    }

    /// Leave the result view for a new measurement
    pub fn back(&mut self) -> bool {
        self.navigate(View::Input)
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn current_result(&self) -> Option<&ResultRecord> {
        self.current_result.as_ref()
    }

    pub fn history(&self) -> &HistoryStore<B> {
        &self.history
    }

    pub fn state(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            view: self.current_view,
            current_result: self.current_result.as_ref(),
            history: self.history.records(),
        }
    }

    /// End the session, handing back the history
    pub fn into_history(self) -> HistoryStore<B> {
        self.history
    }

    fn format_display_date(&self, created_at: DateTime<Utc>) -> String {
        use std::fmt::Write;

        let local = created_at.with_timezone(&Local);
        let mut out = String::new();
        // chrono reports malformed patterns as a fmt error instead of panicking
        if write!(out, "{}", local.format(&self.date_format)).is_err() {
            tracing::warn!(
                "Invalid date format {:?}, falling back to RFC 3339",
                self.date_format
            );
            return local.to_rfc3339_opts(SecondsFormat::Secs, false);
        }
        out
    }
}
