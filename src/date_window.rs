//! Relative date windows ("7d", "30d", "YTD", "ALL") for reporting queries.
//!
//! Windows count back from a fixed reference date instead of the wall clock,
//! because the dataset is a frozen historical snapshot.

use chrono::{Days, NaiveDate};
use serde::Deserialize;
use tokio_postgres::types::ToSql;

/// Number of days a `YTD` window spans.
const YTD_DAYS: u64 = 365;

/// A parsed date-window token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// No date restriction.
    All,
    /// The last `n` days up to the reference date.
    LastDays(u64),
}

impl DateWindow {
    /// Parses a token. Unrecognized input means no restriction.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();

        if token.eq_ignore_ascii_case("ALL")
            || token.eq_ignore_ascii_case("Histórico")
            || token.eq_ignore_ascii_case("Historico")
        {
            return Self::All;
        }

        if token.eq_ignore_ascii_case("YTD") {
            return Self::LastDays(YTD_DAYS);
        }

        let digits = token.strip_suffix('d').unwrap_or(token);
        match digits.parse::<u64>() {
            Ok(days) => Self::LastDays(days),
            Err(_) => {
                tracing::debug!("Unrecognized date window {:?}, not filtering", token);
                Self::All
            }
        }
    }

    /// The earliest included date, or `None` when unrestricted.
    pub fn cutoff(&self, reference: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::All => None,
            Self::LastDays(days) => reference.checked_sub_days(Days::new(*days)),
        }
    }
}

/// The `?dias=` query string shared by the reporting routes.
#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    #[serde(default = "default_token")]
    pub dias: String,
}

impl WindowQuery {
    pub fn window(&self) -> DateWindow {
        DateWindow::parse(&self.dias)
    }
}

fn default_token() -> String {
    "ALL".to_string()
}

/// A predicate on one date column, rendered as SQL plus its bound parameter.
///
/// The fragment starts with `AND` so it can be appended to an existing
/// `WHERE`. The cutoff is always bound as `$1`, never formatted into the text.
#[derive(Debug, Clone)]
pub struct DateFilter {
    column: &'static str,
    cutoff: Option<NaiveDate>,
}

impl DateFilter {
    pub fn new(window: DateWindow, reference: NaiveDate, column: &'static str) -> Self {
        Self {
            column,
            cutoff: window.cutoff(reference),
        }
    }

    /// The SQL fragment, empty when unrestricted.
    pub fn predicate(&self) -> String {
        match self.cutoff {
            Some(_) => format!("AND {} >= $1", self.column),
            None => String::new(),
        }
    }

    /// Parameters matching the placeholders in [`DateFilter::predicate`].
    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        match &self.cutoff {
            Some(date) => vec![date as &(dyn ToSql + Sync)],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
    }

    #[test]
    fn all_and_historic_aliases_are_unrestricted() {
        for token in ["ALL", "all", "Histórico", "Historico", " ALL "] {
            assert_eq!(DateWindow::parse(token), DateWindow::All, "{token}");
        }
    }

    #[test]
    fn day_tokens_count_back_from_reference() {
        assert_eq!(DateWindow::parse("7d"), DateWindow::LastDays(7));
        assert_eq!(DateWindow::parse("30d"), DateWindow::LastDays(30));
        assert_eq!(
            DateWindow::parse("30d").cutoff(reference()),
            NaiveDate::from_ymd_opt(2020, 12, 2)
        );
        assert_eq!(
            DateWindow::parse("7d").cutoff(reference()),
            NaiveDate::from_ymd_opt(2020, 12, 25)
        );
    }

    #[test]
    fn ytd_is_365_days() {
        assert_eq!(DateWindow::parse("YTD"), DateWindow::parse("365d"));
        assert_eq!(
            DateWindow::parse("YTD").cutoff(reference()),
            NaiveDate::from_ymd_opt(2020, 1, 2)
        );
    }

    #[test]
    fn bare_number_is_accepted_as_days() {
        assert_eq!(DateWindow::parse("90"), DateWindow::LastDays(90));
    }

    #[test]
    fn malformed_tokens_degrade_to_unrestricted() {
        for token in ["", "abc", "7days", "d", "-5d", "1.5d", "30dd"] {
            assert_eq!(DateWindow::parse(token), DateWindow::All, "{token:?}");
        }
    }

    #[test]
    fn zero_days_starts_at_reference() {
        assert_eq!(DateWindow::parse("0d").cutoff(reference()), Some(reference()));
    }

    #[test]
    fn calendar_underflow_is_unrestricted() {
        assert_eq!(DateWindow::LastDays(u64::MAX).cutoff(reference()), None);
        let filter = DateFilter::new(DateWindow::LastDays(u64::MAX), reference(), "o.order_date");
        assert!(filter.predicate().is_empty());
        assert!(filter.params().is_empty());
    }

    #[test]
    fn filter_renders_bound_predicate() {
        let filter = DateFilter::new(DateWindow::LastDays(30), reference(), "o.order_date");
        assert_eq!(filter.predicate(), "AND o.order_date >= $1");
        assert_eq!(filter.params().len(), 1);
        assert!(!filter.predicate().contains("2020"));
    }

    #[test]
    fn unrestricted_filter_is_empty() {
        let filter = DateFilter::new(DateWindow::All, reference(), "o.order_date");
        assert_eq!(filter.predicate(), "");
        assert!(filter.params().is_empty());
    }
}
