//! Due-date classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a due date sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueStatus {
    Overdue,
    Today,
    Upcoming,
}

impl DueStatus {
    pub fn classify(due: NaiveDate, today: NaiveDate) -> Self {
        match due.cmp(&today) {
            std::cmp::Ordering::Less => DueStatus::Overdue,
            std::cmp::Ordering::Equal => DueStatus::Today,
            std::cmp::Ordering::Greater => DueStatus::Upcoming,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DueStatus::Overdue => "Overdue",
            DueStatus::Today => "Today",
            DueStatus::Upcoming => "Upcoming",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2025, 2, 28), DueStatus::Overdue)]
    #[case(date(2025, 3, 1), DueStatus::Today)]
    #[case(date(2025, 3, 2), DueStatus::Upcoming)]
    #[case(date(2024, 12, 31), DueStatus::Overdue)]
    fn classifies_around_today(#[case] due: NaiveDate, #[case] expected: DueStatus) {
        assert_eq!(DueStatus::classify(due, date(2025, 3, 1)), expected);
    }
}
