//! Month view: Sunday-started weeks and per-day task lookup.

use crate::model::task::Task;
use chrono::{Datelike, Months, NaiveDate, TimeDelta};

/// Whole weeks covering one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month_start: NaiveDate,
    pub weeks: Vec<[NaiveDate; 7]>,
}

impl MonthGrid {
    /// Whether `date` belongs to the grid's month rather than padding days.
    pub fn in_month(&self, date: NaiveDate) -> bool {
        date.year() == self.month_start.year() && date.month() == self.month_start.month()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.iter().flatten().copied()
    }
}

/// Builds the grid for the month containing `anchor`.
///
/// Padding days that fall outside chrono's date range are clamped to
/// `NaiveDate::MIN` or `NaiveDate::MAX`.
pub fn month_grid(anchor: NaiveDate) -> MonthGrid {
    let month_start = first_of_month(anchor);
    let month_end = month_start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);

    let lead = TimeDelta::days(i64::from(month_start.weekday().num_days_from_sunday()));
    let mut week_start = month_start.checked_sub_signed(lead).unwrap_or(NaiveDate::MIN);
    let mut weeks = Vec::new();
    loop {
        let start = week_start;
        weeks.push(std::array::from_fn(|offset| {
            start
                .checked_add_signed(TimeDelta::days(offset as i64))
                .unwrap_or(NaiveDate::MAX)
        }));
        match week_start.checked_add_signed(TimeDelta::days(7)) {
            Some(next) if next <= month_end => week_start = next,
            _ => break,
        }
    }

    MonthGrid { month_start, weeks }
}

/// Tasks due on `date`, in list order.
pub fn tasks_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.due_date == Some(date))
        .collect()
}

/// Moves `anchor` by `delta` months, clamping the day to the target month's length.
///
/// Out-of-range results leave `anchor` unchanged.
pub fn shift_month(anchor: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        anchor.checked_add_months(months)
    } else {
        anchor.checked_sub_months(months)
    };
    shifted.unwrap_or(anchor)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day0(0).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::{month_grid, shift_month, tasks_on};
    use crate::model::task::TaskStatus;
    use crate::projection::fixtures::{date, task};
    use chrono::{Datelike, NaiveDate, Weekday};

    #[test]
    fn grid_starts_on_sunday_and_covers_month() {
        // March 2025 starts on a Saturday and ends on a Monday.
        let grid = month_grid(date(2025, 3, 18));
        assert_eq!(grid.month_start, date(2025, 3, 1));
        assert_eq!(grid.weeks.len(), 6);
        assert_eq!(grid.weeks[0][0], date(2025, 2, 23));
        assert_eq!(grid.weeks[5][6], date(2025, 4, 5));
        assert!(grid.weeks.iter().all(|week| week[0].weekday() == Weekday::Sun));
        assert_eq!(grid.days().filter(|day| grid.in_month(*day)).count(), 31);
    }

    #[test]
    fn february_starting_on_sunday_fits_four_weeks() {
        let grid = month_grid(date(2015, 2, 1));
        assert_eq!(grid.weeks.len(), 4);
        assert_eq!(grid.weeks[3][6], date(2015, 2, 28));
    }

    #[test]
    fn grid_clamps_padding_at_chrono_limits() {
        let first = month_grid(NaiveDate::MIN);
        assert_eq!(first.month_start, NaiveDate::MIN);
        assert_eq!(first.weeks[0][0], NaiveDate::MIN);

        let last = month_grid(NaiveDate::MAX);
        assert_eq!(last.month_start.month(), NaiveDate::MAX.month());
        assert_eq!(last.days().last(), Some(NaiveDate::MAX));
        assert!(last.in_month(NaiveDate::MAX));
    }

    #[test]
    fn shift_month_clamps_day_and_crosses_years() {
        assert_eq!(shift_month(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(shift_month(date(2025, 1, 15), -1), date(2024, 12, 15));
        assert_eq!(shift_month(date(2025, 6, 1), 0), date(2025, 6, 1));
    }

    #[test]
    fn tasks_on_matches_due_date_only() {
        let day = date(2025, 3, 4);
        let tasks = vec![
            task("a", TaskStatus::Todo, Some(day)),
            task("b", TaskStatus::Done, Some(day)),
            task("c", TaskStatus::Todo, Some(date(2025, 3, 5))),
            task("d", TaskStatus::Todo, None),
        ];
        let ids = tasks_on(&tasks, day)
            .into_iter()
            .map(|task| task.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
