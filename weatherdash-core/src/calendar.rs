use chrono::{Datelike, Month, NaiveDate};

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One month of a Monday-first grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub name: &'static str,
    /// Empty cells before the 1st.
    pub leading_blanks: u32,
    pub days: u32,
    /// Day of month to highlight, when this month contains today.
    pub today: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearCalendar {
    pub year: i32,
    pub months: Vec<MonthGrid>,
}

impl YearCalendar {
    /// The grid for the year containing `today`.
    pub fn for_date(today: NaiveDate) -> Self {
        let year = today.year();
        let months = (1..=12u32)
            .filter_map(|m| {
                let first = NaiveDate::from_ymd_opt(year, m, 1)?;
                let month = Month::try_from(m as u8).ok()?;
                Some(MonthGrid {
                    name: month.name(),
                    leading_blanks: first.weekday().num_days_from_monday(),
                    days: days_in_month(first),
                    today: (today.month() == m).then(|| today.day()),
                })
            })
            .collect();

        Self { year, months }
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.and_then(|n| n.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn twelve_months_with_names() {
        let cal = YearCalendar::for_date(date(2024, 3, 9));
        assert_eq!(cal.year, 2024);
        assert_eq!(cal.months.len(), 12);
        assert_eq!(cal.months[0].name, "January");
        assert_eq!(cal.months[11].name, "December");
    }

    #[test]
    fn month_lengths_account_for_leap_years() {
        let cal = YearCalendar::for_date(date(2024, 1, 1));
        assert_eq!(cal.months[1].days, 29);
        assert_eq!(cal.months[11].days, 31);

        let cal = YearCalendar::for_date(date(2023, 1, 1));
        assert_eq!(cal.months[1].days, 28);
    }

    #[test]
    fn weeks_start_on_monday() {
        // 2024-01-01 was a Monday, 2024-09-01 a Sunday.
        let cal = YearCalendar::for_date(date(2024, 5, 5));
        assert_eq!(cal.months[0].leading_blanks, 0);
        assert_eq!(cal.months[8].leading_blanks, 6);
    }

    #[test]
    fn only_current_month_marks_today() {
        let cal = YearCalendar::for_date(date(2024, 3, 9));
        assert_eq!(cal.months[2].today, Some(9));
        assert!(cal.months.iter().filter(|m| m.today.is_some()).count() == 1);
    }
}
