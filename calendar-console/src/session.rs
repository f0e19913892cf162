use chrono::{Days, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Day,
    Month,
}

/// Where the user is looking. Handed to every menu action instead of living
/// in globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub today: NaiveDate,
    pub current: NaiveDate,
    pub view: View,
}

impl Session {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            current: today,
            view: View::Month,
        }
    }

    /// Switches view and jumps back to today.
    pub fn show(&mut self, view: View) {
        self.view = view;
        self.current = self.today;
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.view = View::Day;
        self.current = date;
    }

    pub fn previous(&mut self) {
        let moved = match self.view {
            View::Day => self.current.checked_sub_days(Days::new(1)),
            View::Month => self.current.checked_sub_months(Months::new(1)),
        };
        self.current = moved.unwrap_or(self.current);
    }

    pub fn next(&mut self) {
        let moved = match self.view {
            View::Day => self.current.checked_add_days(Days::new(1)),
            View::Month => self.current.checked_add_months(Months::new(1)),
        };
        self.current = moved.unwrap_or(self.current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_view_steps_across_month_end() {
        let mut session = Session::new(date(2024, 1, 31));
        session.show(View::Day);
        session.next();
        assert_eq!(session.current, date(2024, 2, 1));
        session.previous();
        session.previous();
        assert_eq!(session.current, date(2024, 1, 30));
    }

    #[test]
    fn month_view_steps_by_month() {
        let mut session = Session::new(date(2024, 1, 31));
        session.next();
        assert_eq!(session.current, date(2024, 2, 29));
        session.previous();
        session.previous();
        assert_eq!(session.current, date(2023, 12, 29));
    }

    #[test]
    fn show_resets_to_today() {
        let mut session = Session::new(date(2024, 5, 10));
        session.go_to(date(2023, 1, 1));
        assert_eq!(session.view, View::Day);

        session.show(View::Month);
        assert_eq!(session.current, date(2024, 5, 10));
        assert_eq!(session.view, View::Month);
    }
}
