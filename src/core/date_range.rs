use crate::domain::model::{range_span, DateRange, DateSelection, EARLIEST_DATE};
use crate::utils::error::Result;
use chrono::NaiveDate;

/// One date input with fixed bounds. Values outside the bounds are pulled back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateField {
    min: NaiveDate,
    max: NaiveDate,
    value: Option<NaiveDate>,
}

impl DateField {
    pub fn new(min: NaiveDate, max: NaiveDate) -> Self {
        Self {
            min,
            max,
            value: None,
        }
    }

    pub fn min(&self) -> NaiveDate {
        self.min
    }

    pub fn max(&self) -> NaiveDate {
        self.max
    }

    pub fn value(&self) -> Option<NaiveDate> {
        self.value
    }

    pub fn set(&mut self, value: Option<NaiveDate>) {
        self.value = value.map(|v| v.clamp(self.min, self.max));
    }
}

/// Owns the start and end inputs and keeps them within the archive window.
#[derive(Debug, Clone)]
pub struct DateRangeController {
    today: NaiveDate,
    start: DateField,
    end: DateField,
}

impl DateRangeController {
    /// Bounds both fields to `[EARLIEST_DATE, today]` and selects the last
    /// `RANGE_SPAN_DAYS + 1` days.
    pub fn initialize(today: NaiveDate) -> Self {
        // a clock set before the archive began still yields a usable window
        let today = today.max(EARLIEST_DATE);

        let mut start = DateField::new(EARLIEST_DATE, today);
        let mut end = DateField::new(EARLIEST_DATE, today);

        let default_start = today
            .checked_sub_signed(range_span())
            .unwrap_or(EARLIEST_DATE);
        start.set(Some(default_start));
        end.set(Some(today));

        tracing::debug!(
            "Date fields initialized: {:?} .. {:?} (bounds {} .. {})",
            start.value(),
            end.value(),
            EARLIEST_DATE,
            today
        );

        Self { today, start, end }
    }

    pub fn start_field(&self) -> &DateField {
        &self.start
    }

    pub fn end_field(&self) -> &DateField {
        &self.end
    }

    /// Moves the end to `min(start + span, today)`. Clearing the start leaves the end alone.
    pub fn on_start_changed(&mut self, new_start: Option<NaiveDate>) {
        self.start.set(new_start);

        if let Some(start) = self.start.value() {
            let end = start
                .checked_add_signed(range_span())
                .map_or(self.today, |candidate| candidate.min(self.today));
            self.end.set(Some(end));
            tracing::debug!("Start changed to {}, end moved to {}", start, end);
        }
    }

    pub fn on_end_changed(&mut self, new_end: Option<NaiveDate>) {
        self.end.set(new_end);
    }

    pub fn selection(&self) -> DateSelection {
        DateSelection::new(self.start.value(), self.end.value())
    }

    pub fn range(&self) -> Result<DateRange> {
        self.selection().to_range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_initialize_defaults() {
        let today = date(2024, 3, 20);
        let controller = DateRangeController::initialize(today);

        assert_eq!(controller.start_field().value(), Some(date(2024, 3, 12)));
        assert_eq!(controller.end_field().value(), Some(today));
        assert_eq!(controller.start_field().min(), EARLIEST_DATE);
        assert_eq!(controller.start_field().max(), today);
        assert_eq!(controller.end_field().min(), EARLIEST_DATE);
        assert_eq!(controller.end_field().max(), today);
    }

    #[test]
    fn test_initialize_near_epoch_clamps_start() {
        let today = date(1995, 6, 20);
        let controller = DateRangeController::initialize(today);

        assert_eq!(controller.start_field().value(), Some(EARLIEST_DATE));
        assert_eq!(controller.end_field().value(), Some(today));
    }

    #[test]
    fn test_start_change_moves_end_by_span() {
        let mut controller = DateRangeController::initialize(date(2024, 3, 20));
        controller.on_start_changed(Some(date(2024, 1, 1)));

        assert_eq!(controller.start_field().value(), Some(date(2024, 1, 1)));
        assert_eq!(controller.end_field().value(), Some(date(2024, 1, 9)));
    }

    #[test]
    fn test_start_change_end_capped_at_today() {
        let today = date(2024, 3, 20);
        let mut controller = DateRangeController::initialize(today);
        controller.on_start_changed(Some(date(2024, 3, 18)));

        assert_eq!(controller.end_field().value(), Some(today));
    }

    #[test]
    fn test_end_never_before_start_for_any_start() {
        let today = date(2024, 3, 20);
        let mut controller = DateRangeController::initialize(today);

        let mut start = EARLIEST_DATE;
        while start <= today {
            controller.on_start_changed(Some(start));
            let expected = (start + Duration::days(8)).min(today);
            let range = controller.range().unwrap();
            assert_eq!(range.end(), expected);
            assert!(range.end() >= range.start());
            start += Duration::days(97);
        }
    }

    #[test]
    fn test_out_of_bounds_input_is_clamped() {
        let today = date(2024, 3, 20);
        let mut controller = DateRangeController::initialize(today);

        controller.on_start_changed(Some(date(1990, 1, 1)));
        assert_eq!(controller.start_field().value(), Some(EARLIEST_DATE));

        controller.on_start_changed(Some(date(2030, 1, 1)));
        assert_eq!(controller.start_field().value(), Some(today));
        assert_eq!(controller.end_field().value(), Some(today));

        controller.on_end_changed(Some(date(2031, 5, 5)));
        assert_eq!(controller.end_field().value(), Some(today));
    }

    #[test]
    fn test_cleared_start_keeps_end() {
        let today = date(2024, 3, 20);
        let mut controller = DateRangeController::initialize(today);
        controller.on_start_changed(None);

        assert_eq!(controller.start_field().value(), None);
        assert_eq!(controller.end_field().value(), Some(today));
        assert!(controller.range().is_err());
    }
}
