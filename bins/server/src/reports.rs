//! Built-in sample reports.
//!
//! Deployments contribute real reports by registering handlers at startup.
//! These two need no external data source and double as working examples of
//! the handler contract.

use std::io::Write;

use chrono::{Datelike, NaiveDate};

use tessera_core::export::{ExportError, ExportForm, ReportHandler, ReportRegistry};
use tessera_shared::clock::month_start;

/// Registers the built-in reports.
pub fn register_builtin(registry: &mut ReportRegistry) -> Result<(), ExportError> {
    registry.register("period_calendar", Box::new(PeriodCalendar))?;
    registry.register("month_ends", Box::new(MonthEnds))?;
    Ok(())
}

/// One row per day in the selected range.
struct PeriodCalendar;

impl ReportHandler for PeriodCalendar {
    fn description(&self) -> &str {
        "Period Calendar Report"
    }

    fn write_csv(&self, form: &ExportForm, out: &mut dyn Write) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_writer(out);
        writer
            .write_record(["date", "weekday", "iso_week", "month"])
            .map_err(ExportError::handler)?;

        let mut day = form.from_date;
        while day <= form.to_date {
            writer
                .write_record([
                    day.to_string(),
                    day.weekday().to_string(),
                    day.iso_week().week().to_string(),
                    format!("{:04}-{:02}", day.year(), day.month()),
                ])
                .map_err(ExportError::handler)?;
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }

        writer.flush().map_err(ExportError::handler)?;
        Ok(())
    }
}

/// One row per calendar month touched by the selected range, with the part
/// of the month that falls inside the range.
struct MonthEnds;

impl ReportHandler for MonthEnds {
    fn description(&self) -> &str {
        "Month End Dates Report"
    }

    fn write_csv(&self, form: &ExportForm, out: &mut dyn Write) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_writer(out);
        writer
            .write_record(["month", "first_day", "last_day"])
            .map_err(ExportError::handler)?;

        let mut cursor = month_start(form.from_date);
        while cursor <= form.to_date {
            let next_month = next_month_start(cursor);
            let month_last = next_month.pred_opt().unwrap_or(cursor);
            writer
                .write_record([
                    format!("{:04}-{:02}", cursor.year(), cursor.month()),
                    cursor.max(form.from_date).to_string(),
                    month_last.min(form.to_date).to_string(),
                ])
                .map_err(ExportError::handler)?;
            cursor = next_month;
        }

        writer.flush().map_err(ExportError::handler)?;
        Ok(())
    }
}

/// First day of the month after the one containing `date`.
fn next_month_start(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // MAX ends the caller's loop at the calendar edge
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(from: (i32, u32, u32), to: (i32, u32, u32)) -> ExportForm {
        ExportForm {
            from_date: NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            to_date: NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
            party: None,
            report: String::new(),
        }
    }

    fn render(handler: &dyn ReportHandler, form: &ExportForm) -> Vec<String> {
        let mut out = Vec::new();
        handler.write_csv(form, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_period_calendar_one_row_per_day() {
        let lines = render(&PeriodCalendar, &form((2026, 1, 30), (2026, 2, 2)));
        assert_eq!(lines.len(), 5); // header + 4 days
        assert_eq!(lines[0], "date,weekday,iso_week,month");
        assert_eq!(lines[1], "2026-01-30,Fri,5,2026-01");
        assert_eq!(lines[4], "2026-02-02,Mon,6,2026-02");
    }

    #[test]
    fn test_period_calendar_single_day_range() {
        let lines = render(&PeriodCalendar, &form((2026, 8, 19), (2026, 8, 19)));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_month_ends_clamps_to_range() {
        let lines = render(&MonthEnds, &form((2026, 1, 15), (2026, 3, 10)));
        assert_eq!(lines.len(), 4); // header + Jan, Feb, Mar
        assert_eq!(lines[1], "2026-01,2026-01-15,2026-01-31");
        assert_eq!(lines[2], "2026-02,2026-02-01,2026-02-28");
        assert_eq!(lines[3], "2026-03,2026-03-01,2026-03-10");
    }

    #[test]
    fn test_month_ends_across_year_boundary() {
        let lines = render(&MonthEnds, &form((2025, 12, 20), (2026, 1, 5)));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2025-12,2025-12-20,2025-12-31");
        assert_eq!(lines[2], "2026-01,2026-01-01,2026-01-05");
    }

    #[test]
    fn test_builtin_registration() {
        let mut registry = ReportRegistry::new();
        register_builtin(&mut registry).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("period_calendar").is_some());
        assert!(registry.get("month_ends").is_some());
    }
}
