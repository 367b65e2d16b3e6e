use crate::models::{parse_date_arg, parse_month_arg};
use chrono::{Local, NaiveDate};
use datebox_core::{MonthGrid, ViewMonth, WeekStart};

/// Print the popup grid for a month
#[derive(clap::Args)]
#[command(version, about, long_about = None)]
pub struct GridArgs {
    /// Month as YYYY-MM
    #[arg(value_parser = parse_month_arg)]
    pub month: ViewMonth,

    /// Day to mark as selected, YYYY-MM-DD
    #[arg(long, value_parser = parse_date_arg)]
    pub selected: Option<NaiveDate>,

    /// Start weeks on Monday instead of DATEBOX_WEEK_START
    #[arg(long, default_value_t = false)]
    pub monday: bool,

    /// Pretend today is this date
    #[arg(long, value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,
}

pub fn render_grid(args: &GridArgs) -> String {
    let week_start = if args.monday {
        WeekStart::Monday
    } else {
        WeekStart::from_env()
    };
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    MonthGrid::build(args.month, week_start, args.selected, today).render_text()
}

pub fn handle_grid(args: GridArgs) {
    print!("{}", render_grid(&args));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_marks_selected_and_today() {
        let args = GridArgs {
            month: ViewMonth::new(2024, 3).unwrap(),
            selected: Some(ymd(2024, 3, 15)),
            monday: true,
            today: Some(ymd(2024, 3, 20)),
        };
        let text = render_grid(&args);
        assert!(text.contains("March 2024"));
        assert!(text.contains("[15]"));
        assert!(text.contains("(20)"));
        assert!(text.lines().nth(1).unwrap().trim_start().starts_with("Mo"));
    }
}
