//! 课表时间工具
//!
//! 学年起点、作息时间段与出勤率计算。

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};

/// 作息时间表：每节课的开始 (时, 分) 与显示时段
const BELL_SCHEDULE: &[((u32, u32), &str)] = &[
    ((8, 0), "8:00 - 8:45"),
    ((8, 55), "8:55 - 9:40"),
    ((9, 50), "9:50 - 10:35"),
    ((10, 50), "10:50 - 11:35"),
    ((11, 45), "11:45 - 12:30"),
    ((12, 40), "12:40 - 13:25"),
    ((13, 35), "13:35 - 14:20"),
    ((14, 30), "14:30 - 15:15"),
    ((15, 25), "15:25 - 16:10"),
];

/// 当前学年的起点：9 月及之后取当年 9 月 1 日，否则取上一年 9 月 1 日
pub fn school_year_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let year = if now.month() >= 9 {
        now.year()
    } else {
        now.year() - 1
    };
    Utc.with_ymd_and_hms(year, 9, 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// 将课次开始时间映射到作息时段，不在表内时退回原始时间
pub fn time_slot_for(start: DateTime<Utc>) -> String {
    let key = (start.hour(), start.minute());
    for ((hour, minute), slot) in BELL_SCHEDULE {
        if key == (*hour, *minute) {
            return (*slot).to_string();
        }
    }
    format!("{}:{:02}", start.hour(), start.minute())
}

/// 出勤率：无已上课次时为 100，否则按缺勤占比取整并下限 0
pub fn attendance_percentage(conducted: i64, absences: i64) -> i64 {
    if conducted <= 0 {
        return 100;
    }
    let present = (conducted - absences) as f64;
    let percent = (present / conducted as f64 * 100.0).round() as i64;
    percent.max(0)
}

/// 相对日期描述：Today / Tomorrow / 星期名
pub fn relative_day(now: DateTime<Utc>, target: DateTime<Utc>) -> String {
    let today = now.date_naive();
    let date = target.date_naive();
    if date == today {
        return "Today".to_string();
    }
    if date == today.succ_opt().unwrap_or(today) {
        return "Tomorrow".to_string();
    }
    weekday_name(date.weekday()).to_string()
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap()
    }

    #[test]
    fn test_school_year_start_autumn() {
        let start = school_year_start(at(2025, 10, 15, 12, 0));
        assert_eq!(start, at(2025, 9, 1, 0, 0));
    }

    #[test]
    fn test_school_year_start_spring() {
        let start = school_year_start(at(2026, 3, 10, 12, 0));
        assert_eq!(start, at(2025, 9, 1, 0, 0));
    }

    #[test]
    fn test_school_year_start_boundary() {
        // 9 月 1 日当天已属于新学年
        let start = school_year_start(at(2025, 9, 1, 0, 0));
        assert_eq!(start, at(2025, 9, 1, 0, 0));
        // 8 月 31 日仍属于上一学年
        let start = school_year_start(at(2025, 8, 31, 23, 59));
        assert_eq!(start, at(2024, 9, 1, 0, 0));
    }

    #[test]
    fn test_time_slot_known() {
        assert_eq!(time_slot_for(at(2025, 9, 2, 8, 0)), "8:00 - 8:45");
        assert_eq!(time_slot_for(at(2025, 9, 2, 15, 25)), "15:25 - 16:10");
    }

    #[test]
    fn test_time_slot_fallback() {
        assert_eq!(time_slot_for(at(2025, 9, 2, 16, 5)), "16:05");
    }

    #[test]
    fn test_attendance_no_lessons() {
        assert_eq!(attendance_percentage(0, 0), 100);
    }

    #[test]
    fn test_attendance_rounding() {
        // 3 缺勤 / 7 课次 = 57.14% -> 57
        assert_eq!(attendance_percentage(7, 3), 57);
        assert_eq!(attendance_percentage(10, 0), 100);
        assert_eq!(attendance_percentage(10, 10), 0);
    }

    #[test]
    fn test_attendance_floor_at_zero() {
        // 缺勤数大于课次数时不出现负值
        assert_eq!(attendance_percentage(2, 5), 0);
    }

    #[test]
    fn test_relative_day() {
        let now = at(2025, 9, 1, 10, 0); // 周一
        assert_eq!(relative_day(now, at(2025, 9, 1, 12, 0)), "Today");
        assert_eq!(relative_day(now, at(2025, 9, 2, 8, 0)), "Tomorrow");
        assert_eq!(relative_day(now, at(2025, 9, 3, 8, 0)), "Wednesday");
    }
}
