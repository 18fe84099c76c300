use chrono::{DateTime, Datelike, Duration, Local, NaiveTime, TimeZone};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Local midnight of the most recent Monday. On a Monday this is today's midnight.
pub fn start_of_week() -> DateTime<Local> {
    start_of_week_from(Local::now())
}

/// Start of the week containing `now`, in `now`'s own time zone.
pub fn start_of_week_from<Tz: TimeZone>(now: DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let days_back = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date_naive() - Duration::days(days_back);
    let midnight = monday.and_time(NaiveTime::MIN);

    // A DST gap can swallow midnight: take the first wall time of Monday that exists.
    (0..MINUTES_PER_DAY)
        .find_map(|minutes| {
            tz.from_local_datetime(&(midnight + Duration::minutes(minutes)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}
