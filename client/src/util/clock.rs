//! Local wall-clock access.

use network::tools::LocalTimestamp;

/// Current local time, or the Unix epoch outside the browser.
#[must_use]
pub fn now_local() -> LocalTimestamp {
    #[cfg(feature = "hydrate")]
    {
        let now = js_sys::Date::new_0();
        LocalTimestamp {
            day: now.get_date(),
            month: now.get_month() + 1,
            year: i32::try_from(now.get_full_year()).unwrap_or_default(),
            hour: now.get_hours(),
            minute: now.get_minutes(),
            second: now.get_seconds(),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        LocalTimestamp {
            day: 1,
            month: 1,
            year: 1970,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}
