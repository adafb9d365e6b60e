use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use chrono_tz::America::New_York;
use chrono_tz::Asia::Seoul;
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketStatus {
    Open,
    Closed,
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketStatus::Open => f.write_str("Open"),
            MarketStatus::Closed => f.write_str("Closed"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClockSnapshot {
    pub eastern: DateTime<Tz>,
    pub seoul: DateTime<Tz>,
    pub status: MarketStatus,
}

pub struct MarketClock;

impl MarketClock {
    pub fn now() -> ClockSnapshot {
        Self::snapshot(Utc::now())
    }

    pub fn snapshot(now: DateTime<Utc>) -> ClockSnapshot {
        let eastern = now.with_timezone(&New_York);
        let seoul = now.with_timezone(&Seoul);
        let status = if Self::is_market_open(&eastern) {
            MarketStatus::Open
        } else {
            MarketStatus::Closed
        };
        ClockSnapshot { eastern, seoul, status }
    }

    /// US regular session: Mon-Fri 09:30:00 - 16:00:00 New York time, both ends inclusive.
    /// Exchange holidays are not considered.
    pub fn is_market_open(eastern: &DateTime<Tz>) -> bool {
        let weekday = eastern.weekday();
        if weekday == Weekday::Sat || weekday == Weekday::Sun {
            return false;
        }
        let (Some(open), Some(close)) = (
            NaiveTime::from_hms_opt(9, 30, 0),
            NaiveTime::from_hms_opt(16, 0, 0),
        ) else {
            return false;
        };
        let now = eastern.time();
        open <= now && now <= close
    }
}

impl fmt::Display for ClockSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "US Eastern: {}", self.eastern.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Korea:      {}", self.seoul.format("%Y-%m-%d %H:%M:%S"))?;
        write!(f, "US market:  {}", self.status)
    }
}
