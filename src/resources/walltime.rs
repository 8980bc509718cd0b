use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::AppError;

/// Wall-clock limit in `HH:MM:SS`; hours may exceed 24
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub(crate) struct WallTime {
    total_secs: u64,
}

impl WallTime {
    pub(crate) fn from_hms(hours: u64, minutes: u64, seconds: u64) -> Self {
        WallTime {
            total_secs: hours
                .saturating_mul(3600)
                .saturating_add(minutes * 60 + seconds),
        }
    }

    pub(crate) fn as_secs(self) -> u64 {
        self.total_secs
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.total_secs / 3600;
        let m = (self.total_secs % 3600) / 60;
        let s = self.total_secs % 60;
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

impl FromStr for WallTime {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || AppError::InvalidWallTime {
            input: trimmed.to_string(),
        };

        let fields: Vec<&str> = trimmed.split(':').collect();
        let [h, m, sec] = fields.as_slice() else {
            return Err(invalid());
        };
        // Minutes and seconds are always two digits
        if h.is_empty() || m.len() != 2 || sec.len() != 2 {
            return Err(invalid());
        }
        let parse = |field: &str| -> Result<u64, AppError> {
            if !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            field.parse().map_err(|_| invalid())
        };
        let (hours, minutes, seconds) = (parse(*h)?, parse(*m)?, parse(*sec)?);
        if minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }
        let wall = WallTime::from_hms(hours, minutes, seconds);
        if wall.as_secs() == 0 {
            return Err(invalid());
        }
        Ok(wall)
    }
}

impl TryFrom<String> for WallTime {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
