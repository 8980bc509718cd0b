use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::partition::GpuSlice;
use crate::error::AppError;

/// Parsed `gpu:<type>:<count>` / `gpu:<count>` generic-resource request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub(crate) struct Gres {
    /// `None` when the type was omitted and the partition's slice applies
    pub(crate) slice: Option<GpuSlice>,
    pub(crate) count: u32,
}

impl Gres {
    pub(crate) fn new(slice: GpuSlice, count: u32) -> Self {
        Gres {
            slice: Some(slice),
            count,
        }
    }
}

impl fmt::Display for Gres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slice {
            Some(slice) => write!(f, "gpu:{slice}:{}", self.count),
            None => write!(f, "gpu:{}", self.count),
        }
    }
}

impl FromStr for Gres {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || AppError::InvalidGres {
            input: trimmed.to_string(),
        };

        let mut parts = trimmed.split(':');
        if !parts.next().is_some_and(|kind| kind.eq_ignore_ascii_case("gpu")) {
            return Err(invalid());
        }
        let (slice, count) = match (parts.next(), parts.next(), parts.next()) {
            (Some(count), None, None) => (None, count),
            (Some(slice), Some(count), None) => (Some(slice.parse::<GpuSlice>()?), count),
            _ => return Err(invalid()),
        };
        let count: u32 = count.parse().map_err(|_| invalid())?;
        if count == 0 {
            return Err(invalid());
        }
        Ok(Gres { slice, count })
    }
}

impl TryFrom<String> for Gres {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
