//! Cluster partitions and the GPU slice each one hands out

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::AppError;

/// MIG slice (or whole GPU) bound to a partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub(crate) enum GpuSlice {
    Mig1g10gb,
    Mig2g20gb,
    Mig3g40gb,
    A100,
}

impl GpuSlice {
    pub(crate) const ALL: [GpuSlice; 4] = [
        GpuSlice::Mig1g10gb,
        GpuSlice::Mig2g20gb,
        GpuSlice::Mig3g40gb,
        GpuSlice::A100,
    ];

    /// Name as it appears in a gres string
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            GpuSlice::Mig1g10gb => "1g.10gb",
            GpuSlice::Mig2g20gb => "2g.20gb",
            GpuSlice::Mig3g40gb => "3g.40gb",
            GpuSlice::A100 => "A100.80gb",
        }
    }

    /// MIG units in one slice of this type
    pub(crate) fn mig_units(self) -> u64 {
        match self {
            GpuSlice::Mig1g10gb => 1,
            GpuSlice::Mig2g20gb => 2,
            GpuSlice::Mig3g40gb => 4,
            GpuSlice::A100 => 8,
        }
    }
}

impl fmt::Display for GpuSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GpuSlice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        GpuSlice::ALL
            .into_iter()
            .find(|slice| slice.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AppError::InvalidGpuSlice {
                input: trimmed.to_string(),
            })
    }
}

impl TryFrom<String> for GpuSlice {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub(crate) enum Partition {
    Gpu1g10gb,
    Gpu2g20gb,
    Gpu3g40gb,
    GpuA100,
}

impl Partition {
    pub(crate) const ALL: [Partition; 4] = [
        Partition::Gpu1g10gb,
        Partition::Gpu2g20gb,
        Partition::Gpu3g40gb,
        Partition::GpuA100,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Partition::Gpu1g10gb => "gpu_1g.10gb",
            Partition::Gpu2g20gb => "gpu_2g.20gb",
            Partition::Gpu3g40gb => "gpu_3g.40gb",
            Partition::GpuA100 => "gpu_a100.80gb",
        }
    }

    pub(crate) fn slice(self) -> GpuSlice {
        match self {
            Partition::Gpu1g10gb => GpuSlice::Mig1g10gb,
            Partition::Gpu2g20gb => GpuSlice::Mig2g20gb,
            Partition::Gpu3g40gb => GpuSlice::Mig3g40gb,
            Partition::GpuA100 => GpuSlice::A100,
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Partition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Partition::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AppError::UnknownPartition {
                input: trimmed.to_string(),
            })
    }
}

impl TryFrom<String> for Partition {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
