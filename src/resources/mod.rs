//! Resource descriptor of a job
//!
//! Mirrors the scheduler header of a batch file: partition, GPU request,
//! CPU counts, wall-clock limit and environment-export policy.

pub(crate) mod export;
pub(crate) mod gres;
pub(crate) mod partition;
pub(crate) mod walltime;

use serde::Deserialize;

use crate::error::AppError;

pub(crate) use export::{ExportEntry, ExportPolicy};
pub(crate) use gres::Gres;
pub(crate) use partition::{GpuSlice, Partition};
pub(crate) use walltime::WallTime;

/// CPUs the cluster grants per MIG unit
pub(crate) const CPUS_PER_MIG_UNIT: u64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Resources {
    pub(crate) partition: Partition,
    pub(crate) gres: Gres,
    #[serde(default = "one")]
    pub(crate) cpus_per_task: u32,
    #[serde(default = "one")]
    pub(crate) ntasks: u32,
    pub(crate) time: WallTime,
    #[serde(default)]
    pub(crate) export: ExportPolicy,
}

fn one() -> u32 {
    1
}

impl Resources {
    /// Slice actually requested, falling back to the partition's
    pub(crate) fn slice(&self) -> GpuSlice {
        self.gres.slice.unwrap_or_else(|| self.partition.slice())
    }

    /// Gres with the slice spelled out
    pub(crate) fn resolved_gres(&self) -> Gres {
        Gres::new(self.slice(), self.gres.count)
    }

    pub(crate) fn cpu_budget(&self) -> u64 {
        u64::from(self.ntasks) * u64::from(self.cpus_per_task)
    }

    /// Upper bound on `ntasks * cpus_per_task`: 4 CPUs per MIG unit of the
    /// partition's slice, independent of the gres count
    pub(crate) fn max_cpus(&self) -> u64 {
        CPUS_PER_MIG_UNIT * self.partition.slice().mig_units()
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        let provided = self.partition.slice();
        if let Some(requested) = self.gres.slice
            && requested != provided
        {
            return Err(AppError::GresMismatch {
                partition: self.partition.to_string(),
                requested: requested.to_string(),
                provided: provided.to_string(),
            });
        }

        let requested = self.cpu_budget();
        let max = self.max_cpus();
        if !(1..=max).contains(&requested) {
            return Err(AppError::CpuBudget { requested, max });
        }
        Ok(())
    }
}
