/// Kind of a value reported through a plan statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(C)]
pub enum StatisticKind {
    Planning,
    Execution,
    Unknown,
}

/// Elapsed wall-clock seconds of the most recent execution. Always served by
/// the runtime from the plan's timing sample, never by the implementation.
pub const STATISTIC_EXECUTION_TIME: u32 = 1;

/// First identifier available to implementation-specific statistics.
pub const STATISTIC_LAST_COMMON_VALUE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistic {
    pub kind: StatisticKind,
    pub value: f64,
}

impl Statistic {
    pub fn planning(value: f64) -> Self {
        Self {
            kind: StatisticKind::Planning,
            value,
        }
    }

    pub fn execution(value: f64) -> Self {
        Self {
            kind: StatisticKind::Execution,
            value,
        }
    }

    pub fn unknown() -> Self {
        Self {
            kind: StatisticKind::Unknown,
            value: 0.0,
        }
    }
}
