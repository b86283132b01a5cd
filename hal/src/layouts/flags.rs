use std::ops::{BitOr, BitOrAssign};

/// Advisory layout hints passed to a plan at construction or through
/// `set_flags`. Implementations are free to ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlanFlags(u32);

impl PlanFlags {
    pub const NONE: PlanFlags = PlanFlags(0);
    /// Keep real and imaginary parts packed in one complex work buffer.
    pub const PREFER_PACKED_LAYOUT: PlanFlags = PlanFlags(1);
    /// Keep real and imaginary parts in separate work buffers.
    pub const PREFER_SPLIT_LAYOUT: PlanFlags = PlanFlags(2);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn contains(&self, other: PlanFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when the split hint is set and the packed hint is not; packed
    /// wins when both are present.
    pub const fn prefers_split(&self) -> bool {
        self.contains(Self::PREFER_SPLIT_LAYOUT) && !self.contains(Self::PREFER_PACKED_LAYOUT)
    }
}

impl BitOr for PlanFlags {
    type Output = PlanFlags;

    fn bitor(self, rhs: PlanFlags) -> PlanFlags {
        PlanFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for PlanFlags {
    fn bitor_assign(&mut self, rhs: PlanFlags) {
        self.0 |= rhs.0
    }
}
