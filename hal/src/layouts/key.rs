use std::fmt;

use crate::layouts::Layout;

/// Identifies one problem instance: the coarse shape `n0 x n1 x n2`
/// (row-major, `n2` fastest) together with its [`Layout`].
///
/// Two keys are equal iff all four fields are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanKey {
    pub n0: usize,
    pub n1: usize,
    pub n2: usize,
    pub layout: Layout,
}

impl PlanKey {
    pub fn new(n0: usize, n1: usize, n2: usize, layout: Layout) -> Self {
        Self { n0, n1, n2, layout }
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{} ({})", self.n0, self.n1, self.n2, self.layout)
    }
}
