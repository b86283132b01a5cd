use std::fmt;

/// Memory layout of the complex samples a plan consumes and produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(C)]
pub enum Layout {
    /// Real and imaginary parts stored as adjacent pairs in one buffer.
    Interleaved,
    /// Real and imaginary parts stored in two separate buffers.
    Split,
    /// Split input; the output is the pointwise product of the upsampled
    /// real and imaginary components.
    SplitProduct,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Interleaved, Layout::Split, Layout::SplitProduct];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Interleaved => "interleaved",
            Layout::Split => "split",
            Layout::SplitProduct => "split-product",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
