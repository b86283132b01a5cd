use crate::layouts::Layout;

/// Refinement factor applied to every axis.
pub const UPSAMPLE_FACTOR: usize = 2;

/// Grid geometry of one problem instance at the coarse and fine resolution.
///
/// All arrays are stored fastest-axis-first: for a row-major `n0 x n1 x n2`
/// grid, index 0 refers to `n2`. Strides describe a packed row-major layout at
/// each resolution, so the element `(i0, i1, i2)` of the coarse grid lives at
/// `i0 * strides[0] + i1 * strides[1] + i2 * strides[2]` where `i0` runs
/// along `dims[0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Properties {
    pub layout: Layout,
    pub dims: [usize; 3],
    pub strides: [usize; 3],
    pub fine_dims: [usize; 3],
    pub fine_strides: [usize; 3],
}

impl Properties {
    pub fn new(layout: Layout, n0: usize, n1: usize, n2: usize) -> Self {
        let dims: [usize; 3] = [n2, n1, n0];
        let fine_dims: [usize; 3] = dims.map(|n| n * UPSAMPLE_FACTOR);

        Self {
            layout,
            dims,
            strides: [1, n2, n2 * n1],
            fine_dims,
            // Both faster axes have doubled by the time the slowest one is
            // reached, hence the factor 4 on the last stride.
            fine_strides: [1, n2 * 2, n2 * n1 * 4],
        }
    }

    /// Number of samples of the coarse grid.
    pub fn element_count(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    /// Number of samples of the fine grid.
    pub fn fine_element_count(&self) -> usize {
        self.fine_dims[0] * self.fine_dims[1] * self.fine_dims[2]
    }

    #[inline(always)]
    pub fn coarse_offset(&self, i0: usize, i1: usize, i2: usize) -> usize {
        i0 * self.strides[0] + i1 * self.strides[1] + i2 * self.strides[2]
    }

    #[inline(always)]
    pub fn fine_offset(&self, i0: usize, i1: usize, i2: usize) -> usize {
        i0 * self.fine_strides[0] + i1 * self.fine_strides[1] + i2 * self.fine_strides[2]
    }
}

/// Number of frequency bins in one corner of an axis of length `n`.
///
/// The positive corner receives `n / 2 + 1` bins and the negative corner
/// `n / 2`. For even `n` both corners contain the Nyquist bin; for odd `n`
/// the corners partition the axis.
#[inline(always)]
pub fn corner_size(n: usize, negative: bool) -> usize {
    n / 2 + (!negative) as usize
}

/// True if the fine-grid frequency index `f` of an axis whose coarse length is
/// `n` falls inside one of the two corners that receive coarse coefficients.
#[inline(always)]
pub fn in_corner(n: usize, f: usize) -> bool {
    f < corner_size(n, false) || f >= UPSAMPLE_FACTOR * n - corner_size(n, true)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn split_product_4x4x4() {
        let props: Properties = Properties::new(Layout::SplitProduct, 4, 4, 4);
        assert_eq!(props.dims, [4, 4, 4]);
        assert_eq!(props.fine_dims, [8, 8, 8]);
        assert_eq!(props.strides, [1, 4, 16]);
        assert_eq!(props.fine_strides, [1, 8, 64]);
        assert_eq!(props.element_count(), 64);
        assert_eq!(props.fine_element_count(), 512);
    }

    #[test]
    fn dims_are_fastest_axis_first() {
        let props: Properties = Properties::new(Layout::Interleaved, 2, 3, 5);
        assert_eq!(props.dims, [5, 3, 2]);
        assert_eq!(props.strides, [1, 5, 15]);
        assert_eq!(props.fine_strides, [1, 10, 60]);
        assert_eq!(props.coarse_offset(4, 2, 1), 4 + 10 + 15);
        assert_eq!(props.fine_offset(9, 5, 3), 9 + 50 + 180);
    }

    #[test]
    fn corner_sizes() {
        assert_eq!(corner_size(5, false), 3);
        assert_eq!(corner_size(5, true), 2);
        assert_eq!(corner_size(4, false), 3);
        assert_eq!(corner_size(4, true), 2);
        assert_eq!(corner_size(1, false), 1);
        assert_eq!(corner_size(1, true), 0);
    }

    #[test]
    fn corners_of_fine_axis() {
        // n = 4: bins 0, 1, 2 and 6, 7 of the fine axis of length 8.
        let occupied: Vec<usize> = (0..8).filter(|f| in_corner(4, *f)).collect();
        assert_eq!(occupied, vec![0, 1, 2, 6, 7]);
        // n = 3: bins 0, 1 and 5.
        let occupied: Vec<usize> = (0..6).filter(|f| in_corner(3, *f)).collect();
        assert_eq!(occupied, vec![0, 1, 5]);
    }

    proptest! {
        #[test]
        fn fine_dims_double_coarse_dims(n0 in 1usize..64, n1 in 1usize..64, n2 in 1usize..64) {
            let props: Properties = Properties::new(Layout::Split, n0, n1, n2);
            for i in 0..3 {
                prop_assert_eq!(props.fine_dims[i], 2 * props.dims[i]);
            }
            prop_assert_eq!(props.strides[2] * props.dims[2], props.element_count());
            prop_assert_eq!(props.fine_strides[2] * props.fine_dims[2], props.fine_element_count());
        }

        #[test]
        fn corners_cover_axis(n in 1usize..4096) {
            let total: usize = corner_size(n, false) + corner_size(n, true);
            if n % 2 == 0 {
                prop_assert_eq!(total, n + 1);
            } else {
                prop_assert_eq!(total, n);
            }
        }
    }
}
