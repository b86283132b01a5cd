use std::ffi::CStr;

use upsample_core::{
    StatisticKind,
    capi::{
        UpsamplePlan, upsample_acquire, upsample_destroy_plan, upsample_execute_interleaved, upsample_execute_split,
        upsample_execute_split_product, upsample_get_name, upsample_get_statistic_float, upsample_plan_3d_interleaved_best,
        upsample_plan_3d_split_best, upsample_plan_3d_split_product_best, upsample_set_flags,
    },
    STATISTIC_EXECUTION_TIME,
};

#[test]
fn interleaved_round_trip() {
    let plan: UpsamplePlan = upsample_plan_3d_interleaved_best(2, 3, 4, 0);
    assert!(!plan.is_null());

    unsafe {
        let name: &str = CStr::from_ptr(upsample_get_name(plan)).to_str().unwrap();
        assert!(name.ends_with("-interleaved"), "{name}");

        let input: Vec<f64> = [0.75, -0.5].repeat(24);
        let mut output: Vec<f64> = vec![0.0; 2 * 192];
        upsample_execute_interleaved(plan, input.as_ptr(), output.as_mut_ptr());
        for pair in output.chunks_exact(2) {
            assert!((pair[0] - 0.75).abs() < 1e-12 && (pair[1] + 0.5).abs() < 1e-12);
        }

        let mut kind: StatisticKind = StatisticKind::Unknown;
        let mut value: f64 = -1.0;
        upsample_get_statistic_float(plan, STATISTIC_EXECUTION_TIME as i32, 0, &mut kind, &mut value);
        assert_eq!(kind, StatisticKind::Execution);
        assert!(value >= 0.0);

        upsample_get_statistic_float(plan, -3, 0, &mut kind, &mut value);
        assert_eq!(kind, StatisticKind::Unknown);

        let count: i32 = upsample_acquire(plan);
        assert!(count >= 2);
        assert_eq!(upsample_destroy_plan(plan), count - 1);
        upsample_destroy_plan(plan);
    }
}

#[test]
fn split_layouts_round_trip() {
    let rin: Vec<f64> = vec![2.0; 8];
    let iin: Vec<f64> = vec![-3.0; 8];

    unsafe {
        let split: UpsamplePlan = upsample_plan_3d_split_best(2, 2, 2, 0);
        upsample_set_flags(split, 2);
        let mut rout: Vec<f64> = vec![0.0; 64];
        let mut iout: Vec<f64> = vec![0.0; 64];
        upsample_execute_split(split, rin.as_ptr(), iin.as_ptr(), rout.as_mut_ptr(), iout.as_mut_ptr());
        assert!(rout.iter().all(|x| (x - 2.0).abs() < 1e-12));
        assert!(iout.iter().all(|x| (x + 3.0).abs() < 1e-12));
        upsample_destroy_plan(split);

        let product: UpsamplePlan = upsample_plan_3d_split_product_best(2, 2, 2, 0);
        let mut out: Vec<f64> = vec![0.0; 64];
        upsample_execute_split_product(product, rin.as_ptr(), iin.as_ptr(), out.as_mut_ptr());
        assert!(out.iter().all(|x| (x + 6.0).abs() < 1e-12));
        upsample_destroy_plan(product);
    }
}
