use preview_chart::core::{
    GridStepRule, GridlineFadeQueue, PreviewWindow, VisibleSlice, YScaleAnimation, nice_step,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn visible_indices_stay_inside_the_series(
        samples in 2usize..2_000,
        start in 0.0f64..0.9,
        span in 0.1f64..1.0
    ) {
        let end = (start + span).min(1.0);
        prop_assume!(end - start >= 0.1);
        let timestamps: Vec<f64> = (0..samples).map(|i| i as f64 * 60.0).collect();
        let slice = VisibleSlice::resolve(&timestamps, start, end).expect("non-degenerate");
        prop_assert!(slice.start_index <= samples - 1);
        prop_assert!(slice.end_index <= samples - 1);
        prop_assert!(slice.min_x <= slice.max_x);
    }

    #[test]
    fn left_handle_never_crosses_the_minimum_span(
        moves in prop::collection::vec(-2.0f64..3.0, 1..64),
        end in 0.1f64..=1.0
    ) {
        let mut window = PreviewWindow::new(0.0, end, 0.1).expect("window");
        for fraction in moves {
            window.drag_start_to(fraction);
            let (start, end) = window.target();
            prop_assert!(start >= 0.0);
            prop_assert!(start <= end - 0.1 + 1e-12);
        }
    }

    #[test]
    fn y_scale_distance_never_grows_for_a_fixed_target(
        initial in 0.01f64..1.0,
        target in 0.01f64..1.0,
        frames in 1usize..40
    ) {
        let mut anim = YScaleAnimation::new(initial, 10.0);
        anim.retarget(target);
        let mut distance = (anim.current() - anim.target()).abs();
        for _ in 0..frames {
            anim.step();
            let next = (anim.current() - anim.target()).abs();
            prop_assert!(next <= distance);
            distance = next;
        }
    }

    #[test]
    fn only_the_live_gridline_set_brightens(
        pushes in prop::collection::vec(0.05f64..1.0, 1..6),
        frames in 1usize..30
    ) {
        let fade_step = 0.08;
        let mut queue = GridlineFadeQueue::new(1.0, fade_step);
        for target in pushes {
            queue.push_live(target);
        }
        for _ in 0..frames {
            let before: Vec<f64> = queue.sets().iter().map(|set| set.alpha).collect();
            queue.step();
            let after = queue.sets();
            prop_assert!(after[0].alpha >= before[0]);
            for set in &after[1..] {
                prop_assert!(set.alpha > fade_step);
                prop_assert!(set.alpha <= 1.0);
            }
            prop_assert!(after.len() <= before.len());
        }
    }

    #[test]
    fn nice_step_is_stable_and_monotonic_within_a_decade(
        exponent in 0i32..7,
        a in 1.0f64..9.99,
        b in 1.0f64..9.99
    ) {
        let scale = 10f64.powi(exponent);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low = low * scale;
        let high = high * scale;
        prop_assert_eq!(nice_step(low), nice_step(low));
        prop_assert!(nice_step(low) <= nice_step(high));
    }

    #[test]
    fn gridline_values_start_at_zero(max_y in 1.0f64..1e9) {
        let values = GridStepRule::default().line_values(max_y);
        prop_assert_eq!(values.len(), 6);
        prop_assert_eq!(values[0], 0.0);
        prop_assert!(values[5] <= max_y);
    }
}
