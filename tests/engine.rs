use std::sync::Arc;

use plot_resampler::{
    view_channel, AuxChannel, AxisGroup, Downsample, HfStore, Lttb, PlotResampler, ResampleError,
    ResamplerConfig, TraceOptions, ViewEvent, VisibleState,
};

// Helper: n uniformly spaced points, y = sin(x / 300)
fn uniform_store(n: usize) -> HfStore {
    let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let y: Vec<f64> = (0..n).map(|i| (i as f64 / 300.0).sin()).collect();
    HfStore::new(x, y).unwrap()
}

fn engine() -> PlotResampler {
    PlotResampler::new(ResamplerConfig::default())
}

#[test]
fn initial_view_is_downsampled_to_the_default_budget() {
    let mut engine = engine();
    let id = engine
        .add_trace("sin", uniform_store(10_000), TraceOptions::default())
        .unwrap();
    let update = engine.initial_view(id).unwrap();
    assert_eq!(update.len(), 1_000);
    assert_eq!(update.state, VisibleState::Downsampled);
    assert_eq!(engine.trace_state(id).unwrap(), VisibleState::Downsampled);
    assert_eq!(update.x[0], 0.0);
    assert_eq!(*update.x.last().unwrap(), 9_999.0);
}

#[test]
fn small_trace_is_emitted_exactly() {
    let mut engine = engine();
    let store = uniform_store(500);
    let id = engine
        .add_trace("small", store.clone(), TraceOptions::default())
        .unwrap();
    let update = engine.initial_view(id).unwrap();
    assert_eq!(update.state, VisibleState::Full);
    assert_eq!(update.x, store.x());
    assert_eq!(update.y, store.y());
}

#[test]
fn emitted_points_never_exceed_the_budget() {
    let mut engine = engine();
    let id = engine
        .add_trace(
            "sin",
            uniform_store(50_000),
            TraceOptions {
                limit_to_view: true,
                ..Default::default()
            },
        )
        .unwrap();
    for range in [
        None,
        Some((0.0, 49_999.0)),
        Some((100.0, 200.0)),
        Some((0.0, 5.0)),
        Some((49_000.0, 49_999.0)),
        Some((-10.0, 100_000.0)),
    ] {
        let event = ViewEvent {
            axis_group: AxisGroup::default_group(),
            range,
        };
        let outcome = engine.handle_event(&event);
        assert!(outcome.is_clean());
        let update = outcome.update_for(id).unwrap();
        assert!(
            update.len() <= 1_000,
            "{} points for range {:?}",
            update.len(),
            range
        );
    }
}

#[test]
fn narrowed_view_below_budget_switches_back_to_full() {
    let mut engine = engine();
    let id = engine
        .add_trace(
            "sin",
            uniform_store(10_000),
            TraceOptions {
                limit_to_view: true,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(
        engine.initial_view(id).unwrap().state,
        VisibleState::Downsampled
    );

    // 500 of the 10_000 points are inside the viewport: raw slice, unreduced.
    let outcome = engine.handle_event(&ViewEvent::zoom("x", 1_000.0, 1_499.0));
    let update = outcome.update_for(id).unwrap();
    assert_eq!(update.state, VisibleState::Full);
    assert_eq!(update.len(), 500);
    assert_eq!(update.x[0], 1_000.0);
    assert_eq!(*update.x.last().unwrap(), 1_499.0);
    assert_eq!(engine.trace_state(id).unwrap(), VisibleState::Full);
}

#[test]
fn reissuing_the_same_range_is_idempotent() {
    let mut engine = engine();
    let id = engine
        .add_trace(
            "sin",
            uniform_store(10_000),
            TraceOptions {
                limit_to_view: true,
                ..Default::default()
            },
        )
        .unwrap();
    let event = ViewEvent::zoom("x", 123.0, 8_765.0);
    let first = engine.handle_event(&event);
    let second = engine.handle_event(&event);
    assert_eq!(
        first.update_for(id).unwrap(),
        second.update_for(id).unwrap()
    );
}

#[test]
fn without_limit_to_view_the_downsampler_sees_the_full_range() {
    let mut engine = engine();
    let id = engine
        .add_trace("sin", uniform_store(10_000), TraceOptions::default())
        .unwrap();
    let before = engine.initial_view(id).unwrap();
    let outcome = engine.handle_event(&ViewEvent::zoom("x", 2_000.0, 3_000.0));
    let after = outcome.update_for(id).unwrap();
    assert_eq!(&before, after);
}

#[test]
fn reset_event_restores_the_initial_view() {
    let mut engine = engine();
    let id = engine
        .add_trace(
            "sin",
            uniform_store(10_000),
            TraceOptions {
                limit_to_view: true,
                ..Default::default()
            },
        )
        .unwrap();
    let initial = engine.initial_view(id).unwrap();
    engine.handle_event(&ViewEvent::zoom("x", 4_000.0, 4_100.0));
    let outcome = engine.handle_event(&ViewEvent::reset("x"));
    assert_eq!(outcome.update_for(id).unwrap(), &initial);
}

#[test]
fn empty_viewport_emits_an_empty_update_not_an_error() {
    let mut engine = engine();
    let far = engine
        .add_trace(
            "far",
            uniform_store(10_000),
            TraceOptions {
                limit_to_view: true,
                ..Default::default()
            },
        )
        .unwrap();
    let near = engine
        .add_trace(
            "near",
            uniform_store(10_000),
            TraceOptions {
                limit_to_view: false,
                ..Default::default()
            },
        )
        .unwrap();

    // Out of the data domain entirely: `far` renders nothing, `near` (not
    // view-limited) still shows its reduced full range.
    let outcome = engine.handle_event(&ViewEvent::zoom("x", 1e6, 2e6));
    assert!(outcome.is_clean());
    assert!(outcome.update_for(far).unwrap().is_empty());
    assert_eq!(outcome.update_for(near).unwrap().len(), 1_000);
}

#[test]
fn events_only_touch_their_axis_group() {
    let mut engine = engine();
    let left = engine
        .add_trace(
            "left",
            uniform_store(10_000),
            TraceOptions {
                axis_group: Some(AxisGroup::new("x")),
                ..Default::default()
            },
        )
        .unwrap();
    let right = engine
        .add_trace(
            "right",
            uniform_store(10_000),
            TraceOptions {
                axis_group: Some(AxisGroup::new("x2")),
                ..Default::default()
            },
        )
        .unwrap();

    let outcome = engine.handle_event(&ViewEvent::zoom("x2", 0.0, 100.0));
    assert!(outcome.update_for(left).is_none());
    assert!(outcome.update_for(right).is_some());
}

#[test]
fn queued_events_are_serialized_and_last_writer_wins() {
    let mut engine = engine();
    let id = engine
        .add_trace(
            "sin",
            uniform_store(10_000),
            TraceOptions {
                limit_to_view: true,
                ..Default::default()
            },
        )
        .unwrap();

    let (sender, rx) = view_channel();
    sender.zoom("x", 0.0, 5_000.0).unwrap();
    sender.zoom("x", 7_000.0, 7_099.0).unwrap();
    let outcomes = engine.pump(&rx);
    assert_eq!(outcomes.len(), 2);

    // The stored view reflects the second event only.
    assert_eq!(
        engine.view_state().range(&AxisGroup::default_group()),
        Some((7_000.0, 7_099.0))
    );
    let last = outcomes.last().unwrap().update_for(id).unwrap();
    assert_eq!(last.state, VisibleState::Full);
    assert_eq!(last.len(), 100);
}

#[test]
fn gap_markers_are_emitted_for_sparse_regions() {
    // Two dense blocks separated by a wide hole in the key domain.
    let mut x: Vec<f64> = (0..6_000).map(|i| i as f64).collect();
    x.extend((0..6_000).map(|i| 1_000_000.0 + i as f64));
    let y = vec![1.0f64; x.len()];
    let store = HfStore::new(x, y).unwrap();

    let mut engine = engine();
    let gapped = engine
        .add_trace(
            "gapped",
            store.clone(),
            TraceOptions {
                interleave_gaps: true,
                downsampler: Some("every_nth".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let plain = engine
        .add_trace(
            "plain",
            store,
            TraceOptions {
                interleave_gaps: false,
                downsampler: Some("every_nth".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let with_gaps = engine.initial_view(gapped).unwrap();
    assert_eq!(with_gaps.gaps.len(), 1, "gaps: {:?}", with_gaps.gaps);
    let pos = with_gaps.gaps[0];
    assert!(with_gaps.x[pos] < 6_000.0);
    assert!(with_gaps.x[pos + 1] >= 1_000_000.0);

    let without = engine.initial_view(plain).unwrap();
    assert!(without.gaps.is_empty());
}

#[test]
fn aux_channels_follow_the_shown_indices() {
    let n = 10_000;
    let labels: Vec<String> = (0..n).map(|i| format!("point {}", i)).collect();
    let store = uniform_store(n)
        .with_aux("hover", AuxChannel::Text(labels))
        .unwrap();

    let mut engine = engine();
    let id = engine
        .add_trace("sin", store, TraceOptions::default())
        .unwrap();
    let update = engine.initial_view(id).unwrap();

    let AuxChannel::Text(hover) = &update.aux["hover"] else {
        panic!("hover channel lost its kind");
    };
    assert_eq!(hover.len(), update.len());
    assert_eq!(hover[0], "point 0");
    assert_eq!(hover.last().unwrap(), "point 9999");
}

#[test]
fn registration_errors_leave_the_engine_unchanged() {
    let mut engine = engine();
    let err = engine
        .add_trace(
            "bad",
            uniform_store(100),
            TraceOptions {
                downsampler: Some("nope".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, ResampleError::UnknownAlgorithm("nope".to_string()));

    let err = engine
        .add_trace(
            "bad",
            uniform_store(100),
            TraceOptions {
                max_n_samples: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, ResampleError::InvalidTarget);

    assert_eq!(engine.trace_count(), 0);
}

#[test]
fn removing_twice_surfaces_double_teardown() {
    let mut engine = engine();
    let id = engine
        .add_trace("sin", uniform_store(100), TraceOptions::default())
        .unwrap();
    engine.remove_trace(id).unwrap();
    assert_eq!(
        engine.remove_trace(id).unwrap_err(),
        ResampleError::UnknownTrace(id)
    );
}

#[test]
fn custom_algorithms_can_be_registered_by_name() {
    // Head sampling: the first `target` points. Satisfies the bound and
    // determinism, which is all the dispatch layer requires.
    #[derive(Debug)]
    struct Head;

    impl Downsample for Head {
        fn name(&self) -> &str {
            "head"
        }

        fn reduce(
            &self,
            x: &[f64],
            _y: &[f64],
            target: usize,
        ) -> Result<Vec<usize>, ResampleError> {
            if target == 0 {
                return Err(ResampleError::InvalidTarget);
            }
            Ok((0..x.len().min(target)).collect())
        }
    }

    let mut engine = engine();
    engine.algorithms_mut().register(Arc::new(Head));
    let id = engine
        .add_trace(
            "headed",
            uniform_store(10_000),
            TraceOptions {
                downsampler: Some("head".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let update = engine.initial_view(id).unwrap();
    assert_eq!(update.len(), 1_000);
    assert_eq!(*update.x.last().unwrap(), 999.0);
}

#[test]
fn per_trace_budget_overrides_the_default() {
    let mut engine = engine();
    let id = engine
        .add_trace(
            "sin",
            uniform_store(10_000),
            TraceOptions {
                max_n_samples: Some(100),
                downsampler: Some("lttb".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let update = engine.initial_view(id).unwrap();
    assert_eq!(update.len(), 100);
    // The resolved algorithm really is the builtin LTTB instance.
    let _: Arc<Lttb> = engine
        .algorithms_mut()
        .resolve("lttb")
        .unwrap()
        .downcast_arc::<Lttb>()
        .ok()
        .unwrap();
}
