//! Unit tests for pointer pipeline timing.

use shapeboard::perf::{
    OperationStats, ScopedTimer, is_profiling_enabled, operation_stats, reset_operation_stats,
    set_profiling_enabled,
};

#[test]
fn test_stats_track_count_average_and_max() {
    let mut stats = OperationStats::default();
    assert_eq!(stats.average(), 0.0);

    stats.record(2.0);
    stats.record(4.0);
    stats.record(9.0);

    assert_eq!(stats.count(), 3);
    assert!((stats.average() - 5.0).abs() < 1e-9);
    assert_eq!(stats.max(), 9.0);
}

// Profiling state is global, so the toggle and reset checks share one test
#[test]
fn test_timers_record_only_while_enabled() {
    set_profiling_enabled(false);
    assert!(!is_profiling_enabled());
    {
        let _timer = ScopedTimer::new("it_perf_disabled", 1_000.0);
    }
    assert!(operation_stats("it_perf_disabled").is_none());

    set_profiling_enabled(true);
    for _ in 0..3 {
        let _timer = ScopedTimer::new("it_perf_enabled", 1_000.0);
    }
    let stats = operation_stats("it_perf_enabled").unwrap();
    assert_eq!(stats.count(), 3);
    assert!(stats.max() >= stats.average());

    reset_operation_stats();
    assert!(operation_stats("it_perf_enabled").is_none());
    set_profiling_enabled(cfg!(feature = "profiling"));
}
