mod tests {
    use core::f64::consts::{PI, TAU};

    use agile_larson::position::{pixel_index, sweep_fraction};
    use agile_larson::rate::{MAX_ACTIVITY, activity, angular_velocity};
    use agile_larson::{
        Duration, EngineState, Instant, LarsonConfig, PhaseClock, Renderer, TelemetryReading,
        TelemetryStore,
    };

    const EPSILON: f64 = 1e-6;

    fn reading(import_power: f32, export_power: f32) -> TelemetryReading {
        TelemetryReading {
            import_power,
            export_power,
            price: 0.0,
        }
    }

    #[test]
    fn test_activity_uses_dominant_flow() {
        assert_eq!(activity(&reading(2000.0, 0.0), 2000.0), 1.0);
        assert_eq!(activity(&reading(500.0, 1000.0), 2000.0), 0.5);
        assert_eq!(activity(&reading(0.0, 0.0), 2000.0), 0.0);
        assert_eq!(activity(&reading(-300.0, 0.0), 2000.0), 0.0);
    }

    #[test]
    fn test_engine_state() {
        assert_eq!(
            EngineState::from_reading(&reading(0.0, 0.0), 2000.0),
            EngineState::Idle
        );
        let EngineState::Animating { activity, omega } =
            EngineState::from_reading(&reading(4000.0, 0.0), 2000.0)
        else {
            panic!("expected animating state");
        };
        assert_eq!(activity, 2.0);
        assert!((omega - 2.0 * TAU).abs() < EPSILON);
    }

    #[test]
    fn test_angular_velocity() {
        assert!((angular_velocity(1.0) - TAU).abs() < EPSILON);
        assert!((angular_velocity(0.25) - PI / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_first_tick_does_not_advance() {
        let mut clock = PhaseClock::new();
        assert_eq!(clock.advance(TAU, Instant::from_millis(5_000)), 0.0);
        assert_eq!(clock.last_tick(), Some(Instant::from_millis(5_000)));
    }

    #[test]
    fn test_one_second_at_full_activity_is_one_cycle() {
        let mut clock = PhaseClock::new();
        let omega = angular_velocity(1.0);
        let mut now = Instant::from_millis(0);
        clock.advance(omega, now);

        // Uneven frame times adding up to one second
        for step_ms in [1, 16, 17, 250, 3, 100, 113, 500] {
            now += Duration::from_millis(step_ms);
            clock.advance(omega, now);
        }
        assert!((clock.angle() - TAU).abs() < EPSILON);
    }

    #[test]
    fn test_tenth_of_a_second_at_full_activity() {
        let mut clock = PhaseClock::new();
        clock.advance(TAU, Instant::from_millis(0));
        let angle = clock.advance(TAU, Instant::from_millis(100));
        assert!((angle - 0.2 * PI).abs() < EPSILON);
    }

    #[test]
    fn test_refresh_freezes_angle() {
        let mut clock = PhaseClock::new();
        clock.advance(TAU, Instant::from_millis(0));
        clock.advance(TAU, Instant::from_millis(250));
        let frozen = clock.angle();

        // Idle for ten seconds
        clock.refresh(Instant::from_millis(10_250));
        assert_eq!(clock.angle(), frozen);

        // Resuming integrates only the time since the last refresh
        let angle = clock.advance(TAU, Instant::from_millis(10_500));
        assert!((angle - (frozen + PI / 2.0)).abs() < EPSILON);
    }

    #[test]
    fn test_time_going_backwards_does_not_advance() {
        let mut clock = PhaseClock::new();
        clock.advance(TAU, Instant::from_millis(0));
        let angle = clock.advance(TAU, Instant::from_millis(1_000));
        assert_eq!(clock.advance(TAU, Instant::from_millis(500)), angle);
    }

    #[test]
    fn test_non_finite_step_keeps_angle_usable() {
        let mut clock = PhaseClock::new();
        assert_eq!(clock.advance(f64::INFINITY, Instant::from_millis(0)), 0.0);
        assert_eq!(clock.advance(f64::INFINITY, Instant::from_millis(10)), 0.0);
        assert_eq!(clock.advance(f64::NAN, Instant::from_millis(20)), 0.0);

        let angle = clock.advance(TAU, Instant::from_millis(270));
        assert!((angle - PI / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_activity_saturates() {
        assert_eq!(activity(&reading(3.0e38, 0.0), 0.5), MAX_ACTIVITY);
        assert_eq!(activity(&reading(0.0, f32::MAX), 1e-30), MAX_ACTIVITY);
        assert!(angular_velocity(MAX_ACTIVITY).is_finite());
    }

    #[test]
    fn test_huge_reading_does_not_stall_the_sweep() {
        let store = TelemetryStore::new();
        let config = LarsonConfig {
            high_usage_watts: 0.5,
            ..LarsonConfig::default()
        };
        let mut renderer = Renderer::<8>::new(store.reader(), &config).unwrap();

        renderer.tick_with(reading(3.0e38, 0.0), Instant::from_millis(0));
        assert_eq!(renderer.phase(), 0.0);

        let mut previous = renderer.phase();
        for ms in [10, 20, 30] {
            renderer.tick_with(reading(1.0, 0.0), Instant::from_millis(ms));
            let phase = renderer.phase();
            assert!(phase.is_finite());
            assert!(phase > previous);
            previous = phase;
        }
    }

    #[test]
    fn test_sweep_fraction() {
        assert!((sweep_fraction(0.0) - 0.5).abs() < EPSILON);
        assert!((sweep_fraction(PI / 2.0) - 1.0).abs() < EPSILON);
        assert!((sweep_fraction(-PI / 2.0)).abs() < EPSILON);
    }

    #[test]
    fn test_pixel_index_extremes() {
        assert_eq!(pixel_index(PI / 2.0, 8), 7);
        assert_eq!(pixel_index(-PI / 2.0, 8), 0);
        assert_eq!(pixel_index(0.0, 8), 4);
        assert_eq!(pixel_index(0.0, 1), 0);
    }

    #[test]
    fn test_pixel_index_always_in_range() {
        let phases = [
            0.0,
            1e-9,
            -1e-9,
            3.0,
            -3.0,
            1e6,
            -1e6,
            1e15,
            1e300,
            -1e300,
            f64::MAX,
            f64::MIN,
            f64::INFINITY,
            f64::NAN,
        ];
        for count in [1, 2, 8, 60] {
            for phase in phases {
                assert!(pixel_index(phase, count) < count, "phase {phase}");
            }
            let mut phase = -50.0;
            while phase < 50.0 {
                assert!(pixel_index(phase, count) < count);
                phase += 0.01;
            }
        }
    }
}
