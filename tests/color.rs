mod tests {
    use agile_larson::color::{
        ColorMode, EXPORT_HUE, IMPORT_HUE_HIGH, IMPORT_HUE_LOW, PriceScale, UnitHsv, UnitRgb,
        hsv_to_rgb, price_hue,
    };
    use agile_larson::{Rgb, TelemetryReading};

    const EPSILON: f32 = 1e-5;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_rgb_close(actual: UnitRgb, expected: UnitRgb) {
        assert_close(actual.r, expected.r);
        assert_close(actual.g, expected.g);
        assert_close(actual.b, expected.b);
    }

    fn scale() -> PriceScale {
        PriceScale::new(-5.0, 25.0)
    }

    fn importing(price: f32) -> TelemetryReading {
        TelemetryReading {
            import_power: 800.0,
            export_power: 0.0,
            price,
        }
    }

    #[test]
    fn test_hsv_to_rgb_primaries() {
        assert_rgb_close(hsv_to_rgb(UnitHsv::from_hue(0.0)), UnitRgb::new(1.0, 0.0, 0.0));
        assert_rgb_close(
            hsv_to_rgb(UnitHsv::from_hue(60.0 / 360.0)),
            UnitRgb::new(1.0, 1.0, 0.0),
        );
        assert_rgb_close(
            hsv_to_rgb(UnitHsv::from_hue(120.0 / 360.0)),
            UnitRgb::new(0.0, 1.0, 0.0),
        );
        assert_rgb_close(
            hsv_to_rgb(UnitHsv::from_hue(240.0 / 360.0)),
            UnitRgb::new(0.0, 0.0, 1.0),
        );
        assert_rgb_close(
            hsv_to_rgb(UnitHsv::from_hue(300.0 / 360.0)),
            UnitRgb::new(1.0, 0.0, 1.0),
        );
        // Hue wraps around
        assert_rgb_close(hsv_to_rgb(UnitHsv::from_hue(1.0)), UnitRgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_hsv_to_rgb_desaturated() {
        let grey = UnitHsv {
            hue: 0.3,
            sat: 0.0,
            val: 0.5,
        };
        assert_rgb_close(hsv_to_rgb(grey), UnitRgb::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_price_ratio_is_clamped() {
        let scale = scale();
        assert_close(scale.ratio(-5.0), 0.0);
        assert_close(scale.ratio(-20.0), 0.0);
        assert_close(scale.ratio(10.0), 0.5);
        assert_close(scale.ratio(25.0), 1.0);
        assert_close(scale.ratio(90.0), 1.0);
    }

    #[test]
    fn test_low_price_is_blue() {
        let scale = scale();
        assert_close(scale.hue_for(&importing(-5.0)), IMPORT_HUE_LOW);
        assert_close(scale.hue_for(&importing(-5.0)), 240.0 / 360.0);
    }

    #[test]
    fn test_high_price_wraps_to_red() {
        let scale = scale();
        assert_close(scale.hue_for(&importing(25.0)), IMPORT_HUE_HIGH);
        assert_close(price_hue(1.0), 0.0);
        assert_rgb_close(scale.color_for(&importing(25.0)), UnitRgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_mid_price_is_magenta() {
        assert_close(scale().hue_for(&importing(10.0)), 300.0 / 360.0);
    }

    #[test]
    fn test_export_is_yellow_regardless_of_price() {
        let scale = scale();
        for price in [-40.0, -5.0, 0.0, 12.5, 25.0, 300.0] {
            let reading = TelemetryReading {
                import_power: 1500.0,
                export_power: 500.0,
                price,
            };
            assert_eq!(ColorMode::of(&reading), ColorMode::Export);
            assert_close(scale.hue_for(&reading), EXPORT_HUE);
            assert_rgb_close(scale.color_for(&reading), UnitRgb::new(1.0, 1.0, 0.0));
        }
    }

    #[test]
    fn test_zero_export_is_import_mode() {
        let reading = TelemetryReading {
            import_power: 0.0,
            export_power: 0.0,
            price: 3.0,
        };
        assert_eq!(ColorMode::of(&reading), ColorMode::Import);
    }

    #[test]
    fn test_unit_rgb_scaled() {
        let yellow = UnitRgb::new(1.0, 1.0, 0.0);
        assert_eq!(yellow.scaled(255, 255), Rgb::new(255, 255, 0));
        assert_eq!(yellow.scaled(64, 255), Rgb::new(64, 64, 0));
        assert_eq!(yellow.scaled(0, 255), Rgb::new(0, 0, 0));
        assert_eq!(UnitRgb::new(0.5, 0.0, 1.0).scaled(16, 255), Rgb::new(8, 0, 16));
        // Normalised against the kernel maximum
        assert_eq!(yellow.scaled(100, 100), Rgb::new(255, 255, 0));
        assert_eq!(yellow.scaled(10, 0), Rgb::new(0, 0, 0));
    }
}
