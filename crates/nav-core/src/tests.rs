//! Unit tests for nav-core primitives.

use chrono::{DateTime, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2013, 3, 2, 14, 30, 0).unwrap()
}

#[cfg(test)]
mod coordinate {
    use crate::{CoordinateKind, Dms, GeoCoordinate, NavError, Segment};

    #[test]
    fn value_accessors() {
        let mut c = GeoCoordinate::latitude(12.5).unwrap();
        assert_eq!(c.value(), 12.5);
        c.set_value(-3.25).unwrap();
        assert_eq!(c.value(), -3.25);
        assert_eq!(c.kind(), CoordinateKind::Latitude);
    }

    #[test]
    fn non_finite_rejected() {
        assert_eq!(
            GeoCoordinate::latitude(f64::NAN).unwrap_err().to_string(),
            "invalid coordinate value NaN: must be finite"
        );
        assert!(matches!(
            GeoCoordinate::longitude(f64::INFINITY),
            Err(NavError::InvalidValue(_))
        ));
    }

    #[test]
    fn set_value_keeps_old_value_on_error() {
        let mut c = GeoCoordinate::longitude(4.0).unwrap();
        assert!(c.set_value(f64::NEG_INFINITY).is_err());
        assert_eq!(c.value(), 4.0);
    }

    #[test]
    fn segments_by_kind_and_sign() {
        assert_eq!(GeoCoordinate::latitude(10.0).unwrap().segment(), Segment::North);
        assert_eq!(GeoCoordinate::latitude(-10.0).unwrap().segment(), Segment::South);
        assert_eq!(GeoCoordinate::longitude(10.0).unwrap().segment(), Segment::East);
        assert_eq!(GeoCoordinate::longitude(-10.0).unwrap().segment(), Segment::West);
    }

    #[test]
    fn zero_and_negative_zero_are_positive_segment() {
        assert_eq!(GeoCoordinate::latitude(0.0).unwrap().segment(), Segment::North);
        assert_eq!(GeoCoordinate::latitude(-0.0).unwrap().segment(), Segment::North);
        assert_eq!(GeoCoordinate::longitude(-0.0).unwrap().segment(), Segment::East);
    }

    #[test]
    fn segment_units() {
        assert_eq!(GeoCoordinate::latitude(1.0).unwrap().segment_unit(), "N");
        assert_eq!(GeoCoordinate::latitude(-1.0).unwrap().segment_unit(), "S");
        assert_eq!(GeoCoordinate::longitude(1.0).unwrap().segment_unit(), "E");
        assert_eq!(GeoCoordinate::longitude(-1.0).unwrap().segment_unit(), "W");
        assert_eq!(Segment::from_unit("w"), Some(Segment::West));
        assert_eq!(Segment::from_unit("X"), None);
    }

    #[test]
    fn format_known_values() {
        assert_eq!(GeoCoordinate::latitude(51.2194).unwrap().format(), "51° 13' 9.8\" N");
        assert_eq!(GeoCoordinate::longitude(4.4025).unwrap().format(), "4° 24' 9.0\" E");
        assert_eq!(GeoCoordinate::longitude(-4.4025).unwrap().format(), "4° 24' 9.0\" W");
        assert_eq!(GeoCoordinate::latitude(-0.5).unwrap().format(), "0° 30' 0.0\" S");
    }

    #[test]
    fn format_zero() {
        assert_eq!(GeoCoordinate::latitude(0.0).unwrap().format(), "0° 0' 0.0\" N");
        assert_eq!(GeoCoordinate::longitude(0.0).unwrap().format(), "0° 0' 0.0\" E");
        assert_eq!(GeoCoordinate::longitude(-0.0).unwrap().format(), "0° 0' 0.0\" E");
    }

    #[test]
    fn sixty_seconds_carries_into_degrees() {
        let v = 1.0 + 59.0 / 60.0 + 59.996 / 3600.0;
        let text = GeoCoordinate::latitude(v).unwrap().format();
        assert!(!text.contains("60.0"), "got {text}");
        assert_eq!(text, "2° 0' 0.0\" N");
    }

    #[test]
    fn sixty_seconds_carries_into_minutes() {
        let v = 10.0 + 14.0 / 60.0 + 59.97 / 3600.0;
        assert_eq!(GeoCoordinate::latitude(v).unwrap().format(), "10° 15' 0.0\" N");
    }

    #[test]
    fn display_matches_format() {
        let c = GeoCoordinate::longitude(-122.4194).unwrap();
        assert_eq!(c.to_string(), c.format());
    }

    #[test]
    fn dms_decomposition() {
        let dms = Dms::from_degrees(-51.2194);
        assert_eq!(dms.degrees, 51);
        assert_eq!(dms.minutes, 13);
        assert_eq!(dms.tenths_of_second, 98);
        assert!((dms.seconds() - 9.8).abs() < 1e-12);
    }

    #[test]
    fn huge_magnitudes_clamp_to_limit() {
        let limit = Dms::from_degrees(Dms::MAX_DEGREES);
        assert_eq!(limit.degrees, u64::MAX / 36_000);
        assert_eq!((limit.minutes, limit.tenths_of_second), (0, 0));
        assert_eq!(Dms::from_degrees(1e20), limit);
        assert_eq!(Dms::from_degrees(f64::MAX), limit);

        let south = GeoCoordinate::latitude(-1e300).unwrap();
        assert_eq!(south.format(), format!("{}° 0' 0.0\" S", u64::MAX / 36_000));
    }

    #[test]
    fn quarter_degree_sweep_parses_back() {
        // -180.0 ..= 180.0 in 0.25° steps.
        for i in -720..=720 {
            let v = i as f64 * 0.25;
            let c = GeoCoordinate::longitude(v).unwrap();
            let back = GeoCoordinate::parse(&c.format()).unwrap();
            let err_arcsec = (back.value().abs() - v.abs()).abs() * 3600.0;
            assert!(err_arcsec <= 0.05, "{v}: {} → {} ({err_arcsec}″)", c, back.value());
            assert_eq!(back.segment(), c.segment());
        }
    }

    #[test]
    fn arbitrary_values_within_rounding_tolerance() {
        for &v in &[51.2194, -33.86785, 0.000_01, 179.999_99, -89.123_456_7] {
            let dms = GeoCoordinate::latitude(v).unwrap().dms();
            let err_arcsec = (dms.to_degrees() - v.abs()).abs() * 3600.0;
            assert!(err_arcsec <= 0.05 + 1e-9, "{v}: {err_arcsec}″");
        }
    }

    #[test]
    fn parse_infers_kind_and_sign() {
        let c: GeoCoordinate = "4° 24' 9.0\" W".parse().unwrap();
        assert_eq!(c.kind(), CoordinateKind::Longitude);
        assert!((c.value() + 4.4025).abs() < 1e-9);

        let c = GeoCoordinate::parse("51° 13' 9.8\" N").unwrap();
        assert_eq!(c.kind(), CoordinateKind::Latitude);
        assert!(c.value() > 51.0);
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in [
            "",
            "51 13 9.8 N",
            "51° 13' 9.8\"",
            "51° 13' 9.8\" Q",
            "51° 61' 9.8\" N",
            "51° 13' 60.0\" N",
            "x° 13' 9.8\" N",
            "51° 13' 9.8\" N extra",
        ] {
            assert!(
                matches!(GeoCoordinate::parse(bad), Err(NavError::Parse(_))),
                "{bad:?} should not parse"
            );
        }
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(51.2194, 4.4025);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(50.0, 4.0);
        let b = GeoPoint::new(51.0, 4.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn cardinal_bearings() {
        let o = GeoPoint::new(0.0, 0.0);
        assert!((o.initial_bearing_deg(GeoPoint::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((o.initial_bearing_deg(GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((o.initial_bearing_deg(GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((o.initial_bearing_deg(GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_always_in_range() {
        let a = GeoPoint::new(51.2194, 4.4025);
        for &(lat, lon) in &[(51.0, 4.0), (52.0, 5.0), (-10.0, -170.0), (51.2194, 4.4025)] {
            let b = a.initial_bearing_deg(GeoPoint::new(lat, lon));
            assert!((0.0..360.0).contains(&b), "got {b}");
        }
    }

    #[test]
    fn destination_inverts_distance_and_bearing() {
        let start = GeoPoint::new(51.2194, 4.4025);
        let end = start.destination(45.0, 1_000.0);
        assert!((start.distance_m(end) - 1_000.0).abs() < 0.01);
        assert!((start.initial_bearing_deg(end) - 45.0).abs() < 0.01);
    }

    #[test]
    fn display_uses_dms() {
        assert_eq!(
            GeoPoint::new(51.2194, -4.4025).to_string(),
            "51° 13' 9.8\" N, 4° 24' 9.0\" W"
        );
    }
}

#[cfg(test)]
mod snapshot {
    use chrono::{DateTime, Utc};

    use super::t0;
    use crate::{LocationSnapshot, LocationSource, NavError};

    struct PlatformFix {
        lat:      f64,
        lon:      f64,
        speed:    Option<f64>,
        accuracy: Option<f64>,
    }

    impl LocationSource for PlatformFix {
        fn latitude(&self) -> f64 {
            self.lat
        }
        fn longitude(&self) -> f64 {
            self.lon
        }
        fn time(&self) -> DateTime<Utc> {
            t0()
        }
        fn speed(&self) -> Option<f64> {
            self.speed
        }
        fn accuracy(&self) -> Option<f64> {
            self.accuracy
        }
        fn provider(&self) -> Option<&str> {
            Some("gps")
        }
    }

    #[test]
    fn capture_copies_all_fields() {
        let fix = PlatformFix { lat: 51.2194, lon: 4.4025, speed: Some(1.5), accuracy: Some(8.0) };
        let snap = LocationSnapshot::capture(&fix).unwrap();
        assert_eq!(snap.latitude(), 51.2194);
        assert_eq!(snap.longitude(), 4.4025);
        assert_eq!(snap.speed(), Some(1.5));
        assert_eq!(snap.accuracy(), Some(8.0));
        assert_eq!(snap.bearing(), None);
        assert_eq!(snap.altitude(), None);
        assert_eq!(snap.provider(), Some("gps"));
        assert_eq!(snap.timestamp(), t0());
    }

    #[test]
    fn capture_validates() {
        let fix = PlatformFix { lat: 0.0, lon: 0.0, speed: None, accuracy: Some(-1.0) };
        assert!(matches!(
            LocationSnapshot::capture(&fix),
            Err(NavError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn builder_rejects_bad_fields() {
        assert!(LocationSnapshot::builder(f64::NAN, 0.0, t0()).build().is_err());
        assert!(LocationSnapshot::builder(0.0, 0.0, t0()).bearing(361.0).build().is_err());
        assert!(LocationSnapshot::builder(0.0, 0.0, t0()).bearing(-0.5).build().is_err());
        assert!(LocationSnapshot::builder(0.0, 0.0, t0()).speed(-2.0).build().is_err());
        assert!(LocationSnapshot::builder(0.0, 0.0, t0()).accuracy(f64::NAN).build().is_err());
        assert!(LocationSnapshot::builder(0.0, 0.0, t0()).altitude(f64::INFINITY).build().is_err());
    }

    #[test]
    fn bearing_360_wraps_to_zero() {
        let snap = LocationSnapshot::builder(0.0, 0.0, t0()).bearing(360.0).build().unwrap();
        assert_eq!(snap.bearing(), Some(0.0));
    }

    #[test]
    fn zero_accuracy_is_valid() {
        let snap = LocationSnapshot::builder(0.0, 0.0, t0()).accuracy(0.0).build().unwrap();
        assert_eq!(snap.accuracy(), Some(0.0));
    }

    #[test]
    fn coordinate_helpers() {
        let snap = LocationSnapshot::builder(51.2194, -4.4025, t0()).build().unwrap();
        assert_eq!(snap.latitude_coordinate().format(), "51° 13' 9.8\" N");
        assert_eq!(snap.longitude_coordinate().format(), "4° 24' 9.0\" W");
        assert_eq!(snap.point().lat, 51.2194);
    }

    #[test]
    fn display_lists_only_present_fields() {
        let snap = LocationSnapshot::builder(51.2194, 4.4025, t0())
            .accuracy(5.0)
            .build()
            .unwrap();
        let text = snap.to_string();
        assert!(text.contains("latitude: 51.2194° (51° 13' 9.8\" N)"));
        assert!(text.contains("accuracy: 5m"));
        assert!(!text.contains("bearing"));
        assert!(!text.contains("provider"));
        assert!(text.ends_with("timestamp: 2013-03-02T14:30:00.000UTC"));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_support {
    use super::t0;
    use crate::{GeoCoordinate, LocationSnapshot};

    #[test]
    fn snapshot_json_round_trip() {
        let snap = LocationSnapshot::builder(51.2194, 4.4025, t0())
            .speed(2.0)
            .build()
            .unwrap();
        let json = serde_json::to_string(&snap).unwrap();
        let back: LocationSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn snapshot_json_goes_through_validation() {
        let base = r#""latitude":51.2194,"longitude":4.4025,"timestamp":"2013-03-02T14:30:00Z""#;
        for bad in [
            r#""bearing":720.0"#,
            r#""speed":-5.0"#,
            r#""accuracy":-3.0"#,
        ] {
            let json = format!("{{{base},{bad}}}");
            let err = serde_json::from_str::<LocationSnapshot>(&json).unwrap_err();
            assert!(err.to_string().contains("invalid location snapshot"), "{bad}: {err}");
        }

        let wrapped: LocationSnapshot =
            serde_json::from_str(&format!(r#"{{{base},"bearing":360.0}}"#)).unwrap();
        assert_eq!(wrapped.bearing(), Some(0.0));
        assert_eq!(wrapped.accuracy(), None);
    }

    #[test]
    fn coordinate_serializes_kind() {
        let json = serde_json::to_string(&GeoCoordinate::latitude(1.5).unwrap()).unwrap();
        assert_eq!(json, r#"{"value":1.5,"kind":"Latitude"}"#);
    }
}
