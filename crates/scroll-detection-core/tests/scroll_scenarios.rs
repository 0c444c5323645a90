//! End-to-end scroll sessions against a `class` attribute.
//!
//! Each scenario drives a [`ScrollDetector`] with document samples the way
//! the browser frontend does and checks the resulting `<body>` classes.

use pretty_assertions::assert_eq;
use scroll_detection_core::{
    AxisConfig, ClassAttribute, DocumentMeasurements, ScrollConfig, ScrollDetector,
    ScrollMetrics, TokenSet,
};

/// 1800px document in an 800px viewport: the track is 1000px, so the
/// percentage is a tenth of the offset.
fn page(offset: f64) -> DocumentMeasurements {
    DocumentMeasurements::scrolled(offset, 1800.0, 800.0)
}

fn classes(attr: &ClassAttribute) -> Vec<&str> {
    attr.as_str().split_ascii_whitespace().collect()
}

#[test]
fn scroll_to_150_with_defaults() {
    let det = ScrollDetector::default();
    let mut body = ClassAttribute::new("home");
    det.handle_event(&page(150.0), &mut body);
    assert_eq!(
        classes(&body),
        vec![
            "home",
            "scrolled-150",
            "scrolled-50",
            "scrolled-100",
            "scrolled-pct-15"
        ]
    );
}

#[test]
fn beyond_watched_range_freezes_pixel_classes() {
    let det = ScrollDetector::default();
    let mut body = ClassAttribute::default();

    det.handle_event(&page(250.0), &mut body);
    assert_eq!(
        classes(&body),
        vec![
            "scrolled-50",
            "scrolled-100",
            "scrolled-150",
            "scrolled-200",
            "scrolled-pct-25"
        ]
    );

    det.apply(
        ScrollMetrics {
            distance: 500.0,
            percent: 80.0,
        },
        &mut body,
    );
    assert_eq!(
        classes(&body),
        vec![
            "scrolled-50",
            "scrolled-100",
            "scrolled-150",
            "scrolled-200",
            "scrolled-300",
            "scrolled-pct-80",
            "scrolled-pct-25",
            "scrolled-pct-50",
            "scrolled-pct-75"
        ]
    );
}

#[test]
fn unscrollable_document_adds_no_percent_classes() {
    let det = ScrollDetector::default();
    let mut body = ClassAttribute::new("home");
    let flat = DocumentMeasurements::scrolled(0.0, 800.0, 800.0);
    let update = det.handle_event(&flat, &mut body);
    assert!(update.added.is_empty());
    assert_eq!(body.as_str(), "home");
}

#[test]
fn scrolling_back_up_clears_unearned_classes() {
    let det = ScrollDetector::default();
    let mut body = ClassAttribute::new("home");
    for offset in [10.0, 60.0, 180.0, 240.0, 90.0] {
        det.handle_event(&page(offset), &mut body);
    }
    assert_eq!(
        classes(&body),
        vec!["home", "scrolled-90", "scrolled-50", "scrolled-pct-9"]
    );
}

#[test]
fn every_step_of_a_slow_scroll_keeps_one_single_pixel_class() {
    let det = ScrollDetector::default();
    let mut body = ClassAttribute::default();
    for offset in 1..=200 {
        det.handle_event(&page(f64::from(offset)), &mut body);
        let singles: Vec<&str> = classes(&body)
            .into_iter()
            .filter(|t| t.starts_with("scrolled-") && !t.starts_with("scrolled-pct-"))
            .filter(|t| !["scrolled-50", "scrolled-100", "scrolled-150", "scrolled-200"].contains(t))
            .collect();
        let expected = format!("scrolled-{offset}");
        if [50, 100, 150, 200].contains(&offset) {
            assert!(singles.is_empty(), "offset {offset}: {singles:?}");
            assert!(body.as_str().contains(&expected));
        } else {
            assert_eq!(singles, vec![expected.as_str()], "offset {offset}");
        }
    }
}

#[test]
fn custom_config_from_json() {
    let mut det = ScrollDetector::default();
    let config = ScrollConfig::from_json(
        r#"{
            "pixel":   { "singleClassesUntil": 0, "stickyDistances": [400] },
            "percent": { "singleClassesUntil": 0, "stickyDistances": [10, 90] }
        }"#,
        Default::default(),
    )
    .expect("valid config");
    det.set_config(config).unwrap();
    assert_eq!(det.max_watched_distance(), 400.0);

    let mut body = TokenSet::new();
    det.handle_event(&page(450.0), &mut body);
    assert_eq!(
        body.iter().collect::<Vec<_>>(),
        vec!["scrolled-400", "scrolled-pct-10"]
    );
}

#[test]
fn fractional_offsets_render_like_the_browser() {
    let det = ScrollDetector::new(ScrollConfig {
        pixel: AxisConfig::new(100.0, &[]),
        percent: AxisConfig::new(0.0, &[]),
    });
    let mut body = ClassAttribute::default();
    det.handle_event(&page(12.5), &mut body);
    assert_eq!(body.as_str(), "scrolled-12.5");

    det.handle_event(&page(13.0), &mut body);
    assert_eq!(body.as_str(), "scrolled-13");
}
