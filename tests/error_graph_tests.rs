use eyre::eyre;
use spectrum_chart::data_types::{BackboneSeries, ErrorPoint};
use spectrum_chart::error_graph::{
    DensityOverlay, ErrorGraph, ErrorGraphSettings, ErrorMode, ErrorUnit,
};

fn points() -> Vec<ErrorPoint> {
    vec![
        ErrorPoint::new(200.0).with_assigned(0.01, 5.0),
        ErrorPoint::new(300.0)
            .with_closest(BackboneSeries::B, 0.02, 2.0, "b3")
            .with_closest(BackboneSeries::Y, -0.02, -2.0, "y5")
            .with_closest(BackboneSeries::Z, 0.5, 40.0, "z4"),
        ErrorPoint::new(400.0)
            .with_assigned(-0.03, -7.0)
            .with_closest(BackboneSeries::A, 0.1, 1.0, "a2"),
    ]
}

fn closest_settings() -> ErrorGraphSettings {
    ErrorGraphSettings {
        mode: ErrorMode::ClosestUnassigned,
        ..Default::default()
    }
}

fn ys(graph: &ErrorGraph) -> Vec<Option<f64>> {
    graph.projected().iter().map(|p| p.y).collect()
}

#[test]
fn test_assigned_mode_hides_unassigned_points() {
    let mut graph = ErrorGraph::new(points(), ErrorGraphSettings::default());
    let request = graph.update();
    assert_eq!(ys(&graph), vec![Some(5.0), None, Some(-7.0)]);
    assert_eq!(request.values, vec![5.0, -7.0]);

    graph.settings.unit = ErrorUnit::Absolute;
    let request = graph.update();
    assert_eq!(request.values, vec![0.01, -0.03]);
}

#[test]
fn test_closest_ion_tie_keeps_earlier_series() {
    let mut graph = ErrorGraph::new(points(), closest_settings());
    graph.update();
    let point = &graph.projected()[1];
    assert_eq!(point.y, Some(2.0));
    assert_eq!(point.label, "b3");

    graph.settings.set_enabled(BackboneSeries::B, false);
    graph.update();
    let point = &graph.projected()[1];
    assert_eq!(point.y, Some(-2.0));
    assert_eq!(point.label, "y5");
}

#[test]
fn test_closest_ion_respects_filters() {
    let mut settings = closest_settings();
    for series in BackboneSeries::ALL {
        settings.set_enabled(series, series == BackboneSeries::Z);
    }
    let mut graph = ErrorGraph::new(points(), settings);
    graph.update();
    assert_eq!(graph.projected()[1].y, Some(40.0));
    assert_eq!(graph.projected()[1].label, "z4");
}

#[test]
fn test_closest_mode_show_assigned() {
    let mut graph = ErrorGraph::new(points(), closest_settings());
    graph.update();
    assert_eq!(ys(&graph), vec![None, Some(2.0), None]);

    graph.settings.show_assigned = true;
    graph.update();
    assert_eq!(ys(&graph), vec![None, Some(2.0), Some(1.0)]);
}

#[test]
fn test_unresolvable_values_are_hidden() {
    let points = vec![
        ErrorPoint::new(100.0).with_closest(BackboneSeries::C, f64::INFINITY, f64::INFINITY, "c1"),
        ErrorPoint::new(150.0)
            .with_closest(BackboneSeries::A, f64::NAN, f64::NAN, "a1")
            .with_closest(BackboneSeries::X, 0.2, 3.0, "x1"),
    ];
    let mut graph = ErrorGraph::new(points, closest_settings());
    let request = graph.update();
    assert_eq!(ys(&graph), vec![None, Some(3.0)]);
    assert_eq!(request.values, vec![3.0]);
}

#[test]
fn test_failed_estimate_keeps_previous_overlay() {
    let mut graph = ErrorGraph::new(points(), ErrorGraphSettings::default());
    graph.refresh(&|values: &[f64]| -> eyre::Result<DensityOverlay> {
        Ok(DensityOverlay(format!("<svg n={}/>", values.len())))
    });
    assert_eq!(graph.overlay(), Some(&DensityOverlay("<svg n=2/>".into())));

    graph.refresh(&|_: &[f64]| -> eyre::Result<DensityOverlay> {
        Err(eyre!("estimator offline"))
    });
    assert_eq!(graph.overlay(), Some(&DensityOverlay("<svg n=2/>".into())));
}

#[test]
fn test_last_completed_request_wins() {
    let mut graph = ErrorGraph::new(points(), ErrorGraphSettings::default());
    let older = graph.update();
    let newer = graph.update();
    assert!(newer.id > older.id);

    graph.complete(newer.id, Ok(DensityOverlay("new".into())));
    graph.complete(older.id, Ok(DensityOverlay("old".into())));
    assert_eq!(graph.overlay(), Some(&DensityOverlay("old".into())));
    assert_eq!(graph.overlay_request(), Some(older.id));
}

#[test]
fn test_zoom_y() {
    let mut graph = ErrorGraph::default();
    graph.zoom_y(1.0, 3.0);
    let range = graph.y_range().expect("range");
    assert_eq!((range.min_label.as_str(), range.max_label.as_str()), ("1.00", "3.00"));
    assert!(range.hug_bottom);

    graph.zoom_y(-5.0, 5.0);
    assert!(!graph.y_range().expect("range").hug_bottom);

    graph.zoom_y(3.0, 1.0);
    assert_eq!(graph.y_range().expect("range").min, -5.0);
}

#[test]
fn test_ruler_value() {
    let mut graph = ErrorGraph::default();
    assert_eq!(graph.ruler_value(10.0, 100.0), None);

    graph.zoom_y(-5.0, 5.0);
    assert_eq!(graph.ruler_value(100.0, 400.0).as_deref(), Some("2.50"));
    assert_eq!(graph.ruler_value(100.0, 0.0), None);
}

#[test]
fn test_title() {
    let mut graph = ErrorGraph::default();
    assert_eq!(
        graph.title(),
        "The error for all assigned peaks as compared to the annotation (ppm)"
    );
    graph.settings = ErrorGraphSettings {
        mode: ErrorMode::ClosestUnassigned,
        unit: ErrorUnit::Absolute,
        ..Default::default()
    };
    assert_eq!(
        graph.title(),
        "The error for all unassigned peaks as compared to the closest theoretical ion (Da)"
    );
    graph.settings.show_assigned = true;
    assert_eq!(
        graph.title(),
        "The error for all peaks as compared to the closest theoretical ion (Da)"
    );
}

#[test]
fn test_complete_accepts_any_request_id() {
    let mut graph = ErrorGraph::new(points(), ErrorGraphSettings::default());
    graph.complete(u64::MAX, Ok(DensityOverlay("late".into())));
    assert_eq!(graph.overlay_request(), Some(u64::MAX));

    graph.update();
    graph.complete(u64::MAX, Ok(DensityOverlay("later".into())));
    assert_eq!(graph.overlay(), Some(&DensityOverlay("later".into())));
}
