use geo::{MultiPolygon, Point, polygon};
use sitio::{
    ClusterParams, CriterionPotential, DistanceMetric, EngineConfig, Property, Region, SiteEngine,
    distance_km,
    validation::bounding_box,
};

fn region(name: &str, lon: f64, lat: f64, criteria: &[(&str, f64)]) -> Region {
    Region::new(
        name,
        Point::new(lon, lat),
        criteria
            .iter()
            .map(|(n, p)| CriterionPotential::new(*n, *p))
            .collect(),
    )
}

fn parcel(id: &str, x: f64, y: f64, score: f64) -> Property {
    let geometry = MultiPolygon::new(vec![polygon![
        (x: x, y: y),
        (x: x + 0.005, y: y),
        (x: x + 0.005, y: y + 0.005),
        (x: x, y: y + 0.005),
        (x: x, y: y),
    ]]);
    Property::new(id, "CAMPINAS", geometry, score)
}

fn default_params() -> ClusterParams {
    ClusterParams {
        radius_km: 50.0,
        min_cluster_size: 3,
        min_potential: 1_000_000.0,
    }
}

#[test]
fn test_five_regions_within_radius_form_one_hotspot() {
    // Spread within ~20 km of the first region, each at 2M potential
    let regions = vec![
        region("ALFA", -47.00, -22.90, &[("sugarcane", 2_000_000.0)]),
        region("BRAVO", -47.08, -22.93, &[("sugarcane", 2_000_000.0)]),
        region("CHARLIE", -47.12, -22.85, &[("cattle", 2_000_000.0)]),
        region("DELTA", -46.92, -22.96, &[("poultry", 2_000_000.0)]),
        region("ECHO", -47.03, -22.80, &[("sugarcane", 2_000_000.0)]),
    ];
    let engine = SiteEngine::new(regions, Vec::new(), EngineConfig::default());

    let hotspots = engine.detect_hotspots(&default_params()).unwrap();

    assert_eq!(hotspots.len(), 1);
    let h = &hotspots[0];
    assert_eq!(h.member_count, 5);
    assert_eq!(h.total_potential, 10_000_000.0);
    assert!(h.member_count >= default_params().min_cluster_size);
}

#[test]
fn test_isolated_region_returns_zero_hotspots() {
    let regions = vec![region(
        "LONELY",
        -50.0,
        -20.0,
        &[("sugarcane", 5_000_000.0)],
    )];
    let engine = SiteEngine::new(regions, Vec::new(), EngineConfig::default());

    let hotspots = engine.detect_hotspots(&default_params()).unwrap();
    assert!(hotspots.is_empty());
}

#[test]
fn test_hotspot_invariants_hold_across_clusters() {
    // Three packs at mutual distances far beyond the radius
    let mut regions = Vec::new();
    for (i, (lon, lat)) in [(-47.0, -22.9), (-50.5, -20.5), (-44.5, -21.5)]
        .iter()
        .enumerate()
    {
        for j in 0..4 {
            regions.push(region(
                &format!("R{}-{}", i, j),
                lon + j as f64 * 0.05,
                lat + j as f64 * 0.03,
                &[("sugarcane", 1_500_000.0 + i as f64 * 500_000.0)],
            ));
        }
    }
    let engine = SiteEngine::new(regions.clone(), Vec::new(), EngineConfig::default());
    let hotspots = engine.detect_hotspots(&default_params()).unwrap();

    assert_eq!(hotspots.len(), 3);

    // Disjointness
    for (i, a) in hotspots.iter().enumerate() {
        for b in &hotspots[i + 1..] {
            let set_a: std::collections::HashSet<_> = a.members.iter().collect();
            assert!(b.members.iter().all(|m| !set_a.contains(m)));
        }
    }

    // Radius respect and member ordering
    for h in &hotspots {
        let center = regions.iter().find(|r| r.name == h.center).unwrap();
        assert_eq!(h.members[0], h.center);
        let mut last = 0.0;
        for name in &h.members {
            let member = regions.iter().find(|r| &r.name == name).unwrap();
            let d = distance_km(&center.centroid, &member.centroid, DistanceMetric::Geodesic);
            assert!(d <= default_params().radius_km);
            assert!(d >= last);
            last = d;
        }
        assert!(h.member_count >= default_params().min_cluster_size);
        assert!((0.0..=1.0).contains(&h.synergy_score));
        assert!(h.dominant_criteria.len() <= 3);
    }

    // Ranked by aggregate potential, ids sequential from 1
    for (i, h) in hotspots.iter().enumerate() {
        assert_eq!(h.id, (i + 1) as u32);
        if i > 0 {
            assert!(hotspots[i - 1].total_potential >= h.total_potential);
        }
    }
}

#[test]
fn test_clustering_is_deterministic() {
    let regions: Vec<Region> = (0..30)
        .map(|i| {
            region(
                &format!("R{:02}", i),
                -47.0 + (i % 6) as f64 * 0.08,
                -22.9 + (i / 6) as f64 * 0.06,
                &[("sugarcane", 1_000_000.0 + (i % 5) as f64 * 300_000.0)],
            )
        })
        .collect();
    let engine = SiteEngine::new(regions, Vec::new(), EngineConfig::default());

    let first = engine.detect_hotspots(&default_params()).unwrap();
    let second = engine.detect_hotspots(&default_params()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_low_zoom_batch_is_min_of_cap_and_visible() {
    // 15,000 parcels in a grid; low zoom tier caps at 1000
    let properties: Vec<Property> = (0..15_000)
        .map(|i| {
            let x = -48.0 + (i % 150) as f64 * 0.01;
            let y = -23.5 + (i / 150) as f64 * 0.01;
            parcel(&format!("SP-{:05}", i), x, y, (i % 100) as f64)
        })
        .collect();
    let engine = SiteEngine::new(Vec::new(), properties, EngineConfig::default());

    // Bounds covering the full grid
    let wide = bounding_box(-49.0, -24.0, -45.0, -22.0).unwrap();
    let batch = engine.sample(8, wide).unwrap();
    assert_eq!(batch.len(), 1000);

    // Bounds covering a sliver with fewer than 1000 parcels
    let narrow = bounding_box(-48.0, -23.5, -47.95, -23.45).unwrap();
    let narrow_batch = engine.sample(8, narrow).unwrap();
    assert!(narrow_batch.len() < 1000);
    assert!(!narrow_batch.is_empty());
}

#[test]
fn test_resampling_same_viewport_is_identical() {
    let properties: Vec<Property> = (0..2000)
        .map(|i| {
            let x = -47.5 + (i % 50) as f64 * 0.01;
            let y = -23.0 + (i / 50) as f64 * 0.01;
            parcel(&format!("SP-{:04}", i), x, y, (i % 97) as f64)
        })
        .collect();
    let engine = SiteEngine::new(Vec::new(), properties, EngineConfig::default());
    let bounds = bounding_box(-47.6, -23.1, -46.9, -22.5).unwrap();

    let a = engine.sample(9, bounds).unwrap();
    let b = engine.sample(9, bounds).unwrap();
    assert_eq!(a.len(), b.len());
    assert_eq!(a.ids, b.ids);
}

#[test]
fn test_click_pipeline_end_to_end() {
    let properties = vec![
        parcel("SP-A", -47.00, -23.00, 90.0),
        parcel("SP-B", -47.10, -23.00, 70.0),
        parcel("SP-C", -47.20, -23.00, 50.0),
    ];
    let engine = SiteEngine::new(Vec::new(), properties, EngineConfig::default());

    let bounds = bounding_box(-47.5, -23.5, -46.5, -22.5).unwrap();
    let batch = engine.sample(14, bounds).unwrap();
    assert_eq!(batch.len(), 3);

    // Inside SP-B
    let hit = engine
        .resolve(&Point::new(-47.0975, -22.9975), &batch)
        .unwrap();
    assert_eq!(hit.as_deref(), Some("SP-B"));

    // Between parcels
    let miss = engine.resolve(&Point::new(-47.05, -22.99), &batch).unwrap();
    assert_eq!(miss, None);

    // The rendering surface gets full records in batch order
    let rendered = engine.batch_properties(&batch);
    assert_eq!(rendered.len(), 3);
    assert_eq!(rendered[0].id, "SP-A");
}

#[test]
fn test_resolution_soundness_over_grid() {
    // For every resolved click, the reported parcel must actually contain it
    use geo::Contains;

    let properties: Vec<Property> = (0..100)
        .map(|i| {
            let x = -47.0 + (i % 10) as f64 * 0.02;
            let y = -23.0 + (i / 10) as f64 * 0.02;
            parcel(&format!("SP-{:03}", i), x, y, 50.0)
        })
        .collect();
    let engine = SiteEngine::new(Vec::new(), properties, EngineConfig::default());
    let bounds = bounding_box(-47.5, -23.5, -46.5, -22.5).unwrap();
    let batch = engine.sample(15, bounds).unwrap();

    for i in 0..40 {
        let point = Point::new(-47.0 + i as f64 * 0.007, -23.0 + i as f64 * 0.004);
        if let Some(id) = engine.resolve(&point, &batch).unwrap() {
            let property = engine.property(&id).unwrap();
            assert!(
                property.geometry.contains(&point),
                "resolver reported '{}' which does not contain {:?}",
                id,
                point
            );
        }
    }
}

#[test]
fn test_rerender_gating() {
    let properties: Vec<Property> = (0..1200)
        .map(|i| {
            let x = -47.5 + (i % 40) as f64 * 0.01;
            let y = -23.0 + (i / 40) as f64 * 0.01;
            parcel(&format!("SP-{:04}", i), x, y, 50.0)
        })
        .collect();
    let engine = SiteEngine::new(Vec::new(), properties, EngineConfig::default());

    let wide = bounding_box(-48.0, -23.5, -46.5, -22.5).unwrap();
    let full = engine.sample(14, wide).unwrap();

    // A tiny pan keeps nearly everything in view: no re-render
    let nudged = bounding_box(-48.0, -23.5, -46.51, -22.5).unwrap();
    let after_pan = engine.sample(14, nudged).unwrap();
    assert!(!engine.needs_rerender(&full, &after_pan));

    // Zooming out to the low tier drops the batch far below threshold
    let zoomed_out = engine.sample(8, wide).unwrap();
    assert_eq!(zoomed_out.len(), 1000);
    // 1200 -> 1000 is within the default 500 threshold
    assert!(!engine.needs_rerender(&full, &zoomed_out));

    // A viewport away from the grid empties the batch entirely
    let elsewhere = bounding_box(-40.0, -15.0, -39.0, -14.0).unwrap();
    let empty = engine.sample(14, elsewhere).unwrap();
    assert!(engine.needs_rerender(&full, &empty));
}
