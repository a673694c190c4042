use std::sync::Arc;

use proptest::prelude::*;

use shapeyard::calculator::{CoordinatePlane, sphere};
use shapeyard::validators::{is_coordinate, validate_triangle};
use shapeyard::{
    GeometryError, MetricsWarehouse, Point, PointFactory, Shape, ShapeEventBus, ShapeFactory, ShapeId,
    ShapeRepository, Sphere, SphereFactory, Triangle, TriangleFactory,
};

/// Property test strategies for generating shape records
pub mod strategies {
    use super::*;
    use proptest::string::string_regex;

    /// Strategy for coordinate tokens accepted by the record grammar
    pub fn coordinate_token_strategy() -> impl Strategy<Value = String> {
        string_regex(r"-?[0-9]{1,4}(\.[0-9]{1,3})?").unwrap()
    }

    /// Strategy for tokens that look numeric but are outside the grammar
    pub fn malformed_token_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            string_regex(r"[0-9]{1,3}e[0-9]{1,2}").unwrap(),
            string_regex(r"\+[0-9]{1,3}").unwrap(),
            string_regex(r"[0-9]{1,3}\.").unwrap(),
            string_regex(r"\.[0-9]{1,3}").unwrap(),
            string_regex(r"[a-z]{1,4}").unwrap(),
        ]
    }

    /// Strategy for shape identifiers
    pub fn shape_id_strategy() -> impl Strategy<Value = ShapeId> {
        string_regex(r"[a-z][a-z0-9_]{0,15}")
            .unwrap()
            .prop_map(|s| ShapeId::new(s).unwrap())
    }

    /// Strategy for small integer-valued coordinates
    pub fn small_coordinate_strategy() -> impl Strategy<Value = f64> {
        (-1000i32..1000).prop_map(f64::from)
    }
}

fn id(s: &str) -> ShapeId {
    ShapeId::new(s).unwrap()
}

fn sphere_at(x: f64, y: f64, z: f64, radius: f64) -> Sphere {
    let sid = id("s");
    Sphere::new(sid.clone(), Point::new(sid.child("center"), x, y, z), radius)
}

fn triangle_of(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Triangle {
    let tid = id("t");
    Triangle::new(
        tid.clone(),
        Point::new_2d(tid.child("A"), a.0, a.1),
        Point::new_2d(tid.child("B"), b.0, b.1),
        Point::new_2d(tid.child("C"), c.0, c.1),
    )
}

proptest! {
    #[test]
    fn grammar_accepts_generated_coordinates(token in strategies::coordinate_token_strategy()) {
        prop_assert!(is_coordinate(&token));
    }

    #[test]
    fn grammar_rejects_malformed_tokens(token in strategies::malformed_token_strategy()) {
        prop_assert!(!is_coordinate(&token));
        let record = format!("0 {} 0", token);
        prop_assert!(PointFactory.create(&record, &id("p")).is_err());
    }

    #[test]
    fn two_token_points_sit_on_xy_plane(
        x in strategies::coordinate_token_strategy(),
        y in strategies::coordinate_token_strategy(),
    ) {
        let point = PointFactory.create(&format!("{} {}", x, y), &id("p")).unwrap();
        prop_assert_eq!(point.x(), x.parse::<f64>().unwrap());
        prop_assert_eq!(point.y(), y.parse::<f64>().unwrap());
        prop_assert_eq!(point.z(), 0.0);
    }

    #[test]
    fn three_token_points_keep_z(
        x in strategies::coordinate_token_strategy(),
        y in strategies::coordinate_token_strategy(),
        z in strategies::coordinate_token_strategy(),
    ) {
        let point = PointFactory.create(&format!("{} {} {}", x, y, z), &id("p")).unwrap();
        prop_assert_eq!(point.z(), z.parse::<f64>().unwrap());
    }

    #[test]
    fn sphere_radius_defaults_to_one(
        x in strategies::coordinate_token_strategy(),
        y in strategies::coordinate_token_strategy(),
        z in strategies::coordinate_token_strategy(),
    ) {
        let sphere = SphereFactory.create(&format!("{} {} {}", x, y, z), &id("s")).unwrap();
        prop_assert_eq!(sphere.radius(), shapeyard::DEFAULT_RADIUS);
    }

    #[test]
    fn non_positive_radius_is_rejected(radius in 0u32..10_000) {
        let record = format!("0 0 0 -{}", radius);
        let err = SphereFactory.create(&record, &id("s")).unwrap_err();
        prop_assert_eq!(
            err.to_string(),
            "Failed to create sphere: Sphere radius must be positive"
        );
    }

    #[test]
    fn volume_ratio_ignores_side_of_plane(
        x in strategies::small_coordinate_strategy(),
        y in strategies::small_coordinate_strategy(),
        z in strategies::small_coordinate_strategy(),
        radius in 1i32..2000,
    ) {
        let radius = f64::from(radius);
        let above = sphere_at(x, y, z, radius);
        let below = sphere_at(-x, -y, -z, radius);
        for plane in CoordinatePlane::ALL {
            let a = sphere::calculate_volume_ratio(&above, plane).unwrap();
            let b = sphere::calculate_volume_ratio(&below, plane).unwrap();
            prop_assert_eq!(a, b);
            prop_assert!((0.0..=0.5 + 1e-12).contains(&a));
        }
    }

    #[test]
    fn collinear_vertices_are_rejected(
        x in strategies::small_coordinate_strategy(),
        y in strategies::small_coordinate_strategy(),
        dx in 1i32..100,
        dy in -100i32..100,
    ) {
        let (dx, dy) = (f64::from(dx), f64::from(dy));
        let t = triangle_of((x, y), (x + dx, y + dy), (x + 2.0 * dx, y + 2.0 * dy));
        let err = validate_triangle(&t).unwrap_err();
        prop_assert_eq!(err.to_string(), "Triangle points must not be collinear");
    }

    #[test]
    fn repeated_vertices_are_rejected(
        x in strategies::small_coordinate_strategy(),
        y in strategies::small_coordinate_strategy(),
        cx in strategies::small_coordinate_strategy(),
        cy in strategies::small_coordinate_strategy(),
    ) {
        let t = triangle_of((x, y), (x, y), (cx, cy));
        let err = validate_triangle(&t).unwrap_err();
        prop_assert_eq!(err.to_string(), "Triangle points must be distinct");
    }

    #[test]
    fn axis_aligned_right_triangles_are_accepted(
        x in strategies::small_coordinate_strategy(),
        y in strategies::small_coordinate_strategy(),
        w in 1i32..100,
        h in 1i32..100,
    ) {
        let record = format!("{} {}\n{} {}\n{} {}", x, y, x + f64::from(w), y, x, y + f64::from(h));
        let t = TriangleFactory.create(&record, &id("t")).unwrap();
        let area = shapeyard::calculator::triangle::calculate_area(&t).unwrap();
        let expected = f64::from(w) * f64::from(h) / 2.0;
        prop_assert!((area - expected).abs() <= expected * 1e-9);
    }

    #[test]
    fn recalculation_is_idempotent(
        x in strategies::small_coordinate_strategy(),
        radius in 1i32..500,
    ) {
        let warehouse = Arc::new(MetricsWarehouse::new());
        let bus = ShapeEventBus::new();
        warehouse.observe(&bus);
        let shape: Shape = sphere_at(x, 0.0, 0.0, f64::from(radius)).into();

        bus.notify(&shape);
        let first = warehouse.get_metrics(shape.id());
        bus.notify(&shape);
        prop_assert_eq!(warehouse.get_metrics(shape.id()), first);
        prop_assert_eq!(warehouse.len(), 1);
    }

    #[test]
    fn repository_sorts_by_id(ids in proptest::collection::vec(strategies::shape_id_strategy(), 0..20)) {
        let repository = ShapeRepository::new();
        for shape_id in &ids {
            repository.add(Point::new(shape_id.clone(), 0.0, 0.0, 0.0).into());
        }
        let sorted: Vec<ShapeId> = repository.sort_by_id().iter().map(|s| s.id().clone()).collect();
        let mut expected = ids.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(sorted, expected);
    }
}

#[test]
fn invalid_records_are_construction_errors() {
    let cases: [(&str, &dyn ShapeFactory); 5] = [
        ("0 0 0 -1", &SphereFactory),
        ("0 0 x", &SphereFactory),
        ("0 0\n1 1\n2 2", &TriangleFactory),
        ("0 0\n0 0\n2 2", &TriangleFactory),
        ("0", &PointFactory),
    ];
    for (record, factory) in cases {
        let err = factory.create_shape(record, &id("x")).unwrap_err();
        assert!(
            matches!(err, GeometryError::Construction { .. }),
            "{:?} for {:?}",
            err,
            record
        );
    }
}
