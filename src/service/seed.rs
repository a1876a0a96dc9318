use crate::domain::NewPolygon;
use crate::domain::point::points_from_pairs;

/// Sample shapes loaded by `polyvault seed`
pub fn sample_polygons() -> Vec<NewPolygon> {
    vec![
        NewPolygon::new(
            "Triangle",
            points_from_pairs(&[(100.0, 100.0), (200.0, 100.0), (150.0, 50.0)]),
        ),
        NewPolygon::new(
            "Square",
            points_from_pairs(&[(300.0, 300.0), (400.0, 300.0), (400.0, 400.0), (300.0, 400.0)]),
        ),
        NewPolygon::new(
            "Pentagon",
            points_from_pairs(&[
                (500.0, 200.0),
                (550.0, 150.0),
                (600.0, 200.0),
                (580.0, 250.0),
                (520.0, 250.0),
            ]),
        ),
        NewPolygon::new(
            "Hexagon",
            points_from_pairs(&[
                (700.0, 300.0),
                (750.0, 280.0),
                (800.0, 300.0),
                (800.0, 350.0),
                (750.0, 370.0),
                (700.0, 350.0),
            ]),
        ),
    ]
}
