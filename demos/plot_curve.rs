extern crate plotters;
use plotters::prelude::*;

extern crate arcline;
use arcline::{Point3, QuadSpline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let keys = [
        Point3::new([-48.7134, -0.5356, 0.0]),
        Point3::new([0.9593, 0.7869, 10.8344]),
        Point3::new([-0.8523, -44.5942, 28.9085]),
        Point3::new([52.6940, -20.0053, 46.8857]),
        Point3::new([66.4766, 23.0054, 18.5315]),
        Point3::new([21.5014, 57.8555, 58.5114]),
        Point3::new([-15.8288, 42.1165, 23.2550]),
    ];
    let spline = QuadSpline::build(&keys)?;
    let bounds = spline.bounds();
    let (min, max) = (bounds.min(), bounds.max());

    // everything is drawn projected onto the xy plane
    let xy = |p: Point3| (p[0], p[1]);
    let key_points: Vec<(f64, f64)> = keys.iter().map(|&p| xy(p)).collect();
    let curve: Vec<(f64, f64)> = spline.polyline(100)?.into_iter().map(xy).collect();

    let root = BitMapBackend::new("quad_spline.png", (800, 640)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Arc-length parametrized quadratic spline", ("sans-serif", 21).into_font())
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d((min[0] - 10.0)..(max[0] + 10.0), (min[1] - 10.0)..(max[1] + 10.0))?;

    chart.configure_mesh().draw()?;

    // control polygon through the key points
    chart
        .draw_series(LineSeries::new(key_points.clone(), BLUE.mix(0.4)))?
        .label("Key Points")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart.draw_series(PointSeries::of_element(
        key_points,
        4,
        &BLUE,
        &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
    ))?;

    chart
        .draw_series(LineSeries::new(curve, &RED))?
        .label("Curve")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    // tangent markers at evenly spaced arc lengths
    chart
        .draw_series(
            spline
                .tangent_markers(50, 3.0)?
                .into_iter()
                .map(|(from, to)| PathElement::new(vec![xy(from), xy(to)], GREEN)),
        )?
        .label("Tangents")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    // projected bounding box wireframe
    let corners = bounds.corners();
    chart
        .draw_series(
            bounds
                .edges()
                .into_iter()
                .map(|(a, b)| PathElement::new(vec![xy(corners[a]), xy(corners[b])], BLACK.mix(0.3))),
        )?
        .label("Bounding Box")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
