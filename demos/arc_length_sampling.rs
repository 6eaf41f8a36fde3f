use arcline::{Point3, PointNorm, QuadSpline};

fn main() -> Result<(), arcline::SplineError> {
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

    println!("total length: {:.5}", spline.total_length());
    for (i, segment) in spline.segments().enumerate() {
        println!(
            "segment {}  {:?}  length={:.4}  share={:.4}  cumulative={:.4}",
            i,
            segment.shape(),
            segment.length(),
            segment.percent(),
            segment.percent_addup()
        );
    }

    // equal steps in t give equal steps along the curve
    let steps = 11;
    let mut prev: Option<Point3> = None;
    for (i, sample) in spline.samples(steps)?.enumerate() {
        let sample = sample?;
        let t = i as f64 / (steps - 1) as f64;
        let p = sample.point;
        match prev.map(|q| (p - q).norm()) {
            Some(d) => println!("t={:.2}  p={:?}  gap={:.4}  {:?}", t, p, d, sample.convergence),
            None => println!("t={:.2}  p={:?}", t, p),
        }
        prev = Some(p);
    }
    Ok(())
}
