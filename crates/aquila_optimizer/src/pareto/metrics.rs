use crate::pareto::{front::ParetoFront, objectives::Axis};

/// Default hypervolume reference point `(distance, risk)`.
pub const DEFAULT_REFERENCE_POINT: (f64, f64) = (1000.0, 100.0);

/// 2-D hypervolume of the front projected on (distance, risk), measured
/// against `reference`. Points beyond the reference contribute nothing.
pub fn hypervolume(front: &ParetoFront, reference: (f64, f64)) -> f64 {
    let (ref_distance, ref_risk) = reference;

    let mut points: Vec<(f64, f64)> = front
        .iter()
        .map(|solution| (solution.objectives().distance, solution.objectives().risk))
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut volume = 0.0;
    let mut previous_risk = ref_risk;

    for (distance, risk) in points {
        if distance < ref_distance && risk < previous_risk {
            volume += (ref_distance - distance) * (previous_risk - risk);
            previous_risk = risk;
        }
    }

    volume
}

/// Mean 3-D objective-space gap between neighbors after sorting by distance.
pub fn spread(front: &ParetoFront) -> f64 {
    if front.len() < 2 {
        return 0.0;
    }

    let mut points: Vec<[f64; 3]> = front
        .iter()
        .map(|solution| {
            let objectives = solution.objectives();
            [
                objectives.project(Axis::Distance),
                objectives.project(Axis::Risk),
                objectives.project(Axis::Recharges),
            ]
        })
        .collect();
    points.sort_by(|a, b| a[0].total_cmp(&b[0]));

    let total: f64 = points
        .windows(2)
        .map(|pair| {
            pair[0]
                .iter()
                .zip(pair[1].iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt()
        })
        .sum();

    total / (points.len() - 1) as f64
}
