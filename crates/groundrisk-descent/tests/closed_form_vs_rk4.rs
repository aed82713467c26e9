// The closed form decouples the axes; the RK4 integration does not. For the
// drag regimes of small aircraft the two should land within a few percent.

use groundrisk_core::{AircraftDescription, AircraftType};
use groundrisk_descent::{descend_body, integrate_descent, integrated_impact, BallisticDescent, DescentBody, IntegrateOpts};

fn body(mass: f64, area: f64, drag_coef: f64) -> DescentBody {
    DescentBody { mass, frontal_area: area, drag_coef, air_density: 1.225, gravity: 9.82 }
}

fn rel(a: f64, b: f64) -> f64 {
    ((a - b) / b).abs()
}

#[test]
fn closed_form_tracks_numerical_reference() -> anyhow::Result<()> {
    let cases = [
        (body(90.0, 0.36, 0.8), 100.0, 28.0, 0.0),
        (body(5.0, 0.1, 0.7), 50.0, 20.0, 5.0),
        (body(2.0, 0.05, 1.0), 120.0, 15.0, -3.0),
        (body(25.0, 0.2, 0.8), 300.0, 40.0, 10.0),
    ];
    for (b, h, vx, vy) in cases {
        let closed = descend_body(&b, h, vx, vy)?;
        let samples = integrate_descent(&b, h, vx, vy, IntegrateOpts::default());
        let numeric = integrated_impact(&samples).ok_or_else(|| anyhow::anyhow!("no samples"))?;

        assert!(rel(closed.distance, numeric.distance) < 0.06, "distance {closed:?} vs {numeric:?}");
        assert!(rel(closed.time, numeric.time) < 0.04, "time {closed:?} vs {numeric:?}");
        assert!(rel(closed.impact_speed, numeric.impact_speed) < 0.04, "speed {closed:?} vs {numeric:?}");
        assert!((closed.impact_angle - numeric.impact_angle).abs() < 2f64.to_radians());
    }
    Ok(())
}

#[test]
fn level_release_never_exceeds_terminal_velocity() -> anyhow::Result<()> {
    let mut ac = AircraftDescription::new(AircraftType::FixedWing, 3.0, 2.0, 90.0);
    ac.set_ballistic(0.36, 0.8);
    let model = BallisticDescent::new(ac);
    let gamma = model.terminal_velocity()?.first();

    let out = model.descend_sweep(vec![5.0, 50.0, 500.0, 5000.0], 30.0, 0.0)?;
    for r in out {
        assert!(r.impact_speed <= gamma);
    }
    Ok(())
}

#[test]
fn drag_coefficient_sweep() -> anyhow::Result<()> {
    let mut ac = AircraftDescription::new(AircraftType::Rotorcraft, 2.0, 2.0, 20.0);
    ac.set_ballistic(0.2, vec![0.4, 0.7, 1.0, 1.3]);
    let out = BallisticDescent::new(ac).descend_sweep(150.0, 25.0, 0.0)?;
    assert_eq!(out.len(), 4);
    for pair in out.windows(2) {
        assert!(pair[1].impact_speed < pair[0].impact_speed);
        assert!(pair[1].time > pair[0].time);
    }
    Ok(())
}
