// Aircraft descriptions authored as JSON, the way scenario packs carry them.

use groundrisk_core::warnings::{capture, Warning};
use groundrisk_core::{broadcast_len, AircraftDescription, AircraftType, FuelType, GroundRiskError, Param};

const QUAD: &str = r#"{
    "aircraft_type": "MultiRotor",
    "width": 0.05,
    "length": 0.3,
    "mass": [0.5, 2.0, 4.0],
    "ballistic_frontal_area": 0.02,
    "ballistic_drag_coef": 1.0,
    "fuel_type": "LiIonBattery",
    "fuel_quantity": 0.2,
    "friction_coef": 0.6,
    "restitution_coef": 0.7,
    "restitution_curve": [[9.0, 0.9], [90.0, 0.6]]
}"#;

#[test]
fn parsed_values_are_kept_and_validated_later() {
    let ac: AircraftDescription = serde_json::from_str(QUAD).unwrap();
    assert_eq!(ac.aircraft_type(), AircraftType::MultiRotor);
    assert_eq!(ac.mass(), &Param::Vector(vec![0.5, 2.0, 4.0]));
    assert_eq!(ac.fuel_type(), Some(FuelType::LiIonBattery));
    assert!(ac.cruise_speed().is_none());

    let (_, w) = capture(|| ac.validate());
    let flagged: Vec<_> = w
        .iter()
        .filter_map(|w| match w {
            Warning::OutOfRange { parameter, .. } => Some(*parameter),
            _ => None,
        })
        .collect();
    assert_eq!(flagged, vec!["width", "mass"]);
}

#[test]
fn terminal_velocity_sweeps_over_mass() {
    let ac: AircraftDescription = serde_json::from_str(QUAD).unwrap();
    let v = ac.terminal_velocity(1.225).unwrap();
    assert_eq!(v.len(), 3);
    assert!(v.at(0) < v.at(1) && v.at(1) < v.at(2));
}

#[test]
fn second_vector_is_rejected() {
    let mut ac: AircraftDescription = serde_json::from_str(QUAD).unwrap();
    ac.set_geometry(vec![0.5, 0.6], 0.3);
    let err = broadcast_len(&[("width", ac.width()), ("mass", ac.mass())]).unwrap_err();
    assert_eq!(err, GroundRiskError::MultipleVectors { first: "width", second: "mass" });
}
