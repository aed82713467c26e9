//! iGRC table: one row per size class, one column per population density.
//!
//! Each class is evaluated twice, a glide impact at cruise speed and a
//! ballistic impact after loss of thrust at the scenario altitude. The larger
//! of the two critical areas sets the class's iGRC.

use serde::Serialize;

use groundrisk_core::{GroundRiskError, Result};
use groundrisk_descent::{BallisticDescent, BallisticResult};
use groundrisk_models::{CriticalArea, CriticalAreaModel};

use crate::igrc::{igrc, Igrc};
use crate::parameters::{ScenarioParameters, SizeClass};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IgrcRow {
    pub class: SizeClass,
    pub glide: CriticalArea,
    pub ballistic: CriticalArea,
    pub descent: BallisticResult,
    /// Larger of the glide and ballistic totals [m²]
    pub critical_area: f64,
    pub controlled: Igrc,
    /// One entry per population density of the table
    pub igrc: Vec<Igrc>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IgrcTable {
    pub model: CriticalAreaModel,
    pub densities: Vec<f64>,
    pub rows: Vec<IgrcRow>,
}

impl IgrcTable {
    pub fn generate(params: &ScenarioParameters, model: CriticalAreaModel) -> Result<Self> {
        params.validate();
        let rows = params
            .classes
            .iter()
            .map(|class| row(params, model, class))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { model, densities: params.population_densities.clone(), rows })
    }

    /// iGRC classes as a matrix, controlled column first.
    pub fn classes(&self) -> Vec<Vec<u32>> {
        self.rows
            .iter()
            .map(|r| std::iter::once(r.controlled.class).chain(r.igrc.iter().map(|g| g.class)).collect())
            .collect()
    }

    pub fn max_class(&self) -> u32 {
        self.classes().into_iter().flatten().max().unwrap_or(1)
    }
}

fn row(params: &ScenarioParameters, model: CriticalAreaModel, class: &SizeClass) -> Result<IgrcRow> {
    let aircraft = class.aircraft();
    let area = |speed: f64, angle: f64| -> Result<CriticalArea> {
        params
            .models
            .critical_area(model, &aircraft, speed, angle, params.overlap, None)?
            .into_iter()
            .next()
            .ok_or(GroundRiskError::EmptyVector("critical area"))
    };

    let glide = area(class.cruise_speed, class.glide_angle())?;
    let descent = BallisticDescent::new(aircraft.clone()).descend(params.altitude, class.cruise_speed, 0.0)?;
    let ballistic = area(descent.impact_speed, descent.impact_angle_deg())?;
    let critical_area = glide.total.max(ballistic.total);

    tracing::debug!(
        dimension = class.dimension,
        glide = glide.total,
        ballistic = ballistic.total,
        impact_speed = descent.impact_speed,
        impact_angle = descent.impact_angle_deg(),
        "size class evaluated"
    );

    Ok(IgrcRow {
        class: class.clone(),
        glide,
        ballistic,
        descent,
        critical_area,
        controlled: Igrc::CONTROLLED,
        igrc: params.population_densities.iter().map(|&d| igrc(d, critical_area, params.tlos)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundrisk_core::warnings::capture;

    #[test]
    fn reference_table_is_monotone() {
        let (table, w) = capture(|| IgrcTable::generate(&ScenarioParameters::reference(), CriticalAreaModel::Jarus));
        let table = table.unwrap();
        assert!(w.is_empty(), "{w:?}");
        assert_eq!(table.rows.len(), 5);

        for r in &table.rows {
            assert_eq!(r.controlled.class, 1);
            assert_eq!(r.igrc.len(), 5);
            for pair in r.igrc.windows(2) {
                assert!(pair[1].class >= pair[0].class);
                assert!((pair[1].raw - pair[0].raw - 1.0).abs() < 1e-9);
            }
        }
        for pair in table.rows.windows(2) {
            assert!(pair[1].critical_area > pair[0].critical_area);
        }
    }

    #[test]
    fn glide_dominates_reference_classes() {
        let table = IgrcTable::generate(&ScenarioParameters::reference(), CriticalAreaModel::Jarus).unwrap();
        for r in &table.rows {
            assert!(r.glide.total > r.ballistic.total);
            assert_eq!(r.critical_area, r.glide.total);
        }
    }

    #[test]
    fn classes_matrix_has_controlled_column() {
        let table = IgrcTable::generate(&ScenarioParameters::reference(), CriticalAreaModel::Jarus).unwrap();
        let m = table.classes();
        assert_eq!(m.len(), 5);
        assert!(m.iter().all(|row| row.len() == 6 && row[0] == 1));
        assert_eq!(table.max_class(), m[4][5]);
    }
}
