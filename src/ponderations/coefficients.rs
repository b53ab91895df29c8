//! Partial factor tables of EN 1990 Annex A1
//!
//! Every limit state is generated from one or more runs. A run is a row of
//! partial factors (one γmin/γmax pair per action category) together with
//! the ψ selectors of the predominant and accompanying variable actions.

use serde::Serialize;

use super::buckets::LimitState;
use super::ponderation::PsiSelector;
use crate::actions::ActionCategory;
use crate::config::{AccidentalPsi, Configuration, Country, EquilibriumMode, GeoApproach, StrGeoFormula};

/// Favourable (min) and unfavourable (max) partial factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gamma {
    pub min: f64,
    pub max: f64,
}

impl Gamma {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Same factor whether favourable or not
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn varies(&self) -> bool {
        self.min != self.max
    }
}

const ABSENT: Gamma = Gamma::fixed(0.0);
const UNIT: Gamma = Gamma::fixed(1.0);

/// Partial factors by action category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoefficientRow {
    pub permanent: Gamma,
    pub prestress: Gamma,
    pub variable: Gamma,
    pub accidental: Gamma,
    pub seismic: Gamma,
    /// Only defined by the French national annex
    pub groundwater: Option<Gamma>,
}

impl CoefficientRow {
    /// Row where the permanent actions, prestress and variable actions get
    /// the given factors and accidental/seismic actions are excluded
    const fn persistent(permanent: Gamma, variable: Gamma) -> Self {
        Self {
            permanent,
            prestress: UNIT,
            variable,
            accidental: ABSENT,
            seismic: ABSENT,
            groundwater: None,
        }
    }

    /// Factors for a category, `None` when the row cannot classify it
    pub fn gamma(&self, category: ActionCategory) -> Option<Gamma> {
        match category {
            ActionCategory::PermanentLoad => Some(self.permanent),
            ActionCategory::Prestress => Some(self.prestress),
            ActionCategory::Variable => Some(self.variable),
            ActionCategory::Accidental => Some(self.accidental),
            ActionCategory::Seismic => Some(self.seismic),
            ActionCategory::Groundwater => self.groundwater,
            ActionCategory::Unknown => None,
        }
    }

    /// Adapt the row to a country profile. The French annex treats
    /// groundwater like the permanent actions of the row.
    fn for_country(mut self, country: Country) -> Self {
        self.groundwater = match country {
            Country::EU => None,
            Country::FR => Some(self.permanent),
        };
        self
    }
}

/// One generation run of a limit state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BucketRun {
    pub row: CoefficientRow,
    pub psi_predominant: PsiSelector,
    pub psi_accompanying: PsiSelector,
}

impl BucketRun {
    const fn new(row: CoefficientRow, psi_predominant: PsiSelector, psi_accompanying: PsiSelector) -> Self {
        Self {
            row,
            psi_predominant,
            psi_accompanying,
        }
    }
}

/// Table A1.2(A), set A
const EQU_SET_A: CoefficientRow = CoefficientRow::persistent(Gamma::new(0.9, 1.1), Gamma::new(0.0, 1.5));

/// Table A1.2(A) note 3, checked together with set B
const EQU_SET_B_1: CoefficientRow = CoefficientRow::persistent(Gamma::new(1.15, 1.35), Gamma::new(0.0, 1.5));
const EQU_SET_B_2: CoefficientRow = CoefficientRow::persistent(UNIT, Gamma::new(0.0, 1.5));

/// Table A1.2(B), expressions (6.10) and (6.10a)
const SET_B: CoefficientRow = CoefficientRow::persistent(Gamma::new(1.0, 1.35), Gamma::new(0.0, 1.5));

/// Table A1.2(B), expression (6.10b) with ξ = 0.85
const SET_B_REDUCED: CoefficientRow = CoefficientRow::persistent(Gamma::new(1.0, 1.15), Gamma::new(0.0, 1.5));

/// Table A1.2(C)
const SET_C: CoefficientRow = CoefficientRow::persistent(UNIT, Gamma::new(0.0, 1.3));

/// Table A1.3 accidental design situation, expression (6.11)
const ACCIDENTAL: CoefficientRow = CoefficientRow {
    permanent: UNIT,
    prestress: UNIT,
    variable: Gamma::new(0.0, 1.0),
    accidental: UNIT,
    seismic: ABSENT,
    groundwater: None,
};

/// Table A1.3 seismic design situation, expression (6.12)
const SEISMIC: CoefficientRow = CoefficientRow {
    permanent: UNIT,
    prestress: UNIT,
    variable: Gamma::new(0.0, 1.0),
    accidental: ABSENT,
    seismic: UNIT,
    groundwater: None,
};

/// Table A1.4, serviceability and fatigue
const SERVICEABILITY: CoefficientRow = CoefficientRow::persistent(UNIT, Gamma::new(0.0, 1.0));

/// Runs of the fundamental set B according to the chosen expression
fn set_b_runs(formula: StrGeoFormula) -> Vec<BucketRun> {
    match formula {
        StrGeoFormula::F6_10 => vec![BucketRun::new(SET_B, PsiSelector::None, PsiSelector::Psi0)],
        StrGeoFormula::F6_10ab => vec![
            BucketRun::new(SET_B, PsiSelector::Psi0, PsiSelector::Psi0),
            BucketRun::new(SET_B_REDUCED, PsiSelector::None, PsiSelector::Psi0),
        ],
    }
}

fn set_c_run() -> BucketRun {
    BucketRun::new(SET_C, PsiSelector::None, PsiSelector::Psi0)
}

/// Every run to perform, with its target limit state, for a configuration
pub fn coefficient_plan(config: &Configuration) -> Vec<(LimitState, BucketRun)> {
    let mut plan = Vec::new();

    match config.equilibrium_mode {
        EquilibriumMode::EquilibriumOnly => {
            plan.push((LimitState::EluEqu, BucketRun::new(EQU_SET_A, PsiSelector::None, PsiSelector::Psi0)));
        }
        EquilibriumMode::EquilibriumAndResistance => {
            plan.push((LimitState::EluEqu, BucketRun::new(EQU_SET_B_1, PsiSelector::None, PsiSelector::Psi0)));
            plan.push((LimitState::EluEqu, BucketRun::new(EQU_SET_B_2, PsiSelector::None, PsiSelector::Psi0)));
        }
    }

    let set_b = set_b_runs(config.str_geo_formula);
    for run in &set_b {
        plan.push((LimitState::EluStr, *run));
    }
    match config.str_geo_approach {
        GeoApproach::Approach1 => {
            for run in &set_b {
                plan.push((LimitState::EluGeo, *run));
            }
            plan.push((LimitState::EluGeo, set_c_run()));
        }
        GeoApproach::Approach2 => {
            for run in &set_b {
                plan.push((LimitState::EluGeo, *run));
            }
        }
        GeoApproach::Approach3 => {
            plan.push((LimitState::EluGeo, set_c_run()));
        }
    }

    plan.push((LimitState::EluFat, BucketRun::new(SERVICEABILITY, PsiSelector::Psi1, PsiSelector::Psi2)));

    let accidental_psi = match config.accidental_psi {
        AccidentalPsi::Frequent => PsiSelector::Psi1,
        AccidentalPsi::QuasiPermanent => PsiSelector::Psi2,
    };
    plan.push((LimitState::EluAcc, BucketRun::new(ACCIDENTAL, accidental_psi, PsiSelector::Psi2)));
    plan.push((LimitState::EluSis, BucketRun::new(SEISMIC, PsiSelector::Psi2, PsiSelector::Psi2)));

    plan.push((LimitState::ElsCar, BucketRun::new(SERVICEABILITY, PsiSelector::None, PsiSelector::Psi0)));
    plan.push((LimitState::ElsFreq, BucketRun::new(SERVICEABILITY, PsiSelector::Psi1, PsiSelector::Psi2)));
    plan.push((LimitState::ElsPerm, BucketRun::new(SERVICEABILITY, PsiSelector::Psi2, PsiSelector::Psi2)));

    for (_, run) in &mut plan {
        run.row = run.row.for_country(config.country);
    }
    plan
}
