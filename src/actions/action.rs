//! Actions and their EN 1990 classification

use serde::{Deserialize, Serialize};

/// Identifier of an action in the registry
pub type ActionId = usize;

/// Eurocode category of an action, used to pick its partial factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    /// Self weight and other permanent loads (G)
    PermanentLoad,
    /// Prestress (P)
    Prestress,
    /// Variable actions (Q)
    Variable,
    /// Accidental actions (A)
    Accidental,
    /// Seismic actions (AE)
    Seismic,
    /// Groundwater pressure, only classified by the French national annex
    Groundwater,
    /// Unclassifiable action; rejected when ponderations are expanded
    Unknown,
}

impl ActionCategory {
    pub fn is_variable(self) -> bool {
        self == Self::Variable
    }
}

/// Imposed load categories of EN 1991-1-1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImposedCategory {
    /// Domestic, residential areas
    A,
    /// Office areas
    B,
    /// Congregation areas
    C,
    /// Shopping areas
    D,
    /// Storage areas
    E,
    /// Traffic areas, vehicle weight <= 30 kN
    F,
    /// Traffic areas, 30 kN < vehicle weight <= 160 kN
    G,
    /// Roofs
    H,
}

/// Row of EN 1990 Table A1.1, i.e. the physical nature of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    PermanentLoad,
    Prestress,
    Imposed(ImposedCategory),
    /// Snow in Finland, Iceland, Norway, Sweden
    SnowNordic,
    /// Snow on sites above 1000 m
    SnowHighAltitude,
    /// Snow on sites at or below 1000 m
    Snow,
    Wind,
    /// Temperature (non-fire)
    Temperature,
    Accidental,
    Seismic,
    Groundwater,
}

impl ActionKind {
    /// Category this kind of action belongs to
    pub fn category(self) -> ActionCategory {
        match self {
            Self::PermanentLoad => ActionCategory::PermanentLoad,
            Self::Prestress => ActionCategory::Prestress,
            Self::Accidental => ActionCategory::Accidental,
            Self::Seismic => ActionCategory::Seismic,
            Self::Groundwater => ActionCategory::Groundwater,
            Self::Imposed(_)
            | Self::SnowNordic
            | Self::SnowHighAltitude
            | Self::Snow
            | Self::Wind
            | Self::Temperature => ActionCategory::Variable,
        }
    }

    /// Recommended ψ values of EN 1990 Table A1.1
    pub fn default_psi(self) -> PsiFactors {
        use ImposedCategory::*;

        match self {
            Self::Imposed(A) | Self::Imposed(B) | Self::Imposed(G) => PsiFactors::new(0.7, 0.5, 0.3),
            Self::Imposed(C) | Self::Imposed(D) | Self::Imposed(F) => PsiFactors::new(0.7, 0.7, 0.6),
            Self::Imposed(E) => PsiFactors::new(1.0, 0.9, 0.8),
            Self::Imposed(H) => PsiFactors::new(0.0, 0.0, 0.0),
            Self::SnowNordic | Self::SnowHighAltitude => PsiFactors::new(0.7, 0.5, 0.2),
            Self::Snow => PsiFactors::new(0.5, 0.2, 0.0),
            Self::Wind => PsiFactors::new(0.6, 0.2, 0.0),
            Self::Temperature => PsiFactors::new(0.6, 0.5, 0.0),
            _ => PsiFactors::unity(),
        }
    }
}

/// Combination (ψ0), frequent (ψ1) and quasi-permanent (ψ2) factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsiFactors {
    pub psi0: f64,
    pub psi1: f64,
    pub psi2: f64,
}

impl PsiFactors {
    pub fn new(psi0: f64, psi1: f64, psi2: f64) -> Self {
        Self { psi0, psi1, psi2 }
    }

    /// Factors for actions never reduced by ψ
    pub fn unity() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl Default for PsiFactors {
    fn default() -> Self {
        Self::unity()
    }
}

/// A load action (load case) taking part in combinations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Display name
    pub name: String,
    /// Eurocode category
    pub category: ActionCategory,
    /// Table A1.1 row the action was created from, if any
    pub kind: Option<ActionKind>,
    /// ψ factors applied when the action accompanies or is reduced
    pub psi: PsiFactors,
}

impl Action {
    /// Create an action with an explicit category and unit ψ factors
    pub fn new(name: &str, category: ActionCategory) -> Self {
        Self {
            name: name.to_string(),
            category,
            kind: None,
            psi: PsiFactors::unity(),
        }
    }

    /// Create an action from its Table A1.1 kind, with the recommended ψ values
    pub fn of_kind(name: &str, kind: ActionKind) -> Self {
        Self {
            name: name.to_string(),
            category: kind.category(),
            kind: Some(kind),
            psi: kind.default_psi(),
        }
    }

    /// Override the ψ factors
    pub fn with_psi(mut self, psi0: f64, psi1: f64, psi2: f64) -> Self {
        self.psi = PsiFactors::new(psi0, psi1, psi2);
        self
    }

    /// Common actions
    pub fn self_weight() -> Self {
        Self::of_kind("Self weight", ActionKind::PermanentLoad)
    }

    pub fn office() -> Self {
        Self::of_kind("Office", ActionKind::Imposed(ImposedCategory::B))
    }

    pub fn snow() -> Self {
        Self::of_kind("Snow", ActionKind::Snow)
    }

    pub fn wind() -> Self {
        Self::of_kind("Wind", ActionKind::Wind)
    }

    pub fn is_variable(&self) -> bool {
        self.category.is_variable()
    }
}
