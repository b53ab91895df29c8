//! Generation options

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CombiError;

/// How static equilibrium (ELU_EQU) is checked, EN 1990 Table A1.2(A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquilibriumMode {
    /// Equilibrium only, set A
    EquilibriumOnly,
    /// Equilibrium involving the resistance of structural members
    EquilibriumAndResistance,
}

/// Expression used for the STR/GEO fundamental combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrGeoFormula {
    /// Expression (6.10)
    F6_10,
    /// Less favourable of expressions (6.10a) and (6.10b)
    F6_10ab,
}

/// Design approach for STR/GEO, EN 1990 A1.3.1(5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoApproach {
    /// Sets C and B in separate calculations
    Approach1,
    /// Set B for all actions
    Approach2,
    /// Set C for geotechnical actions, set B otherwise
    Approach3,
}

/// ψ applied to the main variable action of accidental combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccidentalPsi {
    /// ψ1
    Frequent,
    /// ψ2
    QuasiPermanent,
}

/// Country profile selecting the partial factor tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    /// Recommended values of EN 1990
    EU,
    /// French national annex, which also classifies groundwater actions
    FR,
}

/// Options for ponderation generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub equilibrium_mode: EquilibriumMode,
    pub str_geo_formula: StrGeoFormula,
    pub str_geo_approach: GeoApproach,
    pub accidental_psi: AccidentalPsi,
    pub country: Country,
    /// Run predominance passes on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            equilibrium_mode: EquilibriumMode::EquilibriumOnly,
            str_geo_formula: StrGeoFormula::F6_10,
            str_geo_approach: GeoApproach::Approach2,
            accidental_psi: AccidentalPsi::Frequent,
            country: Country::EU,
            parallel: false,
        }
    }
}

impl Configuration {
    /// Default options for a country
    pub fn for_country(country: Country) -> Self {
        Self {
            country,
            ..Self::default()
        }
    }

    pub fn with_equilibrium(mut self, mode: EquilibriumMode) -> Self {
        self.equilibrium_mode = mode;
        self
    }

    pub fn with_formula(mut self, formula: StrGeoFormula) -> Self {
        self.str_geo_formula = formula;
        self
    }

    pub fn with_approach(mut self, approach: GeoApproach) -> Self {
        self.str_geo_approach = approach;
        self
    }

    pub fn with_accidental_psi(mut self, psi: AccidentalPsi) -> Self {
        self.accidental_psi = psi;
        self
    }

    pub fn with_country(mut self, country: Country) -> Self {
        self.country = country;
        self
    }

    /// Enable parallel passes
    pub fn with_parallel(mut self) -> Self {
        self.parallel = true;
        self
    }
}

fn unrecognised(option: &str, value: &str) -> CombiError {
    CombiError::Configuration(format!("unrecognised {} '{}'", option, value))
}

impl FromStr for EquilibriumMode {
    type Err = CombiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equilibrium" | "equilibrium_only" => Ok(Self::EquilibriumOnly),
            "equilibrium_resistance" | "equilibrium_and_resistance" => {
                Ok(Self::EquilibriumAndResistance)
            }
            _ => Err(unrecognised("equilibrium mode", s)),
        }
    }
}

impl FromStr for StrGeoFormula {
    type Err = CombiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['.', ' '], "_").as_str() {
            "6_10" => Ok(Self::F6_10),
            "6_10ab" | "6_10a_b" | "6_10a/b" => Ok(Self::F6_10ab),
            _ => Err(unrecognised("STR/GEO formula", s)),
        }
    }
}

impl FromStr for GeoApproach {
    type Err = CombiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim_start_matches("approach").trim() {
            "1" => Ok(Self::Approach1),
            "2" => Ok(Self::Approach2),
            "3" => Ok(Self::Approach3),
            _ => Err(unrecognised("design approach", s)),
        }
    }
}

impl FromStr for AccidentalPsi {
    type Err = CombiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "frequent" | "psi1" => Ok(Self::Frequent),
            "quasi_permanent" | "psi2" => Ok(Self::QuasiPermanent),
            _ => Err(unrecognised("accidental psi", s)),
        }
    }
}

impl FromStr for Country {
    type Err = CombiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EU" => Ok(Self::EU),
            "FR" => Ok(Self::FR),
            _ => Err(unrecognised("country", s)),
        }
    }
}
