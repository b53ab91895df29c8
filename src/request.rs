//! JSON request/response types shared by the HTTP server and WASM bindings

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionCategory, ActionId, ActionKind, PsiFactors};
use crate::config::Configuration;
use crate::error::{CombiError, CombiResult};
use crate::groups::{CombinatorKind, GroupId};
use crate::ponderations::PonderationElement;
use crate::project::Project;
use crate::results::GenerationSummary;

// ========================
// Input Data Structures
// ========================

#[derive(Debug, Deserialize)]
pub struct GenerationRequest {
    pub actions: Vec<ActionData>,
    /// Levels from 0 upwards, the last one holding the root group
    pub levels: Vec<Vec<GroupData>>,
    #[serde(default)]
    pub config: ConfigData,
}

#[derive(Debug, Deserialize)]
pub struct ActionData {
    pub id: ActionId,
    pub name: String,
    /// Table A1.1 kind; sets the category and default ψ values
    #[serde(default)]
    pub kind: Option<ActionKind>,
    /// Explicit category, used when no kind is given
    #[serde(default)]
    pub category: Option<ActionCategory>,
    #[serde(default)]
    pub psi: Option<PsiFactors>,
}

#[derive(Debug, Deserialize)]
pub struct GroupData {
    /// Id used by `elements` of the level above
    pub id: usize,
    #[serde(default)]
    pub name: String,
    pub kind: CombinatorKind,
    /// Action ids at level 0, group ids of the level below otherwise
    #[serde(default)]
    pub elements: Vec<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfigData {
    #[serde(default)]
    pub equilibrium_mode: Option<String>,
    #[serde(default)]
    pub str_geo_formula: Option<String>,
    #[serde(default)]
    pub str_geo_approach: Option<String>,
    #[serde(default)]
    pub accidental_psi: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub parallel: bool,
}

impl ConfigData {
    /// Build a configuration, unspecified options keeping their default
    pub fn to_configuration(&self) -> CombiResult<Configuration> {
        let mut config = Configuration::default();
        if let Some(mode) = &self.equilibrium_mode {
            config.equilibrium_mode = mode.parse()?;
        }
        if let Some(formula) = &self.str_geo_formula {
            config.str_geo_formula = formula.parse()?;
        }
        if let Some(approach) = &self.str_geo_approach {
            config.str_geo_approach = approach.parse()?;
        }
        if let Some(psi) = &self.accidental_psi {
            config.accidental_psi = psi.parse()?;
        }
        if let Some(country) = &self.country {
            config.country = country.parse()?;
        }
        config.parallel = self.parallel;
        Ok(config)
    }
}

// ========================
// Output Data Structures
// ========================

#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsData>,
}

#[derive(Debug, Serialize)]
pub struct ResultsData {
    pub summary: GenerationSummary,
    pub buckets: Vec<BucketData>,
}

#[derive(Debug, Serialize)]
pub struct BucketData {
    pub limit_state: String,
    pub ponderations: Vec<PonderationData>,
}

#[derive(Debug, Serialize)]
pub struct PonderationData {
    pub description: String,
    pub elements: Vec<PonderationElement>,
}

// ========================
// Handling
// ========================

impl GenerationRequest {
    /// Build the project described by the request
    pub fn into_project(self) -> CombiResult<Project> {
        let mut project = Project::with_config(self.config.to_configuration()?);

        for action in self.actions {
            let mut built = match (action.kind, action.category) {
                (Some(kind), _) => Action::of_kind(&action.name, kind),
                (None, Some(category)) => Action::new(&action.name, category),
                (None, None) => Action::new(&action.name, ActionCategory::Unknown),
            };
            if let Some(psi) = action.psi {
                built.psi = psi;
            }
            project.actions.insert(action.id, built)?;
        }

        let mut previous: HashMap<usize, GroupId> = HashMap::new();
        for (level, groups) in self.levels.into_iter().enumerate() {
            if level > 0 {
                project.add_level();
            }

            let mut current = HashMap::new();
            for group in groups {
                let id = project.add_group(level, group.kind, &group.name)?;
                for child in group.elements {
                    let child = if level == 0 {
                        child
                    } else {
                        *previous
                            .get(&child)
                            .ok_or(CombiError::InvalidReference { level, child })?
                    };
                    project.add_element(level, id, child)?;
                }
                current.insert(group.id, id);
            }
            previous = current;
        }

        Ok(project)
    }
}

fn run_generation(request: GenerationRequest) -> CombiResult<ResultsData> {
    let mut project = request.into_project()?;
    let summary = project.generate()?;

    let buckets = project
        .ponderations()
        .iter()
        .map(|(state, ponderations)| BucketData {
            limit_state: state.name().to_string(),
            ponderations: ponderations
                .iter()
                .map(|ponderation| PonderationData {
                    description: ponderation.describe(&project.actions),
                    elements: ponderation.elements.clone(),
                })
                .collect(),
        })
        .collect();

    Ok(ResultsData { summary, buckets })
}

/// Generate the ponderations of a request, reporting errors in the response
pub fn handle(request: GenerationRequest) -> GenerationResponse {
    match run_generation(request) {
        Ok(results) => GenerationResponse {
            success: true,
            error: None,
            results: Some(results),
        },
        Err(e) => GenerationResponse {
            success: false,
            error: Some(e.to_string()),
            results: None,
        },
    }
}
