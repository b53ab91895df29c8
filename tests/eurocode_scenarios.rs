use std::collections::HashMap;
use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use combi_engine::combinations::SweepContext;
use combi_engine::prelude::*;
use nalgebra::DVector;

fn env_usize(name: &str, default_val: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default_val)
}

/// Single group at level 0 holding every given action
fn single_group_project(config: Configuration, kind: CombinatorKind, actions: Vec<Action>) -> Project {
    let mut project = Project::with_config(config);
    let root = project.add_group(0, kind, "Root").unwrap();
    for action in actions {
        let id = project.add_action(action);
        project.add_element(0, root, id).unwrap();
    }
    project
}

fn variables(n: usize) -> Vec<Action> {
    (0..n)
        .map(|i| Action::new(&format!("Q{}", i), ActionCategory::Variable))
        .collect()
}

/// Ponderation made of exactly one action with the given coefficient
fn alone(ponderation: &Ponderation, action: ActionId, coefficient: f64) -> bool {
    ponderation.len() == 1 && ponderation.coefficient(action) == Some(coefficient)
}

// ========================
// Reference situations
// ========================

#[test]
fn characteristic_permanent_plus_variable() {
    let mut project = single_group_project(
        Configuration::default(),
        CombinatorKind::And,
        vec![
            Action::new("G", ActionCategory::PermanentLoad),
            Action::new("Q", ActionCategory::Variable),
        ],
    );
    project.generate().unwrap();

    let characteristic = project.bucket(LimitState::ElsCar);
    assert_eq!(characteristic.len(), 1);
    let expected = Ponderation::new(vec![
        PonderationElement { action: 0, coefficient: 1.0, psi: PsiSelector::None },
        PonderationElement { action: 1, coefficient: 1.0, psi: PsiSelector::None },
    ]);
    assert!(characteristic[0].same_as(&expected));
}

#[test]
fn two_alternative_variables_under_6_10ab() {
    let config = Configuration::default()
        .with_formula(StrGeoFormula::F6_10ab)
        .with_approach(GeoApproach::Approach2);
    let mut project = single_group_project(config, CombinatorKind::Or, variables(2));
    project.generate().unwrap();

    let resistance = project.bucket(LimitState::EluStr);
    // 6.10a and 6.10b each give Q0, Q1 and the pair; the ψ0·Q0 + ψ0·Q1 pair is shared
    assert_eq!(resistance.len(), 7);
    for action in [0, 1] {
        let other = 1 - action;
        let found = resistance.iter().any(|p| alone(p, action, 1.5) && !p.includes(other));
        assert!(found, "Q{} never acts alone at 1.5", action);
    }
    for ponderation in resistance {
        for element in ponderation.elements() {
            assert_relative_eq!(element.coefficient, 1.5);
        }
    }
    // Approach 2 routes GEO through the same runs as STR
    assert_eq!(resistance, project.bucket(LimitState::EluGeo));
}

#[test]
fn groundwater_needs_french_annex() {
    let actions = || {
        vec![
            Action::self_weight(),
            Action::of_kind("Water table", ActionKind::Groundwater),
            Action::wind(),
        ]
    };

    let mut european = single_group_project(Configuration::default(), CombinatorKind::And, actions());
    assert!(matches!(european.generate(), Err(CombiError::UnknownCategory(1))));
    assert!(european.ponderations().is_empty());

    let mut french = single_group_project(
        Configuration::for_country(Country::FR),
        CombinatorKind::And,
        actions(),
    );
    french.generate().unwrap();
    let resistance = french.bucket(LimitState::EluStr);
    assert!(!resistance.is_empty());
    assert!(resistance.iter().all(|p| p.includes(1)));
    // Water follows the permanent factors of the row
    assert!(resistance.iter().any(|p| p.coefficient(1) == Some(1.35)));
    assert!(resistance.iter().any(|p| p.coefficient(1) == Some(1.0)));
}

#[test]
fn accidental_situation_uses_chosen_psi() {
    let actions = || {
        vec![
            Action::self_weight(),
            Action::new("Impact", ActionCategory::Accidental),
            Action::office(),
        ]
    };

    let mut frequent = single_group_project(Configuration::default(), CombinatorKind::And, actions());
    frequent.generate().unwrap();
    let accidental = frequent.bucket(LimitState::EluAcc);
    assert_eq!(accidental.len(), 1);
    assert_eq!(frequent.describe(LimitState::EluAcc), vec!["1.00*Self weight + 1.00*Impact + 1.00*ψ1*Office"]);

    let config = Configuration::default().with_accidental_psi(AccidentalPsi::QuasiPermanent);
    let mut quasi = single_group_project(config, CombinatorKind::And, actions());
    quasi.generate().unwrap();
    assert_eq!(quasi.describe(LimitState::EluAcc), vec!["1.00*Self weight + 1.00*Impact + 1.00*ψ2*Office"]);

    // Accidental actions vanish outside their situation
    assert!(quasi.bucket(LimitState::EluStr).is_empty());
}

#[test]
fn seismic_situation_only() {
    let mut project = single_group_project(
        Configuration::default(),
        CombinatorKind::And,
        vec![
            Action::self_weight(),
            Action::of_kind("Earthquake", ActionKind::Seismic),
            Action::office(),
        ],
    );
    project.generate().unwrap();

    assert_eq!(
        project.describe(LimitState::EluSis),
        vec!["1.00*Self weight + 1.00*Earthquake + 1.00*ψ2*Office"]
    );
    for state in LimitState::ALL {
        if state != LimitState::EluSis {
            assert!(project.bucket(state).iter().all(|p| !p.includes(1)), "earthquake in {}", state);
        }
    }
}

fn two_variable_project(config: Configuration) -> Project {
    single_group_project(
        config,
        CombinatorKind::And,
        vec![Action::self_weight(), Action::office(), Action::wind()],
    )
}

#[test]
fn fatigue_uses_frequent_then_quasi_permanent() {
    let mut project = two_variable_project(Configuration::default());
    project.generate().unwrap();

    assert_eq!(
        project.describe(LimitState::EluFat),
        vec![
            "1.00*Self weight + 1.00*ψ1*Office + 1.00*ψ2*Wind",
            "1.00*Self weight + 1.00*ψ2*Office + 1.00*ψ1*Wind",
        ]
    );
    assert_eq!(project.describe(LimitState::ElsFreq), project.describe(LimitState::EluFat));
}

#[test]
fn quasi_permanent_reduces_every_variable() {
    let mut project = two_variable_project(Configuration::default());
    project.generate().unwrap();

    // Both passes give the same ψ2 ponderation
    assert_eq!(
        project.describe(LimitState::ElsPerm),
        vec!["1.00*Self weight + 1.00*ψ2*Office + 1.00*ψ2*Wind"]
    );
}

#[test]
fn prestress_is_never_factored() {
    let config = Configuration::default()
        .with_equilibrium(EquilibriumMode::EquilibriumAndResistance)
        .with_formula(StrGeoFormula::F6_10ab)
        .with_approach(GeoApproach::Approach1);
    let mut project = single_group_project(
        config,
        CombinatorKind::And,
        vec![
            Action::self_weight(),
            Action::of_kind("Tendons", ActionKind::Prestress),
            Action::office(),
        ],
    );
    project.generate().unwrap();

    for (state, bucket) in project.ponderations().iter() {
        assert!(!bucket.is_empty(), "{} is empty", state);
        for ponderation in bucket {
            let prestress = ponderation.elements().iter().find(|e| e.action == 1).unwrap();
            assert_eq!(prestress.coefficient, 1.0, "{}", state);
            assert_eq!(prestress.psi, PsiSelector::None);
        }
    }
}

#[test]
fn equilibrium_with_resistance_uses_both_sets() {
    let config = Configuration::default().with_equilibrium(EquilibriumMode::EquilibriumAndResistance);
    let mut project = single_group_project(
        config,
        CombinatorKind::And,
        vec![Action::self_weight(), Action::office()],
    );
    project.generate().unwrap();

    let equilibrium = project.bucket(LimitState::EluEqu);
    assert_eq!(equilibrium.len(), 3);
    let mut permanent: Vec<f64> = equilibrium.iter().filter_map(|p| p.coefficient(0)).collect();
    permanent.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(permanent, vec![1.0, 1.15, 1.35]);
    assert!(equilibrium.iter().all(|p| p.coefficient(1) == Some(1.5)));
}

// ========================
// Combinator laws
// ========================

fn hierarchy_with(actions: &ActionList, kind: CombinatorKind, nested: bool) -> (GroupHierarchy, GroupId) {
    let mut hierarchy = GroupHierarchy::new();
    let group = hierarchy.add_group(0, kind, "Group").unwrap();
    for id in actions.list_actions() {
        hierarchy.add_element(actions, 0, group, id).unwrap();
    }
    if nested {
        hierarchy.add_level();
        let root = hierarchy.add_group(1, CombinatorKind::And, "Root").unwrap();
        hierarchy.add_element(actions, 1, root, group).unwrap();
    }
    (hierarchy, group)
}

fn variable_list(n: usize) -> ActionList {
    let mut actions = ActionList::new();
    for action in variables(n) {
        actions.add(action);
    }
    actions
}

#[test]
fn or_group_yields_every_subset() {
    let n = env_usize("COMBI_OR_SIZE", 5);
    let actions = variable_list(n);

    let (root_or, _) = hierarchy_with(&actions, CombinatorKind::Or, false);
    let mut ctx = SweepContext::new(None);
    assert_eq!(ctx.generate(&root_or).unwrap().len(), 1 << n);

    let (nested, group) = hierarchy_with(&actions, CombinatorKind::Or, true);
    let mut ctx = SweepContext::new(None);
    ctx.generate(&nested).unwrap();
    assert_eq!(ctx.combinations(group).len(), (1 << n) - 1);
    assert!(ctx.combinations(group).iter().all(|c| !c.is_empty()));
}

#[test]
fn large_or_group_generates_quickly() {
    let n = 16;
    let actions = variable_list(n);
    let (hierarchy, _) = hierarchy_with(&actions, CombinatorKind::Or, false);

    let start = Instant::now();
    let mut ctx = SweepContext::new(Some(0));
    let count = ctx.generate(&hierarchy).unwrap().len();
    let elapsed = start.elapsed();

    assert_eq!(count, 1 << n);
    assert!(elapsed < Duration::from_secs(20), "took {:?}", elapsed);
}

#[test]
fn xor_group_yields_each_child_once() {
    let actions = variable_list(4);
    let (hierarchy, _) = hierarchy_with(&actions, CombinatorKind::Xor, false);

    let mut ctx = SweepContext::new(Some(2));
    let combinations = ctx.generate(&hierarchy).unwrap();
    assert_eq!(combinations.len(), 4);
    assert!(combinations.iter().all(|c| c.len() == 1));
    assert_eq!(combinations.iter().filter(|c| c.has_predominant()).count(), 1);
}

#[test]
fn and_group_multiplies_children() {
    let actions = variable_list(4);
    let mut hierarchy = GroupHierarchy::new();
    let left = hierarchy.add_group(0, CombinatorKind::Or, "Left").unwrap();
    hierarchy.add_element(&actions, 0, left, 0).unwrap();
    hierarchy.add_element(&actions, 0, left, 1).unwrap();
    let right = hierarchy.add_group(0, CombinatorKind::Xor, "Right").unwrap();
    hierarchy.add_element(&actions, 0, right, 2).unwrap();
    hierarchy.add_element(&actions, 0, right, 3).unwrap();
    hierarchy.add_level();
    let root = hierarchy.add_group(1, CombinatorKind::And, "Root").unwrap();
    hierarchy.add_element(&actions, 1, root, left).unwrap();
    hierarchy.add_element(&actions, 1, root, right).unwrap();

    let mut ctx = SweepContext::new(None);
    let combinations = ctx.generate(&hierarchy).unwrap();
    assert_eq!(combinations.len(), 3 * 2);
    assert!(combinations.iter().all(|c| c.actions().any(|a| a == 2 || a == 3)));
}

// ========================
// Global properties
// ========================

fn office_building(config: Configuration) -> Project {
    let mut project = Project::with_config(config);
    let g = project.add_action(Action::self_weight());
    let office = project.add_action(Action::office());
    let snow = project.add_action(Action::snow());
    let wind_x = project.add_action(Action::of_kind("Wind +X", ActionKind::Wind));
    let wind_y = project.add_action(Action::of_kind("Wind +Y", ActionKind::Wind));

    let permanent = project.add_group(0, CombinatorKind::And, "Permanent").unwrap();
    project.add_element(0, permanent, g).unwrap();
    let imposed = project.add_group(0, CombinatorKind::Or, "Imposed").unwrap();
    project.add_element(0, imposed, office).unwrap();
    project.add_element(0, imposed, snow).unwrap();
    let wind = project.add_group(0, CombinatorKind::Xor, "Wind").unwrap();
    project.add_element(0, wind, wind_x).unwrap();
    project.add_element(0, wind, wind_y).unwrap();

    project.add_level();
    let variable = project.add_group(1, CombinatorKind::Or, "Variable").unwrap();
    project.add_element(1, variable, imposed).unwrap();
    project.add_element(1, variable, wind).unwrap();
    let fixed = project.add_group(1, CombinatorKind::And, "Fixed").unwrap();
    project.add_element(1, fixed, permanent).unwrap();

    project.add_level();
    let root = project.add_group(2, CombinatorKind::And, "Building").unwrap();
    project.add_element(2, root, fixed).unwrap();
    project.add_element(2, root, variable).unwrap();
    project
}

#[test]
fn accompanying_actions_need_a_predominant_one() {
    let mut project = office_building(Configuration::default());
    project.generate().unwrap();

    // Characteristic and 6.10 runs: predominant unreduced, accompanying ψ0
    for state in [LimitState::ElsCar, LimitState::EluStr] {
        for ponderation in project.bucket(state) {
            let variables: Vec<_> = ponderation
                .elements()
                .iter()
                .filter(|e| project.actions.category_of(e.action) == Some(ActionCategory::Variable))
                .collect();
            if variables.is_empty() {
                continue;
            }
            let predominant = variables.iter().filter(|e| e.psi == PsiSelector::None).count();
            assert_eq!(predominant, 1, "{}: {}", state, ponderation.describe(&project.actions));
        }
    }
}

#[test]
fn buckets_hold_no_duplicates() {
    let mut project = office_building(Configuration::default().with_formula(StrGeoFormula::F6_10ab));
    let first = project.generate().unwrap();
    let snapshot = project.ponderations().clone();

    for (state, bucket) in snapshot.iter() {
        for (i, a) in bucket.iter().enumerate() {
            for b in &bucket[i + 1..] {
                assert!(!a.same_as(b), "duplicate in {}", state);
            }
        }
    }

    let second = project.generate().unwrap();
    assert_eq!(first, second);
    assert_eq!(project.ponderations(), &snapshot);
}

#[test]
fn parallel_sweep_matches_serial() {
    let config = Configuration::default()
        .with_formula(StrGeoFormula::F6_10ab)
        .with_approach(GeoApproach::Approach1)
        .with_equilibrium(EquilibriumMode::EquilibriumAndResistance);

    let mut serial = office_building(config.clone());
    let mut parallel = office_building(config.with_parallel());
    serial.generate().unwrap();
    parallel.generate().unwrap();

    assert!(!serial.ponderations().is_empty());
    assert_eq!(serial.ponderations(), parallel.ponderations());
}

#[test]
fn failed_generation_is_atomic() {
    let mut project = office_building(Configuration::default());
    project.generate().unwrap();
    let before = project.ponderations().clone();

    // A second group on the top level leaves no single root
    project.add_group(2, CombinatorKind::Or, "Stray").unwrap();
    assert!(matches!(project.generate(), Err(CombiError::MultipleRootGroups(2))));
    assert_eq!(project.ponderations(), &before);
}

#[test]
fn superposed_results_follow_factors() {
    let mut project = single_group_project(
        Configuration::default(),
        CombinatorKind::And,
        vec![Action::self_weight(), Action::wind()],
    );
    project.generate().unwrap();

    let mut results = HashMap::new();
    results.insert(0, DVector::from_vec(vec![1.0, -2.0]));
    results.insert(1, DVector::from_vec(vec![0.5, 4.0]));

    let frequent = project.bucket(LimitState::ElsFreq);
    assert_eq!(frequent.len(), 1);
    let total = frequent[0].superpose(&project.actions, &results).unwrap();
    // 1.0 * G + 1.0 * ψ1(wind = 0.2) * W
    assert_relative_eq!(total[0], 1.1, epsilon = 1e-12);
    assert_relative_eq!(total[1], -1.2, epsilon = 1e-12);
}
