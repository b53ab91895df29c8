//! Combi Engine Example - Office Building

use combi_engine::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Combi Engine Example: Office Building ===\n");

    let config = Configuration::default()
        .with_formula(StrGeoFormula::F6_10ab)
        .with_approach(GeoApproach::Approach2);
    let mut project = Project::with_config(config);

    // Actions
    let self_weight = project.add_action(Action::self_weight());
    let finishes = project.add_action(Action::of_kind("Finishes", ActionKind::PermanentLoad));
    let office = project.add_action(Action::office());
    let snow = project.add_action(Action::snow());
    let wind_x = project.add_action(Action::of_kind("Wind +X", ActionKind::Wind));
    let wind_y = project.add_action(Action::of_kind("Wind +Y", ActionKind::Wind));

    // Hierarchy
    //
    //                 Building (AND)
    //                /              \
    //       Permanent (AND)     Variable (OR)
    //            |              /     |      \
    //       Dead (AND)   Imposed  Climatic  Wind (XOR)
    //       /     \         |        |       /    \
    //      G   Finishes   Office   Snow   Wind+X  Wind+Y
    //
    let dead = project.add_group(0, CombinatorKind::And, "Dead")?;
    project.add_element(0, dead, self_weight)?;
    project.add_element(0, dead, finishes)?;

    let imposed = project.add_group(0, CombinatorKind::Or, "Imposed")?;
    project.add_element(0, imposed, office)?;

    let climatic = project.add_group(0, CombinatorKind::Or, "Climatic")?;
    project.add_element(0, climatic, snow)?;

    let wind = project.add_group(0, CombinatorKind::Xor, "Wind")?;
    project.add_element(0, wind, wind_x)?;
    project.add_element(0, wind, wind_y)?;

    project.add_level();
    let permanent = project.add_group(1, CombinatorKind::And, "Permanent")?;
    project.add_element(1, permanent, dead)?;

    let variable = project.add_group(1, CombinatorKind::Or, "Variable")?;
    project.add_element(1, variable, imposed)?;
    project.add_element(1, variable, climatic)?;
    project.add_element(1, variable, wind)?;

    project.add_level();
    let building = project.add_group(2, CombinatorKind::And, "Building")?;
    project.add_element(2, building, permanent)?;
    project.add_element(2, building, variable)?;

    // Generate
    println!("Generating ponderations...\n");
    let summary = project.generate()?;

    for (state, ponderations) in project.ponderations().iter() {
        println!("=== {} ({} ponderations) ===", state, ponderations.len());
        for ponderation in ponderations.iter().take(8) {
            println!("  {}", ponderation.describe(&project.actions));
        }
        if ponderations.len() > 8 {
            println!("  ... {} more", ponderations.len() - 8);
        }
        println!();
    }

    println!("Summary:");
    println!("  Predominance passes: {}", summary.passes);
    println!("  Total ponderations: {}", summary.total);

    println!("\n=== Generation Complete ===");
    Ok(())
}
