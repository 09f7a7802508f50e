use span_core::analysis::{
    filter_results, AnalysisFilter, AnalysisFilterGroup, CableCondition, SagTensionSolver,
};
use span_core::cable::{Cable, CableComponent};
use span_core::catenary::Catenary3d;
use span_core::report::write_results_csv;
use span_core::span::{CableConstraint, ConstraintLimitType};
use span_core::types::{DisplayForce, DisplayLength, UnitSystem, Vector3d};
use span_core::weather::WeatherLoadCase;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 795 kcmil ACSR "Drake"-class cable
    let cable = Cable {
        name: "795 ACSR".into(),
        construction: "ACSR 26/7".into(),
        area_electrical: 0.005516,
        area_physical: 0.7264 / 144.0,
        diameter: 1.108 / 12.0,
        strength_rated: 31500.0,
        temperature_components: 70.0,
        weight_unit: 1.094,
        component_core: CableComponent {
            coefficient_expansion_thermal: 6.4e-6,
            modulus_tension_elastic: 27000.0,
            modulus_compression_elastic: 27000.0,
            coefficients_loadstrain: [-69.3, 28000.0, -200.0, 0.0, 0.0],
            coefficients_creep: [-50.0, 27500.0, -180.0, 0.0, 0.0],
            load_limit_loadstrain: 15000.0,
            load_limit_creep: 14000.0,
        },
        component_shell: CableComponent {
            coefficient_expansion_thermal: 1.28e-5,
            modulus_tension_elastic: 64000.0,
            modulus_compression_elastic: 1000.0,
            coefficients_loadstrain: [-1213.0, 44308.1, -14004.4, -37618.0, 30676.0],
            coefficients_creep: [-544.8, 21426.8, -18842.2, 5495.0, 0.0],
            load_limit_loadstrain: 18500.0,
            load_limit_creep: 16000.0,
        },
    };

    let weathercases = vec![
        WeatherLoadCase {
            description: "Everyday".into(),
            thickness_ice: 0.0,
            density_ice: 57.0,
            pressure_wind: 0.0,
            temperature_cable: 60.0,
        },
        WeatherLoadCase {
            description: "Heavy Ice".into(),
            thickness_ice: 0.5 / 12.0,
            density_ice: 57.0,
            pressure_wind: 8.0,
            temperature_cable: 0.0,
        },
        WeatherLoadCase {
            description: "Hot Summer".into(),
            thickness_ice: 0.0,
            density_ice: 57.0,
            pressure_wind: 0.0,
            temperature_cable: 167.0,
        },
    ];

    // Design to 25% of rated strength at everyday conditions
    let constraint = CableConstraint {
        limit_type: ConstraintLimitType::HorizontalTension,
        limit: 0.25 * cable.strength_rated,
        weathercase: "Everyday".into(),
        condition: CableCondition::Initial,
    };

    let spacing = Vector3d::new(800.0, 0.0, 50.0);
    let solver = SagTensionSolver::new(&cable, &constraint, &weathercases[0], spacing);

    let group = AnalysisFilterGroup {
        name: "Report".into(),
        filters: vec![
            AnalysisFilter {
                condition: CableCondition::Initial,
                weathercase: "Everyday".into(),
            },
            AnalysisFilter {
                condition: CableCondition::Creep,
                weathercase: "Everyday".into(),
            },
            AnalysisFilter {
                condition: CableCondition::Initial,
                weathercase: "Heavy Ice".into(),
            },
            AnalysisFilter {
                condition: CableCondition::Load,
                weathercase: "Hot Summer".into(),
            },
        ],
    };

    println!(
        "Span: {} horizontal, {} rise, cable {}",
        DisplayLength(spacing.x, UnitSystem::Imperial),
        DisplayLength(spacing.z, UnitSystem::Imperial),
        cable.name
    );
    println!(
        "Constraint: H = {} at {} ({})\n",
        DisplayForce(constraint.limit, UnitSystem::Imperial),
        constraint.weathercase,
        constraint.condition.as_str()
    );

    let index = solver.solve_filter_group(&weathercases, &group);
    let rows = filter_results(&index, &group);

    println!(
        "{:<12} {:<8} {:>10} {:>10} {:>8} {:>10}",
        "Weathercase", "Cond", "H (lbs)", "Sag (ft)", "Swing", "Len (ft)"
    );
    for row in &rows {
        let result = row.result;
        let catenary = Catenary3d::new(result.tension_horizontal, result.weight_unit, spacing);
        println!(
            "{:<12} {:<8} {:>10.1} {:>10.2} {:>7.1}\u{00b0} {:>10.2}",
            result.weathercase,
            result.condition.as_str(),
            result.tension_horizontal,
            catenary.sag(),
            catenary.swing_angle(),
            catenary.length()
        );
    }

    println!("\nCSV export:");
    let mut csv = Vec::new();
    write_results_csv(&mut csv, spacing, &rows)?;
    print!("{}", String::from_utf8_lossy(&csv));

    Ok(())
}
