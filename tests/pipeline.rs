use std::fs;

use facloc::{Field, FieldError, RenderOptions, SingleFacilityModel, TwoFacilityModel, io, model};

const SITES_CSV: &str = "0,6,6,0,3\n0,0,4,4,2\n3,2,2,3,1\n";

fn write_sites(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("sites.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn csv_to_field_to_every_output() {
    let dir = tempfile::tempdir().unwrap();
    let sites = io::csv::read_sites(&write_sites(&dir, SITES_CSV)).unwrap();
    assert_eq!(sites.len(), 5);

    let field = Field::evaluate(&sites).unwrap();
    assert_eq!(field.bounds(), (6, 4));
    assert_eq!(field.len(), 7 * 5 - sites.len());

    let csv_path = dir.path().join("field.csv");
    io::csv::write_field_csv(&field, &csv_path).unwrap();
    assert_eq!(fs::read_to_string(&csv_path).unwrap().lines().count(), field.len() + 1);

    let json_path = dir.path().join("field.json");
    io::json::write_field_json(&field, &json_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["cells"].as_array().unwrap().len(), field.len());

    let best = field.best_cells()[0];
    let facility = [(best.x as i64, best.y as i64)];

    let svg_path = dir.path().join("field.svg");
    io::svg::write_heatmap(&svg_path, &field, &sites, &facility, &RenderOptions::default()).unwrap();
    let svg = fs::read_to_string(&svg_path).unwrap();
    assert_eq!(svg.matches(r#"<circle class="cell""#).count(), field.len());
    assert_eq!(svg.matches(r#"<circle class="facility""#).count(), 1);

    let tex_path = dir.path().join("sites.tex");
    let size = io::tikz::DiagramSize::covering(&sites);
    io::tikz::write_tikz(&tex_path, &sites, &facility, size).unwrap();
    let tex = fs::read_to_string(&tex_path).unwrap();
    assert_eq!(tex.matches("\\draw[gray]").count(), field.len());
    assert_eq!(tex.matches(" node {").count(), sites.len());
}

#[test]
fn milp_and_exhaustive_agree() {
    let sites = io::csv::read_sites_str(SITES_CSV).unwrap();

    let single = SingleFacilityModel::build(&sites).unwrap().solve().unwrap();
    let single_exhaustive = model::best_single_location(&sites).unwrap();
    assert_eq!(single.objective(), single_exhaustive.objective());
    assert_eq!(single.objective(), Field::evaluate(&sites).unwrap().best_score() as f64);

    let pair = TwoFacilityModel::build_with_big_m(&sites, 1_000.0).unwrap().solve().unwrap();
    let pair_exhaustive = model::best_pair_locations(&sites).unwrap();
    assert_eq!(pair.objective(), pair_exhaustive.objective());
    assert_eq!(pair.cost(&sites) as f64, pair.objective());
    assert!(pair.objective() < single.objective());

    let default_m = TwoFacilityModel::build(&sites).unwrap().solve().unwrap();
    assert_eq!(default_m.objective(), pair_exhaustive.objective());
    assert!(default_m.is_exact(&sites));
}

#[test]
fn lp_file_round_trips_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let sites = io::csv::read_sites_str(SITES_CSV).unwrap();
    let model = TwoFacilityModel::build(&sites).unwrap();

    let path = dir.path().join("two.lp");
    model::write_lp_file(model.lp(), &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    for section in ["Minimize", "Subject To", "Bounds", "Generals", "Binaries", "End"] {
        assert!(text.lines().any(|line| line == section), "missing section {section}");
    }
    for k in 0..sites.len() {
        assert!(text.contains(&format!("Site_{k}_Nearest_F1:")));
        assert!(text.contains(&format!("Site_{k}_Nearest_F2:")));
    }
}

#[test]
fn degenerate_fields_surface_as_errors() {
    let sites = io::csv::read_sites_str("0,2\n0,0\n1,1\n").unwrap();
    assert_eq!(
        Field::evaluate(&sites).unwrap_err(),
        FieldError::DegenerateRange { cells: 1, score: Some(2) },
    );

    let zeroed = Field::evaluate_or_zero(&sites).unwrap();
    assert_eq!(zeroed.cells()[0].normalized_score, 0.0);
}
