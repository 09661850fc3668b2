use anyhow::Result;
use facloc::{FacilityPlan, SingleFacilityModel, Site, TwoFacilityModel, io, model::{self, LinearProgram}};

use crate::cli::{Cli, LocateArgs, Method};

pub fn run(cli: &Cli, args: &LocateArgs) -> Result<()> {
    if cli.verbose > 0 { eprintln!("[locate] loading sites from {}", args.data.display()); }
    let sites = io::csv::read_sites(&args.data)?;

    if let Some(lp_path) = &args.lp {
        super::ensure_writable(lp_path, args.force)?;
        let lp = formulate(&sites, args)?;
        if cli.verbose > 0 {
            eprintln!("[locate] writing {} ({} variables, {} constraints) to {}",
                lp.name(), lp.num_variables(), lp.num_constraints(), lp_path.display());
        }
        model::write_lp_file(&lp, lp_path)?;
    }

    if cli.verbose > 0 { eprintln!("[locate] solving for {} facilities with {:?}", args.facilities, args.method); }
    let plan = match (args.method, args.facilities) {
        (Method::Milp, 1) => SingleFacilityModel::build(&sites)?.solve()?,
        (Method::Milp, _) => TwoFacilityModel::build_with_big_m(&sites, args.big_m)?.solve()?,
        (Method::Exhaustive, 1) => model::best_single_location(&sites)?,
        (Method::Exhaustive, _) => model::best_pair_locations(&sites)?,
    };

    println!("{plan}");
    warn_if_inexact(&sites, &plan);
    if cli.verbose > 1 { print_assignment(&sites, &plan); }

    if let Some(out_path) = &args.output {
        super::ensure_writable(out_path, args.force)?;
        if cli.verbose > 0 { eprintln!("[locate] writing plan to {}", out_path.display()); }
        io::json::write_plan_json(&plan, out_path)?;
    }

    Ok(())
}

fn formulate(sites: &[Site], args: &LocateArgs) -> Result<LinearProgram> {
    Ok(match args.facilities {
        1 => SingleFacilityModel::build(sites)?.lp().clone(),
        _ => TwoFacilityModel::build_with_big_m(sites, args.big_m)?.lp().clone(),
    })
}

/// Flag facilities on site cells and objectives that differ from the real cost.
fn warn_if_inexact(sites: &[Site], plan: &FacilityPlan) {
    let on_sites = plan.facilities_on_sites(sites);
    if !on_sites.is_empty() {
        eprintln!("[locate] warning: facility placed on site cell(s) {on_sites:?}");
    }
    if !plan.is_exact(sites) {
        eprintln!("[locate] warning: objective {} differs from the assignment cost {}", plan.objective(), plan.cost(sites));
    }
}

fn print_assignment(sites: &[Site], plan: &FacilityPlan) {
    for site in sites {
        if let Some(f) = model::nearest_facility(site, plan.facilities()) {
            let facility = plan.facilities()[f];
            eprintln!("[locate] site ({}, {}) weight {} -> facility {:?} at distance {}",
                site.x(), site.y(), site.weight(), facility, model::site_distance(site, facility));
        }
    }
}
