//! remnant - CLI for slab stock and remnant tracking over a JSON store file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use remnant_tracker::config::{DEFAULT_STORE_FILE, DEFAULT_TENANT};
use remnant_tracker::{
    validate_draft, validate_slabs, CutDetails, DraftState, Inventory, JsonFileStore, NewSlab,
    Operator, Point, Polygon, SlabRecord, StaticIdentity,
};

/// Track slab stock and cut remnants for a stone fabrication shop.
#[derive(Parser, Debug)]
#[command(name = "remnant")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON store file
    #[arg(short, long, global = true, default_value = DEFAULT_STORE_FILE)]
    store: PathBuf,

    /// Company (tenant) id
    #[arg(short, long, global = true, default_value = DEFAULT_TENANT)]
    tenant: String,

    /// Operator id stamped on changes
    #[arg(long, global = true, default_value = "cli")]
    operator_id: String,

    /// Operator name stamped on changes
    #[arg(long, global = true, default_value = "CLI")]
    operator_name: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enter a new slab into stock
    Add {
        #[arg(long)]
        material: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        thickness: String,
        /// Width in cm
        #[arg(long)]
        width: f64,
        /// Height in cm
        #[arg(long)]
        height: f64,
        #[arg(long, default_value = "1")]
        quantity: i64,
        #[arg(long)]
        supplier: Option<String>,
    },

    /// List the tenant's slabs
    List {
        /// Also check stored values against each outline
        #[arg(long)]
        check: bool,
    },

    /// Show one slab
    Show {
        id: String,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a cut by giving the leftover outline
    Cut {
        id: String,
        #[arg(long)]
        client: String,
        #[arg(long)]
        project: String,
        /// Leftover vertex as X,Y in cm (repeat, in order)
        #[arg(long = "point", value_parser = parse_point)]
        points: Vec<Point>,
        /// Set edge I to LEN cm after placing points (repeat)
        #[arg(long = "resize", value_parser = parse_resize)]
        resizes: Vec<(usize, f64)>,
        #[arg(long, default_value = "")]
        observations: String,
        /// Print the draft checks and area without committing
        #[arg(long)]
        dry_run: bool,
    },

    /// Add whole units to stock
    Restock {
        id: String,
        quantity: i64,
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Take whole units out of stock
    Consume {
        id: String,
        quantity: i64,
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Delete a slab record
    Remove { id: String },
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("bad X in '{}'", s))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("bad Y in '{}'", s))?;
    let point = Point::new(x, y);
    if !point.is_finite() {
        return Err(format!("coordinates must be finite numbers, got '{}'", s));
    }
    Ok(point)
}

fn parse_resize(s: &str) -> std::result::Result<(usize, f64), String> {
    let (index, length) = s
        .split_once(':')
        .ok_or_else(|| format!("expected EDGE:LENGTH, got '{}'", s))?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("bad edge index in '{}'", s))?;
    let length: f64 = length
        .trim()
        .parse()
        .map_err(|_| format!("bad length in '{}'", s))?;
    Ok((index, length))
}

fn print_summary(slab: &SlabRecord) {
    println!(
        "#{:<4} {:<36} {:<28} {:>6.1} x {:<6.1} {:>7.4} m²  qty {:<3} {}",
        slab.serial,
        slab.id,
        slab.material,
        slab.current_width,
        slab.current_height,
        slab.available_area,
        slab.quantity,
        slab.status
    );
}

fn print_detail(slab: &SlabRecord) {
    print_summary(slab);
    println!(
        "  {} / {} / {}",
        slab.category,
        slab.thickness,
        slab.supplier.as_deref().unwrap_or("-")
    );
    println!(
        "  original {} x {} cm ({:.4} m²), last change by {} at {}",
        slab.original_width,
        slab.original_height,
        slab.total_area,
        slab.last_operator_name,
        slab.last_updated_at.format("%Y-%m-%d %H:%M")
    );
    let outline: Vec<String> = slab.polygon().points().iter().map(|p| p.to_string()).collect();
    println!("  outline {}", outline.join(" "));
    for cut in &slab.history {
        println!(
            "  cut {} {} / {}: {:.4} m², leftover {} x {} ({:.4} m²) by {}",
            cut.date.format("%Y-%m-%d"),
            cut.client_name,
            cut.project,
            cut.area_used,
            cut.leftover_width,
            cut.leftover_height,
            cut.leftover_area(),
            cut.operator_name
        );
    }
    for movement in &slab.movements {
        println!(
            "  {} {} {} unit(s) by {} {}",
            movement.date.format("%Y-%m-%d"),
            movement.kind,
            movement.quantity,
            movement.operator_name,
            movement.note
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let store = JsonFileStore::open(&args.store)
        .with_context(|| format!("Failed to open {}", args.store.display()))?;
    debug!("Using store {}", store.path().display());
    let operator = Operator::new(&args.operator_id, &args.operator_name);
    let mut inventory = Inventory::new(store, StaticIdentity::signed_in(operator));
    let tenant = args.tenant.as_str();

    match args.command {
        Command::Add {
            material,
            category,
            thickness,
            width,
            height,
            quantity,
            supplier,
        } => {
            let slab = inventory.register_slab(NewSlab {
                company_id: tenant.to_string(),
                material,
                category,
                thickness,
                supplier,
                width,
                height,
                quantity,
            })?;
            print_summary(&slab);
        }

        Command::List { check } => {
            let slabs = inventory.list(tenant)?;
            for slab in &slabs {
                print_summary(slab);
            }
            if check {
                let result = validate_slabs(&slabs);
                for warning in &result.warnings {
                    warn!("{}", warning);
                }
                for err in &result.errors {
                    error!("{}", err);
                }
                if !result.passed {
                    anyhow::bail!("Store check failed");
                }
            }
        }

        Command::Show { id, json } => {
            let slab = inventory.slab(tenant, &id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&slab)?);
            } else {
                print_detail(&slab);
            }
        }

        Command::Cut {
            id,
            client,
            project,
            points,
            resizes,
            observations,
            dry_run,
        } => {
            let base = inventory.begin_cut(tenant, &id)?;
            let (width, height) = base.bounds();
            let mut draft = points
                .into_iter()
                .fold(DraftState::new(Polygon::default(), width, height), |d, p| {
                    d.add_vertex(p)
                });
            for (edge, length) in resizes {
                draft = draft
                    .resize_edge(edge, length)
                    .with_context(|| format!("Failed to resize edge {}", edge))?;
            }

            if dry_run {
                let slab = inventory.slab(tenant, &id)?;
                let result = validate_draft(&draft, &slab);
                for warning in &result.warnings {
                    warn!("{}", warning);
                }
                for err in &result.errors {
                    error!("{}", err);
                }
                info!(
                    "Draft area {:.4} m² of {:.4} m² available",
                    draft.compute_area(),
                    slab.available_area
                );
                return Ok(());
            }

            let cut = inventory.record_cut(
                tenant,
                &id,
                &draft,
                CutDetails {
                    client_name: client,
                    project,
                    observations,
                },
            )?;
            println!(
                "Cut {}: {:.4} m² used, leftover {} x {} cm",
                cut.id, cut.area_used, cut.leftover_width, cut.leftover_height
            );
        }

        Command::Restock { id, quantity, note } => {
            let slab = inventory.restock(tenant, &id, quantity, &note)?;
            print_summary(&slab);
        }

        Command::Consume { id, quantity, note } => {
            let slab = inventory.consume(tenant, &id, quantity, &note)?;
            print_summary(&slab);
        }

        Command::Remove { id } => {
            if inventory.remove(tenant, &id)? {
                info!("Removed {}", id);
            } else {
                anyhow::bail!("No slab {} for tenant {}", id, tenant);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("12.5, 40").unwrap(), Point::new(12.5, 40.0));
        assert!(parse_point("12.5").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("nan,0").is_err());
        assert!(parse_point("10,inf").is_err());
    }

    #[test]
    fn test_parse_resize() {
        assert_eq!(parse_resize("2:120").unwrap(), (2, 120.0));
        assert!(parse_resize("-1:10").is_err());
        assert!(parse_resize("3").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_cut_command() {
        let args = Args::try_parse_from([
            "remnant", "--tenant", "acme", "cut", "abc", "--client", "Joao", "--project",
            "Bancada", "--point", "0,0", "--point", "100,0", "--point", "0,100", "--resize",
            "0:80",
        ])
        .unwrap();
        assert_eq!(args.tenant, "acme");
        match args.command {
            Command::Cut {
                points, resizes, ..
            } => {
                assert_eq!(points.len(), 3);
                assert_eq!(resizes, vec![(0, 80.0)]);
            }
            other => panic!("Expected cut command, got {:?}", other),
        }
    }
}
