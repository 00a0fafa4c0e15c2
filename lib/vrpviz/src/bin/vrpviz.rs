use std::io::Write;
use std::path::PathBuf;
use anyhow::{Context, Result};
use tracing::*;

use instances::dataset::{Dataset, IdxNameMap, InstanceDir};
use vrpviz::*;

mod common;
use common::*;

use structopt::StructOpt;

/// Plot a CVRP instance and the routes of one of its solutions.
#[derive(Debug, StructOpt)]
struct ClArgs {
    /// Directory of `NAME.vrp` / `NAME.sol` files, relative to $DATA_ROOT when that is set
    #[structopt(parse(from_os_str))]
    folder: PathBuf,
    /// Instance name, or its index in the folder
    #[structopt(required_unless="list")]
    instance: Option<String>,
    /// Solution name, if it differs from the instance name
    #[structopt(long, short="s")]
    solution: Option<String>,
    /// Draw only `Route #N:`
    #[structopt(long, short="r")]
    route: Option<usize>,
    /// Draw the nodes only
    #[structopt(long)]
    no_routes: bool,
    /// Image file to write; `.svg` gives a vector image, other extensions a bitmap [default: NAME.svg]
    #[structopt(long, short="i", parse(from_os_str))]
    image: Option<PathBuf>,
    #[structopt(long, default_value="1500", validator=bounded(100u32, 20_000u32))]
    width: u32,
    #[structopt(long, default_value="1000", validator=bounded(100u32, 20_000u32))]
    height: u32,
    /// List the instances in the folder and exit
    #[structopt(long)]
    list: bool,
    /// Also log every event as JSON to this file
    #[structopt(long, parse(from_os_str))]
    log: Option<PathBuf>,
    #[structopt(flatten)]
    report: SummaryOptions,
}


fn list_instances(dir: &InstanceDir) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for idx in 0..dir.len() {
        let name = dir.index_to_name(idx)?;
        let sol = if dir.has_solution(&name) { "solution" } else { "-" };
        writeln!(out, "{}\t{}\t{}", idx, name, sol)?;
    }
    Ok(())
}


fn main() -> anyhow::Result<()> {
    let args : ClArgs = StructOpt::from_args();
    let _g = init_logging(args.log.clone())?;
    debug!(?args);

    let dir = InstanceDir::new(&args.folder)?;
    if args.list {
        return list_instances(&dir);
    }

    let key = args.instance.as_deref().context("no instance given")?;
    let idx = dir.lookup(key).with_context(|| format!("no instance {:?} in {:?}", key, dir.dir()))?;
    let name = dir.index_to_name(idx)?.into_owned();
    let problem = dir.load_instance(idx)?;
    info!(%name, nodes = problem.coords.len(), "loaded instance");

    let mut figure = Figure::new().with_title(problem.header.name().unwrap_or(&name));
    let coords = draw_nodes(&problem, &mut figure)?;

    let solution = if !args.no_routes {
        let sol_name = args.solution.as_deref().unwrap_or(&name);
        let sol_path = dir.solution_path(sol_name);
        let solution = match args.route {
            Some(n) => plot_route(&sol_path, &coords, &mut figure, n)?,
            None => plot_routes(&sol_path, &coords, &mut figure)?,
        };
        Some(solution)
    } else {
        None
    };

    let image = args.image.clone().unwrap_or_else(|| PathBuf::from(format!("{}.svg", name)));
    figure.render(&image, (args.width, args.height))?;
    info!(?image, "figure written");

    if args.report.summary {
        match solution {
            Some(solution) => {
                let summary = summarize(&name, &problem, &solution)?;
                args.report.write_summary(&summary)?;
            }
            None => warn!("--summary needs routes, nothing to report"),
        }
    }
    Ok(())
}
