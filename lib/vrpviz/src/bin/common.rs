use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use anyhow::{Context, Result};
use itertools::Itertools;
use structopt::StructOpt;
use tracing::*;
use vrpviz::{RouteSummary, SolutionSummary};

#[derive(Clone, Debug, StructOpt)]
pub struct SummaryOptions {
    /// Report route lengths and loads as JSON
    #[structopt(long)]
    pub summary: bool,
    /// `json-summ` gives the totals only, `json` adds a record per route
    #[structopt(long="format", short="f", default_value="json-summ", possible_values=&SummaryDetail::NAMES)]
    pub detail: SummaryDetail,
    /// Where the summary goes (default: stdout)
    #[structopt(long="output", short="o", parse(from_os_str))]
    pub file: Option<PathBuf>,
}

/// Accepts values in `min..=max`.
pub fn bounded<T>(min: T, max: T) -> impl Fn(String) -> Result<(), String>
    where
        T: FromStr + PartialOrd + Display + Copy,
        T::Err: Display
{
    move |val| {
        let x: T = val.parse().map_err(|e: T::Err| e.to_string())?;
        if x < min || x > max {
            return Err(format!("must be between {} and {}", min, max));
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SummaryDetail {
    Routes,
    Totals,
}

impl SummaryDetail {
    pub const NAMES: [&'static str; 2] = ["json", "json-summ"];

    pub fn name(self) -> &'static str {
        match self {
            SummaryDetail::Routes => Self::NAMES[0],
            SummaryDetail::Totals => Self::NAMES[1],
        }
    }
}

impl FromStr for SummaryDetail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [SummaryDetail::Routes, SummaryDetail::Totals].iter()
            .copied()
            .find(|d| d.name() == s)
            .ok_or_else(|| format!("unknown summary format: {}", s))
    }
}


fn nullable<T: Into<json::JsonValue>>(val: Option<T>) -> json::JsonValue {
    val.map_or(json::JsonValue::Null, Into::into)
}

fn route_record(r: &RouteSummary) -> json::JsonValue {
    json::object! {
        number: nullable(r.number),
        customers: r.customers,
        length: r.length,
        load: r.load,
    }
}

pub fn summary_json(s: &SolutionSummary, detail: SummaryDetail) -> json::JsonValue {
    let mut root = json::object! {
        instance: s.instance.as_str(),
        capacity: nullable(s.capacity),
        reported_cost: nullable(s.reported_cost),
        num_routes: s.routes.len(),
        total_length: s.total_length(),
        total_load: s.total_load(),
        max_load: s.max_load(),
    };
    if detail == SummaryDetail::Routes {
        root["routes"] = s.routes.iter().map(route_record).collect_vec().into();
    }
    root
}

impl SummaryOptions {
    pub fn write_summary(&self, summary: &SolutionSummary) -> Result<()> {
        let doc = summary_json(summary, self.detail);
        match self.file.as_ref() {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {:?}", path))?;
                let mut out = BufWriter::new(file);
                doc.write_pretty(&mut out, 2)?;
                writeln!(out)?;
                out.flush()?;
                info!(?path, detail = self.detail.name(), "summary written");
            }
            None => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                doc.write_pretty(&mut out, 2)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}
