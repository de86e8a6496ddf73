//! Load evaluation requests from a projects CSV
//!
//! Expected columns: `ProjectID, InitialCost, Cashflows, TargetRate, Years`.
//! `Cashflows` is a quoted comma-separated list, e.g. `"300,300,300"`.

use super::parse_cashflows;
use crate::error::Result;
use crate::evaluation::EvaluationRequest;
use csv::Reader;
use std::io::Read;
use std::path::Path;

/// Raw CSV row matching the projects file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ProjectID")]
    project_id: String,
    #[serde(rename = "InitialCost")]
    initial_cost: f64,
    #[serde(rename = "Cashflows")]
    cashflows: String,
    #[serde(rename = "TargetRate")]
    target_rate: f64,
    #[serde(rename = "Years", default)]
    years: Option<u32>,
}

/// One named project read from the CSV
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub project_id: String,
    pub request: EvaluationRequest,
}

impl CsvRow {
    fn into_record(self) -> Result<ProjectRecord> {
        let cashflows = parse_cashflows(&self.cashflows)?;
        Ok(ProjectRecord {
            project_id: self.project_id,
            request: EvaluationRequest {
                initial_cost: self.initial_cost,
                cashflows,
                target_rate: self.target_rate,
                holding_period_years: self.years,
            },
        })
    }
}

/// Load projects from a CSV file
pub fn load_projects(path: &Path) -> Result<Vec<ProjectRecord>> {
    let file = std::fs::File::open(path)?;
    load_projects_from_reader(file)
}

/// Load projects from any reader producing CSV
pub fn load_projects_from_reader<R: Read>(reader: R) -> Result<Vec<ProjectRecord>> {
    let mut rdr = Reader::from_reader(reader);
    let mut projects = Vec::new();

    for row in rdr.deserialize() {
        let row: CsvRow = row?;
        projects.push(row.into_record()?);
    }

    log::debug!("loaded {} projects", projects.len());
    Ok(projects)
}
