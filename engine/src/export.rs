//! Hand-off of the finished problem model to a solver front end.
//!
//! The interview does not know the solver's input format. It produces an
//! [`ExportSnapshot`], a flat serializable copy of the model, and gives it to
//! whatever [`ExportTarget`] the session was built with.

use std::fs;
use std::io::{BufWriter, Write};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use mosis_types::{
    BoundaryConditions, Domain, Parameter, Pde, ProblemModel, QualitativeProperties, SolveConfig,
    Unknown,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub problem_name: String,
    pub user: String,
    pub dimension_count: Option<NonZeroU32>,
    pub domain: Domain,
    pub unknowns: Vec<Unknown>,
    pub parameters: Vec<Parameter>,
    pub pdes: Vec<Pde>,
    pub boundary_conditions: BoundaryConditions,
    pub qualitative_properties: QualitativeProperties,
    pub solve_config: SolveConfig,
    /// RFC 3339, UTC.
    pub generated_at: String,
}

impl ExportSnapshot {
    #[must_use]
    pub fn capture(model: &ProblemModel, problem_name: &str, user: &str) -> Self {
        Self {
            problem_name: problem_name.to_owned(),
            user: user.to_owned(),
            dimension_count: model.dimension_count,
            domain: model.domain.clone(),
            unknowns: model.unknowns.clone(),
            parameters: model.parameters.clone(),
            pdes: model.pdes.clone(),
            boundary_conditions: model.boundary_conditions.clone(),
            qualitative_properties: model.qualitative_properties.clone(),
            solve_config: model.solve_config.clone(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Where an export ended up, for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub location: String,
}

pub trait ExportTarget {
    fn export(&mut self, snapshot: &ExportSnapshot) -> anyhow::Result<ExportReceipt>;
}

/// Writes `<directory>/<problem_name>.json`, replacing any earlier export of
/// the same problem atomically.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    directory: PathBuf,
}

impl JsonExporter {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn path_for(&self, problem_name: &str) -> PathBuf {
        self.directory
            .join(format!("{}.json", file_stem(problem_name)))
    }
}

impl ExportTarget for JsonExporter {
    fn export(&mut self, snapshot: &ExportSnapshot) -> anyhow::Result<ExportReceipt> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!("failed to create export directory {}", self.directory.display())
        })?;
        let path = self.path_for(&snapshot.problem_name);

        let tmp = NamedTempFile::new_in(&self.directory)
            .with_context(|| format!("failed to create a temp file in {}", self.directory.display()))?;
        let mut writer = BufWriter::new(tmp);
        serde_json::to_writer_pretty(&mut writer, snapshot).context("failed to serialize the problem")?;
        writer.write_all(b"\n")?;
        let tmp = writer
            .into_inner()
            .map_err(|err| err.into_error())
            .context("failed to flush the export")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)
            .map_err(|err| err.error)
            .with_context(|| format!("failed to write {}", path.display()))?;

        tracing::info!(path = %path.display(), problem = %snapshot.problem_name, "exported problem");
        Ok(ExportReceipt {
            location: path.display().to_string(),
        })
    }
}

/// A file stem that stays inside the export directory.
fn file_stem(problem_name: &str) -> String {
    let stem: String = problem_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "problem".to_owned()
    } else {
        stem.to_owned()
    }
}
