use crate::catalog::{Catalog, CatalogSummary};
use crate::error::{Error, Result};
use crate::generate::{self, GenerateOptions, GenerateReport, GeneratedScript};
use crate::launch::{self, LaunchOptions, LaunchReport, ProcessLauncher, WindowManager};
use crate::status::StatusReporter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// State carried between Scan, Generate and Run.
///
/// Only one session is active per process; each step owns the data for its
/// duration.
#[derive(Debug, Default)]
pub struct Session {
    root: Option<PathBuf>,
    catalog: Catalog,
    generated: Vec<GeneratedScript>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn generated(&self) -> &[GeneratedScript] {
        &self.generated
    }

    /// Selects a root without scanning it.
    pub fn set_root(&mut self, root: impl Into<PathBuf>) {
        let root = root.into();
        self.root = if root.as_os_str().is_empty() {
            None
        } else {
            Some(root)
        };
    }

    /// Selects `root` and replaces the catalog with a fresh scan of it.
    ///
    /// Root and catalog change together. When the scan fails the session is
    /// left with no root, no catalog and no generated scripts.
    pub fn open(&mut self, root: impl Into<PathBuf>, reporter: &dyn StatusReporter) -> Result<CatalogSummary> {
        self.set_root(root);
        self.scan(reporter)
    }

    /// Rescans the selected root. A failed scan never leaves a previous
    /// catalog behind.
    pub fn scan(&mut self, reporter: &dyn StatusReporter) -> Result<CatalogSummary> {
        let root = self.root.clone().ok_or(Error::MissingRoot)?;
        info!("Scanning {}", root.display());

        let catalog = match Catalog::scan(&root) {
            Ok(catalog) => catalog,
            Err(err) => {
                self.root = None;
                self.catalog = Catalog::default();
                self.generated.clear();
                return Err(err);
            }
        };

        self.catalog = catalog;
        let summary = self.catalog.summary();
        for line in summary.lines() {
            reporter.log(&line);
        }
        Ok(summary)
    }

    /// Runs generation against the last scan. The generated list is replaced
    /// by what this run wrote; a failed precondition keeps the previous list.
    pub fn generate(
        &mut self,
        options: &GenerateOptions,
        reporter: &dyn StatusReporter,
    ) -> Result<GenerateReport> {
        let root = self.root.clone().unwrap_or_default();
        let report = generate::generate(&self.catalog, &root, options, reporter)?;
        self.generated = report.written.clone();
        Ok(report)
    }

    /// Scripts already on disk in the catalog win over the ones generated
    /// this session.
    pub fn scripts_to_run(&self, script_extension: &str, reporter: &dyn StatusReporter) -> Result<Vec<PathBuf>> {
        if self.root.is_none() {
            return Err(Error::MissingRoot);
        }

        let existing = self.catalog.bucket(script_extension);
        if !existing.is_empty() {
            reporter.log(&format!(
                "Found {} {} file(s).",
                existing.len(),
                script_extension
            ));
            return Ok(existing.into_iter().map(|e| e.path.clone()).collect());
        }

        reporter.log(&format!(
            "No {} files found in the selected directory.",
            script_extension
        ));
        if self.generated.is_empty() {
            return Err(Error::NoScripts);
        }

        debug!("Falling back to {} generated scripts", self.generated.len());
        Ok(self.generated.iter().map(|s| s.path.clone()).collect())
    }

    pub fn run(
        &self,
        script_extension: &str,
        launcher: &dyn ProcessLauncher,
        windows: &dyn WindowManager,
        options: &LaunchOptions,
        reporter: &dyn StatusReporter,
    ) -> Result<LaunchReport> {
        let scripts = self.scripts_to_run(script_extension, reporter)?;
        launch::launch_and_arrange(&scripts, launcher, windows, options, reporter)
    }

    /// Forgets root, catalog and generated scripts. Files on disk stay.
    pub fn reset(&mut self, reporter: &dyn StatusReporter) {
        self.root = None;
        self.catalog = Catalog::default();
        self.generated.clear();
        reporter.log("All fields have been reset.");
    }
}
