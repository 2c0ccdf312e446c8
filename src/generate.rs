use crate::catalog::{Catalog, FileEntry};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::status::{Notice, StatusReporter};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopCount {
    #[default]
    Infinite,
    Times(u32),
}

impl LoopCount {
    pub fn flag(&self) -> String {
        match self {
            LoopCount::Infinite => "-stream_loop -1".to_string(),
            LoopCount::Times(n) => format!("-stream_loop {}", n),
        }
    }
}

impl From<Option<u32>> for LoopCount {
    fn from(count: Option<u32>) -> Self {
        count.map(LoopCount::Times).unwrap_or_default()
    }
}

impl fmt::Display for LoopCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopCount::Infinite => write!(f, "Unlimited"),
            LoopCount::Times(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub prefix: String,
    pub loop_count: LoopCount,
    pub executable_name: String,
    pub keys_extension: String,
    pub script_extension: String,
    pub ingest_url: String,
}

impl GenerateOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        GenerateOptions {
            prefix: config.default_prefix.clone(),
            loop_count: LoopCount::Infinite,
            executable_name: config.executable_name.clone(),
            keys_extension: config.keys_bucket(),
            script_extension: config.script_bucket(),
            ingest_url: config.ingest_url.clone(),
        }
    }

    /// A blank prefix falls back to the default one.
    pub fn with_prefix(mut self, prefix: Option<&str>) -> Self {
        if let Some(prefix) = prefix.map(str::trim).filter(|p| !p.is_empty()) {
            self.prefix = prefix.to_string();
        }
        self
    }

    pub fn with_loop_count(mut self, loop_count: LoopCount) -> Self {
        self.loop_count = loop_count;
        self
    }

    pub fn script_name(&self, index: usize) -> String {
        format!(
            "{} {}.{}",
            self.prefix,
            index,
            self.script_extension.trim_start_matches('.')
        )
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions::from_config(&AppConfig::default())
    }
}

/// One key paired with one video.
#[derive(Debug, Clone)]
pub struct StreamJob<'a> {
    pub index: usize,
    pub stream_key: String,
    pub video: &'a FileEntry,
}

impl StreamJob<'_> {
    pub fn command(&self, executable: &Path, options: &GenerateOptions) -> String {
        format!(
            "\"{}\" {} -re -i \"{}\" -c copy -f flv -flvflags no_duration_filesize {}/{}",
            executable.display(),
            options.loop_count.flag(),
            self.video.path.display(),
            options.ingest_url.trim_end_matches('/'),
            self.stream_key
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    pub index: usize,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub written: Vec<GeneratedScript>,
    pub unmatched: Vec<usize>,
    pub failures: Vec<Error>,
}

impl GenerateReport {
    /// At least one script written. Partial success counts.
    pub fn is_success(&self) -> bool {
        !self.written.is_empty()
    }
}

/// Non-empty trimmed lines, in file order.
pub fn read_stream_keys(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Writes one script per (key, video) pair into `root`.
///
/// Missing root, keys file or executable abort before anything is written.
/// Past that point, a key without a video or a failed write is reported and
/// the remaining jobs still run.
pub fn generate(
    catalog: &Catalog,
    root: &Path,
    options: &GenerateOptions,
    reporter: &dyn StatusReporter,
) -> Result<GenerateReport> {
    if root.as_os_str().is_empty() {
        return Err(Error::MissingRoot);
    }

    let keys_file = catalog
        .find_first(&options.keys_extension)
        .ok_or_else(|| Error::NoKeysFile(options.keys_extension.clone()))?;

    let executable = catalog
        .find_executable(&options.executable_name)
        .ok_or_else(|| Error::NoExecutable(options.executable_name.clone()))?;

    info!(
        "Generating scripts from {} with {}",
        keys_file.path.display(),
        executable.path.display()
    );

    let stream_keys = read_stream_keys(&keys_file.path)?;
    let videos = catalog.video_files();
    debug!("{} stream keys, {} video files", stream_keys.len(), videos.len());

    let mut report = GenerateReport::default();

    for (i, stream_key) in stream_keys.into_iter().enumerate() {
        let index = i + 1;
        let Some(video) = videos.get(i) else {
            let err = Error::UnmatchedJob {
                prefix: options.prefix.clone(),
                index,
            };
            reporter.log(&format!("Error: {}", err));
            report.unmatched.push(index);
            continue;
        };

        let job = StreamJob {
            index,
            stream_key,
            video,
        };
        let script_name = options.script_name(index);
        let path = root.join(&script_name);

        match write_script(&path, &job.command(&executable.path, options)) {
            Ok(()) => {
                reporter.log(&format!("Generated: {}", script_name));
                report.written.push(GeneratedScript { index, path });
            }
            Err(source) => {
                let err = Error::WriteFailure { path, source };
                reporter.log(&err.to_string());
                report.failures.push(err);
            }
        }
    }

    if report.unmatched.len() + report.failures.len() > 0 {
        reporter.notify(
            Notice::Error,
            "Error",
            &format!(
                "{} job(s) without a video file, {} script(s) failed to write.",
                report.unmatched.len(),
                report.failures.len()
            ),
        );
    }

    if report.is_success() {
        let message = format!("Successfully generated {} script files.", report.written.len());
        reporter.log(&message);
        reporter.notify(Notice::Info, "Success", &message);
    } else {
        reporter.fail("Failed to generate script files. Check the output for details.");
    }

    Ok(report)
}

fn write_script(path: &Path, command: &str) -> std::io::Result<()> {
    fs::write(path, command)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}
