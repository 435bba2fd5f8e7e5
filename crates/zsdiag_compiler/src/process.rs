//! Runs the `zscript` executable from an installation folder.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info};
use zsdiag_core::{CompileOutcome, DiagConfig, DiagError};

use crate::CompilerBackend;

/// Name of the scratch file the buffer is written to before compiling.
pub const SCRATCH_FILE_NAME: &str = "tmp.zs";

/// The compiler executable as invoked from the installation folder.
pub fn executable_name() -> &'static str {
    if cfg!(windows) {
        "./zscript.exe"
    } else {
        "./zscript"
    }
}

/// Spawns the compiler as a child process.
///
/// Runs are serialized: they share one scratch file, and the parser must
/// never see output from two runs at once.
#[derive(Debug)]
pub struct ProcessCompiler {
    installation: PathBuf,
    args: Vec<String>,
    print_output: bool,
    scratch: TempDir,
    running: Mutex<()>,
}

impl ProcessCompiler {
    /// Creates a backend for the compiler in `installation`.
    pub fn new(installation: impl Into<PathBuf>, args: Vec<String>) -> Result<Self, DiagError> {
        Ok(Self {
            installation: installation.into(),
            args,
            print_output: false,
            scratch: tempfile::Builder::new().prefix("zsdiag").tempdir()?,
            running: Mutex::new(()),
        })
    }

    /// Creates a backend from configuration.
    pub fn from_config(config: &DiagConfig) -> Result<Self, DiagError> {
        let installation = config.resolved_installation_folder().ok_or_else(|| {
            DiagError::config("Must set zscript.installationFolder setting")
        })?;
        Ok(Self::new(installation, config.compiler_args.clone())?
            .with_print_output(config.print_compiler_output))
    }

    /// Logs the raw output of every run.
    pub fn with_print_output(mut self, enabled: bool) -> Self {
        self.print_output = enabled;
        self
    }

    /// The installation folder the compiler runs in.
    pub fn installation(&self) -> &Path {
        &self.installation
    }

    /// Path of the scratch file buffers are written to.
    pub fn scratch_file(&self) -> PathBuf {
        self.scratch.path().join(SCRATCH_FILE_NAME)
    }

    fn executable(&self) -> PathBuf {
        self.installation.join(executable_name())
    }
}

#[async_trait]
impl CompilerBackend for ProcessCompiler {
    fn name(&self) -> &str {
        executable_name()
    }

    async fn compile(&self, source: &str) -> Result<CompileOutcome, DiagError> {
        let _running = self.running.lock().await;

        let input = self.scratch_file();
        tokio::fs::write(&input, source).await?;

        let executable = self.executable();
        debug!("Running {} on {}", executable.display(), input.display());

        let output = Command::new(&executable)
            .args(&self.args)
            .arg("-input")
            .arg(&input)
            .current_dir(&self.installation)
            .output()
            .await
            .map_err(|e| {
                DiagError::compiler(format!("Failed to run {}: {}", executable.display(), e))
            })?;

        let combined = combine_output(&output.stdout, &output.stderr);
        if self.print_output {
            info!("{}", combined);
        }

        Ok(CompileOutcome {
            success: output.status.success(),
            output: combined,
        })
    }
}

/// Joins stdout and stderr, keeping their lines apart.
fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    let stderr = String::from_utf8_lossy(stderr);
    if !combined.is_empty() && !combined.ends_with('\n') && !stderr.is_empty() {
        combined.push('\n');
    }
    combined.push_str(&stderr);
    combined
}
