use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{error, info, warn};

use vigil_core::observability::init_tracing;
use vigil_core::{
    BuildError, HealthCheck, HealthCheckBuilder, HealthError, InMemoryTaskRegistry,
    RegistryError, TaskDescriptor, Verdict,
};

/// Exit code for "could not determine" (distinct from unhealthy).
const EXIT_ERROR: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Evaluate scheduled task health from a registry snapshot.
#[derive(Debug, Parser)]
#[command(name = "vigil", version)]
struct Args {
    /// JSON file containing an array of task descriptors.
    #[arg(long, env = "VIGIL_SNAPSHOT")]
    snapshot: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Deadline for the whole check, in milliseconds.
    #[arg(long, env = "VIGIL_TIMEOUT_MS", default_value_t = 5000)]
    timeout_ms: u64,

    /// Name reported for the check.
    #[arg(long, default_value = vigil_core::app::builder::DEFAULT_CHECK_NAME)]
    name: String,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("read snapshot {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// `run` always supplies a registry, so this only guards future wiring.
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Health(#[from] HealthError),

    #[error("health check timed out after {0}ms")]
    Timeout(u64),
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    check: &'a str,
    verdict: Verdict,
    http_status: u16,
}

fn parse_snapshot(raw: &str) -> Result<Vec<TaskDescriptor>, CliError> {
    Ok(serde_json::from_str(raw)?)
}

async fn load_registry(path: &Path) -> Result<InMemoryTaskRegistry, CliError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let tasks = parse_snapshot(&raw)?;
    Ok(InMemoryTaskRegistry::from_tasks(tasks)?)
}

fn render(format: OutputFormat, check: &str, verdict: Verdict) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(format!("{check}: {verdict}")),
        OutputFormat::Json => Ok(serde_json::to_string(&Report {
            check,
            verdict,
            http_status: verdict.http_status(),
        })?),
    }
}

/// Run one check under a deadline and render its verdict.
///
/// A timeout or a registry error is returned as `Err`, never as a verdict.
async fn evaluate_with(
    check: &dyn HealthCheck,
    timeout: Duration,
    format: OutputFormat,
) -> Result<(Verdict, String), CliError> {
    let verdict = tokio::time::timeout(timeout, check.check_health())
        .await
        .map_err(|_| CliError::Timeout(timeout.as_millis() as u64))??;

    if verdict.is_healthy() {
        info!(check = check.name(), "scheduled tasks healthy");
    } else {
        warn!(check = check.name(), "scheduled tasks unhealthy");
    }

    let line = render(format, check.name(), verdict)?;
    Ok((verdict, line))
}

async fn run(args: &Args) -> Result<(Verdict, String), CliError> {
    let registry = load_registry(&args.snapshot).await?;
    let tasks = registry.len().await;
    info!(tasks, snapshot = %args.snapshot.display(), "snapshot loaded");

    let check = HealthCheckBuilder::new()
        .name(args.name.clone())
        .registry(Arc::new(registry))
        .build()?;

    evaluate_with(&check, Duration::from_millis(args.timeout_ms), args.format).await
}

/// 0 healthy, 1 unhealthy, 2 when the verdict could not be determined.
fn exit_code(result: &Result<(Verdict, String), CliError>) -> u8 {
    match result {
        Ok((verdict, _)) => verdict.exit_code() as u8,
        Err(_) => EXIT_ERROR,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing("info");
    let args = Args::parse();

    let result = run(&args).await;
    match &result {
        Ok((_, line)) => println!("{line}"),
        Err(e) => error!(error = %e, "health check could not be evaluated"),
    }
    ExitCode::from(exit_code(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clap::CommandFactory;
    use vigil_core::TaskRegistry;

    /// Temp snapshot file, removed on drop.
    struct SnapshotFile(PathBuf);

    impl SnapshotFile {
        fn new(name: &str, body: &str) -> Self {
            let path =
                std::env::temp_dir().join(format!("vigil-{}-{name}.json", std::process::id()));
            std::fs::write(&path, body).unwrap();
            Self(path)
        }
    }

    impl Drop for SnapshotFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn args_for(snapshot: &Path, format: OutputFormat) -> Args {
        Args {
            snapshot: snapshot.to_path_buf(),
            format,
            timeout_ms: 1000,
            name: "scheduled_tasks".to_string(),
        }
    }

    struct SlowRegistry(Duration);

    #[async_trait]
    impl TaskRegistry for SlowRegistry {
        async fn scheduled_tasks(&self) -> Result<Vec<TaskDescriptor>, RegistryError> {
            tokio::time::sleep(self.0).await;
            Ok(Vec::new())
        }
    }

    struct UnavailableRegistry;

    #[async_trait]
    impl TaskRegistry for UnavailableRegistry {
        async fn scheduled_tasks(&self) -> Result<Vec<TaskDescriptor>, RegistryError> {
            Err(RegistryError::Unavailable("scheduler offline".to_string()))
        }
    }

    #[test]
    fn args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_snapshot_rejects_garbage() {
        let result = parse_snapshot("{not json");
        assert!(matches!(result, Err(CliError::Json(_))));
    }

    #[test]
    fn render_json_report() {
        let out = render(OutputFormat::Json, "tasks", Verdict::Unhealthy).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["check"], "tasks");
        assert_eq!(v["verdict"], "UNHEALTHY");
        assert_eq!(v["http_status"], 503);

        let out = render(OutputFormat::Text, "tasks", Verdict::Healthy).unwrap();
        assert_eq!(out, "tasks: healthy");
    }

    #[test]
    fn exit_codes_follow_verdict_or_error() {
        assert_eq!(exit_code(&Ok((Verdict::Healthy, String::new()))), 0);
        assert_eq!(exit_code(&Ok((Verdict::Unhealthy, String::new()))), 1);
        assert_eq!(exit_code(&Err(CliError::Timeout(10))), EXIT_ERROR);

        let build = HealthCheckBuilder::new().build().map_err(CliError::from);
        assert!(matches!(build, Err(CliError::Build(BuildError::MissingRegistry))));
    }

    #[tokio::test]
    async fn slow_registry_times_out_with_error_exit() {
        let check = HealthCheckBuilder::new()
            .registry(Arc::new(SlowRegistry(Duration::from_secs(5))))
            .build()
            .unwrap();

        let result = evaluate_with(&check, Duration::from_millis(20), OutputFormat::Text).await;
        assert!(matches!(result, Err(CliError::Timeout(20))));
        assert_eq!(exit_code(&result), EXIT_ERROR);
    }

    #[tokio::test]
    async fn unavailable_registry_is_error_not_unhealthy() {
        let check = HealthCheckBuilder::new()
            .registry(Arc::new(UnavailableRegistry))
            .build()
            .unwrap();

        let result = evaluate_with(&check, Duration::from_secs(1), OutputFormat::Json).await;
        assert!(matches!(
            result,
            Err(CliError::Health(HealthError::Registry(RegistryError::Unavailable(_))))
        ));
        assert_eq!(exit_code(&result), EXIT_ERROR);
    }

    #[tokio::test]
    async fn run_reports_unhealthy_snapshot() {
        let file = SnapshotFile::new(
            "unhealthy",
            r#"[
                {"name": "A", "kind": "configurable", "enabled": true,
                 "last_execution": {"status": "Completed"}},
                {"name": "B", "kind": "not_configurable",
                 "last_execution": {"status": "Failed", "error_message": "boom"}}
            ]"#,
        );
        let result = run(&args_for(&file.0, OutputFormat::Text)).await;
        assert_eq!(exit_code(&result), 1);

        let (verdict, line) = result.unwrap();
        assert_eq!(verdict, Verdict::Unhealthy);
        assert_eq!(line, "scheduled_tasks: unhealthy");
    }

    #[tokio::test]
    async fn run_reports_healthy_when_failure_is_disabled() {
        let file = SnapshotFile::new(
            "disabled",
            r#"[{"name": "A", "kind": "configurable", "enabled": false,
                 "last_execution": {"status": "Failed"}}]"#,
        );
        let result = run(&args_for(&file.0, OutputFormat::Json)).await;
        assert_eq!(exit_code(&result), 0);

        let (verdict, _) = result.unwrap();
        assert_eq!(verdict, Verdict::Healthy);
    }

    #[tokio::test]
    async fn missing_snapshot_is_an_error() {
        let path = std::env::temp_dir().join("vigil-does-not-exist.json");
        let result = run(&args_for(&path, OutputFormat::Text)).await;
        assert!(matches!(result, Err(CliError::Read { .. })));
        assert_eq!(exit_code(&result), EXIT_ERROR);
    }

    #[tokio::test]
    async fn duplicate_names_are_an_error() {
        let file = SnapshotFile::new(
            "duplicate",
            r#"[{"name": "A", "kind": "not_configurable"},
                {"name": "A", "kind": "not_configurable"}]"#,
        );
        let result = run(&args_for(&file.0, OutputFormat::Text)).await;
        assert!(matches!(
            result,
            Err(CliError::Registry(RegistryError::DuplicateTask(_)))
        ));
    }
}
