use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, Invocation, SyncArgs, version_text},
    configs::{
        Configs, SyncConfig,
        loaders::environment::{LayeredEnv, process_env},
    },
    env_file,
    error::SyncError,
    store::factory::{ParameterStoreFactory, SsmStoreFactory},
    uploader::{UploadSummary, Uploader},
};

pub fn setup_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()) // reads RUST_LOG
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Runs a parsed command line against AWS SSM and maps the result to an exit
/// status.
pub async fn start(cli: Cli) -> ExitCode {
    match cli.invocation() {
        Invocation::ShowVersion => {
            println!("{}", version_text());
            ExitCode::SUCCESS
        }
        Invocation::Sync(args) => {
            setup_logging();
            match sync(&args, &SsmStoreFactory).await {
                Ok(_) => ExitCode::SUCCESS,
                Err(err) => {
                    report_fatal(&err);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn report_fatal(err: &SyncError) {
    error!(%err, "Run aborted");
    eprintln!("❌ {err}");
    if let SyncError::MissingConfiguration(key) = err {
        eprintln!("Please set {key} in your .env file or environment");
    }
}

/// Uploads the file named by `args`, taking configuration from the process
/// environment and the file itself.
pub async fn sync<F>(args: &SyncArgs, factory: &F) -> Result<UploadSummary, SyncError>
where
    F: ParameterStoreFactory + ?Sized,
{
    sync_with_env(args, factory, process_env).await
}

/// Same as [`sync`] but with an explicit ambient lookup instead of the
/// process environment.
pub async fn sync_with_env<F, E>(
    args: &SyncArgs,
    factory: &F,
    ambient: E,
) -> Result<UploadSummary, SyncError>
where
    F: ParameterStoreFactory + ?Sized,
    E: Fn(&str) -> Option<String>,
{
    let mapping = env_file::load(&args.env_file)?;
    let config = SyncConfig::load(&LayeredEnv::new(ambient, &mapping))?;
    upload(args, &mapping, &config, factory).await
}

async fn upload<F>(
    args: &SyncArgs,
    mapping: &env_file::EnvMapping,
    config: &SyncConfig,
    factory: &F,
) -> Result<UploadSummary, SyncError>
where
    F: ParameterStoreFactory + ?Sized,
{
    println!(
        "🚀 Starting to upload environment variables to SSM from {}",
        args.env_file.display()
    );
    println!("📁 Using SSM base path: {}", config.ssm_path);
    println!("🌎 AWS Region: {}\n", config.aws.region);
    debug!(?config, "Resolved configuration");

    let store = factory.create(&config.aws).await?;
    let uploader = Uploader::new(store, config);
    let summary = uploader.upload_all(mapping).await;

    println!("\n✨ Finished uploading environment variables to SSM");
    println!(
        "   {} uploaded, {} skipped, {} failed",
        summary.uploaded, summary.skipped, summary.failed
    );
    info!(
        uploaded = summary.uploaded,
        skipped = summary.skipped,
        failed = summary.failed,
        ssm_path = config.ssm_path.as_str(),
        "Upload finished"
    );

    if args.strict && summary.has_failures() {
        return Err(SyncError::UploadsFailed {
            failed: summary.failed,
        });
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{configs::AWS_SSM_PATH, store::adapters::local_store::LocalParameterStore};
    use std::{fs, path::PathBuf};
    use tempfile::NamedTempFile;

    fn no_ambient(_: &str) -> Option<String> {
        None
    }

    fn env_file(content: &str) -> NamedTempFile {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, content).unwrap();
        temp_file
    }

    fn args(path: PathBuf, strict: bool) -> SyncArgs {
        SyncArgs {
            env_file: path,
            strict,
        }
    }

    #[tokio::test]
    async fn test_sync_uploads_eligible_entries() {
        let file = env_file("AWS_SSM_PATH=/app/prod\nFOO=bar\nAWS_REGION=x\nDB_PASS=\n");
        let store = LocalParameterStore::new();

        let summary = sync_with_env(&args(file.path().to_path_buf(), false), &store, no_ambient)
            .await
            .unwrap();

        assert_eq!(
            store.requests(),
            vec![("/app/prod/FOO".to_string(), "bar".to_string())]
        );
        assert_eq!(summary.uploaded, 1);
        assert_eq!(store.connections(), 1);
    }

    #[tokio::test]
    async fn test_missing_ssm_path_never_creates_store() {
        let file = env_file("FOO=bar\n");
        let store = LocalParameterStore::new();

        let result =
            sync_with_env(&args(file.path().to_path_buf(), false), &store, no_ambient).await;

        assert!(matches!(result, Err(SyncError::MissingConfiguration(key)) if key == AWS_SSM_PATH));
        assert_eq!(store.connections(), 0);
        assert_eq!(store.request_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_ssm_path_never_creates_store() {
        let file = env_file("AWS_SSM_PATH=\"   \"\nFOO=bar\n");
        let store = LocalParameterStore::new();

        let result =
            sync_with_env(&args(file.path().to_path_buf(), false), &store, no_ambient).await;

        assert!(matches!(result, Err(SyncError::MissingConfiguration(key)) if key == AWS_SSM_PATH));
        assert_eq!(store.connections(), 0);
        assert_eq!(store.request_count(), 0);
    }

    struct UnreachableStoreFactory;

    #[async_trait::async_trait]
    impl ParameterStoreFactory for UnreachableStoreFactory {
        async fn create(
            &self,
            _config: &crate::configs::AwsConfig,
        ) -> anyhow::Result<std::sync::Arc<dyn crate::store::ParameterStore>> {
            Err(anyhow::anyhow!("no route to parameter store"))
        }
    }

    #[tokio::test]
    async fn test_store_setup_failure_is_unhandled_error() {
        let file = env_file("AWS_SSM_PATH=/app\nFOO=bar\n");

        let result = sync_with_env(
            &args(file.path().to_path_buf(), false),
            &UnreachableStoreFactory,
            no_ambient,
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, SyncError::Unhandled(_)));
        assert!(err.to_string().contains("no route to parameter store"));
    }

    #[tokio::test]
    async fn test_missing_file_never_creates_store() {
        let store = LocalParameterStore::new();

        let result = sync_with_env(
            &args(PathBuf::from("/nonexistent/dir/.env"), false),
            &store,
            |_: &str| Some("/app".to_string()),
        )
        .await;

        assert!(matches!(result, Err(SyncError::FileRead { .. })));
        assert_eq!(store.connections(), 0);
    }

    #[tokio::test]
    async fn test_strict_mode_fails_on_any_upload_error() {
        let file = env_file("AWS_SSM_PATH=/app\nA=1\nB=2\n");
        let store = LocalParameterStore::failing_on(["/app/A"]);

        let result = sync_with_env(&args(file.path().to_path_buf(), true), &store, no_ambient).await;

        assert!(matches!(result, Err(SyncError::UploadsFailed { failed: 1 })));
        assert_eq!(store.request_count(), 2);
    }

    #[tokio::test]
    async fn test_version_invocation_succeeds_without_file() {
        let cli = Cli {
            env_files: vec![PathBuf::from("/nonexistent/.env")],
            version: true,
            strict: false,
        };
        assert_eq!(
            format!("{:?}", start(cli).await),
            format!("{:?}", ExitCode::SUCCESS)
        );
    }
}
