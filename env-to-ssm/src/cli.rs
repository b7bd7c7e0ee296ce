use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_ENV_FILE: &str = ".env";

const AFTER_HELP: &str = "\
Examples:
  env-to-ssm                   # Use .env in current directory
  env-to-ssm ./config/.env     # Use specific .env file
  env-to-ssm -h                # Show help

Required AWS Environment Variables:
  AWS_ACCESS_KEY_ID            Your AWS access key
  AWS_SECRET_ACCESS_KEY        Your AWS secret key
  AWS_REGION                   AWS region (defaults to us-east-1)
  AWS_SSM_PATH                 Base path for SSM parameters (e.g., /myapp/prod)

Optional AWS Environment Variables:
  AWS_SESSION_TOKEN            Session token for temporary credentials
  AWS_PROFILE                  Named profile from the shared AWS config
  AWS_ENDPOINT_URL             Custom SSM endpoint (e.g., LocalStack)

Variables may be set in the shell or in the .env file itself; shell values win.
Keys starting with AWS_ are never uploaded.

Note: Make sure you have proper AWS credentials configured.";

#[derive(Parser, Debug)]
#[command(
    name = "env-to-ssm",
    about = "Upload .env variables to AWS SSM Parameter Store as SecureString parameters",
    long_about = None,
    disable_version_flag = true,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Path to the .env file (defaults to .env in the current directory).
    /// Only the first path is used.
    #[arg(value_name = "ENV_FILE", num_args = 0..)]
    pub env_files: Vec<PathBuf>,

    /// Show version number
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Exit with status 1 if any parameter fails to upload
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    ShowVersion,
    Sync(SyncArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncArgs {
    pub env_file: PathBuf,
    pub strict: bool,
}

impl Cli {
    pub fn invocation(self) -> Invocation {
        if self.version {
            return Invocation::ShowVersion;
        }

        let env_file = match self.env_files.into_iter().next() {
            Some(path) => std::path::absolute(&path).unwrap_or(path),
            None => PathBuf::from(DEFAULT_ENV_FILE),
        };

        Invocation::Sync(SyncArgs {
            env_file,
            strict: self.strict,
        })
    }
}

pub fn version_text() -> String {
    format!("env-to-ssm version {}", env!("CARGO_PKG_VERSION"))
}
