//! Command-line definition (clap derive).

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// A local, encrypted password vault.
#[derive(Parser, Debug)]
#[command(name = "laas", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the key, data and config files.
    #[arg(long, global = true, env = "LAAS_VAULT_DIR", value_name = "DIR")]
    pub vault_dir: Option<PathBuf>,

    /// Log filter used when `LAAS_LOG` / `RUST_LOG` are unset (e.g. `info`, `laas_vault=debug`).
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save a password for a platform, replacing any existing entry.
    Add(AddArgs),
    /// Show the username and password stored for a platform.
    Get {
        /// Platform name (case-insensitive when there is no exact match).
        platform: String,
    },
    /// Print a freshly generated random password.
    Generate,
    /// List stored platforms and how many there are.
    List,
    /// Show the user guide.
    Info,
    /// Irreversibly delete the data file and the key file.
    DeleteAll {
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Print the effective configuration as JSON.
    Config,
}

/// Arguments of `laas add`.
///
/// `Debug` is implemented by hand so a password given on the command line
/// never reaches a log line.
#[derive(Args)]
pub struct AddArgs {
    /// Platform name, e.g. `GitHub`.
    pub platform: String,

    /// Username or e-mail for the platform.
    pub username: String,

    /// Password to store. Prompted for without echo when omitted.
    #[arg(long, conflicts_with = "generate")]
    pub password: Option<String>,

    /// Store a newly generated password and print it.
    #[arg(long, short = 'g')]
    pub generate: bool,
}

impl fmt::Debug for AddArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddArgs")
            .field("platform", &self.platform)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("generate", &self.generate)
            .finish()
    }
}
