use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Exchange username and password for a credential pair.
    Login(AuthLoginArgs),
    /// Clear stored credentials.
    Logout,
    /// Show who the session acts as and what it may do.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub password: String,
}
