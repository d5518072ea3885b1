//! Configuration and CLI argument handling

use clap::Parser;

use crate::sheets::{ServiceAccount, SheetTarget};

pub const DEFAULT_STUDENT_RANGE: &str = "Sheet1!F2:F";

/// Server configuration, from flags or the environment
#[derive(Parser)]
#[command(name = "behavior-tracker")]
#[command(about = "Per-student behavior timer backed by a Google Sheet")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Service account client email
    #[arg(long, env = "GOOGLE_CLIENT_EMAIL")]
    pub client_email: String,

    /// Service account private key (PEM, newlines may be escaped as \n)
    #[arg(long, env = "GOOGLE_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Spreadsheet holding the roster and the behavior log
    #[arg(long, env = "GOOGLE_SHEET_ID")]
    pub sheet_id: String,

    /// Range whose first column lists the students
    #[arg(long, env = "GOOGLE_STUDENT_LIST_RANGE", default_value = DEFAULT_STUDENT_RANGE)]
    pub student_range: String,

    /// Range new log rows are appended to
    #[arg(long, env = "GOOGLE_SHEET_RANGE")]
    pub log_range: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments and environment
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn service_account(&self) -> ServiceAccount {
        ServiceAccount::new(self.client_email.clone(), &self.private_key)
    }

    pub fn roster_target(&self) -> SheetTarget {
        SheetTarget::new(self.sheet_id.clone(), self.student_range.clone())
    }

    pub fn log_target(&self) -> SheetTarget {
        SheetTarget::new(self.sheet_id.clone(), self.log_range.clone())
    }
}

/// Terminal tracker configuration
#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Time students from the terminal and log intervals to a behavior-tracker server")]
#[command(version)]
pub struct ClientConfig {
    /// Base URL of the behavior-tracker server
    #[arg(short, long, env = "TRACKER_SERVER", default_value = "http://127.0.0.1:3000")]
    pub server: String,

    /// Show clock times in UTC instead of local time
    #[arg(long)]
    pub utc: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ClientConfig {
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let argv = ["behavior-tracker"].into_iter().chain(args.iter().copied());
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn targets_share_the_spreadsheet() {
        let config = parse(&[
            "--client-email=svc@example.com",
            "--private-key=k",
            "--sheet-id=abc",
            "--student-range=Roster!A2:A",
            "--log-range=Log!A:D",
        ]);

        assert_eq!(config.roster_target(), SheetTarget::new("abc", "Roster!A2:A"));
        assert_eq!(config.log_target(), SheetTarget::new("abc", "Log!A:D"));
    }

    #[test]
    fn client_defaults_to_local_server() {
        let config = ClientConfig::try_parse_from(["tracker"]).unwrap();
        assert_eq!(config.server, "http://127.0.0.1:3000");
        assert!(!config.utc);
    }
}
