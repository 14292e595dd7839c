use crate::configuration::{Command, Configuration};
use clap::Parser;
use reqwest::Url;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Book and cancel hour-long appointments")]
pub struct ConfigurationHandler {
    /// Base URL of the appointment store
    #[arg(
        long,
        env = "STORE_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    store_url: Url,

    /// Timeout of a single store request in seconds
    #[arg(long, env = "STORE_TIMEOUT_SECS", default_value_t = 10, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn store_url(&self) -> Url {
        self.store_url.clone()
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn command(&self) -> &Command {
        &self.command
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::parse_date;

    #[test]
    fn test_defaults() {
        let configuration = ConfigurationHandler::try_parse_from(["scheduler", "day"]).unwrap();
        assert_eq!(configuration.request_timeout(), Duration::from_secs(10));
        assert!(matches!(configuration.command(), Command::Day { date: None }));
    }

    #[test]
    fn test_parse_book() {
        let configuration = ConfigurationHandler::try_parse_from([
            "scheduler",
            "book",
            "--date",
            "2024-01-01",
            "--slot",
            "5:00",
            "--name",
            "Ada",
            "--store-url",
            "http://store.local:8080/",
        ])
        .unwrap();

        assert_eq!(configuration.store_url().as_str(), "http://store.local:8080/");
        match configuration.command() {
            Command::Book { date, slot, name } => {
                assert_eq!(*date, Some(parse_date("2024-01-01").unwrap()));
                assert_eq!(slot.hour(), 5);
                assert_eq!(name, "Ada");
            }
            command => panic!("unexpected command {command:?}"),
        }
    }

    #[test_case::test_case (&["scheduler", "book", "--slot", "05:00", "--name", "Ada"] ; "zero padded slot")]
    #[test_case::test_case (&["scheduler", "day", "--date", "2024-13-01"] ; "invalid date")]
    #[test_case::test_case (&["scheduler", "cancel", "--time", "2024-01-01"] ; "time without slot")]
    #[test_case::test_case (&["scheduler", "serve", "--port", "http"] ; "port not a number")]
    fn test_reject_invalid_arguments(arguments: &[&str]) {
        ConfigurationHandler::try_parse_from(arguments).unwrap_err();
    }
}
