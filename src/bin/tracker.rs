//! Terminal tracker
//!
//! Lists the roster from a behavior-tracker server and times students from
//! stdin commands.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, warn};

use behavior_tracker::{
    config::ClientConfig,
    tracker::{ApiClient, ClockZone, SystemClock, TrackerView},
    utils::shutdown_signal,
};

const HELP: &str = "\
Commands:
  list                 show the roster and running timers
  select <n|name>      select a student
  start [n|name]       start timing (selected student by default)
  stop [n|name]        stop timing and log the interval
  reload               fetch the roster again
  help                 show this help
  quit                 exit";

/// How long to wait for in-flight log requests on exit
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

async fn load_roster(client: &ApiClient) -> Vec<String> {
    match client.fetch_students().await {
        Ok(students) => students,
        Err(e) => {
            error!("Failed to fetch students: {}", e);
            Vec::new()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "behavior_tracker={},tracker={}",
            config.log_level(),
            config.log_level()
        ))
        .with_writer(std::io::stderr)
        .init();

    let client = ApiClient::new(&config.server)?;
    let zone = if config.utc { ClockZone::Utc } else { ClockZone::Local };
    let mut view = TrackerView::new(SystemClock, client.clone(), zone);

    view.set_roster(load_roster(&client).await);
    println!("{}", view.render());
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut shutdown => break,
        };
        let Some(line) = line else { break };

        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let rest = words.collect::<Vec<_>>().join(" ");
        let target = (!rest.is_empty()).then_some(rest.as_str());

        match command {
            "" => continue,
            "list" | "ls" => print!("{}", view.render()),
            "select" | "sel" => match target {
                Some(token) => println!("{}", view.select(token)),
                None => println!("Usage: select <n|name>"),
            },
            "start" => println!("{}", view.start(target)),
            "stop" => println!("{}", view.stop(target)),
            "reload" => {
                view.set_roster(load_roster(&client).await);
                print!("{}", view.render());
            }
            "help" | "?" => println!("{}", HELP),
            "quit" | "exit" | "q" => break,
            other => println!("Unknown command: {} (try help)", other),
        }
    }

    let running = view.running();
    if !running.is_empty() {
        println!("Still timing, not logged: {}", running.join(", "));
    }
    if tokio::time::timeout(FLUSH_TIMEOUT, view.flush()).await.is_err() {
        warn!("Gave up waiting on {} log request(s)", view.pending_logs());
    }

    Ok(())
}
