//! Line-oriented operator input.
//!
//! Reads commands from the terminal. The literal `exit`
//! (case-insensitive) returns control to the caller for shutdown;
//! every other non-empty line is tokenized and dispatched to the
//! remote console. Dispatch failures are logged, never fatal.

use console_api::ConsoleClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Runs the operator loop until `exit` or end of input.
pub async fn run(client: &ConsoleClient) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let command = line.trim();
                if command.is_empty() {
                    continue;
                }
                if is_exit(command) {
                    info!("operator requested shutdown");
                    break;
                }
                let cmd = tokenize(command);
                if let Err(err) = client.execute(&cmd).await {
                    warn!(error = %err, "failed to dispatch operator command");
                }
            }
            Ok(None) => {
                info!("stdin closed, shutting down");
                break;
            }
            Err(err) => {
                warn!(error = %err, "failed to read operator input");
                break;
            }
        }
    }
}

fn is_exit(command: &str) -> bool {
    command.eq_ignore_ascii_case("exit")
}

fn tokenize(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_matches_case_insensitively() {
        assert!(is_exit("exit"));
        assert!(is_exit("EXIT"));
        assert!(is_exit("Exit"));
        assert!(!is_exit("exit now"));
        assert!(!is_exit("quit"));
    }

    #[test]
    fn commands_tokenize_on_whitespace() {
        assert_eq!(tokenize("say hello   world"), ["say", "hello", "world"]);
        assert_eq!(tokenize("stop"), ["stop"]);
    }
}
