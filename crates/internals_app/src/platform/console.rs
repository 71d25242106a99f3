//! Line-based stand-in for a user interacting with the page.

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use super::app::AppEvent;

pub const HELP: &str = "\
commands:
  click <element>          click a button or checkbox
  type <element> [text]    replace the text of an input
  select <group> <id>      toggle a row checkbox (groups: stored, requests)
  show                     print the page
  help                     list commands and elements
  quit                     leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Click(String),
    Type { target: String, text: String },
    Select { group: String, value: String },
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim_start();
    let command = match verb {
        "click" => ConsoleCommand::Click(single_arg(verb, rest)?),
        "type" => {
            let (target, text) = rest.split_once(' ').unwrap_or((rest, ""));
            if target.is_empty() {
                return Err("usage: type <element> [text]".to_string());
            }
            ConsoleCommand::Type {
                target: target.to_string(),
                text: text.to_string(),
            }
        }
        "select" => match rest.split_whitespace().collect::<Vec<_>>()[..] {
            [group, value] => ConsoleCommand::Select {
                group: group.to_string(),
                value: value.to_string(),
            },
            _ => return Err("usage: select <group> <id>".to_string()),
        },
        "show" => ConsoleCommand::Show,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(command))
}

fn single_arg(verb: &str, rest: &str) -> Result<String, String> {
    match rest.split_whitespace().collect::<Vec<_>>()[..] {
        [arg] => Ok(arg.to_string()),
        _ => Err(format!("usage: {verb} <element>")),
    }
}

/// Reads stdin on its own thread. End of input is reported as a quit.
pub fn spawn_reader(event_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("console".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match parse_command(&line) {
                    Ok(Some(command)) => {
                        if event_tx.send(AppEvent::Console(command)).is_err() {
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(usage) => println!("{usage}"),
                }
            }
            let _ = event_tx.send(AppEvent::Console(ConsoleCommand::Quit));
        })
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_command("click refresh"),
            Ok(Some(ConsoleCommand::Click("refresh".to_string())))
        );
        assert_eq!(
            parse_command("  select stored 3 "),
            Ok(Some(ConsoleCommand::Select {
                group: "stored".to_string(),
                value: "3".to_string(),
            }))
        );
        assert_eq!(parse_command("show"), Ok(Some(ConsoleCommand::Show)));
        assert_eq!(parse_command("exit"), Ok(Some(ConsoleCommand::Quit)));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn type_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse_command("type url https://a.com, https://b.com"),
            Ok(Some(ConsoleCommand::Type {
                target: "url".to_string(),
                text: "https://a.com, https://b.com".to_string(),
            }))
        );
        assert_eq!(
            parse_command("type url"),
            Ok(Some(ConsoleCommand::Type {
                target: "url".to_string(),
                text: String::new(),
            }))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("click").is_err());
        assert!(parse_command("click a b").is_err());
        assert!(parse_command("select stored").is_err());
        assert!(parse_command("type").is_err());
        assert!(parse_command("jump").is_err());
    }
}
