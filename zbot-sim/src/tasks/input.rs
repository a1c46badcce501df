//! User input
//!
//! Commands arrive either line by line on stdin (read on a plain thread,
//! since stdin blocks) or from a `--script` replayed by an embassy task.
//!
//! Script syntax is a `;`-separated list of `@<ms> <command>` entries, e.g.
//! `@3600 start; @4000 select 2; @9000 preorder`. An entry without `@<ms>`
//! runs at the same time as the entry before it.

use embassy_time::{Duration, Instant, Timer};
use tracing::{debug, info, warn};
use zbot_core::site::{Section, StartTime, Weekday};
use zbot_core::timer::Millis;

use crate::channels::INPUT_CHANNEL;
use crate::error::{Result, SimError};

/// One user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Press "Scan & Clean"
    Start,
    /// Click a carousel stage
    Select(u8),
    /// Tour "Next"/"Finish"
    Next,
    /// Close the topmost overlay (story modal, then tour)
    Close,
    /// Flip a schedule day
    Toggle(Weekday),
    /// Set the schedule start time
    Time(StartTime),
    /// Press "Save Schedule"
    Save,
    /// "Read the design story"
    Story,
    /// Follow a navigation link
    Go(Section),
    /// Open the pre-order page
    Preorder,
    /// Back to the landing page
    Back,
    /// Hamburger menu
    Menu,
    /// Stop the simulator
    Quit,
}

impl Command {
    /// Parse one command line
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(SimError::UnknownCommand(String::new()));
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "select" => Command::Select(parse_arg("select", words.next(), |a| a.parse().ok())?),
            "next" => Command::Next,
            "close" => Command::Close,
            "toggle" => Command::Toggle(parse_arg("toggle", words.next(), Weekday::from_label)?),
            "time" => Command::Time(parse_arg("time", words.next(), StartTime::parse)?),
            "save" => Command::Save,
            "story" => Command::Story,
            "go" => Command::Go(parse_arg("go", words.next(), Section::from_name)?),
            "preorder" => Command::Preorder,
            "back" => Command::Back,
            "menu" => Command::Menu,
            "quit" | "exit" => Command::Quit,
            _ => return Err(SimError::UnknownCommand(name.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(SimError::BadArgument {
                command: command.name(),
                message: format!("unexpected `{}`", extra),
            });
        }
        Ok(command)
    }

    /// Command keyword
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Select(_) => "select",
            Command::Next => "next",
            Command::Close => "close",
            Command::Toggle(_) => "toggle",
            Command::Time(_) => "time",
            Command::Save => "save",
            Command::Story => "story",
            Command::Go(_) => "go",
            Command::Preorder => "preorder",
            Command::Back => "back",
            Command::Menu => "menu",
            Command::Quit => "quit",
        }
    }
}

fn parse_arg<T>(
    command: &'static str,
    arg: Option<&str>,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T> {
    let arg = arg.ok_or_else(|| SimError::BadArgument {
        command,
        message: "missing argument".to_string(),
    })?;
    parse(arg).ok_or_else(|| SimError::BadArgument {
        command,
        message: format!("cannot parse `{}`", arg),
    })
}

/// Parse a `--script` string into timed commands
///
/// Times must not go backwards.
pub fn parse_script(script: &str) -> Result<Vec<(Millis, Command)>> {
    let mut entries = Vec::new();
    let mut at_ms: Millis = 0;

    for entry in script.split([';', '\n']).map(str::trim) {
        if entry.is_empty() {
            continue;
        }

        let line = match entry.strip_prefix('@') {
            Some(rest) => {
                let (time, line) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let time: Millis = time.parse().map_err(|_| SimError::Script {
                    entry: entry.to_string(),
                    message: "bad time".to_string(),
                })?;
                if time < at_ms {
                    return Err(SimError::Script {
                        entry: entry.to_string(),
                        message: format!("time goes backwards from {} ms", at_ms),
                    });
                }
                at_ms = time;
                line
            }
            None => entry,
        };

        let command = Command::parse(line).map_err(|e| SimError::Script {
            entry: entry.to_string(),
            message: e.to_string(),
        })?;
        entries.push((at_ms, command));
    }

    Ok(entries)
}

/// Read commands from stdin on a background thread
///
/// Bad lines are reported and skipped. EOF sends `Quit`.
pub fn spawn_stdin_reader() -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("stdin".into())
        .spawn(|| {
            let stdin = std::io::stdin();
            let mut line = String::new();
            loop {
                line.clear();
                match stdin.read_line(&mut line) {
                    Ok(0) | Err(_) => break,
                    Ok(_) if line.trim().is_empty() => continue,
                    Ok(_) => match Command::parse(&line) {
                        Ok(command) => {
                            embassy_futures::block_on(INPUT_CHANNEL.send(command));
                            if command == Command::Quit {
                                return;
                            }
                        }
                        Err(e) => warn!("{}", e),
                    },
                }
            }
            embassy_futures::block_on(INPUT_CHANNEL.send(Command::Quit));
        })?;
    Ok(())
}

/// Replay scripted commands relative to `origin`
#[embassy_executor::task]
pub async fn script_task(origin: Instant, script: Vec<(Millis, Command)>) {
    info!("Script task started ({} commands)", script.len());

    for (at_ms, command) in script {
        Timer::at(origin + Duration::from_millis(at_ms)).await;
        debug!("Script @{} ms: {:?}", at_ms, command);
        INPUT_CHANNEL.send(command).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("start").unwrap(), Command::Start);
        assert_eq!(Command::parse("  NEXT ").unwrap(), Command::Next);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("menu").unwrap(), Command::Menu);
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(Command::parse("select 2").unwrap(), Command::Select(2));
        assert_eq!(
            Command::parse("toggle sat").unwrap(),
            Command::Toggle(Weekday::Sat)
        );
        assert_eq!(
            Command::parse("time 18:30").unwrap(),
            Command::Time(StartTime::new(18, 30).unwrap())
        );
        assert_eq!(Command::parse("go design").unwrap(), Command::Go(Section::Story));
        assert_eq!(Command::parse("story").unwrap(), Command::Story);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::parse("dance"),
            Err(SimError::UnknownCommand(name)) if name == "dance"
        ));
        assert!(matches!(
            Command::parse("select"),
            Err(SimError::BadArgument { command: "select", .. })
        ));
        assert!(matches!(
            Command::parse("select two"),
            Err(SimError::BadArgument { command: "select", .. })
        ));
        assert!(matches!(
            Command::parse("time 25:00"),
            Err(SimError::BadArgument { command: "time", .. })
        ));
        assert!(matches!(
            Command::parse("start now"),
            Err(SimError::BadArgument { command: "start", .. })
        ));
        assert!(matches!(
            Command::parse(""),
            Err(SimError::UnknownCommand(_))
        ));
        assert!(matches!(
            Command::parse("go specs"),
            Err(SimError::BadArgument { command: "go", .. })
        ));
    }

    #[test]
    fn test_no_argument_commands_reject_extra_words() {
        for line in ["start now", "save it", "quit please", "menu open", "story time"] {
            let name = line.split_whitespace().next().unwrap();
            match Command::parse(line) {
                Err(SimError::BadArgument { command, message }) => {
                    assert_eq!(command, name);
                    assert!(message.contains(line.split_whitespace().nth(1).unwrap()));
                }
                other => panic!("`{}` parsed as {:?}", line, other),
            }
        }
        assert!(matches!(
            Command::parse("select 1 2"),
            Err(SimError::BadArgument { command: "select", .. })
        ));
    }

    #[test]
    fn test_parse_script() {
        let script = parse_script("@3600 start; select 1;\n@4000 toggle tue; @9000 quit").unwrap();
        assert_eq!(
            script,
            vec![
                (3600, Command::Start),
                (3600, Command::Select(1)),
                (4000, Command::Toggle(Weekday::Tue)),
                (9000, Command::Quit),
            ]
        );
    }

    #[test]
    fn test_script_defaults_to_zero() {
        assert_eq!(parse_script("menu").unwrap(), vec![(0, Command::Menu)]);
        assert!(parse_script(" ; ;").unwrap().is_empty());
    }

    #[test]
    fn test_script_errors() {
        assert!(matches!(
            parse_script("@500 start; @100 next"),
            Err(SimError::Script { .. })
        ));
        assert!(matches!(parse_script("@soon start"), Err(SimError::Script { .. })));
        assert!(matches!(parse_script("@100 fly"), Err(SimError::Script { .. })));
    }
}
