//! Line grammar shared by the interactive shell and the script runner.

use crate::error::NavError;
use crate::flow::FlowSignal;
use crate::state::{Event, EventKind, NavigationIntent, Screen};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::time::Duration;

/// Help text for the command grammar.
pub const HELP: &str = indoc::indoc! {"
    navigate <screen>               tab or generic navigation
    back                            go back
    child <screen>                  push a settings sub-screen
    detail <id> <kind> <time> <title...>
                                    open an event (kind: coffee|workout|meal|swim|fueling)
    expand [screen]                 open the full-day list (from home by default)
    daily <YYYY-MM-DD>              zoom from the calendar into a day
    date <YYYY-MM-DD>               select a calendar date
    modal open|close                overlay opened/closed on the active screen
    focus on|off                    home input focus
    flow <signal> [arg]             onboarding/auth/settings step, e.g. flow get-started
    wait <ms>                       let time pass
    show                            print the full snapshot as JSON
    quit                            exit
"};

/// One parsed line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Intent(NavigationIntent),
    Wait(Duration),
    Show,
    Help,
    Quit,
}

pub fn parse_date(s: &str) -> Result<NaiveDate, NavError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| NavError::UnknownDate(s.to_string()))
}

fn parse_switch(arg: Option<&str>, on: &str, off: &str) -> Result<bool> {
    match arg {
        Some(a) if a == on => Ok(true),
        Some(a) if a == off => Ok(false),
        _ => bail!("expected '{}' or '{}'", on, off),
    }
}

fn required<'a>(arg: Option<&'a str>, what: &str) -> Result<&'a str> {
    arg.with_context(|| format!("missing {}", what))
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match verb {
        "navigate" | "nav" => {
            let screen: Screen = required(arg, "screen")?.parse()?;
            ShellCommand::Intent(NavigationIntent::Navigate(screen))
        }
        "back" => ShellCommand::Intent(NavigationIntent::Back),
        "child" => {
            let screen: Screen = required(arg, "screen")?.parse()?;
            ShellCommand::Intent(NavigationIntent::PushChild(screen))
        }
        "detail" => {
            let id = required(arg, "event id")?;
            let kind_name = required(words.next(), "event kind")?;
            let kind = EventKind::parse(kind_name)
                .with_context(|| format!("Unknown event kind: {}", kind_name))?;
            let time = required(words.next(), "event time")?;
            let title = words.collect::<Vec<_>>().join(" ");
            if title.is_empty() {
                bail!("missing event title");
            }
            ShellCommand::Intent(NavigationIntent::SelectEvent(Event::new(id, title, time, kind)))
        }
        "expand" => {
            let from = arg.map(|s| s.parse::<Screen>()).transpose()?;
            ShellCommand::Intent(NavigationIntent::Expand(from.unwrap_or(Screen::Home)))
        }
        "daily" => {
            let date = parse_date(required(arg, "date")?)?;
            ShellCommand::Intent(NavigationIntent::OpenDailyView(date))
        }
        "date" => {
            let date = parse_date(required(arg, "date")?)?;
            ShellCommand::Intent(NavigationIntent::SelectDate(date))
        }
        "modal" => ShellCommand::Intent(NavigationIntent::ModalStateChange(parse_switch(
            arg, "open", "close",
        )?)),
        "focus" => ShellCommand::Intent(NavigationIntent::InputFocus(parse_switch(
            arg, "on", "off",
        )?)),
        "flow" => {
            let name = required(arg, "flow signal")?;
            let signal_arg = words.next();
            let signal = FlowSignal::parse(name, signal_arg)
                .with_context(|| format!("Unknown flow signal: {}", line))?;
            ShellCommand::Intent(NavigationIntent::Flow(signal))
        }
        "wait" => {
            let ms: u64 = required(arg, "milliseconds")?
                .parse()
                .context("wait expects milliseconds")?;
            ShellCommand::Wait(Duration::from_millis(ms))
        }
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => bail!("Unknown command: {}", other),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ShellCommand {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# setup").unwrap(), None);
    }

    #[test]
    fn test_navigate() {
        assert_eq!(
            parse("navigate calendar"),
            ShellCommand::Intent(NavigationIntent::Navigate(Screen::Calendar))
        );
        assert!(parse_line("navigate dashboard").is_err());
        assert!(parse_line("navigate").is_err());
    }

    #[test]
    fn test_detail() {
        match parse("detail evt-7 workout 6:00 Tempo run") {
            ShellCommand::Intent(NavigationIntent::SelectEvent(event)) => {
                assert_eq!(event.id, "evt-7");
                assert_eq!(event.kind, EventKind::Workout);
                assert_eq!(event.title, "Tempo run");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_line("detail evt-7 nap 6:00 Rest").is_err());
        assert!(parse_line("detail evt-7 meal 6:00").is_err());
    }

    #[test]
    fn test_daily_and_wait() {
        assert_eq!(
            parse("daily 2020-06-04"),
            ShellCommand::Intent(NavigationIntent::OpenDailyView(
                NaiveDate::from_ymd_opt(2020, 6, 4).unwrap()
            ))
        );
        assert!(parse_line("daily June-4").is_err());
        assert_eq!(parse("wait 250"), ShellCommand::Wait(Duration::from_millis(250)));
    }

    #[test]
    fn test_switches() {
        assert_eq!(
            parse("modal open"),
            ShellCommand::Intent(NavigationIntent::ModalStateChange(true))
        );
        assert_eq!(
            parse("focus off"),
            ShellCommand::Intent(NavigationIntent::InputFocus(false))
        );
        assert!(parse_line("modal maybe").is_err());
    }

    #[test]
    fn test_flow() {
        assert_eq!(
            parse("flow account-created a@b.c"),
            ShellCommand::Intent(NavigationIntent::Flow(FlowSignal::AccountCreated {
                email: "a@b.c".to_string()
            }))
        );
        assert!(parse_line("flow warp").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_line("teleport home").is_err());
    }
}
