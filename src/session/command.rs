//! Session Commands
//!
//! One command per input line.

use std::str::FromStr;

use crate::form::{FormField, UnknownField};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `set <field> <value>`; the value is the rest of the line
    Set(FormField, String),
    /// `clear <field>`
    Clear(FormField),
    Submit,
    Show,
    Chart,
    History,
    Help,
    Quit,
}

/// Why a line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Field(#[from] UnknownField),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None if rest.is_empty() => return Err(CommandError::MissingArgument("field")),
                    None => return Err(CommandError::MissingArgument("value")),
                };
                Ok(Command::Set(field.parse()?, value.to_string()))
            }
            "clear" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("field"));
                }
                Ok(Command::Clear(rest.parse()?))
            }
            "submit" | "predict" => Ok(Command::Submit),
            "show" => Ok(Command::Show),
            "chart" => Ok(Command::Chart),
            "history" => Ok(Command::History),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Usage text listing commands and the options of each select field
pub fn help_text() -> String {
    let mut out = String::from(
        "Commands:\n\
         \x20 set <field> <value>   fill a field (hour, day, doctor, patient)\n\
         \x20 clear <field>         empty a field\n\
         \x20 submit                ask the backend for an estimate\n\
         \x20 show                  redraw the screen\n\
         \x20 chart                 average wait per day\n\
         \x20 history               past predictions\n\
         \x20 help                  this text\n\
         \x20 quit                  leave\n",
    );

    for field in FormField::ALL {
        let options = field.options();
        if !options.is_empty() {
            out.push_str(&format!("  {}: {}\n", field.name(), options.join(", ")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        assert_eq!(
            "set day Monday".parse::<Command>().unwrap(),
            Command::Set(FormField::DayOfWeek, "Monday".to_string())
        );
        assert_eq!(
            "  SET hour   14  ".parse::<Command>().unwrap(),
            Command::Set(FormField::ArrivalHour, "14".to_string())
        );
    }

    #[test]
    fn test_set_keeps_raw_value() {
        assert_eq!(
            "set hour half past two".parse::<Command>().unwrap(),
            Command::Set(FormField::ArrivalHour, "half past two".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("set".parse::<Command>(), Err(CommandError::MissingArgument("field")));
        assert_eq!("set day".parse::<Command>(), Err(CommandError::MissingArgument("value")));
        assert_eq!("clear".parse::<Command>(), Err(CommandError::MissingArgument("field")));
        assert!(matches!("set ward 3".parse::<Command>(), Err(CommandError::Field(_))));
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("clear hour".parse::<Command>().unwrap(), Command::Clear(FormField::ArrivalHour));
        assert_eq!("submit".parse::<Command>().unwrap(), Command::Submit);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("?".parse::<Command>().unwrap(), Command::Help);
    }

    #[test]
    fn test_help_lists_options() {
        let help = help_text();
        assert!(help.contains("day_of_week: Monday, Tuesday"));
        assert!(help.contains("doctor_type: ANCHOR, FLOATING, LOCUM"));
    }
}
