use jobscan_engine::TabId;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  open <url>      open a page in a new tab
  go <url>        navigate the active tab
  switch <tab>    activate another tab
  close <tab>     close a tab
  tabs            list open tabs
  add <keyword>   add a keyword
  remove <kw>     remove a keyword
  check           check keywords in the active tab now
  auto on|off     toggle automatic re-checks
  list            show the panel again
  help            show this help
  quit            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(String),
    Navigate(String),
    Switch(TabId),
    Close(TabId),
    Tabs,
    Add(String),
    Remove(String),
    Check,
    Auto(bool),
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{command}` expects {expected}, got `{got}`")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
        got: String,
    },
}

/// Parses one line of user input. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "open" => Command::Open(required("open", rest)?),
        "go" | "navigate" => Command::Navigate(required("go", rest)?),
        "switch" => Command::Switch(tab_id("switch", rest)?),
        "close" => Command::Close(tab_id("close", rest)?),
        "tabs" => Command::Tabs,
        // Keywords keep inner whitespace: "visa support" is one keyword.
        "add" => Command::Add(required("add", rest)?),
        "remove" | "rm" => Command::Remove(required("remove", rest)?),
        "check" => Command::Check,
        "auto" => match rest.to_ascii_lowercase().as_str() {
            "on" => Command::Auto(true),
            "off" => Command::Auto(false),
            "" => return Err(ParseError::MissingArgument("auto")),
            other => {
                return Err(ParseError::BadArgument {
                    command: "auto",
                    expected: "`on` or `off`",
                    got: other.to_string(),
                })
            }
        },
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn required(command: &'static str, rest: &str) -> Result<String, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument(command))
    } else {
        Ok(rest.to_string())
    }
}

fn tab_id(command: &'static str, rest: &str) -> Result<TabId, ParseError> {
    let raw = required(command, rest)?;
    raw.parse().map_err(|_| ParseError::BadArgument {
        command,
        expected: "a tab number",
        got: raw,
    })
}
