//! Line commands understood by the driver.

use std::path::PathBuf;

use docview_lib::Modifiers;
use docview_lib::model::DocumentId;

/// Help text printed by `help`.
pub const HELP: &str = "\
commands:
  list                      show documents (* = selected, > = open)
  filter [category]         filter by category, or clear the filter
  sort <field>              sort by field; again to flip direction
  click <id> [ctrl] [shift] click a document
  open [id]                 open a document in detail, or close it
  enter | leave             drag enters / leaves the drop zone
  drop <path>...            drop files onto the view
  view                      toggle list/grid presentation
  help                      show this text
  quit                      exit";

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Filter(Option<String>),
    Sort(String),
    Click(DocumentId, Modifiers),
    Open(Option<DocumentId>),
    Enter,
    Leave,
    Drop(Vec<PathBuf>),
    ToggleView,
    Help,
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("unknown modifier '{0}', expected ctrl or shift")]
    Modifier(String),
}

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };

        let command = match name {
            "list" | "ls" => Self::List,
            "filter" => Self::Filter(words.next().map(String::from)),
            "sort" => Self::Sort(
                words
                    .next()
                    .ok_or(ParseError::MissingArgument("sort"))?
                    .to_string(),
            ),
            "click" => {
                let id = words.next().ok_or(ParseError::MissingArgument("click"))?;
                let mut modifiers = Modifiers::NONE;
                for word in words.flat_map(|w| w.split('+')) {
                    match word {
                        "ctrl" => modifiers.ctrl = true,
                        "shift" => modifiers.shift = true,
                        other => return Err(ParseError::Modifier(other.to_string())),
                    }
                }
                Self::Click(DocumentId::new(id), modifiers)
            }
            "open" => Self::Open(words.next().map(DocumentId::new)),
            "enter" => Self::Enter,
            "leave" => Self::Leave,
            "drop" => {
                let paths: Vec<PathBuf> = words.map(PathBuf::from).collect();
                if paths.is_empty() {
                    return Err(ParseError::MissingArgument("drop"));
                }
                Self::Drop(paths)
            }
            "view" => Self::ToggleView,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}
