//! Interactive session commands

use std::path::PathBuf;
use survey_domain::{GroupBy, QuestionId, Sentiment, SortSpec, SurveyColumn, ValidationError};
use thiserror::Error;

/// A parsed line of the interactive session
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Upload(Option<PathBuf>),
    Table,
    Next,
    Prev,
    Page(usize),
    /// `None` clears the sort
    Sort(Option<SortSpec>),
    Filter(String),
    ClearFilter,
    /// `None` shows all sentiments
    Sentiment(Option<Sentiment>),
    Question(QuestionId),
    Group(Option<GroupBy>),
    Chart,
    Summary,
    Dismiss,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  upload <file.csv>                 Upload survey responses
  table                             Show the current table page
  next, prev, page <n>              Move between table pages
  sort <column> [asc|desc]          Sort the table (sort off to clear)
  filter <text>                     Keep rows containing text
  clear-filter                      Remove the text filter
  sentiment <Positive|Negative|Neutral|all>
                                    Load records with one sentiment
  question <q1..q5>                 Select the question to chart
  group <gender|education_level|sentiment_label|age|none>
                                    Select the grouping field
  chart                             Chart the selected question
  summary                           Show the sentiment summary
  dismiss                           Clear the current message
  help                              Show this help
  quit                              Exit";

/// Why a line could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type help for a list)")]
    Unknown(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ReplCommand {
    /// Parse one input line; blank lines yield `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        if name.is_empty() {
            return Ok(None);
        }

        let command = match name.to_ascii_lowercase().as_str() {
            "upload" => ReplCommand::Upload((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "table" | "t" => ReplCommand::Table,
            "next" | "n" => ReplCommand::Next,
            "prev" | "p" => ReplCommand::Prev,
            "page" => {
                let page = rest
                    .parse::<usize>()
                    .map_err(|_| CommandError::MissingArgument("page <number>"))?;
                ReplCommand::Page(page)
            }
            "sort" => ReplCommand::Sort(Self::parse_sort(rest)?),
            "filter" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("filter <text>"));
                }
                ReplCommand::Filter(rest.to_string())
            }
            "clear-filter" => ReplCommand::ClearFilter,
            "sentiment" => ReplCommand::Sentiment(match rest {
                "" => {
                    return Err(CommandError::MissingArgument(
                        "sentiment <Positive|Negative|Neutral|all>",
                    ));
                }
                s if s.eq_ignore_ascii_case("all") => None,
                s => Some(s.parse()?),
            }),
            "question" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("question <q1..q5>"));
                }
                ReplCommand::Question(rest.parse()?)
            }
            "group" => ReplCommand::Group(GroupBy::parse_optional(rest)?),
            "chart" | "c" => ReplCommand::Chart,
            "summary" => ReplCommand::Summary,
            "dismiss" => ReplCommand::Dismiss,
            "help" | "h" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }

    fn parse_sort(args: &str) -> Result<Option<SortSpec>, CommandError> {
        const USAGE: &str = "sort <column> [asc|desc]";

        // Column labels may contain spaces ("Q1 Rating"), the direction is last
        let (column, descending) = match args.rsplit_once(char::is_whitespace) {
            Some((column, dir)) if dir.eq_ignore_ascii_case("desc") => (column.trim(), true),
            Some((column, dir)) if dir.eq_ignore_ascii_case("asc") => (column.trim(), false),
            _ => (args, false),
        };
        if column.is_empty() {
            return Err(CommandError::MissingArgument(USAGE));
        }
        if column.eq_ignore_ascii_case("off") || column.eq_ignore_ascii_case("none") {
            return Ok(None);
        }

        let column: SurveyColumn = column.parse()?;
        Ok(Some(if descending {
            SortSpec::descending(column)
        } else {
            SortSpec::ascending(column)
        }))
    }
}
