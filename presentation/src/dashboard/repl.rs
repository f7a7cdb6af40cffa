//! Interactive dashboard session

use super::command::{HELP, ReplCommand};
use crate::config::ReplConfig;
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use survey_application::{DashboardAction, DashboardController, SurveyGateway};
use tracing::{debug, warn};

/// Entries kept in the history file
const HISTORY_CAPACITY: usize = 500;

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Line-editor front end for a [`DashboardController`]
pub struct DashboardRepl<G: SurveyGateway + 'static> {
    controller: DashboardController<G>,
    formatter: Box<dyn OutputFormatter + Send + Sync>,
    config: ReplConfig,
}

impl<G: SurveyGateway + 'static> DashboardRepl<G> {
    pub fn new(
        controller: DashboardController<G>,
        formatter: Box<dyn OutputFormatter + Send + Sync>,
    ) -> Self {
        Self {
            controller,
            formatter,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = self.config.history_path() else {
            return editor;
        };
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("History disabled, cannot create {}: {}", parent.display(), e);
            return editor;
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History disabled: {}", e);
                editor
            }
        }
    }

    /// Run the interactive session until `quit` or Ctrl-D
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("survey".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        // Whatever the backend already holds is shown right away
        if self.controller.refresh_surveys().await && self.controller.state().has_data() {
            self.print_table();
        }
        self.print_notice();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if self.handle_line(&line).await == Flow::Exit {
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Parse and execute one line
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        match ReplCommand::parse(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Flow::Continue,
            Err(e) => {
                println!("{}", e.to_string().yellow());
                Flow::Continue
            }
        }
    }

    async fn execute(&mut self, command: ReplCommand) -> Flow {
        debug!("Executing {:?}", command);
        match command {
            ReplCommand::Upload(path) => {
                if self.controller.upload(path.as_deref()).await {
                    self.print_notice();
                    self.print_table();
                    self.visualize().await;
                    return Flow::Continue;
                }
            }
            ReplCommand::Table => self.print_table(),
            ReplCommand::Next => self.navigate(DashboardAction::NextPage),
            ReplCommand::Prev => self.navigate(DashboardAction::PrevPage),
            ReplCommand::Page(page) => self.navigate(DashboardAction::GoToPage(page)),
            ReplCommand::Sort(sort) => self.navigate(DashboardAction::SortBy(sort)),
            ReplCommand::Filter(text) => self.navigate(DashboardAction::SetTableFilter(Some(text))),
            ReplCommand::ClearFilter => self.navigate(DashboardAction::SetTableFilter(None)),
            ReplCommand::Sentiment(sentiment) => {
                if self.controller.set_sentiment_filter(sentiment).await {
                    self.print_table();
                }
            }
            ReplCommand::Question(question) => {
                self.controller.select_question(question);
                println!("{} {}", "Question:".cyan().bold(), question.title());
                self.visualize().await;
            }
            ReplCommand::Group(group_by) => {
                self.controller.select_group_by(group_by);
                println!(
                    "{} {}",
                    "Grouping:".cyan().bold(),
                    group_by.map_or("Overall", |g| g.label())
                );
                self.visualize().await;
            }
            ReplCommand::Chart => {
                if self.controller.visualize().await
                    && let Some(panel) = self.controller.state().chart()
                {
                    println!("{}", self.formatter.format_chart(panel));
                }
            }
            ReplCommand::Summary => {
                println!(
                    "{}",
                    self.formatter
                        .format_summary(&self.controller.sentiment_summary())
                );
            }
            ReplCommand::Dismiss => {
                self.controller.dismiss_notice();
                return Flow::Continue;
            }
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Quit => {
                println!("Bye!");
                return Flow::Exit;
            }
        }

        self.print_notice();
        Flow::Continue
    }

    /// Charts follow the selection once data is present
    async fn visualize(&mut self) {
        if !self.controller.state().has_data() {
            return;
        }
        if self.controller.visualize().await
            && let Some(panel) = self.controller.state().chart()
        {
            println!("{}", self.formatter.format_chart(panel));
        }
    }

    fn navigate(&mut self, action: DashboardAction) {
        self.controller.dispatch(action);
        self.print_table();
    }

    fn print_table(&self) {
        let state = self.controller.state();
        println!(
            "{}",
            self.formatter
                .format_table(&state.table_page(), state.table_query())
        );
    }

    fn print_notice(&self) {
        if let Some(notice) = self.controller.state().notice() {
            println!("{}", self.formatter.format_notice(notice));
        }
    }

    pub fn controller(&self) -> &DashboardController<G> {
        &self.controller
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│       Survey Dashboard - Interactive        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("{}", HELP);
        println!();
    }
}
