use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use tracing::{debug, info, warn};

use crate::{
    cli::{Config, OutputFormat, SourceConfig},
    errors::CovError,
    presenter::{JsonPresenter, Presenter, Screen, TerminalPresenter},
    session::{Session, SessionState},
    source::{CoverageSource, FileSource, HttpSource},
    view::ViewState,
};

use super::{
    Runner,
    interactive::{Action, HELP, parse_action},
};

const PROMPT: &str = "> ";

fn screen<'a>(session: &'a Session, state: &'a ViewState) -> Screen<'a> {
    match session.state() {
        SessionState::Loading => Screen::Loading {
            source: session.source_name(),
        },
        SessionState::Failed(error) => Screen::Failed {
            source: session.source_name(),
            error,
        },
        SessionState::Ready(report) => Screen::Ready(state.derive(report)),
        SessionState::Stale { report, error } => Screen::Stale {
            source: session.source_name(),
            error,
            view: state.derive(report),
        },
    }
}

pub struct DashboardRunner {
    config: Config,
}

impl DashboardRunner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn source(&self) -> Arc<dyn CoverageSource> {
        match &self.config.source {
            SourceConfig::Http { base_url } => Arc::new(HttpSource::new(base_url)),
            SourceConfig::File { path } => Arc::new(FileSource::new(path.clone())),
        }
    }

    fn presenter(&self) -> Box<dyn Presenter> {
        match self.config.format {
            OutputFormat::Text => Box::new(TerminalPresenter::new(self.config.color)),
            OutputFormat::Json => Box::new(JsonPresenter),
        }
    }

    fn initial_state(&self) -> ViewState {
        let mut state = ViewState::new();
        if let Some(query) = self.config.query.as_deref() {
            state.set_search_query(query);
        }
        if let Some(index) = self.config.expand {
            state.toggle_expanded(index);
        }
        state
    }

    fn load<W: Write>(
        &self,
        session: &mut Session,
        presenter: &dyn Presenter,
        output: &mut W,
    ) -> Result<(), CovError> {
        if self.config.interactive && !session.poll() {
            let loading = Screen::Loading {
                source: session.source_name(),
            };
            write!(output, "{}", presenter.render(&loading))?;
            output.flush()?;
        }
        session.wait();
        Ok(())
    }

    /// Prompt and command feedback only go to `output` in text mode, so a
    /// JSON session writes nothing but documents there.
    fn prompt<W: Write>(&self, output: &mut W, message: &str) -> Result<(), CovError> {
        match self.config.format {
            OutputFormat::Text => write!(output, "{}{}", message, PROMPT)?,
            OutputFormat::Json if !message.trim().is_empty() => eprint!("{}", message),
            OutputFormat::Json => {}
        }
        output.flush()?;
        Ok(())
    }

    /// Runs one dashboard session against `source`. Fetch failures are
    /// rendered, not returned; only I/O on `input`/`output` can fail here.
    pub fn run_with<R: BufRead, W: Write>(
        &self,
        source: Arc<dyn CoverageSource>,
        input: R,
        output: &mut W,
    ) -> Result<(), CovError> {
        let presenter = self.presenter();
        let mut state = self.initial_state();
        let mut session = Session::start(source);
        self.load(&mut session, presenter.as_ref(), output)?;
        write!(output, "{}", presenter.render(&screen(&session, &state)))?;

        if !self.config.interactive {
            return Ok(());
        }

        self.prompt(output, "\n")?;
        for line in input.lines() {
            let action = parse_action(&line?);
            debug!(?action, "dashboard command");
            match action {
                Action::Search(query) => state.set_search_query(&query),
                Action::Toggle(index) => state.toggle_expanded(index),
                Action::Reload => {
                    info!(source = %session.source_name(), "reloading coverage analysis");
                    session.reload();
                    self.load(&mut session, presenter.as_ref(), output)?;
                }
                Action::Redraw => {}
                Action::Help => {
                    self.prompt(output, HELP)?;
                    continue;
                }
                Action::Quit => break,
                Action::Invalid(message) => {
                    warn!(%message, "ignoring dashboard command");
                    self.prompt(output, &format!("{} (type 'help' for commands)\n", message))?;
                    continue;
                }
            }
            write!(output, "{}", presenter.render(&screen(&session, &state)))?;
            self.prompt(output, "\n")?;
        }
        Ok(())
    }
}

impl Runner for DashboardRunner {
    fn run(&self) -> Result<(), CovError> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.run_with(self.source(), stdin.lock(), &mut stdout)
    }
}
