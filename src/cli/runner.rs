use crate::{
    cli::Args,
    console::{ConsoleProbe, TerminalProbe},
    error::Result,
    prompt::{parse_bool, Prompt},
    runtime::{Backend, CrosstermBackend},
};
use serde::Serialize;

/// Result of one prompt invocation, as printed by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub title: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
}

/// Runs a single prompt and reports its result on stdout
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    pub fn run(self) -> Result<()> {
        let outcome = self.ask(&TerminalProbe, CrosstermBackend::stderr())?;
        println!("{}", self.render(&outcome)?);
        Ok(())
    }

    /// Asks the question on the given backend
    pub fn ask<P, B>(&self, probe: &P, backend: B) -> Result<Outcome>
    where
        P: ConsoleProbe + ?Sized,
        B: Backend,
    {
        let mut prompt = Prompt::new(self.args.prompt_config());
        let answer = prompt.answer_with(probe, backend)?;

        if let Some(err) = prompt.last_error() {
            log::warn!("Prompt finished after an internal error: {err}");
        }

        let confirmed = self.args.yes_no.then(|| parse_bool(&answer));
        Ok(Outcome { title: prompt.title().to_string(), answer, confirmed })
    }

    /// Formats the outcome the way the flags ask for
    pub fn render(&self, outcome: &Outcome) -> Result<String> {
        if self.args.json {
            return Ok(serde_json::to_string(outcome)?);
        }

        Ok(match outcome.confirmed {
            Some(confirmed) => confirmed.to_string(),
            None => outcome.answer.clone(),
        })
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<()> {
    let runner = Runner::new(args);
    runner.run()
}
