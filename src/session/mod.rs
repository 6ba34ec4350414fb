//! Interactive Session
//!
//! Event loop that drives a [`FormController`] from three sources:
//!
//! - input lines, parsed into [`Command`]s
//! - clock ticks from a [`ClockTicker`]
//! - completions of in-flight prediction requests
//!
//! All three are funneled through one `select!` loop, so the controller is
//! only ever touched from a single task. Requests run on spawned tasks and
//! report back over a channel; the loop keeps ticking the clock meanwhile.

mod command;

pub use command::{help_text, Command, CommandError};

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::backend::{PredictRequest, Predictor};
use crate::controller::{FormController, SubmitOutcome};
use crate::error::PredictError;
use crate::ticker::ClockTicker;
use crate::ui::{self, ViewOptions};

/// Result of a finished request, paired with what was sent
pub type Completion = (PredictRequest, Result<f64, PredictError>);

/// What the loop should do after handling a command
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Print this text and keep going
    Print(String),
    /// Leave the loop
    Quit,
}

/// One interactive estimator session
pub struct Session {
    controller: FormController,
    predictor: Arc<dyn Predictor>,
    view: ViewOptions,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: Option<JoinHandle<()>>,
}

impl Session {
    pub fn new(predictor: Arc<dyn Predictor>, view: ViewOptions, now: DateTime<Local>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            controller: FormController::new(now),
            predictor,
            view,
            completions_tx,
            completions_rx,
            in_flight: None,
        }
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// Current screen
    pub fn screen(&self) -> String {
        ui::render(&self.controller, &self.view)
    }

    pub fn on_tick(&mut self, now: DateTime<Local>) {
        self.controller.tick(now);
    }

    /// Apply one command
    pub fn handle_command(&mut self, command: Command) -> Step {
        match command {
            Command::Set(field, value) => {
                self.controller.update_field(field, value);
                Step::Print(ui::view::render_form(&self.controller))
            }
            Command::Clear(field) => {
                self.controller.update_field(field, "");
                Step::Print(ui::view::render_form(&self.controller))
            }
            Command::Submit => self.start_submit(),
            Command::Show => Step::Print(self.screen()),
            Command::Chart => Step::Print(ui::reference_chart(self.view.chart_width)),
            Command::History => {
                if self.controller.history().is_empty() {
                    Step::Print("No predictions yet.\n".to_string())
                } else {
                    Step::Print(ui::view::render_history(self.controller.history()))
                }
            }
            Command::Help => Step::Print(help_text()),
            Command::Quit => Step::Quit,
        }
    }

    fn start_submit(&mut self) -> Step {
        match self.controller.begin_submit() {
            Ok(request) => {
                let predictor = Arc::clone(&self.predictor);
                let tx = self.completions_tx.clone();
                tracing::info!(backend = predictor.name(), "Submitting prediction request");

                self.in_flight = Some(tokio::spawn(async move {
                    let result = predictor.predict(&request).await;
                    // Receiver is gone only after the session is torn down
                    let _ = tx.send((request, result));
                }));

                Step::Print(ui::view::render_form(&self.controller))
            }
            Err(SubmitOutcome::Busy) => {
                Step::Print("A prediction is already in progress.\n".to_string())
            }
            Err(_) => Step::Print(ui::view::render_form(&self.controller)),
        }
    }

    /// Fold a finished request into the controller and return the new screen
    pub fn apply_completion(&mut self, (request, result): Completion) -> String {
        self.in_flight = None;
        self.controller.complete_submit(request, result);
        self.screen()
    }

    /// Wait for the next in-flight request to finish
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }

    /// Wait for the in-flight request, if any, and apply its result
    async fn finish_in_flight(&mut self) -> Option<String> {
        let handle = self.in_flight.take()?;
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "Prediction task did not complete");
        }

        match self.completions_rx.try_recv() {
            Ok(done) => Some(self.apply_completion(done)),
            Err(_) => None,
        }
    }

    /// Run until `quit` or end of input, ticking every `tick_period`.
    ///
    /// Returns the final controller state. At end of input a request still
    /// in flight is awaited and its result shown; `quit` aborts it instead.
    /// The ticker is stopped before returning.
    pub async fn run<R, W>(
        mut self,
        input: R,
        mut output: W,
        tick_period: Duration,
    ) -> std::io::Result<FormController>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (ticker, mut ticks) = ClockTicker::start(tick_period);
        let mut lines = input.lines();

        write_text(&mut output, &self.screen()).await?;
        write_text(&mut output, "Type `help` for commands.\n").await?;

        loop {
            tokio::select! {
                Some(now) = ticks.recv() => {
                    self.on_tick(now);
                }
                Some(done) = self.completions_rx.recv() => {
                    let screen = self.apply_completion(done);
                    write_text(&mut output, &screen).await?;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::debug!("Input closed");
                        if let Some(screen) = self.finish_in_flight().await {
                            write_text(&mut output, &screen).await?;
                        }
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    match line.parse::<Command>() {
                        Ok(command) => match self.handle_command(command) {
                            Step::Print(text) => write_text(&mut output, &text).await?,
                            Step::Quit => break,
                        },
                        Err(e) => {
                            write_text(&mut output, &format!("{}. Type `help` for commands.\n", e))
                                .await?;
                        }
                    }
                }
            }
        }

        if let Some(handle) = self.in_flight.take() {
            tracing::debug!("Aborting in-flight prediction request");
            handle.abort();
        }
        ticker.stop();
        Ok(self.controller)
    }
}

async fn write_text<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}
