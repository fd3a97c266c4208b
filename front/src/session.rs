use crate::{error::UploadError, utils::MIB};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Starting,
    InProgress,
    Success,
    Failed,
}

/// What the transport reported. `elapsed` is in seconds since the request
/// was sent, so the transitions stay testable without a clock.
pub enum Event<'a> {
    Started,
    Progress { loaded: f64, total: f64, elapsed: f64 },
    Finished { status: u16, body: &'a str },
    ConnectionLost,
}

/// What the UI should do after a transition. Fields left `None` keep their
/// previous on-screen value.
#[derive(Debug, Default, PartialEq)]
pub struct Effect {
    pub bar: Option<f64>,
    pub status: Option<String>,
    pub error: Option<UploadError>,
    pub reload: bool,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Lifecycle of one upload attempt: Idle → Starting → InProgress →
/// {Success, Failed}. Events that don't fit the current phase are ignored,
/// which also covers stray progress ticks arriving after completion.
pub struct Session {
    phase: Phase,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// A request is currently on the wire.
    pub fn active(&self) -> bool {
        matches!(self.phase, Phase::Starting | Phase::InProgress)
    }

    pub fn apply(&mut self, event: Event) -> Effect {
        match (self.phase, event) {
            (Phase::Idle | Phase::Failed, Event::Started) => {
                self.phase = Phase::Starting;
                Effect {
                    bar: Some(0.0),
                    status: Some(String::from("Starting upload...")),
                    ..Effect::default()
                }
            }
            (
                Phase::Starting | Phase::InProgress,
                Event::Progress {
                    loaded,
                    total,
                    elapsed,
                },
            ) => {
                self.phase = Phase::InProgress;
                Effect {
                    bar: Some(loaded / total * 100.0),
                    status: Some(progress_line(loaded, total, elapsed)),
                    ..Effect::default()
                }
            }
            (Phase::Starting | Phase::InProgress, Event::Finished { status, body }) => {
                if status == 200 {
                    self.phase = Phase::Success;
                    Effect {
                        bar: Some(100.0),
                        status: Some(String::from("Upload complete! Processing...")),
                        reload: true,
                        ..Effect::default()
                    }
                } else {
                    self.phase = Phase::Failed;
                    Effect {
                        status: Some(String::from("Error uploading file.")),
                        error: Some(server_error(status, body)),
                        ..Effect::default()
                    }
                }
            }
            (Phase::Starting | Phase::InProgress, Event::ConnectionLost) => {
                self.phase = Phase::Failed;
                Effect {
                    status: Some(String::from("Network error occurred.")),
                    error: Some(UploadError::Network),
                    ..Effect::default()
                }
            }
            _ => Effect::default(),
        }
    }
}

fn progress_line(loaded: f64, total: f64, elapsed: f64) -> String {
    let percent = loaded / total * 100.0;
    let speed = if elapsed > 0.0 {
        loaded / MIB / elapsed
    } else {
        0.0
    };

    format!(
        "Uploading... {:.2}MB / {:.2}MB ({percent:.0}%) at {speed:.2} MB/s",
        loaded / MIB,
        total / MIB,
    )
}

fn server_error(status: u16, body: &str) -> UploadError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error);

    UploadError::Server { status, message }
}
