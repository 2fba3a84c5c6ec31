use std::sync::Arc;
use std::sync::mpsc::Sender;

use anyhow::Result;
use log::debug;
use tokio::runtime::Handle;

use crate::api::MovieApi;
use crate::controller::{Completion, Effect, Slot};
use crate::generation::Generation;
use crate::launcher;
use crate::models::SearchResultSet;

/// Reports a fetch's outcome exactly once. If the task is dropped or panics
/// before reporting, the slot still hears back, so loading never sticks.
struct InFlight {
    completions: Sender<Completion>,
    slot: Slot,
    generation: Generation,
    reported: bool,
}

impl InFlight {
    fn report(mut self, completion: Completion) {
        self.reported = true;
        if self.completions.send(completion).is_err() {
            debug!("[Executor] UI gone, dropping {:?} {}", self.slot, self.generation);
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.reported {
            let _ = self.completions.send(Completion::Interrupted {
                slot: self.slot,
                generation: self.generation,
            });
        }
    }
}

/// Carries out controller effects that leave the process: network fetches
/// on the runtime and links handed to the browser.
pub struct Executor {
    api: Arc<dyn MovieApi>,
    runtime: Handle,
    completions: Sender<Completion>,
    opener: String,
}

impl Executor {
    pub fn new(
        api: Arc<dyn MovieApi>,
        runtime: Handle,
        completions: Sender<Completion>,
        opener: &str,
    ) -> Self {
        Self {
            api,
            runtime,
            completions,
            opener: opener.to_string(),
        }
    }

    fn in_flight(&self, slot: Slot, generation: Generation) -> InFlight {
        InFlight {
            completions: self.completions.clone(),
            slot,
            generation,
            reported: false,
        }
    }

    pub fn execute(&self, effect: Effect) -> Result<()> {
        let api = Arc::clone(&self.api);
        match effect {
            Effect::FetchTrending { generation } => {
                let guard = self.in_flight(Slot::Trending, generation);
                self.runtime.spawn(async move {
                    let result = api.trending().await;
                    guard.report(Completion::Trending { generation, result });
                });
            }
            Effect::FetchSearch {
                generation,
                query,
                top_k,
            } => {
                let guard = self.in_flight(Slot::Session, generation);
                self.runtime.spawn(async move {
                    let result = api.search(&query, top_k).await;
                    guard.report(Completion::Session { generation, result });
                });
            }
            Effect::FetchRecommendations { generation, genre } => {
                let guard = self.in_flight(Slot::Session, generation);
                self.runtime.spawn(async move {
                    let result = api
                        .recommendations(&genre)
                        .await
                        .map(|movies| SearchResultSet::recommendations(&genre, movies));
                    guard.report(Completion::Session { generation, result });
                });
            }
            Effect::FetchMovie { generation, id } => {
                let guard = self.in_flight(Slot::Detail, generation);
                self.runtime.spawn(async move {
                    let result = api.movie(&id).await;
                    guard.report(Completion::Movie { generation, result });
                });
            }
            Effect::FetchTrailer { generation, id } => {
                let guard = self.in_flight(Slot::Trailer, generation);
                self.runtime.spawn(async move {
                    let result = api.trailer(&id).await;
                    guard.report(Completion::Trailer { generation, result });
                });
            }
            Effect::OpenUrl(url) => {
                launcher::validate_url(&url)?;
                let opener = launcher::detect_opener(&self.opener)?;
                launcher::open_url(&opener, &url)?;
            }
            Effect::ScrollToTop | Effect::ClearQueryInput => {
                debug!("[Executor] ignoring UI effect {:?}", effect);
            }
        }
        Ok(())
    }
}
