//! Scripted feed clients for controller tests

#![allow(dead_code)] // Test utilities may not all be used by every test binary

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use shared::{Entry, SheetId};
use syncer::{FeedClient, FetchFailure};

/// One scripted response
#[derive(Clone, Debug)]
pub enum Step {
    Rows(Vec<Entry>),
    Fail(FetchFailure),
    /// Respond with the inner step after a delay
    Delayed(Duration, Box<Step>),
}

/// A recorded request
#[derive(Clone, Debug)]
pub struct FeedCall {
    pub sheet: SheetId,
    pub at: Instant,
}

#[derive(Default)]
struct Script {
    steps: HashMap<SheetId, VecDeque<Step>>,
    /// Step repeated once a sheet's queue is empty
    fallback: HashMap<SheetId, Step>,
    calls: Vec<FeedCall>,
}

/// Feed client answering from per-sheet scripts and recording every call
#[derive(Clone, Default)]
pub struct ScriptedFeed {
    script: Arc<Mutex<Script>>,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue steps for a sheet; the last step repeats forever
    pub fn with_steps(self, sheet: &str, steps: Vec<Step>) -> Self {
        {
            let mut script = self.script.lock().unwrap();
            if let Some(last) = steps.last() {
                script.fallback.insert(SheetId::new(sheet), last.clone());
            }
            script.steps.insert(SheetId::new(sheet), steps.into());
        }
        self
    }

    pub fn calls(&self) -> Vec<FeedCall> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().unwrap().calls.len()
    }

    /// Offsets of each call from the first one
    pub fn call_offsets(&self) -> Vec<Duration> {
        let calls = self.calls();
        match calls.first() {
            Some(first) => calls.iter().map(|c| c.at - first.at).collect(),
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl FeedClient for ScriptedFeed {
    async fn fetch_rows(&self, sheet: &SheetId) -> Result<Vec<Entry>, FetchFailure> {
        let step = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(FeedCall {
                sheet: sheet.clone(),
                at: Instant::now(),
            });
            let queued = script.steps.get_mut(sheet).and_then(|q| q.pop_front());
            queued
                .or_else(|| script.fallback.get(sheet).cloned())
                .unwrap_or(Step::Rows(Vec::new()))
        };

        run_step(step).await
    }
}

async fn run_step(mut step: Step) -> Result<Vec<Entry>, FetchFailure> {
    loop {
        match step {
            Step::Rows(rows) => return Ok(rows),
            Step::Fail(failure) => return Err(failure),
            Step::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                step = *inner;
            }
        }
    }
}

pub fn rows(pairs: &[(&str, &str)]) -> Vec<Entry> {
    pairs.iter().map(|(name, score)| Entry::new(*name, *score)).collect()
}

pub fn transport_failure() -> Step {
    Step::Fail(FetchFailure::Transport("connection refused".to_string()))
}

pub fn status_failure(status: u16) -> Step {
    Step::Fail(FetchFailure::HttpStatus {
        status,
        reason: String::new(),
    })
}
