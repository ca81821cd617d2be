use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use taskgraph_explorer::api::client::{GraphSource, SourceFuture};
use taskgraph_explorer::api::model::{ExplorerSnapshot, RawTaskGraph, TaskResults};
use taskgraph_explorer::errors::ExplorerError;

#[derive(Debug, Clone)]
struct Scripted {
    delay: Duration,
    graph: Result<RawTaskGraph, String>,
}

/// A canned [`GraphSource`].
///
/// Each `task_graph()` call takes the next scripted response; the last one
/// repeats forever. `all_versions()` always answers immediately.
#[derive(Debug)]
pub struct StaticGraphSource {
    script: Mutex<VecDeque<Scripted>>,
    versions: Vec<TaskResults>,
    calls: AtomicUsize,
}

impl StaticGraphSource {
    pub fn new(snapshot: ExplorerSnapshot) -> Self {
        Self {
            script: Mutex::new(VecDeque::from([Scripted {
                delay: Duration::ZERO,
                graph: Ok(snapshot.task_graph),
            }])),
            versions: snapshot.versions,
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose task graph endpoint always fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::from([Scripted {
                delay: Duration::ZERO,
                graph: Err(message.to_string()),
            }])),
            versions: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Start from an empty script; add responses with [`Self::then`].
    pub fn scripted() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            versions: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Append a response delivered after `delay`.
    pub fn then(self, delay: Duration, graph: RawTaskGraph) -> Self {
        self.script.lock().unwrap().push_back(Scripted {
            delay,
            graph: Ok(graph),
        });
        self
    }

    /// Number of `task_graph()` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> Scripted {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap_or(Scripted {
                delay: Duration::ZERO,
                graph: Ok(RawTaskGraph::default()),
            })
        }
    }
}

impl GraphSource for StaticGraphSource {
    fn task_graph(&self) -> SourceFuture<'_, RawTaskGraph> {
        let response = self.next_response();
        Box::pin(async move {
            if !response.delay.is_zero() {
                tokio::time::sleep(response.delay).await;
            }
            response.graph.map_err(ExplorerError::Fetch)
        })
    }

    fn all_versions(&self) -> SourceFuture<'_, Vec<TaskResults>> {
        let versions = self.versions.clone();
        Box::pin(async move { Ok(versions) })
    }
}
