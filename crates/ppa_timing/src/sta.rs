//! Longest-path static timing analysis over a delay-annotated graph.
//!
//! Paths launch at registers and input ports and are captured at registers,
//! output ports and any signal without fanout. A bit slice of a register or
//! port is a boundary of the same kind as the signal it selects from. For each startpoint the
//! engine collects the region reachable without crossing a capture point,
//! orders it topologically and relaxes arrival times along it, keeping the
//! worst (largest) arrival at every node. Each reached endpoint then yields
//! one [`TimingPath`].
//!
//! Per-node scratch state lives in a [`TraversalContext`] side table indexed
//! by [`NodeId`] and is reset between startpoints, so no query observes the
//! state of another. A register that feeds itself is handled by giving the
//! launch its own slot, separate from the register's capture slot.

use ppa_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use ppa_graph::{NodeId, NodeIndex, NodeKind, SignalGraph};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::error::TimingError;
use crate::slack::PathBoundary;

/// One worst-case path from a startpoint to an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingPath {
    /// Logical startpoint, pin suffixes stripped.
    pub source: String,
    /// Logical endpoint, pin suffixes stripped.
    pub sink: String,
    /// Every node on the path, startpoint first.
    pub nodes: Vec<String>,
    /// Arrival time at the endpoint in ns.
    pub delay_ns: f64,
    /// Launch/capture class of the path.
    pub boundary: PathBoundary,
}

/// All paths of a design plus the wall-clock cost of finding them.
#[derive(Debug, Clone)]
pub struct StaResult {
    /// One path per reachable (startpoint, endpoint) pair.
    pub paths: Vec<TimingPath>,
    /// Duration of the analysis.
    pub runtime: Duration,
}

impl StaResult {
    /// Path delays in path order.
    pub fn delays(&self) -> Vec<f64> {
        self.paths.iter().map(|p| p.delay_ns).collect()
    }
}

/// Strips a trailing `_CK_` and then a trailing `_Q_` pin suffix.
fn logical_name(name: &str) -> &str {
    let name = name.strip_suffix("_CK_").unwrap_or(name);
    name.strip_suffix("_Q_").unwrap_or(name)
}

#[derive(Debug, Clone, Default)]
struct ArrivalSlot {
    visited: bool,
    at: f64,
    path: Vec<NodeId>,
}

/// Resettable per-startpoint arrival state for one graph.
pub struct TraversalContext {
    index: NodeIndex,
    /// Delay per id; `None` for unregistered names.
    delays: Vec<Option<Option<f64>>>,
    /// Boundary kind per id, see [`SignalGraph::timing_kind`].
    kinds: Vec<Option<NodeKind>>,
    fanout: Vec<Vec<NodeId>>,
    /// One slot per id, plus the launch slot at the end.
    slots: Vec<ArrivalSlot>,
    indegree: Vec<usize>,
    in_region: Vec<bool>,
    touched: Vec<usize>,
}

impl TraversalContext {
    /// Indexes `graph` and allocates empty scratch state.
    pub fn new(graph: &SignalGraph) -> Self {
        let index = NodeIndex::build(graph);
        let n = index.len();
        let mut delays = vec![None; n];
        let mut kinds = vec![None; n];
        let mut fanout = vec![Vec::new(); n];

        for i in 0..n {
            let id = NodeId::from_raw(i as u32);
            let name = index.name(id);
            if let Some(node) = graph.node(name) {
                delays[i] = Some(node.delay);
                kinds[i] = graph.timing_kind(name);
            }
            fanout[i] = graph
                .get_neighbors(name)
                .iter()
                .filter_map(|v| index.id(v))
                .collect();
        }

        Self {
            index,
            delays,
            kinds,
            fanout,
            slots: vec![ArrivalSlot::default(); n + 1],
            indegree: vec![0; n + 1],
            in_region: vec![false; n + 1],
            touched: Vec::new(),
        }
    }

    fn launch_slot(&self) -> usize {
        self.slots.len() - 1
    }

    fn name(&self, id: NodeId) -> &str {
        self.index.name(id)
    }

    fn delay(&self, id: NodeId) -> Result<f64, TimingError> {
        match self.delays[id.index()] {
            None => Err(TimingError::UnknownNode {
                node: self.name(id).to_string(),
            }),
            Some(None) => Err(TimingError::MissingDelay {
                node: self.name(id).to_string(),
            }),
            Some(Some(d)) => Ok(d),
        }
    }

    /// Returns `true` if paths stop at `id`.
    fn is_endpoint(&self, id: NodeId) -> bool {
        self.fanout[id.index()].is_empty()
            || self.kinds[id.index()].is_some_and(NodeKind::captures_paths)
    }

    /// Returns `true` if paths start at `id`.
    fn is_startpoint(&self, id: NodeId) -> bool {
        !self.fanout[id.index()].is_empty()
            && self.kinds[id.index()].is_some_and(NodeKind::launches_paths)
    }

    fn reset(&mut self) {
        for slot in self.touched.drain(..) {
            self.slots[slot] = ArrivalSlot::default();
            self.indegree[slot] = 0;
            self.in_region[slot] = false;
        }
    }

    fn touch(&mut self, slot: usize) {
        if !self.in_region[slot] {
            self.in_region[slot] = true;
            self.touched.push(slot);
        }
    }

    /// Marks everything reachable from the launch of `start` without
    /// expanding endpoints and counts in-region fan-in.
    fn collect_region(&mut self, start: NodeId) {
        let launch = self.launch_slot();
        self.touch(launch);
        let mut stack: Vec<NodeId> = Vec::new();
        for i in 0..self.fanout[start.index()].len() {
            let v = self.fanout[start.index()][i];
            self.indegree[v.index()] += 1;
            if !self.in_region[v.index()] {
                self.touch(v.index());
                stack.push(v);
            }
        }
        while let Some(u) = stack.pop() {
            if self.is_endpoint(u) {
                continue;
            }
            for i in 0..self.fanout[u.index()].len() {
                let v = self.fanout[u.index()][i];
                self.indegree[v.index()] += 1;
                if !self.in_region[v.index()] {
                    self.touch(v.index());
                    stack.push(v);
                }
            }
        }
    }

    /// Offers an arrival of `incoming` via `path` to `v`.
    ///
    /// The first offer sets `AT = incoming + delay`. Later offers replace the
    /// arrival only if they are strictly later, so `AT` never decreases and
    /// the delay of `v` is counted once.
    fn relax(&mut self, v: NodeId, incoming: f64, path: &[NodeId]) -> Result<(), TimingError> {
        let d = self.delay(v)?;
        let slot = &mut self.slots[v.index()];
        if !slot.visited || slot.at - d < incoming {
            slot.visited = true;
            slot.at = incoming + d;
            slot.path.clear();
            slot.path.extend_from_slice(path);
            slot.path.push(v);
        }
        Ok(())
    }

    /// Closes the path of `slot` at `id`, appending it if it is not already
    /// the last node.
    fn finish(&mut self, slot: usize, id: NodeId) -> Result<(f64, Vec<NodeId>), TimingError> {
        let d = self.delay(id)?;
        let s = &mut self.slots[slot];
        if s.path.last() != Some(&id) {
            s.path.push(id);
            s.at += d;
        }
        Ok((s.at, s.path.clone()))
    }

    /// Computes the worst path from `start` to every endpoint it reaches.
    pub fn analyze_from(&mut self, start: NodeId) -> Result<Vec<TimingPath>, TimingError> {
        self.reset();
        if !self.is_startpoint(start) {
            return Ok(Vec::new());
        }
        self.collect_region(start);

        let launch = self.launch_slot();
        self.slots[launch].visited = true;
        let (launch_at, launch_path) = self.finish(launch, start)?;
        for i in 0..self.fanout[start.index()].len() {
            let v = self.fanout[start.index()][i];
            self.relax(v, launch_at, &launch_path)?;
        }

        // Kahn order over the region; nodes on an unbroken cycle never
        // become ready and are left unexpanded.
        let mut ready: VecDeque<NodeId> = VecDeque::new();
        let mut endpoints: Vec<NodeId> = Vec::new();
        for i in 0..self.fanout[start.index()].len() {
            let v = self.fanout[start.index()][i];
            self.indegree[v.index()] -= 1;
            if self.indegree[v.index()] == 0 {
                ready.push_back(v);
            }
        }
        while let Some(u) = ready.pop_front() {
            if self.is_endpoint(u) {
                endpoints.push(u);
                continue;
            }
            let at = self.slots[u.index()].at;
            let path = self.slots[u.index()].path.clone();
            for i in 0..self.fanout[u.index()].len() {
                let v = self.fanout[u.index()][i];
                self.relax(v, at, &path)?;
                self.indegree[v.index()] -= 1;
                if self.indegree[v.index()] == 0 {
                    ready.push_back(v);
                }
            }
        }

        let launch_kind = self.kinds[start.index()];
        let mut paths = Vec::with_capacity(endpoints.len());
        for end in endpoints {
            let (delay_ns, ids) = self.finish(end.index(), end)?;
            let boundary = PathBoundary::classify(launch_kind, self.kinds[end.index()]);
            let nodes: Vec<String> = ids.iter().map(|&id| self.name(id).to_string()).collect();
            paths.push(TimingPath {
                source: logical_name(self.name(start)).to_string(),
                sink: logical_name(self.name(end)).to_string(),
                nodes,
                delay_ns,
                boundary,
            });
        }
        Ok(paths)
    }

    /// Runs [`Self::analyze_from`] for every startpoint in name order.
    pub fn analyze_all(&mut self) -> Result<Vec<TimingPath>, TimingError> {
        let mut starts: Vec<NodeId> = (0..self.index.len())
            .map(|i| NodeId::from_raw(i as u32))
            .filter(|&id| self.is_startpoint(id))
            .collect();
        starts.sort_by(|a, b| self.name(*a).cmp(self.name(*b)));

        let mut paths = Vec::new();
        for start in starts {
            paths.extend(self.analyze_from(start)?);
        }
        self.reset();
        Ok(paths)
    }
}

/// Finds every timing path of a delay-annotated graph.
///
/// Fails if a traversed signal is unregistered or has no delay. Emits a
/// `T001` note with the runtime and path count.
pub fn analyze_paths(graph: &SignalGraph, sink: &DiagnosticSink) -> Result<StaResult, TimingError> {
    let started = Instant::now();
    let paths = TraversalContext::new(graph).analyze_all()?;
    let runtime = started.elapsed();

    sink.emit(Diagnostic::note(
        DiagnosticCode::new(Category::Timing, 1),
        format!(
            "static timing analysis found {} path(s) in {:.2}s",
            paths.len(),
            runtime.as_secs_f64()
        ),
    ));
    Ok(StaResult { paths, runtime })
}
