//! The top-level resampling engine.
//!
//! [`PlotResampler`] owns the trace registry, the per-session view state and
//! the algorithm table. A host registers each trace once with its
//! full-resolution data, forwards viewport-change events, and hands every
//! emitted [`TraceUpdate`] to its renderer. The engine itself holds no
//! rendering state.

use std::sync::mpsc::Receiver;

use crate::config::ResamplerConfig;
use crate::data::hf::HfStore;
use crate::data::traces::{
    AxisGroup, DownsamplerSpec, TraceConfig, TraceEntry, TraceId, TraceOptions, TraceRegistry,
};
use crate::downsample::AlgorithmTable;
use crate::error::ResampleError;
use crate::events::{EventOutcome, ViewEvent};
use crate::view::{recompute, TraceUpdate, ViewState, VisibleState};

pub struct PlotResampler {
    config: ResamplerConfig,
    registry: TraceRegistry,
    view: ViewState,
    algorithms: AlgorithmTable,
}

impl PlotResampler {
    pub fn new(config: ResamplerConfig) -> Self {
        Self {
            config,
            registry: TraceRegistry::new(),
            view: ViewState::new(),
            algorithms: AlgorithmTable::with_builtins(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ResamplerConfig::default())
    }

    pub fn config(&self) -> &ResamplerConfig {
        &self.config
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Mutable access to the algorithm table, for registering additional
    /// [`Downsample`](crate::downsample::Downsample) implementors.
    pub fn algorithms_mut(&mut self) -> &mut AlgorithmTable {
        &mut self.algorithms
    }

    pub fn trace_count(&self) -> usize {
        self.registry.len()
    }

    /// Whether the trace is currently `Full` or `Downsampled`.
    pub fn trace_state(&self, trace_id: TraceId) -> Result<VisibleState, ResampleError> {
        Ok(self.registry.lookup(trace_id)?.state)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Registration / teardown
    // ─────────────────────────────────────────────────────────────────────

    /// Register a trace. The name carries styling/metadata identity only;
    /// bulk data lives exclusively in the [`HfStore`].
    ///
    /// Unset options fall back to the engine defaults. Fails without
    /// touching the registry when the downsampler name is unknown or the
    /// sample budget is zero.
    pub fn add_trace<S: Into<String>>(
        &mut self,
        name: S,
        store: HfStore,
        options: TraceOptions,
    ) -> Result<TraceId, ResampleError> {
        let algorithm = match &options.downsampler {
            Some(name) => self.algorithms.resolve(name)?,
            None => self.algorithms.resolve(&self.config.default_downsampler)?,
        };
        let max_n_samples = options
            .max_n_samples
            .unwrap_or(self.config.default_n_shown_samples);
        if max_n_samples == 0 {
            return Err(ResampleError::InvalidTarget);
        }

        let entry = TraceEntry {
            name: name.into(),
            store,
            spec: DownsamplerSpec {
                algorithm,
                interleave_gaps: options.interleave_gaps,
            },
            config: TraceConfig {
                max_n_samples,
                limit_to_view: options.limit_to_view,
                axis_group: options.axis_group.unwrap_or_else(AxisGroup::default_group),
                gap_factor: options.gap_factor.unwrap_or(self.config.default_gap_factor),
            },
            state: VisibleState::Full,
        };

        let id = TraceRegistry::next_id();
        self.registry.register(id, entry)?;
        if self.config.verbose {
            log::info!("registered trace {} ('{}')", id, self.registry.lookup(id)?.name);
        }
        Ok(id)
    }

    /// Remove a trace; its store, spec and config are dropped together.
    pub fn remove_trace(&mut self, trace_id: TraceId) -> Result<(), ResampleError> {
        self.registry.unregister(trace_id).map(|_| ())
    }

    /// The initial (or current) view for one trace against the range its
    /// axis group holds right now. Called once after registration to produce
    /// the first render.
    pub fn initial_view(&mut self, trace_id: TraceId) -> Result<TraceUpdate, ResampleError> {
        let group = self.registry.lookup(trace_id)?.config.axis_group.clone();
        let range = self.view.range(&group);
        let entry = self.registry.lookup_mut(trace_id)?;
        recompute(trace_id, entry, range)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Event handling
    // ─────────────────────────────────────────────────────────────────────

    /// Handle one viewport-change event to completion.
    ///
    /// Updates the view state for the event's axis group, then recomputes
    /// every trace in that group in ascending id order. Per-trace failures
    /// are collected in the outcome and do not abort the batch.
    pub fn handle_event(&mut self, event: &ViewEvent) -> EventOutcome {
        self.view.set_range(event.axis_group.clone(), event.range);

        let mut outcome = EventOutcome::default();
        for trace_id in self.registry.traces_in_group(&event.axis_group) {
            let entry = match self.registry.lookup_mut(trace_id) {
                Ok(entry) => entry,
                Err(err) => {
                    outcome.failures.push((trace_id, err));
                    continue;
                }
            };
            match recompute(trace_id, entry, event.range) {
                Ok(update) => outcome.updates.push(update),
                Err(err) => outcome.failures.push((trace_id, err)),
            }
        }

        if self.config.verbose {
            log::info!(
                "view event on '{}': {} updates, {} failures",
                event.axis_group,
                outcome.updates.len(),
                outcome.failures.len()
            );
        }
        outcome
    }

    /// Drain a queue of pending events, processing each fully in arrival
    /// order (last writer wins on the view state).
    pub fn pump(&mut self, rx: &Receiver<ViewEvent>) -> Vec<EventOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(event) = rx.try_recv() {
            outcomes.push(self.handle_event(&event));
        }
        outcomes
    }
}

impl Default for PlotResampler {
    fn default() -> Self {
        Self::with_defaults()
    }
}
