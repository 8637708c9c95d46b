//! Event types and sinks for observing generation runs.
//!
//! This module defines [`GenerationEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while a [`crate::generator::scheduler::TerrainGenerator`]
//! runs. Sinks can opt out of event kinds they do not care about via [`EventSink::wants`].
use crate::catalog::TileTypeId;
use crate::generator::config::GeneratorConfig;
use crate::generator::selection::SelectionOutcome;
use crate::hex::Position;

/// Describes events emitted while generating a grid.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// Emitted once the configuration has been validated.
    RunStarted {
        /// The configuration used.
        config: GeneratorConfig,
        /// Seed the RNG was created from, if the generator created it.
        seed: Option<u64>,
        /// Number of cells inside the grid bounds.
        cell_count: usize,
    },

    /// Emitted when the first tile has been placed.
    TileSeeded { position: Position, tile: TileTypeId },

    /// Emitted before a wave expands its frontier.
    WaveStarted {
        /// Zero-based wave index.
        index: usize,
        /// Number of positions in the frontier.
        frontier: usize,
    },

    /// Emitted when a cell has been assigned a tile type.
    TileGenerated {
        /// Wave that produced the tile.
        wave: usize,
        position: Position,
        tile: TileTypeId,
        /// Number of candidates after rule compilation.
        candidates: usize,
        /// Whether a candidate was accepted or the fallback was used.
        outcome: SelectionOutcome,
    },

    /// Emitted after a wave finished.
    WaveFinished {
        index: usize,
        /// Number of tiles generated in this wave.
        generated: usize,
    },

    /// Emitted when the run reached its terminal state.
    RunFinished { summary: RunSummary },

    /// Non-fatal warning generated during generation.
    Warning {
        /// Context string (e.g. position, tile type name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of a [`GenerationEvent`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationEventKind {
    RunStarted,
    TileSeeded,
    WaveStarted,
    TileGenerated,
    WaveFinished,
    RunFinished,
    Warning,
}

impl GenerationEvent {
    pub fn kind(&self) -> GenerationEventKind {
        match self {
            GenerationEvent::RunStarted { .. } => GenerationEventKind::RunStarted,
            GenerationEvent::TileSeeded { .. } => GenerationEventKind::TileSeeded,
            GenerationEvent::WaveStarted { .. } => GenerationEventKind::WaveStarted,
            GenerationEvent::TileGenerated { .. } => GenerationEventKind::TileGenerated,
            GenerationEvent::WaveFinished { .. } => GenerationEventKind::WaveFinished,
            GenerationEvent::RunFinished { .. } => GenerationEventKind::RunFinished,
            GenerationEvent::Warning { .. } => GenerationEventKind::Warning,
        }
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tiles placed, including the first one.
    pub tiles: usize,
    /// Number of expansion waves executed.
    pub waves: usize,
    /// Tiles that had to use the climate fallback.
    pub fallbacks: usize,
    /// In-bounds cells left unset because they are unreachable from the first tile.
    pub unreached: usize,
}

/// A generic event sink that accepts [`GenerationEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);

    /// Whether this sink wants events of `kind`. Emitters skip building unwanted events.
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = GenerationEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}

    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally only some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
    only: Option<Vec<GenerationEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
            only: None,
        }
    }

    /// Collects only the listed kinds.
    pub fn filtered(kinds: impl IntoIterator<Item = GenerationEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<GenerationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: GenerationEvent) {
        let kind = event.kind();
        let Some(last_idx) = self.sinks.iter().rposition(|s| s.wants(kind)) else {
            return;
        };
        for i in 0..last_idx {
            if self.sinks[i].wants(kind) {
                self.sinks[i].send(event.clone());
            }
        }
        self.sinks[last_idx].send(event);
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

/// Minimal adapter trait for types that can expose an [`EventSink`].
pub trait AsEventSink {
    fn as_event_sink(&mut self) -> &mut dyn EventSink;
}

impl<S: EventSink> AsEventSink for S {
    fn as_event_sink(&mut self) -> &mut dyn EventSink {
        self
    }
}

/// Sends a warning if the sink wants warnings.
pub(crate) fn emit_warning(
    sink: &mut dyn EventSink,
    context: impl FnOnce() -> String,
    message: impl FnOnce() -> String,
) {
    if sink.wants(GenerationEventKind::Warning) {
        sink.send(GenerationEvent::Warning {
            context: context(),
            message: message(),
        });
    }
}
