//! Reconciliation queue and the spawned animator task.
//!
//! [`TextAnimator`] owns the model, the materialized slot sequence, and
//! the view adapter, and drains pending operations one at a time: every
//! executed operation is followed by a settle delay so consecutive
//! transitions read as a left-to-right cascade instead of a simultaneous
//! flash. Insertions are fire-and-forget; removals await their exit
//! transition (bounded by a defensive timeout) before the visual is
//! destroyed. Once the queue drains, overflow trimming may schedule
//! further operations, and draining resumes until nothing is left.
//!
//! [`spawn`] wraps an animator in a tokio task with a command inbox:
//! state-changing requests (`SetText`, `Attach`) are applied between
//! queue steps, so a text update arriving mid-drain diffs against the
//! live calculated text and composes with the in-flight batch. Scheduled
//! work is never cancelled; a superseding text only adds corrective
//! operations. A watch channel reports the last fully-settled command so
//! callers can await convergence.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::model::{PendingOp, SlotModel};
use crate::slots::{Slot, SlotSequence};
use crate::trim::{self, TrimPlan};
use crate::view::ViewAdapter;

/// Pause between consecutive queue operations. Small but non-zero: it
/// paces the visual cascade, one operation in flight at a time.
pub const SETTLE_DELAY: Duration = Duration::from_millis(40);

/// Defensive bound on awaiting an exit transition. An adapter that never
/// reports completion would otherwise stall the queue forever.
pub const EXIT_TRANSITION_TIMEOUT: Duration = Duration::from_secs(2);

/// Drives a slot sequence toward the model's calculated text.
pub struct TextAnimator<A: ViewAdapter> {
    model: SlotModel,
    slots: SlotSequence,
    adapter: Option<A>,
    settle_delay: Duration,
    exit_timeout: Duration,
}

impl<A: ViewAdapter> TextAnimator<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            model: SlotModel::new(),
            slots: SlotSequence::new(),
            adapter: Some(adapter),
            settle_delay: SETTLE_DELAY,
            exit_timeout: EXIT_TRANSITION_TIMEOUT,
        }
    }

    /// An animator with no adapter yet. Text may be set immediately;
    /// batches are computed against the calculated text and buffered,
    /// and replay once [`attach`](Self::attach) provides an adapter.
    pub fn detached() -> Self {
        Self {
            model: SlotModel::new(),
            slots: SlotSequence::new(),
            adapter: None,
            settle_delay: SETTLE_DELAY,
            exit_timeout: EXIT_TRANSITION_TIMEOUT,
        }
    }

    /// Overrides the settle delay and exit-transition timeout.
    pub fn with_timing(mut self, settle_delay: Duration, exit_timeout: Duration) -> Self {
        self.settle_delay = settle_delay;
        self.exit_timeout = exit_timeout;
        self
    }

    /// Attaches the adapter that buffered operations will replay into.
    pub fn attach(&mut self, adapter: A) {
        self.adapter = Some(adapter);
    }

    pub fn is_attached(&self) -> bool {
        self.adapter.is_some()
    }

    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    /// Schedules a diff-and-reconcile batch against the calculated text.
    ///
    /// Synchronous: the model reflects `text` when this returns, however
    /// long the visual queue takes to catch up. Setting the text the
    /// model already holds schedules nothing.
    pub fn set_text(&mut self, text: &str) {
        self.model.set_text(text);
    }

    /// The text the slots are converging toward.
    pub fn calculated_text(&self) -> String {
        self.model.calculated_text()
    }

    /// The text the materialized slots currently spell out.
    pub fn displayed_text(&self) -> String {
        self.slots.displayed_text()
    }

    pub fn has_pending(&self) -> bool {
        self.model.has_pending()
    }

    /// True when the animator could execute or schedule an operation
    /// right now. False while detached, however much is buffered.
    pub fn has_work(&self) -> bool {
        self.adapter.is_some() && (self.model.has_pending() || self.plan_trim().is_some())
    }

    /// Runs the queue and trim passes to completion.
    pub async fn drain(&mut self) {
        while self.step_or_trim().await {}
    }

    /// Executes one pending operation, or plans one trim pass if the
    /// queue is empty. Returns false when there is nothing left to do.
    pub async fn step_or_trim(&mut self) -> bool {
        if self.step().await {
            return true;
        }
        self.trim_overflow()
    }

    /// Executes the next pending operation, then waits the settle delay.
    /// Returns false when the queue is empty or no adapter is attached.
    pub async fn step(&mut self) -> bool {
        if self.adapter.is_none() {
            return false;
        }
        let Some(op) = self.model.pop_op() else {
            return false;
        };
        match op {
            PendingOp::InsertAt { ch, index } => self.apply_insert(ch, index),
            PendingOp::RemoveAt { index } => self.apply_remove(index).await,
        }
        time::sleep(self.settle_delay).await;
        true
    }

    /// Creates the slot and its visual, renumbers, and starts the enter
    /// transition without awaiting it; only the settle delay paces the
    /// next operation.
    fn apply_insert(&mut self, ch: char, index: usize) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        if index > self.slots.len() {
            tracing::trace!(ch = %ch, index, slots = self.slots.len(), "skipping stale insert");
            return;
        }
        let visual = adapter.create_slot_visual(ch);
        self.slots.insert(index, Slot { ch, visual });
        for (column, slot) in self.slots.iter().enumerate() {
            adapter.set_slot_position(slot.visual, column);
        }
        adapter.play_enter_transition(visual);
    }

    /// Removes the slot, renumbers, then awaits the exit transition
    /// before destroying the visual. The await is bounded: a transition
    /// that never reports completion is abandoned after the timeout and
    /// the visual destroyed anyway.
    async fn apply_remove(&mut self, index: usize) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        let Some(slot) = self.slots.remove(index) else {
            tracing::trace!(index, slots = self.slots.len(), "skipping stale removal");
            return;
        };
        for (column, kept) in self.slots.iter().enumerate() {
            adapter.set_slot_position(kept.visual, column);
        }
        let exit = adapter.play_exit_transition(slot.visual);
        match time::timeout(self.exit_timeout, exit).await {
            Ok(_completed_or_dropped) => {}
            Err(_) => {
                tracing::warn!(
                    visual = slot.visual.0,
                    timeout_ms = self.exit_timeout.as_millis() as u64,
                    "exit transition stalled; destroying visual anyway"
                );
            }
        }
        if let Some(adapter) = self.adapter.as_mut() {
            adapter.destroy_slot_visual(slot.visual);
        }
    }

    /// Schedules one trim pass when the drained sequence overflows the
    /// container budget. Returns true if operations were scheduled.
    fn trim_overflow(&mut self) -> bool {
        let Some(plan) = self.plan_trim() else {
            return false;
        };
        tracing::debug!(
            replace_at = plan.replace_at,
            remove_through = plan.remove_through,
            "trimming overflow"
        );
        // Replace = remove + reinsert the ellipsis at the same position,
        // then peel off the slots through the crossing one by one. All of
        // it goes through the model so the calculated text stays in step.
        self.model.schedule_removal(plan.replace_at);
        self.model.schedule_insertion(trim::ELLIPSIS, plan.replace_at);
        for _ in plan.replace_at + 1..=plan.remove_through {
            self.model.schedule_removal(plan.replace_at + 1);
        }
        true
    }

    /// Measures the drained sequence against the container budget.
    /// `None` while operations are pending: trimming only ever looks at
    /// a settled sequence.
    fn plan_trim(&self) -> Option<TrimPlan> {
        let adapter = self.adapter.as_ref()?;
        if self.model.has_pending() {
            return None;
        }
        let extents: Vec<f32> = self
            .slots
            .iter()
            .map(|slot| adapter.slot_extent(slot.visual))
            .collect();
        trim::plan_trim(&extents, adapter.container_extent())
    }
}

// ============================================================================
// Animator task (command inbox)
// ============================================================================

/// State-changing requests applied by the animator task between queue
/// steps.
pub enum AnimatorCommand<A> {
    SetText { seq: u64, text: String },
    Attach { seq: u64, adapter: A },
}

/// Handle to a spawned animator task.
///
/// Cloneable; command ordering is the send order across all clones.
pub struct AnimatorHandle<A: ViewAdapter> {
    commands: mpsc::UnboundedSender<AnimatorCommand<A>>,
    settled: watch::Receiver<u64>,
    next_seq: Arc<AtomicU64>,
}

impl<A: ViewAdapter> Clone for AnimatorHandle<A> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            settled: self.settled.clone(),
            next_seq: Arc::clone(&self.next_seq),
        }
    }
}

impl<A: ViewAdapter> AnimatorHandle<A> {
    /// Requests a diff-and-reconcile batch toward `text`.
    pub fn set_text(&self, text: impl Into<String>) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let _ = self.commands.send(AnimatorCommand::SetText {
            seq,
            text: text.into(),
        });
    }

    /// Provides (or replaces) the task's view adapter.
    pub fn attach(&self, adapter: A) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let _ = self.commands.send(AnimatorCommand::Attach { seq, adapter });
    }

    /// Resolves once every command sent so far has been applied, its
    /// queue drained, and overflow trimming settled. This is the
    /// engine's completion signal; it also resolves if the task exits.
    pub async fn settled(&mut self) {
        let target = self.next_seq.load(Ordering::Relaxed);
        let _ = self.settled.wait_for(|&done| done >= target).await;
    }
}

/// Spawns the animator task and returns its handle.
///
/// The task runs until `cancel` fires or every handle is dropped.
pub fn spawn<A>(animator: TextAnimator<A>, cancel: CancellationToken) -> AnimatorHandle<A>
where
    A: ViewAdapter + 'static,
{
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (settled_tx, settled_rx) = watch::channel(0u64);
    tokio::spawn(run(animator, commands_rx, settled_tx, cancel));
    AnimatorHandle {
        commands: commands_tx,
        settled: settled_rx,
        next_seq: Arc::new(AtomicU64::new(0)),
    }
}

async fn run<A: ViewAdapter>(
    mut animator: TextAnimator<A>,
    mut commands: mpsc::UnboundedReceiver<AnimatorCommand<A>>,
    settled: watch::Sender<u64>,
    cancel: CancellationToken,
) {
    let mut last_seq = 0u64;
    loop {
        // Drain the inbox before the next queue step so a SetText
        // arriving mid-drain diffs against the live calculated text.
        while let Ok(command) = commands.try_recv() {
            last_seq = last_seq.max(apply_command(&mut animator, command));
        }

        if animator.has_work() {
            animator.step_or_trim().await;
            continue;
        }

        // A detached animator buffers operations instead of running them;
        // those commands are not settled until an Attach lets the batch
        // drain, so the report is withheld while anything is pending.
        if !animator.has_pending() {
            settled.send_replace(last_seq);
        }
        tokio::select! {
            () = cancel.cancelled() => break,
            command = commands.recv() => match command {
                Some(command) => {
                    last_seq = last_seq.max(apply_command(&mut animator, command));
                }
                None => break,
            },
        }
    }
    tracing::debug!(last_seq, "animator task stopped");
}

fn apply_command<A: ViewAdapter>(animator: &mut TextAnimator<A>, command: AnimatorCommand<A>) -> u64 {
    match command {
        AnimatorCommand::SetText { seq, text } => {
            animator.set_text(&text);
            seq
        }
        AnimatorCommand::Attach { seq, adapter } => {
            animator.attach(adapter);
            seq
        }
    }
}
