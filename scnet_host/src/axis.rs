//! Per-node axis controller.
//!
//! An `AxisController` is the logical control object bound 1:1 to one
//! validated node for the duration of a control sequence. The node-specific
//! sequence itself (move profiles, homing, feedback capture) lives behind
//! the `ControlSequence` trait; what this module guarantees is the run
//! state machine and fault localization.

use scnet_common::clock;
use scnet_common::error::AxisFault;
use tracing::{debug, info, warn};

use crate::channel::NodeHandle;

/// Run state of an axis controller: `Idle -> Running -> {Completed, Faulted}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RunState {
    /// Constructed, not yet run.
    Idle = 0,
    /// Control sequence executing.
    Running = 1,
    /// Control sequence returned successfully.
    Completed = 2,
    /// Control sequence raised a fault.
    Faulted = 3,
}

impl RunState {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Idle),
            1 => Some(Self::Running),
            2 => Some(Self::Completed),
            3 => Some(Self::Faulted),
            _ => None,
        }
    }
}

/// Node-specific control sequence executed by an axis controller.
///
/// Implementations may block; the orchestration layer runs sequences
/// strictly one at a time. A returned [`AxisFault`] is localized to the
/// owning controller and never aborts peers.
pub trait ControlSequence {
    /// Execute the sequence against the bound node.
    fn execute(&mut self, node: &NodeHandle) -> Result<(), AxisFault>;
}

/// Default control sequence: reports the node identity and emulates one
/// timed move cycle. Stands in for a real motion program.
#[derive(Debug, Default)]
pub struct DemoSequence;

impl ControlSequence for DemoSequence {
    fn execute(&mut self, node: &NodeHandle) -> Result<(), AxisFault> {
        let info = node.info();
        info!(
            "Axis {} ({}): model={}, serial={}, fw={}",
            node.address(),
            info.user_id,
            info.model,
            info.serial_number,
            info.firmware_version
        );

        let started_ms = clock::now_ms();
        debug!("Axis {}: move cycle start", node.address());
        // Feedback capture and profile maths run node-side; nothing to do
        // here but account for the cycle.
        debug!(
            "Axis {}: move cycle done in {:.3} ms",
            node.address(),
            clock::now_ms() - started_ms
        );
        Ok(())
    }
}

/// Logical control object bound to exactly one node.
///
/// At most one controller binds a given node at a time; the orchestration
/// driver constructs controllers only for nodes that passed type
/// validation, and runs them only after the whole node set passed the
/// access gate.
pub struct AxisController<'n> {
    node: &'n NodeHandle,
    state: RunState,
    sequence: Box<dyn ControlSequence>,
}

impl<'n> AxisController<'n> {
    /// Bind a controller to a node with the default sequence.
    pub fn new(node: &'n NodeHandle) -> Self {
        Self::with_sequence(node, Box::new(DemoSequence))
    }

    /// Bind a controller to a node with an explicit control sequence.
    pub fn with_sequence(node: &'n NodeHandle, sequence: Box<dyn ControlSequence>) -> Self {
        debug!("Axis controller bound to node {}", node.address());
        Self {
            node,
            state: RunState::Idle,
            sequence,
        }
    }

    /// Run the control sequence to completion.
    ///
    /// May only be invoked once, from `Idle`. A fault transitions the
    /// controller to `Faulted` and is returned to the caller; cleanup of
    /// this controller and of peers already run is unaffected.
    ///
    /// # Panics
    /// Panics if invoked outside `Idle` — a contract violation, not a
    /// runtime condition.
    pub fn run(&mut self) -> Result<(), AxisFault> {
        assert_eq!(
            self.state,
            RunState::Idle,
            "AxisController::run invoked twice for node {}",
            self.node.address()
        );

        self.state = RunState::Running;
        match self.sequence.execute(self.node) {
            Ok(()) => {
                self.state = RunState::Completed;
                Ok(())
            }
            Err(fault) => {
                warn!("Axis {} faulted: {}", self.node.address(), fault);
                self.state = RunState::Faulted;
                Err(fault)
            }
        }
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The bound node.
    pub fn node(&self) -> &NodeHandle {
        self.node
    }
}
