//! Validation and orchestration driver.
//!
//! The sequencing policy, not a stateful object: open all channels,
//! enumerate, validate node type and access level across the entire node
//! set, construct axis controllers only for type-valid nodes, run them
//! only if the whole set passed, then tear down on every path.
//!
//! The two-phase "validate everything, then act only on full success"
//! protocol is the central policy invariant: it prevents partial control
//! authority over a mixed-integrity node set.

use scnet_common::error::ValidationFailure;
use tracing::{error, info};

use crate::axis::{AxisController, ControlSequence, DemoSequence};
use crate::manager::NetworkManager;

/// Final outcome of an orchestration run, in the process exit-code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Outcome {
    /// All validated axes ran to completion.
    Success = 0,
    /// Command-line surface misuse.
    Usage = -1,
    /// Channel open/enumeration failed during initialization.
    InitFailed = -2,
    /// Link error or axis fault during the run phase.
    Fault = -3,
    /// Unclassified fault caught at the top level.
    Unexpected = -4,
    /// A discovered node is not a supported servo model.
    NodeTypeMismatch = -5,
    /// A servo node is not under full host control.
    AccessLevel = -6,
}

impl Outcome {
    /// Process exit code for this outcome.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Aggregate validation result over the full node set.
///
/// Computed once per run; drives the all-or-nothing gate for running axis
/// controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Every discovered node is a supported servo model.
    pub node_types_good: bool,
    /// Every type-valid node grants the host full access.
    pub access_levels_good: bool,
}

impl ValidationReport {
    /// True if the run phase may proceed.
    #[inline]
    pub const fn passed(&self) -> bool {
        self.node_types_good && self.access_levels_good
    }

    /// The taxonomy reason to report on gate failure.
    ///
    /// Type mismatch takes precedence when both categories failed.
    pub const fn failure(&self) -> Option<ValidationFailure> {
        if !self.node_types_good {
            Some(ValidationFailure::NodeType)
        } else if !self.access_levels_good {
            Some(ValidationFailure::AccessLevel)
        } else {
            None
        }
    }
}

/// Operator-facing report of every open channel and discovered node.
///
/// Identity fields are passed through unmodified; nothing here feeds
/// control decisions.
pub fn log_network(mgr: &NetworkManager) {
    for channel in mgr.channels() {
        info!(
            "Channel[{}]: state={:?}, nodes={}",
            channel.spec().index,
            channel.state(),
            channel.node_count()
        );
        for node in channel.nodes() {
            let info = node.info();
            info!("  Node[{}]: type={:?}", node.node_index(), info.node_type);
            info!("        userID: {}", info.user_id);
            info!("    FW version: {}", info.firmware_version);
            info!("    HW version: {}", info.hardware_version);
            info!("      Serial #: {}", info.serial_number);
            info!("         Model: {}", info.model);
        }
    }
}

/// Exhaustive validation pass over all channels and nodes, in enumeration
/// order.
///
/// Every node's type is checked even after a failure, so the caller gets a
/// complete report. Controllers are constructed only for type-valid nodes;
/// access is checked only on those, and a node that fails the type check
/// never gets a controller even if its access level would have passed.
pub fn validate<'m, F>(
    mgr: &'m NetworkManager,
    make_sequence: &F,
) -> (ValidationReport, Vec<AxisController<'m>>)
where
    F: Fn() -> Box<dyn ControlSequence>,
{
    let mut report = ValidationReport {
        node_types_good: true,
        access_levels_good: true,
    };
    let mut axes = Vec::new();

    for channel in mgr.channels() {
        for node in channel.nodes() {
            if !node.is_supported_type() {
                error!(
                    "Node {} on channel {} is not a servo node (type {:?})",
                    node.address(),
                    node.channel_index(),
                    node.node_type()
                );
                report.node_types_good = false;
                continue;
            }

            axes.push(AxisController::with_sequence(node, make_sequence()));

            if !node.has_full_access() {
                error!(
                    "Access level is not full for node {} on channel {} ({:?})",
                    node.address(),
                    node.channel_index(),
                    node.access_level()
                );
                report.access_levels_good = false;
            }
        }
    }

    (report, axes)
}

/// Validate the discovered node set and, on full success, run every axis
/// controller in enumeration order.
///
/// Axis faults are localized: a faulting axis never aborts its peers, and
/// the first fault is surfaced only after the full run sequence completes.
/// Controllers are destroyed before this function returns, so the caller
/// can close channels immediately afterwards.
pub fn run_session<F>(mgr: &NetworkManager, make_sequence: &F) -> Outcome
where
    F: Fn() -> Box<dyn ControlSequence>,
{
    log_network(mgr);

    let (report, mut axes) = validate(mgr, make_sequence);

    match report.failure() {
        Some(failure @ ValidationFailure::NodeType) => {
            error!("FAILURE: {failure}");
            return Outcome::NodeTypeMismatch;
        }
        Some(failure @ ValidationFailure::AccessLevel) => {
            error!("FAILURE: {failure}");
            return Outcome::AccessLevel;
        }
        None => {}
    }

    info!("Running {} axis controller(s)...", axes.len());
    let mut first_fault = None;
    for axis in axes.iter_mut() {
        if let Err(fault) = axis.run() {
            first_fault.get_or_insert(fault);
        }
    }

    match first_fault {
        Some(fault) => {
            error!("Run phase completed with faults; first: {fault}");
            Outcome::Fault
        }
        None => {
            info!("All axes completed");
            Outcome::Success
        }
    }
}

/// The full orchestration sequence: open `count` channels, validate and
/// run, then close every channel regardless of outcome.
pub fn orchestrate<F>(mgr: &mut NetworkManager, count: usize, make_sequence: &F) -> Outcome
where
    F: Fn() -> Box<dyn ControlSequence>,
{
    let outcome = match mgr.open_all(count) {
        Ok(()) => run_session(mgr, make_sequence),
        Err(e) => {
            error!("Channel setup issue: {e}");
            Outcome::InitFailed
        }
    };

    // Teardown on every path, including the init-failure one where some
    // channels may already be open.
    mgr.close_all();
    outcome
}

/// [`orchestrate`] with the default demo control sequence.
pub fn orchestrate_default(mgr: &mut NetworkManager, count: usize) -> Outcome {
    orchestrate(mgr, count, &|| {
        Box::new(DemoSequence) as Box<dyn ControlSequence>
    })
}
