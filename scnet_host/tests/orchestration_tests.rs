//! End-to-end orchestration tests.
//!
//! Drives the full open → enumerate → validate → run → close sequence
//! against the simulation transport: the happy path, each validation
//! failure category, transport rejection during open, mid-run fault
//! isolation, and cross-channel run ordering.

use scnet_common::config::ChannelSpec;
use scnet_common::error::{AxisFault, HostError, LinkError};
use scnet_common::node::{AccessLevel, NodeInfo, NodeType};
use scnet_common::transport::LinkTransport;
use scnet_host::axis::ControlSequence;
use scnet_host::channel::{NodeHandle, OpenState};
use scnet_host::manager::NetworkManager;
use scnet_host::orchestrate::{orchestrate, orchestrate_default, Outcome};
use scnet_host::registry::TransportRegistry;
use scnet_host::transports::simulation::{sim_node, SimTransport};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Build a manager whose channels all open against clones of `sim`.
fn manager_for(sim: SimTransport, channel_count: usize) -> NetworkManager {
    let mut registry = TransportRegistry::new();
    registry.register(
        "simulation",
        Box::new(move || Box::new(sim.clone()) as Box<dyn LinkTransport>),
    );
    let mut mgr = NetworkManager::new(registry, "simulation");
    for index in 0..channel_count {
        mgr.configure_channel(index, format!("{}", index + 1).parse().unwrap())
            .unwrap();
    }
    mgr
}

/// Control sequence that records the addresses it ran against and can
/// fault on a chosen address.
struct RecordingSequence {
    ran: Arc<Mutex<Vec<(usize, u16)>>>,
    fault_addr: Option<u16>,
}

impl ControlSequence for RecordingSequence {
    fn execute(&mut self, node: &NodeHandle) -> Result<(), AxisFault> {
        self.ran
            .lock()
            .unwrap()
            .push((node.channel_index(), node.address()));
        if self.fault_addr == Some(node.address()) {
            return Err(AxisFault::new(node.address(), "injected mid-run fault"));
        }
        Ok(())
    }
}

fn recording_factory(
    ran: Arc<Mutex<Vec<(usize, u16)>>>,
    fault_addr: Option<u16>,
) -> impl Fn() -> Box<dyn ControlSequence> {
    move || {
        Box::new(RecordingSequence {
            ran: Arc::clone(&ran),
            fault_addr,
        }) as Box<dyn ControlSequence>
    }
}

/// Transport wrapper that counts `close()` calls on its shared counter.
struct CountingTransport {
    inner: SimTransport,
    closes: Arc<AtomicUsize>,
}

impl LinkTransport for CountingTransport {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn version(&self) -> &'static str {
        self.inner.version()
    }

    fn open(&mut self, spec: &ChannelSpec) -> Result<(), LinkError> {
        self.inner.open(spec)
    }

    fn enumerate(&mut self) -> Result<Vec<NodeInfo>, LinkError> {
        self.inner.enumerate()
    }

    fn close(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.inner.close();
    }

    fn is_open(&self) -> bool {
        self.inner.is_open()
    }
}

/// Control sequence that crashes instead of returning a fault.
struct CrashingSequence;

impl ControlSequence for CrashingSequence {
    fn execute(&mut self, node: &NodeHandle) -> Result<(), AxisFault> {
        panic!("emulated driver crash on node {}", node.address());
    }
}

fn assert_all_closed(mgr: &NetworkManager) {
    for channel in mgr.channels() {
        assert_eq!(channel.state(), OpenState::Closed);
        assert_eq!(channel.node_count(), 0);
    }
}

#[test]
fn two_good_nodes_run_in_enumeration_order() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    let mut mgr = manager_for(SimTransport::new(), 1);

    let outcome = orchestrate(&mut mgr, 1, &recording_factory(Arc::clone(&ran), None));

    assert_eq!(outcome, Outcome::Success);
    assert_eq!(*ran.lock().unwrap(), vec![(0, 0), (0, 1)]);
    assert_all_closed(&mgr);
}

#[test]
fn wrong_type_on_second_node_prevents_all_runs() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    let sim = SimTransport::new().with_nodes(vec![
        sim_node(0, NodeType::ServoAdvanced, AccessLevel::Full),
        sim_node(1, NodeType::IoExpander, AccessLevel::Full),
    ]);
    let mut mgr = manager_for(sim, 1);

    let outcome = orchestrate(&mut mgr, 1, &recording_factory(Arc::clone(&ran), None));

    assert_eq!(outcome, Outcome::NodeTypeMismatch);
    assert!(ran.lock().unwrap().is_empty(), "no controller may run");
    assert_all_closed(&mgr);
}

#[test]
fn non_full_access_skips_the_run_phase() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    let sim = SimTransport::new().with_nodes(vec![sim_node(
        0,
        NodeType::ServoBasic,
        AccessLevel::Monitor,
    )]);
    let mut mgr = manager_for(sim, 1);

    let outcome = orchestrate(&mut mgr, 1, &recording_factory(Arc::clone(&ran), None));

    assert_eq!(outcome, Outcome::AccessLevel);
    assert!(ran.lock().unwrap().is_empty());
    assert_all_closed(&mgr);
}

#[test]
fn rejected_address_reports_init_failure() {
    let mut registry = TransportRegistry::new();
    registry.register(
        "simulation",
        Box::new(|| Box::new(SimTransport::new()) as Box<dyn LinkTransport>),
    );
    let mut mgr = NetworkManager::new(registry, "simulation");
    mgr.configure_channel(0, "/dev/reject0".parse().unwrap())
        .unwrap();

    let outcome = orchestrate_default(&mut mgr, 1);

    assert_eq!(outcome, Outcome::InitFailed);
    assert_all_closed(&mgr);
}

#[test]
fn open_all_failure_is_reported_before_any_controller_exists() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    let sim = SimTransport::new().fail_open(scnet_common::error::codes::OPEN_FAILED, "busy");
    let mut mgr = manager_for(sim, 1);

    let outcome = orchestrate(&mut mgr, 1, &recording_factory(Arc::clone(&ran), None));

    assert_eq!(outcome, Outcome::InitFailed);
    assert!(ran.lock().unwrap().is_empty());
    assert_all_closed(&mgr);
}

#[test]
fn mid_run_fault_does_not_abort_peers_and_channels_still_close() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    let sim = SimTransport::new().with_nodes(vec![
        sim_node(0, NodeType::ServoBasic, AccessLevel::Full),
        sim_node(1, NodeType::ServoBasic, AccessLevel::Full),
        sim_node(2, NodeType::ServoBasic, AccessLevel::Full),
    ]);
    let mut mgr = manager_for(sim, 1);

    // Node 1 faults; nodes 0 and 2 must still run.
    let outcome = orchestrate(&mut mgr, 1, &recording_factory(Arc::clone(&ran), Some(1)));

    assert_eq!(outcome, Outcome::Fault);
    assert_eq!(*ran.lock().unwrap(), vec![(0, 0), (0, 1), (0, 2)]);
    assert_all_closed(&mgr);
}

#[test]
fn run_order_is_transitive_across_channels() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    let sim = SimTransport::new().with_nodes(vec![
        sim_node(3, NodeType::ServoBasic, AccessLevel::Full),
        sim_node(1, NodeType::ServoBasic, AccessLevel::Full),
    ]);
    let mut mgr = manager_for(sim, 2);

    let outcome = orchestrate(&mut mgr, 2, &recording_factory(Arc::clone(&ran), None));

    assert_eq!(outcome, Outcome::Success);
    // Channel 0's nodes before channel 1's, each in ascending bus address.
    assert_eq!(
        *ran.lock().unwrap(),
        vec![(0, 1), (0, 3), (1, 1), (1, 3)]
    );
    assert_all_closed(&mgr);
}

#[test]
fn one_bad_node_anywhere_gates_every_channel() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    // Both channels enumerate the same topology; the bad node on each
    // gates the whole set, so nothing runs on either channel.
    let sim = SimTransport::new().with_nodes(vec![
        sim_node(0, NodeType::ServoBasic, AccessLevel::Full),
        sim_node(1, NodeType::Unknown, AccessLevel::Full),
    ]);
    let mut mgr = manager_for(sim, 2);

    let outcome = orchestrate(&mut mgr, 2, &recording_factory(Arc::clone(&ran), None));

    assert_eq!(outcome, Outcome::NodeTypeMismatch);
    assert!(ran.lock().unwrap().is_empty());
    assert_all_closed(&mgr);
}

#[test]
fn panic_during_a_run_still_releases_the_transport() {
    let closes = Arc::new(AtomicUsize::new(0));
    let mut registry = TransportRegistry::new();
    let blueprint_closes = Arc::clone(&closes);
    registry.register(
        "simulation",
        Box::new(move || {
            Box::new(CountingTransport {
                inner: SimTransport::new(),
                closes: Arc::clone(&blueprint_closes),
            }) as Box<dyn LinkTransport>
        }),
    );
    let mut mgr = NetworkManager::new(registry, "simulation");
    mgr.configure_channel(0, "1".parse().unwrap()).unwrap();

    let unwound = catch_unwind(AssertUnwindSafe(|| {
        orchestrate(&mut mgr, 1, &|| {
            Box::new(CrashingSequence) as Box<dyn ControlSequence>
        })
    }));
    assert!(unwound.is_err(), "the crash must unwind out of the run");

    // The normal teardown step never ran on this path; dropping the
    // manager must release the channel, exactly once.
    assert_eq!(closes.load(Ordering::SeqCst), 0);
    drop(mgr);
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_transport_surfaces_as_init_failure() {
    let mut mgr = NetworkManager::new(TransportRegistry::new(), "serial");
    mgr.configure_channel(0, "1".parse().unwrap()).unwrap();

    assert!(matches!(
        mgr.open_all(1),
        Err(HostError::TransportNotFound(_))
    ));
    let outcome = orchestrate_default(&mut mgr, 1);
    assert_eq!(outcome, Outcome::InitFailed);
}
