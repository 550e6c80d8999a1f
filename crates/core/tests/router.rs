use std::net::{Ipv4Addr, SocketAddr};
use std::thread;
use std::time::Duration;

use quorumkv_core::{Error, NodesFinder, RecordID, Router, RouterOptions, ServiceAddr};

#[derive(Clone, Default)]
struct IdentityFinder;

impl NodesFinder for IdentityFinder {
    fn find(&self, _key: RecordID, nodes: &[ServiceAddr]) -> Vec<ServiceAddr> {
        nodes.to_vec()
    }
}

fn addrs(ports: &[u16]) -> Vec<ServiceAddr> {
    ports
        .iter()
        .map(|&p| SocketAddr::from((Ipv4Addr::LOCALHOST, p)))
        .collect()
}

#[test]
fn construction_fails_below_replication_factor() {
    let err = Router::new(RouterOptions {
        nodes: addrs(&[1, 2]),
        finder: IdentityFinder,
        forget_timeout: Duration::from_secs(30),
    })
    .unwrap_err();

    assert_eq!(err, Error::NotEnoughDaemons);
}

#[test]
fn fresh_nodes_are_found_right_after_construction() {
    let router = Router::new(RouterOptions {
        nodes: addrs(&[1, 2, 3]),
        finder: IdentityFinder,
        forget_timeout: Duration::from_secs(30),
    })
    .unwrap();

    let found = router.nodes_find(RecordID(7)).unwrap();
    assert_eq!(found, addrs(&[1, 2, 3]));
}

#[test]
fn heartbeat_from_unknown_address_fails() {
    let router = Router::new(RouterOptions {
        nodes: addrs(&[1, 2, 3]),
        finder: IdentityFinder,
        forget_timeout: Duration::from_secs(30),
    })
    .unwrap();

    let stranger = SocketAddr::from((Ipv4Addr::LOCALHOST, 9999));
    assert_eq!(router.heartbeat(stranger).unwrap_err(), Error::UnknownDaemon);
}

#[test]
fn heartbeat_from_known_address_succeeds() {
    let router = Router::new(RouterOptions {
        nodes: addrs(&[1, 2, 3]),
        finder: IdentityFinder,
        forget_timeout: Duration::from_secs(30),
    })
    .unwrap();

    let node = SocketAddr::from((Ipv4Addr::LOCALHOST, 1));
    router.heartbeat(node).unwrap();
}

#[test]
fn list_returns_full_roster_regardless_of_liveness() {
    let router = Router::new(RouterOptions {
        nodes: addrs(&[1, 2, 3]),
        finder: IdentityFinder,
        forget_timeout: Duration::from_millis(1),
    })
    .unwrap();

    thread::sleep(Duration::from_millis(10));
    assert_eq!(router.list(), addrs(&[1, 2, 3]));
}

#[test]
fn stale_nodes_are_forgotten_and_can_starve_quorum() {
    let router = Router::new(RouterOptions {
        nodes: addrs(&[1, 2, 3]),
        finder: IdentityFinder,
        forget_timeout: Duration::from_millis(20),
    })
    .unwrap();

    // keep node 1 and 3 alive, let node 2 go stale.
    thread::sleep(Duration::from_millis(10));
    router.heartbeat(SocketAddr::from((Ipv4Addr::LOCALHOST, 1))).unwrap();
    router.heartbeat(SocketAddr::from((Ipv4Addr::LOCALHOST, 3))).unwrap();
    thread::sleep(Duration::from_millis(15));

    let found = router.nodes_find(RecordID(7)).unwrap();
    assert!(!found.contains(&SocketAddr::from((Ipv4Addr::LOCALHOST, 2))));
}

#[test]
fn quorum_not_reached_when_too_many_nodes_go_stale() {
    let router = Router::new(RouterOptions {
        nodes: addrs(&[1, 2, 3]),
        finder: IdentityFinder,
        forget_timeout: Duration::from_millis(10),
    })
    .unwrap();

    thread::sleep(Duration::from_millis(25));
    assert_eq!(router.nodes_find(RecordID(7)).unwrap_err(), Error::NotEnoughDaemons);
}
