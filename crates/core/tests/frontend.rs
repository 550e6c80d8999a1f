use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::thread;

use quorumkv_core::{
    Error, Frontend, FrontendOptions, NodeClient, NodesFinder, Payload, RecordID, Result,
    RouterClient, ServiceAddr,
};

fn addr(port: u16) -> ServiceAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, port))
}

#[derive(Clone, Default)]
struct IdentityFinder;

impl NodesFinder for IdentityFinder {
    fn find(&self, _key: RecordID, nodes: &[ServiceAddr]) -> Vec<ServiceAddr> {
        nodes.to_vec()
    }
}

#[derive(Clone)]
struct ScriptedNodeClient {
    writes: Arc<HashMap<ServiceAddr, Result<()>>>,
    reads: Arc<HashMap<ServiceAddr, Result<Payload>>>,
}

impl NodeClient for ScriptedNodeClient {
    fn put(&self, addr: ServiceAddr, _key: RecordID, _data: Payload) -> Result<()> {
        self.writes.get(&addr).cloned().expect("no scripted write outcome")
    }

    fn get(&self, addr: ServiceAddr, _key: RecordID) -> Result<Payload> {
        self.reads.get(&addr).cloned().expect("no scripted read outcome")
    }

    fn del(&self, addr: ServiceAddr, _key: RecordID) -> Result<()> {
        self.writes.get(&addr).cloned().expect("no scripted write outcome")
    }
}

#[derive(Clone)]
struct ScriptedRouterClient {
    nodes_find_result: Result<Vec<ServiceAddr>>,
    list_script: Arc<Mutex<Vec<Result<Vec<ServiceAddr>>>>>,
    list_calls: Arc<Mutex<usize>>,
}

impl RouterClient for ScriptedRouterClient {
    fn nodes_find(&self, _addr: ServiceAddr, _key: RecordID) -> Result<Vec<ServiceAddr>> {
        self.nodes_find_result.clone()
    }

    fn list(&self, _addr: ServiceAddr) -> Result<Vec<ServiceAddr>> {
        let mut calls = self.list_calls.lock().unwrap();
        *calls += 1;

        let mut script = self.list_script.lock().unwrap();
        if script.len() > 1 {
            script.remove(0)
        } else {
            script[0].clone()
        }
    }

    fn heartbeat(&self, _addr: ServiceAddr, _node: ServiceAddr) -> Result<()> {
        Ok(())
    }
}

fn frontend(
    writes: HashMap<ServiceAddr, Result<()>>,
    reads: HashMap<ServiceAddr, Result<Payload>>,
    nodes_find_result: Result<Vec<ServiceAddr>>,
    list_result: Result<Vec<ServiceAddr>>,
) -> Frontend<ScriptedNodeClient, ScriptedRouterClient, IdentityFinder> {
    Frontend::new(FrontendOptions {
        router_addr: addr(9000),
        node_client: ScriptedNodeClient {
            writes: Arc::new(writes),
            reads: Arc::new(reads),
        },
        router_client: ScriptedRouterClient {
            nodes_find_result,
            list_script: Arc::new(Mutex::new(vec![list_result])),
            list_calls: Arc::new(Mutex::new(0)),
        },
        finder: IdentityFinder,
    })
}

#[test]
fn happy_write_succeeds() {
    let nodes = vec![addr(1), addr(2), addr(3)];
    let writes = nodes.iter().map(|&a| (a, Ok(()))).collect();

    let fe = frontend(writes, HashMap::new(), Ok(nodes.clone()), Ok(nodes));
    fe.put(RecordID(7), Payload::from(&b"x"[..])).unwrap();
}

#[test]
fn write_with_one_failure_still_reaches_quorum() {
    let nodes = vec![addr(1), addr(2), addr(3)];
    let mut writes = HashMap::new();
    writes.insert(nodes[0], Ok(()));
    writes.insert(nodes[1], Ok(()));
    writes.insert(nodes[2], Err(Error::RecordExists));

    let fe = frontend(writes, HashMap::new(), Ok(nodes.clone()), Ok(nodes));
    fe.put(RecordID(7), Payload::from(&b"x"[..])).unwrap();
}

#[test]
fn write_with_quorum_error_surfaces_it() {
    let nodes = vec![addr(1), addr(2), addr(3)];
    let mut writes = HashMap::new();
    writes.insert(nodes[0], Err(Error::RecordExists));
    writes.insert(nodes[1], Err(Error::RecordExists));
    writes.insert(nodes[2], Ok(()));

    let fe = frontend(writes, HashMap::new(), Ok(nodes.clone()), Ok(nodes));
    let err = fe.put(RecordID(7), Payload::from(&b"x"[..])).unwrap_err();
    assert_eq!(err, Error::RecordExists);
}

#[test]
fn write_without_any_quorum_fails() {
    let nodes = vec![addr(1), addr(2), addr(3)];
    let mut writes = HashMap::new();
    writes.insert(nodes[0], Err(Error::RecordExists));
    writes.insert(nodes[1], Err(Error::RecordNotFound));
    writes.insert(nodes[2], Ok(()));

    let fe = frontend(writes, HashMap::new(), Ok(nodes.clone()), Ok(nodes));
    let err = fe.put(RecordID(7), Payload::from(&b"x"[..])).unwrap_err();
    assert_eq!(err, Error::QuorumNotReached);
}

#[test]
fn write_below_min_redundancy_fails_fast() {
    let nodes = vec![addr(1)];
    let fe = frontend(HashMap::new(), HashMap::new(), Ok(nodes.clone()), Ok(nodes));
    let err = fe.put(RecordID(7), Payload::from(&b"x"[..])).unwrap_err();
    assert_eq!(err, Error::NotEnoughDaemons);
}

#[test]
fn read_returns_value_agreed_by_quorum() {
    let nodes = vec![addr(1), addr(2), addr(3)];
    let mut reads = HashMap::new();
    reads.insert(nodes[0], Ok(Payload::from(&b"x"[..])));
    reads.insert(nodes[1], Ok(Payload::from(&b"x"[..])));
    reads.insert(nodes[2], Err(Error::RecordNotFound));

    let fe = frontend(HashMap::new(), reads, Ok(nodes.clone()), Ok(nodes));
    let value = fe.get(RecordID(7)).unwrap();
    assert_eq!(value, Payload::from(&b"x"[..]));
}

#[test]
fn read_with_divergent_replicas_reaches_no_quorum() {
    let nodes = vec![addr(1), addr(2), addr(3)];
    let mut reads = HashMap::new();
    reads.insert(nodes[0], Ok(Payload::from(&b"x"[..])));
    reads.insert(nodes[1], Ok(Payload::from(&b"y"[..])));
    reads.insert(nodes[2], Err(Error::RecordNotFound));

    let fe = frontend(HashMap::new(), reads, Ok(nodes.clone()), Ok(nodes));
    let err = fe.get(RecordID(7)).unwrap_err();
    assert_eq!(err, Error::QuorumNotReached);
}

#[test]
fn frontend_bootstraps_roster_once_under_concurrent_gets() {
    let nodes = vec![addr(1), addr(2), addr(3)];
    let reads = nodes.iter().map(|&a| (a, Ok(Payload::from(&b"x"[..])))).collect();

    let list_calls = Arc::new(Mutex::new(0usize));
    let fe = Arc::new(Frontend::new(FrontendOptions {
        router_addr: addr(9000),
        node_client: ScriptedNodeClient {
            writes: Arc::new(HashMap::new()),
            reads: Arc::new(reads),
        },
        router_client: ScriptedRouterClient {
            nodes_find_result: Ok(nodes.clone()),
            list_script: Arc::new(Mutex::new(vec![
                Err(Error::NotEnoughDaemons),
                Err(Error::NotEnoughDaemons),
                Ok(nodes.clone()),
            ])),
            list_calls: list_calls.clone(),
        },
        finder: IdentityFinder,
    }));

    let a = fe.clone();
    let b = fe.clone();
    let t1 = thread::spawn(move || a.get(RecordID(1)).unwrap());
    let t2 = thread::spawn(move || b.get(RecordID(1)).unwrap());

    assert_eq!(t1.join().unwrap(), Payload::from(&b"x"[..]));
    assert_eq!(t2.join().unwrap(), Payload::from(&b"x"[..]));

    // two scripted failures plus the one success that won the race, no more.
    assert_eq!(*list_calls.lock().unwrap(), 3);

    // a later get reuses the cached roster: no further `list` calls.
    fe.get(RecordID(2)).unwrap();
    assert_eq!(*list_calls.lock().unwrap(), 3);
}
