//! Independent oracles shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use pdsc::{graph::pds_holds, Graph, Partition};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// G(n, p) with a fixed seed.
pub fn random_graph(n: usize, p: f64, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                edges.push((u, v));
            }
        }
    }
    Graph::from_edge_list(n, &edges)
}

/// BFS over the subgraph induced by `members`.
pub fn is_connected(g: &Graph, members: &[usize]) -> bool {
    let Some(&start) = members.first() else { return true };
    let inside = |v: usize| members.contains(&v);
    let mut seen = vec![false; g.n()];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    let mut reached = 1;
    while let Some(u) = queue.pop_front() {
        for v in g.neigh_row(u).iter_ones() {
            if inside(v) && !seen[v] {
                seen[v] = true;
                reached += 1;
                queue.push_back(v);
            }
        }
    }
    reached == members.len()
}

fn subset(mask: u32, n: usize) -> Vec<usize> {
    (0..n).filter(|&v| mask >> v & 1 == 1).collect()
}

/// Size of the largest PDS (optionally connected, optionally containing
/// `root`) by enumeration.
pub fn brute_max_pds(g: &Graph, connected: bool, allow_whole: bool, root: Option<usize>) -> Option<usize> {
    let n = g.n();
    let max_size = if allow_whole { n } else { n - 1 };
    (0u32..1 << n)
        .map(|mask| subset(mask, n))
        .filter(|s| s.len() >= 2 && s.len() <= max_size)
        .filter(|s| root.is_none_or(|r| s.contains(&r)))
        .filter(|s| pds_holds(g, s) && (!connected || is_connected(g, s)))
        .map(|s| s.len())
        .max()
}

/// Every i ∈ C_p and q ≠ p: N(i,p)·|C_q| ≥ N(i,q)·(|C_p| − 1).
pub fn mutually_dense(g: &Graph, label: &[usize], k: usize) -> bool {
    let size = |p: usize| label.iter().filter(|&&l| l == p).count();
    let into = |i: usize, p: usize| g.neigh_row(i).iter_ones().filter(|&j| label[j] == p).count();
    (0..g.n()).all(|i| {
        let p = label[i];
        (0..k).filter(|&q| q != p).all(|q| into(i, p) * size(q) >= into(i, q) * (size(p) - 1))
    })
}

/// Whether some k-community (optionally connected) exists, by enumeration.
pub fn brute_partition_exists(g: &Graph, k: usize, connected: bool) -> bool {
    let n = g.n();
    let total = k.pow(n as u32);
    (0..total).any(|code| {
        let label: Vec<usize> = (0..n).map(|v| code / k.pow(v as u32) % k).collect();
        let groups: Vec<Vec<usize>> = (0..k).map(|p| (0..n).filter(|&v| label[v] == p).collect()).collect();
        groups.iter().all(|c| c.len() >= 2)
            && (!connected || groups.iter().all(|c| is_connected(g, c)))
            && mutually_dense(g, &label, k)
    })
}

/// Partition invariants: k labelled communities, each ≥ 2 members, every
/// vertex in exactly one, optionally each connected.
pub fn assert_partition(g: &Graph, part: &Partition, k: usize, connected: bool) {
    assert_eq!(part.k(), k);
    let mut label = vec![usize::MAX; g.n()];
    for (l, members) in part.iter() {
        assert!((1..=k).contains(&l), "label {l}");
        assert!(members.len() >= 2, "community {l} = {members:?}");
        for &v in members {
            assert_eq!(label[v], usize::MAX, "vertex {v} in two communities");
            label[v] = l - 1;
        }
        if connected {
            assert!(is_connected(g, members), "community {l} = {members:?} is not connected");
        }
    }
    assert!(label.iter().all(|&l| l != usize::MAX), "vertex without community");
    assert!(mutually_dense(g, &label, k));
}
