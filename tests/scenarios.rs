mod common;

use common::*;
use pdsc::{
    find_connected_k_community, find_connected_max_community, find_k_community, find_max_community,
    graph::pds_holds, solve, Detection, Error, Graph, MaxCommunity, MicroLpSolver, Outcome, Params,
    ValidationError, Variant,
};

fn triangle() -> Graph {
    Graph::from_adjacency(&[[0u8, 1, 1], [1, 0, 1], [1, 1, 0]]).unwrap()
}

fn two_edges() -> Graph {
    Graph::from_adjacency(&[[0u8, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 1], [0, 0, 1, 0]]).unwrap()
}

fn found<T: std::fmt::Debug>(o: Outcome<T>) -> T {
    match o {
        Outcome::Found(t) => t,
        other => panic!("expected a structure, got {other:?}"),
    }
}

/*────────────────── max-community ──────────────────*/

#[test]
fn triangle_whole_graph_when_allowed() {
    init_logging();
    let p = Params { allow_whole_graph: true, ..Params::default() };
    let best = found(find_max_community(&triangle(), &mut MicroLpSolver::new(), &p).unwrap());
    assert_eq!(best, MaxCommunity { members: vec![0, 1, 2], size: 3 });
}

#[test]
fn triangle_proper_subset_by_default() {
    init_logging();
    let best = found(find_max_community(&triangle(), &mut MicroLpSolver::new(), &Params::default()).unwrap());
    assert_eq!(best.size, 2);
    assert!(pds_holds(&triangle(), &best.members));
}

#[test]
fn two_vertices_fail_validation() {
    let path2 = Graph::from_adjacency(&[[0u8, 1], [1, 0]]).unwrap();
    let err = find_max_community(&path2, &mut MicroLpSolver::new(), &Params::default()).unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::TooFewVertices { n: 2, required: 3 })));
    assert!(err.to_string().starts_with("graph has fewer than 3 vertices"));

    let err = find_connected_max_community(&path2, &mut MicroLpSolver::new(), &Params::default()).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn complete_graph_drops_one_vertex() {
    init_logging();
    let k4 = Graph::from_edge_list(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    let best = found(find_max_community(&k4, &mut MicroLpSolver::new(), &Params::default()).unwrap());
    assert_eq!(best.size, 3);
    assert!(pds_holds(&k4, &best.members));
}

#[test]
fn disconnected_edges_give_one_edge() {
    init_logging();
    let g = two_edges();
    for connected in [false, true] {
        let out = if connected {
            find_connected_max_community(&g, &mut MicroLpSolver::new(), &Params::default())
        } else {
            find_max_community(&g, &mut MicroLpSolver::new(), &Params::default())
        };
        let best = found(out.unwrap());
        assert_eq!(best.size, 2);
        if connected {
            // rooted at vertex 0 by default
            assert_eq!(best.members, vec![0, 1]);
        } else {
            assert!(best.members == vec![0, 1] || best.members == vec![2, 3], "{best:?}");
        }
    }
}

#[test]
fn connected_max_community_contains_vertex_zero() {
    init_logging();
    // vertex 0 isolated, 1..=4 a clique
    let g = Graph::from_edge_list(5, &[(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]);

    let out = find_connected_max_community(&g, &mut MicroLpSolver::new(), &Params::default()).unwrap();
    assert_eq!(out, Outcome::Infeasible);

    let free = Params { anchor: None, ..Params::default() };
    let best = found(find_connected_max_community(&g, &mut MicroLpSolver::new(), &free).unwrap());
    assert_eq!(best, MaxCommunity { members: vec![1, 2, 3, 4], size: 4 });

    let best = found(find_max_community(&g, &mut MicroLpSolver::new(), &Params::default()).unwrap());
    assert_eq!(best.members, vec![1, 2, 3, 4]);
}

#[test]
fn anchored_root_is_a_member() {
    init_logging();
    let p = Params { anchor: Some(2), ..Params::default() };
    let best = found(find_connected_max_community(&two_edges(), &mut MicroLpSolver::new(), &p).unwrap());
    assert_eq!(best.members, vec![2, 3]);
}

#[test]
fn max_community_matches_enumeration() {
    init_logging();
    for seed in 0..4 {
        let g = random_graph(6, 0.5, seed);
        for connected in [false, true] {
            let variant = if connected { Variant::ConnectedMaxCommunity } else { Variant::MaxCommunity };
            let det = solve(&g, &variant, &mut MicroLpSolver::new(), &Params::default()).unwrap();
            let Detection::Set(out) = det else { panic!("set variant decoded as partition") };

            let root = connected.then_some(0);
            match brute_max_pds(&g, connected, false, root) {
                None => assert_eq!(out, Outcome::Infeasible, "seed {seed}"),
                Some(size) => {
                    let best = found(out);
                    assert_eq!(best.size, size, "seed {seed}, connected {connected}");
                    assert!((2..g.n()).contains(&best.size));
                    assert!(pds_holds(&g, &best.members));
                    if connected {
                        assert!(is_connected(&g, &best.members));
                        assert_eq!(best.members.first(), Some(&0));
                    }
                }
            }
        }
    }
}

/*────────────────── k-community ──────────────────*/

#[test]
fn two_edges_split_along_components() {
    init_logging();
    let g = two_edges();
    let part = found(find_connected_k_community(&g, 2, &mut MicroLpSolver::new(), &Params::default()).unwrap());
    // community 1 is rooted at vertex 0
    assert_eq!(part.community(1), Some(&[0, 1][..]));
    assert_eq!(part.community(2), Some(&[2, 3][..]));

    let part = found(find_k_community(&g, 2, &mut MicroLpSolver::new(), &Params::default()).unwrap());
    assert_partition(&g, &part, 2, false);
    assert_eq!(part.label_of(0), part.label_of(1));
    assert_eq!(part.label_of(2), part.label_of(3));
}

#[test]
fn path_splits_in_the_middle() {
    init_logging();
    let p4 = Graph::from_edge_list(4, &[(0, 1), (1, 2), (2, 3)]);
    let part = found(find_connected_k_community(&p4, 2, &mut MicroLpSolver::new(), &Params::default()).unwrap());
    assert_eq!(part.community(1), Some(&[0, 1][..]));
    assert_eq!(part.community(2), Some(&[2, 3][..]));
}

#[test]
fn star_has_no_two_community() {
    init_logging();
    let star = Graph::from_edge_list(4, &[(0, 1), (0, 2), (0, 3)]);
    let p = Params::default();
    assert_eq!(find_k_community(&star, 2, &mut MicroLpSolver::new(), &p).unwrap(), Outcome::Infeasible);
    assert_eq!(
        find_connected_k_community(&star, 2, &mut MicroLpSolver::new(), &p).unwrap(),
        Outcome::Infeasible
    );
}

#[test]
fn complete_graph_any_balanced_split() {
    init_logging();
    let k4 = Graph::from_edge_list(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    let part = found(find_k_community(&k4, 2, &mut MicroLpSolver::new(), &Params::default()).unwrap());
    assert_partition(&k4, &part, 2, false);
}

#[test]
fn partition_preconditions() {
    let g = two_edges();
    let mut s = MicroLpSolver::new();
    let p = Params::default();
    assert!(matches!(
        find_k_community(&g, 3, &mut s, &p),
        Err(Error::Validation(ValidationError::TooManyCommunities { n: 4, k: 3 }))
    ));
    assert!(matches!(
        find_connected_k_community(&g, 1, &mut s, &p),
        Err(Error::Validation(ValidationError::TooFewCommunities { k: 1 }))
    ));
    assert!(matches!(
        find_k_community(&triangle(), 2, &mut s, &p),
        Err(Error::Validation(ValidationError::TooFewVertices { n: 3, required: 4 }))
    ));
}

#[test]
fn k_community_matches_enumeration() {
    init_logging();
    for seed in 10..13 {
        let g = random_graph(6, 0.5, seed);
        for connected in [false, true] {
            let out = if connected {
                find_connected_k_community(&g, 2, &mut MicroLpSolver::new(), &Params::default())
            } else {
                find_k_community(&g, 2, &mut MicroLpSolver::new(), &Params::default())
            }
            .unwrap();

            if brute_partition_exists(&g, 2, connected) {
                assert_partition(&g, &found(out), 2, connected);
            } else {
                assert_eq!(out, Outcome::Infeasible, "seed {seed}, connected {connected}");
            }
        }
    }
}

#[test]
fn repeated_solves_keep_invariants() {
    init_logging();
    let g = Graph::from_edge_list(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)]);
    for _ in 0..2 {
        let part = found(find_connected_k_community(&g, 2, &mut MicroLpSolver::new(), &Params::default()).unwrap());
        assert_partition(&g, &part, 2, true);
        assert_eq!(part.community(1), Some(&[0, 1, 2][..]));
    }
}
