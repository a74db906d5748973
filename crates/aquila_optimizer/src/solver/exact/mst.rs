use crate::problem::{graph::RouteGraph, node::NodeIdx};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MstWeight {
    pub distance: f64,
    pub risk: f64,
}

/// Prim's algorithm over the members' induced subgraph, keyed on edge
/// distance. The risk of each chosen edge is summed alongside; it is not a
/// risk-minimal tree, just the risk carried by the distance-minimal one.
pub(crate) fn prim_mst(graph: &RouteGraph, members: &[NodeIdx]) -> MstWeight {
    let n = members.len();
    if n <= 1 {
        return MstWeight::default();
    }

    let mut in_tree = vec![false; n];
    let mut key = vec![f64::INFINITY; n];
    let mut key_risk = vec![0.0; n];
    key[0] = 0.0;

    let mut total = MstWeight::default();

    for _ in 0..n {
        let Some(u) = (0..n)
            .filter(|&i| !in_tree[i])
            .min_by(|&a, &b| key[a].total_cmp(&key[b]))
        else {
            break;
        };
        if key[u].is_infinite() {
            break;
        }

        in_tree[u] = true;
        total.distance += key[u];
        total.risk += key_risk[u];

        for v in 0..n {
            if in_tree[v] {
                continue;
            }
            if let Some(weight) = graph.weight(members[u], members[v])
                && weight.distance < key[v]
            {
                key[v] = weight.distance;
                key_risk[v] = weight.risk;
            }
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn test_mst_of_line() {
        let graph = test_utils::open_field_line(&[0.0, 1.0, 2.0, 5.0]);
        let members: Vec<NodeIdx> = (0..4).map(NodeIdx::new).collect();

        let mst = prim_mst(&graph, &members);
        assert_eq!(mst.distance, 5.0);
        assert_eq!(mst.risk, 0.0);
    }

    #[test]
    fn test_mst_subset_of_members() {
        let graph = test_utils::open_field_line(&[0.0, 1.0, 2.0, 5.0]);
        let members = vec![NodeIdx::new(0), NodeIdx::new(3)];

        let mst = prim_mst(&graph, &members);
        assert_eq!(mst.distance, 5.0);
    }

    #[test]
    fn test_mst_single_member() {
        let graph = test_utils::open_field_line(&[0.0, 1.0]);
        let mst = prim_mst(&graph, &[NodeIdx::new(0)]);
        assert_eq!(mst.distance, 0.0);
    }
}
