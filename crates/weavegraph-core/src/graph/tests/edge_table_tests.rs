use crate::{EdgeTable, GraphError, NodeId};

fn id(index: usize) -> NodeId {
    NodeId::from(index)
}

#[test]
fn add_vertex_is_idempotent() {
    let mut table: EdgeTable<u8> = EdgeTable::new();
    table.add_vertex(id(0));
    table.add_edge(id(0), None, 1).expect("source exists");
    table.add_vertex(id(0));

    assert_eq!(table.vertex_count(), 1);
    assert_eq!(table.edges(id(0)).len(), 1);
}

#[test]
fn add_edge_requires_known_source() {
    let mut table: EdgeTable<u8> = EdgeTable::new();
    let err = table
        .add_edge(id(7), Some(id(1)), 0)
        .expect_err("unknown source should fail");
    assert_eq!(err, GraphError::MissingVertex { node_id: id(7) });
}

#[test]
fn unknown_vertex_has_no_edges() {
    let table: EdgeTable<u8> = EdgeTable::new();
    assert!(table.edges(id(3)).is_empty());
    assert_eq!(table.total_visits(id(3)), 0);
}

#[test]
fn pending_edge_is_completed_in_place() {
    let mut table: EdgeTable<&str> = EdgeTable::new();
    table.add_vertex(id(0));
    table.add_edge(id(0), None, "left").expect("pending edge");
    assert!(table.edge(id(0), &"left").expect("edge exists").is_pending());

    table.add_edge(id(0), Some(id(1)), "left").expect("resolve");
    let edge = table.edge(id(0), &"left").expect("edge exists");
    assert_eq!(edge.destination(), Some(id(1)));
    assert_eq!(table.edges(id(0)).len(), 1);
    assert!(table.contains_vertex(id(1)));
}

#[test]
fn retargeting_keeps_statistics() {
    let mut table: EdgeTable<u8> = EdgeTable::new();
    table.add_vertex(id(0));
    table.add_edge(id(0), Some(id(1)), 0).expect("edge");
    assert!(table.record(id(0), 0, 2.0));

    table.add_edge(id(0), Some(id(2)), 0).expect("retarget");
    let edge = table.edge(id(0), &0).expect("edge exists");
    assert_eq!(edge.destination(), Some(id(2)));
    assert_eq!(edge.visits(), 1);
}

#[test]
fn closing_a_cycle_is_rejected() {
    let mut table: EdgeTable<u8> = EdgeTable::new();
    table.add_vertex(id(0));
    table.add_edge(id(0), Some(id(1)), 0).expect("0 -> 1");
    table.add_edge(id(1), Some(id(2)), 0).expect("1 -> 2");

    assert!(table.path_exists(id(0), id(2)));
    let err = table
        .add_edge(id(2), Some(id(0)), 0)
        .expect_err("2 -> 0 closes a cycle");
    assert_eq!(
        err,
        GraphError::CycleDetected {
            origin: id(2),
            destination: id(0),
        }
    );
    assert!(table.edges(id(2)).is_empty());
}

#[test]
fn self_loop_is_a_cycle() {
    let mut table: EdgeTable<u8> = EdgeTable::new();
    table.add_vertex(id(0));
    assert!(table.path_exists(id(0), id(0)));
    assert!(table.add_edge(id(0), Some(id(0)), 1).is_err());
}

#[test]
fn path_exists_ignores_pending_edges() {
    let mut table: EdgeTable<u8> = EdgeTable::new();
    table.add_vertex(id(0));
    table.add_vertex(id(1));
    table.add_edge(id(0), None, 0).expect("pending");

    assert!(!table.path_exists(id(0), id(1)));
    assert!(!table.path_exists(id(0), id(9)));
}

#[test]
fn record_recreates_missing_edge() {
    let mut table: EdgeTable<u8> = EdgeTable::new();
    table.add_vertex(id(0));

    assert!(!table.record(id(0), 4, 1.5));
    let edge = table.edge(id(0), &4).expect("edge recreated");
    assert_eq!(edge.visits(), 1);
    assert!((edge.stats().total_value() - 1.5).abs() < f64::EPSILON);
}
