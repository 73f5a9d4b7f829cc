//! Order-insensitive structural comparison of document trees.

use serde_yaml::{Mapping, Value};

use crate::document::{NodePath, PathSegment};

/// Keys used to pair up mapping elements of two sequences, in priority order.
const IDENTITY_KEYS: [&str; 2] = ["id", "name"];

/// A single difference between two trees.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawChange {
    /// Node only present in the second tree.
    Added(NodePath),
    /// Node only present in the first tree.
    Removed(NodePath),
    /// Node present in both with a different value or type.
    Changed {
        path: NodePath,
        old: Value,
        new: Value,
    },
}

/// Compare two trees, returning changes in traversal order.
pub(crate) fn structural_diff(a: &Value, b: &Value) -> Vec<RawChange> {
    let mut changes = Vec::new();
    diff_node(&NodePath::root(), a, b, &mut changes);
    changes
}

fn diff_node(path: &NodePath, a: &Value, b: &Value, out: &mut Vec<RawChange>) {
    match (a, b) {
        (Value::Mapping(a), Value::Mapping(b)) => diff_mappings(path, a, b, out),
        (Value::Sequence(a), Value::Sequence(b)) => diff_sequences(path, a, b, out),
        _ if a == b => {}
        _ => out.push(RawChange::Changed {
            path: path.clone(),
            old: a.clone(),
            new: b.clone(),
        }),
    }
}

fn diff_mappings(path: &NodePath, a: &Mapping, b: &Mapping, out: &mut Vec<RawChange>) {
    for (key, a_value) in a {
        let child = path.child(PathSegment::from_key(key));
        match b.get(key) {
            Some(b_value) => diff_node(&child, a_value, b_value, out),
            None => out.push(RawChange::Removed(child)),
        }
    }
    for key in b.keys() {
        if !a.contains_key(key) {
            out.push(RawChange::Added(path.child(PathSegment::from_key(key))));
        }
    }
}

/// Compare sequences as multisets.
///
/// Equal elements cancel out one for one. Leftover mappings are paired by
/// identity key, then positionally unless their identities conflict, and
/// compared recursively under the first tree's index. Whatever is still
/// unpaired is removed or added.
fn diff_sequences(path: &NodePath, a: &[Value], b: &[Value], out: &mut Vec<RawChange>) {
    let mut consumed = vec![false; a.len()];
    let mut rest_b = Vec::new();
    for (j, item) in b.iter().enumerate() {
        match (0..a.len()).find(|&i| !consumed[i] && a[i] == *item) {
            Some(i) => consumed[i] = true,
            None => rest_b.push(j),
        }
    }
    let mut rest_a: Vec<usize> = (0..a.len()).filter(|&i| !consumed[i]).collect();

    let mut pairs = Vec::new();
    for key in IDENTITY_KEYS {
        rest_b.retain(|&j| {
            let Some(identity) = b[j].as_mapping().and_then(|m| m.get(key)) else {
                return true;
            };
            let partner = rest_a.iter().position(|&i| {
                a[i].as_mapping().and_then(|m| m.get(key)) == Some(identity)
            });
            match partner {
                Some(pos) => {
                    pairs.push((rest_a.remove(pos), j));
                    false
                }
                None => true,
            }
        });
    }

    let mappings_a: Vec<usize> = rest_a.iter().copied().filter(|&i| a[i].is_mapping()).collect();
    let mut mappings_b: Vec<usize> =
        rest_b.iter().copied().filter(|&j| b[j].is_mapping()).collect();
    for i in mappings_a {
        let Some(pos) = mappings_b
            .iter()
            .position(|&j| !identities_conflict(&a[i], &b[j]))
        else {
            continue;
        };
        let j = mappings_b.remove(pos);
        pairs.push((i, j));
        rest_a.retain(|&x| x != i);
        rest_b.retain(|&x| x != j);
    }

    pairs.sort_unstable();
    for (i, j) in pairs {
        diff_node(&path.child(PathSegment::Index(i)), &a[i], &b[j], out);
    }
    for i in rest_a {
        out.push(RawChange::Removed(path.child(PathSegment::Index(i))));
    }
    for j in rest_b {
        out.push(RawChange::Added(path.child(PathSegment::Index(j))));
    }
}

/// Both elements name themselves under the same identity key, differently.
fn identities_conflict(a: &Value, b: &Value) -> bool {
    IDENTITY_KEYS
        .iter()
        .any(|key| matches!((a.get(*key), b.get(*key)), (Some(x), Some(y)) if x != y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::display_value;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    fn rendered(changes: &[RawChange]) -> Vec<String> {
        changes
            .iter()
            .map(|c| match c {
                RawChange::Added(p) => format!("+ {p}"),
                RawChange::Removed(p) => format!("- {p}"),
                RawChange::Changed { path, old, new } => {
                    format!("~ {path} {} -> {}", display_value(old), display_value(new))
                }
            })
            .collect()
    }

    #[test]
    fn test_identical_trees() {
        let v = yaml("{a: 1, b: [1, 2, {c: 3}]}");
        assert!(structural_diff(&v, &v).is_empty());
    }

    #[test]
    fn test_mapping_keys_added_and_removed() {
        let changes = structural_diff(&yaml("{a: 1, b: 2}"), &yaml("{b: 2, c: 3}"));
        assert_eq!(rendered(&changes), vec!["- root['a']", "+ root['c']"]);
    }

    #[test]
    fn test_scalar_change() {
        let changes = structural_diff(&yaml("{port: 80}"), &yaml("{port: 81}"));
        assert_eq!(
            changes,
            vec![RawChange::Changed {
                path: NodePath::root().child(PathSegment::Key("port".into())),
                old: yaml("80"),
                new: yaml("81"),
            }]
        );
    }

    #[test]
    fn test_type_change_is_a_change() {
        let changes = structural_diff(&yaml("{port: 80}"), &yaml("{port: '80'}"));
        assert_eq!(changes.len(), 1);
        assert!(matches!(changes[0], RawChange::Changed { .. }));

        let changes = structural_diff(&yaml("{x: [1]}"), &yaml("{x: {a: 1}}"));
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_sequence_order_ignored() {
        let a = yaml("[{id: u1, port: 80}, {id: u2, port: 81}, 7]");
        let b = yaml("[7, {id: u2, port: 81}, {id: u1, port: 80}]");
        assert!(structural_diff(&a, &b).is_empty());
    }

    #[test]
    fn test_sequence_multiplicity_counts() {
        let changes = structural_diff(&yaml("[x, x, y]"), &yaml("[x, y]"));
        assert_eq!(rendered(&changes), vec!["- root[1]"]);

        let changes = structural_diff(&yaml("[x]"), &yaml("[x, x]"));
        assert_eq!(rendered(&changes), vec!["+ root[1]"]);
    }

    #[test]
    fn test_elements_paired_by_id() {
        let a = yaml("[{id: u1, port: 80}, {id: u2, port: 90}]");
        let b = yaml("[{id: u2, port: 90}, {id: u1, port: 81}]");
        let changes = structural_diff(&a, &b);
        assert_eq!(rendered(&changes), vec!["~ root[0]['port'] 80 -> 81"]);
    }

    #[test]
    fn test_elements_paired_by_name() {
        let a = yaml("[{name: svc1, uri: /a}, {name: svc2, uri: /b}]");
        let b = yaml("[{name: svc2, uri: /b}, {name: svc1, uri: /z}]");
        let changes = structural_diff(&a, &b);
        assert_eq!(changes.len(), 1);
        assert!(rendered(&changes)[0].starts_with("~ root[0]['uri']"));
    }

    #[test]
    fn test_replaced_identity_is_removed_and_added() {
        let a = yaml("[{id: u1, port: 80}, {id: u2, port: 81}]");
        let b = yaml("[{id: u1, port: 80}, {id: u3, port: 81}]");
        let changes = structural_diff(&a, &b);
        assert_eq!(rendered(&changes), vec!["- root[1]", "+ root[1]"]);
    }

    #[test]
    fn test_anonymous_mappings_pair_by_position() {
        let a = yaml("[{port: 80}]");
        let b = yaml("[{port: 81}]");
        let changes = structural_diff(&a, &b);
        assert_eq!(rendered(&changes), vec!["~ root[0]['port'] 80 -> 81"]);

        // An id on only one side is not a conflict.
        let a = yaml("[{id: u1, port: 80}]");
        let b = yaml("[{port: 80}]");
        assert_eq!(rendered(&structural_diff(&a, &b)), vec!["- root[0]['id']"]);

        let a = yaml("[{id: u1, port: 80}, {id: u2, port: 81}]");
        let b = yaml("[{id: u1, port: 80}]");
        assert_eq!(rendered(&structural_diff(&a, &b)), vec!["- root[1]"]);
    }

    #[test]
    fn test_scalar_sequence_replacement() {
        let changes = structural_diff(&yaml("[1, 2]"), &yaml("[1, 3]"));
        assert_eq!(rendered(&changes), vec!["- root[1]", "+ root[1]"]);
    }
}
