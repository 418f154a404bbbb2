//! Flowchart structure extraction.

use crate::ocr::OcrResult;
use crate::types::{FlowchartEdge, FlowchartNode, StructuredRecord};

/// Parse nodes and edges from arrow notation in the recognized text.
///
/// A line with exactly one `->` (or `→`) produces two `process` nodes and a
/// directed edge between them. Lines with more than one arrow are dropped
/// entirely. Arrowless lines become standalone nodes. Node ids are
/// monotonically increasing from 1 within one extraction.
pub fn extract_flowchart(ocr: &OcrResult) -> StructuredRecord {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut node_id: u32 = 1;

    for line in ocr.text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains("->") || line.contains('→') {
            let parts: Vec<&str> = line
                .split("->")
                .flat_map(|p| p.split('→'))
                .collect();
            if parts.len() == 2 {
                let from = parts[0].trim();
                let to = parts[1].trim();

                nodes.push(FlowchartNode {
                    id: node_id,
                    label: from.to_string(),
                    node_type: "process".to_string(),
                });
                nodes.push(FlowchartNode {
                    id: node_id + 1,
                    label: to.to_string(),
                    node_type: "process".to_string(),
                });
                edges.push(FlowchartEdge {
                    from: node_id,
                    to: node_id + 1,
                    label: String::new(),
                });
                node_id += 2;
            }
            // Multi-arrow lines are ambiguous and are skipped without
            // consuming an id.
        } else {
            nodes.push(FlowchartNode {
                id: node_id,
                label: line.to_string(),
                node_type: "process".to_string(),
            });
            node_id += 1;
        }
    }

    StructuredRecord::Flowchart { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flowchart(text: &str) -> (Vec<FlowchartNode>, Vec<FlowchartEdge>) {
        match extract_flowchart(&OcrResult::from_text(text)) {
            StructuredRecord::Flowchart { nodes, edges } => (nodes, edges),
            other => panic!("expected flowchart, got {:?}", other),
        }
    }

    #[test]
    fn test_single_arrow_line() {
        let (nodes, edges) = flowchart("Start -> End");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].label, "Start");
        assert_eq!(nodes[0].id, 1);
        assert_eq!(nodes[1].label, "End");
        assert_eq!(nodes[1].id, 2);
        assert_eq!(edges, vec![FlowchartEdge { from: 1, to: 2, label: String::new() }]);
    }

    #[test]
    fn test_unicode_arrow() {
        let (nodes, edges) = flowchart("Login → Dashboard");
        assert_eq!(nodes[0].label, "Login");
        assert_eq!(nodes[1].label, "Dashboard");
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn test_multi_arrow_line_dropped() {
        let (nodes, edges) = flowchart("A -> B -> C");
        assert!(nodes.is_empty());
        assert!(edges.is_empty());
    }

    #[test]
    fn test_arrowless_line_is_standalone_node() {
        let (nodes, edges) = flowchart("Start\nValidate input\nEnd");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].label, "Validate input");
        assert!(edges.is_empty());
    }

    #[test]
    fn test_ids_stay_monotonic_across_mixed_lines() {
        let (nodes, edges) = flowchart("Init\nA -> B\nDone");
        // Init=1, A=2, B=3, Done=4.
        let ids: Vec<u32> = nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(edges[0].from, 2);
        assert_eq!(edges[0].to, 3);
    }

    #[test]
    fn test_dropped_line_does_not_consume_ids() {
        let (nodes, _) = flowchart("A -> B -> C\nNext");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, 1);
        assert_eq!(nodes[0].label, "Next");
    }

    #[test]
    fn test_all_nodes_are_process_type() {
        let (nodes, _) = flowchart("A -> B\nC");
        assert!(nodes.iter().all(|n| n.node_type == "process"));
    }

    #[test]
    fn test_empty_input() {
        let (nodes, edges) = flowchart("");
        assert!(nodes.is_empty());
        assert!(edges.is_empty());
    }
}
