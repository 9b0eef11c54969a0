//! GEXF exports of the signature and flanking graphs.

use std::io::Write;

use petgraph::visit::EdgeRef;

use crate::algorithms::flanking::FlankingGraph;
use crate::algorithms::spots::SpotGraph;
use crate::types::PanRgpError;

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_header<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, r#"<gexf xmlns="http://gexf.net/1.2" version="1.2">"#)?;
    writeln!(writer, r#"  <graph defaultedgetype="undirected">"#)
}

fn write_footer<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</gexf>")
}

/// Writes the border-signature graph: one node per signature labelled with
/// its canonical key, one edge per similarity match.
///
/// # Errors
///
/// Returns [`PanRgpError::IoError`] if writing fails.
pub fn write_spot_graph<W: Write>(mut writer: W, spot_graph: &SpotGraph) -> Result<(), PanRgpError> {
    write_header(&mut writer)?;
    writeln!(writer, r#"    <attributes class="node">"#)?;
    writeln!(
        writer,
        r#"      <attribute id="0" title="nb_rgp" type="long"/>"#
    )?;
    writeln!(writer, "    </attributes>")?;

    writeln!(writer, "    <nodes>")?;
    for node in spot_graph.graph.node_indices() {
        let weight = &spot_graph.graph[node];
        writeln!(
            writer,
            r#"      <node id="{}" label="{}">"#,
            node.index(),
            escape(&weight.key)
        )?;
        writeln!(
            writer,
            r#"        <attvalues><attvalue for="0" value="{}"/></attvalues>"#,
            weight.rgp_count()
        )?;
        writeln!(writer, "      </node>")?;
    }
    writeln!(writer, "    </nodes>")?;

    writeln!(writer, "    <edges>")?;
    for (id, edge) in spot_graph.graph.edge_references().enumerate() {
        writeln!(
            writer,
            r#"      <edge id="{}" source="{}" target="{}"/>"#,
            id,
            edge.source().index(),
            edge.target().index()
        )?;
    }
    writeln!(writer, "    </edges>")?;
    write_footer(&mut writer)?;
    Ok(())
}

/// Writes the spot-level flanking graph; edge weights carry the number of
/// shared flanking family sets.
///
/// # Errors
///
/// Returns [`PanRgpError::IoError`] if writing fails.
pub fn write_flanking_graph<W: Write>(
    mut writer: W,
    flanking_graph: &FlankingGraph,
) -> Result<(), PanRgpError> {
    write_header(&mut writer)?;
    writeln!(writer, r#"    <attributes class="node">"#)?;
    writeln!(
        writer,
        r#"      <attribute id="0" title="nb_rgp" type="long"/>"#
    )?;
    writeln!(
        writer,
        r#"      <attribute id="1" title="nb_organisations" type="long"/>"#
    )?;
    writeln!(writer, "    </attributes>")?;

    writeln!(writer, "    <nodes>")?;
    for node in flanking_graph.node_indices() {
        let weight = flanking_graph[node];
        writeln!(
            writer,
            r#"      <node id="{}" label="spot_{}">"#,
            node.index(),
            weight.spot
        )?;
        writeln!(writer, "        <attvalues>")?;
        writeln!(
            writer,
            r#"          <attvalue for="0" value="{}"/>"#,
            weight.rgp_count
        )?;
        writeln!(
            writer,
            r#"          <attvalue for="1" value="{}"/>"#,
            weight.organisation_count
        )?;
        writeln!(writer, "        </attvalues>")?;
        writeln!(writer, "      </node>")?;
    }
    writeln!(writer, "    </nodes>")?;

    writeln!(writer, "    <edges>")?;
    for (id, edge) in flanking_graph.edge_references().enumerate() {
        writeln!(
            writer,
            r#"      <edge id="{}" source="{}" target="{}" weight="{}"/>"#,
            id,
            edge.source().index(),
            edge.target().index(),
            edge.weight()
        )?;
    }
    writeln!(writer, "    </edges>")?;
    write_footer(&mut writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::flanking::FlankingNode;
    use crate::algorithms::spots::SignatureNode;
    use petgraph::graph::UnGraph;

    #[test]
    fn test_spot_graph_export() {
        let mut graph = UnGraph::new_undirected();
        let a = graph.add_node(SignatureNode {
            key: "[1, 2]|[3, 4]".to_string(),
            borders: [vec![1, 2], vec![3, 4]],
            regions: vec![0, 1],
        });
        let b = graph.add_node(SignatureNode {
            key: "[1, 2]|[3, 5]".to_string(),
            borders: [vec![1, 2], vec![3, 5]],
            regions: vec![2],
        });
        graph.add_edge(a, b, ());
        let spot_graph = SpotGraph { graph, lost: 0 };

        let mut buffer = Vec::new();
        write_spot_graph(&mut buffer, &spot_graph).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(text.contains(r#"<node id="0" label="[1, 2]|[3, 4]">"#));
        assert!(text.contains(r#"<attvalue for="0" value="2"/>"#));
        assert!(text.contains(r#"<edge id="0" source="0" target="1"/>"#));
        assert!(text.ends_with("</gexf>\n"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let mut graph = UnGraph::new_undirected();
        graph.add_node(SignatureNode {
            key: "a<b&\"c\"".to_string(),
            borders: [vec![1], vec![2]],
            regions: vec![0],
        });
        let spot_graph = SpotGraph { graph, lost: 0 };

        let mut buffer = Vec::new();
        write_spot_graph(&mut buffer, &spot_graph).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("a&lt;b&amp;&quot;c&quot;"));
    }

    #[test]
    fn test_flanking_graph_export() {
        let mut graph = FlankingGraph::new_undirected();
        let a = graph.add_node(FlankingNode {
            spot: 0,
            rgp_count: 3,
            organisation_count: 2,
        });
        let b = graph.add_node(FlankingNode {
            spot: 1,
            rgp_count: 1,
            organisation_count: 1,
        });
        graph.add_edge(a, b, 2);

        let mut buffer = Vec::new();
        write_flanking_graph(&mut buffer, &graph).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains(r#"<node id="0" label="spot_0">"#));
        assert!(text.contains(r#"<attvalue for="1" value="2"/>"#));
        assert!(text.contains(r#"<edge id="0" source="0" target="1" weight="2"/>"#));
    }
}
