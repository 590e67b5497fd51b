use crate::diagram::parse;
use crate::graph::{find_paths, find_roots, JoinGraph};
use std::fs;
use std::path::PathBuf;

/// Print the parsed model and the resolved join paths for a diagram.
pub fn run(file: PathBuf) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("input file does not exist: {}", file.display());
    }

    let diagram_text = fs::read_to_string(&file)?;
    let diagram = parse(&diagram_text);

    if diagram.is_empty() && diagram.joins.is_empty() {
        println!("No tables or relationships found in diagram.");
        return Ok(());
    }

    println!("Found {} tables:\n", diagram.len());
    for table in diagram.iter() {
        println!("{} {{", table.name);
        for column in &table.columns {
            let mut flags = String::new();
            if column.is_primary_key {
                flags.push_str(" PK");
            }
            if column.is_foreign_key {
                flags.push_str(" FK");
            }
            println!("    {} {}{}", column.declared_type, column.name, flags);
        }
        println!("}}");
    }

    if !diagram.joins.is_empty() {
        println!("\nFound {} joins:", diagram.joins.len());
        for join in &diagram.joins {
            let cardinality = if join.is_one_to_one { "1:1" } else { "N:1" };
            println!(
                "  {} -> {} ({} = {}) [{}]",
                join.source, join.destination, join.source_column, join.destination_column,
                cardinality
            );
        }
    }

    let graph = JoinGraph::from_joins(&diagram.joins);
    if graph.is_empty() {
        return Ok(());
    }

    let roots = find_roots(&graph);
    let paths = find_paths(&graph, &roots);

    println!("\nRoot nodes: {:?}", roots);
    let mut nodes: Vec<_> = paths.keys().cloned().collect();
    nodes.sort();
    for node in &nodes {
        println!("\nPaths to {}:", node);
        for path in &paths[node] {
            if path.is_empty() {
                println!("  {} (root)", node);
            } else {
                let hops: Vec<&str> = path
                    .iter()
                    .map(|j| j.source.as_str())
                    .chain(std::iter::once(node.as_str()))
                    .collect();
                println!("  {}", hops.join(" -> "));
                for join in path {
                    println!(
                        "    {} -> {} ({} = {})",
                        join.source, join.destination, join.source_column, join.destination_column
                    );
                }
            }
        }
    }

    Ok(())
}
