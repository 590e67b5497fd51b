//! End-to-end tests for document generation from diagram text.

use tml_gen::diagram::parse;
use tml_gen::graph::{find_paths, find_roots, JoinGraph};
use tml_gen::tml::{generate, ColumnRole, DataType, TmlDocument};

const SALES_DIAGRAM: &str = r#"
erDiagram
    USER {
        int user_id PK
        varchar name
        date signup_date
    }
    ORDER {
        int order_id PK
        int user_id FK
        decimal total
        date order_date
    }
    ORDER_LINE {
        int line_id PK
        int order_id FK
        int quantity
    }
    USER ||--o{ ORDER : "USER.user_id = ORDER.user_id"
    ORDER ||--o{ ORDER_LINE : "ORDER.order_id = ORDER_LINE.order_id"
"#;

#[test]
fn test_generate_one_document_per_table_plus_worksheet() {
    let docs = generate(SALES_DIAGRAM, "sales");
    assert_eq!(docs.len(), 4);
    assert!(matches!(docs["USER_table"], TmlDocument::Table(_)));
    assert!(matches!(docs["ORDER_table"], TmlDocument::Table(_)));
    assert!(matches!(docs["ORDER_LINE_table"], TmlDocument::Table(_)));
    assert!(matches!(docs["sales_worksheet"], TmlDocument::Worksheet(_)));
}

#[test]
fn test_empty_diagram_yields_single_trivial_worksheet() {
    let docs = generate("no table bodies in here\njust prose\n", "empty");
    assert_eq!(docs.len(), 1);
    let ws = match &docs["empty_worksheet"] {
        TmlDocument::Worksheet(doc) => &doc.worksheet,
        other => panic!("expected worksheet, got {:?}", other),
    };
    assert!(ws.tables.is_empty());
    assert!(ws.joins.is_empty());
    assert!(ws.table_paths.is_empty());
    assert!(ws.worksheet_columns.is_empty());
}

#[test]
fn test_table_document_column_roles_and_types() {
    let docs = generate("A {\nint id PK\nvarchar name\n}\n", "w");
    let table = match &docs["A_table"] {
        TmlDocument::Table(doc) => &doc.table,
        other => panic!("expected table, got {:?}", other),
    };
    assert_eq!(table.columns.len(), 2);

    let id = &table.columns[0];
    assert_eq!(id.properties.column_type, ColumnRole::Attribute);
    assert_eq!(id.db_column_properties.data_type, DataType::Int64);

    let name = &table.columns[1];
    assert_eq!(name.properties.column_type, ColumnRole::Attribute);
    assert_eq!(name.db_column_properties.data_type, DataType::Varchar);
}

#[test]
fn test_join_listed_under_normalized_source_table() {
    let docs = generate(
        "A {\nint id PK\n}\nB {\nint a_id FK\n}\nA ||--o{ B : \"A.id = B.a_id\"",
        "w",
    );

    // B is the many side and becomes the traversal source.
    let b = match &docs["B_table"] {
        TmlDocument::Table(doc) => &doc.table,
        other => panic!("expected table, got {:?}", other),
    };
    assert_eq!(b.joins_with.len(), 1);
    assert_eq!(b.joins_with[0].destination.name, "A_TML");

    let a = match &docs["A_table"] {
        TmlDocument::Table(doc) => &doc.table,
        other => panic!("expected table, got {:?}", other),
    };
    assert!(a.joins_with.is_empty());
}

#[test]
fn test_chain_paths_in_worksheet() {
    let ws = match &generate(SALES_DIAGRAM, "sales")["sales_worksheet"] {
        TmlDocument::Worksheet(doc) => doc.worksheet.clone(),
        other => panic!("expected worksheet, got {:?}", other),
    };

    // Normalized direction: ORDER -> USER, ORDER_LINE -> ORDER, so the
    // traversal root is ORDER_LINE.
    let by_table: Vec<(&str, Option<usize>)> = ws
        .table_paths
        .iter()
        .map(|tp| {
            (
                tp.table.as_str(),
                tp.join_path.as_ref().map(|paths| paths.len()),
            )
        })
        .collect();
    assert_eq!(
        by_table,
        vec![
            ("USER_TML", Some(1)),
            ("ORDER_TML", Some(1)),
            ("ORDER_LINE_TML", None),
        ]
    );

    // USER is two joins away from the root.
    let user_paths = ws.table_paths[0].join_path.as_ref().unwrap();
    assert_eq!(user_paths[0].join.len(), 2);
    assert_eq!(
        user_paths[0].join[0],
        "ORDER_LINE order_id - ORDER order_id"
    );
    assert_eq!(user_paths[0].join[1], "ORDER user_id - USER user_id");
}

#[test]
fn test_diamond_retains_both_paths() {
    let diagram = r#"
A {
    int id PK
}
B {
    int a_id FK
}
C {
    int a_id FK
}
D {
    int b_id FK
}
A ||--o{ B : "A.id = B.a_id"
A ||--o{ C : "A.id = C.a_id"
B ||--o{ D : "B.id = D.b_id"
C ||--o{ D : "C.id = D.c_id"
"#;
    // Normalized: B->A, C->A, D->B, D->C; D is the single root and A is
    // reachable through both arms.
    let parsed = parse(diagram);
    let graph = JoinGraph::from_joins(&parsed.joins);
    let roots = find_roots(&graph);
    assert_eq!(roots, vec!["D"]);

    let paths = find_paths(&graph, &roots);
    assert_eq!(paths["A"].len(), 2);

    let ws = match &generate(diagram, "diamond")["diamond_worksheet"] {
        TmlDocument::Worksheet(doc) => doc.worksheet.clone(),
        other => panic!("expected worksheet, got {:?}", other),
    };
    let a_entry = ws.table_paths.iter().find(|tp| tp.table == "A_TML").unwrap();
    assert_eq!(a_entry.join_path.as_ref().unwrap().len(), 2);
}

#[test]
fn test_pure_cycle_gets_fallback_root() {
    let diagram = "A {\nint id PK\n}\nB {\nint a_id FK\n}\nA ||--|| B : \"A.id = B.a_id\"";
    let parsed = parse(diagram);
    let graph = JoinGraph::from_joins(&parsed.joins);
    let roots = find_roots(&graph);
    assert_eq!(roots, vec!["A"]);

    let paths = find_paths(&graph, &roots);
    assert!(!paths["A"].is_empty());
    assert!(!paths["B"].is_empty());
}

#[test]
fn test_worksheet_columns_round_trip_against_tables() {
    let docs = generate(SALES_DIAGRAM, "sales");
    let ws = match &docs["sales_worksheet"] {
        TmlDocument::Worksheet(doc) => doc.worksheet.clone(),
        other => panic!("expected worksheet, got {:?}", other),
    };

    let parsed = parse(SALES_DIAGRAM);
    let total_columns: usize = parsed.iter().map(|t| t.columns.len()).sum();
    assert_eq!(ws.worksheet_columns.len(), total_columns);

    // Every worksheet column must map back to exactly one declared
    // column, with the qualified id format intact.
    let mut cursor = ws.worksheet_columns.iter();
    for (i, table) in parsed.iter().enumerate() {
        for column in &table.columns {
            let ws_column = cursor.next().unwrap();
            let composite = format!("{} {}", table.name, column.name);
            assert_eq!(ws_column.name, composite);
            assert_eq!(
                ws_column.column_id,
                format!("{}_TML_{}::{}", table.name, i + 1, composite)
            );
        }
    }
    assert!(cursor.next().is_none());
}

#[test]
fn test_yaml_top_level_tags() {
    let docs = generate("A {\nint id PK\n}\n", "w");

    let table_yaml = serde_yaml::to_string(&docs["A_table"]).unwrap();
    assert!(table_yaml.starts_with("table:"));

    let ws_yaml = serde_yaml::to_string(&docs["w_worksheet"]).unwrap();
    assert!(ws_yaml.starts_with("worksheet:"));
}
