use std::fs;
use tempfile::TempDir;

use packkb_core::loader::load_knowledge_base;
use packkb_core::types::KnowledgeItem;

const FULL_HEADER: &str =
    "item,category,destination_type,travel_type,season,quantity,reason,importance,tags,climate";

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write csv");
    path
}

#[test]
fn loads_rows_in_order_with_split_lists() {
    let tmp = TempDir::new().expect("tempdir");
    let csv = format!(
        "{FULL_HEADER}\n\
         Passport,documents,international,business,all,1,Required for travel,critical,essential;documents,any\n\
         \"Ski jacket\",clothing,mountain,leisure,\"winter, autumn\",1,Keeps you warm,high,warm;outer-layer,cold;alpine\n"
    );
    let path = write_csv(&tmp, "kb.csv", &csv);

    let items = load_knowledge_base(&path).expect("load");

    assert_eq!(items.len(), 2, "one KnowledgeItem per data row");
    assert_eq!(items[0].item, "Passport");
    assert_eq!(items[0].season, vec!["all"]);
    assert_eq!(items[0].quantity, 1);
    assert_eq!(items[0].tags, vec!["essential", "documents"]);
    assert_eq!(items[0].climate, vec!["any"]);

    assert_eq!(items[1].item, "Ski jacket");
    // comma splits season, semicolon splits tags/climate, order preserved
    assert_eq!(items[1].season, vec!["winter", "autumn"]);
    assert_eq!(items[1].tags, vec!["warm", "outer-layer"]);
    assert_eq!(items[1].climate, vec!["cold", "alpine"]);
}

#[test]
fn empty_sub_values_are_dropped() {
    let tmp = TempDir::new().expect("tempdir");
    let csv = format!(
        "{FULL_HEADER}\n\
         Sunscreen,toiletries,beach,leisure,\"summer,\",2,Avoid sunburn,high,essential;;sun,hot; \n"
    );
    let path = write_csv(&tmp, "kb.csv", &csv);

    let items = load_knowledge_base(&path).expect("load");

    assert_eq!(items[0].season, vec!["summer"], "trailing comma drops nothing extra");
    assert_eq!(items[0].tags, vec!["essential", "sun"], "double semicolon yields no empty entry");
    assert_eq!(items[0].climate, vec!["hot"], "whitespace-only entry dropped");
}

#[test]
fn optional_columns_default_to_empty() {
    let tmp = TempDir::new().expect("tempdir");
    let csv = "item,category,destination_type,travel_type,season,quantity,reason,importance\n\
               Towel,toiletries,beach,leisure,summer,1,Drying off,medium\n";
    let path = write_csv(&tmp, "kb.csv", csv);

    let items = load_knowledge_base(&path).expect("load");

    assert!(items[0].tags.is_empty());
    assert!(items[0].climate.is_empty());
}

#[test]
fn missing_required_column_fails() {
    let tmp = TempDir::new().expect("tempdir");
    let csv = "item,category,destination_type,travel_type,season,reason,importance\n\
               Towel,toiletries,beach,leisure,summer,Drying off,medium\n";
    let path = write_csv(&tmp, "kb.csv", csv);

    let err = load_knowledge_base(&path).expect_err("must fail");
    assert!(
        err.to_string().contains("missing required column: quantity"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn non_numeric_quantity_fails_with_row_context() {
    let tmp = TempDir::new().expect("tempdir");
    let csv = format!(
        "{FULL_HEADER}\n\
         Towel,toiletries,beach,leisure,summer,1,Drying off,medium,,\n\
         Socks,clothing,city,business,all,lots,Fresh feet,high,,\n"
    );
    let path = write_csv(&tmp, "kb.csv", &csv);

    let err = load_knowledge_base(&path).expect_err("must fail");
    let msg = err.to_string();
    assert!(msg.contains("invalid quantity"), "unexpected error: {msg}");
    assert!(msg.contains("row 3"), "row number points at the bad line: {msg}");
}

#[test]
fn missing_file_reports_not_found() {
    let tmp = TempDir::new().expect("tempdir");
    let err = load_knowledge_base(&tmp.path().join("nope.csv")).expect_err("must fail");
    assert!(
        err.to_string().contains("knowledge base not found"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn embedding_text_matches_template_and_is_deterministic() {
    let item = KnowledgeItem {
        item: "Passport".to_string(),
        category: "documents".to_string(),
        destination_type: "international".to_string(),
        travel_type: "business".to_string(),
        season: vec!["all".to_string()],
        quantity: 1,
        reason: "required".to_string(),
        importance: "critical".to_string(),
        tags: vec!["essential".to_string(), "documents".to_string()],
        climate: vec!["any".to_string()],
    };

    let expected = "Item: Passport\n\
                    Category: documents\n\
                    Travel Type: business\n\
                    Destination: international\n\
                    Season: all\n\
                    Reason: required\n\
                    Tags: essential, documents\n\
                    Climate: any\n\
                    Importance: critical";
    assert_eq!(item.embedding_text(), expected);
    assert_eq!(item.embedding_text(), item.embedding_text());
}
