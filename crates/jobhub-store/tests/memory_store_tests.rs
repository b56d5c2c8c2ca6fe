use regex::RegexBuilder;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

use jobhub_core::{Category, Document, DocumentStore, Filter, FindOptions};
use jobhub_store::{load_dir, MemoryStore};

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => unreachable!("test documents are objects"),
    }
}

fn pattern(text: &str) -> regex::Regex {
    RegexBuilder::new(&regex::escape(text)).case_insensitive(true).build().unwrap()
}

fn jobs_store() -> MemoryStore {
    MemoryStore::from_documents(vec![
        doc(json!({"_id": "1", "title": "Rust Developer", "skills": ["rust", "tokio"], "applicants": ["u1"]})),
        doc(json!({"_id": "2", "title": "Designer", "description": "Works with developers"})),
        doc(json!({"_id": "3", "title": "Chef", "skills": ["cooking"]})),
        doc(json!({"_id": "4", "title": "Backend developer", "salary": {"min": 5000, "currency": "EUR"}})),
    ])
}

fn jobs_filter(text: &str) -> Filter {
    let fields: Vec<_> = ["title", "description", "skills"]
        .iter()
        .map(|f| Category::Jobs.field(f).unwrap())
        .collect();
    Filter::any_field_matches(&fields, &pattern(text))
}

#[tokio::test]
async fn or_filter_matches_any_field_case_insensitively() {
    let store = jobs_store();
    let hits = store.find(&jobs_filter("DEVELOPER"), &FindOptions::default()).await.unwrap();
    let ids: Vec<_> = hits.iter().map(|d| d["_id"].as_str().unwrap().to_string()).collect();
    assert_eq!(ids, ["1", "2", "4"]);
    assert_eq!(store.count(&jobs_filter("developer")).await.unwrap(), 3);
}

#[tokio::test]
async fn array_fields_match_by_element_or_joined_text() {
    let store = jobs_store();
    assert_eq!(store.count(&jobs_filter("tokio")).await.unwrap(), 1);
    // Only the joined representation "rust tokio" contains this.
    assert_eq!(store.count(&jobs_filter("rust tok")).await.unwrap(), 1);
}

#[tokio::test]
async fn count_ignores_paging_while_find_applies_it() {
    let store = jobs_store();
    let options = FindOptions { skip: 1, limit: Some(1), exclude: vec![] };
    let page = store.find(&jobs_filter("developer"), &options).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["_id"], "2");
    assert_eq!(store.count(&jobs_filter("developer")).await.unwrap(), 3);
}

#[tokio::test]
async fn excluded_fields_are_projected_out() {
    let store = jobs_store();
    let options = FindOptions {
        skip: 0,
        limit: None,
        exclude: vec![Category::Jobs.field("applicants").unwrap(), Category::Jobs.field("salary.min").unwrap()],
    };
    let all = store.find(&jobs_filter("developer"), &options).await.unwrap();
    assert!(all.iter().all(|d| !d.contains_key("applicants")));
    assert_eq!(all[2]["salary"], json!({"currency": "EUR"}));
}

#[tokio::test]
async fn empty_disjunction_matches_nothing() {
    let store = jobs_store();
    assert_eq!(store.count(&Filter::Or(vec![])).await.unwrap(), 0);
}

#[test]
fn load_dir_binds_files_to_categories() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("jobs.json"), r#"[{"title": "Rust Developer"}, {"title": "Chef"}]"#).unwrap();
    fs::write(dir.join("quickJobs.jsonl"), "{\"title\": \"Move a sofa\"}\n\n{\"title\": \"Walk a dog\"}\n").unwrap();
    fs::write(dir.join("stories.json"), "[]").unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let stores = load_dir(dir).expect("load");
    assert_eq!(stores.len(), Category::ALL.len(), "every category gets a store");

    let rt = tokio::runtime::Runtime::new().unwrap();
    let everything = Filter::Matches { field: Category::Jobs.field("title").unwrap(), pattern: pattern("") };
    let jobs = rt.block_on(stores[&Category::Jobs].count(&everything)).unwrap();
    assert_eq!(jobs, 2);
    let quick_title = Filter::Matches { field: Category::QuickJobs.field("title").unwrap(), pattern: pattern("") };
    assert_eq!(rt.block_on(stores[&Category::QuickJobs].count(&quick_title)).unwrap(), 2);
    assert_eq!(rt.block_on(stores[&Category::Users].count(&quick_title)).unwrap(), 0);
}

#[test]
fn load_dir_rejects_missing_directory_and_bad_json() {
    let tmp = TempDir::new().unwrap();
    assert!(load_dir(&tmp.path().join("missing")).is_err());

    fs::write(tmp.path().join("users.json"), "[{\"fullName\": ").unwrap();
    assert!(load_dir(tmp.path()).is_err());
}
