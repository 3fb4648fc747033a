use marktyp_render::{Lang, Options};
use marktyp_wasm::{markdown_to_typst, parse_tree, render, template_paths, template_source};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize, Debug)]
struct RenderResult {
    typst: String,
    title: String,
    authors: Vec<String>,
    lang: String,
    warnings: Vec<Warning>,
}

#[derive(Deserialize, Debug)]
struct Warning {
    #[serde(rename = "type")]
    kind: String,
}

fn options(options: Options) -> JsValue {
    serde_wasm_bindgen::to_value(&options).expect("serialize options")
}

#[wasm_bindgen_test]
fn converts_with_default_options() {
    let typst = markdown_to_typst("# Hello\n\nWorld", JsValue::UNDEFINED)
        .expect("conversion should succeed");
    assert_eq!(
        typst,
        "#import \"styles/modern-tech.typ\": article\n\n#show: article.with(title: \"Hello\", lang: \"zh\")\n\nWorld\n"
    );
}

#[wasm_bindgen_test]
fn honors_style_and_language() {
    let opts = options(Options {
        style: Some("classic-editorial".to_string()),
        lang: Some(Lang::En),
        ..Options::default()
    });
    let typst = markdown_to_typst("Body", opts).expect("conversion should succeed");
    assert!(typst.starts_with("#import \"styles/classic-editorial.typ\": article\n"));
    assert!(typst.contains("lang: \"en\""));
}

#[wasm_bindgen_test]
fn render_reports_metadata_and_warnings() {
    let source = "---\nauthors: [Ada, Grace]\nlang: en\n---\n\n# Notes\n\nBody.";
    let opts = options(Options {
        style: Some("brutalist".to_string()),
        ..Options::default()
    });
    let result = render(source, opts).expect("render should succeed");
    let result: RenderResult = serde_wasm_bindgen::from_value(result).expect("deserialize result");

    assert_eq!(result.title, "Notes");
    assert_eq!(result.authors, vec!["Ada", "Grace"]);
    assert_eq!(result.lang, "en");
    assert!(result.typst.starts_with("#import \"styles/modern-tech.typ\": article\n"));
    assert!(result.typst.ends_with("\n\nBody.\n"));
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, "unknownStyle");
}

#[wasm_bindgen_test]
fn parse_tree_exposes_block_types() {
    let tree = parse_tree("# T\n\n- a\n- b").expect("parse should succeed");
    let tree: serde_json::Value = serde_wasm_bindgen::from_value(tree).expect("deserialize tree");
    let children = tree["children"].as_array().expect("children array");
    assert_eq!(children[0]["type"], "heading");
    assert_eq!(children[1]["type"], "list");
}

#[wasm_bindgen_test]
fn templates_are_listed_and_bundled() {
    let paths: Vec<String> = template_paths()
        .iter()
        .filter_map(|v| v.as_string())
        .collect();
    assert_eq!(
        paths,
        vec!["styles/modern-tech.typ", "styles/classic-editorial.typ"]
    );
    assert!(template_source("modern-tech").is_some());
    assert!(template_source("missing").is_none());
}

#[wasm_bindgen_test]
fn rejects_malformed_options() {
    let opts = JsValue::from_str("not an object");
    assert!(markdown_to_typst("x", opts).is_err());
}
