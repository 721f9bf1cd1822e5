//! Network resolution of the transfer template fixture

use interaction_template::source::resolve_source;
use interaction_template::template::Dependencies;
use interaction_template::{resolve, resolve_template, Error, ResolveError, Template};
use pretty_assertions::assert_eq;

const TRANSFER_JSON: &str = include_str!("fixtures/transfer_tokens.json");

fn transfer() -> Template {
    Template::from_json(TRANSFER_JSON).unwrap()
}

fn imports(source: &str) -> Vec<&str> {
    source.lines().take_while(|line| line.starts_with("import")).collect()
}

#[test]
fn test_resolve_mainnet() {
    let source = resolve(&transfer(), "mainnet").unwrap();
    assert_eq!(
        imports(&source),
        vec![
            "import FungibleToken from 0xf233dcee88fe0abe",
            "import FlowToken from 0x1654653399040a61",
        ]
    );
    assert!(!source.contains("ADDRESS"));
}

#[test]
fn test_resolve_testnet() {
    let source = resolve(&transfer(), "testnet").unwrap();
    assert_eq!(
        imports(&source),
        vec![
            "import FungibleToken from 0x9a0766d93b6608b7",
            "import FlowToken from 0x7e60df042a9c0868",
        ]
    );
}

#[test]
fn test_resolution_only_touches_imports() {
    let template = transfer();
    let source = resolve(&template, "mainnet").unwrap();
    let original = &template.data().cadence;

    let body = |s: &str| s.lines().skip(2).collect::<Vec<_>>().join("\n");
    assert_eq!(body(&source), body(original));
    assert_eq!(source.ends_with('\n'), original.ends_with('\n'));
}

#[test]
fn test_unknown_network_is_not_pinned() {
    let err = resolve(&transfer(), "emulator").unwrap_err();
    assert_eq!(
        err,
        ResolveError::NotPinned {
            placeholder: "0xFUNGIBLETOKENADDRESS".to_string(),
            network: "emulator".to_string(),
            span: 26..48,
        }
    );

    let report = err.format(&transfer().data().cadence, "transfer_tokens.cdc");
    assert!(report.contains("emulator"));
    assert!(report.contains("transfer_tokens.cdc"));
}

#[test]
fn test_resolution_leaves_identity_alone() {
    let template = transfer();
    let before = template.id().to_string();
    resolve(&template, "mainnet").unwrap();
    resolve(&template, "testnet").unwrap();
    assert_eq!(template.id(), before);
    assert_eq!(interaction_template::verify_id(&template).unwrap(), before);
}

#[test]
fn test_networks_of_fixture() {
    assert_eq!(transfer().networks(), vec!["mainnet", "testnet"]);
}

#[test]
fn test_resolve_template_json_error() {
    let result = resolve_template("[]", "mainnet");
    assert!(matches!(result, Err(Error::Json(_))));

    let result = resolve_template(TRANSFER_JSON, "emulator");
    assert!(matches!(result, Err(Error::Resolve(ResolveError::NotPinned { .. }))));
}

#[test]
fn test_placeholders_in_comments_and_strings_are_kept() {
    let template = transfer();
    let source = "// deployed at 0xFLOWTOKENADDRESS\nlet s = \"0xFLOWTOKENADDRESS\"\nimport FlowToken from 0xFLOWTOKENADDRESS";
    let resolved = resolve_source(source, &template.data().dependencies, "mainnet").unwrap();
    assert_eq!(
        resolved,
        "// deployed at 0xFLOWTOKENADDRESS\nlet s = \"0xFLOWTOKENADDRESS\"\nimport FlowToken from 0x1654653399040a61"
    );
}

#[test]
fn test_undeclared_placeholder() {
    let err = resolve_source("import A from 0xMISSING", &Dependencies::new(), "mainnet").unwrap_err();
    assert!(matches!(err, ResolveError::UnknownPlaceholder { ref placeholder, .. } if placeholder == "0xMISSING"));
    assert_eq!(err.span(), &(14..23));
}
