//! Identity properties of the template content identifier
//!
//! Determinism, sensitivity, idempotence and sort stability of `generate_id`,
//! plus pinned IDs of the local fixtures that must never drift.

use std::collections::HashSet;

use interaction_template::encoding::to_canonical_bytes;
use interaction_template::template::{
    Argument, Dependencies, InteractionKind, LocalizedText, Messages, Network, TemplateData,
    DEFAULT_VERSION,
};
use interaction_template::{generate_id, verify_id, Template};
use pretty_assertions::assert_eq;

const TRANSFER_JSON: &str = include_str!("fixtures/transfer_tokens.json");

fn network(address: &str, contract: &str) -> Network {
    Network {
        address: address.to_string(),
        fq_address: format!("A.{}.{}", address.trim_start_matches("0x"), contract),
        contract: contract.to_string(),
        pin: format!("pin-of-{}", contract),
        pin_block_height: 100,
    }
}

fn argument(index: u64, type_name: &str, title: &str) -> Argument {
    Argument {
        index,
        type_name: type_name.to_string(),
        messages: Messages::new().with_title(LocalizedText::new().with("en-US", title)),
        balance: None,
    }
}

fn pins(entries: &[(&str, &str, &str, &str)]) -> Dependencies {
    let mut deps = Dependencies::new();
    for (placeholder, contract, net, address) in entries {
        deps.entry(placeholder.to_string())
            .or_default()
            .entry(contract.to_string())
            .or_default()
            .insert(net.to_string(), network(address, contract));
    }
    deps
}

/// A transfer template with every map filled in the given key order
fn transfer(reverse: bool) -> TemplateData {
    let mut entries = vec![
        ("0xFT", "FungibleToken", "mainnet", "0xf233dcee88fe0abe"),
        ("0xFT", "FungibleToken", "testnet", "0x9a0766d93b6608b7"),
        ("0xFLOW", "FlowToken", "mainnet", "0x1654653399040a61"),
        ("0xFLOW", "FlowToken", "testnet", "0x7e60df042a9c0868"),
    ];
    let mut langs = vec![("en-US", "Transfer"), ("es", "Transferir"), ("fr", "Transférer")];
    let mut args = vec![
        ("amount", argument(0, "UFix64", "Amount")),
        ("to", argument(1, "Address", "Recipient")),
    ];
    if reverse {
        entries.reverse();
        langs.reverse();
        args.reverse();
    }

    let mut data = TemplateData::new(
        InteractionKind::Transaction,
        "import FungibleToken from 0xFT\nimport FlowToken from 0xFLOW\ntransaction(amount: UFix64, to: Address) {}",
    );
    data.messages = Messages::new()
        .with_title(langs.into_iter().collect())
        .with_description(LocalizedText::new().with("en-US", "Send FLOW"));
    data.dependencies = pins(&entries);
    data.arguments = args
        .into_iter()
        .map(|(label, arg)| (label.to_string(), arg))
        .collect();
    data
}

fn id_of(data: TemplateData) -> String {
    Template::new(DEFAULT_VERSION, data).unwrap().id().to_string()
}

#[test]
fn test_determinism_across_insertion_order() {
    let forward = transfer(false);
    let reverse = transfer(true);
    assert_ne!(
        forward.arguments.keys().collect::<Vec<_>>(),
        reverse.arguments.keys().collect::<Vec<_>>()
    );
    assert_eq!(id_of(forward), id_of(reverse));
}

/// ID of the transfer template after one edit
fn mutated(edit: impl FnOnce(&mut TemplateData)) -> String {
    let mut data = transfer(false);
    edit(&mut data);
    id_of(data)
}

#[test]
fn test_sensitivity_to_single_field_changes() {
    let ids = vec![
        ("kind", mutated(|d| d.kind = InteractionKind::Script)),
        ("interface", mutated(|d| d.interface = "A.0x01.Transfer".to_string())),
        ("cadence", mutated(|d| d.cadence.push(' '))),
        ("title text", mutated(|d| {
            let title = d.messages.title.as_mut().unwrap();
            title.i18n.insert("en-US".to_string(), "Send".to_string());
        })),
        ("title language", mutated(|d| {
            let title = d.messages.title.as_mut().unwrap();
            let text = title.i18n.shift_remove("fr").unwrap();
            title.i18n.insert("fr-FR".to_string(), text);
        })),
        ("drop title", mutated(|d| d.messages.title = None)),
        ("drop description", mutated(|d| d.messages.description = None)),
        ("empty title", mutated(|d| d.messages.title = Some(LocalizedText::new()))),
        ("pin address", mutated(|d| {
            d.dependencies["0xFT"]["FungibleToken"]["mainnet"].address = "0x01".to_string();
        })),
        ("pin hash", mutated(|d| {
            d.dependencies["0xFT"]["FungibleToken"]["testnet"].pin = "other".to_string();
        })),
        ("pin contract", mutated(|d| {
            d.dependencies["0xFT"]["FungibleToken"]["testnet"].contract = "Other".to_string();
        })),
        ("pin fq address", mutated(|d| {
            d.dependencies["0xFT"]["FungibleToken"]["testnet"].fq_address = "A.01.Other".to_string();
        })),
        ("network name", mutated(|d| {
            let networks = &mut d.dependencies["0xFLOW"]["FlowToken"];
            let pin = networks.shift_remove("testnet").unwrap();
            networks.insert("emulator".to_string(), pin);
        })),
        ("drop network", mutated(|d| {
            d.dependencies["0xFLOW"]["FlowToken"].shift_remove("testnet");
        })),
        ("placeholder", mutated(|d| {
            let contracts = d.dependencies.shift_remove("0xFLOW").unwrap();
            d.dependencies.insert("0xFLOWTOKEN".to_string(), contracts);
        })),
        ("argument index", mutated(|d| d.arguments["to"].index = 2)),
        ("argument type", mutated(|d| d.arguments["to"].type_name = "String".to_string())),
        ("argument balance", mutated(|d| d.arguments["to"].balance = Some("FlowToken".to_string()))),
        ("argument message", mutated(|d| d.arguments["amount"].messages = Messages::new())),
        ("argument label", mutated(|d| {
            let arg = d.arguments.shift_remove("to").unwrap();
            d.arguments.insert("recipient".to_string(), arg);
        })),
        ("drop argument", mutated(|d| {
            d.arguments.shift_remove("to");
        })),
    ];

    let mut seen = HashSet::from([id_of(transfer(false))]);
    for (name, id) in ids {
        assert!(seen.insert(id), "edit '{}' collided with an earlier id", name);
    }
}

#[test]
fn test_version_changes_id() {
    let v1 = Template::new("1.0.0", transfer(false)).unwrap();
    let v11 = Template::new("1.1.0", transfer(false)).unwrap();
    assert_ne!(v1.id(), v11.id());
}

#[test]
fn test_pin_block_height_does_not_change_id() {
    let mut later = transfer(false);
    later.dependencies["0xFT"]["FungibleToken"]["mainnet"].pin_block_height = 999_999;
    assert_eq!(id_of(transfer(false)), id_of(later));
}

#[test]
fn test_idempotence() {
    let template = Template::new(DEFAULT_VERSION, transfer(false)).unwrap();
    assert_eq!(generate_id(&template).unwrap(), generate_id(&template).unwrap());

    let json = template.to_json(true).unwrap();
    let reloaded = Template::from_json(&json).unwrap();
    assert_eq!(reloaded, template);
    assert_eq!(generate_id(&reloaded).unwrap(), template.id());

    let compact = Template::from_json(&template.to_json(false).unwrap()).unwrap();
    assert_eq!(verify_id(&compact).unwrap(), template.id());
}

#[test]
fn test_sort_stability_of_placeholders() {
    let b_first = pins(&[("B", "Beta", "mainnet", "0x02"), ("A", "Alpha", "mainnet", "0x01")]);
    let a_first = pins(&[("A", "Alpha", "mainnet", "0x01"), ("B", "Beta", "mainnet", "0x02")]);

    let mut one = TemplateData::new(InteractionKind::Script, "pub fun main() {}");
    one.dependencies = b_first;
    let mut two = TemplateData::new(InteractionKind::Script, "pub fun main() {}");
    two.dependencies = a_first;
    assert_eq!(id_of(one), id_of(two));
}

#[test]
fn test_empty_script_is_stable() {
    let data = TemplateData::new(InteractionKind::Script, "pub fun main(): Int { return 42 }");
    let template = Template::new(DEFAULT_VERSION, data.clone()).unwrap();

    insta::assert_snapshot!(
        hex::encode(to_canonical_bytes(&template).unwrap()),
        @"f8aaa02f6aaf657a8fdc169ca1757e4814ca86d54a0b16d128c2e7dfc1cedfa0475d5ea028177204232a7b788993cb7349f17a9982842f745be12a2f6a8f2526eb19ad5fa03fd5c7bb1336367e4c595765162c0ec9acb43414e439e8d5795d7dba85dea6c4a0a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434ac2c0c0a03926c68c63042737f2e34d4ed7073940b2db5c787f9a40049a8a7f118d59050bc0c0"
    );
    insta::assert_snapshot!(
        template.id(),
        @"5d3f329567c66ba199a15df2497847efacc8ac51b8bf42f1bca6be9a33298a51"
    );
    assert_eq!(Template::new(DEFAULT_VERSION, data).unwrap().id(), template.id());
}

#[test]
fn test_description_only_differs_from_empty_title() {
    let description = LocalizedText::new().with("en-US", "Reads a number");

    let mut absent = TemplateData::new(InteractionKind::Script, "pub fun main() {}");
    absent.messages = Messages::new().with_description(description.clone());
    let mut empty = absent.clone();
    empty.messages.title = Some(LocalizedText::new());

    assert_ne!(id_of(absent), id_of(empty));
}

#[test]
fn test_title_language_order() {
    let forward = Messages::new().with_title(LocalizedText::new().with("en-US", "Foo").with("es", "Foo2"));
    let swapped = Messages::new().with_title(LocalizedText::new().with("es", "Foo2").with("en-US", "Foo"));

    insta::assert_snapshot!(
        hex::encode(to_canonical_bytes(&swapped).unwrap()),
        @"f8aef8aba0bc089179ebbe0128a6c6ca2a92d4801203009ca0a22479a64b60b8609d136929f888f842a07822d49e2009f515cb266c2a64414312a14b7a28120febaf379e13ea3913e44ca0195e5c2ddf90d08e0c12357a75fd11180c85b989a9d3b6bc3327aa23a98f278af842a06b1b646c8e4617476125590f1037b940e544925c5f387e8bc8536204c2de6b2aa089f2d53820056f147346adb2844eb407725f5b99a7aaa7d9477591a7bdd49c7dc0"
    );

    let mut one = TemplateData::new(InteractionKind::Script, "pub fun main() {}");
    one.messages = forward;
    let mut two = one.clone();
    two.messages = swapped;
    assert_eq!(id_of(one), id_of(two));
}

#[test]
fn test_fixture_id_verifies() {
    let template = Template::from_json(TRANSFER_JSON).unwrap();
    insta::assert_snapshot!(
        verify_id(&template).unwrap(),
        @"dbb26ae876dfd859b2cc1893338865faf027c839a658f6243e8bc727a31bc69b"
    );
}

#[test]
fn test_fixture_json_roundtrip_is_structurally_equal() {
    let template = Template::from_json(TRANSFER_JSON).unwrap();
    let original: serde_json::Value = serde_json::from_str(TRANSFER_JSON).unwrap();
    assert_eq!(serde_json::to_value(&template).unwrap(), original);
}

#[test]
fn test_parallel_generation_agrees() {
    let expected = id_of(transfer(false));
    let ids: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| scope.spawn(move || id_of(transfer(i % 2 == 0))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(ids.iter().all(|id| *id == expected));
}
