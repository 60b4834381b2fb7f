//! Tests for card resolution against a mock Scryfall server.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{CardResolver, Lookup};
use crate::models::{CardRequest, IssueCategory, Rule, Severity};
use mtg_common::ScryfallClient;

fn card_json(id: &str, name: &str, set: &str, cn: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "set": set,
        "set_name": "Test Set",
        "collector_number": cn,
        "type_line": "Legendary Creature — Human Artificer",
        "color_identity": ["U", "R"],
        "legalities": { "commander": "legal" }
    })
}

fn not_found_json() -> serde_json::Value {
    serde_json::json!({
        "object": "error",
        "status": 404,
        "code": "not_found",
        "details": "No cards found matching the request"
    })
}

fn sets_json() -> serde_json::Value {
    serde_json::json!({
        "object": "list",
        "has_more": false,
        "data": [
            { "code": "kld", "name": "Kaladesh" },
            { "code": "mps", "name": "Kaladesh Inventions" }
        ]
    })
}

fn request(name: &str, set: Option<&str>, number: Option<&str>, id: Option<&str>) -> CardRequest {
    CardRequest {
        row: Some(2),
        name: name.to_string(),
        set: set.map(str::to_string),
        quantity: 1,
        collector_number: number.map(str::to_string),
        scryfall_id: id.map(str::to_string),
    }
}

#[tokio::test]
async fn scryfall_id_wins_over_all_other_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("abc-123", "Saheeli Rai", "kld", "186")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/kld/186"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("other", "Saheeli Rai", "kld", "186")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri()).unwrap();
    let mut resolver = CardResolver::new(&client);
    let mut notes = Vec::new();
    let card = resolver
        .resolve(&request("Saheeli Rai", Some("KLD"), Some("186"), Some("abc-123")), &mut notes)
        .await
        .unwrap();

    assert_eq!(card.scryfall_id, "abc-123");
    assert!(notes.is_empty());
}

#[tokio::test]
async fn set_and_number_preferred_over_name_and_set() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/kld/186"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("kld-186", "Saheeli Rai", "kld", "186")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("named", "Saheeli Rai", "kld", "186")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri()).unwrap();
    let mut resolver = CardResolver::new(&client);
    let card = resolver
        .resolve(&request("Saheeli Rai", Some("KLD"), Some("186"), None), &mut Vec::new())
        .await
        .unwrap();

    assert_eq!(card.scryfall_id, "kld-186");
    assert_eq!(card.set_code, "kld");
}

#[tokio::test]
async fn plan_follows_fallback_order() {
    let mock_server = MockServer::start().await;
    let client = ScryfallClient::with_base_url(&mock_server.uri()).unwrap();
    let mut resolver = CardResolver::new(&client);
    let mut notes = Vec::new();

    assert_eq!(
        resolver.plan(&request("Sol Ring", Some("C21"), Some("263"), Some("id-1")), &mut notes).await,
        Lookup::Id("id-1".to_string())
    );
    assert_eq!(
        resolver.plan(&request("Sol Ring", Some("C21"), Some("263"), None), &mut notes).await,
        Lookup::SetNumber {
            set: "c21".to_string(),
            number: "263".to_string()
        }
    );
    assert_eq!(
        resolver.plan(&request("Sol Ring", Some("C21"), None, None), &mut notes).await,
        Lookup::NameInSet {
            name: "Sol Ring".to_string(),
            set: "c21".to_string()
        }
    );
    assert_eq!(
        resolver.plan(&request("Sol Ring", None, Some("263"), None), &mut notes).await,
        Lookup::Name("Sol Ring".to_string())
    );
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn name_and_set_uses_named_endpoint_with_set() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .and(query_param("exact", "Sol Ring"))
        .and(query_param("set", "c21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("c21-263", "Sol Ring", "c21", "263")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri()).unwrap();
    let mut resolver = CardResolver::new(&client);
    let card = resolver
        .resolve(&request("Sol Ring", Some("C21"), None, None), &mut Vec::new())
        .await
        .unwrap();

    assert_eq!(card.collector_number, "263");
}

#[tokio::test]
async fn set_name_resolves_to_same_card_as_set_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sets_json()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/kld/186"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("kld-186", "Saheeli Rai", "kld", "186")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri()).unwrap();
    let mut resolver = CardResolver::new(&client);
    let mut notes = Vec::new();

    let by_name = resolver
        .resolve(&request("Saheeli Rai", Some("Kaladesh"), Some("186"), None), &mut notes)
        .await
        .unwrap();
    let by_code = resolver
        .resolve(&request("Saheeli Rai", Some("KLD"), Some("186"), None), &mut notes)
        .await
        .unwrap();

    assert_eq!(by_name, by_code);
    assert!(notes.is_empty());
}

#[tokio::test]
async fn set_catalog_is_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sets_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri()).unwrap();
    let mut resolver = CardResolver::new(&client);
    let mut notes = Vec::new();

    for name in ["Saheeli Rai", "Padeem, Consul of Innovation"] {
        let lookup = resolver
            .plan(&request(name, Some("Kaladesh"), None, None), &mut notes)
            .await;
        assert_eq!(
            lookup,
            Lookup::NameInSet {
                name: name.to_string(),
                set: "kld".to_string()
            }
        );
    }
    assert_eq!(resolver.calls(), 1);
}

#[tokio::test]
async fn unknown_set_name_falls_back_to_name_with_warning() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sets_json()))
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri()).unwrap();
    let mut resolver = CardResolver::new(&client);
    let mut notes = Vec::new();

    let lookup = resolver
        .plan(&request("Sol Ring", Some("Commander Legends"), None, None), &mut notes)
        .await;

    assert_eq!(lookup, Lookup::Name("Sol Ring".to_string()));
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].rule, Rule::UnknownSet);
    assert_eq!(notes[0].severity, Severity::Warning);
}

#[tokio::test]
async fn resolve_all_keeps_order_and_records_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .and(query_param("exact", "Sol Ring"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("ring", "Sol Ring", "c21", "263")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .and(query_param("exact", "Sol Rign"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_json()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .and(query_param("exact", "Arcane Signet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("signet", "Arcane Signet", "c21", "236")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .and(query_param("exact", "Dragon"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "object": "error",
            "status": 404,
            "code": "not_found",
            "type": "ambiguous",
            "details": "Too many cards match ambiguous name"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let requests = vec![
        request("Sol Ring", None, None, None),
        request("Sol Rign", None, None, None),
        request("Arcane Signet", None, None, None),
        request("Dragon", None, None, None),
        request("Offline Card", None, None, Some("down")),
    ];

    let client = ScryfallClient::with_base_url(&mock_server.uri()).unwrap();
    let mut resolver = CardResolver::new(&client);
    let batch = resolver.resolve_all(&requests).await;

    let names: Vec<&str> = batch.deck.entries().iter().map(|e| e.card.name.as_str()).collect();
    assert_eq!(names, vec!["Sol Ring", "Arcane Signet"]);

    let unresolved: Vec<&str> = batch.unresolved.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(unresolved, vec!["Sol Rign", "Dragon", "Offline Card"]);

    let rules: Vec<Rule> = batch.issues.iter().map(|i| i.rule).collect();
    assert_eq!(
        rules,
        vec![Rule::CardNotFound, Rule::AmbiguousMatch, Rule::ProviderUnavailable]
    );
    assert!(batch
        .issues
        .iter()
        .all(|i| i.category == IssueCategory::Resolution && i.severity == Severity::Error));
    assert_eq!(batch.issues[0].card.as_deref(), Some("Sol Rign"));
    assert_eq!(resolver.calls(), 5);
}

#[tokio::test]
async fn catalog_outage_falls_back_to_name_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sets"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .and(query_param("exact", "Saheeli Rai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("kld-186", "Saheeli Rai", "kld", "186")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri()).unwrap();
    let mut resolver = CardResolver::new(&client);
    let requests = vec![
        request("Saheeli Rai", Some("Kaladesh"), None, None),
        request("Saheeli Rai", Some("Kaladesh"), None, None),
    ];
    let batch = resolver.resolve_all(&requests).await;

    assert_eq!(batch.deck.len(), 2);
    assert_eq!(batch.issues.len(), 2);
    assert!(batch.issues.iter().all(|i| i.rule == Rule::UnknownSet));
}
