use pulsar::widgets::{Autocomplete, Card, CardDrawer, Key};

#[test]
fn test_cards_from_service_json() {
    let cards: Vec<Card> = serde_json::from_value(serde_json::json!([
        {
            "title": "Patient",
            "content": "Latest visit",
            "severity": "high",
            "body": [
                { "type": "keyValuePairs", "data": [
                    { "key": "Age", "value": 30 },
                    { "key": "Gender", "value": "Male" }
                ] },
                { "type": "separator" },
                { "type": "link", "href": "/visits/1", "text": "Details" }
            ]
        },
        { "title": "Notes", "body": [{ "type": "text", "text": "<none>" }] }
    ]))
    .unwrap();

    let mut drawer = CardDrawer::new("cards");
    for card in &cards {
        drawer.draw(card);
    }
    let html = drawer.html();

    assert_eq!(drawer.len(), 2);
    assert!(html.contains("<div class=\"card high\">"));
    assert!(html.contains("<span class=\"value\">30</span>"));
    assert!(html.contains("<a href=\"/visits/1\" class=\"card-link\">Details</a>"));
    assert!(html.contains("<p class=\"text\">&lt;none&gt;</p>"));
}

#[test]
fn test_autocomplete_keyboard_session() {
    let mut search = Autocomplete::new(["New York", "Newark", "York", "Yorkshire", "Amsterdam"]);

    let dropdown = search.show("york");
    assert_eq!(dropdown.items.len(), 3);
    assert_eq!(dropdown.items[0].html, "New <strong>York</strong>");

    search.key(Key::Up);
    search.key(Key::Up);
    assert_eq!(search.focused(), Some(1));
    assert_eq!(search.key(Key::Enter).as_deref(), Some("York"));
    assert_eq!(search.input(), "");

    search.show("amst");
    assert_eq!(search.key(Key::Enter).as_deref(), Some("Amsterdam"));
    assert!(!search.is_open());
}
