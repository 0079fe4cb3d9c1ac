use super::*;

fn movie(id: &str, title: &str) -> Movie {
    Movie { id: id.into(), title: title.into(), ..Movie::default() }
}

#[test]
fn catalog_state_serializes_camel_case_keys() {
    let state = CatalogState { my_list: vec![movie("1", "Up")], ..CatalogState::default() };
    let json = serde_json::to_value(&state).unwrap();
    assert!(json.get("myList").is_some());
    assert!(json.get("searchResult").is_some());
    assert!(json.get("my_list").is_none());
    assert_eq!(json["user"]["id"], "");
}

#[test]
fn movie_kind_uses_type_key() {
    let json = r#"{"id":"7","title":"Dune","type":"Scripted","contentRating":"16+","duration":155}"#;
    let parsed: Movie = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.kind, "Scripted");
    assert_eq!(parsed.content_rating, "16+");
    assert_eq!(parsed.duration, 155);
    assert!(parsed.cover.is_empty());
}

#[test]
fn catalog_state_tolerates_missing_sections() {
    let parsed: CatalogState = serde_json::from_str(r#"{"trends":[{"id":"1"}]}"#).unwrap();
    assert_eq!(parsed.trends.len(), 1);
    assert!(parsed.my_list.is_empty());
    assert!(parsed.playing.is_none());
    assert_eq!(parsed.user, SessionState::default());
}

#[test]
fn find_movie_searches_all_lists() {
    let state = CatalogState {
        my_list: vec![movie("1", "Up")],
        trends: vec![movie("2", "Heat")],
        originals: vec![movie("3", "Rush")],
        ..CatalogState::default()
    };
    assert_eq!(state.find_movie("3").map(|m| m.title.as_str()), Some("Rush"));
    assert_eq!(state.find_movie("2").map(|m| m.title.as_str()), Some("Heat"));
    assert!(state.find_movie("9").is_none());
}

#[test]
fn find_movie_prefers_my_list_on_duplicate_ids() {
    let state = CatalogState {
        my_list: vec![movie("1", "Mine")],
        trends: vec![movie("1", "Trend")],
        ..CatalogState::default()
    };
    assert_eq!(state.find_movie("1").map(|m| m.title.as_str()), Some("Mine"));
}

#[test]
fn movie_lists_len_counts_every_list() {
    let lists = MovieLists {
        my_list: vec![movie("1", "a")],
        trends: vec![movie("2", "b"), movie("3", "c")],
        originals: vec![],
    };
    assert_eq!(lists.len(), 3);
    assert!(!lists.is_empty());
    assert!(MovieLists::default().is_empty());
}

#[test]
fn principal_missing_fields_default_to_empty() {
    let parsed: Principal = serde_json::from_str(r#"{"name":"Ann"}"#).unwrap();
    assert_eq!(parsed.name, "Ann");
    assert!(parsed.id.is_empty());
    assert!(parsed.email.is_empty());
}

#[test]
fn select_playing_sets_and_clears() {
    let mut state = CatalogState { trends: vec![movie("2", "Heat")], ..CatalogState::default() };
    assert!(state.select_playing("2"));
    assert_eq!(state.playing.as_ref().map(|m| m.title.as_str()), Some("Heat"));

    assert!(!state.select_playing("404"));
    assert!(state.playing.is_none());
}
