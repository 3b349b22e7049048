//! Tests for card generation and card lookup

use rstest::rstest;

use cuecard::domain::{generate, locate_card, parse, renumber, OutlineTree, SpeechCard};

fn cards_for(text: &str) -> Vec<SpeechCard> {
    generate(&parse(text).tree)
}

fn topics(cards: &[SpeechCard]) -> Vec<&str> {
    cards.iter().map(|c| c.topic.as_str()).collect()
}

const DRAWING: &str = "How to draw
   Understanding perspective
      1 point perspective
      2 point perspective
   Color theory
      Warm vs cool colors
Cooking basics
   Knife skills";

// ============================================================
// Generation
// ============================================================

#[test]
fn given_empty_outline_when_generating_then_no_cards() {
    assert!(generate(&OutlineTree::new()).is_empty());
}

#[test]
fn given_single_root_leaf_when_generating_then_one_card_without_breadcrumb() {
    // Act
    let cards = cards_for("Topic");

    // Assert
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].topic, "Topic");
    assert!(cards[0].breadcrumb.is_empty());
    assert_eq!((cards[0].ordinal, cards[0].total), (1, 1));
    assert_eq!(cards[0].full_path(), "Topic");
}

#[test]
fn given_structural_outline_when_generating_then_only_leaves_become_cards() {
    let cards = cards_for(DRAWING);

    assert_eq!(
        topics(&cards),
        vec![
            "1 point perspective",
            "2 point perspective",
            "Warm vs cool colors",
            "Knife skills"
        ]
    );
    assert_eq!(cards[3].breadcrumb, vec!["Cooking basics"]);
}

#[test]
fn given_leaf_at_depth_two_when_generating_then_full_path_joins_breadcrumb() {
    let cards = cards_for("How to draw\n   Understanding perspective\n      1 point perspective");

    assert_eq!(
        cards[0].breadcrumb,
        vec!["How to draw", "Understanding perspective"]
    );
    assert_eq!(
        cards[0].full_path(),
        "How to draw > Understanding perspective > 1 point perspective"
    );
    assert!(!cards[0].has_bullets());
}

#[test]
fn given_depth_three_items_when_generating_then_they_collapse_into_bullets() {
    // Arrange
    let text = "Speech\n   Intro\n      Hook\n         Start with a question\n         Surprising fact";

    // Act
    let cards = cards_for(text);

    // Assert
    assert_eq!(cards.len(), 1);
    let card = &cards[0];
    assert_eq!(card.topic, "Hook");
    assert_eq!(card.breadcrumb, vec!["Speech", "Intro"]);
    let bullets: Vec<(&str, usize)> = card
        .bullets
        .iter()
        .map(|b| (b.text.as_str(), b.indent_level))
        .collect();
    assert_eq!(
        bullets,
        vec![("Start with a question", 0), ("Surprising fact", 0)]
    );
}

#[test]
fn given_nested_bullets_when_generating_then_indent_is_relative_to_topic() {
    let cards = cards_for("A\n   B\n      C\n         D1\n            E1\n               F1\n         D2");

    let levels: Vec<usize> = cards[0].bullets.iter().map(|b| b.indent_level).collect();
    assert_eq!(levels, vec![0, 1, 2, 0]);
}

#[test]
fn given_header_document_when_generating_then_depth_comes_from_tree_not_hashes() {
    let cards = cards_for("# Talk\n## Opening\n### Story\n- beat one\n- beat two\n## Close");

    assert_eq!(topics(&cards), vec!["Story", "Close"]);
    assert_eq!(cards[0].bullets.len(), 2);
    assert_eq!(cards[1].breadcrumb, vec!["Talk"]);
}

#[rstest]
#[case("a\nb\nc")]
#[case(DRAWING)]
#[case("A\n   B\n   C\n   D")]
fn given_any_outline_when_generating_then_ordinals_are_sequential(#[case] text: &str) {
    let cards = cards_for(text);

    assert!(!cards.is_empty());
    for (i, card) in cards.iter().enumerate() {
        assert_eq!(card.ordinal, i + 1);
        assert_eq!(card.total, cards.len());
    }
}

#[test]
fn given_filtered_deck_when_renumbering_then_ordinals_restart_at_one() {
    let mut cards = cards_for(DRAWING);
    cards.retain(|c| c.breadcrumb.first().map(String::as_str) == Some("How to draw"));

    renumber(&mut cards);

    assert_eq!(
        cards.iter().map(|c| (c.ordinal, c.total)).collect::<Vec<_>>(),
        vec![(1, 3), (2, 3), (3, 3)]
    );
}

#[test]
fn given_cards_when_serializing_then_fields_are_camel_case() {
    let cards = cards_for("A\n   B\n      C\n         d");
    let json = serde_json::to_value(&cards).unwrap();

    assert_eq!(json[0]["topic"], "C");
    assert_eq!(json[0]["bullets"][0]["indentLevel"], 0);
    assert_eq!(json[0]["ordinal"], 1);
}

// ============================================================
// Lookup
// ============================================================

#[rstest]
#[case(&["How to draw", "Color theory", "Warm vs cool colors"], Some(2))]
#[case(&["How to draw", "Color theory"], Some(2))]
#[case(&["Cooking basics"], Some(3))]
#[case(&["How to draw"], Some(0))]
#[case(&["Gardening"], None)]
#[case(&[], None)]
fn given_node_path_when_locating_then_finds_first_matching_card(
    #[case] path: &[&str],
    #[case] expected: Option<usize>,
) {
    let cards = cards_for(DRAWING);
    assert_eq!(locate_card(&cards, path), expected);
}

#[test]
fn given_bullet_node_path_when_locating_then_finds_owning_card() {
    let cards = cards_for("Speech\n   Intro\n      Hook\n         Question\n   Body\n      Point");

    let found = locate_card(&cards, &["Speech", "Intro", "Hook", "Question"]);

    assert_eq!(found, Some(0));
    assert_eq!(locate_card(&cards, &["Speech", "Body"]), Some(1));
}
