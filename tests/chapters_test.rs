//! Tests for chapter detection and chapter-wise navigation

use cuecard::domain::{generate, parse, Chapter, ChapterNavigator, SpeechCard};

fn card(breadcrumb: &[&str], topic: &str) -> SpeechCard {
    SpeechCard {
        breadcrumb: breadcrumb.iter().map(|s| s.to_string()).collect(),
        topic: topic.to_string(),
        ordinal: 0,
        total: 0,
        bullets: Vec::new(),
    }
}

fn navigator_for(text: &str) -> ChapterNavigator {
    ChapterNavigator::new(generate(&parse(text).tree))
}

const SPEECH: &str = "Speech\n   Intro\n      Hook\n      Story\n   Body\n      Point1\n      Point2";

#[test]
fn given_two_top_level_breadcrumbs_when_detecting_then_level_is_zero() {
    // Arrange
    let nav = ChapterNavigator::new(vec![
        card(&["Intro"], "a"),
        card(&["Intro"], "b"),
        card(&["Body"], "c"),
        card(&["Body"], "d"),
    ]);

    // Act / Assert
    assert_eq!(nav.chapter_level(), 0);
    assert_eq!(nav.next_chapter_index(0), Some(2));
    assert_eq!(nav.chapter_key(2), "Body");
}

#[test]
fn given_shared_root_when_detecting_then_level_skips_identical_entries() {
    let nav = navigator_for(SPEECH);

    assert_eq!(nav.chapter_level(), 1);
    let keys: Vec<&str> = (0..nav.len()).map(|i| nav.chapter_key(i)).collect();
    assert_eq!(keys, vec!["Intro", "Intro", "Body", "Body"]);
}

#[test]
fn given_flat_deck_when_detecting_then_each_card_is_its_own_chapter() {
    let nav = navigator_for("a\nb\nc");

    assert_eq!(nav.chapter_level(), 0);
    assert_eq!(nav.chapters().len(), 3);
    assert_eq!(nav.next_chapter_index(0), Some(1));
}

#[test]
fn given_first_chapter_when_moving_forward_then_lands_on_next_chapter_start() {
    let nav = navigator_for(SPEECH);

    assert_eq!(nav.next_chapter_index(0), Some(2));
    assert_eq!(nav.next_chapter_index(1), Some(2));
}

#[test]
fn given_last_chapter_when_moving_forward_then_none() {
    let nav = navigator_for(SPEECH);

    assert_eq!(nav.next_chapter_index(2), None);
    assert!(!nav.can_go_next_chapter(3));
    assert!(nav.can_go_next_chapter(0));
}

#[test]
fn given_mid_chapter_when_moving_back_then_goes_to_chapter_start() {
    let nav = navigator_for(SPEECH);
    assert_eq!(nav.previous_chapter_index(3), 2);
    assert_eq!(nav.previous_chapter_index(1), 0);
}

#[test]
fn given_chapter_start_when_moving_back_then_goes_to_previous_chapter_start() {
    let nav = navigator_for(SPEECH);
    assert_eq!(nav.previous_chapter_index(2), 0);
}

#[test]
fn given_first_card_when_moving_back_then_stays() {
    let nav = navigator_for(SPEECH);
    assert_eq!(nav.previous_chapter_index(0), 0);
}

#[test]
fn given_recurring_key_when_listing_then_runs_are_separate_chapters() {
    let nav = ChapterNavigator::new(vec![
        card(&["A"], "1"),
        card(&["B"], "2"),
        card(&["A"], "3"),
    ]);

    let chapters = nav.chapters();

    assert_eq!(
        chapters,
        vec![
            Chapter { key: "A".into(), start: 0, len: 1 },
            Chapter { key: "B".into(), start: 1, len: 1 },
            Chapter { key: "A".into(), start: 2, len: 1 },
        ]
    );
}

#[test]
fn given_mixed_depth_deck_when_detecting_then_shorter_breadcrumbs_do_not_count() {
    // Level 1 only exists on the first two cards, and differs there
    let nav = ChapterNavigator::new(vec![
        card(&["Root", "x"], "1"),
        card(&["Root", "y"], "2"),
        card(&["Root"], "3"),
    ]);

    assert_eq!(nav.chapter_level(), 1);
    assert_eq!(nav.chapter_key(2), "3");
}
