use pigeons::menu::*;

#[test]
fn menu_starts_on_start() {
    assert_eq!(MenuState::default().selected_choice(), MenuChoice::Start);
}

#[test]
fn menu_cursor_wraps_both_ways() {
    let mut menu = MenuState::default();
    assert_eq!(menu.handle(MenuInput::Up), None);
    assert_eq!(menu.selected_choice(), MenuChoice::Quit);
    assert_eq!(menu.handle(MenuInput::Down), None);
    assert_eq!(menu.selected_choice(), MenuChoice::Start);
    menu.handle(MenuInput::Down);
    assert_eq!(menu.selected_choice(), MenuChoice::Leaderboard);
}

#[test]
fn select_returns_highlighted_choice() {
    let mut menu = MenuState::default();
    menu.handle(MenuInput::Down);
    assert_eq!(menu.handle(MenuInput::Select), Some(MenuChoice::Leaderboard));
    // Selecting does not move the cursor.
    assert_eq!(menu.selected, 1);
}

#[test]
fn menu_choices_lead_to_screens() {
    assert_eq!(MenuChoice::Start.target(), Some(Screen::Playing));
    assert_eq!(MenuChoice::Leaderboard.target(), Some(Screen::Leaderboard));
    assert_eq!(MenuChoice::Quit.target(), None);
    assert_eq!(MenuChoice::ALL.map(|c| c.label()), ["Start", "Leaderboard", "Quit"]);
}

#[test]
fn round_over_choices_lead_to_screens() {
    assert_eq!(RoundOverChoice::Continue.target(), Some(Screen::Leaderboard));
    assert_eq!(RoundOverChoice::Replay.target(), Some(Screen::Playing));
    assert_eq!(RoundOverChoice::Quit.target(), None);
}

// ── Name entry ────────────────────────────────────────────────────────────────

fn type_str(entry: &mut NameEntry, s: &str) {
    for c in s.chars() {
        assert_eq!(entry.handle(NameInput::Char(c)), None);
    }
}

#[test]
fn name_accepts_alphanumerics_only() {
    let mut entry = NameEntry::default();
    type_str(&mut entry, "a b-c_1!");
    assert_eq!(entry.name, "abc1");
}

#[test]
fn name_is_capped_at_ten_characters() {
    let mut entry = NameEntry::default();
    type_str(&mut entry, "ABCDEFGHIJKLMN");
    assert_eq!(entry.name, "ABCDEFGHIJ");
}

#[test]
fn backspace_removes_last_character() {
    let mut entry = NameEntry::default();
    type_str(&mut entry, "BOB");
    entry.handle(NameInput::Backspace);
    assert_eq!(entry.name, "BO");

    let mut empty = NameEntry::default();
    empty.handle(NameInput::Backspace);
    assert_eq!(empty.name, "");
}

#[test]
fn confirm_needs_a_name() {
    let mut entry = NameEntry::default();
    assert_eq!(entry.handle(NameInput::Confirm), None);
    type_str(&mut entry, "ALICE");
    assert_eq!(entry.handle(NameInput::Confirm), Some("ALICE".to_string()));
}
