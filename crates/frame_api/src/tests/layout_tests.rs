use super::*;
use proptest::prelude::*;
use shared::domain::ELEMENTS;

fn kinds(buttons: &[LayoutButton]) -> Vec<SlotKind> {
    buttons.iter().map(|b| b.kind).collect()
}

#[test]
fn first_page_has_next_but_no_previous() {
    let buttons = layout_buttons(&FrameData::default(), 0, &ELEMENTS);
    assert_eq!(
        kinds(&buttons),
        vec![
            SlotKind::Entry(0),
            SlotKind::Entry(1),
            SlotKind::Entry(2),
            SlotKind::Next
        ]
    );
    assert_eq!(buttons[0].label, "Fire");
    assert_eq!(buttons[3].label, NEXT_LABEL);
}

#[test]
fn final_page_has_previous_but_no_next() {
    let last = page_count(ELEMENTS.len()) as u32 - 1;
    let buttons = layout_buttons(&FrameData::default(), last, &ELEMENTS);
    assert_eq!(buttons.first().map(|b| b.kind), Some(SlotKind::Previous));
    assert!(buttons.iter().all(|b| b.kind != SlotKind::Next));
    assert_eq!(
        buttons.iter().map(|b| b.label.as_str()).collect::<Vec<_>>(),
        vec![PREV_LABEL, "Gravity", "Sound", "Mind"]
    );
}

#[test]
fn middle_pages_reserve_both_navigation_slots() {
    let buttons = layout_buttons(&FrameData::default(), 1, &ELEMENTS);
    assert_eq!(
        kinds(&buttons),
        vec![
            SlotKind::Previous,
            SlotKind::Entry(3),
            SlotKind::Entry(4),
            SlotKind::Next
        ]
    );
}

#[test]
fn twenty_entries_span_nine_pages() {
    assert_eq!(page_count(20), 9);
    assert_eq!(page_count(4), 1);
    assert_eq!(page_count(5), 2);
    assert_eq!(page_count(7), 3);
    assert_eq!(page_count(0), 0);
}

#[test]
fn page_starts_follow_reserved_slots_not_a_fixed_stride() {
    let starts: Vec<usize> = (0..page_count(20) as u32)
        .filter_map(|page| page_window(20, page))
        .map(|window| window.start)
        .collect();
    assert_eq!(starts, vec![0, 3, 5, 7, 9, 11, 13, 15, 17]);
    let last = page_window(20, 8).expect("last page");
    assert_eq!(last.start + last.len, 20);
}

#[test]
fn small_catalog_needs_no_navigation() {
    let catalog = ["Chaos", "Order", "Nature", "Dark"];
    let buttons = layout_buttons(&FrameData::default(), 0, &catalog);
    assert_eq!(buttons.len(), 4);
    assert!(buttons
        .iter()
        .all(|b| matches!(b.kind, SlotKind::Entry(_))));
}

#[test]
fn entry_values_carry_selection_and_page() {
    let data = FrameData {
        keyword: Some("Rage".into()),
        ..FrameData::default()
    };
    let buttons = layout_buttons(&data, 2, &ELEMENTS);
    let entry = codec::decode(&buttons[1].value);
    assert_eq!(entry.state, FrameState::ElementSelection);
    assert_eq!(entry.element.as_deref(), Some("Ice"));
    assert_eq!(entry.page, Some(2));
    assert_eq!(entry.keyword.as_deref(), Some("Rage"));

    assert_eq!(codec::decode(&buttons[0].value).page, Some(1));
    assert_eq!(codec::decode(&buttons[3].value).page, Some(3));
}

#[test]
fn out_of_range_page_is_laid_out_as_first_page() {
    let buttons = layout_buttons(&FrameData::default(), 42, &ELEMENTS);
    assert_eq!(buttons, layout_buttons(&FrameData::default(), 0, &ELEMENTS));
}

#[test]
fn presses_resolve_against_rendered_layout() {
    assert_eq!(resolve_press(&ELEMENTS, 0, 1), Some(SlotKind::Entry(0)));
    assert_eq!(resolve_press(&ELEMENTS, 0, 4), Some(SlotKind::Next));
    assert_eq!(resolve_press(&ELEMENTS, 1, 1), Some(SlotKind::Previous));
    assert_eq!(resolve_press(&ELEMENTS, 1, 2), Some(SlotKind::Entry(3)));
    assert_eq!(resolve_press(&ELEMENTS, 8, 4), Some(SlotKind::Entry(19)));
    assert_eq!(resolve_press(&ELEMENTS, 0, 0), None);
    assert_eq!(resolve_press(&ELEMENTS, 0, 5), None);
    assert_eq!(resolve_press(&ELEMENTS, 9, 1), None);
}

proptest! {
    #[test]
    fn never_more_than_four_buttons(len in 1usize..64, page in 0u32..40) {
        let catalog: Vec<String> = (0..len).map(|i| format!("entry-{i}")).collect();
        let catalog: Vec<&str> = catalog.iter().map(String::as_str).collect();
        let buttons = layout_buttons(&FrameData::default(), page, &catalog);
        prop_assert!(!buttons.is_empty());
        prop_assert!(buttons.len() <= PAGE_SIZE);
    }

    #[test]
    fn every_entry_is_reachable_exactly_once(len in 1usize..64) {
        let catalog: Vec<String> = (0..len).map(|i| format!("entry-{i}")).collect();
        let catalog: Vec<&str> = catalog.iter().map(String::as_str).collect();
        let mut seen = Vec::new();
        for page in 0..page_count(len) as u32 {
            let buttons = layout_buttons(&FrameData::default(), page, &catalog);
            for (slot, button) in buttons.iter().enumerate() {
                prop_assert_eq!(resolve_press(&catalog, page, slot as u32 + 1), Some(button.kind));
                if let SlotKind::Entry(index) = button.kind {
                    seen.push(index);
                }
            }
        }
        prop_assert_eq!(seen, (0..len).collect::<Vec<_>>());
    }
}
