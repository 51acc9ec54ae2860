//! Selection helpers shared by single- and multi-choice fields.

/// Multi-choice toggle: removes `item` if selected, otherwise appends it.
/// Other entries keep their order.
pub fn toggle<T: PartialEq + Clone>(selection: &[T], item: T) -> Vec<T> {
    if selection.contains(&item) {
        selection.iter().filter(|s| **s != item).cloned().collect()
    } else {
        let mut updated = selection.to_vec();
        updated.push(item);
        updated
    }
}

/// Single-choice click: choosing the selected option clears it.
pub fn choose<T: PartialEq>(current: Option<T>, item: T) -> Option<T> {
    match current {
        Some(selected) if selected == item => None,
        _ => Some(item),
    }
}
