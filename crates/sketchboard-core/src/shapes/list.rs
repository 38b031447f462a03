//! Ordered element list operations. Index order is z-order: later is on top.

use super::Element;

/// New list with `element` on top.
pub fn append(list: &[Element], element: Element) -> Vec<Element> {
    let mut out = Vec::with_capacity(list.len() + 1);
    out.extend_from_slice(list);
    out.push(element);
    out
}

/// New list with the element matching `id` swapped for `element`.
/// An unknown id leaves the list as it was.
pub fn replace(list: &[Element], id: &str, element: Element) -> Vec<Element> {
    let mut out = list.to_vec();
    replace_in(&mut out, id, element);
    out
}

/// In-place variant of [`replace`]. Returns whether anything matched.
pub fn replace_in(list: &mut [Element], id: &str, element: Element) -> bool {
    match list.iter_mut().find(|e| e.id == id) {
        Some(slot) => {
            *slot = element;
            true
        }
        None => false,
    }
}

/// Remove the element matching `id`, keeping the order of the rest.
pub fn remove_in(list: &mut Vec<Element>, id: &str) -> Option<Element> {
    let index = position_of(list, id)?;
    Some(list.remove(index))
}

pub fn position_of(list: &[Element], id: &str) -> Option<usize> {
    list.iter().position(|e| e.id == id)
}

pub fn find<'a>(list: &'a [Element], id: &str) -> Option<&'a Element> {
    list.iter().find(|e| e.id == id)
}
