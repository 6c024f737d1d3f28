//! Positional caption numbering
//!
//! Captions are numbered `{section}.{item}.` from the item's position in the
//! report. The numbers are never stored; they are recomputed on every export.

/// Build the numbered caption for an item
///
/// Both indices are 1-based.
///
/// ```
/// assert_eq!(report_model::caption(2, 3, "Gas usage"), "2.3. Gas usage");
/// ```
pub fn caption(section_index: usize, item_index: usize, raw_caption: &str) -> String {
    format!("{}.{}. {}", section_index, item_index, raw_caption)
}

/// Build the numbered caption with an optional leading figure label
pub fn figure_caption(
    label: Option<&str>,
    section_index: usize,
    item_index: usize,
    raw_caption: &str,
) -> String {
    let numbered = caption(section_index, item_index, raw_caption);
    match label.map(str::trim).filter(|l| !l.is_empty()) {
        Some(label) => format!("{} {}", label, numbered),
        None => numbered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_caption_prefix() {
        assert_eq!(caption(2, 3, "Water"), "2.3. Water");
        assert_eq!(caption(1, 1, ""), "1.1. ");
    }

    #[test]
    fn test_figure_label() {
        assert_eq!(figure_caption(Some("Fig."), 1, 2, "Heat"), "Fig. 1.2. Heat");
        assert_eq!(figure_caption(Some("  "), 1, 2, "Heat"), "1.2. Heat");
        assert_eq!(figure_caption(None, 1, 2, "Heat"), "1.2. Heat");
    }

    proptest! {
        #[test]
        fn prop_prefix_is_positional(s in 1usize..500, i in 1usize..500, text in ".*") {
            let rendered = caption(s, i, &text);
            let prefix = format!("{}.{}. ", s, i);
            prop_assert!(rendered.starts_with(&prefix));
            prop_assert_eq!(&rendered[prefix.len()..], text.as_str());
        }

        #[test]
        fn prop_caption_is_pure(s in 1usize..50, i in 1usize..50, text in "[a-z ]{0,20}") {
            prop_assert_eq!(caption(s, i, &text), caption(s, i, &text));
        }
    }
}
