use std::collections::BTreeSet;

use crate::regions::{self, DEFAULT_ACCENT};

/// A fill change to apply to one region shape. `None` restores the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaint {
    pub region: String,
    pub fill: Option<&'static str>,
}

impl Repaint {
    fn reset(region: String) -> Self {
        Self { region, fill: None }
    }
}

/// Single-selection highlight state.
///
/// Tracks which shapes currently carry a non-default fill so that clearing
/// can restore every one of them.
#[derive(Debug, Default)]
pub struct Selection {
    selected: Option<String>,
    painted: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, region: &str) -> bool {
        self.selected.as_deref() == Some(region)
    }

    /// Select `region`. Returns `None` if it is already selected.
    pub fn select(&mut self, region: &str) -> Option<Vec<Repaint>> {
        if self.is_selected(region) {
            return None;
        }

        let mut repaints = Vec::with_capacity(2);
        if let Some(previous) = self.selected.take() {
            self.painted.remove(&previous);
            repaints.push(Repaint::reset(previous));
        }

        self.painted.insert(region.to_string());
        repaints.push(Repaint {
            region: region.to_string(),
            fill: Some(regions::highlight_color(region)),
        });
        self.selected = Some(region.to_string());
        Some(repaints)
    }

    /// Clear the selection and restore every painted shape.
    pub fn clear(&mut self) -> Vec<Repaint> {
        self.selected = None;
        std::mem::take(&mut self.painted)
            .into_iter()
            .map(Repaint::reset)
            .collect()
    }

    /// Hover preview for a non-selected shape. The selected shape keeps its
    /// highlight and yields `None`.
    pub fn hover(&mut self, region: &str, entering: bool) -> Option<Repaint> {
        if self.is_selected(region) {
            return None;
        }
        if entering {
            self.painted.insert(region.to_string());
            Some(Repaint {
                region: region.to_string(),
                fill: Some(DEFAULT_ACCENT),
            })
        } else {
            self.painted.remove(region);
            Some(Repaint::reset(region.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_of<'a>(repaints: &'a [Repaint], region: &str) -> Option<&'a Option<&'static str>> {
        repaints.iter().find(|r| r.region == region).map(|r| &r.fill)
    }

    #[test]
    fn test_first_selection_paints_table_color() {
        let mut sel = Selection::new();
        let repaints = sel.select("IN").unwrap();
        assert_eq!(repaints.len(), 1);
        assert_eq!(fill_of(&repaints, "IN"), Some(&Some("#db2777")));
        assert_eq!(sel.selected(), Some("IN"));
    }

    #[test]
    fn test_unknown_region_uses_accent() {
        let mut sel = Selection::new();
        let repaints = sel.select("FR").unwrap();
        assert_eq!(fill_of(&repaints, "FR"), Some(&Some(DEFAULT_ACCENT)));
    }

    #[test]
    fn test_switching_resets_previous() {
        let mut sel = Selection::new();
        sel.select("US");
        let repaints = sel.select("BR").unwrap();
        assert_eq!(fill_of(&repaints, "US"), Some(&None));
        assert_eq!(fill_of(&repaints, "BR"), Some(&Some("#16a34a")));
        assert_eq!(sel.selected(), Some("BR"));
    }

    #[test]
    fn test_reselect_is_noop() {
        let mut sel = Selection::new();
        sel.select("US");
        assert!(sel.select("US").is_none());
        assert_eq!(sel.selected(), Some("US"));
    }

    #[test]
    fn test_clear_restores_all_painted() {
        let mut sel = Selection::new();
        sel.select("US");
        sel.hover("CA", true);
        let mut repaints = sel.clear();
        repaints.sort_by(|a, b| a.region.cmp(&b.region));
        assert_eq!(
            repaints,
            vec![
                Repaint::reset("CA".to_string()),
                Repaint::reset("US".to_string()),
            ]
        );
        assert_eq!(sel.selected(), None);
        assert!(sel.clear().is_empty());
    }

    #[test]
    fn test_hover_preview_and_restore() {
        let mut sel = Selection::new();
        let enter = sel.hover("MX", true).unwrap();
        assert_eq!(enter.fill, Some(DEFAULT_ACCENT));
        let leave = sel.hover("MX", false).unwrap();
        assert_eq!(leave.fill, None);
        assert!(sel.clear().is_empty());
    }

    #[test]
    fn test_selected_shape_exempt_from_hover() {
        let mut sel = Selection::new();
        sel.select("JP");
        assert!(sel.hover("JP", true).is_none());
        assert!(sel.hover("JP", false).is_none());
        // Highlight survives a hover-out on the selected shape.
        let repaints = sel.clear();
        assert_eq!(repaints, vec![Repaint::reset("JP".to_string())]);
    }

    #[test]
    fn test_selecting_hovered_shape_keeps_highlight_after_leave() {
        let mut sel = Selection::new();
        sel.hover("AU", true);
        let repaints = sel.select("AU").unwrap();
        assert_eq!(fill_of(&repaints, "AU"), Some(&Some("#0d9488")));
        assert!(sel.hover("AU", false).is_none());
    }
}
