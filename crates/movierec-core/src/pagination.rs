use std::fmt;

/// Lists shorter than this show every page without ellipses.
const MAX_UNTRUNCATED: u32 = 5;

/// One token of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabel {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLabel::Page(n) => write!(f, "{}", n),
            PageLabel::Ellipsis => f.write_str("..."),
        }
    }
}

/// Page labels for a control showing `current` out of `total` pages.
///
/// Up to five pages are listed in full. Beyond that the output is the first
/// page, the pages adjacent to `current`, and the last page, with an ellipsis
/// standing in for each gap; never more than seven tokens. `current` is not
/// range-checked.
pub fn page_labels(current: u32, total: u32) -> Vec<PageLabel> {
    if total <= MAX_UNTRUNCATED {
        return (1..=total).map(PageLabel::Page).collect();
    }

    let mut labels = vec![PageLabel::Page(1)];
    if current > 3 {
        labels.push(PageLabel::Ellipsis);
    }

    let start = current.saturating_sub(1).max(2);
    let end = current.saturating_add(1).min(total - 1);
    labels.extend((start..=end).map(PageLabel::Page));

    if current < total - 2 {
        labels.push(PageLabel::Ellipsis);
    }
    labels.push(PageLabel::Page(total));
    labels
}
