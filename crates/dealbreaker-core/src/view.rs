//! Source-document view synchronization.
//!
//! Bridges the risk list and the document viewer: inspecting a red flag
//! moves the viewer to the flag's source page. Only PDF-backed sessions
//! have a viewable source and open on the first page; URL scans stay in
//! the "no preview" placeholder state.

use crate::analysis::{RedFlag, SourceKind};

/// Tracks which page of the source document is visible.
///
/// A pure projection: focusing a flag has no effect on any other component.
#[derive(Debug, Clone)]
pub struct ViewSync {
    source_kind: SourceKind,
    active_page: Option<u32>,
}

impl ViewSync {
    /// Creates the view for a freshly started session.
    ///
    /// PDF-backed sessions show page 1 from the first render; URL scans
    /// have no source document and stay in the placeholder state.
    pub fn new(source_kind: SourceKind) -> Self {
        let active_page = match source_kind {
            SourceKind::Pdf => Some(1),
            SourceKind::Url => None,
        };
        Self {
            source_kind,
            active_page,
        }
    }

    /// Returns the visible page, or `None` in the placeholder state.
    pub fn active_page(&self) -> Option<u32> {
        self.active_page
    }

    /// Focuses the viewer on the page a flag was found on.
    ///
    /// Leaves the viewer untouched unless the session is PDF-backed and the
    /// flag carries a source page.
    pub fn focus_flag(&mut self, flag: &RedFlag) {
        if self.source_kind == SourceKind::Pdf {
            if let Some(page) = flag.source_page {
                self.active_page = Some(page);
            }
        }
    }

    /// Directly navigates the viewer to `page` (PDF sessions only).
    pub fn set_active_page(&mut self, page: u32) {
        if self.source_kind == SourceKind::Pdf {
            self.active_page = Some(page);
        }
    }
}
