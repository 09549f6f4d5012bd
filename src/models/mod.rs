pub(crate) const SIDEBAR_ID: &str = "sidebar";
pub(crate) const SIDEBAR_TOGGLE_ID: &str = "sidebarToggleMobile";
pub(crate) const SIDEBAR_OVERLAY_ID: &str = "sidebarOverlay";
pub(crate) const SEARCH_INPUT_ID: &str = "globalSearch";
pub(crate) const SEARCH_RESULTS_ID: &str = "searchResults";
pub(crate) const UPLOAD_FORM_ID: &str = "uploadForm";
pub(crate) const UPLOAD_PROGRESS_ID: &str = "uploadProgress";
pub(crate) const SUBMIT_BUTTON_ID: &str = "submitBtn";

/// Ids a click can be attributed to when deciding "inside"/"outside".
pub(crate) const TRACKED_IDS: [&str; 8] = [
    SIDEBAR_ID,
    SIDEBAR_TOGGLE_ID,
    SIDEBAR_OVERLAY_ID,
    SEARCH_INPUT_ID,
    SEARCH_RESULTS_ID,
    UPLOAD_FORM_ID,
    UPLOAD_PROGRESS_ID,
    SUBMIT_BUTTON_ID,
];

pub(crate) const NAV_LINK_SELECTOR: &str = ".sidebar-nav .nav-link";
pub(crate) const SUBMENU_TOGGLE_SELECTOR: &str = "#sidebar [data-bs-toggle=\"collapse\"]";
pub(crate) const FILE_INPUT_SELECTOR: &str = "#uploadForm input[type=\"file\"]";

pub(crate) const SHOW_CLASS: &str = "show";
pub(crate) const ACTIVE_CLASS: &str = "active";
pub(crate) const HIDDEN_CLASS: &str = "d-none";

/// What the DOM layer reads off one `.sidebar-nav .nav-link`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NavLink {
    /// `textContent`, trimmed.
    pub text: String,
    /// Raw `href` attribute, not the resolved URL.
    pub href: Option<String>,
    /// Id of the enclosing `.collapse` panel, set only when some trigger
    /// targets it (`[data-bs-target="#id"]`).
    pub panel_id: Option<String>,
}

impl NavLink {
    /// The href when it points somewhere; empty and `#` are placeholders.
    pub fn target(&self) -> Option<&str> {
        self.href
            .as_deref()
            .filter(|href| !href.is_empty() && *href != "#")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NavEntry {
    pub display_text: String,
    pub target_path: String,
}

impl NavEntry {
    pub fn from_link(link: &NavLink) -> Option<Self> {
        let target = link.target()?;
        if link.text.is_empty() {
            return None;
        }
        Some(Self {
            display_text: link.text.clone(),
            target_path: target.to_string(),
        })
    }
}

/// File metadata as exposed by the browser's `FileList`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UploadFile {
    pub name: String,
    pub size: u64,
}

impl UploadFile {
    /// Lower-cased extension without the dot, if the name has one.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(text: &str, href: Option<&str>) -> NavLink {
        NavLink {
            text: text.to_string(),
            href: href.map(str::to_string),
            panel_id: None,
        }
    }

    #[test]
    fn test_nav_entry_skips_placeholders() {
        assert!(NavEntry::from_link(&link("Inicio", None)).is_none());
        assert!(NavEntry::from_link(&link("Inicio", Some(""))).is_none());
        assert!(NavEntry::from_link(&link("Inicio", Some("#"))).is_none());
        assert!(NavEntry::from_link(&link("", Some("/inicio"))).is_none());
    }

    #[test]
    fn test_nav_entry_keeps_text_and_href() {
        let entry = NavEntry::from_link(&link("Operativos", Some("/operativos"))).unwrap();
        assert_eq!(entry.display_text, "Operativos");
        assert_eq!(entry.target_path, "/operativos");
    }

    #[test]
    fn test_upload_file_extension() {
        let f = |name: &str| UploadFile {
            name: name.to_string(),
            size: 1,
        };
        assert_eq!(f("Denuncias.XLSX").extension().as_deref(), Some("xlsx"));
        assert_eq!(f("a.b.csv").extension().as_deref(), Some("csv"));
        assert_eq!(f("README").extension(), None);
        assert_eq!(f(".bashrc").extension(), None);
        assert_eq!(f("trailing.").extension(), None);
    }
}
