//! The (model-tag, view-tag) pairs this workspace produces.
//!
//! The renderer resolves widgets by these tags during the handshake; the
//! table is the single place they are all listed.

/// One renderer-visible widget registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// The model tag.
    pub model_name: &'static str,
    /// The view tag.
    pub view_name: &'static str,
}

const REGISTRATIONS: &[Registration] = &[
    Registration {
        model_name: "BoxModel",
        view_name: "BoxView",
    },
    Registration {
        model_name: "VBoxModel",
        view_name: "VBoxView",
    },
    Registration {
        model_name: "HBoxModel",
        view_name: "HBoxView",
    },
    Registration {
        model_name: "GridBoxModel",
        view_name: "GridBoxView",
    },
    Registration {
        model_name: "AccordionModel",
        view_name: "AccordionView",
    },
    Registration {
        model_name: "TabModel",
        view_name: "TabView",
    },
    Registration {
        model_name: "OutputModel",
        view_name: "OutputView",
    },
];

/// Every (model-tag, view-tag) pair registered by this crate and the output
/// widget it appends.
pub fn registrations() -> &'static [Registration] {
    REGISTRATIONS
}

/// Look up a registration by model tag.
pub fn find(model_name: &str) -> Option<Registration> {
    REGISTRATIONS
        .iter()
        .copied()
        .find(|r| r.model_name == model_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::BoxKind;
    use crate::selection::SelectionKind;

    #[test]
    fn table_matches_the_kind_enums() {
        for kind in [
            BoxKind::Box,
            BoxKind::Vertical,
            BoxKind::Horizontal,
            BoxKind::Grid,
        ] {
            let reg = find(kind.model_name()).unwrap();
            assert_eq!(reg.view_name, kind.view_name());
        }
        for kind in [SelectionKind::Accordion, SelectionKind::Tab] {
            let reg = find(kind.model_name()).unwrap();
            assert_eq!(reg.view_name, kind.view_name());
        }
    }

    #[test]
    fn output_widget_is_registered() {
        assert!(find("OutputModel").is_some());
        assert!(find("NopeModel").is_none());
    }
}
