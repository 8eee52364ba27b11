//! Declarative page layout.

#![allow(missing_docs)]

use serde::{Serialize, Serializer};

use crate::controls::{
    PayloadRange, SiteSelection, PAYLOAD_SLIDER_MAX, PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_STEP,
};
use crate::dataset::{LaunchSite, PayloadBounds};
use crate::error::DashError;

pub const PAGE_TITLE: &str = "SpaceX Launch Records Dashboard";
const DROPDOWN_PLACEHOLDER: &str = "Select a Launch Site here";
const PAYLOAD_LABEL: &str = "Payload range (Kg):";

/// Addressable page components. Callbacks refer to these, never to raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentId {
    SiteDropdown,
    PayloadSlider,
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

impl ComponentId {
    pub const ALL: [ComponentId; 4] = [
        ComponentId::SiteDropdown,
        ComponentId::PayloadSlider,
        ComponentId::SuccessPieChart,
        ComponentId::SuccessPayloadScatterChart,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentId::SiteDropdown => "site-dropdown",
            ComponentId::PayloadSlider => "payload-slider",
            ComponentId::SuccessPieChart => "success-pie-chart",
            ComponentId::SuccessPayloadScatterChart => "success-payload-scatter-chart",
        }
    }

    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == text)
    }
}

impl Serialize for ComponentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub text_align: &'static str,
    pub color: &'static str,
    pub font_size_px: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: SiteSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutNode {
    Container {
        children: Vec<LayoutNode>,
    },
    Heading {
        text: String,
        style: TextStyle,
    },
    Paragraph {
        text: String,
    },
    LineBreak,
    Dropdown {
        id: ComponentId,
        options: Vec<DropdownOption>,
        value: SiteSelection,
        placeholder: String,
        searchable: bool,
    },
    RangeSlider {
        id: ComponentId,
        min: f64,
        max: f64,
        step: f64,
        marks: Vec<SliderMark>,
        value: PayloadRange,
    },
    Graph {
        id: ComponentId,
    },
}

/// Role a component plays in callback wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentRole {
    Control,
    Chart,
}

impl LayoutNode {
    #[must_use]
    pub fn id(&self) -> Option<ComponentId> {
        match self {
            LayoutNode::Dropdown { id, .. }
            | LayoutNode::RangeSlider { id, .. }
            | LayoutNode::Graph { id } => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<ComponentRole> {
        match self {
            LayoutNode::Dropdown { .. } | LayoutNode::RangeSlider { .. } => {
                Some(ComponentRole::Control)
            }
            LayoutNode::Graph { .. } => Some(ComponentRole::Chart),
            _ => None,
        }
    }

    fn visit<'a>(&'a self, out: &mut Vec<&'a LayoutNode>) {
        out.push(self);
        if let LayoutNode::Container { children } = self {
            for child in children {
                child.visit(out);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub root: LayoutNode,
}

impl Layout {
    /// The launch dashboard page; the slider starts at the observed payload bounds.
    #[must_use]
    pub fn dashboard(bounds: PayloadBounds) -> Self {
        let mut options = vec![DropdownOption {
            label: "All Sites".to_string(),
            value: SiteSelection::All,
        }];
        options.extend(LaunchSite::ALL.into_iter().map(|site| DropdownOption {
            label: site.as_str().to_string(),
            value: SiteSelection::Site(site),
        }));
        let marks = [0.0, 5_000.0, 10_000.0]
            .into_iter()
            .map(|value| SliderMark {
                value,
                label: format!("{value}"),
            })
            .collect();

        let root = LayoutNode::Container {
            children: vec![
                LayoutNode::Heading {
                    text: PAGE_TITLE.to_string(),
                    style: TextStyle {
                        text_align: "center",
                        color: "#503D36",
                        font_size_px: 40,
                    },
                },
                LayoutNode::Dropdown {
                    id: ComponentId::SiteDropdown,
                    options,
                    value: SiteSelection::All,
                    placeholder: DROPDOWN_PLACEHOLDER.to_string(),
                    searchable: true,
                },
                LayoutNode::LineBreak,
                LayoutNode::Container {
                    children: vec![LayoutNode::Graph {
                        id: ComponentId::SuccessPieChart,
                    }],
                },
                LayoutNode::LineBreak,
                LayoutNode::Paragraph {
                    text: PAYLOAD_LABEL.to_string(),
                },
                LayoutNode::RangeSlider {
                    id: ComponentId::PayloadSlider,
                    min: PAYLOAD_SLIDER_MIN,
                    max: PAYLOAD_SLIDER_MAX,
                    step: PAYLOAD_SLIDER_STEP,
                    marks,
                    value: PayloadRange::initial(bounds),
                },
                LayoutNode::Container {
                    children: vec![LayoutNode::Graph {
                        id: ComponentId::SuccessPayloadScatterChart,
                    }],
                },
            ],
        };
        Self {
            title: PAGE_TITLE.to_string(),
            root,
        }
    }

    /// Depth-first, pre-order list of every node.
    #[must_use]
    pub fn nodes(&self) -> Vec<&LayoutNode> {
        let mut out = Vec::new();
        self.root.visit(&mut out);
        out
    }

    #[must_use]
    pub fn find(&self, id: ComponentId) -> Option<&LayoutNode> {
        self.nodes().into_iter().find(|node| node.id() == Some(id))
    }

    pub fn role_of(&self, id: ComponentId) -> Result<ComponentRole, DashError> {
        self.find(id)
            .and_then(LayoutNode::role)
            .ok_or_else(|| {
                DashError::InvalidLayout(format!("no component '{}'", id.as_str()).into())
            })
    }

    /// Rejects layouts declaring the same component id twice.
    pub fn validate(&self) -> Result<(), DashError> {
        let mut seen = Vec::new();
        for id in self.nodes().into_iter().filter_map(LayoutNode::id) {
            if seen.contains(&id) {
                return Err(DashError::InvalidLayout(
                    format!("duplicate component '{}'", id.as_str()).into(),
                ));
            }
            seen.push(id);
        }
        Ok(())
    }
}
