//! Static stage catalogue and viewport geometry.
//!
//! Stages are the labeled page regions the scroll trackers watch. They are
//! fixed at build time; only their on-screen rectangles change, and those are
//! re-read from the document on every sample.

use glam::Vec2;

/// Bounding rectangle in viewport (client) coordinates, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl StageRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Screen point used to anchor a particle burst.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.width / 2.0) as f32,
            self.center_y() as f32,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct WorkflowStep {
    pub number: u8,
    pub title: &'static str,
}

impl WorkflowStep {
    /// Element id of the step's row in the workflow section.
    pub fn element_id(&self) -> String {
        workflow_step_id(self.number)
    }
}

#[inline]
pub fn workflow_step_id(number: u8) -> String {
    format!("workflow-step-{}", number)
}

pub const WORKFLOW_STEPS: [WorkflowStep; 5] = [
    WorkflowStep {
        number: 1,
        title: "Discover",
    },
    WorkflowStep {
        number: 2,
        title: "Design",
    },
    WorkflowStep {
        number: 3,
        title: "Develop",
    },
    WorkflowStep {
        number: 4,
        title: "Deploy",
    },
    WorkflowStep {
        number: 5,
        title: "Deliver",
    },
];

#[derive(Clone, Copy, Debug)]
pub struct NavSection {
    pub id: &'static str,
    pub label: &'static str,
}

impl NavSection {
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

pub const NAV_SECTIONS: [NavSection; 3] = [
    NavSection {
        id: "solutions",
        label: "Solutions",
    },
    NavSection {
        id: "workflow",
        label: "Workflow",
    },
    NavSection {
        id: "team",
        label: "Team",
    },
];

/// Window scroll target that puts an element's top `offset` px from the
/// viewport top (negative offset leaves room above it).
#[inline]
pub fn scroll_target_for(rect_top: f64, page_y_offset: f64, offset: f64) -> f64 {
    (rect_top + page_y_offset + offset).max(0.0)
}
