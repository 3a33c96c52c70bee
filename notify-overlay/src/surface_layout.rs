use taffy::prelude::*;
use taffy::TaffyTree;

const LABEL_INSET_X: f32 = 20.0;
const TITLE_OFFSET_Y: f32 = 40.0;
const TITLE_HEIGHT: f32 = 25.0;
const MESSAGE_OFFSET_Y: f32 = 15.0;
const MESSAGE_HEIGHT: f32 = 20.0;

/// Label rectangle inside the panel, top-left origin with y growing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Fixed-size panel with absolutely placed label slots.
///
/// Offsets are given from the panel's bottom-left corner and resolved into
/// top-left frames for rendering.
pub struct PanelLayout {
    taffy: TaffyTree<()>,
    root: NodeId,
    width: f32,
    height: f32,
    title_node: NodeId,
    message_node: Option<NodeId>,
}

impl PanelLayout {
    pub fn new(width: f32, height: f32, with_message: bool) -> Result<Self, taffy::TaffyError> {
        let mut taffy = TaffyTree::new();
        let label_width = width - LABEL_INSET_X * 2.0;

        let title_node =
            taffy.new_leaf(label_style(height, TITLE_OFFSET_Y, label_width, TITLE_HEIGHT))?;

        let message_node = if with_message {
            Some(taffy.new_leaf(label_style(height, MESSAGE_OFFSET_Y, label_width, MESSAGE_HEIGHT))?)
        } else {
            None
        };

        let mut children = vec![title_node];
        children.extend(message_node);

        // Panel size does not depend on which labels are present
        let root = taffy.new_with_children(
            Style { size: Size { width: length(width), height: length(height) }, ..Default::default() },
            &children,
        )?;

        Ok(Self { taffy, root, width, height, title_node, message_node })
    }

    pub fn compute(&mut self) -> Result<(), taffy::TaffyError> {
        let (width, height) = (self.width, self.height);
        self.taffy.compute_layout(
            self.root,
            Size { width: AvailableSpace::Definite(width), height: AvailableSpace::Definite(height) },
        )
    }

    pub fn title_frame(&self) -> Result<Frame, taffy::TaffyError> {
        self.frame(self.title_node)
    }

    pub fn message_frame(&self) -> Result<Option<Frame>, taffy::TaffyError> {
        self.message_node.map(|node| self.frame(node)).transpose()
    }

    pub fn panel_size(&self) -> Result<(f32, f32), taffy::TaffyError> {
        let layout = self.taffy.layout(self.root)?;
        Ok((layout.size.width, layout.size.height))
    }

    fn frame(&self, node: NodeId) -> Result<Frame, taffy::TaffyError> {
        let layout = self.taffy.layout(node)?;
        Ok(Frame {
            x: layout.location.x,
            y: layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
        })
    }
}

fn label_style(panel_height: f32, offset_from_bottom: f32, width: f32, height: f32) -> Style {
    Style {
        position: Position::Absolute,
        inset: Rect {
            left: length(LABEL_INSET_X),
            top: length(panel_height - offset_from_bottom - height),
            right: auto(),
            bottom: auto(),
        },
        size: Size { width: length(width), height: length(height) },
        ..Default::default()
    }
}
