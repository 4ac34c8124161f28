//! Layout model for the HUD panels drawn over the scene.

use app::hud_scale::HudScale;
use taffy::TaffyTree;
use taffy::prelude::*;

pub struct LayoutNodes {
    root: NodeId,
    top_row: NodeId,
    location: NodeId,
    monitor: NodeId,
    bottom_row: NodeId,
    log_col: NodeId,
    log: NodeId,
    controls: NodeId,
    weapon: NodeId,
    inventory: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PanelRect {
    pub fn center(self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

pub struct HudLayout {
    pub location: PanelRect,
    pub monitor: PanelRect,
    pub log: PanelRect,
    pub controls: PanelRect,
    pub weapon: PanelRect,
    pub inventory: PanelRect,
}

fn margin_left(value: f32) -> taffy::Rect<LengthPercentageAuto> {
    taffy::Rect { left: length(value), right: zero(), top: zero(), bottom: zero() }
}

/// Build the node tree. Sizes are baked in at `scale`; rebuild when it changes.
pub fn setup_layout(taffy: &mut TaffyTree<()>, scale: HudScale) -> LayoutNodes {
    let gap = scale.px(15.0);
    let location = taffy
        .new_leaf(Style {
            size: Size { width: length(scale.px(280.0)), height: percent(1.0) },
            ..Default::default()
        })
        .expect("location node");
    let spacer = taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() }).expect("spacer node");
    let monitor = taffy
        .new_leaf(Style {
            size: Size { width: length(scale.px(240.0)), height: percent(1.0) },
            ..Default::default()
        })
        .expect("monitor node");
    let top_row = taffy
        .new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Row,
                size: Size { width: percent(1.0), height: length(scale.px(70.0)) },
                ..Default::default()
            },
            &[location, spacer, monitor],
        )
        .expect("top row node");

    let middle = taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() }).expect("middle node");

    let log = taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() }).expect("log node");
    let controls = taffy
        .new_leaf(Style {
            size: Size { width: percent(1.0), height: length(scale.px(40.0)) },
            margin: taffy::Rect { left: zero(), right: zero(), top: length(gap), bottom: zero() },
            ..Default::default()
        })
        .expect("controls node");
    let log_col = taffy
        .new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                flex_grow: 1.0,
                ..Default::default()
            },
            &[log, controls],
        )
        .expect("log column node");
    let weapon = taffy
        .new_leaf(Style {
            size: Size { width: length(scale.px(200.0)), height: percent(1.0) },
            margin: margin_left(gap),
            ..Default::default()
        })
        .expect("weapon node");
    let inventory = taffy
        .new_leaf(Style {
            size: Size { width: length(scale.px(260.0)), height: percent(1.0) },
            margin: margin_left(gap),
            ..Default::default()
        })
        .expect("inventory node");
    let bottom_row = taffy
        .new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Row,
                size: Size { width: percent(1.0), height: length(scale.px(190.0)) },
                ..Default::default()
            },
            &[log_col, weapon, inventory],
        )
        .expect("bottom row node");

    let pad = length(scale.px(20.0));
    let root = taffy
        .new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                size: Size { width: percent(1.0), height: percent(1.0) },
                padding: taffy::Rect { left: pad, right: pad, top: pad, bottom: pad },
                ..Default::default()
            },
            &[top_row, middle, bottom_row],
        )
        .expect("root node");

    LayoutNodes { root, top_row, location, monitor, bottom_row, log_col, log, controls, weapon, inventory }
}

pub fn compute_hud_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &LayoutNodes,
    viewport_width: f32,
    viewport_height: f32,
) -> HudLayout {
    let available_size = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::Definite(viewport_height),
    };
    taffy.compute_layout(nodes.root, available_size).expect("compute layout");

    let l_root = taffy.layout(nodes.root).expect("root layout");
    let l_top = taffy.layout(nodes.top_row).expect("top layout");
    let l_location = taffy.layout(nodes.location).expect("location layout");
    let l_monitor = taffy.layout(nodes.monitor).expect("monitor layout");
    let l_bottom = taffy.layout(nodes.bottom_row).expect("bottom layout");
    let l_log_col = taffy.layout(nodes.log_col).expect("log column layout");
    let l_log = taffy.layout(nodes.log).expect("log layout");
    let l_controls = taffy.layout(nodes.controls).expect("controls layout");
    let l_weapon = taffy.layout(nodes.weapon).expect("weapon layout");
    let l_inventory = taffy.layout(nodes.inventory).expect("inventory layout");

    HudLayout {
        location: panel_rect(l_location, &[l_root, l_top]),
        monitor: panel_rect(l_monitor, &[l_root, l_top]),
        log: panel_rect(l_log, &[l_root, l_bottom, l_log_col]),
        controls: panel_rect(l_controls, &[l_root, l_bottom, l_log_col]),
        weapon: panel_rect(l_weapon, &[l_root, l_bottom]),
        inventory: panel_rect(l_inventory, &[l_root, l_bottom]),
    }
}

fn panel_rect(layout: &taffy::Layout, parents: &[&taffy::Layout]) -> PanelRect {
    let mut x = layout.location.x;
    let mut y = layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}
