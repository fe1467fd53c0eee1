use dotline_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use crate::layout::{Layout, Mark, MarkKind};

/// Height of the axis strip at the bottom of the viewport.
const AXIS_HEIGHT: f64 = 24.0;
const TICK_LENGTH: f64 = 6.0;
const AXIS_FONT_SIZE: f64 = 10.0;

/// Cluster count badge: a stem drops from the cluster circle down to a
/// filled badge holding the member count.
const BADGE_STEM: f64 = 14.0;
const BADGE_HEIGHT: f64 = 20.0;
const BADGE_CHAR_WIDTH: f64 = 8.0;
const BADGE_PADDING: f64 = 10.0;
const BADGE_FONT_SIZE: f64 = 12.0;

/// Flatten a layout into render commands: the axis strip, then singleton
/// points, then clusters with their count badges, so clusters paint above
/// the points they absorb. Emission consumes already-validated geometry and
/// cannot fail.
pub fn render_layout(layout: &Layout, viewport: &Viewport) -> Vec<RenderCommand> {
    let mut commands =
        Vec::with_capacity(layout.marks.len() * 5 + layout.ticks.len() * 2 + 8);

    commands.push(RenderCommand::BeginGroup {
        id: "axis".to_string(),
        label: Some("Time axis".to_string()),
    });
    let baseline = viewport.height - AXIS_HEIGHT;
    commands.push(RenderCommand::DrawLine {
        from: Point::new(0.0, baseline),
        to: Point::new(viewport.width, baseline),
        color: ThemeToken::AxisLine,
        width: 1.0,
    });
    for tick in &layout.ticks {
        commands.push(RenderCommand::DrawLine {
            from: Point::new(tick.x, baseline),
            to: Point::new(tick.x, baseline + TICK_LENGTH),
            color: ThemeToken::AxisTick,
            width: 1.0,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(tick.x, baseline + TICK_LENGTH + AXIS_FONT_SIZE),
            text: tick.label.clone(),
            color: ThemeToken::AxisLabel,
            font_size: AXIS_FONT_SIZE,
            align: TextAlign::Center,
        });
    }
    commands.push(RenderCommand::EndGroup);

    commands.push(RenderCommand::BeginGroup {
        id: "points".to_string(),
        label: None,
    });
    for (id, mark) in layout.marks.iter().enumerate() {
        if matches!(mark.kind, MarkKind::Point { .. }) {
            commands.push(RenderCommand::DrawCircle {
                center: Point::new(mark.x, mark.y),
                radius: mark.radius,
                color: ThemeToken::PointFill,
                mark_id: Some(id as u64),
            });
        }
    }
    commands.push(RenderCommand::EndGroup);

    commands.push(RenderCommand::BeginGroup {
        id: "clusters".to_string(),
        label: None,
    });
    for (id, mark) in layout.marks.iter().enumerate() {
        if matches!(mark.kind, MarkKind::Cluster { .. }) {
            push_cluster(&mut commands, mark, id as u64);
        }
    }
    commands.push(RenderCommand::EndGroup);

    commands
}

fn push_cluster(commands: &mut Vec<RenderCommand>, mark: &Mark, id: u64) {
    commands.push(RenderCommand::DrawCircle {
        center: Point::new(mark.x, mark.y),
        radius: mark.radius,
        color: ThemeToken::ClusterFill,
        mark_id: Some(id),
    });

    let Some(count) = mark.label.as_deref() else {
        return;
    };
    let badge_w = count.len() as f64 * BADGE_CHAR_WIDTH + BADGE_PADDING;
    let badge_top = mark.y + BADGE_STEM;
    commands.push(RenderCommand::DrawLine {
        from: Point::new(mark.x, mark.y),
        to: Point::new(mark.x, badge_top),
        color: ThemeToken::ClusterBadgeBackground,
        width: 2.0,
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(mark.x - badge_w / 2.0, badge_top, badge_w, BADGE_HEIGHT),
        color: ThemeToken::ClusterBadgeBackground,
        mark_id: Some(id),
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(mark.x, badge_top + BADGE_HEIGHT - 5.0),
        text: count.to_string(),
        color: ThemeToken::ClusterBadgeText,
        font_size: BADGE_FONT_SIZE,
        align: TextAlign::Center,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Tick;
    use crate::model::domain::datetime_from_ms;

    fn sample_layout() -> Layout {
        Layout {
            marks: vec![
                Mark {
                    x: 100.0,
                    y: 150.0,
                    radius: 7.0,
                    kind: MarkKind::Point { index: 0 },
                    label: None,
                },
                Mark {
                    x: 300.0,
                    y: 150.0,
                    radius: 10.0,
                    kind: MarkKind::Cluster {
                        members: vec![1, 2, 3],
                    },
                    label: Some("3".to_string()),
                },
            ],
            ticks: vec![
                Tick {
                    x: 0.0,
                    ts: datetime_from_ms(0.0),
                    label: "1970".to_string(),
                },
                Tick {
                    x: 450.0,
                    ts: datetime_from_ms(1_000.0),
                    label: "1971".to_string(),
                },
            ],
        }
    }

    #[test]
    fn emits_circles_for_every_mark() {
        let cmds = render_layout(&sample_layout(), &Viewport::new(900.0, 300.0));
        let circles: Vec<_> = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawCircle { .. }))
            .collect();
        assert_eq!(circles.len(), 2);
    }

    #[test]
    fn cluster_badge_carries_the_count() {
        let cmds = render_layout(&sample_layout(), &Viewport::new(900.0, 300.0));
        let badge_text = cmds.iter().find_map(|c| match c {
            RenderCommand::DrawText {
                text, font_size, ..
            } if *font_size == BADGE_FONT_SIZE => Some(text.clone()),
            _ => None,
        });
        assert_eq!(badge_text.as_deref(), Some("3"));

        let rects: Vec<_> = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawRect { .. }))
            .collect();
        assert_eq!(rects.len(), 1);
    }

    #[test]
    fn axis_ticks_emit_line_and_label_pairs() {
        let cmds = render_layout(&sample_layout(), &Viewport::new(900.0, 300.0));
        let lines = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawLine { .. }))
            .count();
        // Baseline + two ticks + one cluster stem.
        assert_eq!(lines, 4);
        let labels: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(labels.contains(&"1970"));
        assert!(labels.contains(&"1971"));
    }

    #[test]
    fn groups_order_clusters_above_points() {
        let cmds = render_layout(&sample_layout(), &Viewport::new(900.0, 300.0));
        let group_ids: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::BeginGroup { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(group_ids, vec!["axis", "points", "clusters"]);
    }

    #[test]
    fn empty_layout_still_draws_the_axis_baseline() {
        let cmds = render_layout(&Layout::default(), &Viewport::new(900.0, 300.0));
        let lines = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawLine { .. }))
            .count();
        assert_eq!(lines, 1);
        let circles = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawCircle { .. }))
            .count();
        assert_eq!(circles, 0);
    }
}
