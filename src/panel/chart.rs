//! Radar chart: the unit stat overview on the right side. Draw-only.

use crate::composer::{Composer, CursorTransform};
use crate::geometry::{Circle, Polygon, Region, Vec2};
use crate::theme::Theme;
use crate::transform::Transform;

/// One stat axis of the radar chart.
#[derive(Debug, Clone)]
pub struct ChartAxis {
    pub label: String,
    /// Stat value normalized to `[0, 1]`
    pub ratio: f32,
}

impl ChartAxis {
    pub fn new(label: impl Into<String>, ratio: f32) -> Self {
        Self {
            label: label.into(),
            ratio,
        }
    }
}

/// Layout metrics for the radar chart.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Outer circle radius; the chart centers at `(radius, radius)`
    pub radius: f32,
    /// Outer border width
    pub out_frame_size: f32,
    /// Width of the band between the outer circle and the dial
    pub in_frame_size: f32,
    /// Radius of the plotted value at ratio 1.0
    pub value_radius: f32,
    /// Radius of the axis label ring
    pub label_radius: f32,
    /// Concentric guide circle radii
    pub guide_radii: [f32; 3],
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            radius: 200.0,
            out_frame_size: 15.0,
            in_frame_size: 40.0,
            value_radius: 120.0,
            label_radius: 150.0,
            guide_radii: [40.0, 80.0, 120.0],
        }
    }
}

/// Radar chart over a fixed set of stat axes.
pub struct ChartPanel {
    config: ChartConfig,
    theme: Theme,
    axes: Vec<ChartAxis>,
    /// Plotted stat polygon, rebuilt only when the axes change
    plot: Region,
}

impl ChartPanel {
    pub fn new(config: ChartConfig, theme: Theme, axes: Vec<ChartAxis>) -> Self {
        let plot = Self::build_plot(&config, &axes);
        Self {
            config,
            theme,
            axes,
            plot,
        }
    }

    /// Default stat axes for the stage.
    pub fn default_axes() -> Vec<ChartAxis> {
        vec![
            ChartAxis::new("Hp", 1.0),
            ChartAxis::new("Atk", 0.8),
            ChartAxis::new("AtkRt", 0.9),
            ChartAxis::new("Dif", 0.1),
            ChartAxis::new("Spd", 0.0),
            ChartAxis::new("Wgt", 0.05),
        ]
    }

    pub fn set_axes(&mut self, axes: Vec<ChartAxis>) {
        self.plot = Self::build_plot(&self.config, &axes);
        self.axes = axes;
    }

    /// Direction of axis `i` out of `n`, starting straight up and going
    /// clockwise.
    fn axis_direction(i: usize, n: usize) -> Vec2 {
        let angle = (-90.0 + 360.0 / n as f32 * i as f32).to_radians();
        Vec2::new(angle.cos(), angle.sin())
    }

    fn build_plot(config: &ChartConfig, axes: &[ChartAxis]) -> Region {
        let points: Vec<Vec2> = axes
            .iter()
            .enumerate()
            .map(|(i, axis)| {
                Self::axis_direction(i, axes.len()) * (axis.ratio * config.value_radius)
            })
            .collect();
        Region::from_polygon(Polygon::new(points))
    }

    /// Per-tick draw pass.
    pub fn update(&self, composer: &mut Composer) {
        let cfg = &self.config;
        composer.with_frame(
            Transform::translate(cfg.radius, cfg.radius),
            CursorTransform::Apply,
            |c| {
                let frame = Circle::new(Vec2::ZERO, cfg.radius);
                let dial = Circle::new(Vec2::ZERO, cfg.radius - cfg.in_frame_size);

                c.draw_circle(frame, self.theme.base);
                c.draw_circle_frame(frame, cfg.out_frame_size, self.theme.sub);
                c.draw_circle(dial, self.theme.main);

                // Guide contours and crosshair
                c.draw_circle(Circle::new(Vec2::ZERO, 10.0), self.theme.shadow);
                for r in cfg.guide_radii {
                    c.draw_circle_frame(Circle::new(Vec2::ZERO, r), 3.0, self.theme.shadow);
                }
                let reach = dial.radius;
                c.draw_line(
                    Vec2::new(-reach, 0.0),
                    Vec2::new(reach, 0.0),
                    3.0,
                    self.theme.shadow,
                    false,
                );
                c.draw_line(
                    Vec2::new(0.0, -reach),
                    Vec2::new(0.0, reach),
                    3.0,
                    self.theme.shadow,
                    false,
                );
                // Fade from the dial rim inward
                c.draw_circle_frame(dial, 30.0, self.theme.shadow.with_alpha(0.15));

                for (i, axis) in self.axes.iter().enumerate() {
                    let dir = Self::axis_direction(i, self.axes.len());
                    c.draw_text(
                        axis.label.clone(),
                        dir * cfg.label_radius,
                        20.0,
                        self.theme.accent.with_alpha(0.5),
                        crate::draw::Align::Center,
                    );
                    let value = dir * (axis.ratio * cfg.value_radius);
                    c.draw_circle(Circle::new(value, 8.0), self.theme.accent);
                }

                c.draw_region(&self.plot, self.theme.accent.with_alpha(0.5));
                c.draw_region_frame(&self.plot, 4.0, self.theme.accent);
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerButtons;

    #[test]
    fn test_axis_directions() {
        // First axis points straight up
        let up = ChartPanel::axis_direction(0, 6);
        assert!(up.x.abs() < 1e-6);
        assert!((up.y + 1.0).abs() < 1e-6);

        // Quarter turn later for axis n/4
        let right = ChartPanel::axis_direction(1, 4);
        assert!((right.x - 1.0).abs() < 1e-6);
        assert!(right.y.abs() < 1e-6);
    }

    #[test]
    fn test_plot_polygon_spans_values() {
        let chart = ChartPanel::new(
            ChartConfig::default(),
            Theme::default(),
            ChartPanel::default_axes(),
        );
        // Hp = 1.0 puts a vertex at the top of the value ring
        assert!(chart.plot.contains(Vec2::new(0.0, -110.0)));
        // Opposite side stays near the center (Dif/Spd are tiny)
        assert!(!chart.plot.contains(Vec2::new(0.0, 100.0)));
    }

    #[test]
    fn test_update_records_draws() {
        let chart = ChartPanel::new(
            ChartConfig::default(),
            Theme::default(),
            ChartPanel::default_axes(),
        );
        let mut composer = Composer::new();
        composer.begin_tick(None, PointerButtons::empty());
        chart.update(&mut composer);
        assert!(!composer.primitives().is_empty());
    }
}
