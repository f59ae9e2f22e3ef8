use std::fmt::Write;
use trussx_joints::{BoundaryConditions, ForceRange, Palette, Point, TrussGeometry, TrussSolution};

/// Width of the drawing area in SVG user units.
const CANVAS: f64 = 800.0;
/// Blank border around the truss.
const MARGIN: f64 = 60.0;
/// Length of the longest load arrow.
const ARROW: f64 = 50.0;

/// Maps model coordinates onto the canvas with the y axis pointing up.
struct Viewport {
    /// Model point drawn at the top-left of the drawing area.
    origin: Point,
    /// Canvas units per model unit.
    scale: f64,
    /// Height of the whole canvas.
    height: f64,
}

impl Viewport {
    /// Fit the geometry's bounding box inside the canvas.
    fn fit(geometry: &TrussGeometry) -> Self {
        let bounds = geometry.bounding_box();
        let extent = bounds.width().max(bounds.height());
        let scale = if extent > 0.0 {
            (CANVAS - 2.0 * MARGIN) / extent
        } else {
            1.0
        };
        Self {
            origin: Point::new(bounds.min.x, bounds.max.y),
            scale,
            height: bounds.height() * scale + 2.0 * MARGIN,
        }
    }

    /// Canvas position of a model point.
    fn project(&self, position: Point) -> (f64, f64) {
        (
            MARGIN + (position.x - self.origin.x) * self.scale,
            MARGIN + (self.origin.y - position.y) * self.scale,
        )
    }
}

/// Draw the solved truss as SVG, colouring each member by its force.
///
/// Supports are drawn as triangles (pin) and circles (roller); loads as red
/// arrows scaled to the largest load.
#[must_use]
pub fn render_svg(
    geometry: &TrussGeometry,
    conditions: &BoundaryConditions,
    solution: &TrussSolution,
    palette: &Palette,
    range: &ForceRange,
) -> String {
    let view = Viewport::fit(geometry);
    let mut svg = String::new();

    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CANVAS:.0}" height="{:.0}" viewBox="0 0 {CANVAS:.0} {:.0}">"#,
        view.height, view.height
    )
    .expect("writing to string cannot fail");
    writeln!(&mut svg, r#"<rect width="100%" height="100%" fill="white"/>"#)
        .expect("writing to string cannot fail");

    for result in &solution.members {
        let Some((start, end)) = geometry.member_endpoints(result.member) else {
            continue;
        };
        let (Some(a), Some(b)) = (geometry.node_coord(start), geometry.node_coord(end)) else {
            continue;
        };
        let (x1, y1) = view.project(a);
        let (x2, y2) = view.project(b);
        let color = palette.color_for(result.force, range).to_hex();
        writeln!(
            &mut svg,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{color}" stroke-width="6" stroke-linecap="round"><title>member {}: {:+.4} ({})</title></line>"#,
            result.member,
            result.force,
            result.kind.label()
        )
        .expect("writing to string cannot fail");
    }

    for (node, position) in geometry.nodes().enumerate() {
        let (x, y) = view.project(position);
        writeln!(
            &mut svg,
            r#"<circle cx="{x:.2}" cy="{y:.2}" r="5" fill="black"><title>node {node}</title></circle>"#
        )
        .expect("writing to string cannot fail");
    }

    if let Some(position) = geometry.node_coord(conditions.supports.fixed) {
        let (x, y) = view.project(position);
        writeln!(
            &mut svg,
            r#"<polygon class="fixed" points="{x:.2},{y:.2} {:.2},{:.2} {:.2},{:.2}" fill="none" stroke="black" stroke-width="2"/>"#,
            x - 12.0,
            y + 20.0,
            x + 12.0,
            y + 20.0
        )
        .expect("writing to string cannot fail");
    }
    if let Some(position) = geometry.node_coord(conditions.supports.roller) {
        let (x, y) = view.project(position);
        writeln!(
            &mut svg,
            r#"<circle class="roller" cx="{x:.2}" cy="{:.2}" r="10" fill="none" stroke="black" stroke-width="2"/>"#,
            y + 15.0
        )
        .expect("writing to string cannot fail");
    }

    let largest = conditions
        .loads
        .iter()
        .map(|load| load.force.to_vector().norm())
        .fold(0.0_f64, f64::max);
    if largest > 0.0 {
        for load in &conditions.loads {
            let Some(position) = geometry.node_coord(load.node) else {
                continue;
            };
            let (x, y) = view.project(position);
            let dx = load.force.x / largest * ARROW;
            let dy = -load.force.y / largest * ARROW;
            writeln!(
                &mut svg,
                r#"<line class="load" x1="{:.2}" y1="{:.2}" x2="{x:.2}" y2="{y:.2}" stroke="crimson" stroke-width="2"/>"#,
                x - dx,
                y - dy
            )
            .expect("writing to string cannot fail");
        }
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use trussx_joints::{analyze, force, point, AnalysisConfig, Load, Supports};

    #[test]
    fn draws_every_member_support_and_load() {
        let geometry = TrussGeometry::new(
            vec![point(0.0, 0.0), point(4.0, 0.0), point(2.0, 2.0)],
            vec![(0, 1), (1, 2), (0, 2)],
        )
        .expect("valid triangle");
        let conditions = BoundaryConditions::new(
            Supports::new(0, 1),
            vec![Load::new(2, force(0.0, -10.0))],
        );
        let solution =
            analyze(&geometry, &conditions, &AnalysisConfig::default()).expect("solvable");
        let palette = Palette::diverging(9).expect("non-empty");
        let range = ForceRange::covering(&solution.members);

        let svg = render_svg(&geometry, &conditions, &solution, &palette, &range);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<title>member").count(), 3);
        assert_eq!(svg.matches("<title>node").count(), 3);
        assert_eq!(svg.matches(r#"class="fixed""#).count(), 1);
        assert_eq!(svg.matches(r#"class="roller""#).count(), 1);
        assert_eq!(svg.matches(r#"class="load""#).count(), 1);
        // The rafters carry the largest compression, so they get the first colour.
        let rafter = palette.colors()[0].to_hex();
        assert_eq!(svg.matches(rafter.as_str()).count(), 2);
    }

    #[test]
    fn viewport_flips_the_y_axis() {
        let geometry = TrussGeometry::new(vec![point(0.0, 0.0), point(2.0, 1.0)], vec![(0, 1)])
            .expect("valid bar");
        let view = Viewport::fit(&geometry);
        let (x0, y0) = view.project(point(0.0, 0.0));
        let (x1, y1) = view.project(point(2.0, 1.0));
        assert!((x0 - MARGIN).abs() < 1.0e-9);
        assert!(x1 > x0);
        assert!(y1 < y0);
        assert!((y1 - MARGIN).abs() < 1.0e-9);
    }
}
