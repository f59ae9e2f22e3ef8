use serde::Serialize;
use std::fmt::Write;
use trussx_joints::{ForceKind, Reactions, TrussGeometry, TrussInput, TrussSolution};

/// Render the solved forces as an aligned text table.
///
/// Positive forces are tension, following the usual convention for axial
/// members (see <https://en.wikipedia.org/wiki/Truss#Analysis>).
#[must_use]
pub fn render_text(input: &TrussInput, solution: &TrussSolution) -> String {
    let mut output = String::new();
    let geometry = &input.geometry;

    writeln!(
        &mut output,
        "{} ({} nodes, {} members, {} loads)",
        display_title(&input.title),
        geometry.node_count(),
        geometry.member_count(),
        input.conditions.loads.len()
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "{:>6}  {:>5}  {:>5}  {:>14}  {}",
        "member", "from", "to", "force", "kind"
    )
    .expect("writing to string cannot fail");
    for result in &solution.members {
        let (start, end) = geometry.member_endpoints(result.member).unwrap_or_default();
        writeln!(
            &mut output,
            "{:>6}  {:>5}  {:>5}  {:>+14.6}  {}",
            result.member,
            start,
            end,
            result.force,
            result.kind.label()
        )
        .expect("writing to string cannot fail");
    }

    let supports = input.conditions.supports;
    let reactions = solution.reactions;
    writeln!(
        &mut output,
        "Reactions: fixed node {} Rx = {:+.6}, Ry = {:+.6}; roller node {} Ry = {:+.6}",
        supports.fixed, reactions.fixed_x, reactions.fixed_y, supports.roller, reactions.roller_y
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Summary: {} tension, {} compression, {} zero; max residual {:.3e}",
        solution.tension_members().count(),
        solution.compression_members().count(),
        solution.zero_members().count(),
        solution.max_residual
    )
    .expect("writing to string cannot fail");

    output
}

/// Title shown in reports, falling back to a placeholder for blank lines.
fn display_title(title: &str) -> &str {
    if title.is_empty() {
        "Truss"
    } else {
        title
    }
}

/// One member in the JSON report.
#[derive(Debug, Serialize)]
struct MemberReport {
    /// Member index.
    member: usize,
    /// First endpoint.
    start: usize,
    /// Second endpoint.
    end: usize,
    /// Member length.
    length: f64,
    /// Axial force, tension positive.
    force: f64,
    /// Sign category.
    kind: ForceKind,
}

/// Top-level JSON report.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    /// Title line of the input file.
    title: &'a str,
    /// Number of nodes.
    nodes: usize,
    /// Per-member results.
    members: Vec<MemberReport>,
    /// Support reactions.
    reactions: Reactions,
    /// Largest equilibrium residual.
    max_residual: f64,
}

/// Render the solved forces as pretty-printed JSON.
pub fn render_json(input: &TrussInput, solution: &TrussSolution) -> serde_json::Result<String> {
    let report = JsonReport {
        title: &input.title,
        nodes: input.geometry.node_count(),
        members: member_reports(&input.geometry, solution),
        reactions: solution.reactions,
        max_residual: solution.max_residual,
    };
    serde_json::to_string_pretty(&report)
}

/// Pair each member result with its endpoints and length.
fn member_reports(geometry: &TrussGeometry, solution: &TrussSolution) -> Vec<MemberReport> {
    solution
        .members
        .iter()
        .map(|result| {
            let (start, end) = geometry.member_endpoints(result.member).unwrap_or_default();
            MemberReport {
                member: result.member,
                start,
                end,
                length: geometry.member_length(result.member).unwrap_or(0.0),
                force: result.force,
                kind: result.kind,
            }
        })
        .collect()
}
