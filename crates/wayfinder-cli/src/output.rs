//! Output formatting for CLI commands.
//!
//! Every formatter returns the rendered text so the binary decides where it
//! goes and tests can inspect it directly.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use wayfinder_lib::narration::StepKind;
use wayfinder_lib::{Location, RouteRenderMode, RouteSummary, SearchResult};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

/// Floor overview printed by the `floors` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FloorReport {
    pub id: String,
    pub name: String,
    pub locations: usize,
    pub connections: usize,
    pub components: usize,
    pub isolated: Vec<String>,
}

/// Starting points on a floor, plus the nearest one to a destination when requested.
#[derive(Debug, Clone, Serialize)]
pub struct StartsReport<'a> {
    pub floor: &'a str,
    pub starting_points: Vec<&'a Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest: Option<&'a Location>,
}

pub fn format_route(
    summary: &RouteSummary,
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => route_text(summary, palette),
        OutputFormat::Rich => summary.render(RouteRenderMode::RichText),
        OutputFormat::Json => json(summary)?,
    })
}

fn route_text(summary: &RouteSummary, palette: ColorPalette) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Route: {}{}{} -> {}{}{} on {} ({} route)",
        palette.tag_start,
        summary.start.display_name(),
        palette.reset,
        palette.tag_goal,
        summary.goal.display_name(),
        palette.reset,
        summary.floor,
        summary.source
    );
    let _ = writeln!(
        buffer,
        "Distance: {}{:.1}{}, estimated time: {}{}{}",
        palette.cyan,
        summary.distance,
        palette.reset,
        palette.cyan,
        summary.estimated_time,
        palette.reset
    );
    if !summary.accessibility.is_empty() {
        let _ = writeln!(buffer, "Accessibility: {}", summary.accessibility);
    }
    for step in &summary.steps {
        let tag = match step.kind {
            Some(StepKind::Elevator | StepKind::Stairs) => palette.tag_transition,
            _ => "",
        };
        let _ = writeln!(
            buffer,
            "{:>3}: {}{}{}",
            step.index + 1,
            tag,
            step.text,
            if tag.is_empty() { "" } else { palette.reset }
        );
    }
    buffer
}

pub fn format_floors(
    reports: &[FloorReport],
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<String> {
    if format == OutputFormat::Json {
        return json(&reports);
    }

    let mut buffer = String::new();
    for report in reports {
        let _ = writeln!(
            buffer,
            "{}{}{} {}({}){}: {} locations, {} connections, {} component(s)",
            palette.white_bold,
            report.name,
            palette.reset,
            palette.gray,
            report.id,
            palette.reset,
            report.locations,
            report.connections,
            report.components
        );
        if !report.isolated.is_empty() {
            let _ = writeln!(buffer, "  isolated: {}", report.isolated.join(", "));
        }
    }
    Ok(buffer)
}

pub fn format_locations(
    locations: &[&Location],
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<String> {
    if format == OutputFormat::Json {
        return json(&locations);
    }

    let mut buffer = String::new();
    for location in locations {
        write_location(&mut buffer, location, format, palette);
    }
    Ok(buffer)
}

pub fn format_search(
    results: &[SearchResult<'_>],
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<String> {
    if format == OutputFormat::Json {
        return json(&results);
    }

    if results.is_empty() {
        return Ok("No matching locations.\n".to_string());
    }

    let mut buffer = String::new();
    let mut current_floor = None;
    for result in results {
        if current_floor != Some(result.floor_id) {
            let _ = writeln!(buffer, "{}:", result.floor_name);
            current_floor = Some(result.floor_id);
        }
        write_location(&mut buffer, result.location, format, palette);
    }
    Ok(buffer)
}

pub fn format_starts(
    report: &StartsReport<'_>,
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<String> {
    if format == OutputFormat::Json {
        return json(report);
    }

    let mut buffer = String::new();
    let _ = writeln!(buffer, "Starting points on {}:", report.floor);
    for location in &report.starting_points {
        write_location(&mut buffer, location, format, palette);
    }
    if let Some(destination) = report.destination {
        match report.nearest {
            Some(nearest) => {
                let _ = writeln!(
                    buffer,
                    "Nearest starting point to {}{}{}: {}{}{} ({})",
                    palette.tag_goal,
                    destination,
                    palette.reset,
                    palette.tag_start,
                    nearest.name,
                    palette.reset,
                    nearest.id
                );
            }
            None => {
                let _ = writeln!(
                    buffer,
                    "No starting point can reach {}{}{}.",
                    palette.tag_goal, destination, palette.reset
                );
            }
        }
    }
    Ok(buffer)
}

fn write_location(
    buffer: &mut String,
    location: &Location,
    format: OutputFormat,
    palette: ColorPalette,
) {
    let room = location
        .room
        .as_deref()
        .map(|room| format!(", room {room}"))
        .unwrap_or_default();
    let tag = if location.kind().is_vertical_transition() {
        palette.tag_transition
    } else {
        ""
    };

    match format {
        OutputFormat::Rich => {
            let _ = writeln!(
                buffer,
                "* **{}** (`{}`) _{}{}_",
                location.name,
                location.id,
                location.kind(),
                room
            );
        }
        _ => {
            let _ = writeln!(
                buffer,
                "  {}{:<18}{} {}{}{} [{}{}]",
                palette.gray,
                location.id,
                palette.reset,
                tag,
                location.name,
                palette.reset,
                location.kind(),
                room
            );
        }
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}
