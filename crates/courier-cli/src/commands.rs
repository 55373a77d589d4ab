//! Subcommand bodies.  Each writes its result to `out` so tests can capture
//! it.

use std::io::Write;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;

use courier_core::{Coordinate, DeliveryPoint};
use courier_dispatch::RouteService;
use courier_route::round_km;
use courier_store::PointStore;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

pub fn list<S: PointStore, W: Write>(
    svc: &RouteService<S>,
    pending_only: bool,
    format: Format,
    out: &mut W,
) -> Result<()> {
    let mut points = svc.points().context("listing points")?;
    if pending_only {
        points.retain(DeliveryPoint::is_pending);
    }
    debug!(count = points.len(), pending_only, "listing");

    match format {
        Format::Json => write_json(out, &points),
        Format::Text => {
            for p in &points {
                write_point_line(out, p)?;
            }
            Ok(())
        }
    }
}

pub fn optimize<S: PointStore, W: Write>(
    svc: &RouteService<S>,
    start: Option<Coordinate>,
    format: Format,
    out: &mut W,
) -> Result<()> {
    let route = svc.optimize(start).context("optimizing route")?;

    match format {
        Format::Json => write_json(
            out,
            &json!({
                "points": route.points,
                "order": route.summary.order,
                "distance_km": route.summary.display_length_km(),
            }),
        ),
        Format::Text => {
            let planned = route.summary.stops();
            for (i, p) in route.points.iter().take(planned).enumerate() {
                write!(out, "{:>3}. ", i + 1)?;
                write_point_line(out, p)?;
            }
            writeln!(out, "Total: {:.1} km", route.summary.display_length_km())?;
            Ok(())
        }
    }
}

pub fn confirm<S: PointStore, W: Write>(
    svc: &mut RouteService<S>,
    id: &str,
    format: Format,
    out: &mut W,
) -> Result<()> {
    svc.confirm(id).with_context(|| format!("confirming point {id:?}"))?;
    debug!(id = id.trim(), "confirmed");

    match format {
        Format::Json => write_json(out, &json!({ "ok": true })),
        Format::Text => {
            writeln!(out, "confirmed {}", id.trim())?;
            Ok(())
        }
    }
}

pub fn nearest<S: PointStore, W: Write>(
    svc: &RouteService<S>,
    from: Coordinate,
    format: Format,
    out: &mut W,
) -> Result<()> {
    let (point, km) = svc.nearest(from).context("finding nearest point")?;

    match format {
        Format::Json => write_json(out, &json!({ "point": point, "distance_km": round_km(km) })),
        Format::Text => {
            writeln!(out, "{} {} {:.1} km", point.id, point.label(), round_km(km))?;
            Ok(())
        }
    }
}

pub fn length<S: PointStore, W: Write>(svc: &RouteService<S>, format: Format, out: &mut W) -> Result<()> {
    let km = round_km(svc.remaining_length_km().context("measuring route")?);

    match format {
        Format::Json => write_json(out, &json!({ "distance_km": km })),
        Format::Text => {
            writeln!(out, "{km:.1} km")?;
            Ok(())
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn write_point_line<W: Write>(out: &mut W, p: &DeliveryPoint) -> Result<()> {
    let mark = if p.visited { "[x]" } else { "[ ]" };
    write!(out, "{mark} {:<10} {:<24} {}", p.id, p.label(), p.coord)?;
    if let Some(info) = &p.info {
        write!(out, "  # {info}")?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
