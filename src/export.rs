//! Static document export of an assessment report
//!
//! Renders `templates/report.html`: the same content as the report panel plus
//! the rating legend. The wind rose is drawn as an inline SVG polar-area chart.

use askama::Template;

use crate::assessment::{AssessmentReport, DirectionalProfile};
use crate::presentation::{
    RatingBandView, ReportView, SECTOR_COLORS, WIND_ROSE_CAPTION, WIND_ROSE_INSUFFICIENT,
    WIND_ROSE_TITLE, rating_scale,
};

pub const EXPORT_FILENAME: &str = "wind-site-report.html";
pub const EXPORT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

const ROSE_SIZE: f64 = 320.0;
const SECTOR_HALF_WIDTH: f64 = 22.5;

#[derive(Template)]
#[template(path = "report.html")]
struct ReportDocument<'a> {
    view: &'a ReportView,
    wind_speed: String,
    elevation: String,
    rose: Option<WindRose>,
    rose_title: &'static str,
    rose_caption: &'static str,
    insufficient: &'static str,
    rating_scale: Vec<RatingBandView>,
    assessed_at: String,
}

struct WindRose {
    size: f64,
    wedges: Vec<Wedge>,
}

/// One sector of the rose, coordinates already formatted for the SVG
struct Wedge {
    label: &'static str,
    frequency: f64,
    color: &'static str,
    path: String,
    label_x: String,
    label_y: String,
}

/// Render the report as a standalone HTML document
pub fn render_html(report: &AssessmentReport) -> askama::Result<String> {
    let view = ReportView::from(report);
    let document = ReportDocument {
        view: &view,
        wind_speed: report.measurement.format_wind_speed(),
        elevation: report.measurement.format_elevation(),
        rose: wind_rose(&report.directional_profile),
        rose_title: WIND_ROSE_TITLE,
        rose_caption: WIND_ROSE_CAPTION,
        insufficient: WIND_ROSE_INSUFFICIENT,
        rating_scale: rating_scale(),
        assessed_at: report.assessed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    };
    document.render()
}

/// Polar-area chart: one 45° wedge per sector, radius proportional to its share
/// of the largest sector. `None` when the profile is absent.
fn wind_rose(profile: &DirectionalProfile) -> Option<WindRose> {
    let sectors = profile.sectors();
    if sectors.is_empty() {
        return None;
    }

    let center = ROSE_SIZE / 2.0;
    let max_radius = center - 24.0;
    let max_value = sectors.iter().map(|s| s.frequency).fold(0.0_f64, f64::max);

    let wedges = sectors
        .iter()
        .zip(SECTOR_COLORS)
        .map(|(sector, color)| {
            let bearing = sector.sector.bearing_degrees();
            let radius = if max_value > 0.0 {
                (sector.frequency.max(0.0) / max_value) * max_radius
            } else {
                0.0
            };
            let (x1, y1) = polar(center, radius, bearing - SECTOR_HALF_WIDTH);
            let (x2, y2) = polar(center, radius, bearing + SECTOR_HALF_WIDTH);
            let (lx, ly) = polar(center, max_radius + 12.0, bearing);

            Wedge {
                label: sector.sector.label(),
                frequency: sector.frequency,
                color,
                path: format!(
                    "M {center:.2} {center:.2} L {x1:.2} {y1:.2} A {radius:.2} {radius:.2} 0 0 1 {x2:.2} {y2:.2} Z"
                ),
                label_x: format!("{lx:.2}"),
                label_y: format!("{ly:.2}"),
            }
        })
        .collect();

    Some(WindRose {
        size: ROSE_SIZE,
        wedges,
    })
}

/// Point at `radius` from the center along a compass bearing (0° = up, clockwise)
fn polar(center: f64, radius: f64, bearing_degrees: f64) -> (f64, f64) {
    let radians = bearing_degrees.to_radians();
    (
        center + radius * radians.sin(),
        center - radius * radians.cos(),
    )
}
