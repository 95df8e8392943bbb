use std::fmt::Write as _;

use super::chart::{Bar, LineChart, Viewport};

const INK: &str = "rgba(17,24,39,0.85)";
const AXIS: &str = "rgba(17,24,39,0.15)";
const TICK: &str = "rgba(17,24,39,0.25)";
const LABEL: &str = "rgba(17,24,39,0.65)";
const MUTED: &str = "rgba(17,24,39,0.55)";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn open(out: &mut String, viewport: &Viewport, label: &str) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" viewBox="0 0 {} {}" role="img" aria-label="{}">"#,
        viewport.width,
        viewport.height,
        escape(label)
    );
}

fn baseline(out: &mut String, viewport: &Viewport) {
    let y = viewport.baseline();
    let _ = write!(
        out,
        r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{AXIS}" stroke-width="2"/>"#,
        viewport.pad_left,
        viewport.pad_left + viewport.inner_width(),
    );
}

/// Centered message shown in place of a chart with no data.
pub fn empty_state(viewport: &Viewport, message: &str) -> String {
    let mut out = String::new();
    open(&mut out, viewport, message);
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="14" fill="{MUTED}">{}</text></svg>"#,
        viewport.width / 2.0,
        viewport.height / 2.0,
        escape(message)
    );
    out
}

pub fn bar_chart(bars: &[Bar], viewport: &Viewport) -> String {
    let mut out = String::new();
    open(&mut out, viewport, "Department bar chart");
    baseline(&mut out, viewport);

    let label_y = viewport.baseline() + 18.0;
    for bar in bars {
        let center = bar.x + bar.width / 2.0;
        let _ = write!(
            out,
            concat!(
                r#"<g><rect x="{}" y="{}" width="{}" height="{}" rx="10" fill="{ink}"/>"#,
                r#"<text x="{c}" y="{}" text-anchor="middle" font-size="12" fill="{label}">{}</text>"#,
                r#"<text x="{c}" y="{}" text-anchor="middle" font-size="12" fill="{label}">{}</text></g>"#,
            ),
            bar.x,
            bar.y,
            bar.width,
            bar.height,
            bar.y - 6.0,
            bar.count,
            label_y,
            escape(&bar.label),
            ink = INK,
            label = LABEL,
            c = center,
        );
    }

    out.push_str("</svg>");
    out
}

pub fn line_chart(chart: &LineChart, viewport: &Viewport) -> String {
    let mut out = String::new();
    open(&mut out, viewport, "Monthly attendance line chart");
    baseline(&mut out, viewport);

    let bottom = viewport.baseline();
    let _ = write!(
        out,
        r#"<line x1="{x}" y1="{}" x2="{x}" y2="{bottom}" stroke="{AXIS}" stroke-width="2"/>"#,
        viewport.pad_top,
        x = viewport.pad_left,
    );

    let label_x = viewport.pad_left - 10.0;
    let _ = write!(
        out,
        r#"<text x="{label_x}" y="{}" text-anchor="end" font-size="12" fill="{MUTED}">0</text>"#,
        bottom + 4.0,
    );
    let _ = write!(
        out,
        r#"<text x="{label_x}" y="{}" text-anchor="end" font-size="12" fill="{MUTED}">{}</text>"#,
        viewport.pad_top + 4.0,
        chart.max_y,
    );

    for &day in &chart.tick_days {
        let Some(point) = chart.points.iter().find(|p| p.day == day) else {
            continue;
        };
        let _ = write!(
            out,
            concat!(
                r#"<g><line x1="{x}" y1="{bottom}" x2="{x}" y2="{}" stroke="{tick}"/>"#,
                r#"<text x="{x}" y="{}" text-anchor="middle" font-size="12" fill="{muted}">{day}</text></g>"#,
            ),
            bottom + 6.0,
            bottom + 22.0,
            x = point.x,
            bottom = bottom,
            tick = TICK,
            muted = MUTED,
            day = day,
        );
    }

    let _ = write!(
        out,
        r#"<path d="{}" fill="none" stroke="{INK}" stroke-width="3"/>"#,
        chart.path
    );

    for point in &chart.points {
        let _ = write!(
            out,
            r#"<circle cx="{}" cy="{}" r="3.5" fill="{INK}" opacity="{}"/>"#,
            point.x, point.y, point.opacity
        );
    }

    out.push_str("</svg>");
    out
}
