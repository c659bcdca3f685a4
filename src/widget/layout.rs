// src/widget/layout.rs

use chrono::{DateTime, Local, Utc};

use super::{Align, Line, Palette, Span};
use crate::models::{ResolvedNeuron, Snapshot};

const UNAVAILABLE: &str = "n/a";
const TABLE_ROWS: usize = 5;
const EXTENDED_ROWS: usize = 14;

fn amount(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => UNAVAILABLE.to_string(),
    }
}

/// `color` when the value is present, the error colour otherwise.
fn tint(value: Option<f64>, color: Palette) -> Palette {
    if value.is_some() {
        color
    } else {
        Palette::Error
    }
}

fn clock(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}

pub(super) fn placeholder() -> Vec<Line> {
    vec![
        Line::new(Align::Center, vec![Span::semibold("τ stats", 14, Palette::Tao)]),
        Line::new(
            Align::Center,
            vec![Span::regular("Waiting for first sync…", 11, Palette::Gray)],
        ),
    ]
}

fn no_data_banner() -> Line {
    Line::new(
        Align::Center,
        vec![Span::semibold("No data from upstream", 12, Palette::Error)],
    )
    .with_background(Palette::ErrorBackground)
}

fn price_line(snapshot: &Snapshot, align: Align) -> Line {
    let per_tao = snapshot.rates.tao_to_alpha();
    let usd = snapshot.rates.tao_to_usdt;
    Line::new(
        align,
        vec![
            Span::semibold("1τ =", 11, Palette::Tao),
            Span::semibold(format!("α{}", amount(per_tao, 2)), 11, tint(per_tao, Palette::Alpha)),
            Span::semibold(format!("${}", amount(usd, 2)), 11, tint(usd, Palette::Gold)),
        ],
    )
}

fn alpha_price_line(snapshot: &Snapshot) -> Line {
    let rates = snapshot.rates;
    let usd = rates.alpha_to_tao.zip(rates.tao_to_usdt).map(|(a, t)| a * t);
    Line::new(
        Align::Spread,
        vec![
            Span::semibold("1α =", 11, Palette::Alpha),
            Span::semibold(
                format!("τ{}", amount(rates.alpha_to_tao, 5)),
                11,
                tint(rates.alpha_to_tao, Palette::Tao),
            ),
            Span::semibold(format!("${}", amount(usd, 4)), 11, tint(usd, Palette::Gold)),
        ],
    )
}

fn sync_line(snapshot: &Snapshot, with_next: bool) -> Line {
    let mut spans = vec![Span::regular(
        format!("Sync: {}", clock(snapshot.updated_at)),
        11,
        Palette::Gray,
    )];
    if with_next {
        spans.push(Span::regular(
            format!("Next: {}", clock(snapshot.refresh_after)),
            11,
            Palette::Gray,
        ));
    }
    Line::new(Align::Center, spans)
}

/// Totals on top, prices and the uid roll call below.
pub(super) fn compact(snapshot: &Snapshot) -> Vec<Line> {
    let t = &snapshot.totals;
    let mut lines = Vec::new();
    if snapshot.is_empty_of_data() {
        lines.push(no_data_banner());
    }

    lines.push(Line::new(
        Align::Spread,
        vec![
            Span::semibold("∑ Stake", 18, Palette::Gray),
            Span::semibold("∑ Daily", 13, Palette::Gray),
        ],
    ));
    lines.push(Line::new(
        Align::Spread,
        vec![
            Span::regular(format!("α{:.2}", t.stake_total_alpha_token), 14, Palette::Alpha),
            Span::regular(format!("α{:.2}", t.daily_total_alpha_token), 11, Palette::Alpha),
        ],
    ));
    lines.push(Line::new(
        Align::Spread,
        vec![
            Span::regular(
                format!("τ{}", amount(t.stake_total_tao, 2)),
                14,
                tint(t.stake_total_tao, Palette::Tao),
            ),
            Span::regular(
                format!("τ{}", amount(t.daily_total_tao, 2)),
                11,
                tint(t.daily_total_tao, Palette::Tao),
            ),
        ],
    ));
    lines.push(Line::new(
        Align::Spread,
        vec![
            Span::regular(
                format!("${}", amount(t.stake_total_usd, 2)),
                14,
                tint(t.stake_total_usd, Palette::Gold),
            ),
            Span::regular(
                format!("${}", amount(t.daily_total_usd, 2)),
                11,
                tint(t.daily_total_usd, Palette::Gold),
            ),
        ],
    ));

    lines.push(price_line(snapshot, Align::Flow));

    let mut uids = vec![Span::semibold("UIDs:", 11, Palette::Gray)];
    uids.extend(snapshot.neurons.iter().map(|n| {
        let color = if n.metrics().is_some() {
            Palette::CyanGreen
        } else {
            Palette::Error
        };
        Span::semibold(n.uid().to_string(), 11, color)
    }));
    lines.push(Line::new(Align::Center, uids));

    lines.push(sync_line(snapshot, false));
    lines
}

fn neuron_row(neuron: &ResolvedNeuron, index: usize, extended: bool) -> Line {
    let color = if index % 2 == 0 {
        Palette::EvenRow
    } else {
        Palette::OddRow
    };

    match neuron {
        ResolvedNeuron::Resolved(m) => {
            let stake = format!(
                "α{:.1} | t{} | ${}",
                m.stake_alpha_token,
                amount(m.stake_tao, 2),
                amount(m.stake_usd, 0)
            );
            let daily = if extended {
                format!(
                    "α{:.2} | t{} | ${}",
                    m.daily_alpha_token,
                    amount(m.daily_tao, 3),
                    amount(m.daily_usd, 2)
                )
            } else {
                format!("α{:.2} | ${}", m.daily_alpha_token, amount(m.daily_usd, 2))
            };
            Line::new(
                Align::Spread,
                vec![
                    Span::semibold(m.uid.to_string(), 12, color),
                    Span::semibold(stake, 12, color),
                    Span::semibold(daily, 12, color),
                ],
            )
        }
        ResolvedNeuron::Failed { uid, error } => {
            let line = Line::new(
                Align::Flow,
                vec![Span::semibold(format!("UID {}: {}", uid, error), 12, Palette::Error)],
            );
            if extended {
                line.with_background(Palette::ErrorBackground)
            } else {
                line
            }
        }
    }
}

/// One row per neuron with a totals row; `extended` adds the daily Tao
/// figure, more rows and both price directions.
pub(super) fn table(snapshot: &Snapshot, extended: bool) -> Vec<Line> {
    let t = &snapshot.totals;
    let max_rows = if extended { EXTENDED_ROWS } else { TABLE_ROWS };
    let mut lines = Vec::new();
    if snapshot.is_empty_of_data() {
        lines.push(no_data_banner());
    }

    lines.push(Line::new(
        Align::Spread,
        vec![
            Span::semibold("UIDs", 13, Palette::CyanGreen),
            Span::semibold("Stake", 13, Palette::Gold),
            Span::semibold("Daily", 13, Palette::White),
        ],
    ));

    lines.extend(
        snapshot
            .neurons
            .iter()
            .take(max_rows)
            .enumerate()
            .map(|(i, n)| neuron_row(n, i, extended)),
    );
    if snapshot.neurons.len() > max_rows {
        lines.push(Line::new(
            Align::Flow,
            vec![Span::regular(
                format!("+{} more", snapshot.neurons.len() - max_rows),
                11,
                Palette::Gray,
            )],
        ));
    }

    lines.push(Line::new(
        Align::Spread,
        vec![
            Span::semibold("∑", 18, Palette::Alpha),
            Span::semibold(
                format!(
                    "α{:.0} | t{} | ${}",
                    t.stake_total_alpha_token,
                    amount(t.stake_total_tao, 2),
                    amount(t.stake_total_usd, 2)
                ),
                14,
                Palette::Tao,
            ),
            Span::semibold(
                format!(
                    "α{:.0} | t{} | ${}",
                    t.daily_total_alpha_token,
                    amount(t.daily_total_tao, 2),
                    amount(t.daily_total_usd, 2)
                ),
                14,
                Palette::Gold,
            ),
        ],
    ));

    lines.push(price_line(snapshot, Align::Spread));
    if extended {
        lines.push(alpha_price_line(snapshot));
    }
    lines.push(sync_line(snapshot, extended));
    lines
}
