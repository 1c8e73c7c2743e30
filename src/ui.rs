pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget},
};
use typewriter::{
    matcher::CharMatch,
    rows::{WordRow, WordState},
    TestState, TestStatistics, TestView,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

struct Styles {
    bold: Style,
    green: Style,
    red: Style,
    dim: Style,
    cursor: Style,
    warning: Style,
}

impl Styles {
    fn new() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().patch(bold).add_modifier(Modifier::DIM);
        Self {
            bold,
            green: Style::default().patch(bold).fg(Color::Green),
            red: Style::default().patch(bold).fg(Color::Red),
            dim,
            cursor: Style::default()
                .patch(dim)
                .add_modifier(Modifier::UNDERLINED),
            warning: Style::default().patch(bold).fg(Color::Yellow),
        }
    }
}

/// Renders the engine's view model; owns no test state.
pub struct Screen<'a> {
    pub view: &'a TestView<'a>,
}

impl Widget for &Screen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let styles = Styles::new();
        match self.view.report {
            Some(report) if self.view.state == TestState::Finished => {
                render_results(report, &styles, area, buf)
            }
            _ => render_typing(self.view, &styles, area, buf),
        }
    }
}

fn render_typing(view: &TestView, styles: &Styles, area: Rect, buf: &mut Buffer) {
    let prompt_lines = view.rows.len().max(1) as u16;
    let padding = area.height.saturating_sub(prompt_lines + 2) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(padding),
                Constraint::Length(2),
                Constraint::Length(prompt_lines),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(area);

    let timer_style = if view.is_warning {
        styles.warning
    } else {
        styles.dim
    };
    let status = match view.state {
        TestState::Waiting => "start typing",
        TestState::Paused => "paused (tab)",
        _ => "",
    };
    Paragraph::new(Line::from(vec![
        Span::styled(view.time.clone(), timer_style),
        Span::styled(format!("   {} wpm   {status}", view.live_wpm), styles.dim),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let lines: Vec<Line> = view
        .rows
        .iter()
        .map(|row| row_line(row, view, styles))
        .collect();
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(esc) restart / (tab) pause / (ctrl+c) quit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);
}

fn row_line<'a>(row: &'a WordRow, view: &TestView, styles: &Styles) -> Line<'a> {
    let mut spans = Vec::new();
    for (n, state) in row.words.iter().enumerate() {
        if n > 0 {
            spans.push(Span::raw(" "));
        }
        if state.is_active {
            spans.extend(active_word_spans(view, styles));
        } else {
            spans.push(word_span(state, styles));
        }
    }
    Line::from(spans)
}

fn word_span<'a>(state: &'a WordState, styles: &Styles) -> Span<'a> {
    let style = match state.is_correct {
        Some(true) => styles.green,
        Some(false) => styles.red,
        None => styles.dim,
    };
    Span::styled(state.word.text.as_str(), style)
}

fn active_word_spans(view: &TestView, styles: &Styles) -> Vec<Span<'static>> {
    let typed: Vec<char> = view.current_input.chars().collect();
    view.active_word
        .iter()
        .enumerate()
        .map(|(idx, c)| match c.state {
            CharMatch::Correct => Span::styled(c.expected.to_string(), styles.green),
            CharMatch::Incorrect => Span::styled(
                typed.get(idx).copied().unwrap_or(c.expected).to_string(),
                styles.red,
            ),
            CharMatch::Active => Span::styled(c.expected.to_string(), styles.cursor),
            CharMatch::NotTyped => Span::styled(c.expected.to_string(), styles.dim),
        })
        .collect()
}

fn render_results(report: &TestStatistics, styles: &Styles, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    let (overall_duration, highest_wpm) =
        charting::compute_chart_params(&report.wpm_over_time, report.elapsed_seconds);
    let highest_wpm = highest_wpm.max(1.0);

    let tuples: Vec<(f64, f64)> = report
        .wpm_over_time
        .iter()
        .map(|p| (p.t, p.wpm))
        .collect();
    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&tuples)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([1.0, overall_duration])
                .labels(vec![
                    Span::styled("1", styles.bold),
                    Span::styled(charting::format_label(overall_duration), styles.bold),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", styles.bold),
                    Span::styled(charting::format_label(highest_wpm), styles.bold),
                ]),
        )
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {} raw   {}% acc   {:.2} sd",
            report.wpm, report.raw_wpm, report.accuracy_pct, report.wpm_std_dev
        ),
        styles.bold,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!(
            "{}/{} words   {}/{} chars   {}s",
            report.correct_words,
            report.total_words,
            report.correct_chars,
            report.total_chars,
            report.elapsed_seconds
        ),
        styles.dim,
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    let mode = match (report.config.duration, report.config.word_count) {
        (Some(secs), _) => format!("time {secs}s"),
        (None, Some(words)) => format!("words {words}"),
        (None, None) => String::new(),
    };
    Paragraph::new(Span::styled(
        format!("{mode} | {}", report.config.language),
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        "(esc) retry / (q) quit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[4], buf);
}
