//! Pure rendering of the checker state.
//!
//! Nothing here mutates state; the terminal loop calls [`render`] after every
//! change. Line builders are split out so the display rules (stage text,
//! stat rounding, verdict color) can be checked without a terminal.

use chrono::{DateTime, Local};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::Focus;
use crate::checker::{CheckerState, Field, RequestState, TradeForm};
use crate::models::{CreatureCard, Stat, TradeResult, LEVEL_MAX, LEVEL_MIN};
use crate::notify::{Notice, NoticeLevel};

const TITLE: &str = "PokéTrade Smart Assistant";
const SUBTITLE: &str = "Check if your Pokémon trade is fair!";
const SUBMIT_LABEL: &str = "Check Trade Fairness";
const LOADING_LABEL: &str = "Checking...";

const TITLE_COLOR: Color = Color::Rgb(0xFF, 0xCB, 0x05);
const ACCENT_COLOR: Color = Color::Rgb(0x3B, 0x4C, 0xCA);
const FAIR_COLOR: Color = Color::Rgb(0x4C, 0xAF, 0x50);
const UNFAIR_COLOR: Color = Color::Rgb(0xFF, 0x52, 0x52);
const MUTED_COLOR: Color = Color::DarkGray;

const LABEL_WIDTH: usize = 10;

pub fn render(frame: &mut Frame, state: &CheckerState, focus: Focus, alert: Option<&Notice>) {
    let [header, form, result_area, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(7),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(Paragraph::new(header_lines()).alignment(Alignment::Center), header);

    let loading = state.request.is_loading();
    let form_block = Block::bordered().title(" Trade ");
    frame.render_widget(
        Paragraph::new(form_lines(&state.form, focus, loading)).block(form_block),
        form,
    );

    if let RequestState::Succeeded {
        result,
        received_at,
    } = &state.request
    {
        render_result(frame, result_area, result, received_at);
    }

    frame.render_widget(
        Paragraph::new(Line::from("Tab/↑↓ move · Enter check · Esc quit"))
            .style(Style::default().fg(MUTED_COLOR)),
        footer,
    );

    if let Some(notice) = alert {
        render_alert(frame, frame.area(), notice);
    }
}

fn header_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(MUTED_COLOR))),
    ]
}

pub fn form_lines(form: &TradeForm, focus: Focus, loading: bool) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Field::ALL
        .iter()
        .map(|&field| field_line(field, form.value(field), focus.field() == Some(field)))
        .collect();
    lines.push(button_line(loading, focus == Focus::Submit));
    lines
}

fn field_line(field: Field, value: &str, active: bool) -> Line<'static> {
    let label = format!("{:<width$}", field.label(), width = LABEL_WIDTH);
    let label_style = if active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::styled(label, label_style)];

    if value.is_empty() {
        let placeholder = if field.is_level() {
            format!("{} ({LEVEL_MIN}-{LEVEL_MAX})", field.placeholder())
        } else {
            field.placeholder().to_string()
        };
        spans.push(Span::styled(
            placeholder,
            Style::default().fg(MUTED_COLOR).add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::raw(value.to_string()));
    }
    if active {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

pub fn button_label(loading: bool) -> &'static str {
    if loading {
        LOADING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

fn button_line(loading: bool, active: bool) -> Line<'static> {
    let mut style = if loading {
        // disabled
        Style::default().fg(MUTED_COLOR)
    } else {
        Style::default().fg(Color::White).bg(ACCENT_COLOR)
    };
    if active && !loading {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled(format!("[ {} ]", button_label(loading)), style),
    ])
}

fn render_result(frame: &mut Frame, area: Rect, result: &TradeResult, received_at: &DateTime<Local>) {
    let block = Block::bordered().title(" Trade Results ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [cards, verdict] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(inner);
    let [left, vs, right] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(6),
        Constraint::Fill(1),
    ])
    .areas(cards);

    let [card1, card2] = result.cards();
    for (card, card_area) in [(card1, left), (card2, right)] {
        frame.render_widget(
            Paragraph::new(card_lines(&card))
                .block(Block::bordered())
                .wrap(Wrap { trim: true }),
            card_area,
        );
    }

    let vs_lines = vec![
        Line::default(),
        Line::default(),
        Line::from(Span::styled(
            "VS",
            Style::default().fg(UNFAIR_COLOR).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(vs_lines).alignment(Alignment::Center), vs);

    frame.render_widget(
        Paragraph::new(verdict_lines(result, received_at)).alignment(Alignment::Center),
        verdict,
    );
}

pub fn card_lines(card: &CreatureCard<'_>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            card.name.to_string(),
            Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Level: {}", card.level)),
        Line::from(format!(
            "Evolution Stage: {} {}",
            card.stage,
            stage_text(card.stage, card.min_evo_level)
        )),
        Line::from(Span::styled(
            card.image.unwrap_or("no sprite").to_string(),
            Style::default().fg(MUTED_COLOR),
        )),
        Line::default(),
    ];
    lines.extend(card.stats.iter().map(stat_line));
    lines
}

/// Parenthetical after the stage number. A missing or zero evolution level reads "N/A".
pub fn stage_text(stage: u32, min_evo_level: Option<u32>) -> String {
    if stage <= 1 {
        return "(Basic Form)".to_string();
    }
    match min_evo_level.filter(|level| *level > 0) {
        Some(level) => format!("(Evolves at Level {level})"),
        None => "(Evolves at Level N/A)".to_string(),
    }
}

/// Nearest integer, for display only.
pub fn display_stat(value: f64) -> i64 {
    value.round() as i64
}

pub fn stat_line(stat: &Stat) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}:", stat.name.to_uppercase()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {}", display_stat(stat.value))),
    ])
}

pub fn status_color(result: &TradeResult) -> Color {
    if result.is_fair() {
        FAIR_COLOR
    } else {
        UNFAIR_COLOR
    }
}

pub fn verdict_lines(result: &TradeResult, received_at: &DateTime<Local>) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::raw("Fairness Score: "),
            Span::styled(
                result.fairness_score.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            result.trade_status.clone(),
            Style::default()
                .fg(status_color(result))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Checked at {}", received_at.format("%H:%M:%S")),
            Style::default().fg(MUTED_COLOR),
        )),
    ]
}

fn render_alert(frame: &mut Frame, area: Rect, notice: &Notice) {
    if area.width < 20 || area.height < 5 {
        return;
    }
    let popup_width = area.width.saturating_sub(10).clamp(20, 60);
    let popup_height = 5;
    let left = area.x + area.width.saturating_sub(popup_width) / 2;
    let top = area.y + area.height.saturating_sub(popup_height) / 2;
    let popup = Rect::new(left, top, popup_width, popup_height);

    let color = match notice.level {
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => UNFAIR_COLOR,
    };
    let lines = vec![
        Line::from(Span::styled(notice.message.clone(), Style::default().fg(color))),
        Line::default(),
        Line::from(Span::styled("Enter/Esc to dismiss", Style::default().fg(MUTED_COLOR))),
    ];
    let block = Block::bordered()
        .title(format!(" {} ", notice.title()))
        .border_style(Style::default().fg(color));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use uuid::Uuid;

    use super::*;
    use crate::models::fixtures::sample_result;

    fn draw(state: &CheckerState, focus: Focus, alert: Option<&Notice>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| render(frame, state, focus, alert))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn succeeded() -> CheckerState {
        CheckerState {
            request: RequestState::Succeeded {
                result: sample_result(),
                received_at: Local::now(),
            },
            ..CheckerState::default()
        }
    }

    #[test]
    fn test_stage_text_rules() {
        assert_eq!(stage_text(1, None), "(Basic Form)");
        assert_eq!(stage_text(1, Some(16)), "(Basic Form)");
        assert_eq!(stage_text(0, None), "(Basic Form)");
        assert_eq!(stage_text(2, None), "(Evolves at Level N/A)");
        assert_eq!(stage_text(2, Some(16)), "(Evolves at Level 16)");
        assert_eq!(stage_text(3, Some(0)), "(Evolves at Level N/A)");
    }

    #[test]
    fn test_stat_values_round_to_nearest() {
        assert_eq!(display_stat(55.6), 56);
        assert_eq!(display_stat(55.4), 55);
        assert_eq!(display_stat(55.0), 55);
    }

    #[test]
    fn test_stat_line_uppercases_label() {
        let line = stat_line(&Stat {
            name: "special-attack".to_string(),
            value: 79.5,
        });
        assert_eq!(line_text(&line), "SPECIAL-ATTACK: 80");
    }

    #[test]
    fn test_status_color_is_exact_match() {
        let mut result = sample_result();
        for (status, color) in [
            ("Fair Trade", FAIR_COLOR),
            ("Unfair Trade", UNFAIR_COLOR),
            ("fair trade", UNFAIR_COLOR),
            ("Fair Trade ", UNFAIR_COLOR),
        ] {
            result.trade_status = status.to_string();
            assert_eq!(status_color(&result), color, "status {status:?}");
        }
    }

    #[test]
    fn test_verdict_lines_color_status() {
        let mut result = sample_result();
        let lines = verdict_lines(&result, &Local::now());
        assert_eq!(line_text(&lines[0]), "Fairness Score: 0.83");
        assert_eq!(lines[1].spans[0].content, "Fair Trade");
        assert_eq!(lines[1].spans[0].style.fg, Some(FAIR_COLOR));

        result.trade_status = "Unfair Trade".to_string();
        let lines = verdict_lines(&result, &Local::now());
        assert_eq!(lines[1].spans[0].style.fg, Some(UNFAIR_COLOR));
    }

    #[test]
    fn test_card_lines_show_stage_and_stats() {
        let result = sample_result();
        let [basic, evolved] = result.cards();

        let basic_text: Vec<String> = card_lines(&basic).iter().map(line_text).collect();
        assert_eq!(basic_text[0], "Charmander");
        assert_eq!(basic_text[1], "Level: 30");
        assert_eq!(basic_text[2], "Evolution Stage: 1 (Basic Form)");
        assert!(basic_text.contains(&"HP: 39".to_string()));

        let evolved_text: Vec<String> = card_lines(&evolved).iter().map(line_text).collect();
        assert_eq!(evolved_text[2], "Evolution Stage: 2 (Evolves at Level 16)");
        assert_eq!(evolved_text.last().unwrap(), "SPEED: 60");
    }

    #[test]
    fn test_card_without_sprite() {
        let mut result = sample_result();
        result.pokemon1_image = None;
        let [card, _] = result.cards();
        assert_eq!(line_text(&card_lines(&card)[3]), "no sprite");
    }

    #[test]
    fn test_button_label_follows_loading() {
        assert_eq!(button_label(false), "Check Trade Fairness");
        assert_eq!(button_label(true), "Checking...");

        let lines = form_lines(&TradeForm::default(), Focus::Submit, true);
        assert_eq!(lines.len(), 5);
        assert!(line_text(&lines[4]).contains("[ Checking... ]"));
    }

    #[test]
    fn test_form_lines_show_placeholders_when_empty() {
        let lines = form_lines(&TradeForm::default(), Focus::Level1, false);
        assert!(line_text(&lines[0]).contains("Enter first Pokémon (e.g., Charizard)"));
        assert!(line_text(&lines[1]).contains('1'));
        assert!(line_text(&lines[1]).ends_with('█'));
        assert!(line_text(&lines[2]).contains("Enter second Pokémon (e.g., Blastoise)"));
    }

    #[test]
    fn test_idle_screen_has_form_but_no_result_panel() {
        let screen = draw(&CheckerState::default(), Focus::Name1, None);
        assert!(screen.contains("PokéTrade Smart Assistant"));
        assert!(screen.contains("Check Trade Fairness"));
        assert!(!screen.contains("Trade Results"));
    }

    #[test]
    fn test_loading_screen_disables_button() {
        let state = CheckerState {
            request: RequestState::Loading {
                request_id: Uuid::new_v4(),
            },
            ..CheckerState::default()
        };
        let screen = draw(&state, Focus::Submit, None);
        assert!(screen.contains("Checking..."));
        assert!(!screen.contains("Check Trade Fairness"));
        assert!(!screen.contains("Trade Results"));
    }

    #[test]
    fn test_succeeded_screen_shows_both_cards() {
        let screen = draw(&succeeded(), Focus::Name1, None);
        assert!(screen.contains("Trade Results"));
        assert!(screen.contains("Charmander"));
        assert!(screen.contains("Ivysaur"));
        assert!(screen.contains("VS"));
        assert!(screen.contains("Fairness Score: 0.83"));
        assert!(screen.contains("Fair Trade"));
    }

    #[test]
    fn test_failed_screen_has_no_result_panel() {
        let state = CheckerState {
            request: RequestState::Failed,
            ..CheckerState::default()
        };
        let alert = Notice::error("Failed to fetch trade data. Please try again.");
        let screen = draw(&state, Focus::Name1, Some(&alert));
        assert!(!screen.contains("Trade Results"));
        assert!(screen.contains("Failed to fetch trade data"));
    }
}
