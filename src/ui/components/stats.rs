//! 统计卡片：Total / Completed / Pending / High priority

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::TaskStats;
use crate::theme::ThemeColors;

/// 卡片高度：边框 2 + 数字 1 + 标签 1
pub const STATS_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, area: Rect, stats: &TaskStats, colors: &ThemeColors) {
    let cards = Layout::horizontal([Constraint::Fill(1); 4]).split(area);

    let items = [
        ("Total", stats.total, colors.highlight),
        ("Completed", stats.completed, colors.success),
        ("Pending", stats.pending, colors.priority_medium),
        ("High priority", stats.high_pending, colors.priority_high),
    ];

    for ((label, value, accent), card) in items.into_iter().zip(cards.iter()) {
        render_card(frame, *card, label, value, accent, colors);
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: usize,
    accent: Color,
    colors: &ThemeColors,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let lines = vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(colors.muted),
        )),
    ];

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(card, area);
}
