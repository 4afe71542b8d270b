use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE.fg(Color::LightBlue).add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Blue)
    .add_modifier(Modifier::BOLD);

pub(crate) const BUTTON_STYLE: Style = BASE_STYLE.fg(Color::LightBlue).add_modifier(Modifier::BOLD);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) mod dialog {
    use super::*;

    pub(crate) const HEADER_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);

    pub(crate) const HEADER_DATE_STYLE: Style = HEADER_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const HEADER_YEAR_STYLE: Style = HEADER_STYLE.fg(Color::LightCyan);
}

pub(crate) mod yearpick {
    use super::*;

    pub(crate) const SELECTED_YEAR_STYLE: Style =
        BASE_STYLE.fg(Color::LightBlue).add_modifier(Modifier::BOLD);

    pub(crate) const HIGHLIGHT_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);
}
