use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub number: Color,
    pub identifier: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub statement: Color,  // Rectangles in the tree pane
    pub expression: Color, // Ellipses in the tree pane
    pub nesting_edge: Color,
    pub chain_edge: Color,
    pub selected: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    identifier: Color::Rgb(148, 226, 213),     // Cyan/teal for identifiers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    statement: Color::Rgb(137, 180, 250),
    expression: Color::Rgb(250, 179, 135),
    nesting_edge: Color::Rgb(205, 214, 244),
    chain_edge: Color::Rgb(166, 227, 161),
    selected: Color::Rgb(249, 226, 175),
};
