//! 主题颜色定义

use ratatui::style::Color;

use super::ThemeColors;

/// 深色主题（默认）
pub fn dark_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(24, 22, 30),
        bg_secondary: Color::Rgb(44, 40, 56),
        highlight: Color::Rgb(192, 132, 252), // 紫色
        text: Color::White,
        muted: Color::Rgb(140, 136, 150),
        border: Color::Rgb(70, 64, 86),
        priority_high: Color::Rgb(248, 113, 113),
        priority_medium: Color::Rgb(250, 204, 21),
        priority_low: Color::Rgb(74, 222, 128),
        success: Color::Rgb(74, 222, 128),
        error: Color::Rgb(248, 113, 113),
    }
}

/// 浅色主题
pub fn light_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(250, 246, 252),
        bg_secondary: Color::Rgb(236, 226, 244),
        highlight: Color::Rgb(147, 51, 234),
        text: Color::Rgb(31, 29, 36),
        muted: Color::Rgb(115, 110, 125),
        border: Color::Rgb(216, 200, 230),
        priority_high: Color::Rgb(185, 28, 28),
        priority_medium: Color::Rgb(161, 98, 7),
        priority_low: Color::Rgb(21, 128, 61),
        success: Color::Rgb(21, 128, 61),
        error: Color::Rgb(185, 28, 28),
    }
}

pub fn dracula_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(40, 42, 54),
        bg_secondary: Color::Rgb(68, 71, 90),
        highlight: Color::Rgb(255, 121, 198), // pink
        text: Color::Rgb(248, 248, 242),
        muted: Color::Rgb(98, 114, 164),
        border: Color::Rgb(68, 71, 90),
        priority_high: Color::Rgb(255, 85, 85),
        priority_medium: Color::Rgb(241, 250, 140),
        priority_low: Color::Rgb(80, 250, 123),
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
    }
}

pub fn nord_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(46, 52, 64),
        bg_secondary: Color::Rgb(59, 66, 82),
        highlight: Color::Rgb(136, 192, 208), // frost
        text: Color::Rgb(236, 239, 244),
        muted: Color::Rgb(129, 161, 193),
        border: Color::Rgb(76, 86, 106),
        priority_high: Color::Rgb(191, 97, 106),
        priority_medium: Color::Rgb(235, 203, 139),
        priority_low: Color::Rgb(163, 190, 140),
        success: Color::Rgb(163, 190, 140),
        error: Color::Rgb(191, 97, 106),
    }
}

/// Catppuccin Mocha
pub fn catppuccin_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(30, 30, 46),
        bg_secondary: Color::Rgb(49, 50, 68),
        highlight: Color::Rgb(203, 166, 247), // mauve
        text: Color::Rgb(205, 214, 244),
        muted: Color::Rgb(127, 132, 156),
        border: Color::Rgb(69, 71, 90),
        priority_high: Color::Rgb(243, 139, 168),
        priority_medium: Color::Rgb(249, 226, 175),
        priority_low: Color::Rgb(166, 227, 161),
        success: Color::Rgb(166, 227, 161),
        error: Color::Rgb(243, 139, 168),
    }
}
