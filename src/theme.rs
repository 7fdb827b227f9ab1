use ratatui::style::Color;

pub const THEMES: &[&str] = &["default", "nord", "dracula", "gruvbox", "solarized"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub focus_color: Color,
    pub break_color: Color,
    pub border_color: Color,
    pub accent_color: Color,
}

/// Unknown names fall back to the default palette.
pub fn get_theme(name: &str) -> Theme {
    match name {
        "nord" => Theme {
            focus_color: Color::Rgb(136, 192, 255),
            break_color: Color::Rgb(163, 190, 140),
            border_color: Color::Rgb(100, 200, 255),
            accent_color: Color::Rgb(255, 100, 255),
        },
        "dracula" => Theme {
            focus_color: Color::Rgb(189, 147, 249),
            break_color: Color::Rgb(80, 250, 123),
            border_color: Color::Rgb(200, 100, 255),
            accent_color: Color::Rgb(255, 0, 255),
        },
        "gruvbox" => Theme {
            focus_color: Color::Rgb(254, 128, 25),
            break_color: Color::Rgb(184, 187, 38),
            border_color: Color::Rgb(255, 200, 100),
            accent_color: Color::Rgb(255, 150, 0),
        },
        "solarized" => Theme {
            focus_color: Color::Rgb(42, 161, 152),
            break_color: Color::Rgb(133, 153, 0),
            border_color: Color::Rgb(100, 200, 255),
            accent_color: Color::Rgb(255, 200, 0),
        },
        _ => Theme {
            focus_color: Color::Rgb(100, 181, 246),
            break_color: Color::Rgb(0, 255, 150),
            border_color: Color::Rgb(0, 200, 255),
            accent_color: Color::Rgb(255, 100, 0),
        },
    }
}

pub fn is_known(name: &str) -> bool {
    THEMES.contains(&name)
}
