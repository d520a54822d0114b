//! Color scheme

/// Named colors shared by notebook output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Primary,
    Success,
    Warning,
    Danger,
    Info,
    Dark,
    Light,
}

impl Palette {
    pub const ALL: [Palette; 7] = [
        Palette::Primary,
        Palette::Success,
        Palette::Warning,
        Palette::Danger,
        Palette::Info,
        Palette::Dark,
        Palette::Light,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Palette::Primary => "primary",
            Palette::Success => "success",
            Palette::Warning => "warning",
            Palette::Danger => "danger",
            Palette::Info => "info",
            Palette::Dark => "dark",
            Palette::Light => "light",
        }
    }

    /// Hex code, `#rrggbb`
    pub fn hex(&self) -> &'static str {
        match self {
            Palette::Primary => "#3498db",
            Palette::Success => "#27ae60",
            Palette::Warning => "#f39c12",
            Palette::Danger => "#e74c3c",
            Palette::Info => "#16a085",
            Palette::Dark => "#2c3e50",
            Palette::Light => "#ecf0f1",
        }
    }

    pub fn from_name(name: &str) -> Option<Palette> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// Hex code for a color name; unknown names get the primary color
pub fn color(name: &str) -> &'static str {
    Palette::from_name(name).unwrap_or(Palette::Primary).hex()
}
