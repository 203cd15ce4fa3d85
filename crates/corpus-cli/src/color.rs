use clap::ValueEnum;
use color_eyre::eyre::Result;

/// Whether to use colored output.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Color {
    No,
    Auto,
    Yes,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}

impl Color {
    fn is_enabled(self) -> bool {
        match self {
            Color::No => false,
            Color::Auto => supports_color::on(supports_color::Stream::Stdout).is_some(),
            Color::Yes => true,
        }
    }
}

/// Installs the color-eyre error report handler, respecting the color preference.
pub(crate) fn install_color_eyre(color: Color) -> Result<()> {
    if color.is_enabled() {
        color_eyre::install()
    } else {
        color_eyre::config::HookBuilder::new()
            .theme(color_eyre::config::Theme::new())
            .install()
    }
}
