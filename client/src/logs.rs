use colored::Color;

/// Prints a colored `key: value` line.
///
/// Requires the `colored::Colorize` trait to be in scope. The key color
/// defaults to [`LogColor::Accent`]; values are always muted.
///
/// - print_kv!(key, value)
/// - print_kv!(key, value, key_color)
#[macro_export]
macro_rules! print_kv {
    ($key:expr, $value:expr $(,)?) => {
        $crate::print_kv!($key, $value, $crate::LogColor::Accent)
    };
    ($key:expr, $value:expr, $key_color:expr $(,)?) => {{
        let __key = ::std::string::ToString::to_string(&$key);
        let __value = ::std::string::ToString::to_string(&$value);
        ::std::println!(
            "{}: {}",
            __key.color($key_color),
            __value.color($crate::LogColor::Muted)
        );
    }};
}

#[derive(Clone, Copy, Debug)]
pub enum LogColor {
    Accent,
    Warning,
    Error,
    Muted,
}

#[rustfmt::skip]
impl From<LogColor> for Color {
    fn from(value: LogColor) -> Color {
        match value {
            LogColor::Accent  => Color::TrueColor { r: 255, g: 215, b: 87  },
            LogColor::Warning => Color::TrueColor { r: 180, g: 105, b: 0   },
            LogColor::Error   => Color::TrueColor { r: 255, g: 0,   b: 45  },
            LogColor::Muted   => Color::TrueColor { r: 128, g: 128, b: 128 },
        }
    }
}

pub fn log_divider() {
    println!("{}", "-".repeat(80));
}

#[cfg(test)]
mod tests {
    use colored::Colorize;

    use crate::LogColor;

    #[test]
    fn print_kv_accepts_both_forms() {
        print_kv!("key", "value");
        print_kv!("key", 42, LogColor::Warning);
        super::log_divider();
    }
}
