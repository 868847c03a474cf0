/// Extract the leading run of ASCII digits from decorated text ("30%",
/// "200 млн."). A lenient partial parse: trailing decoration is ignored and
/// a value with no leading digits is simply `None`, never an error.
pub(crate) fn parse_decorated_number(text: &str) -> Option<u64> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Suffixes used to re-render numeric magnitudes as the decorated text the
/// worksheet stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationFormats {
    pub rate_suffix: String,
    pub amount_suffix: String,
}

impl DecorationFormats {
    pub fn standard() -> Self {
        Self {
            rate_suffix: "%".to_string(),
            amount_suffix: " млн.".to_string(),
        }
    }

    pub(crate) fn render_rate(&self, value: Option<u64>) -> String {
        render(value, &self.rate_suffix)
    }

    pub(crate) fn render_amount(&self, value: Option<u64>) -> String {
        render(value, &self.amount_suffix)
    }
}

// A failed parse persists as an empty cell: the store never accepts a
// null/NaN marker, and an empty cell stays unrankable on the next cycle.
fn render(value: Option<u64>, suffix: &str) -> String {
    match value {
        Some(magnitude) => format!("{magnitude}{suffix}"),
        None => String::new(),
    }
}
