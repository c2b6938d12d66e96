/// Marker value on the root `<svg>` `id` attribute that identifies the
/// animation dialect. Matched bit-exact, whole value.
pub const PHANTOM_ID: &str = "phantom_svg";

/// SVG namespace URI.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// XLink namespace URI, used by `xlink:href` cross references.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// SVG version attribute written on every root element.
pub const SVG_VERSION: &str = "1.1";

/// Frame duration in seconds when a source carries no timing information.
pub const DEFAULT_DURATION: f64 = 0.1;

/// A width/height value, either numeric pixels or a pre-formatted string.
///
/// Sources parsed from markup keep the raw attribute text (`Text`), so a
/// `width="64px"` survives a round trip byte for byte. Programmatic sources
/// (the bitmap reader, [`crate::Frame::from_rgba8`]) use `Px`, which
/// serializes as the truncated integer plus a `px` suffix.
#[derive(Clone, Debug, PartialEq)]
pub enum Length {
    /// Raw pixel count.
    Px(f64),
    /// Pre-formatted length text, written back verbatim.
    Text(String),
}

impl Length {
    /// Numeric pixel value, coercing `Text` with the lenient prefix rule.
    pub fn to_px(&self) -> f64 {
        match self {
            Length::Px(v) => *v,
            Length::Text(s) => coerce_f64(s),
        }
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{}px", *v as i64),
            Length::Text(s) => f.write_str(s),
        }
    }
}

/// A `viewBox` rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    /// Left edge.
    pub min_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl ViewBox {
    /// Lenient parse of a `viewBox` attribute value: values separated by
    /// whitespace and/or commas, non-numeric or missing entries coerce to 0.
    pub fn from_text(text: &str) -> Self {
        let mut it = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(coerce_f64);
        Self {
            min_x: it.next().unwrap_or(0.0),
            min_y: it.next().unwrap_or(0.0),
            width: it.next().unwrap_or(0.0),
            height: it.next().unwrap_or(0.0),
        }
    }
}

impl std::fmt::Display for ViewBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            fmt_float(self.min_x),
            fmt_float(self.min_y),
            fmt_float(self.width),
            fmt_float(self.height)
        )
    }
}

/// Integral values print without a fractional part.
pub(crate) fn fmt_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 9e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Longest-numeric-prefix float coercion: `"0.1s"` is 0.1, `"indefinite"`
/// and the empty string are 0. Leading whitespace is skipped.
pub fn coerce_f64(text: &str) -> f64 {
    let s = text.trim_start();
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut any = i > int_start;
    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > frac_start || any {
            any = any || j > frac_start;
            i = j;
        }
    }
    if any && i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    if !any {
        return 0.0;
    }
    s[..i].parse().unwrap_or(0.0)
}

/// Truncating unsigned coercion with the same prefix rule; negative values
/// clamp to 0. `"indefinite"` is 0, which the model treats as infinite.
pub fn coerce_u32(text: &str) -> u32 {
    let v = coerce_f64(text);
    if v <= 0.0 {
        0
    } else if v >= u32::MAX as f64 {
        u32::MAX
    } else {
        v as u32
    }
}
