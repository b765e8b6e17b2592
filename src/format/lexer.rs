// ── Segment ───────────────────────────────────────────────────────────────

/// A conversion recognised in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specifier {
    /// `%s`
    String,
    /// `%d`
    Number,
    /// `%i`
    Integer,
    /// `%f`
    Float,
    /// `%j`
    Json,
    /// `%o`
    Object,
    /// `%O`
    ObjectPlain,
    /// `%c`
    Css,
}

impl Specifier {
    fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::String),
            'd' => Some(Self::Number),
            'i' => Some(Self::Integer),
            'f' => Some(Self::Float),
            'j' => Some(Self::Json),
            'o' => Some(Self::Object),
            'O' => Some(Self::ObjectPlain),
            'c' => Some(Self::Css),
            _ => None,
        }
    }

    /// The two characters this specifier was written as.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "%s",
            Self::Number => "%d",
            Self::Integer => "%i",
            Self::Float => "%f",
            Self::Json => "%j",
            Self::Object => "%o",
            Self::ObjectPlain => "%O",
            Self::Css => "%c",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'s> {
    Literal(&'s str),
    Spec(Specifier),
    /// `%%`
    Percent,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

/// Splits a template into literal runs and conversions.
///
/// Never fails: a `%` that does not start a known conversion stays part of
/// the surrounding literal.
pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn segments(mut self) -> Vec<Segment<'s>> {
        let mut out = Vec::new();
        while let Some(seg) = self.next_segment() {
            out.push(seg);
        }
        out
    }

    fn next_segment(&mut self) -> Option<Segment<'s>> {
        let rest = &self.src[self.pos..];
        if rest.is_empty() {
            return None;
        }

        if let Some(seg) = Self::conversion(rest) {
            self.pos += 2;
            return Some(seg);
        }

        // Literal run up to the next `%` that opens a conversion.
        let mut end = rest.len();
        for (idx, _) in rest.match_indices('%').filter(|(idx, _)| *idx > 0) {
            if Self::conversion(&rest[idx..]).is_some() {
                end = idx;
                break;
            }
        }
        if end == 0 {
            // A lone `%` at the start that is not a conversion.
            end = 1;
        }

        self.pos += end;
        Some(Segment::Literal(&rest[..end]))
    }

    fn conversion(s: &str) -> Option<Segment<'s>> {
        let mut chars = s.chars();
        if chars.next() != Some('%') {
            return None;
        }
        match chars.next()? {
            '%' => Some(Segment::Percent),
            c => Specifier::from_char(c).map(Segment::Spec),
        }
    }
}
